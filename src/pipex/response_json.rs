/*
 *
 *  * Copyright (c) 2026 the tinybird-gateway authors.
 *  *
 *  * Licensed under the Apache License, Version 2.0 (the "License");
 *  * you may not use this file except in compliance with the License.
 *  * You may obtain a copy of the License at
 *  *
 *  *    http://www.apache.org/licenses/LICENSE-2.0
 *  *
 *  * Unless required by applicable law or agreed to in writing, software
 *  * distributed under the License is distributed on an "AS IS" BASIS,
 *  * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  * See the License for the specific language governing permissions and
 *  * limitations under the License.
 *
 */

use serde::Deserialize;
use serde_json::value::RawValue;

/// Successful pipe envelope. Rows are kept raw so each one can be decoded
/// against the declared row type individually.
#[derive(Debug, Deserialize)]
pub(crate) struct PipeResponse {
    #[serde(default)]
    pub meta: Vec<ColumnMeta>,
    pub data: Vec<Box<RawValue>>,
    pub rows: Option<u64>,
    pub statistics: Option<StatisticsJson>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ColumnMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatisticsJson {
    pub elapsed: f64,
    pub rows_read: u64,
    pub bytes_read: u64,
}

/// Error body returned with non-200 statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct PipeErrorResponse {
    pub error: String,
    #[allow(dead_code)]
    pub documentation: Option<String>,
}
