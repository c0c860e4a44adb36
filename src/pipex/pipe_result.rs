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

use crate::pipex::response_json::{ColumnMeta, StatisticsJson};

/// The tabular answer to one pipe invocation. `data` preserves the backend's
/// row order; the gateway never reorders.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeResult<Row> {
    pub data: Vec<Row>,
    pub rows: u64,
    pub columns: Vec<Column>,
    pub statistics: Option<Statistics>,
}

impl<Row> PipeResult<Row> {
    /// The well-formed zero answer the safe wrappers return on any failure.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            rows: 0,
            columns: Vec::new(),
            statistics: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub column_type: String,
}

impl From<ColumnMeta> for Column {
    fn from(meta: ColumnMeta) -> Self {
        Self {
            name: meta.name,
            column_type: meta.column_type,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub elapsed: f64,
    pub rows_read: u64,
    pub bytes_read: u64,
}

impl From<StatisticsJson> for Statistics {
    fn from(statistics: StatisticsJson) -> Self {
        Self {
            elapsed: statistics.elapsed,
            rows_read: statistics.rows_read,
            bytes_read: statistics.bytes_read,
        }
    }
}
