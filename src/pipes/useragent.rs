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

//! User-agent pipes: where and with what a view happened.

use crate::pipex::error::Result;
use crate::pipex::params::{check_required, check_window, PipeParams};
use crate::pipex::pipe::PipeSpec;
use serde::{Deserialize, Serialize};

/// Geo/browser/device breakdown for a view, scoped to a document and window.
pub struct ViewUserAgentV2;

impl PipeSpec for ViewUserAgentV2 {
    const NAME: &'static str = "get_useragent_per_view__v2";
    type Params = ViewUserAgentV2Params;
    type Row = UserAgentRow;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewUserAgentV2Params {
    pub document_id: String,
    pub view_id: String,
    pub since: i64,
}

impl PipeParams for ViewUserAgentV2Params {
    fn validate(&self) -> Result<()> {
        check_required("documentId", &self.document_id)?;
        check_required("viewId", &self.view_id)?;
        check_window(self.since, None)
    }
}

/// Geo/browser/device breakdown for a view. v3 keys by view id alone.
pub struct ViewUserAgent;

impl PipeSpec for ViewUserAgent {
    const NAME: &'static str = "get_useragent_per_view__v3";
    type Params = ViewUserAgentParams;
    type Row = UserAgentRow;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewUserAgentParams {
    pub view_id: String,
}

impl PipeParams for ViewUserAgentParams {
    fn validate(&self) -> Result<()> {
        check_required("viewId", &self.view_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgentRow {
    pub country: String,
    pub city: String,
    pub browser: String,
    pub os: String,
    pub device: String,
}
