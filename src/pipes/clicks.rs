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

//! Link click event pipe.

use crate::pipex::error::Result;
use crate::pipex::params::{check_required, PipeParams};
use crate::pipex::pipe::PipeSpec;
use serde::{Deserialize, Serialize};

/// Clicks on in-document links, for a single view.
pub struct ClickEventsByView;

impl PipeSpec for ClickEventsByView {
    const NAME: &'static str = "get_click_events_by_view__v1";
    type Params = ClickEventsByViewParams;
    type Row = ClickEventRow;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickEventsByViewParams {
    pub document_id: String,
    pub view_id: String,
}

impl PipeParams for ClickEventsByViewParams {
    fn validate(&self) -> Result<()> {
        check_required("document_id", &self.document_id)?;
        check_required("view_id", &self.view_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickEventRow {
    pub timestamp: String,
    pub document_id: String,
    /// Null when the document was not viewed through a dataroom.
    pub dataroom_id: Option<String>,
    pub view_id: String,
    pub page_number: String,
    pub version_number: i64,
    pub href: String,
}
