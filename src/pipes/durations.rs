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

//! Duration pipes: time spent on documents, pages, links, datarooms, and by
//! individual viewers. All `since`/`until` bounds are epoch milliseconds;
//! `until` is optional and open-ended when absent.

use crate::pipex::error::Result;
use crate::pipex::params::{
    check_id_list, check_ids, check_required, check_window, PipeParams,
};
use crate::pipex::pipe::PipeSpec;
use serde::{Deserialize, Serialize};

/// Average time spent per page of a document, across all matching views.
pub struct TotalAvgPageDuration;

impl PipeSpec for TotalAvgPageDuration {
    const NAME: &'static str = "get_total_average_page_duration__v5";
    type Params = TotalAvgPageDurationParams;
    type Row = TotalAvgPageDurationRow;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalAvgPageDurationParams {
    pub document_id: String,
    /// Comma separated link ids to exclude.
    pub excluded_link_ids: String,
    /// Comma separated view ids to exclude.
    pub excluded_view_ids: String,
    pub since: i64,
}

impl PipeParams for TotalAvgPageDurationParams {
    fn validate(&self) -> Result<()> {
        check_required("documentId", &self.document_id)?;
        check_id_list("excludedLinkIds", &self.excluded_link_ids)?;
        check_id_list("excludedViewIds", &self.excluded_view_ids)?;
        check_window(self.since, None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalAvgPageDurationRow {
    #[serde(rename = "versionNumber")]
    pub version_number: i64,
    #[serde(rename = "pageNumber")]
    pub page_number: String,
    pub avg_duration: f64,
}

/// Time spent per page within a single view.
pub struct ViewPageDuration;

impl PipeSpec for ViewPageDuration {
    const NAME: &'static str = "get_page_duration_per_view__v5";
    type Params = ViewPageDurationParams;
    type Row = ViewPageDurationRow;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPageDurationParams {
    pub document_id: String,
    pub view_id: String,
    pub since: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<i64>,
}

impl PipeParams for ViewPageDurationParams {
    fn validate(&self) -> Result<()> {
        check_required("documentId", &self.document_id)?;
        check_required("viewId", &self.view_id)?;
        check_window(self.since, self.until)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewPageDurationRow {
    #[serde(rename = "pageNumber")]
    pub page_number: String,
    pub sum_duration: f64,
}

/// Total time spent on a document across all matching views.
pub struct TotalDocumentDuration;

impl PipeSpec for TotalDocumentDuration {
    const NAME: &'static str = "get_total_document_duration__v1";
    type Params = TotalDocumentDurationParams;
    type Row = SumDurationRow;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalDocumentDurationParams {
    pub document_id: String,
    /// Comma separated link ids to exclude.
    pub excluded_link_ids: String,
    /// Comma separated view ids to exclude.
    pub excluded_view_ids: String,
    pub since: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<i64>,
}

impl PipeParams for TotalDocumentDurationParams {
    fn validate(&self) -> Result<()> {
        check_required("documentId", &self.document_id)?;
        check_id_list("excludedLinkIds", &self.excluded_link_ids)?;
        check_id_list("excludedViewIds", &self.excluded_view_ids)?;
        check_window(self.since, self.until)
    }
}

/// Single-column duration answer shared by several pipes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SumDurationRow {
    pub sum_duration: f64,
}

/// Total time and view count for a single link.
pub struct TotalLinkDuration;

impl PipeSpec for TotalLinkDuration {
    const NAME: &'static str = "get_total_link_duration__v1";
    type Params = TotalLinkDurationParams;
    type Row = TotalLinkDurationRow;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalLinkDurationParams {
    pub link_id: String,
    pub document_id: String,
    /// Comma separated view ids to exclude.
    pub excluded_view_ids: String,
    pub since: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<i64>,
}

impl PipeParams for TotalLinkDurationParams {
    fn validate(&self) -> Result<()> {
        check_required("linkId", &self.link_id)?;
        check_required("documentId", &self.document_id)?;
        check_id_list("excludedViewIds", &self.excluded_view_ids)?;
        check_window(self.since, self.until)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalLinkDurationRow {
    pub sum_duration: f64,
    pub view_count: f64,
}

/// Total time spent by a set of views.
pub struct TotalViewerDuration;

impl PipeSpec for TotalViewerDuration {
    const NAME: &'static str = "get_total_viewer_duration__v1";
    type Params = TotalViewerDurationParams;
    type Row = SumDurationRow;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalViewerDurationParams {
    /// Comma separated view ids.
    pub view_ids: String,
    pub since: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<i64>,
}

impl PipeParams for TotalViewerDurationParams {
    fn validate(&self) -> Result<()> {
        check_id_list("viewIds", &self.view_ids)?;
        check_window(self.since, self.until)
    }
}

/// Per-view time spent inside a dataroom. Unlike the other duration pipes,
/// this definition takes native id lists; they are comma-joined at encoding
/// time.
pub struct TotalDataroomDuration;

impl PipeSpec for TotalDataroomDuration {
    const NAME: &'static str = "get_total_dataroom_duration__v1";
    type Params = TotalDataroomDurationParams;
    type Row = TotalDataroomDurationRow;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalDataroomDurationParams {
    pub dataroom_id: String,
    pub excluded_link_ids: Vec<String>,
    pub excluded_view_ids: Vec<String>,
    pub since: i64,
}

impl PipeParams for TotalDataroomDurationParams {
    fn validate(&self) -> Result<()> {
        check_required("dataroomId", &self.dataroom_id)?;
        check_ids("excludedLinkIds", &self.excluded_link_ids)?;
        check_ids("excludedViewIds", &self.excluded_view_ids)?;
        check_window(self.since, None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalDataroomDurationRow {
    #[serde(rename = "viewId")]
    pub view_id: String,
    pub sum_duration: f64,
}

/// Total time a viewer spent on one document, over a set of their views.
pub struct DocumentDurationPerViewer;

impl PipeSpec for DocumentDurationPerViewer {
    const NAME: &'static str = "get_document_duration_per_viewer__v1";
    type Params = DocumentDurationPerViewerParams;
    type Row = SumDurationRow;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDurationPerViewerParams {
    pub document_id: String,
    /// Comma separated view ids.
    pub view_ids: String,
}

impl PipeParams for DocumentDurationPerViewerParams {
    fn validate(&self) -> Result<()> {
        check_required("documentId", &self.document_id)?;
        check_id_list("viewIds", &self.view_ids)
    }
}
