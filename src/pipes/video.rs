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

//! Video playback event pipes. These definitions use snake_case parameter
//! names on the wire; the duration/useragent pipes use camelCase. The remote
//! queries are the contract, so the mix is preserved as-is.

use crate::pipex::error::Result;
use crate::pipex::params::{check_required, PipeParams};
use crate::pipex::pipe::PipeSpec;
use serde::{Deserialize, Serialize};

/// Full playback event stream for a document, across all views.
pub struct VideoEventsByDocument;

impl PipeSpec for VideoEventsByDocument {
    const NAME: &'static str = "get_video_events_by_document__v1";
    type Params = VideoEventsByDocumentParams;
    type Row = VideoEventRow;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoEventsByDocumentParams {
    pub document_id: String,
}

impl PipeParams for VideoEventsByDocumentParams {
    fn validate(&self) -> Result<()> {
        check_required("document_id", &self.document_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoEventRow {
    pub timestamp: String,
    pub view_id: String,
    pub event_type: VideoEventType,
    pub start_time: f64,
    pub end_time: f64,
    pub playback_rate: f64,
    pub volume: f64,
    /// 0/1 flags as stored by the event pipeline.
    pub is_muted: u8,
    pub is_focused: u8,
    pub is_fullscreen: u8,
}

/// Playback event stream for a single view. This older pipe reports the
/// event type as a plain string rather than the closed enum.
pub struct VideoEventsByView;

impl PipeSpec for VideoEventsByView {
    const NAME: &'static str = "get_video_events_by_view__v1";
    type Params = VideoEventsByViewParams;
    type Row = VideoViewEventRow;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoEventsByViewParams {
    pub document_id: String,
    pub view_id: String,
}

impl PipeParams for VideoEventsByViewParams {
    fn validate(&self) -> Result<()> {
        check_required("document_id", &self.document_id)?;
        check_required("view_id", &self.view_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoViewEventRow {
    pub timestamp: String,
    pub event_type: String,
    pub start_time: f64,
    pub end_time: f64,
}

/// Closed set of playback events the player emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoEventType {
    Played,
    Paused,
    Seeked,
    Ended,
    Muted,
    Unmuted,
    RateChanged,
    VolumeChanged,
    FullscreenEntered,
    FullscreenExited,
}
