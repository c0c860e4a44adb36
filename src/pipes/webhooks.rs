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

//! Webhook delivery log pipe.

use crate::pipex::error::Result;
use crate::pipex::params::{check_required, PipeParams};
use crate::pipex::pipe::PipeSpec;
use serde::{Deserialize, Serialize};

/// Delivery attempts recorded for one webhook endpoint.
pub struct WebhookEvents;

impl PipeSpec for WebhookEvents {
    const NAME: &'static str = "get_webhook_events__v1";
    type Params = WebhookEventsParams;
    type Row = WebhookEventRow;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEventsParams {
    pub webhook_id: String,
}

impl PipeParams for WebhookEventsParams {
    fn validate(&self) -> Result<()> {
        check_required("webhookId", &self.webhook_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEventRow {
    pub event_id: String,
    pub webhook_id: String,
    /// Message id assigned by the delivery queue.
    pub message_id: String,
    pub event: WebhookTrigger,
    pub url: String,
    pub http_status: u16,
    pub request_body: String,
    pub response_body: String,
    pub timestamp: String,
}

/// Closed set of events a webhook can subscribe to. A value outside this set
/// coming back from the backend is reported as schema mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookTrigger {
    #[serde(rename = "link.created")]
    LinkCreated,
    #[serde(rename = "link.viewed")]
    LinkViewed,
    #[serde(rename = "document.created")]
    DocumentCreated,
    #[serde(rename = "dataroom.created")]
    DataroomCreated,
}
