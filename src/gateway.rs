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

use crate::config::GatewayConfig;
use crate::httpx::client::{Client, ClientConfig, ReqwestClient};
use crate::httpx::error::Result as HttpxResult;
use crate::pipes::clicks::{ClickEventRow, ClickEventsByView, ClickEventsByViewParams};
use crate::pipes::durations::{
    DocumentDurationPerViewer, DocumentDurationPerViewerParams, SumDurationRow,
    TotalAvgPageDuration, TotalAvgPageDurationParams, TotalAvgPageDurationRow,
    TotalDataroomDuration, TotalDataroomDurationParams, TotalDataroomDurationRow,
    TotalDocumentDuration, TotalDocumentDurationParams, TotalLinkDuration,
    TotalLinkDurationParams, TotalLinkDurationRow, TotalViewerDuration,
    TotalViewerDurationParams, ViewPageDuration, ViewPageDurationParams, ViewPageDurationRow,
};
use crate::pipes::useragent::{
    UserAgentRow, ViewUserAgent, ViewUserAgentParams, ViewUserAgentV2, ViewUserAgentV2Params,
};
use crate::pipes::video::{
    VideoEventRow, VideoEventsByDocument, VideoEventsByDocumentParams, VideoEventsByView,
    VideoEventsByViewParams, VideoViewEventRow,
};
use crate::pipes::webhooks::{WebhookEventRow, WebhookEvents, WebhookEventsParams};
use crate::pipex::pipe::{PipeSpec, Pipes};
use crate::pipex::pipe_result::PipeResult;
use std::sync::Arc;
use tracing::{error, warn};
use uuid::Uuid;

/// The safe invocation surface. One method per registered pipe, every one of
/// them total: whatever happens underneath, the caller gets a well-formed
/// (possibly empty) result and never an error.
///
/// A gateway built without a token holds no bound pipes at all and answers
/// every query with an empty result after a warning log; it stays that way
/// for its lifetime. A configured gateway is immutable after construction,
/// so any number of invocations may run concurrently.
#[derive(Debug)]
pub struct Gateway<C: Client = ReqwestClient> {
    pipes: Option<Pipes<C>>,
}

impl Gateway<ReqwestClient> {
    /// Builds a gateway from explicit configuration. The HTTP client is only
    /// constructed when a token is present; without one no network I/O will
    /// ever happen.
    pub fn new(config: GatewayConfig) -> HttpxResult<Self> {
        let Some(token) = config.token.clone() else {
            return Ok(Self { pipes: None });
        };

        let http_client = ReqwestClient::new(
            ClientConfig::new().request_timeout(config.request_timeout),
        )?;

        Ok(Self::bind(config, token, Arc::new(http_client)))
    }
}

impl<C: Client> Gateway<C> {
    /// Builds a gateway over an injected transport. This is how tests swap
    /// in a recording mock without touching process environment.
    pub fn with_client(config: GatewayConfig, http_client: Arc<C>) -> Self {
        match config.token.clone() {
            Some(token) => Self::bind(config, token, http_client),
            None => Self { pipes: None },
        }
    }

    fn bind(config: GatewayConfig, token: String, http_client: Arc<C>) -> Self {
        Self {
            pipes: Some(Pipes {
                http_client,
                user_agent: config.user_agent,
                endpoint: config.endpoint.trim_end_matches('/').to_string(),
                token,
            }),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.pipes.is_some()
    }

    /// The bound pipe executor, if a credential was configured. Callers who
    /// want failures surfaced instead of swallowed can go through this.
    pub fn pipes(&self) -> Option<&Pipes<C>> {
        self.pipes.as_ref()
    }

    async fn safe_query<S: PipeSpec>(&self, params: &S::Params) -> PipeResult<S::Row> {
        let Some(pipes) = &self.pipes else {
            warn!(
                pipe = S::NAME,
                "analytics backend not configured, skipping pipe query"
            );
            return PipeResult::empty();
        };

        let correlation_id = Uuid::new_v4().to_string();

        match pipes.query::<S>(params, &correlation_id).await {
            Ok(result) => result,
            Err(e) => {
                error!(
                    pipe = S::NAME,
                    kind = e.kind().label(),
                    correlation_id = correlation_id.as_str(),
                    "pipe query failed: {e}"
                );
                PipeResult::empty()
            }
        }
    }

    /// Average time spent per page of a document.
    pub async fn total_avg_page_duration(
        &self,
        params: &TotalAvgPageDurationParams,
    ) -> PipeResult<TotalAvgPageDurationRow> {
        self.safe_query::<TotalAvgPageDuration>(params).await
    }

    /// Time spent per page within one view.
    pub async fn view_page_duration(
        &self,
        params: &ViewPageDurationParams,
    ) -> PipeResult<ViewPageDurationRow> {
        self.safe_query::<ViewPageDuration>(params).await
    }

    /// Total time spent on a document across all matching views.
    pub async fn total_document_duration(
        &self,
        params: &TotalDocumentDurationParams,
    ) -> PipeResult<SumDurationRow> {
        self.safe_query::<TotalDocumentDuration>(params).await
    }

    /// Total time and view count for one link.
    pub async fn total_link_duration(
        &self,
        params: &TotalLinkDurationParams,
    ) -> PipeResult<TotalLinkDurationRow> {
        self.safe_query::<TotalLinkDuration>(params).await
    }

    /// Total time spent by a set of views.
    pub async fn total_viewer_duration(
        &self,
        params: &TotalViewerDurationParams,
    ) -> PipeResult<SumDurationRow> {
        self.safe_query::<TotalViewerDuration>(params).await
    }

    /// Per-view time spent inside a dataroom.
    pub async fn total_dataroom_duration(
        &self,
        params: &TotalDataroomDurationParams,
    ) -> PipeResult<TotalDataroomDurationRow> {
        self.safe_query::<TotalDataroomDuration>(params).await
    }

    /// Total time a viewer spent on one document over a set of their views.
    pub async fn document_duration_per_viewer(
        &self,
        params: &DocumentDurationPerViewerParams,
    ) -> PipeResult<SumDurationRow> {
        self.safe_query::<DocumentDurationPerViewer>(params).await
    }

    /// Geo/browser/device breakdown for a view (v2, document-scoped).
    pub async fn view_user_agent_v2(
        &self,
        params: &ViewUserAgentV2Params,
    ) -> PipeResult<UserAgentRow> {
        self.safe_query::<ViewUserAgentV2>(params).await
    }

    /// Geo/browser/device breakdown for a view.
    pub async fn view_user_agent(
        &self,
        params: &ViewUserAgentParams,
    ) -> PipeResult<UserAgentRow> {
        self.safe_query::<ViewUserAgent>(params).await
    }

    /// Delivery log for one webhook endpoint.
    pub async fn webhook_events(
        &self,
        params: &WebhookEventsParams,
    ) -> PipeResult<WebhookEventRow> {
        self.safe_query::<WebhookEvents>(params).await
    }

    /// Playback event stream for a document.
    pub async fn video_events_by_document(
        &self,
        params: &VideoEventsByDocumentParams,
    ) -> PipeResult<VideoEventRow> {
        self.safe_query::<VideoEventsByDocument>(params).await
    }

    /// Playback event stream for a single view.
    pub async fn video_events_by_view(
        &self,
        params: &VideoEventsByViewParams,
    ) -> PipeResult<VideoViewEventRow> {
        self.safe_query::<VideoEventsByView>(params).await
    }

    /// Link click events for a single view.
    pub async fn click_events_by_view(
        &self,
        params: &ClickEventsByViewParams,
    ) -> PipeResult<ClickEventRow> {
        self.safe_query::<ClickEventsByView>(params).await
    }
}
