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

use async_trait::async_trait;
use http::StatusCode;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tinybird_gateway::httpx::client::Client;
use tinybird_gateway::httpx::error::Result as HttpxResult;
use tinybird_gateway::httpx::request::{Auth, Request};
use tinybird_gateway::httpx::response::Response;
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Metadata, Subscriber};

/// What the gateway actually sent, captured for assertions.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: http::Method,
    pub uri: String,
    pub bearer_token: Option<String>,
    pub unique_id: String,
}

/// Spy transport: records every request and answers from a queue of canned
/// responses. Panics if the gateway asks for more responses than were
/// queued, which is itself an assertion.
#[derive(Default)]
pub struct MockClient {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<VecDeque<(StatusCode, String)>>,
}

impl MockClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_response(&self, status: StatusCode, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back((status, body.into()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Client for MockClient {
    async fn execute(&self, req: Request) -> HttpxResult<Response> {
        let bearer_token = match &req.auth {
            Some(Auth::BearerAuth(bearer)) => Some(bearer.token.clone()),
            _ => None,
        };

        self.requests.lock().unwrap().push(RecordedRequest {
            method: req.method.clone(),
            uri: req.uri.clone(),
            bearer_token,
            unique_id: req.unique_id.clone(),
        });

        let (status, body) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock client ran out of canned responses");

        let response = http::Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(body)
            .expect("failed to build canned response");

        Ok(Response::from(reqwest::Response::from(response)))
    }
}

/// Counts warn/error events so tests can assert on the diagnostic contract.
#[derive(Debug, Default)]
pub struct LogCounts {
    warn: AtomicUsize,
    error: AtomicUsize,
}

impl LogCounts {
    pub fn warnings(&self) -> usize {
        self.warn.load(Ordering::SeqCst)
    }

    pub fn errors(&self) -> usize {
        self.error.load(Ordering::SeqCst)
    }
}

pub struct CountingSubscriber {
    counts: Arc<LogCounts>,
    next_id: AtomicUsize,
}

pub fn counting_subscriber() -> (CountingSubscriber, Arc<LogCounts>) {
    let counts = Arc::new(LogCounts::default());
    (
        CountingSubscriber {
            counts: counts.clone(),
            next_id: AtomicUsize::new(1),
        },
        counts,
    )
}

impl Subscriber for CountingSubscriber {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _attrs: &Attributes<'_>) -> Id {
        Id::from_u64(self.next_id.fetch_add(1, Ordering::SeqCst) as u64)
    }

    fn record(&self, _id: &Id, _record: &Record<'_>) {}

    fn record_follows_from(&self, _id: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        match *event.metadata().level() {
            Level::WARN => {
                self.counts.warn.fetch_add(1, Ordering::SeqCst);
            }
            Level::ERROR => {
                self.counts.error.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }
    }

    fn enter(&self, _id: &Id) {}

    fn exit(&self, _id: &Id) {}
}
