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

use crate::httpx::error::{Error, Result as HttpxResult};
use crate::httpx::request::{Auth, Request};
use crate::httpx::response::Response;
use async_trait::async_trait;
use http::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::redirect::Policy;
use std::error::Error as StdError;
use std::time::Duration;
use tracing::{debug, trace};
use uuid::Uuid;

#[async_trait]
pub trait Client: Send + Sync {
    async fn execute(&self, req: Request) -> HttpxResult<Response>;
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct ClientConfig {
    pub request_timeout: Option<Duration>,
    pub idle_connection_timeout: Duration,
    pub max_idle_connections_per_host: Option<usize>,
    pub tcp_keep_alive_time: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: None,
            idle_connection_timeout: Duration::from_secs(60),
            max_idle_connections_per_host: None,
            tcp_keep_alive_time: Duration::from_secs(60),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn request_timeout(mut self, timeout: impl Into<Option<Duration>>) -> Self {
        self.request_timeout = timeout.into();
        self
    }

    pub fn idle_connection_timeout(mut self, timeout: Duration) -> Self {
        self.idle_connection_timeout = timeout;
        self
    }

    pub fn max_idle_connections_per_host(mut self, max_idle_connections_per_host: usize) -> Self {
        self.max_idle_connections_per_host = Some(max_idle_connections_per_host);
        self
    }
}

#[derive(Debug)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    client_id: String,
}

impl ReqwestClient {
    pub fn new(cfg: ClientConfig) -> HttpxResult<Self> {
        let mut builder = reqwest::Client::builder()
            .redirect(Policy::limited(10))
            .pool_idle_timeout(cfg.idle_connection_timeout)
            .tcp_keepalive(cfg.tcp_keep_alive_time);

        if let Some(timeout) = cfg.request_timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(max_idle) = cfg.max_idle_connections_per_host {
            builder = builder.pool_max_idle_per_host(max_idle);
        }

        let inner = builder
            .build()
            .map_err(|e| Error::new_message_error(format!("failed to build http client {e}")))?;

        Ok(Self {
            inner,
            client_id: Uuid::new_v4().to_string(),
        })
    }
}

#[async_trait]
impl Client for ReqwestClient {
    async fn execute(&self, req: Request) -> HttpxResult<Response> {
        let id = req.unique_id;

        trace!(
            "Writing request on {} to {}. Method={}. Request id={}",
            &self.client_id,
            &req.uri,
            &req.method,
            &id
        );

        let mut builder = self.inner.request(req.method, req.uri);

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        if let Some(content_type) = req.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }

        if let Some(user_agent) = req.user_agent {
            builder = builder.header(USER_AGENT, user_agent);
        }

        for (key, value) in req.headers {
            builder = builder.header(key, value);
        }

        if let Some(auth) = &req.auth {
            match auth {
                Auth::BearerAuth(bearer) => builder = builder.bearer_auth(&bearer.token),
            }
        }

        match builder.send().await {
            Ok(response) => Ok({
                trace!(
                    "Received response on {}. Request id={}. Status: {}",
                    &self.client_id,
                    &id,
                    response.status()
                );
                Response::from(response)
            }),
            Err(err) => {
                let mut msg = format!(
                    "Received error on {}. Request id={}. Err: {}",
                    &self.client_id, &id, &err,
                );

                if let Some(source) = err.source() {
                    msg = format!("{msg}. Source: {source}");
                }

                trace!("{msg}");

                if err.is_timeout() {
                    Err(Error::new_timeout_error(err.to_string()))
                } else if err.is_connect() {
                    Err(Error::new_connection_error(err.to_string()))
                } else {
                    Err(Error::new_message_error(err.to_string()))
                }
            }
        }
    }
}

impl Drop for ReqwestClient {
    fn drop(&mut self) {
        debug!("Dropping HTTP Client {}", &self.client_id);
    }
}
