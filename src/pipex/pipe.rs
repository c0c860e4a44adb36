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

use crate::httpx::client::Client;
use crate::httpx::request::{Auth, BearerAuth, Request};
use crate::pipex::error::{self, Error, ServerError, ServerErrorKind};
use crate::pipex::params::{encode_params, PipeParams};
use crate::pipex::pipe_result::PipeResult;
use crate::pipex::response_json::{PipeErrorResponse, PipeResponse};
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// One named remote query: its versioned pipe name, its parameter contract,
/// and its result-row contract. Implementations live in [`crate::pipes`].
pub trait PipeSpec {
    /// Remote pipe name, versioned with a `__vN` suffix. A new version is a
    /// new definition; old versions stay while still referenced.
    const NAME: &'static str;
    type Params: PipeParams + Send + Sync;
    type Row: DeserializeOwned + Send;
}

/// Executor for bound pipes: validates parameters, issues the request, maps
/// backend failures, and decodes rows against the declared row type.
#[derive(Debug)]
pub struct Pipes<C: Client> {
    pub http_client: Arc<C>,
    pub user_agent: String,
    pub endpoint: String,
    pub token: String,
}

impl<C: Client> Pipes<C> {
    pub fn new_request(&self, path: impl AsRef<str>, correlation_id: &str) -> Request {
        Request::new(Method::GET, format!("{}/{}", self.endpoint, path.as_ref()))
            .auth(Auth::BearerAuth(BearerAuth {
                token: self.token.clone(),
            }))
            .user_agent(self.user_agent.clone())
            .unique_id(correlation_id)
    }

    fn pipe_path<S: PipeSpec>(&self, params: &S::Params) -> error::Result<String> {
        let pairs = encode_params(params)?;

        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &pairs {
            serializer.append_pair(key, value);
        }
        let query = serializer.finish();

        if query.is_empty() {
            Ok(format!("v0/pipes/{}.json", S::NAME))
        } else {
            Ok(format!("v0/pipes/{}.json?{}", S::NAME, query))
        }
    }

    pub async fn query<S: PipeSpec>(
        &self,
        params: &S::Params,
        correlation_id: &str,
    ) -> error::Result<PipeResult<S::Row>> {
        params.validate()?;

        let path = self.pipe_path::<S>(params)?;
        let req = self.new_request(path, correlation_id);

        let res = self.http_client.execute(req).await.map_err(|e| {
            Error::new_http_error(
                e,
                &self.endpoint,
                S::NAME.to_string(),
                correlation_id.to_string(),
            )
        })?;

        let status_code = res.status();
        if status_code != 200 {
            let body = res.bytes().await.map_err(|e| {
                Error::new_http_error(
                    e,
                    &self.endpoint,
                    S::NAME.to_string(),
                    correlation_id.to_string(),
                )
            })?;

            return Err(self.parse_error::<S>(status_code, &body, correlation_id));
        }

        let envelope: PipeResponse = res.json().await.map_err(|e| {
            Error::new_message_error(
                format!("failed to parse pipe response body: {e}"),
                self.endpoint.clone(),
                S::NAME.to_string(),
                correlation_id.to_string(),
            )
        })?;

        let mut data = Vec::with_capacity(envelope.data.len());
        for (row_index, raw) in envelope.data.iter().enumerate() {
            let row: S::Row = serde_json::from_str(raw.get()).map_err(|e| {
                Error::new_schema_mismatch_error(S::NAME, row_index, e.to_string())
            })?;
            data.push(row);
        }

        let rows = envelope.rows.unwrap_or(data.len() as u64);

        Ok(PipeResult {
            data,
            rows,
            columns: envelope.meta.into_iter().map(Into::into).collect(),
            statistics: envelope.statistics.map(Into::into),
        })
    }

    fn parse_error<S: PipeSpec>(
        &self,
        status_code: StatusCode,
        body: &[u8],
        correlation_id: &str,
    ) -> Error {
        let msg = match serde_json::from_slice::<PipeErrorResponse>(body) {
            Ok(e) => e.error,
            Err(_) => format!(
                "non-200 status code received {} but parsing error response body failed",
                status_code
            ),
        };

        let kind = Self::server_error_kind(status_code);

        Error::new_server_error(
            ServerError::new(kind, &self.endpoint, status_code, msg)
                .with_pipe(S::NAME)
                .with_correlation_id(correlation_id),
        )
    }

    fn server_error_kind(status_code: StatusCode) -> ServerErrorKind {
        match status_code.as_u16() {
            401 | 403 => ServerErrorKind::AuthenticationFailure,
            404 => ServerErrorKind::PipeNotFound,
            400 => ServerErrorKind::InvalidRequest,
            429 => ServerErrorKind::RateLimited,
            500..=599 => ServerErrorKind::Internal,
            _ => ServerErrorKind::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_server_error_kinds() {
        let cases = vec![
            (StatusCode::UNAUTHORIZED, ServerErrorKind::AuthenticationFailure),
            (StatusCode::FORBIDDEN, ServerErrorKind::AuthenticationFailure),
            (StatusCode::NOT_FOUND, ServerErrorKind::PipeNotFound),
            (StatusCode::BAD_REQUEST, ServerErrorKind::InvalidRequest),
            (StatusCode::TOO_MANY_REQUESTS, ServerErrorKind::RateLimited),
            (StatusCode::INTERNAL_SERVER_ERROR, ServerErrorKind::Internal),
            (StatusCode::BAD_GATEWAY, ServerErrorKind::Internal),
            (StatusCode::SERVICE_UNAVAILABLE, ServerErrorKind::Internal),
            (StatusCode::IM_A_TEAPOT, ServerErrorKind::Unknown),
        ];

        for (status, expected) in cases {
            assert_eq!(
                Pipes::<crate::httpx::client::ReqwestClient>::server_error_kind(status),
                expected,
                "status {status}"
            );
        }
    }
}
