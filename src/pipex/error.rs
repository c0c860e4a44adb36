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

use crate::httpx;
use http::StatusCode;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    inner: ErrorImpl,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner.kind)
    }
}

impl StdError for Error {}

impl Error {
    pub(crate) fn new_server_error(e: ServerError) -> Error {
        Self {
            inner: ErrorImpl {
                kind: Box::new(ErrorKind::Server(e)),
            },
        }
    }

    pub(crate) fn new_message_error(
        msg: impl Into<String>,
        endpoint: impl Into<Option<String>>,
        pipe: impl Into<Option<String>>,
        correlation_id: impl Into<Option<String>>,
    ) -> Error {
        Self {
            inner: ErrorImpl {
                kind: Box::new(ErrorKind::Message {
                    msg: msg.into(),
                    endpoint: endpoint.into(),
                    pipe: pipe.into(),
                    correlation_id: correlation_id.into(),
                }),
            },
        }
    }

    pub(crate) fn new_encoding_error(msg: impl Into<String>) -> Error {
        Self {
            inner: ErrorImpl {
                kind: Box::new(ErrorKind::Encoding { msg: msg.into() }),
            },
        }
    }

    pub(crate) fn new_invalid_argument_error(
        msg: impl Into<String>,
        arg: impl Into<Option<String>>,
    ) -> Self {
        Self {
            inner: ErrorImpl {
                kind: Box::new(ErrorKind::InvalidArgument {
                    msg: msg.into(),
                    arg: arg.into(),
                }),
            },
        }
    }

    pub(crate) fn new_schema_mismatch_error(
        pipe: impl Into<String>,
        row_index: usize,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            inner: ErrorImpl {
                kind: Box::new(ErrorKind::SchemaMismatch {
                    pipe: pipe.into(),
                    row_index,
                    msg: msg.into(),
                }),
            },
        }
    }

    pub(crate) fn new_http_error(
        error: httpx::error::Error,
        endpoint: impl Into<String>,
        pipe: impl Into<Option<String>>,
        correlation_id: impl Into<Option<String>>,
    ) -> Self {
        Self {
            inner: ErrorImpl {
                kind: Box::new(ErrorKind::Http {
                    error,
                    endpoint: endpoint.into(),
                    pipe: pipe.into(),
                    correlation_id: correlation_id.into(),
                }),
            },
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

#[derive(Debug, Clone)]
struct ErrorImpl {
    kind: Box<ErrorKind>,
}

impl PartialEq for ErrorImpl {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    Server(ServerError),
    #[non_exhaustive]
    Http {
        error: httpx::error::Error,
        endpoint: String,
        pipe: Option<String>,
        correlation_id: Option<String>,
    },
    #[non_exhaustive]
    Message {
        msg: String,
        endpoint: Option<String>,
        pipe: Option<String>,
        correlation_id: Option<String>,
    },
    #[non_exhaustive]
    InvalidArgument {
        msg: String,
        arg: Option<String>,
    },
    #[non_exhaustive]
    SchemaMismatch {
        pipe: String,
        row_index: usize,
        msg: String,
    },
    #[non_exhaustive]
    Encoding {
        msg: String,
    },
}

impl ErrorKind {
    /// Stable label for structured logs, one per failure class.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Server(_) => "server",
            ErrorKind::Http { .. } => "transport",
            ErrorKind::Message { .. } => "message",
            ErrorKind::InvalidArgument { .. } => "invalid_argument",
            ErrorKind::SchemaMismatch { .. } => "schema_mismatch",
            ErrorKind::Encoding { .. } => "encoding",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Server(e) => write!(f, "{e}"),
            ErrorKind::InvalidArgument { msg, arg } => {
                let base_msg = format!("invalid argument: {msg}");
                if let Some(arg) = arg {
                    write!(f, "{base_msg}, arg: {arg}")
                } else {
                    write!(f, "{base_msg}")
                }
            }
            ErrorKind::Encoding { msg } => write!(f, "encoding error: {msg}"),
            ErrorKind::SchemaMismatch {
                pipe,
                row_index,
                msg,
            } => {
                write!(
                    f,
                    "schema mismatch: pipe: {pipe}, row index: {row_index}, {msg}"
                )
            }
            ErrorKind::Http {
                error,
                endpoint,
                pipe,
                correlation_id,
            } => {
                write!(f, "http error {error}: endpoint: {endpoint}")?;
                if let Some(pipe) = pipe {
                    write!(f, ", pipe: {pipe}")?;
                }
                if let Some(correlation_id) = correlation_id {
                    write!(f, ", correlation id: {correlation_id}")?;
                }
                Ok(())
            }
            ErrorKind::Message {
                msg,
                endpoint,
                pipe,
                correlation_id,
            } => {
                write!(f, "{msg}")?;
                if let Some(endpoint) = endpoint {
                    write!(f, ", endpoint: {endpoint}")?;
                }
                if let Some(pipe) = pipe {
                    write!(f, ", pipe: {pipe}")?;
                }
                if let Some(correlation_id) = correlation_id {
                    write!(f, ", correlation id: {correlation_id}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerError {
    kind: ServerErrorKind,

    endpoint: String,
    status_code: StatusCode,
    msg: String,

    pipe: Option<String>,
    correlation_id: Option<String>,
}

impl ServerError {
    pub(crate) fn new(
        kind: ServerErrorKind,
        endpoint: impl Into<String>,
        status_code: StatusCode,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            endpoint: endpoint.into(),
            status_code,
            msg: msg.into(),
            pipe: None,
            correlation_id: None,
        }
    }

    pub fn kind(&self) -> &ServerErrorKind {
        &self.kind
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    pub fn pipe(&self) -> Option<&str> {
        self.pipe.as_deref()
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub(crate) fn with_pipe(mut self, pipe: impl Into<String>) -> Self {
        self.pipe = Some(pipe.into());
        self
    }

    pub(crate) fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "server error of kind: {}, msg: {}",
            self.kind, self.msg
        )?;

        if let Some(pipe) = &self.pipe {
            write!(f, ", pipe: {pipe}")?;
        }
        if let Some(correlation_id) = &self.correlation_id {
            write!(f, ", correlation id: {correlation_id}")?;
        }

        write!(
            f,
            ", endpoint: {}, status code: {}",
            self.endpoint, self.status_code
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ServerErrorKind {
    AuthenticationFailure,
    PipeNotFound,
    InvalidRequest,
    RateLimited,
    Internal,
    Unknown,
}

impl Display for ServerErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerErrorKind::AuthenticationFailure => write!(f, "authentication failure"),
            ServerErrorKind::PipeNotFound => write!(f, "pipe not found"),
            ServerErrorKind::InvalidRequest => write!(f, "invalid request"),
            ServerErrorKind::RateLimited => write!(f, "rate limited"),
            ServerErrorKind::Internal => write!(f, "internal server error"),
            ServerErrorKind::Unknown => write!(f, "unknown pipe error"),
        }
    }
}
