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

//! Typed, always-succeeds client for Tinybird pipe endpoints.
//!
//! Every analytics question the application asks is declared once in
//! [`pipes`] as a named, versioned pipe with a typed parameter contract and
//! a typed result-row contract. [`Gateway`] exposes one method per pipe,
//! and every one of those methods is total: if the gateway was built without
//! a token, or the backend call fails in any way, the caller gets an empty
//! result set and a diagnostic log instead of an error. Analytics must never
//! take down the primary request path.
//!
//! ```no_run
//! use tinybird_gateway::config::GatewayConfig;
//! use tinybird_gateway::pipes::durations::TotalDocumentDurationParams;
//! use tinybird_gateway::Gateway;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = Gateway::new(GatewayConfig::from_env())?;
//!
//! let result = gateway
//!     .total_document_duration(&TotalDocumentDurationParams {
//!         document_id: "doc_123".to_string(),
//!         excluded_link_ids: String::new(),
//!         excluded_view_ids: String::new(),
//!         since: 0,
//!         until: None,
//!     })
//!     .await;
//!
//! let total: f64 = result.data.iter().map(|row| row.sum_duration).sum();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod gateway;
pub mod httpx;
pub mod pipes;
pub mod pipex;

pub use config::GatewayConfig;
pub use gateway::Gateway;
pub use pipex::pipe_result::PipeResult;
