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

use std::time::Duration;

/// Environment variable holding the backend credential. Absence is a
/// supported state, not a startup failure.
pub const TOKEN_ENV_VAR: &str = "TINYBIRD_TOKEN";
/// Optional override for the backend base URL.
pub const BASE_URL_ENV_VAR: &str = "TINYBIRD_BASE_URL";

pub const DEFAULT_ENDPOINT: &str = "https://api.tinybird.co";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for a [`Gateway`](crate::Gateway). Constructed explicitly
/// and passed in; there is no process-global client. A config without a
/// token produces a gateway that is unconfigured for its whole lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct GatewayConfig {
    pub token: Option<String>,
    pub endpoint: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            token: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }
}

impl GatewayConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Reads the credential and optional base URL from the environment.
    /// A missing or empty token yields an unconfigured gateway.
    pub fn from_env() -> Self {
        let token = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|t| !t.trim().is_empty());

        let endpoint = std::env::var(BASE_URL_ENV_VAR)
            .ok()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Self::new().token(token).endpoint(endpoint)
    }

    pub fn token(mut self, token: impl Into<Option<String>>) -> Self {
        self.token = token.into();
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

fn default_user_agent() -> String {
    format!(
        "{}/{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn from_env_without_token_is_unconfigured() {
        std::env::remove_var(TOKEN_ENV_VAR);
        std::env::remove_var(BASE_URL_ENV_VAR);

        let config = GatewayConfig::from_env();

        assert_eq!(config.token, None);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    #[serial]
    fn from_env_treats_blank_token_as_absent() {
        std::env::set_var(TOKEN_ENV_VAR, "   ");

        let config = GatewayConfig::from_env();
        assert_eq!(config.token, None);

        std::env::remove_var(TOKEN_ENV_VAR);
    }

    #[test]
    #[serial]
    fn from_env_reads_token_and_base_url() {
        std::env::set_var(TOKEN_ENV_VAR, "p.token123");
        std::env::set_var(BASE_URL_ENV_VAR, "https://api.eu-central-1.tinybird.co");

        let config = GatewayConfig::from_env();

        assert_eq!(config.token.as_deref(), Some("p.token123"));
        assert_eq!(config.endpoint, "https://api.eu-central-1.tinybird.co");

        std::env::remove_var(TOKEN_ENV_VAR);
        std::env::remove_var(BASE_URL_ENV_VAR);
    }
}
