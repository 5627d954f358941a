/*
 * SPDX-License-Identifier: MIT
 *
 * Permission is hereby granted, free of charge, to any person obtaining a
 * copy of this software and associated documentation files (the "Software"),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in
 * all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL
 * THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
 * DEALINGS IN THE SOFTWARE.
 */
use std::{collections::HashMap, time::Duration};

use reqwest::{
    header::HeaderValue, header::ACCEPT, header::CONTENT_TYPE, Client as HttpClient,
    ClientBuilder as HttpClientBuilder, Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::auth::AuthScheme;
use crate::standard::RedfishAccess;
pub use crate::RedfishError;

pub const REDFISH_ENDPOINT: &str = "redfish/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Username most BMC fleets ship as the management default.
pub const DEFAULT_USERNAME: &str = "USERID";

#[derive(Debug)]
pub struct RedfishClientPoolBuilder {
    timeout: Duration,
    accept_invalid_certs: bool,
    settle_delay: Option<Duration>,
}

impl RedfishClientPoolBuilder {
    /// Prevents the Redfish Client from accepting self signed certificates
    /// and other invalid certificates.
    ///
    /// By default self signed certificates will be accepted, since BMCs usually
    /// use those.
    pub fn reject_invalid_certs(mut self) -> RedfishClientPoolBuilder {
        self.accept_invalid_certs = false;
        self
    }

    /// Overwrites the timeout that will be applied to every request
    pub fn timeout(mut self, timeout: Duration) -> RedfishClientPoolBuilder {
        self.timeout = timeout;
        self
    }

    /// Overrides the vendor-specific settle interval between the off and on
    /// steps of a power cycle.
    pub fn settle_delay(mut self, settle_delay: Duration) -> RedfishClientPoolBuilder {
        self.settle_delay = Some(settle_delay);
        self
    }

    /// Builds a Redfish Client Network Configuration
    pub fn build(&self) -> Result<RedfishClientPool, RedfishError> {
        let builder = HttpClientBuilder::new();
        let http_client = builder
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .timeout(self.timeout)
            .build()
            .unwrap();
        let pool = RedfishClientPool {
            http_client,
            settle_delay: self.settle_delay,
        };

        Ok(pool)
    }
}

/// The BMC that a single access-layer call targets. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BmcTarget {
    /// Hostname or IP address of the BMC. HTTPS on port 443 unless the
    /// address carries an explicit scheme or port.
    pub address: String,
    /// BMC username. `DEFAULT_USERNAME` when absent.
    pub username: Option<String>,
    /// BMC password
    pub password: Option<String>,
}

impl BmcTarget {
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_USERNAME)
    }

    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct RedfishClientPool {
    http_client: HttpClient,
    settle_delay: Option<Duration>,
}

impl RedfishClientPool {
    /// Returns Builder for configuring a Redfish HTTP connection pool
    pub fn builder() -> RedfishClientPoolBuilder {
        RedfishClientPoolBuilder {
            timeout: DEFAULT_TIMEOUT,
            // BMCs often have a self-signed cert, so usually this has to be true
            accept_invalid_certs: true,
            settle_delay: None,
        }
    }

    /// Creates an access handle for one BMC. Fails before any network I/O
    /// if the target is missing its address or password.
    pub fn client(&self, target: BmcTarget) -> Result<RedfishAccess, RedfishError> {
        if target.address.trim().is_empty() {
            return Err(RedfishError::MissingConfig("BMC address"));
        }
        if target.password().is_empty() {
            return Err(RedfishError::MissingConfig("BMC password"));
        }
        let net = RedfishHttpClient::new(self.http_client.clone(), target);
        Ok(RedfishAccess::new(net, self.settle_delay))
    }
}

/// Strips the `/redfish/v1/` prefix so a resource path from an `@odata.id`
/// or a session Location header can be fed back through the client.
pub(crate) fn api_path(resource_path: &str) -> String {
    resource_path
        .replace(&format!("/{REDFISH_ENDPOINT}/"), "")
        .trim_start_matches('/')
        .to_string()
}

/// A HTTP client which targets a single BMC endpoint
#[derive(Debug)]
pub struct RedfishHttpClient {
    pub(crate) target: BmcTarget,
    http_client: HttpClient,
}

impl RedfishHttpClient {
    pub(crate) fn new(http_client: HttpClient, target: BmcTarget) -> Self {
        Self {
            target,
            http_client,
        }
    }

    fn url(&self, api: &str) -> String {
        let address = self.target.address.trim_end_matches('/');
        if address.starts_with("https://") || address.starts_with("http://") {
            format!("{address}/{REDFISH_ENDPOINT}/{api}")
        } else {
            format!("https://{address}/{REDFISH_ENDPOINT}/{api}")
        }
    }

    pub(crate) async fn get<T>(
        &self,
        api: &str,
        auth: &AuthScheme,
    ) -> Result<(StatusCode, T), RedfishError>
    where
        T: DeserializeOwned + ::std::fmt::Debug,
    {
        let (status_code, resp_opt) = self.req::<T, String>(Method::GET, api, auth, None).await?;
        match resp_opt {
            Some(response_body) => Ok((status_code, response_body)),
            None => Err(RedfishError::NoContent),
        }
    }

    pub(crate) async fn post(
        &self,
        api: &str,
        auth: &AuthScheme,
        data: HashMap<&str, String>,
    ) -> Result<StatusCode, RedfishError> {
        let (status_code, _resp_body): (_, Option<HashMap<String, serde_json::Value>>) =
            self.req(Method::POST, api, auth, Some(data)).await?;
        Ok(status_code)
    }

    pub(crate) async fn delete(
        &self,
        api: &str,
        auth: &AuthScheme,
    ) -> Result<StatusCode, RedfishError> {
        let (status_code, _resp_body): (_, Option<HashMap<String, serde_json::Value>>) =
            self.req::<_, String>(Method::DELETE, api, auth, None).await?;
        Ok(status_code)
    }

    // All the HTTP requests happen from here.
    pub(crate) async fn req<T, B>(
        &self,
        method: Method,
        api: &str,
        auth: &AuthScheme,
        body: Option<B>,
    ) -> Result<(StatusCode, Option<T>), RedfishError>
    where
        T: DeserializeOwned + ::std::fmt::Debug,
        B: Serialize + ::std::fmt::Debug,
    {
        let body_enc = match body {
            Some(b) => {
                let body_enc =
                    serde_json::to_string(&b).map_err(|e| RedfishError::JsonSerialize {
                        url: self.url(api),
                        object_debug: format!("{b:?}"),
                        source: e,
                    })?;
                Some(body_enc)
            }
            None => None,
        };
        let response = self.send(method, api, auth, body_enc).await?;
        let url = self.url(api);
        let status_code = response.status();
        if status_code == StatusCode::CONFLICT {
            // 409 No Content is how Dell responds if we try to turn off a system that's already off, etc.
            // Note that Lenovo accepts these unnecessary operations and returns '204 No Content'.
            return Err(RedfishError::UnnecessaryOperation);
        }
        // read the body even if not status 2XX, because BMCs give useful error messages as JSON
        let response_body = response.text().await.map_err(|e| RedfishError::Network {
            url: url.clone(),
            source: e,
        })?;
        if response_body.is_empty() {
            debug!("RX {status_code}");
        } else {
            debug!("RX {status_code} {response_body}");
        }
        if !status_code.is_success() {
            return Err(RedfishError::HTTPErrorCode {
                url,
                status_code,
                body: response_body,
            });
        }
        let mut res = None;
        if !response_body.is_empty() {
            match serde_json::from_str(&response_body) {
                Ok(v) => res = Some(v),
                Err(e) => {
                    return Err(RedfishError::JsonDeserialize {
                        url,
                        body: response_body,
                        source: e,
                    });
                }
            };
        }
        Ok((status_code, res))
    }

    /// Issues the request and hands back the raw response. Session creation
    /// goes through here directly because it needs the response headers.
    pub(crate) async fn send(
        &self,
        method: Method,
        api: &str,
        auth: &AuthScheme,
        body: Option<String>,
    ) -> Result<reqwest::Response, RedfishError> {
        let url = self.url(api);
        debug!("TX {} {} {}", method, url, body.as_deref().unwrap_or_default());

        let mut req_b = self
            .http_client
            .request(method, &url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        req_b = match auth {
            AuthScheme::None => req_b,
            AuthScheme::Basic { username, password } => {
                req_b.basic_auth(username, Some(password))
            }
            AuthScheme::Token(token) => req_b.header("X-Auth-Token", token),
        };
        if let Some(b) = body {
            req_b = req_b.body(b);
        }
        req_b.send().await.map_err(|e| RedfishError::Network {
            url: url.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn client_for(address: &str) -> RedfishHttpClient {
        RedfishHttpClient::new(
            HttpClient::new(),
            BmcTarget {
                address: address.to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_url_defaults_to_https() {
        let net = client_for("10.0.0.9");
        assert_eq!(net.url("Systems"), "https://10.0.0.9/redfish/v1/Systems");
    }

    #[test]
    fn test_url_keeps_explicit_scheme() {
        let net = client_for("http://127.0.0.1:8733");
        assert_eq!(
            net.url("Systems"),
            "http://127.0.0.1:8733/redfish/v1/Systems"
        );
    }

    #[test]
    fn test_api_path_strips_endpoint_prefix() {
        assert_eq!(
            api_path("/redfish/v1/SessionService/Sessions/42"),
            "SessionService/Sessions/42"
        );
        assert_eq!(api_path("Chassis/1/Power"), "Chassis/1/Power");
    }

    #[test]
    fn test_target_username_default() {
        let target = BmcTarget {
            address: "10.0.0.9".to_string(),
            ..Default::default()
        };
        assert_eq!(target.username(), DEFAULT_USERNAME);
    }
}
