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
use reqwest::{header::LOCATION, Method};
use tracing::{debug, warn};

use crate::model::service_root::ServiceRoot;
use crate::model::session::SessionRequest;
use crate::network::{api_path, RedfishHttpClient};
use crate::vendor::{AuthMethod, Vendor, VendorProfile};
use crate::RedfishError;

const SESSIONS_API: &str = "SessionService/Sessions";

/// How a request authenticates itself.
#[derive(Debug, Clone)]
pub(crate) enum AuthScheme {
    /// The unauthenticated detection probe.
    None,
    Basic {
        username: String,
        password: String,
    },
    Token(String),
}

/// An ephemeral Redfish session. Owned by the AuthContext that created it
/// and destroyed exactly once, when the context is released.
#[derive(Debug, Clone)]
pub(crate) struct Session {
    pub token: String,
    pub location: String,
}

/// The credentials an operation runs with. One per operation; released on
/// every exit path before the operation returns.
pub(crate) struct AuthContext {
    pub profile: VendorProfile,
    scheme: AuthScheme,
    session: Option<Session>,
}

impl AuthContext {
    pub fn scheme(&self) -> &AuthScheme {
        &self.scheme
    }

    pub fn vendor(&self) -> Vendor {
        self.profile.vendor
    }

    /// Releases whatever this context holds. Deleting a session is best
    /// effort only; a failure here must never mask the operation's own
    /// outcome. Basic auth has nothing to release.
    pub async fn release(self, net: &RedfishHttpClient) {
        if let Some(session) = self.session {
            delete_session(net, session).await;
        }
    }
}

/// Figures out which vendor and auth scheme a BMC wants by reading its
/// service root without credentials. Detection failure is not an error;
/// it degrades to session auth, which every BMC supports.
pub(crate) async fn detect_vendor(net: &RedfishHttpClient) -> VendorProfile {
    match net.get::<ServiceRoot>("", &AuthScheme::None).await {
        Ok((_status_code, root)) => {
            let vendor = root.vendor();
            debug!("BMC vendor: {vendor}");
            vendor.profile()
        }
        Err(err) => {
            debug!("Vendor detection failed, defaulting to session auth: {err}");
            Vendor::Unknown.profile()
        }
    }
}

/// Detects the vendor and acquires credentials for one operation: static
/// Basic headers for Dell, a fresh session for everyone else.
pub(crate) async fn acquire(net: &RedfishHttpClient) -> Result<AuthContext, RedfishError> {
    let profile = detect_vendor(net).await;
    let username = net.target.username().to_string();
    let password = net.target.password().to_string();
    match profile.auth_method {
        AuthMethod::Basic => Ok(AuthContext {
            profile,
            scheme: AuthScheme::Basic { username, password },
            session: None,
        }),
        AuthMethod::Session => {
            let session = create_session(net, &username, &password).await?;
            Ok(AuthContext {
                profile,
                scheme: AuthScheme::Token(session.token.clone()),
                session: Some(session),
            })
        }
    }
}

/// POSTs credentials to the session service. The token and the session's
/// own resource location come back as headers; a success response missing
/// either is rejected here rather than letting an undefined token poison
/// every later request.
pub(crate) async fn create_session(
    net: &RedfishHttpClient,
    username: &str,
    password: &str,
) -> Result<Session, RedfishError> {
    let body = SessionRequest {
        user_name: username.to_string(),
        password: password.to_string(),
    };
    let body_enc = serde_json::to_string(&body).map_err(|e| RedfishError::JsonSerialize {
        url: SESSIONS_API.to_string(),
        object_debug: format!("SessionRequest for user {username}"),
        source: e,
    })?;
    let response = net
        .send(Method::POST, SESSIONS_API, &AuthScheme::None, Some(body_enc))
        .await?;
    let status_code = response.status();
    if !status_code.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RedfishError::SessionCreation { status_code, body });
    }
    let token = header_string(&response, "X-Auth-Token")
        .ok_or(RedfishError::SessionIncomplete { missing: "X-Auth-Token" })?;
    let location = header_string(&response, LOCATION.as_str())
        .ok_or(RedfishError::SessionIncomplete { missing: "Location" })?;
    Ok(Session { token, location })
}

/// Best-effort DELETE of the session object. Never raises: a leaked session
/// slot is worth a warning, not a failed operation.
pub(crate) async fn delete_session(net: &RedfishHttpClient, session: Session) {
    let api = api_path(&session.location);
    let auth = AuthScheme::Token(session.token);
    if let Err(err) = net.delete(&api, &auth).await {
        warn!("Failed to delete BMC session at {}: {err}", session.location);
    }
}

fn header_string(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}
