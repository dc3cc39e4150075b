use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::models::{student_id_from_ident, Identity, LoginRequest, LoginResponse, UpstreamErrorBody};
use crate::params::RequestParams;
use crate::resource::ResourceCategory;

pub const DEFAULT_BASE_URL: &str = "https://web.spaggiari.eu/rest/v1";
pub const DEFAULT_USER_AGENT: &str = "CVVS/std/4.2.3 Android/12";
pub const DEFAULT_API_KEY: &str = "Tg1NWEwNGIgIC0K";

const API_KEY_HEADER: &str = "z-dev-apikey";
const AUTH_TOKEN_HEADER: &str = "z-auth-token";

/// Max characters of an upstream body kept in diagnostics.
pub const DIAGNOSTIC_BODY_LIMIT: usize = 512;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Re-issue failed requests once to capture upstream status and body.
    pub diagnostics: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(20),
            connect_timeout: Duration::from_secs(10),
            diagnostics: true,
        }
    }
}

impl ClientConfig {
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Unauthenticated entry point. One instance is shared by every login; the
/// inner reqwest client keeps a connection pool.
#[derive(Clone)]
pub struct ClasseVivaClient {
    http: Client,
    config: Arc<ClientConfig>,
}

impl ClasseVivaClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(&config.api_key)
                .map_err(|e| ClientError::Config(format!("api key: {}", e)))?,
        );

        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Exchange credentials for an upstream token.
    pub async fn login(&self, username: &str, password: &str) -> Result<StudentSession, ClientError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ClientError::MissingCredentials);
        }

        let url = self.config.url("auth/login");
        debug!("Logging in {} against {}", username, url);

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                ident: None,
                pass: password,
                uid: username,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<UpstreamErrorBody>(&body)
                .ok()
                .and_then(|b| b.message.or(b.error))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Login failed").to_string());

            warn!("Upstream login for {} failed with {}: {}", username, status, message);

            if status.is_client_error() {
                return Err(ClientError::Rejected {
                    status: status.as_u16(),
                    message,
                });
            }
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        let student_id = student_id_from_ident(&login.ident)
            .ok_or_else(|| ClientError::InvalidIdentity(login.ident.clone()))?;

        info!("Upstream login succeeded for {} (ident {})", username, login.ident);

        Ok(StudentSession {
            http: self.http.clone(),
            config: self.config.clone(),
            username: username.to_string(),
            identity: Identity {
                ident: login.ident,
                student_id,
                token: login.token,
                first_name: login.first_name,
                last_name: login.last_name,
                expire: login.expire,
            },
        })
    }
}

/// An authenticated upstream identity able to fetch resources.
#[derive(Clone)]
pub struct StudentSession {
    http: Client,
    config: Arc<ClientConfig>,
    username: String,
    identity: Identity,
}

impl StudentSession {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    fn authed(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTH_TOKEN_HEADER, self.identity.token.as_str())
    }

    /// Fetch one resource category and return the parsed JSON payload.
    pub async fn fetch(
        &self,
        category: ResourceCategory,
        params: &RequestParams,
    ) -> Result<Value, ClientError> {
        let path = category.path(&self.identity.student_id, params)?;
        let url = self.config.url(&path);
        let method = category.method();

        debug!("Fetching {} via {} {}", category, method, url);

        let failure = match self
            .authed(method.clone(), &url)
            .send()
            .await
            .and_then(Response::error_for_status)
        {
            Ok(response) => match response.json::<Value>().await {
                Ok(payload) => return Ok(payload),
                Err(e) => ClientError::Decode(e.to_string()),
            },
            Err(e) => match e.status() {
                Some(status) => ClientError::Status {
                    status: status.as_u16(),
                    body: String::new(),
                },
                None => ClientError::Transport(e),
            },
        };

        if self.config.diagnostics {
            Err(self.diagnose(method, &url, failure).await)
        } else {
            Err(failure)
        }
    }

    /// Repeat a failed request with the same headers to learn what the
    /// upstream actually returned. Only ever refines the error.
    async fn diagnose(&self, method: Method, url: &str, failure: ClientError) -> ClientError {
        if failure.is_timeout() {
            return failure;
        }

        match self.authed(method, url).send().await {
            Ok(response) => {
                let status = response.status();
                let body = truncate_body(&response.text().await.unwrap_or_default());
                warn!(
                    upstream_status = status.as_u16(),
                    upstream_body = %body,
                    "Upstream diagnostic for {}",
                    url
                );
                if status.is_success() {
                    failure
                } else {
                    ClientError::Status {
                        status: status.as_u16(),
                        body,
                    }
                }
            }
            Err(e) => {
                debug!("Diagnostic request to {} failed: {}", url, e);
                failure
            }
        }
    }
}

fn truncate_body(body: &str) -> String {
    body.chars().take(DIAGNOSTIC_BODY_LIMIT).collect()
}
