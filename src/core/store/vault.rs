//! HashiCorp Vault store over the HTTP API.
//!
//! Logs in with AppRole (or adopts a pre-issued token) and reads secrets from
//! both KV v1 and KV v2 style mounts.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::{SecretRecord, SecretStore};
use crate::core::constants;
use crate::error::{ConfigError, Result, VaultError};

/// Connection and credential settings for [`VaultClient`].
#[derive(Clone, Default)]
pub struct VaultSettings {
    /// Store address, e.g. `https://vault.example.com:8200`.
    pub addr: String,
    /// AppRole role id. Empty means "use `token`".
    pub role_id: String,
    /// AppRole secret id.
    pub secret_id: String,
    /// AppRole auth mount, usually `approle`.
    pub approle_mount: String,
    /// Pre-issued token, used when no role id is configured.
    pub token: Option<String>,
    /// Vault Enterprise namespace.
    pub namespace: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    role_id: &'a str,
    secret_id: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    auth: Option<LoginAuth>,
}

#[derive(Deserialize)]
struct LoginAuth {
    client_token: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<String>,
}

/// Vault client session.
///
/// Authentication is lazy and happens at most once; the resulting token is
/// sent with every read.
pub struct VaultClient {
    http: Client,
    base_url: Url,
    namespace: Option<String>,
    role_id: Zeroizing<String>,
    secret_id: Zeroizing<String>,
    approle_mount: String,
    preset_token: Option<Zeroizing<String>>,
    token: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for VaultClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultClient")
            .field("base_url", &self.base_url.as_str())
            .field("namespace", &self.namespace)
            .field("approle_mount", &self.approle_mount)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl VaultClient {
    /// Create a client. No network traffic happens until the first read.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAddress` if `addr` is not an http(s) URL.
    pub fn new(settings: VaultSettings) -> Result<Self> {
        let base_url = parse_addr(&settings.addr)?;
        let http = Client::builder()
            .user_agent(format!(
                "{}/{}",
                constants::BIN_NAME,
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            http,
            base_url,
            namespace: settings.namespace.filter(|ns| !ns.is_empty()),
            role_id: Zeroizing::new(settings.role_id),
            secret_id: Zeroizing::new(settings.secret_id),
            approle_mount: settings.approle_mount.trim_matches('/').to_string(),
            preset_token: settings
                .token
                .filter(|t| !t.is_empty())
                .map(Zeroizing::new),
            token: None,
        })
    }

    /// Build `{addr}/v1/<segments...>`, percent-encoding each segment.
    fn endpoint<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("v1").extend(segments);
        }
        url
    }

    fn with_namespace(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.namespace {
            Some(ns) => request.header("X-Vault-Namespace", ns),
            None => request,
        }
    }
}

impl SecretStore for VaultClient {
    fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn authenticate(&mut self) -> Result<()> {
        if self.role_id.is_empty() {
            if let Some(token) = &self.preset_token {
                debug!("no AppRole role id configured, using pre-issued token");
                self.token = Some(token.clone());
                return Ok(());
            }
        }

        let url = self.endpoint(["auth", self.approle_mount.as_str(), "login"]);
        debug!(mount = %self.approle_mount, "logging in to Vault with AppRole");

        let body = LoginRequest {
            role_id: &self.role_id,
            secret_id: &self.secret_id,
        };
        let response = self
            .with_namespace(self.http.post(url))
            .json(&body)
            .send()
            .map_err(VaultError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(VaultError::Login {
                status: status.as_u16(),
                message: error_message(response),
            }
            .into());
        }

        let login: LoginResponse = response.json().map_err(|e| VaultError::Malformed {
            path: format!("auth/{}/login", self.approle_mount),
            reason: e.to_string(),
        })?;
        let token = login
            .auth
            .and_then(|auth| auth.client_token)
            .filter(|t| !t.is_empty())
            .ok_or(VaultError::MissingToken)?;

        self.token = Some(Zeroizing::new(token));
        debug!("Vault login succeeded");
        Ok(())
    }

    fn read_secret(&mut self, path: &str) -> Result<SecretRecord> {
        if !self.is_authenticated() {
            self.authenticate()?;
        }
        let token = self.token.as_ref().ok_or(VaultError::MissingToken)?;

        let path = path.trim_matches('/');
        let url = self.endpoint(path.split('/'));
        debug!(path, "reading secret");

        let response = self
            .with_namespace(self.http.get(url))
            .header("X-Vault-Token", token.as_str())
            .send()
            .map_err(VaultError::Network)?;

        match response.status() {
            StatusCode::OK => {
                let body: Value = response.json().map_err(|e| VaultError::Malformed {
                    path: path.to_string(),
                    reason: e.to_string(),
                })?;
                let record = extract_record(path, body)?;
                trace!(path, fields = record.len(), "secret read");
                Ok(record)
            }
            StatusCode::NO_CONTENT => Err(VaultError::EmptyPath(path.to_string()).into()),
            StatusCode::NOT_FOUND => Err(VaultError::NotFound {
                path: path.to_string(),
                message: error_message(response),
            }
            .into()),
            status => Err(VaultError::Read {
                path: path.to_string(),
                status: status.as_u16(),
                message: error_message(response),
            }
            .into()),
        }
    }
}

/// Validate the store address.
fn parse_addr(addr: &str) -> Result<Url> {
    let invalid = |reason: String| ConfigError::InvalidAddress {
        addr: addr.to_string(),
        reason,
    };

    let url = Url::parse(addr.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid("expected an http:// or https:// URL".to_string()).into());
    }
    Ok(url)
}

/// Pull the field set out of a read response.
///
/// KV v2 nests fields under `data.data`; KV v1 puts them under `data`.
fn extract_record(path: &str, mut body: Value) -> std::result::Result<SecretRecord, VaultError> {
    let mut data = match body.get_mut("data").map(Value::take) {
        Some(Value::Object(map)) => map,
        Some(Value::Null) | None => SecretRecord::new(),
        Some(_) => {
            return Err(VaultError::Malformed {
                path: path.to_string(),
                reason: "'data' is not an object".to_string(),
            })
        }
    };

    if matches!(data.get("data"), Some(Value::Object(_) | Value::Null)) {
        data = match data.remove("data") {
            Some(Value::Object(map)) => map,
            _ => SecretRecord::new(),
        };
    }

    if data.is_empty() {
        return Err(VaultError::EmptyPath(path.to_string()));
    }
    Ok(data)
}

/// Vault's own error messages, or the status reason when the body has none.
fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ErrorResponse>() {
        Ok(body) if !body.errors.is_empty() => body.errors.join("; "),
        _ => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}
