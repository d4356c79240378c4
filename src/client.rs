use crate::config::Config;
use crate::error::{body_error, Error, ProbeResult};
use reqwest::header::LOCATION;
use reqwest::{redirect, Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Thin HTTP client bound to one backend's `/api` prefix
#[derive(Debug, Clone)]
pub struct ApiClient {
    api_base: String,
    client: Client,
    no_redirect: Client,
}

impl ApiClient {
    /// Create clients with the configured per-request timeout
    pub fn new(config: &Config) -> ProbeResult<Self> {
        let build = |policy: redirect::Policy| {
            Client::builder()
                .timeout(config.timeout())
                .redirect(policy)
                .build()
                .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))
        };

        Ok(Self {
            api_base: config.api_base(),
            client: build(redirect::Policy::default())?,
            no_redirect: build(redirect::Policy::none())?,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Absolute URL of an endpoint below `/api`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str) -> ProbeResult<ApiResponse> {
        let url = self.endpoint(path);
        self.send(&url, self.client.get(&url)).await
    }

    /// GET that reports redirects instead of following them
    pub async fn get_without_redirect(&self, path: &str) -> ProbeResult<ApiResponse> {
        let url = self.endpoint(path);
        self.send(&url, self.no_redirect.get(&url)).await
    }

    /// POST a JSON body; reqwest sets `Content-Type: application/json`
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> ProbeResult<ApiResponse> {
        let url = self.endpoint(path);
        self.send(&url, self.client.post(&url).json(body)).await
    }

    async fn send(&self, url: &str, request: RequestBuilder) -> ProbeResult<ApiResponse> {
        debug!("Sending request to {}", url);

        let response = request.send().await.map_err(|source| Error::Transport {
            endpoint: url.to_string(),
            source,
        })?;

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        // Reading the body can still time out or be cut off
        let text = response.text().await.map_err(|source| Error::Transport {
            endpoint: url.to_string(),
            source,
        })?;

        debug!("{} answered {} with {} bytes", url, status, text.len());

        Ok(ApiResponse::new(url, status, location, text))
    }
}

/// Status, headers of interest and the decoded body of one exchange
#[derive(Debug, Clone)]
pub struct ApiResponse {
    endpoint: String,
    status: StatusCode,
    location: Option<String>,
    text: String,
    json: Result<Value, String>,
}

impl ApiResponse {
    pub fn new(endpoint: &str, status: StatusCode, location: Option<String>, text: String) -> Self {
        let json = serde_json::from_str::<Value>(&text).map_err(|e| e.to_string());
        Self {
            endpoint: endpoint.to_string(),
            status,
            location,
            text,
            json,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Body as printed in the report: compact JSON when it parsed, raw text otherwise
    pub fn display_body(&self) -> String {
        match &self.json {
            Ok(value) => value.to_string(),
            Err(_) => self.text.clone(),
        }
    }

    /// Fail unless the status matches
    pub fn expect_status(&self, expected: StatusCode) -> ProbeResult<()> {
        if self.status == expected {
            Ok(())
        } else {
            Err(Error::UnexpectedStatus {
                endpoint: self.endpoint.clone(),
                expected: expected.as_u16(),
                actual: self.status.as_u16(),
            })
        }
    }

    /// Decoded body, which must be a JSON object
    pub fn object(&self) -> ProbeResult<&Map<String, Value>> {
        match &self.json {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(Error::InvalidBody {
                endpoint: self.endpoint.clone(),
                reason: format!("expected an object, got {}", json_kind(other)),
            }),
            Err(reason) => Err(Error::InvalidBody {
                endpoint: self.endpoint.clone(),
                reason: reason.clone(),
            }),
        }
    }

    /// Whether the body is an object containing `key`
    pub fn has_field(&self, key: &str) -> bool {
        self.object().map(|o| o.contains_key(key)).unwrap_or(false)
    }

    /// String field or an error naming the missing key
    pub fn str_field(&self, key: &str) -> ProbeResult<&str> {
        self.object()?
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| body_error(&self.endpoint, &format!("missing string field '{}'", key)))
    }

    /// Boolean field or an error naming the missing key
    pub fn bool_field(&self, key: &str) -> ProbeResult<bool> {
        self.object()?
            .get(key)
            .and_then(Value::as_bool)
            .ok_or_else(|| body_error(&self.endpoint, &format!("missing boolean field '{}'", key)))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
