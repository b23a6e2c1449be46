//! HTTP client for the plant-care backend API.

use domain::models::{
    api_error::{ApiErrorPayload, FieldError},
    photo::FileUpload,
};
use reqwest::{
    Client, Method, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
    multipart::{Form, Part},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use url::form_urlencoded;

use super::session::Session;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, Error)]
pub enum ApiClientError {
    #[error("network error: {0}")]
    Transport(String),
    /// Non-2xx response; `message` is the best readable text the body offered
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        code: Option<String>,
        field_errors: Vec<FieldError>,
    },
    #[error("unexpected response from {path}: {message}")]
    Decode { path: String, message: String },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED.as_u16())
    }
}

/// Body of a successful response, before typed decoding
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// 204 No Content
    Empty,
    Json(Value),
    Text(String),
    /// Nothing usable: zero-length or undecodable body
    Null,
}

impl ResponseBody {
    /// Decode into `T`. Empty and null bodies decode as JSON `null`, so they
    /// satisfy `()`, `Option<_>` and `serde::de::IgnoredAny`.
    pub fn decode<T: DeserializeOwned>(self, path: &str) -> Result<T, ApiClientError> {
        let value = match self {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => Value::String(text),
            ResponseBody::Empty | ResponseBody::Null => Value::Null,
        };
        serde_json::from_value(value).map_err(|e| ApiClientError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

pub enum RequestBody {
    Json(Value),
    Multipart(Form),
}

/// Client for the backend API. Cheap to clone; clones share the connection
/// pool and the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Result<Self, ApiClientError> {
        let http = Client::builder()
            .user_agent(concat!("plantcare/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiClientError::Transport(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Issue a request against `path` (relative to the base URL) and normalize the result.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        extra_headers: HeaderMap,
    ) -> Result<ResponseBody, ApiClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method.clone(), &url).headers(extra_headers);

        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiClientError::InvalidRequest(e.to_string()))?;
            builder = builder.header(AUTHORIZATION, value);
        }

        builder = match body {
            Some(RequestBody::Json(value)) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(value.to_string()),
            // reqwest sets the multipart boundary header itself
            Some(RequestBody::Multipart(form)) => builder.multipart(form),
            None => builder,
        };

        let res = builder.send().await.map_err(map_reqwest_error)?;
        let status = res.status();
        debug!(method = %method, path, status = status.as_u16(), "API request");

        if status == StatusCode::NO_CONTENT {
            return Ok(ResponseBody::Empty);
        }

        let is_json = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(is_json_content_type)
            .unwrap_or(false);
        let bytes = res.bytes().await.map_err(map_reqwest_error)?;
        // Error bodies are read as JSON whatever their declared type
        let body = parse_body(is_json || !status.is_success(), &bytes);

        if !status.is_success() {
            let error = http_error(status, &body);
            warn!(method = %method, path, status = status.as_u16(), error = %error, "API request failed");
            return Err(error);
        }

        Ok(body)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiClientError> {
        self.request(Method::GET, path, None, HeaderMap::new())
            .await?
            .decode(path)
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiClientError> {
        let body = json_body(body)?;
        self.request(Method::POST, path, Some(body), HeaderMap::new())
            .await?
            .decode(path)
    }

    /// POST without a body; no content type is sent
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiClientError> {
        self.request(Method::POST, path, None, HeaderMap::new())
            .await?
            .decode(path)
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiClientError> {
        self.request(
            Method::POST,
            path,
            Some(RequestBody::Multipart(form)),
            HeaderMap::new(),
        )
        .await?
        .decode(path)
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiClientError> {
        let body = json_body(body)?;
        self.request(Method::PUT, path, Some(body), HeaderMap::new())
            .await?
            .decode(path)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiClientError> {
        self.request(Method::DELETE, path, None, HeaderMap::new())
            .await?
            .decode(path)
    }
}

/// Append URL-encoded `pairs` to `path`; returns `path` untouched when there are none.
pub fn with_query<K: AsRef<str>, V: AsRef<str>>(path: &str, pairs: &[(K, V)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    format!("{}?{}", path, serializer.finish())
}

/// Multipart form carrying one file under `field`
pub fn file_form(field: &'static str, file: FileUpload) -> Result<Form, ApiClientError> {
    let part = Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.mime_type)
        .map_err(|e| ApiClientError::InvalidRequest(e.to_string()))?;
    Ok(Form::new().part(field, part))
}

fn json_body(body: &impl Serialize) -> Result<RequestBody, ApiClientError> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|e| ApiClientError::InvalidRequest(e.to_string()))
}

fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// JSON when declared and valid, else UTF-8 text, else null
fn parse_body(is_json: bool, bytes: &[u8]) -> ResponseBody {
    if bytes.is_empty() {
        return ResponseBody::Null;
    }
    if is_json {
        if let Ok(value) = serde_json::from_slice::<Value>(bytes) {
            return ResponseBody::Json(value);
        }
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => ResponseBody::Text(text.to_string()),
        Err(_) => ResponseBody::Null,
    }
}

fn http_error(status: StatusCode, body: &ResponseBody) -> ApiClientError {
    let payload = match body {
        ResponseBody::Json(value) => ApiErrorPayload::from_value(value),
        _ => ApiErrorPayload::default(),
    };
    ApiClientError::Http {
        status: status.as_u16(),
        message: payload.message_or_fallback(),
        code: payload.code().map(str::to_string),
        field_errors: payload.field_errors().to_vec(),
    }
}

fn map_reqwest_error(e: reqwest::Error) -> ApiClientError {
    ApiClientError::Transport(e.to_string())
}
