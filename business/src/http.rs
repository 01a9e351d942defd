//! Platform-abstracted HTTP client with Send-safe futures.
//!
//! `reqwest::Response` is not `Send` on wasm (it wraps JS values), but commands
//! must hand back `Send` futures. So:
//! - native: reqwest is awaited directly;
//! - wasm: the request runs on the JS thread via `wasm_bindgen_futures::spawn_local`
//!   and the plain-data [`Response`] comes back over a `flume` channel.

use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
        }
    }
}

/// Response reduced to Send-safe data.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Error bodies the backend produces: `{"detail": ...}` from the framework,
/// `{"message": ...}` from proxies in front of it.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
    message: Option<String>,
}

impl Response {
    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.clone())
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Human readable reason for a failed response.
    ///
    /// Order: `detail`, `message`, non-empty text body, then the status code.
    pub fn error_message(&self) -> String {
        if let Ok(body) = self.json::<ErrorBody>() {
            match body.detail {
                Some(serde_json::Value::String(detail)) => return detail,
                Some(serde_json::Value::Null) | None => {}
                Some(other) => return other.to_string(),
            }
            if let Some(message) = body.message {
                return message;
            }
        }

        match self.text() {
            Ok(text) if !text.trim().is_empty() => text.trim().to_owned(),
            _ => format!("API returned status: {}", self.status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("HTTP error: {message}")]
pub struct HttpError {
    pub message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Serializes `value` as the body and sets `content-type`.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(value)?);
        self.headers
            .insert("content-type".to_owned(), "application/json".to_owned());
        Ok(self)
    }

    pub async fn send(self) -> HttpResult<Response> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            execute(self).await
        }

        #[cfg(target_arch = "wasm32")]
        {
            let (tx, rx) = flume::bounded::<HttpResult<Response>>(1);

            wasm_bindgen_futures::spawn_local(async move {
                let result = execute(self).await;
                // Receiver gone means the command was dropped; nothing to report to.
                let _ = tx.send_async(result).await;
            });

            rx.recv_async()
                .await
                .map_err(|_| HttpError::new("Request cancelled"))?
        }
    }
}

async fn execute(request: RequestBuilder) -> HttpResult<Response> {
    let RequestBuilder {
        method,
        url,
        headers,
        body,
    } = request;

    let client = reqwest::Client::new();
    let mut builder = match method {
        Method::Get => client.get(&url),
        Method::Post => client.post(&url),
        Method::Put => client.put(&url),
        Method::Patch => client.patch(&url),
    };

    for (name, value) in &headers {
        builder = builder.header(name, value);
    }

    if let Some(body) = body {
        builder = builder.body(body);
    }

    let response = builder
        .send()
        .await
        .map_err(|e| HttpError::new(e.to_string()))?;

    let status = response.status().as_u16();

    let body = response
        .bytes()
        .await
        .map_err(|e| HttpError::new(e.to_string()))?
        .to_vec();

    Ok(Response { status, body })
}

/// Entry point for building requests.
///
/// ```ignore
/// let response = Client::post(url).json(&body)?.send().await?;
/// ```
pub struct Client;

impl Client {
    pub fn get(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Post, url)
    }

    pub fn put(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Put, url)
    }

    pub fn patch(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Patch, url)
    }
}
