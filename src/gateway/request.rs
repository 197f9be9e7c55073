//! Outgoing request description. `OutgoingRequest::build` is the single place
//! where headers and query parameters are derived, so the auth and
//! content-type rules can be checked without a network round trip.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

/// One uploaded file inside a multipart form.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FilePart {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FilePart")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Text fields plus file parts, sent as `multipart/form-data`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Converts into a `reqwest` form; the transport picks the boundary.
    ///
    /// # Errors
    /// Returns an error if a file part carries an invalid MIME type.
    pub fn into_reqwest(self) -> Result<reqwest::multipart::Form, reqwest::Error> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        for file in self.files {
            let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
            if let Some(mime) = file.mime {
                part = part.mime_str(&mime)?;
            }
            form = form.part(file.field, part);
        }
        Ok(form)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Json(Value),
    Multipart(MultipartForm),
}

impl Payload {
    /// The empty structured payload: no query pairs for `get`, `{}` otherwise.
    #[must_use]
    pub fn empty() -> Self {
        Self::Json(Value::Object(Map::new()))
    }

    /// Serializes any value into a JSON payload.
    ///
    /// # Errors
    /// Returns an error if the value cannot be represented as JSON.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Self::Json)
    }

    #[must_use]
    pub const fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::empty()
    }
}

/// Body actually sent on the wire.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    None,
    Json(Value),
    Multipart(MultipartForm),
}

#[derive(Clone, PartialEq)]
pub struct OutgoingRequest {
    pub endpoint: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Body,
}

impl OutgoingRequest {
    /// Derives headers, query and body from the call description.
    ///
    /// - A token, when present, always yields `Authorization: Bearer <token>`.
    /// - Multipart payloads never get a manual content type; everything else is JSON.
    /// - `get` turns the payload into query pairs; other methods send it as the body.
    #[must_use]
    pub fn build(
        endpoint: &str,
        method: Method,
        payload: Payload,
        token: Option<&SecretString>,
    ) -> Self {
        let mut headers = Vec::new();
        if let Some(token) = token {
            headers.push((
                AUTHORIZATION.to_string(),
                format!("Bearer {}", token.expose_secret()),
            ));
        }
        if !payload.is_multipart() {
            headers.push((CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string()));
        }

        let (query, body) = match (method, payload) {
            (Method::Get, Payload::Json(value)) => (query_pairs(&value), Body::None),
            (Method::Get, Payload::Multipart(form)) => (form.fields, Body::None),
            (_, Payload::Json(value)) => (Vec::new(), Body::Json(value)),
            (_, Payload::Multipart(form)) => (Vec::new(), Body::Multipart(form)),
        };

        Self {
            endpoint: endpoint.to_string(),
            method,
            headers,
            query,
            body,
        }
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for OutgoingRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case(AUTHORIZATION) {
                    (name.as_str(), "[REDACTED]")
                } else {
                    (name.as_str(), value.as_str())
                }
            })
            .collect();
        formatter
            .debug_struct("OutgoingRequest")
            .field("endpoint", &self.endpoint)
            .field("method", &self.method)
            .field("headers", &headers)
            .field("query", &self.query)
            .field("body", &self.body)
            .finish()
    }
}

/// Flattens a JSON object into query pairs. Nulls are skipped, scalars are
/// rendered as text and nested values are sent as compact JSON.
fn query_pairs(value: &Value) -> Vec<(String, String)> {
    let Value::Object(map) = value else {
        return Vec::new();
    };

    map.iter()
        .filter_map(|(key, value)| {
            let rendered = match value {
                Value::Null => return None,
                Value::String(text) => text.clone(),
                Value::Bool(flag) => flag.to_string(),
                Value::Number(number) => number.to_string(),
                nested => nested.to_string(),
            };
            Some((key.clone(), rendered))
        })
        .collect()
}
