//! Transport port — sends one HTTP request and returns the raw response.
//!
//! Status mapping, header construction and body decoding all happen in the
//! operation layer; a transport only moves bytes and reports transport
//! failures as [`ThingIfError::Network`].

use std::fmt;
use std::future::Future;

use serde::Serialize;
use thingif_domain::error::{ArgumentError, HttpError, ThingIfError};

/// HTTP verbs used by the Thing-IF API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        })
    }
}

/// A fully built outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    #[must_use]
    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Invalid`] if `body` cannot be represented as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ArgumentError> {
        let value = serde_json::to_value(body).map_err(|err| ArgumentError::Invalid {
            field: "body",
            reason: err.to_string(),
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Value of the first header named `name` (case-insensitive).
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The raw outcome of a request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body; `None` when the response had no body.
    pub body: Option<serde_json::Value>,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: Option<serde_json::Value>) -> Self {
        Self { status, body }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Split into the success body or an [`HttpError`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] carrying the status and body for non-2xx responses.
    pub fn into_result(self) -> Result<Option<serde_json::Value>, HttpError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(HttpError::new(self.status, self.body))
        }
    }
}

/// Sends requests to the Thing-IF servers.
pub trait HttpTransport: Send + Sync {
    /// Send `request` and return whatever the server answered, 2xx or not.
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ThingIfError>> + Send;
}

impl<T: HttpTransport> HttpTransport for std::sync::Arc<T> {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ThingIfError>> + Send {
        (**self).send(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_treat_2xx_as_success() {
        assert!(ApiResponse::new(200, None).is_success());
        assert!(ApiResponse::new(204, None).is_success());
        assert!(!ApiResponse::new(301, None).is_success());
        assert!(!ApiResponse::new(404, None).is_success());
    }

    #[test]
    fn should_map_non_2xx_into_http_error_with_body() {
        let body = json!({"errorCode": "WRONG_TOKEN", "message": "token expired"});
        let err = ApiResponse::new(401, Some(body.clone()))
            .into_result()
            .unwrap_err();
        assert_eq!(err.status, 401);
        assert_eq!(err.body, Some(body));
        assert_eq!(err.error_code.as_deref(), Some("WRONG_TOKEN"));
    }

    #[test]
    fn should_find_headers_case_insensitively() {
        let request = ApiRequest::new(Method::Get, "http://x").header("Content-Type", "a/b");
        assert_eq!(request.header_value("content-type"), Some("a/b"));
        assert_eq!(request.header_value("authorization"), None);
    }

    #[test]
    fn should_attach_json_body() {
        let request = ApiRequest::new(Method::Post, "http://x")
            .json(&json!({"a": 1}))
            .unwrap();
        assert_eq!(request.body, Some(json!({"a": 1})));
    }

    #[test]
    fn should_display_method_in_upper_case() {
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }
}
