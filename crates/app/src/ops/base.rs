//! Shared plumbing of every operation: URLs, common headers and response mapping.

use percent_encoding::{AsciiSet, CONTROLS, PercentEncode, utf8_percent_encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thingif_domain::error::{ArgumentError, DecodeError, HttpError, ThingIfError};
use thingif_domain::kii_app::KiiApp;

use crate::ports::{ApiRequest, HttpTransport, Method};

/// Content type of plain JSON bodies.
pub const JSON: &str = "application/json";

/// Value of the `X-Kii-SDK` header.
pub const SDK_HEADER: &str = concat!("sn=rsti;sv=", env!("CARGO_PKG_VERSION"));

/// Bytes escaped inside one path segment. `:` is kept so typed ids stay
/// readable (`thing:th.1`).
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// `value` escaped for use as a single URL path segment.
pub(crate) fn segment(value: &str) -> PercentEncode<'_> {
    utf8_percent_encode(value, PATH_SEGMENT)
}

/// Credentials and transport shared by the per-resource operation structs.
pub struct BaseOp<'a, T> {
    transport: &'a T,
    app: &'a KiiApp,
    token: &'a str,
}

impl<'a, T: HttpTransport> BaseOp<'a, T> {
    #[must_use]
    pub fn new(transport: &'a T, app: &'a KiiApp, token: &'a str) -> Self {
        Self {
            transport,
            app,
            token,
        }
    }

    /// `<site>/thing-if/apps/<appID>` followed by `path`.
    pub(crate) fn thing_if_url(&self, path: &str) -> String {
        format!("{}{path}", self.app.thing_if_base_url())
    }

    /// `<site>/api/apps/<appID>` followed by `path`.
    pub(crate) fn kii_cloud_url(&self, path: &str) -> String {
        format!("{}{path}", self.app.kii_cloud_base_url())
    }

    /// A body-less request carrying the common headers.
    pub(crate) fn request(&self, method: Method, url: String) -> ApiRequest {
        ApiRequest::new(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("X-Kii-AppID", self.app.app_id())
            .header("X-Kii-AppKey", self.app.app_key())
            .header("X-Kii-SDK", SDK_HEADER)
    }

    /// A request with `body` serialized as JSON under `content_type`.
    pub(crate) fn json_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: String,
        content_type: &str,
        body: &B,
    ) -> Result<ApiRequest, ArgumentError> {
        self.request(method, url)
            .header("Content-Type", content_type)
            .json(body)
    }

    /// Send `request` and return the body of a 2xx response.
    pub(crate) async fn execute(
        &self,
        request: ApiRequest,
    ) -> Result<Option<serde_json::Value>, ThingIfError> {
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "sending request");
        let response = self.transport.send(request).await?;
        if response.is_success() {
            tracing::debug!(%method, %url, status = response.status, "request succeeded");
            Ok(response.body)
        } else {
            let err = HttpError::new(response.status, response.body);
            tracing::warn!(
                %method,
                %url,
                status = err.status,
                error_code = err.error_code.as_deref().unwrap_or_default(),
                "request failed"
            );
            Err(err.into())
        }
    }

    /// Send `request` and decode the 2xx body into `R`.
    pub(crate) async fn execute_json<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<R, ThingIfError> {
        let body = self.execute(request).await?.ok_or(DecodeError::EmptyBody)?;
        Ok(serde_json::from_value(body).map_err(DecodeError::Json)?)
    }
}

/// Reject empty identifiers before anything is sent.
pub(crate) fn require(value: &str, field: &'static str) -> Result<(), ArgumentError> {
    if value.is_empty() {
        return Err(ArgumentError::Missing(field));
    }
    Ok(())
}

/// Whether `err` is a 404 carrying `code`.
pub(crate) fn is_not_found_with(err: &ThingIfError, code: &str) -> bool {
    matches!(err, ThingIfError::Http(http) if http.status == 404 && http.has_error_code(code))
}
