//! The boundary between the entity services and the REST server
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Url, header::CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, trace};

#[cfg(test)]
pub(crate) mod fake;

/// Content type used for regular JSON request bodies
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type used for partial updates
pub const MERGE_PATCH_CONTENT_TYPE: &str = "application/merge-patch+json";

/// The HTTP verbs used by the REST api
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single request against the REST api
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the server's base url, e.g. `api/contests/3`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub content_type: &'static str,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            content_type: JSON_CONTENT_TYPE,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_content_type(mut self, content_type: &'static str) -> Self {
        self.content_type = content_type;
        self
    }
}

/// The server's answer to an [ApiRequest]
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Extracts a human-readable message from an error body. The server reports
    /// problems as json objects with a `title`, `detail` or `message` field.
    pub fn error_message(&self) -> String {
        let field = |name: &str| {
            self.body
                .as_ref()
                .and_then(|b| b.get(name))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        field("title")
            .or_else(|| field("detail"))
            .or_else(|| field("message"))
            .unwrap_or_else(|| format!("HTTP status {}", self.status))
    }
}

/// Something that can execute requests against the REST api
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// A [Transport] that talks to a real server over HTTP. Timeouts and connection
/// handling are left to the defaults of the underlying client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    client: Client,
}

impl HttpTransport {
    /// Create a transport for the server at `base_url`, e.g. `http://localhost:8080`
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            client: Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Parse a server url so that api paths can be joined onto it
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let mut normalized = base_url.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized).map_err(|_| Error::InvalidUrl(base_url.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(base_url.to_string()));
    }
    Ok(url)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self
            .base_url
            .join(&request.path)
            .map_err(|_| Error::InvalidUrl(request.path.clone()))?;
        debug!(method = %request.method, %url, "sending request");
        let mut builder = self
            .client
            .request(request.method.into(), url)
            .query(&request.query);
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, request.content_type)
                .body(serde_json::to_vec(body)?);
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        trace!(status, len = bytes.len(), "received response");
        let body = if bytes.is_empty() {
            None
        } else if (200..300).contains(&status) {
            Some(serde_json::from_slice(&bytes)?)
        } else {
            // error pages are not always json, keep the status in that case
            serde_json::from_slice(&bytes).ok()
        };
        Ok(ApiResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        contest::Contest,
        navigation::NavigationLog,
        resolver::Resolver,
        service::EntityService,
    };
    use serde_json::json;
    use std::sync::Arc;
    use test_log::test;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    /// Answers a single request with the given status line, content type and body
    async fn serve_once(
        status: &'static str,
        content_type: &'static str,
        body: &'static str,
    ) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("failed to bind");
        let addr = listener.local_addr().expect("no local address");
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("failed to accept");
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.expect("failed to read");
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: {content_type}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("failed to write");
        });
        format!("http://{addr}")
    }

    #[test(tokio::test)]
    async fn test_http_json_body() {
        let url = serve_once("200 OK", JSON_CONTENT_TYPE, r#"{"id": 1, "name": "Foo"}"#).await;
        let transport = HttpTransport::new(&url).expect("valid url");
        let res = transport
            .execute(ApiRequest::new(Method::Get, "api/contests/1"))
            .await
            .expect("request failed");
        assert_eq!(res.status, 200);
        assert_eq!(res.body, Some(json!({"id": 1, "name": "Foo"})));
    }

    #[test(tokio::test)]
    async fn test_http_error_page_keeps_status() {
        let url = serve_once("502 Bad Gateway", "text/html", "<html>bad gateway</html>").await;
        let transport = HttpTransport::new(&url).expect("valid url");
        let res = transport
            .execute(ApiRequest::new(Method::Get, "api/contests"))
            .await
            .expect("request failed");
        assert_eq!(res.status, 502);
        assert_eq!(res.body, None);
        assert_eq!(res.error_message(), "HTTP status 502");
    }

    #[test(tokio::test)]
    async fn test_http_malformed_success_body() {
        let url = serve_once("200 OK", "text/html", "<html>oops</html>").await;
        let transport = HttpTransport::new(&url).expect("valid url");
        let res = transport
            .execute(ApiRequest::new(Method::Get, "api/contests/1"))
            .await;
        assert!(matches!(res, Err(Error::Serialization(_))));
    }

    #[test(tokio::test)]
    async fn test_resolver_reports_malformed_body() {
        let url = serve_once("200 OK", "text/html", "<html>oops</html>").await;
        let transport = Arc::new(HttpTransport::new(&url).expect("valid url"));
        let resolver = Resolver::<Contest, _>::new(EntityService::new(transport));
        let mut nav = NavigationLog::new();
        let res = resolver.resolve(Some(1), &mut nav).await;
        assert!(matches!(res, Err(Error::Serialization(_))));
        assert!(nav.steps().is_empty());
    }

    #[test]
    fn test_parse_base_url() {
        let url = parse_base_url("http://localhost:8080").expect("valid url");
        assert_eq!(url.as_str(), "http://localhost:8080/");
        assert_eq!(
            url.join("api/contests").expect("join").as_str(),
            "http://localhost:8080/api/contests"
        );

        let url = parse_base_url("https://example.org/crazypic/").expect("valid url");
        assert_eq!(
            url.join("api/pictures/4").expect("join").as_str(),
            "https://example.org/crazypic/api/pictures/4"
        );

        assert!(matches!(
            parse_base_url("not a url"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_base_url("ftp://example.org"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_error_message() {
        let res = ApiResponse::new(400, Some(json!({"title": "Invalid id", "status": 400})));
        assert_eq!(res.error_message(), "Invalid id");
        let res = ApiResponse::new(500, Some(json!({"message": "error.http.500"})));
        assert_eq!(res.error_message(), "error.http.500");
        let res = ApiResponse::new(502, None);
        assert_eq!(res.error_message(), "HTTP status 502");
        assert!(!res.is_success());
        assert!(ApiResponse::new(204, None).is_success());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!(reqwest::Method::from(Method::Delete), reqwest::Method::DELETE);
    }
}
