//! HTTP(S) prober implementation.
//!
//! Issues one bare GET per work item and turns the response into a
//! `ProbeResult`. Certificates are never validated and redirects are never
//! followed, so self-signed services and raw 3xx responses both show up in
//! the inventory.

use crate::error::ProbeError;
use crate::scanner::title::{extract_title, redirect_label};
use crate::scanner::traits::{ProbeConfig, ProbeResult, Prober, StatusClass};
use crate::types::WorkItem;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client;
use std::collections::BTreeMap;

/// Value sent in the client-address headers.
const SPOOFED_CLIENT_IP: &str = "127.0.0.1";

/// Prober backed by a `reqwest` client.
///
/// The client keeps no idle connections, so every probe opens and owns
/// its own connection.
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    /// Create a prober for the given run-wide settings.
    pub fn new(config: ProbeConfig) -> Result<Self, reqwest::Error> {
        let client = build_client(&config)?;
        Ok(Self { client })
    }
}

fn build_client(config: &ProbeConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert("x-forwarded-for", HeaderValue::from_static(SPOOFED_CLIENT_IP));
    headers.insert("x-real-ip", HeaderValue::from_static(SPOOFED_CLIENT_IP));

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .danger_accept_invalid_certs(true)
        .redirect(Policy::none())
        .timeout(config.timeout)
        .pool_max_idle_per_host(0)
        .build()
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, item: &WorkItem) -> Result<ProbeResult, ProbeError> {
        let base_url = item.base_url();

        let response = self.client.get(&base_url).send().await?;
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response.bytes().await?;

        build_result(base_url, status, headers, &body)
    }
}

/// Flatten a header map, keeping the last value of a repeated name.
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected = BTreeMap::new();
    for (name, value) in headers {
        collected.insert(
            name.as_str().to_string(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }
    collected
}

/// Assemble a result from the parts of a received response.
///
/// A redirect without a `Location` header is treated as a malformed
/// response and yields no result.
pub fn build_result(
    base_url: String,
    status: u16,
    headers: BTreeMap<String, String>,
    body: &[u8],
) -> Result<ProbeResult, ProbeError> {
    let mut result = ProbeResult {
        base_url,
        status,
        title: None,
        length: body.len(),
        server: None,
        headers,
        body: String::from_utf8_lossy(body).into_owned(),
    };

    result.server = result.header("server").map(str::to_string);
    result.title = match StatusClass::of(status) {
        StatusClass::Redirect => {
            let location = result
                .header("location")
                .ok_or(ProbeError::MissingLocation(status))?;
            Some(redirect_label(location))
        }
        _ => extract_title(&result.body),
    };

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Port, Scheme};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use tokio_rustls::rustls::crypto::ring;
    use tokio_rustls::rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
    use tokio_rustls::rustls::ServerConfig;
    use tokio_rustls::TlsAcceptor;

    /// Read one request head, answer it and close the stream.
    async fn answer<S>(stream: &mut S, response: &str) -> String
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        String::from_utf8_lossy(&request).into_owned()
    }

    /// Serve one canned response and hand back the request that was received.
    async fn serve_once(response: String) -> (Port, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            answer(&mut stream, &response).await
        });

        (port, handle)
    }

    /// Like `serve_once`, behind TLS with a freshly generated self-signed
    /// certificate.
    async fn serve_tls_once(response: String) -> (Port, JoinHandle<String>) {
        let rcgen::CertifiedKey { cert, key_pair } =
            rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
        let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()));
        let config = ServerConfig::builder_with_provider(Arc::new(ring::default_provider()))
            .with_safe_default_protocol_versions()
            .unwrap()
            .with_no_client_auth()
            .with_single_cert(vec![cert.der().clone()], key)
            .unwrap();
        let acceptor = TlsAcceptor::from(Arc::new(config));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();

        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut stream = acceptor.accept(stream).await.unwrap();
            answer(&mut stream, &response).await
        });

        (port, handle)
    }

    fn http_response(status_line: &str, extra_headers: &[&str], body: &str) -> String {
        let mut response = format!("HTTP/1.1 {}\r\n", status_line);
        for header in extra_headers {
            response.push_str(header);
            response.push_str("\r\n");
        }
        response.push_str(&format!(
            "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ));
        response
    }

    fn prober(timeout: Duration) -> HttpProber {
        HttpProber::new(ProbeConfig::new(timeout)).unwrap()
    }

    fn local(port: Port) -> WorkItem {
        WorkItem::new(Scheme::Http, "127.0.0.1", port)
    }

    #[tokio::test]
    async fn test_fetch_ok_with_title() {
        let body = "<html><head><title>Example</title></head><body><h1>Hi</h1></body></html>";
        let (port, server) =
            serve_once(http_response("200 OK", &["Server: nginx/1.18.0"], body)).await;

        let result = prober(Duration::from_secs(5)).probe(&local(port)).await.unwrap();

        assert_eq!(result.base_url, format!("http://127.0.0.1:{}/", port));
        assert_eq!(result.status, 200);
        assert_eq!(result.title.as_deref(), Some("Example"));
        assert_eq!(result.length, body.len());
        assert_eq!(result.server.as_deref(), Some("nginx/1.18.0"));
        assert_eq!(result.header("content-length"), Some(body.len().to_string().as_str()));

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get / http/1.1"));
        assert!(request.contains("x-forwarded-for: 127.0.0.1"));
        assert!(request.contains("x-real-ip: 127.0.0.1"));
        assert!(request.contains("user-agent: mozilla/5.0 (x11; ubuntu"));
    }

    #[tokio::test]
    async fn test_fetch_https_accepts_self_signed_certificate() {
        let body = "<html><title>Router Login</title></html>";
        let (port, server) =
            serve_tls_once(http_response("200 OK", &["Server: lighttpd"], body)).await;

        let item = WorkItem::new(Scheme::Https, "127.0.0.1", port);
        let result = prober(Duration::from_secs(5)).probe(&item).await.unwrap();

        assert_eq!(result.base_url, format!("https://127.0.0.1:{}/", port));
        assert_eq!(result.status, 200);
        assert_eq!(result.title.as_deref(), Some("Router Login"));
        assert_eq!(result.server.as_deref(), Some("lighttpd"));
        assert!(server.await.unwrap().starts_with("GET / HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_fetch_redirect_not_followed() {
        let body = "<title>Moved</title>";
        let (port, _server) = serve_once(http_response(
            "301 Moved Permanently",
            &["Location: https://example.com/login"],
            body,
        ))
        .await;

        let result = prober(Duration::from_secs(5)).probe(&local(port)).await.unwrap();

        assert_eq!(result.status, 301);
        assert_eq!(
            result.title.as_deref(),
            Some("Redir -> https://example.com/login")
        );
    }

    #[tokio::test]
    async fn test_fetch_soft_status_keeps_title() {
        let (port, _server) = serve_once(http_response(
            "404 Not Found",
            &[],
            "<body><h1>Not Found</h1></body>",
        ))
        .await;

        let result = prober(Duration::from_secs(5)).probe(&local(port)).await.unwrap();

        assert_eq!(result.status, 404);
        assert_eq!(result.title.as_deref(), Some("Not Found"));
        assert_eq!(result.server, None);
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();
        let _server = tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let result = prober(Duration::from_millis(200)).probe(&local(port)).await;
        assert!(matches!(result, Err(ProbeError::Timeout)));
    }

    #[tokio::test]
    async fn test_fetch_closed_port_is_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();
        drop(listener);

        let result = prober(Duration::from_secs(2)).probe(&local(port)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_malformed_response_is_error() {
        let (port, _server) = serve_once("this is not http\r\n\r\n".to_string()).await;

        let result = prober(Duration::from_secs(2)).probe(&local(port)).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_build_result_redirect_overrides_title() {
        let mut headers = BTreeMap::new();
        headers.insert("location".to_string(), "/admin/".to_string());
        let result = build_result(
            "http://a:80/".to_string(),
            302,
            headers,
            b"<title>Found</title>",
        )
        .unwrap();
        assert_eq!(result.title.as_deref(), Some("Redir -> /admin/"));
    }

    #[test]
    fn test_build_result_redirect_without_location() {
        let result = build_result("http://a:80/".to_string(), 301, BTreeMap::new(), b"");
        assert!(matches!(result, Err(ProbeError::MissingLocation(301))));
    }

    #[tokio::test]
    async fn test_fetch_redirect_without_location_is_error() {
        let (port, _server) =
            serve_once(http_response("302 Found", &[], "<title>Found</title>")).await;

        let result = prober(Duration::from_secs(5)).probe(&local(port)).await;
        assert!(matches!(result, Err(ProbeError::MissingLocation(302))));
    }

    #[test]
    fn test_build_result_length_counts_bytes() {
        let result = build_result(
            "http://a:80/".to_string(),
            200,
            BTreeMap::new(),
            &[0xff, 0xfe],
        )
        .unwrap();
        assert_eq!(result.length, 2);

        let result = build_result(
            "http://a:80/".to_string(),
            200,
            BTreeMap::new(),
            "héllo".as_bytes(),
        )
        .unwrap();
        assert_eq!(result.length, 6);
        assert_eq!(result.title, None);
    }

    #[test]
    fn test_collect_headers_last_value_wins() {
        let mut map = HeaderMap::new();
        map.append("set-cookie", HeaderValue::from_static("a=1"));
        map.append("set-cookie", HeaderValue::from_static("b=2"));
        map.insert("server", HeaderValue::from_static("Apache"));

        let headers = collect_headers(&map);
        assert_eq!(headers.get("set-cookie").map(String::as_str), Some("b=2"));
        assert_eq!(headers.get("server").map(String::as_str), Some("Apache"));
    }
}
