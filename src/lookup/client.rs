// HTTP clients for the primary lookup service and the FCC registry
//
// Primary:  GET {primary_base_url}/{CALL}.json -> 200 with a JSON array of records
// Registry: GET {registry_url}?searchValue={CALL}&format=json

use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::{PrimaryResponse, PrimaryService, RegistryService};
use crate::config::AppConfig;
use crate::error::{Error, Result};

fn http_client(config: &AppConfig) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout())
        .build()
        .map_err(|e| Error::Transport(format!("failed to create HTTP client: {}", e)))
}

fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Transport(format!("request timed out: {}", e))
    } else {
        Error::Transport(e.to_string())
    }
}

/// Client for the callsigns lookup service
pub struct CallsignsClient {
    http: Client,
    base_url: String,
}

impl CallsignsClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            http: http_client(config)?,
            base_url: config.primary_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn record_url(&self, call_sign: &str) -> String {
        format!("{}/{}.json", self.base_url, call_sign)
    }
}

impl PrimaryService for CallsignsClient {
    async fn fetch(&self, call_sign: &str) -> Result<PrimaryResponse> {
        let url = self.record_url(call_sign);
        log::debug!("Fetching {}", url);

        let response = self.http.get(&url).send().await.map_err(transport_error)?;

        // Anything but 200 is a miss, including other 2xx codes
        if response.status() != StatusCode::OK {
            return Err(Error::NotFound {
                call_sign: call_sign.to_string(),
                detail: format!("HTTP {}", response.status()),
            });
        }

        let expires = response
            .headers()
            .get(reqwest::header::EXPIRES)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body: Value = response.json().await.map_err(|e| Error::NotFound {
            call_sign: call_sign.to_string(),
            detail: format!("unreadable response body: {}", e),
        })?;

        match body {
            Value::Array(records) => Ok(PrimaryResponse { records, expires }),
            _ => Err(Error::NotFound {
                call_sign: call_sign.to_string(),
                detail: "response body is not a record list".to_string(),
            }),
        }
    }
}

/// Client for the FCC License View basic search
pub struct LicenseViewClient {
    http: Client,
    url: String,
}

impl LicenseViewClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            http: http_client(config)?,
            url: config.registry_url.clone(),
        })
    }
}

impl RegistryService for LicenseViewClient {
    async fn search(&self, call_sign: &str) -> Result<Value> {
        log::debug!("Searching FCC registry for {}", call_sign);

        let response = self
            .http
            .get(&self.url)
            .query(&[("searchValue", call_sign), ("format", "json")])
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Error::FallbackNotFound {
                call_sign: call_sign.to_string(),
                detail: format!("HTTP {}", response.status()),
            });
        }

        response.json().await.map_err(|e| Error::FallbackNotFound {
            call_sign: call_sign.to_string(),
            detail: format!("unreadable response body: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer one HTTP request with a canned response.
    ///
    /// Returns the server's base URL and a handle yielding the request head.
    async fn serve_once(status: &str, headers: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\n{}Content-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            headers,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    fn local_config(base: &str) -> AppConfig {
        AppConfig {
            primary_base_url: format!("{}/callsigns", base),
            registry_url: format!("{}/getLicenses", base),
            request_timeout_secs: 5,
            ..AppConfig::default()
        }
    }

    fn primary_detail(err: Error) -> String {
        match err {
            Error::NotFound { call_sign, detail } => {
                assert_eq!(call_sign, "W1AW");
                detail
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_record_url() {
        let mut config = AppConfig::default();
        let client = CallsignsClient::new(&config).unwrap();
        assert_eq!(
            client.record_url("KK7LHM"),
            "https://callsigns.spyoung.com/callsigns/KK7LHM.json"
        );

        config.primary_base_url = "http://localhost:8080/callsigns/".to_string();
        let client = CallsignsClient::new(&config).unwrap();
        assert_eq!(client.record_url("W1AW"), "http://localhost:8080/callsigns/W1AW.json");
    }

    #[tokio::test]
    async fn test_unreachable_primary_is_transport_error() {
        let mut config = AppConfig::default();
        // Port 9 (discard) on localhost is almost never listening
        config.primary_base_url = "http://127.0.0.1:9/callsigns".to_string();
        config.request_timeout_secs = 2;
        let client = CallsignsClient::new(&config).unwrap();

        let err = client.fetch("W1AW").await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(err.is_lookup_miss());
    }

    #[tokio::test]
    async fn test_primary_records_and_expires_header() {
        let (base, request) = serve_once(
            "200 OK",
            "Content-Type: application/json\r\nExpires: Wed, 21 Oct 2026 07:28:00 GMT\r\n",
            r#"[{"call_sign": "W1AW", "status": "A"}]"#,
        )
        .await;
        let client = CallsignsClient::new(&local_config(&base)).unwrap();

        let response = client.fetch("W1AW").await.unwrap();
        assert_eq!(response.records.len(), 1);
        assert_eq!(response.records[0]["call_sign"], "W1AW");
        assert_eq!(response.expires.as_deref(), Some("Wed, 21 Oct 2026 07:28:00 GMT"));

        let head = request.await.unwrap();
        assert!(head.starts_with("GET /callsigns/W1AW.json HTTP/1.1"), "{}", head);
    }

    #[tokio::test]
    async fn test_primary_without_expires_header() {
        let (base, _request) = serve_once("200 OK", "", "[]").await;
        let client = CallsignsClient::new(&local_config(&base)).unwrap();

        let response = client.fetch("W1AW").await.unwrap();
        assert!(response.records.is_empty());
        assert_eq!(response.expires, None);
    }

    #[tokio::test]
    async fn test_primary_404_is_not_found() {
        let (base, _request) = serve_once("404 Not Found", "", "no such call").await;
        let client = CallsignsClient::new(&local_config(&base)).unwrap();

        let detail = primary_detail(client.fetch("W1AW").await.unwrap_err());
        assert!(detail.contains("404"), "{}", detail);
    }

    #[tokio::test]
    async fn test_primary_204_is_not_found() {
        let (base, _request) = serve_once("204 No Content", "", "").await;
        let client = CallsignsClient::new(&local_config(&base)).unwrap();

        let detail = primary_detail(client.fetch("W1AW").await.unwrap_err());
        assert!(detail.contains("204"), "{}", detail);
    }

    #[tokio::test]
    async fn test_primary_object_body_is_not_found() {
        let (base, _request) = serve_once("200 OK", "", r#"{"call_sign": "W1AW"}"#).await;
        let client = CallsignsClient::new(&local_config(&base)).unwrap();

        let detail = primary_detail(client.fetch("W1AW").await.unwrap_err());
        assert_eq!(detail, "response body is not a record list");
    }

    #[tokio::test]
    async fn test_primary_unreadable_body_is_not_found() {
        let (base, _request) = serve_once("200 OK", "", "<html>moved</html>").await;
        let client = CallsignsClient::new(&local_config(&base)).unwrap();

        let detail = primary_detail(client.fetch("W1AW").await.unwrap_err());
        assert!(detail.starts_with("unreadable response body"), "{}", detail);
    }

    #[tokio::test]
    async fn test_registry_search_query_and_body() {
        let (base, request) = serve_once(
            "200 OK",
            "Content-Type: application/json\r\n",
            r#"{"status": "OK", "Licenses": {"License": [{"callsign": "W1AW"}]}}"#,
        )
        .await;
        let client = LicenseViewClient::new(&local_config(&base)).unwrap();

        let body = client.search("W1AW").await.unwrap();
        assert_eq!(body["Licenses"]["License"][0]["callsign"], "W1AW");

        let head = request.await.unwrap();
        assert!(
            head.starts_with("GET /getLicenses?searchValue=W1AW&format=json HTTP/1.1"),
            "{}",
            head
        );
    }

    #[tokio::test]
    async fn test_registry_500_is_fallback_not_found() {
        let (base, _request) = serve_once("500 Internal Server Error", "", "oops").await;
        let client = LicenseViewClient::new(&local_config(&base)).unwrap();

        match client.search("W1AW").await {
            Err(Error::FallbackNotFound { call_sign, detail }) => {
                assert_eq!(call_sign, "W1AW");
                assert!(detail.contains("500"), "{}", detail);
            }
            other => panic!("expected FallbackNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_registry_unreadable_body_is_fallback_not_found() {
        let (base, _request) = serve_once("200 OK", "", "not json").await;
        let client = LicenseViewClient::new(&local_config(&base)).unwrap();

        assert!(matches!(
            client.search("W1AW").await,
            Err(Error::FallbackNotFound { .. })
        ));
    }
}
