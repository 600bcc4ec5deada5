use crate::fetchers::fetcher::{PageFetcher, PageRequest, PageResult};
use reqwest::{Client, StatusCode};

/// Plain HTTP GET fetcher.
///
/// No request timeout is set; a stalled server is left to the OS and
/// connection defaults.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, request: &PageRequest) -> PageResult {
        let url = request.url();
        ::log::debug!("GET {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return PageResult::network_error(url, e.to_string()),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return PageResult::http_error(url, status.as_u16());
        }

        match response.text().await {
            Ok(body) => {
                ::log::debug!("Received {} bytes from {}", body.len(), url);
                PageResult::success(url, body)
            }
            Err(e) => PageResult::network_error(url, format!("failed to read body: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::fetcher::FetchStatus;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_returns_body_on_200() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/laptops"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/laptops?page=", mock_server.uri());
        let result = HttpFetcher::new()
            .fetch(&PageRequest::new(&base_url, 1))
            .await;

        assert_eq!(result.status, FetchStatus::Success);
        assert_eq!(result.markup.as_deref(), Some("<html>ok</html>"));
        assert_eq!(result.url, format!("{}1", base_url));
    }

    #[tokio::test]
    async fn test_fetch_reports_non_200_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/laptops"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/laptops?page=", mock_server.uri());
        let result = HttpFetcher::new()
            .fetch(&PageRequest::new(&base_url, 2))
            .await;

        assert_eq!(result.status, FetchStatus::HttpError(503));
        assert!(result.markup.is_none());
    }

    #[tokio::test]
    async fn test_other_success_codes_are_not_accepted() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/laptops?page=", mock_server.uri());
        let result = HttpFetcher::new()
            .fetch(&PageRequest::new(&base_url, 1))
            .await;

        assert_eq!(result.status, FetchStatus::HttpError(204));
    }

    #[tokio::test]
    async fn test_truncated_body_is_a_network_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // Promises 100 bytes of body, sends 5, then hangs up
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nshort")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let base_url = format!("http://127.0.0.1:{}/laptops?page=", port);
        let result = HttpFetcher::new()
            .fetch(&PageRequest::new(&base_url, 1))
            .await;

        match result.status {
            FetchStatus::NetworkError(message) => {
                assert!(message.starts_with("failed to read body"));
            }
            other => panic!("expected a network error, got {:?}", other),
        }
        assert!(result.markup.is_none());
    }

    #[tokio::test]
    async fn test_fetch_reports_connection_failure() {
        // Nothing listens on the port once the listener is dropped
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let base_url = format!("http://127.0.0.1:{}/laptops?page=", port);

        let result = HttpFetcher::new()
            .fetch(&PageRequest::new(&base_url, 1))
            .await;

        assert!(matches!(result.status, FetchStatus::NetworkError(_)));
        assert!(result.markup.is_none());
    }
}
