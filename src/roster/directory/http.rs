use super::{list_path, ToggleRequest, UserDirectory, RESET_PATH};
use crate::error::{Result, RosterError};
use crate::model::{AdminContext, ListRequest, ResultPage};
use reqwest::blocking::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, info};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// [`UserDirectory`] backed by the platform's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    client: Client,
    base_url: String,
}

impl HttpDirectory {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(RosterError::Config("base URL is empty".to_string()));
        }

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        info!(base_url = %base_url, "created user directory client");

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(RosterError::Remote {
            status: status.as_u16(),
            body,
        })
    }
}

impl UserDirectory for HttpDirectory {
    fn list_users(&mut self, context: &AdminContext, request: &ListRequest) -> Result<ResultPage> {
        let url = self.build_url(&list_path(context));
        debug!(%url, ?request, "fetching user list");

        let response = self.send(self.client.get(&url).query(&request.query_pairs()))?;
        Ok(response.json()?)
    }

    fn toggle(&mut self, request: &ToggleRequest) -> Result<()> {
        let url = self.build_url(&request.path());
        debug!(%url, "sending row toggle");

        self.send(self.client.get(&url))?;
        Ok(())
    }

    fn request_password_reset(&mut self, email: &str) -> Result<()> {
        let url = self.build_url(RESET_PATH);
        debug!(%url, "requesting password reset");

        self.send(self.client.post(&url).form(&[("username", email)]))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RowAction;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serves exactly one request with the given status line and body, and
    /// hands back the raw request text (head and body).
    fn serve_once(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut head = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap_or(0);
                }
                let done = line == "\r\n";
                head.push_str(&line);
                if done {
                    break;
                }
            }
            let mut body_buf = vec![0u8; content_length];
            reader.read_exact(&mut body_buf).unwrap();
            head.push_str(&String::from_utf8_lossy(&body_buf));
            tx.send(head).unwrap();

            let mut stream = stream;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        (format!("http://{}", addr), rx)
    }

    #[test]
    fn list_sends_query_to_scoped_path() {
        let (base, rx) = serve_once(
            "200 OK",
            r#"{"users":[{"id":1,"name":"Ada","username":"ada@example.gov"}],"count":31,"page":2,"limit":10}"#,
        );
        let mut directory = HttpDirectory::new(base).unwrap();
        let request = ListRequest {
            page: Some(2),
            q: Some("ada".into()),
            limit: Some(10),
        };

        let page = directory
            .list_users(&AdminContext::agency("7"), &request)
            .unwrap();
        assert_eq!(page.count, 31);
        assert_eq!(page.users[0].username, "ada@example.gov");

        let raw = rx.recv().unwrap();
        assert!(raw.starts_with("GET /api/admin/users/7?page=2&q=ada&limit=10 "));
    }

    #[test]
    fn non_success_status_becomes_remote_error() {
        let (base, _rx) = serve_once("403 Forbidden", r#"{"message":"nope"}"#);
        let mut directory = HttpDirectory::new(base).unwrap();

        let err = directory
            .toggle(&ToggleRequest::new(3, RowAction::Enable, true))
            .unwrap_err();
        match err {
            RosterError::Remote { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("nope"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn reset_posts_username_form() {
        let (base, rx) = serve_once("200 OK", "{}");
        let mut directory = HttpDirectory::new(base).unwrap();

        directory.request_password_reset("ada@example.gov").unwrap();

        let raw = rx.recv().unwrap();
        assert!(raw.starts_with("POST /api/auth/forgot "));
        assert!(raw.ends_with("username=ada%40example.gov"));
    }

    #[test]
    fn empty_base_url_is_rejected() {
        assert!(matches!(
            HttpDirectory::new("/"),
            Err(RosterError::Config(_))
        ));
    }

    #[test]
    fn build_url_joins_without_double_slash() {
        let directory = HttpDirectory::new("https://example.gov/").unwrap();
        assert_eq!(
            directory.build_url("/api/admin/users"),
            "https://example.gov/api/admin/users"
        );
    }
}
