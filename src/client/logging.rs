use std::time::Instant;

use http::Extensions;
use log::{error, info};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

/// Logs every request and response passing through the client.
///
/// Request bodies are only peeked at. Response bodies have to be read to be
/// logged, so the response is rebuilt from the buffered bytes before it is
/// handed back.
pub struct RequestLogger {
    active: bool,
}

impl RequestLogger {
    pub fn new(active: bool) -> Self {
        Self { active }
    }
}

#[async_trait::async_trait]
impl Middleware for RequestLogger {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        if self.active {
            log_request(&req);
        }

        let url = req.url().clone();
        let start = Instant::now();
        let res = next.run(req, extensions).await;
        let duration = start.elapsed();

        let res = match res {
            Ok(res) => res,
            Err(e) => {
                error!("Request to {} failed: {}", url, e);
                return Err(e);
            }
        };

        if !self.active {
            return Ok(res);
        }

        let status = res.status();
        let version = res.version();
        let headers = res.headers().clone();
        let body = res.bytes().await?;

        info!(
            "Response: {}\nDuration: {:?}\nStatus: {}\nHeaders: {:?}\nBody: {}",
            url,
            duration,
            status.as_u16(),
            headers,
            String::from_utf8_lossy(&body)
        );

        let mut replay = http::Response::new(body);
        *replay.status_mut() = status;
        *replay.version_mut() = version;
        *replay.headers_mut() = headers;
        Ok(Response::from(replay))
    }
}

fn log_request(req: &Request) {
    let body = req
        .body()
        .and_then(|b| b.as_bytes())
        .map(String::from_utf8_lossy)
        .unwrap_or_default();
    info!(
        "Request: {} {}\nHeaders: {:?}\nBody: {}",
        req.method(),
        req.url(),
        req.headers(),
        body
    );
}
