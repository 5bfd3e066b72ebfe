//! Logging setup: a console stream plus an append-only access log file.

use axum::{
    body::HttpBody,
    extract::{ConnectInfo, Request},
    http::{header, Method, StatusCode, Uri, Version},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, FixedOffset, Local};
use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{
    filter::Targets, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Target of the per-request access events; the only target written to the file.
pub const ACCESS_TARGET: &str = "access";

const DEFAULT_FILTER: &str = "rest_api=info,tower_http=info,access=info";

/// Installs the global subscriber. `RUST_LOG` overrides the console filter only.
pub fn init(access_log: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new().create(true).append(true).open(access_log)?;

    let console = tracing_subscriber::fmt::layer().with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    );
    let access = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_filter(Targets::new().with_target(ACCESS_TARGET, Level::INFO));

    tracing_subscriber::registry().with(console).with(access).try_init()?;
    Ok(())
}

/// One line in Common Log Format.
fn common_log_line(
    remote: &str,
    time: DateTime<FixedOffset>,
    method: &Method,
    uri: &Uri,
    version: Version,
    status: StatusCode,
    size: &str,
) -> String {
    format!(
        "{} - - [{}] \"{} {} {:?}\" {} {}",
        remote,
        time.format("%d/%b/%Y:%H:%M:%S %z"),
        method,
        uri,
        version,
        status.as_u16(),
        size
    )
}

/// Byte count of the response body: the declared length, else the exact size
/// of a buffered body, else `-`.
fn response_size(response: &Response) -> String {
    response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| response.body().size_hint().exact().map(|n| n.to_string()))
        .unwrap_or_else(|| "-".into())
}

/// Middleware emitting one access event per request.
pub async fn access_log(req: Request, next: Next) -> Response {
    let remote = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".into());
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let response = next.run(req).await;

    let size = response_size(&response);
    let line = common_log_line(
        &remote,
        Local::now().fixed_offset(),
        &method,
        &uri,
        version,
        response.status(),
        &size,
    );
    tracing::info!(target: ACCESS_TARGET, "{}", line);
    response
}

/// In-memory log sink for tests.
#[cfg(test)]
pub(crate) mod capture {
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::Level;

    #[derive(Clone, Default)]
    pub struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        pub fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }

        /// Subscriber writing bare messages at `level` and above into this sink.
        pub fn subscriber(&self, level: Level) -> impl tracing::Subscriber + Send + Sync {
            let sink = self.clone();
            tracing_subscriber::fmt()
                .with_writer(move || sink.clone())
                .with_max_level(level)
                .with_ansi(false)
                .without_time()
                .finish()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
