use std::io::Write;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use engine_logging::{engine_debug, engine_trace};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::{EngineEvent, FailureKind, FetchError, FetchMetadata, Stage};

pub(crate) const USER_AGENT: &str = concat!("top-wallpaper/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    /// Accepted `Content-Type` values; a trailing `/*` matches any subtype.
    pub allowed_content_types: Vec<String>,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 50 * 1024 * 1024,
            allowed_content_types: vec![
                "image/*".to_string(),
                "application/octet-stream".to_string(),
            ],
            user_agent: USER_AGENT.to_string(),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Forwards engine events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn emit(&self, event: EngineEvent) {
        match event {
            EngineEvent::Progress {
                url,
                stage: Stage::Downloading,
                bytes: Some(bytes),
            } if bytes > 0 => {
                engine_trace!("{url}: {bytes} bytes");
            }
            EngineEvent::Progress { url, stage, .. } => {
                engine_debug!("{url}: {stage:?}");
            }
            EngineEvent::CandidateRejected { url, reason } => {
                engine_debug!("{url}: rejected ({reason})");
            }
        }
    }
}

/// Downloads one URL, writing the body to `out` chunk by chunk.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(
        &self,
        url: &str,
        out: &mut (dyn Write + Send),
        sink: &dyn ProgressSink,
    ) -> Result<FetchMetadata, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(
        &self,
        redirect_counter: Arc<AtomicUsize>,
    ) -> Result<reqwest::Client, FetchError> {
        let redirect_limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            let count = attempt.previous().len();
            redirect_counter.store(count, Ordering::Relaxed);
            if count >= redirect_limit {
                attempt.error("redirect limit exceeded")
            } else {
                attempt.follow()
            }
        });

        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .user_agent(self.settings.user_agent.clone())
            .redirect(policy)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings.allowed_content_types.iter().any(|allowed| {
            match allowed.strip_suffix("/*") {
                Some(top_level) => ct
                    .split_once('/')
                    .is_some_and(|(ty, _)| ty.eq_ignore_ascii_case(top_level)),
                None => allowed.eq_ignore_ascii_case(ct),
            }
        })
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(
        &self,
        url: &str,
        out: &mut (dyn Write + Send),
        sink: &dyn ProgressSink,
    ) -> Result<FetchMetadata, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let hops = Arc::new(AtomicUsize::new(0));
        let response = self
            .build_client(hops.clone())?
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("GET {url} returned {status}"),
            ));
        }
        let declared = response.content_length();
        if declared.is_some_and(|len| len > self.settings.max_bytes) {
            return Err(self.too_large(declared));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        if let Some(declared_type) = content_type.as_deref() {
            if !self.is_content_type_allowed(declared_type) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: declared_type.to_string(),
                    },
                    format!("{url} is not an image"),
                ));
            }
        }

        let final_url = response.url().to_string();
        let byte_len = self.copy_body(url, response, out, sink).await?;

        Ok(FetchMetadata {
            original_url: url.to_string(),
            final_url,
            redirect_count: hops.load(Ordering::Relaxed),
            content_type,
            byte_len,
        })
    }
}

impl ReqwestFetcher {
    /// Streams the body into `out`, giving up as soon as it grows past
    /// `max_bytes`. Returns the number of bytes written.
    async fn copy_body(
        &self,
        url: &str,
        response: reqwest::Response,
        out: &mut (dyn Write + Send),
        sink: &dyn ProgressSink,
    ) -> Result<u64, FetchError> {
        let progress = |bytes: u64| EngineEvent::Progress {
            url: url.to_string(),
            stage: Stage::Downloading,
            bytes: Some(bytes),
        };
        sink.emit(progress(0));

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            written += chunk.len() as u64;
            if written > self.settings.max_bytes {
                return Err(self.too_large(None));
            }
            out.write_all(&chunk)
                .map_err(|err| FetchError::new(FailureKind::Storage, err.to_string()))?;
            sink.emit(progress(written));
        }
        Ok(written)
    }

    fn too_large(&self, actual: Option<u64>) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual,
            },
            "download aborted",
        )
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
