//! Feed sources: where the raw text comes from.
//!
//! The published spreadsheet is fetched over HTTP(S). A local file works
//! the same way, which is handy for exports and offline use.

use std::path::PathBuf;
use std::time::Duration;
use std::{fs, io};

use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while fetching the feed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Something that can hand over the raw feed text.
pub trait FeedSource {
    /// Fetches the whole feed as text.
    fn fetch(&self) -> Result<String, FetchError>;

    /// Where the feed comes from, for messages.
    fn describe(&self) -> String;
}

/// A feed published at an HTTP(S) URL.
pub struct HttpFeed {
    url: String,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Fetches with a given client. Anything but a 2xx status is an error.
    fn fetch_with(&self, client: &reqwest::blocking::Client) -> Result<String, FetchError> {
        debug!(url = %self.url, "fetching feed");
        let response = client
            .get(&self.url)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .map_err(|e| self.http_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| self.http_error(e))
    }

    fn http_error(&self, source: reqwest::Error) -> FetchError {
        FetchError::Http {
            url: self.url.clone(),
            source,
        }
    }
}

impl FeedSource for HttpFeed {
    fn fetch(&self) -> Result<String, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| self.http_error(e))?;
        self.fetch_with(&client)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// A feed exported to a local file.
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeedSource for FileFeed {
    fn fetch(&self) -> Result<String, FetchError> {
        debug!(path = %self.path.display(), "reading feed");
        fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Picks a source for a location: URLs go over HTTP, anything else is a path.
pub fn source_for(location: &str) -> Box<dyn FeedSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpFeed::new(location))
    } else {
        Box::new(FileFeed::new(location))
    }
}
