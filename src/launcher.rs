//! Search launcher.
//!
//! Builds the external catalog search URL for a clean title
//! (`music://music.apple.com/search?term=<encoded>` by default) and hands it
//! to the operating system's URL handler.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use urlencoding::encode;

/// Error type for launching a catalog search.
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchError {
    /// Search term was empty or whitespace only
    EmptySearchTerm,

    /// The host refused to open the URL
    Open { url: String, message: String },
}

impl std::fmt::Display for LaunchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySearchTerm => write!(f, "No search term provided"),
            Self::Open { url, message } => write!(f, "Failed to open '{}': {}", url, message),
        }
    }
}

impl std::error::Error for LaunchError {}

/// Parts of the search URL template `<scheme>://<host><path>?<query_key>=<term>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchRequest {
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub query_key: String,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            scheme: "music".to_string(),
            host: "music.apple.com".to_string(),
            path: "/search".to_string(),
            query_key: "term".to_string(),
        }
    }
}

/// Something that can open a URL on the host.
pub trait UrlOpener {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Opens URLs with the platform's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> std::io::Result<()> {
        webbrowser::open(url)
    }
}

/// Build the search URL for `term`, percent-encoding it into the query.
pub fn search_url(request: &SearchRequest, term: &str) -> Result<String, LaunchError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(LaunchError::EmptySearchTerm);
    }

    let path = if request.path.is_empty() || request.path.starts_with('/') {
        request.path.clone()
    } else {
        format!("/{}", request.path)
    };

    Ok(format!(
        "{}://{}{}?{}={}",
        request.scheme,
        request.host,
        path,
        encode(&request.query_key),
        encode(term)
    ))
}

/// Build the search URL for `term` and open it. Returns the opened URL.
pub fn open_search(
    request: &SearchRequest,
    term: &str,
    opener: &dyn UrlOpener,
) -> Result<String, LaunchError> {
    let url = search_url(request, term)?;
    debug!("Opening catalog search {}", url);

    if let Err(err) = opener.open(&url) {
        warn!("Failed to open external URL '{}': {}", url, err);
        return Err(LaunchError::Open {
            url,
            message: err.to_string(),
        });
    }
    Ok(url)
}
