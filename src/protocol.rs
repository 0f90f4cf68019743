//! Request/reply messages between a page front-end and this tool.
//!
//! Messages are JSON objects tagged by `action`, one per line:
//!
//! ```json
//! {"action": "getTitle", "html": "<html>...</html>", "url": "https://www.youtube.com/watch?v=..."}
//! {"action": "openSearch", "searchTerm": "artist name song title"}
//! ```
//!
//! Every request gets exactly one reply. Failures (malformed JSON, no title
//! on the page, launch errors) are reported as `"success": false` replies
//! with an `error` message; nothing here returns an error to the caller
//! except I/O on the transport itself.

use std::io::{BufRead, Write};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::launcher::{self, SearchRequest, UrlOpener};
use crate::models::TitleLookup;
use crate::normalize::Normalizer;
use crate::source;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    GetTitle {
        html: String,
        #[serde(default)]
        url: Option<String>,
    },
    #[serde(alias = "openAppleMusic")]
    OpenSearch {
        #[serde(rename = "searchTerm")]
        search_term: String,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Reply {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

impl From<TitleLookup> for Reply {
    fn from(lookup: TitleLookup) -> Self {
        if !lookup.success {
            return Self::failure("Unable to extract video title from this page");
        }
        Self {
            success: true,
            title: Some(lookup.title),
            raw_title: Some(lookup.raw_title),
            ..Self::default()
        }
    }
}

/// Answers requests using a normalizer, a search template and a URL opener.
pub struct Handler<'a> {
    normalizer: &'a Normalizer,
    search: &'a SearchRequest,
    opener: &'a dyn UrlOpener,
    dry_run: bool,
}

impl<'a> Handler<'a> {
    pub fn new(
        normalizer: &'a Normalizer,
        search: &'a SearchRequest,
        opener: &'a dyn UrlOpener,
    ) -> Self {
        Self {
            normalizer,
            search,
            opener,
            dry_run: false,
        }
    }

    /// Build search URLs without opening them.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn handle(&self, request: Request) -> Reply {
        match request {
            Request::GetTitle { html, url } => {
                if let Some(url) = url
                    .as_deref()
                    .filter(|url| !source::is_supported_page(url))
                {
                    debug!("Rejecting title lookup for unsupported page {}", url);
                    return Reply::failure("Please open a YouTube video");
                }
                source::lookup_title(&html, self.normalizer).into()
            }
            Request::OpenSearch { search_term } => {
                let result = if self.dry_run {
                    launcher::search_url(self.search, &search_term)
                } else {
                    launcher::open_search(self.search, &search_term, self.opener)
                };
                match result {
                    Ok(url) => Reply {
                        success: true,
                        url: Some(url),
                        ..Reply::default()
                    },
                    Err(err) => Reply::failure(err.to_string()),
                }
            }
        }
    }

    /// Parse one JSON request line and answer it.
    pub fn handle_line(&self, line: &str) -> Reply {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request),
            Err(err) => {
                warn!("Malformed request: {}", err);
                Reply::failure(format!("Malformed request: {}", err))
            }
        }
    }

    /// Answer newline-delimited requests from `reader` until EOF.
    ///
    /// Blank lines are skipped. A line that is not valid UTF-8 gets a failure
    /// reply like any other malformed request. Returns the number of replies
    /// written.
    pub fn serve<R: BufRead, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> std::io::Result<usize> {
        let mut replies = 0;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let reply = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line),
                Err(err) => {
                    warn!("Malformed request: {}", err);
                    Reply::failure(format!("Malformed request: {}", err))
                }
            };
            serde_json::to_writer(&mut writer, &reply)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            replies += 1;
        }
        Ok(replies)
    }
}
