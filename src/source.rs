//! Title source: locate a video title in a watch page.
//!
//! Tries the heading selectors the watch page has used over time, then falls
//! back to the document `<title>` with its ` - YouTube` suffix removed.

use std::sync::LazyLock;

use log::debug;
use scraper::{Html, Selector};
use url::Url;

use crate::models::TitleLookup;
use crate::normalize::Normalizer;

/// Heading selectors, tried in order. First non-empty text wins.
const TITLE_SELECTORS: &[&str] = &[
    "h1.ytd-video-primary-info-renderer yt-formatted-string",
    "h1.title yt-formatted-string",
    "h1 yt-formatted-string.ytd-watch-metadata",
    "ytd-watch-metadata h1 yt-formatted-string",
];

static COMPILED_TITLE_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    TITLE_SELECTORS
        .iter()
        .map(|s| {
            Selector::parse(s).unwrap_or_else(|e| panic!("Failed to parse selector '{}': {:?}", s, e))
        })
        .collect()
});

static DOCUMENT_TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").unwrap());

const DOCUMENT_TITLE_SUFFIX: &str = " - YouTube";

const SUPPORTED_HOST: &str = "youtube.com";

/// Extract the raw video title from an HTML document.
pub fn extract_page_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for selector in COMPILED_TITLE_SELECTORS.iter() {
        if let Some(element) = document.select(selector).next() {
            let text = element.text().collect::<String>();
            let text = text.trim();
            if !text.is_empty() {
                debug!("Found title via heading selector");
                return Some(text.to_string());
            }
        }
    }

    let title = document
        .select(&DOCUMENT_TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>())?;
    let title = title.replacen(DOCUMENT_TITLE_SUFFIX, "", 1);
    let title = title.trim();
    if title.is_empty() {
        debug!("No title found on page");
        None
    } else {
        debug!("Found title via document <title>");
        Some(title.to_string())
    }
}

/// Returns true if `url` points at the supported video site.
pub fn is_supported_page(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    parsed.host_str().is_some_and(|host| {
        let host = host.to_ascii_lowercase();
        host == SUPPORTED_HOST || host.ends_with(&format!(".{}", SUPPORTED_HOST))
    })
}

/// Extract and normalize the title of `html`.
pub fn lookup_title(html: &str, normalizer: &Normalizer) -> TitleLookup {
    match extract_page_title(html) {
        Some(raw_title) => TitleLookup {
            success: true,
            title: normalizer.normalize(&raw_title),
            raw_title,
        },
        None => TitleLookup::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATCH_METADATA_PAGE: &str = r#"
        <html><head><title>Fallback Title - YouTube</title></head>
        <body>
          <ytd-watch-metadata>
            <h1 class="style-scope ytd-watch-metadata">
              <yt-formatted-string class="style-scope ytd-watch-metadata">
                Artist Name - Song Title (Official Music Video)
              </yt-formatted-string>
            </h1>
          </ytd-watch-metadata>
        </body></html>
    "#;

    #[test]
    fn test_extract_from_watch_metadata_heading() {
        assert_eq!(
            extract_page_title(WATCH_METADATA_PAGE).as_deref(),
            Some("Artist Name - Song Title (Official Music Video)")
        );
    }

    #[test]
    fn test_extract_from_legacy_primary_info_heading() {
        let html = r#"<html><body>
            <h1 class="title style-scope ytd-video-primary-info-renderer">
              <yt-formatted-string>Old Layout Song</yt-formatted-string>
            </h1></body></html>"#;
        assert_eq!(extract_page_title(html).as_deref(), Some("Old Layout Song"));
    }

    #[test]
    fn test_empty_heading_falls_through_to_document_title() {
        let html = r#"<html><head><title>Cool Song - YouTube</title></head><body>
            <h1 class="title"><yt-formatted-string>  </yt-formatted-string></h1>
            </body></html>"#;
        assert_eq!(extract_page_title(html).as_deref(), Some("Cool Song"));
    }

    #[test]
    fn test_document_title_without_suffix() {
        let html = "<html><head><title> Just A Title </title></head></html>";
        assert_eq!(extract_page_title(html).as_deref(), Some("Just A Title"));
    }

    #[test]
    fn test_no_title_at_all() {
        assert_eq!(extract_page_title("<html><body><p>hi</p></body></html>"), None);
        assert_eq!(extract_page_title("<title>YouTube</title>").as_deref(), Some("YouTube"));
        assert_eq!(extract_page_title("<title> - YouTube</title>"), None);
        assert_eq!(extract_page_title(""), None);
    }

    #[test]
    fn test_is_supported_page() {
        assert!(is_supported_page("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_supported_page("https://youtube.com/watch?v=x"));
        assert!(is_supported_page("https://m.YouTube.com/watch?v=x"));
        assert!(!is_supported_page("https://notyoutube.com/watch?v=x"));
        assert!(!is_supported_page("https://example.com/?q=youtube.com"));
        assert!(!is_supported_page("not a url"));
    }

    #[test]
    fn test_lookup_title_normalizes() {
        let lookup = lookup_title(WATCH_METADATA_PAGE, &Normalizer::default());
        assert!(lookup.success);
        assert_eq!(lookup.title, "artist name song title");
        assert_eq!(lookup.raw_title, "Artist Name - Song Title (Official Music Video)");
    }

    #[test]
    fn test_lookup_title_missing() {
        let lookup = lookup_title("<html></html>", &Normalizer::default());
        assert!(!lookup.success);
        assert!(lookup.title.is_empty());
        assert!(lookup.raw_title.is_empty());
    }
}
