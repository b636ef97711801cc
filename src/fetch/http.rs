// src/fetch/http.rs
// =============================================================================
// The real page fetcher, built on reqwest.
//
// Key functionality:
// - Makes HTTP GET requests with our own User-Agent and a fixed timeout
// - Rejects anything that isn't text/html
// - Decodes the body using the charset from the Content-Type header
// - Sorts reqwest failures into FetchError variants
// =============================================================================

use super::{FetchError, FetchedPage, PageFetcher};
use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for the HTTP fetcher
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Give up on a request after this long
    pub timeout: Duration,
    /// Sent as the User-Agent header on every request
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            // "<ProjectName>/<Version>, <RepositoryURL>"
            user_agent: format!(
                "{}/{}, {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_REPOSITORY")
            ),
        }
    }
}

/// Fetches pages over HTTP(S)
///
/// Holds one reqwest Client so connections are pooled across the crawl.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let target = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

        debug!("Request for {}", url);
        let response = self.client.get(target).send().await.map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Missing header counts as "not HTML"
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.to_ascii_lowercase().contains("text/html") {
            return Err(FetchError::UnsupportedContentType(content_type));
        }

        let charset = charset_of(&content_type);

        debug!("Decoding contents of {}", url);
        let bytes = response.bytes().await.map_err(categorize_error)?;
        let body = decode_body(&bytes, charset.as_deref())?;

        Ok(FetchedPage {
            url: url.to_string(),
            content_type,
            charset,
            body,
        })
    }
}

// Sorts a reqwest error into one of our variants
//
// Timeouts get their own variant; everything else (DNS, refused
// connections, TLS, redirect loops, broken bodies) is a network error.
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::Network("too many redirects".to_string())
    } else {
        FetchError::Network(error.to_string())
    }
}

// Pulls the charset parameter out of a Content-Type value
//
// Examples:
//   "text/html; charset=UTF-8"     -> Some("utf-8")
//   "text/html;charset=\"latin1\"" -> Some("latin1")
//   "text/html"                    -> None
fn charset_of(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"').to_ascii_lowercase())
        } else {
            None
        }
    })
}

// Turns raw body bytes into a String
//
// No charset means strict UTF-8. A declared charset is looked up by its
// WHATWG label (so "latin1" and "us-ascii" both land on windows-1252, and
// "sjis" on Shift_JIS). Unknown labels and invalid byte sequences are
// decode errors; nothing is silently replaced with U+FFFD.
fn decode_body(bytes: &[u8], charset: Option<&str>) -> Result<String, FetchError> {
    let encoding = match charset {
        None => UTF_8,
        Some(label) => Encoding::for_label(label.as_bytes())
            .ok_or_else(|| FetchError::Decode(format!("unsupported charset {label}")))?,
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| FetchError::Decode(format!("invalid {} byte sequence", encoding.name())))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why read bytes() instead of text()?
//    - reqwest's text() never fails: bad bytes become U+FFFD
//    - We want a broken page to be reported as a Decode error instead
//    - So we take the raw bytes and decode them ourselves
//
// 2. What is encoding_rs?
//    - The character-set library Firefox uses (reqwest depends on it too)
//    - Encoding::for_label("shift_jis") finds the decoder for a charset name
//    - The "without_replacement" decode returns None on invalid input
//
// 3. Why map every reqwest error into FetchError?
//    - The crawler only has to understand one error type
//    - FetchError is Clone + PartialEq, so tests can compare it directly
//    - reqwest::Error is neither
//
// 4. What does #[async_trait] do?
//    - A plain `async fn` in a trait gives no way to require a Send future
//    - The macro rewrites `async fn fetch` into a method returning
//      Pin<Box<dyn Future + Send>>, which the crawler can await
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(FetchConfig::default()).unwrap()
    }

    #[test]
    fn test_charset_of() {
        assert_eq!(charset_of("text/html; charset=UTF-8"), Some("utf-8".to_string()));
        assert_eq!(charset_of("text/html;charset=\"latin1\""), Some("latin1".to_string()));
        assert_eq!(charset_of("text/html"), None);
    }

    #[test]
    fn test_decode_latin1() {
        let body = decode_body(&[0x63, 0x61, 0x66, 0xE9], Some("iso-8859-1")).unwrap();
        assert_eq!(body, "café");
    }

    #[test]
    fn test_decode_windows_1252() {
        // 0x80 is the euro sign in windows-1252 but a control in real latin1
        let body = decode_body(&[0x63, 0x61, 0x66, 0xE9, 0x20, 0x80], Some("windows-1252")).unwrap();
        assert_eq!(body, "café €");
    }

    #[test]
    fn test_decode_shift_jis() {
        let body = decode_body(&[0x93, 0xFA, 0x96, 0x7B], Some("shift_jis")).unwrap();
        assert_eq!(body, "日本");
        assert_eq!(decode_body(b"plain ascii", Some("shift_jis")).unwrap(), "plain ascii");
    }

    #[test]
    fn test_decode_invalid_multibyte() {
        // A Shift_JIS lead byte followed by a byte that can't trail it
        let result = decode_body(&[0x93, 0x20], Some("shift_jis"));
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let result = decode_body(&[0xff, 0xfe, 0x41], None);
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_decode_unknown_charset() {
        let result = decode_body(b"hello", Some("x-no-such-charset"));
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_default_user_agent() {
        let config = FetchConfig::default();
        assert!(config.user_agent.starts_with("adjutant/"));
        assert!(config.user_agent.ends_with(", https://github.com/jd7h/adjutant"));
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_fetch_html_page() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/page")
            .match_header("user-agent", FetchConfig::default().user_agent.as_str())
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<p>Hello</p>")
            .expect(1)
            .create_async()
            .await;

        let url = format!("{}/page", server.url());
        let page = fetcher().fetch(&url).await.unwrap();

        assert_eq!(page.url, url);
        assert_eq!(page.charset.as_deref(), Some("utf-8"));
        assert_eq!(page.body, "<p>Hello</p>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_uses_declared_charset() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/legacy")
            .with_status(200)
            .with_header("content-type", "text/html; charset=windows-1252")
            .with_body(b"<p>caf\xe9 na\xefve</p>")
            .create_async()
            .await;

        let page = fetcher().fetch(&format!("{}/legacy", server.url())).await.unwrap();
        assert_eq!(page.charset.as_deref(), Some("windows-1252"));
        assert_eq!(page.body, "<p>café naïve</p>");
    }

    #[tokio::test]
    async fn test_fetch_multibyte_charset() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/jp")
            .with_status(200)
            .with_header("content-type", "text/html; charset=Shift_JIS")
            .with_body(b"<p>\x93\xfa\x96\x7b</p>")
            .create_async()
            .await;

        let page = fetcher().fetch(&format!("{}/jp", server.url())).await.unwrap();
        assert_eq!(page.charset.as_deref(), Some("shift_jis"));
        assert_eq!(page.body, "<p>日本</p>");
    }

    #[tokio::test]
    async fn test_fetch_undecodable_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/broken")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(b"<p>\xff\xfe</p>")
            .create_async()
            .await;

        let result = fetcher().fetch(&format!("{}/broken", server.url())).await;
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_html() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/data.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let result = fetcher().fetch(&format!("{}/data.json", server.url())).await;
        assert_eq!(
            result,
            Err(FetchError::UnsupportedContentType("application/json".to_string()))
        );
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_header("content-type", "text/html")
            .create_async()
            .await;

        let result = fetcher().fetch(&format!("{}/missing", server.url())).await;
        assert_eq!(result, Err(FetchError::Status(404)));
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let result = fetcher().fetch("not a url").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }
}
