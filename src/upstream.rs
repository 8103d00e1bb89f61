//! The source of search result pages.
use url::Url;

use crate::Error;

/// Something that can retrieve the HTML of a search result page.
///
/// Implementations return the body on a 2xx response and [Error::Upstream] otherwise. They
/// must not retry.
pub trait Upstream {
    /// GET `url` and return the response body.
    fn fetch(&self, url: &Url) -> Result<String, Error>;
}

impl<U: Upstream + ?Sized> Upstream for &U {
    fn fetch(&self, url: &Url) -> Result<String, Error> {
        (**self).fetch(url)
    }
}

#[cfg(feature = "fetch")]
pub use self::http::HttpUpstream;

#[cfg(feature = "fetch")]
mod http {
    use reqwest::blocking::Client;
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER, USER_AGENT};
    use tracing::warn;
    use url::Url;

    use super::Upstream;
    use crate::Error;

    const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";
    const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";
    const SITE_REFERER: &str = "https://www.jetphotos.com/";

    /// Fetches pages over HTTP with the headers of a regular browser.
    #[derive(Debug, Clone)]
    pub struct HttpUpstream {
        client: Client,
    }

    impl HttpUpstream {
        /// Create a client with browser-like default headers.
        pub fn new() -> Result<Self, Error> {
            let mut headers = HeaderMap::new();
            headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
            headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
            headers.insert(REFERER, HeaderValue::from_static(SITE_REFERER));

            let client = Client::builder()
                .default_headers(headers)
                .build()
                .map_err(|e| Error::Transport(e.to_string()))?;
            Ok(HttpUpstream { client })
        }
    }

    impl Upstream for HttpUpstream {
        fn fetch(&self, url: &Url) -> Result<String, Error> {
            let response = self
                .client
                .get(url.as_str())
                .send()
                .map_err(|e| Error::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                warn!(%url, status = status.as_u16(), "upstream rejected the request");
                return Err(Error::Upstream {
                    status: status.as_u16(),
                    status_text: status.canonical_reason().unwrap_or_default().to_owned(),
                });
            }

            response.text().map_err(|e| Error::Transport(e.to_string()))
        }
    }
}
