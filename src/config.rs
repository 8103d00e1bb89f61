use url::Url;

use crate::Error;

const DEFAULT_ORIGIN: &str = "https://www.jetphotos.com";
const DEFAULT_SEARCH_PATH: &str = "/showphotos.php";

/// Where the site lives.
///
/// The origin is used both to build the upstream search URL and to turn the site-relative links
/// found in the markup into absolute ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    origin: String,
    search_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            origin: DEFAULT_ORIGIN.to_owned(),
            search_path: DEFAULT_SEARCH_PATH.to_owned(),
        }
    }
}

impl SiteConfig {
    /// Use a different origin, e.g. a mirror or a local test server.
    ///
    /// A trailing slash is removed.
    pub fn new(origin: &str) -> Result<Self, Error> {
        let parsed = Url::parse(origin).map_err(|e| Error::InvalidBaseUrl {
            url: origin.to_owned(),
            reason: e.to_string(),
        })?;

        if parsed.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl {
                url: origin.to_owned(),
                reason: "not a base URL".to_owned(),
            });
        }

        Ok(SiteConfig {
            origin: origin.trim_end_matches('/').to_owned(),
            search_path: DEFAULT_SEARCH_PATH.to_owned(),
        })
    }

    /// Override the path of the search endpoint.
    #[must_use]
    pub fn with_search_path(mut self, path: &str) -> Self {
        self.search_path = path.to_owned();
        self
    }

    /// The origin links are resolved against, without trailing slash.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The search endpoint, without query.
    pub fn search_url(&self) -> Result<Url, Error> {
        let url = format!("{}{}", self.origin, self.search_path);
        Url::parse(&url).map_err(|e| Error::InvalidBaseUrl {
            url,
            reason: e.to_string(),
        })
    }

    /// Turn a link found in the markup into a URL on the site by prefixing it with the origin.
    ///
    /// `href` is appended as is, whatever its shape.
    pub(crate) fn resolve(&self, href: &str) -> String {
        format!("{}{}", self.origin, href)
    }
}
