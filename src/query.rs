//! Mapping of caller query parameters onto the upstream search form.
use std::collections::BTreeMap;

use tracing::debug;
use url::Url;

use crate::config::SiteConfig;
use crate::Error;

/// How one upstream query parameter is filled.
struct Param {
    upstream: &'static str,
    /// Name of the caller parameter that overrides the default, if any.
    caller: Option<&'static str>,
    default: &'static str,
}

const fn param(upstream: &'static str, caller: &'static str, default: &'static str) -> Param {
    Param {
        upstream,
        caller: Some(caller),
        default,
    }
}

const fn fixed(upstream: &'static str, value: &'static str) -> Param {
    Param {
        upstream,
        caller: None,
        default: value,
    }
}

/// Upstream parameters in the order they are sent.
const PARAMS: &[Param] = &[
    param("page", "page", "1"),
    param("sort-order", "sort-order", "0"),
    // 3 = "contains"
    param("keywords-contain", "keywords-contain", "3"),
    param("keywords-type", "keywords-type", "all"),
    param("keywords", "keywords", ""),
    param("aircraft", "aircraft", "all"),
    param("airline", "airline", "all"),
    param("country-location", "country", "all"),
    param("photo-year", "year", "all"),
    param("photographer-group", "photographer", "all"),
    param("category", "category", "all"),
    param("width", "width", ""),
    param("height", "height", ""),
    fixed("genre", "all"),
    fixed("search-type", "Advanced"),
];

/// Search parameters as supplied by a caller.
///
/// Unknown keys are ignored, empty values count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    values: BTreeMap<String, String>,
}

impl SearchParams {
    /// No parameters, every upstream parameter gets its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string such as `page=2&airline=Example+Air`.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    /// Set one parameter, replacing an earlier value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// The caller's value for `key`, if present and non-empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The page number that is passed through to the site.
    pub fn page(&self) -> &str {
        self.get("page").unwrap_or("1")
    }

    /// Build the URL of the upstream search page.
    ///
    /// ```
    /// use jetphotos_extract::{SearchParams, SiteConfig};
    ///
    /// let url = SearchParams::new()
    ///     .with("page", "3")
    ///     .with("airline", "Example Air")
    ///     .upstream_url(&SiteConfig::default())
    ///     .unwrap();
    ///
    /// assert!(url.as_str().starts_with("https://www.jetphotos.com/showphotos.php?page=3&"));
    /// assert!(url.as_str().contains("&airline=Example+Air&"));
    /// ```
    pub fn upstream_url(&self, site: &SiteConfig) -> Result<Url, Error> {
        let mut url = site.search_url()?;
        {
            let mut query = url.query_pairs_mut();
            for p in PARAMS {
                let value = p
                    .caller
                    .and_then(|caller| self.get(caller))
                    .unwrap_or(p.default);
                query.append_pair(p.upstream, value);
            }
        }

        debug!(%url, "built upstream url");
        Ok(url)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        SearchParams {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
