//! The boundary of the service: one search request in, one JSON response out.
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::query::SearchParams;
use crate::record::PhotoRecord;
use crate::upstream::Upstream;
use crate::{Error, Extractor};

const INTERNAL_ERROR: &str = "Internal API Proxy Error";

/// Body of a response, in one of the two shapes callers can receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// Extraction succeeded. `count` always equals the number of photos.
    Photos {
        /// The photos in document order.
        photos: Vec<PhotoRecord>,
        /// Number of photos.
        count: usize,
    },
    /// Something went wrong.
    Failure {
        /// What went wrong.
        error: String,
        /// More detail, for internal errors.
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl ResponseBody {
    /// Wrap extracted photos.
    #[must_use]
    pub fn photos(photos: Vec<PhotoRecord>) -> Self {
        ResponseBody::Photos {
            count: photos.len(),
            photos,
        }
    }
}

/// A status code together with a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// The JSON body.
    pub body: ResponseBody,
}

impl ApiResponse {
    /// Whether this is a success response.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Serialize the body.
    pub fn to_json(&self) -> String {
        // a body of strings and integers always serializes
        serde_json::to_string(&self.body).unwrap_or_default()
    }

    /// Serialize the body with indentation.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.body).unwrap_or_default()
    }
}

impl From<Vec<PhotoRecord>> for ApiResponse {
    fn from(photos: Vec<PhotoRecord>) -> Self {
        ApiResponse {
            status: 200,
            body: ResponseBody::photos(photos),
        }
    }
}

impl From<Error> for ApiResponse {
    fn from(err: Error) -> Self {
        let body = match err {
            Error::Upstream { .. } => ResponseBody::Failure {
                error: err.to_string(),
                details: None,
            },
            Error::Transport(ref details)
            | Error::Internal(ref details)
            | Error::InvalidBaseUrl {
                reason: ref details,
                ..
            } => ResponseBody::Failure {
                error: INTERNAL_ERROR.to_owned(),
                details: Some(details.clone()),
            },
        };

        ApiResponse {
            status: err.status(),
            body,
        }
    }
}

/// Answers search requests by fetching a result page and extracting its photos.
#[derive(Debug, Clone)]
pub struct Service<U> {
    extractor: Extractor,
    upstream: U,
}

impl<U: Upstream> Service<U> {
    /// Create a service that resolves links like `extractor` does and fetches from `upstream`.
    pub fn new(extractor: Extractor, upstream: U) -> Self {
        Service {
            extractor,
            upstream,
        }
    }

    /// Handle one request. Never fails: errors become failure responses.
    pub fn handle(&self, params: &SearchParams) -> ApiResponse {
        match self.search(params) {
            Ok(photos) => {
                info!(page = params.page(), count = photos.len(), "search succeeded");
                photos.into()
            }
            Err(err) => {
                match err {
                    Error::Upstream { .. } => warn!("{}", err),
                    _ => error!("{}", err),
                }
                err.into()
            }
        }
    }

    /// Fetch and extract, with errors as values.
    pub fn search(&self, params: &SearchParams) -> Result<Vec<PhotoRecord>, Error> {
        let url = params.upstream_url(self.extractor.site())?;
        let html = self.upstream.fetch(&url)?;
        extract_guarded(&self.extractor, &html)
    }
}

/// Run the extractor, turning a panic into [Error::Internal] so that no partial output escapes.
pub fn extract_guarded(extractor: &Extractor, html: &str) -> Result<Vec<PhotoRecord>, Error> {
    guarded(|| extractor.extract(html))
}

fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, Error> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = payload
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| payload.downcast_ref::<&'static str>().copied())
            .unwrap_or("extraction panicked");
        Error::Internal(message.to_owned())
    })
}
