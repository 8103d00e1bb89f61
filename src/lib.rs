#![deny(missing_docs)]
// The input is HTML from the internet.
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod accumulator;
mod assembler;
mod config;
mod element;
mod error;
mod extractor;
mod extractors;
mod query;
mod record;
mod scopes;
mod service;
mod upstream;

pub use config::SiteConfig;
pub use error::Error;
pub use extractor::{extract_photos, Extractor};
pub use query::SearchParams;
pub use record::{sanitize_aircraft_type, PhotoRecord, NOT_AVAILABLE, UNKNOWN_AIRCRAFT};
pub use service::{extract_guarded, ApiResponse, ResponseBody, Service};
#[cfg(feature = "fetch")]
pub use upstream::HttpUpstream;
pub use upstream::Upstream;
