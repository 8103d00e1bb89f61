//! The [PhotoRecord] type and the normalization applied when a record is sealed.
use serde::{Serialize, Serializer};

/// Value of every string field that the source markup did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Value of [PhotoRecord::aircraft_type] when nothing usable is left after sanitizing.
pub const UNKNOWN_AIRCRAFT: &str = "Unknown";

/// Characters that may not appear in a finalized aircraft type, so it can be used as a path
/// component.
const PATH_UNSAFE: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// One photo of a search result page.
///
/// The serialized field names are part of the JSON contract of the service and must not change.
/// Counters serialize as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    /// Opaque identifier, taken from the `data-photo` attribute of the record container.
    pub photo_id: String,
    /// Absolute URL of the thumbnail image.
    pub thumbnail_url: String,
    /// Absolute URL of the full size image.
    pub image_url: String,
    /// Absolute URL of the photo's own page.
    pub photo_page_url: String,
    /// Aircraft registration, such as `N123AB`.
    pub registration: String,
    /// Link to all photos of this registration.
    pub registration_url: String,
    /// Aircraft type, such as `Boeing 737-800`.
    pub aircraft_type: String,
    /// Operating airline.
    pub airline: String,
    /// Link to all photos of this airline.
    pub airline_url: String,
    /// Name of the photographer.
    pub photographer: String,
    /// Link to the photographer's profile.
    pub photographer_url: String,
    /// Where the photo was taken.
    pub location: String,
    /// Link to all photos of this location.
    pub location_url: String,
    /// The date the photo was taken, as displayed by the site.
    pub photo_date: String,
    /// The date the photo was uploaded, as displayed by the site.
    pub uploaded_date: String,
    /// Number of likes.
    #[serde(serialize_with = "as_decimal_string")]
    pub likes: u64,
    /// Number of comments.
    #[serde(serialize_with = "as_decimal_string")]
    pub comments: u64,
    /// Number of views.
    #[serde(serialize_with = "as_decimal_string")]
    pub views: u64,
}

impl PhotoRecord {
    /// Create a record with the given identifier and every other field at its default.
    #[must_use]
    pub fn new(photo_id: impl Into<String>) -> Self {
        let na = || NOT_AVAILABLE.to_owned();
        PhotoRecord {
            photo_id: photo_id.into(),
            thumbnail_url: na(),
            image_url: na(),
            photo_page_url: na(),
            registration: na(),
            registration_url: na(),
            aircraft_type: na(),
            airline: na(),
            airline_url: na(),
            photographer: na(),
            photographer_url: na(),
            location: na(),
            location_url: na(),
            photo_date: na(),
            uploaded_date: na(),
            likes: 0,
            comments: 0,
            views: 0,
        }
    }

    /// Apply the normalization every emitted record goes through.
    ///
    /// The aircraft type is sanitized like any other value, so an untouched `"N/A"` becomes
    /// `"NA"`.
    pub(crate) fn seal(&mut self) {
        self.aircraft_type = sanitize_aircraft_type(&self.aircraft_type);
    }
}

/// Remove path-unsafe characters and surrounding whitespace from an aircraft type.
///
/// Returns [UNKNOWN_AIRCRAFT] if nothing is left.
///
/// ```
/// use jetphotos_extract::sanitize_aircraft_type;
///
/// assert_eq!(sanitize_aircraft_type("A/B:C*"), "ABC");
/// assert_eq!(sanitize_aircraft_type(" /?/ "), "Unknown");
/// ```
#[must_use]
pub fn sanitize_aircraft_type(value: &str) -> String {
    let cleaned: String = value.chars().filter(|c| !PATH_UNSAFE.contains(c)).collect();
    match cleaned.trim() {
        "" => UNKNOWN_AIRCRAFT.to_owned(),
        trimmed => trimmed.to_owned(),
    }
}

fn as_decimal_string<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
