//! The field extraction rules.
//!
//! Each rule is a plain function that reads a start tag or a finished text buffer and writes
//! into the current record. None of them fail: whatever the markup does not provide keeps its
//! default.
use crate::accumulator::{InfoCapture, TextBuffer};
use crate::config::SiteConfig;
use crate::element::Element;
use crate::record::{PhotoRecord, NOT_AVAILABLE};

/// Record fields that a detail-list item can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DetailField {
    Registration,
    Aircraft,
    Airline,
    Location,
    PhotoDate,
    Uploaded,
    Photographer,
}

/// One row of the label table.
#[derive(Debug)]
pub(crate) struct LabelRule {
    /// Any of these substrings selects the rule. All of them are stripped from the value.
    pub labels: &'static [&'static str],
    pub field: DetailField,
}

/// Detail-list labels in priority order. The first rule with a label contained in the item's
/// text decides both how the value is cleaned and which field it goes to.
pub(crate) const DETAIL_LABELS: &[LabelRule] = &[
    LabelRule {
        labels: &["Reg:"],
        field: DetailField::Registration,
    },
    LabelRule {
        labels: &["Aircraft:"],
        field: DetailField::Aircraft,
    },
    LabelRule {
        labels: &["Airline:"],
        field: DetailField::Airline,
    },
    LabelRule {
        labels: &["Location:"],
        field: DetailField::Location,
    },
    LabelRule {
        labels: &["Photo date:"],
        field: DetailField::PhotoDate,
    },
    LabelRule {
        labels: &["Uploaded:"],
        field: DetailField::Uploaded,
    },
    LabelRule {
        labels: &["By:", "Photographer:"],
        field: DetailField::Photographer,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Counter {
    Likes,
    Comments,
    Views,
}

/// Statistics labels in priority order.
pub(crate) const STAT_LABELS: &[(&str, Counter)] = &[
    ("Likes:", Counter::Likes),
    ("Comments:", Counter::Comments),
    ("Views:", Counter::Views),
];

/// `img.result__photo`: image URLs, plus provisional registration, aircraft type and airline
/// from an alt text shaped like `"N123AB - Boeing 737 - Example Air"`.
pub(crate) fn primary_image(record: &mut PhotoRecord, element: &Element) {
    if let Some(src) = element.non_empty_attribute("src") {
        record.thumbnail_url = if src.starts_with("//") {
            format!("https:{}", src)
        } else {
            src.to_owned()
        };
        record.image_url = record.thumbnail_url.replacen("/400/", "/full/", 1);
    }

    if let Some(alt) = element.non_empty_attribute("alt") {
        let parts: Vec<&str> = alt.split('-').map(str::trim).collect();
        if let [registration, aircraft_type, airline, ..] = parts[..] {
            record.registration = registration.to_owned();
            record.aircraft_type = aircraft_type.to_owned();
            record.airline = airline.to_owned();
        }
    }
}

/// `a.result__photoLink`: the photo's own page.
pub(crate) fn photo_link(record: &mut PhotoRecord, element: &Element, site: &SiteConfig) {
    if let Some(href) = element.non_empty_attribute("href") {
        record.photo_page_url = site.resolve(href);
    }
}

/// Runs when a `.result__infoListText` region closes.
pub(crate) fn detail_item(record: &mut PhotoRecord, capture: &InfoCapture, site: &SiteConfig) {
    let full_text = capture.full_text.as_str().trim();
    let rule = match DETAIL_LABELS
        .iter()
        .find(|rule| rule.labels.iter().any(|label| full_text.contains(label)))
    {
        Some(rule) => rule,
        None => return,
    };

    let value = if capture.link.text.is_empty() {
        strip_labels(full_text, rule)
    } else {
        capture.link.text.as_str().trim().to_owned()
    };

    let url = || {
        if capture.link.href.is_empty() {
            NOT_AVAILABLE.to_owned()
        } else {
            site.resolve(&capture.link.href)
        }
    };

    match rule.field {
        DetailField::Registration => {
            record.registration = value;
            record.registration_url = url();
        }
        DetailField::Aircraft => record.aircraft_type = value,
        DetailField::Airline => {
            record.airline = value;
            record.airline_url = url();
        }
        DetailField::Location => {
            record.location = value;
            record.location_url = url();
        }
        DetailField::PhotoDate => record.photo_date = value,
        DetailField::Uploaded => record.uploaded_date = value,
        DetailField::Photographer => {
            record.photographer = value;
            record.photographer_url = url();
        }
    }
}

/// The value of a detail-list item without a link: the text minus its label. Registrations are
/// cut to their first word, since the site appends extra notes to them.
fn strip_labels(full_text: &str, rule: &LabelRule) -> String {
    let mut value = full_text.to_owned();
    for label in rule.labels {
        value = value.replacen(label, "", 1);
    }

    let value = value.trim();
    match rule.field {
        DetailField::Registration => value.split_whitespace().next().unwrap_or_default().to_owned(),
        _ => value.to_owned(),
    }
}

/// Runs when a `.result__stat` region closes.
pub(crate) fn statistic(record: &mut PhotoRecord, text: &TextBuffer) {
    let text = text.as_str();
    let counter = match STAT_LABELS.iter().find(|(label, _)| text.contains(label)) {
        Some(&(_, counter)) => counter,
        None => return,
    };

    let value = first_number(text);
    match counter {
        Counter::Likes => record.likes = value,
        Counter::Comments => record.comments = value,
        Counter::Views => record.views = value,
    }
}

/// The first run of ASCII digits in `text`, 0 if there is none. Saturates instead of
/// overflowing.
fn first_number(text: &str) -> u64 {
    let digits = text
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or_default();

    if digits.is_empty() {
        0
    } else {
        digits.parse().unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::AccumulatorState;
    use pretty_assertions::assert_eq;

    fn img(attributes: &[(&str, &str)]) -> Element {
        let mut element = Element::new("img");
        for (name, value) in attributes {
            element.push_attribute((*name).to_owned(), (*value).to_owned());
        }
        element
    }

    /// Build the capture of a detail-list item: `before` text, an optional link, `after` text.
    fn capture(before: &str, link: Option<(&str, &str)>, after: &str) -> InfoCapture {
        let mut state = AccumulatorState::default();
        state.open_info();
        state.push_text(before);
        if let Some((href, text)) = link {
            state.open_link(Some(href));
            state.push_text(text);
            state.close_link();
        }
        state.push_text(after);
        state.take_info().unwrap()
    }

    fn stat(text: &str) -> TextBuffer {
        let mut buffer = TextBuffer::default();
        buffer.push(text);
        buffer
    }

    #[test]
    fn protocol_relative_src() {
        let mut record = PhotoRecord::new("1");
        primary_image(&mut record, &img(&[("src", "//cdn.example/x/400/y.jpg")]));
        assert_eq!(record.thumbnail_url, "https://cdn.example/x/400/y.jpg");
        assert_eq!(record.image_url, "https://cdn.example/x/full/y.jpg");
    }

    #[test]
    fn src_without_size_segment() {
        let mut record = PhotoRecord::new("1");
        primary_image(&mut record, &img(&[("src", "https://cdn.example/y.jpg")]));
        assert_eq!(record.thumbnail_url, "https://cdn.example/y.jpg");
        assert_eq!(record.image_url, "https://cdn.example/y.jpg");
    }

    #[test]
    fn alt_text() {
        let mut record = PhotoRecord::new("1");
        primary_image(
            &mut record,
            &img(&[("alt", "N123AB - Boeing 737 - Example Air")]),
        );
        assert_eq!(record.registration, "N123AB");
        assert_eq!(record.aircraft_type, "Boeing 737");
        assert_eq!(record.airline, "Example Air");
        assert_eq!(record.thumbnail_url, NOT_AVAILABLE);
    }

    #[test]
    fn short_alt_text_is_ignored() {
        let mut record = PhotoRecord::new("1");
        primary_image(&mut record, &img(&[("alt", "N123AB - Boeing 737")]));
        assert_eq!(record.registration, NOT_AVAILABLE);
        assert_eq!(record.aircraft_type, NOT_AVAILABLE);
    }

    #[test]
    fn registration_without_link() {
        let mut record = PhotoRecord::new("1");
        detail_item(
            &mut record,
            &capture("  Reg: N123AB (cn 1234) ", None, ""),
            &SiteConfig::default(),
        );
        assert_eq!(record.registration, "N123AB");
        assert_eq!(record.registration_url, NOT_AVAILABLE);
    }

    #[test]
    fn airline_with_link() {
        let mut record = PhotoRecord::new("1");
        detail_item(
            &mut record,
            &capture("Airline: ", Some(("/airline/Example+Air", " Example Air ")), ""),
            &SiteConfig::default(),
        );
        assert_eq!(record.airline, "Example Air");
        assert_eq!(
            record.airline_url,
            "https://www.jetphotos.com/airline/Example+Air"
        );
    }

    #[test]
    fn link_with_blank_text_yields_empty_value() {
        let mut record = PhotoRecord::new("1");
        detail_item(
            &mut record,
            &capture("Location: Somewhere ", Some(("/location/x", "  ")), ""),
            &SiteConfig::default(),
        );
        assert_eq!(record.location, "");
        assert_eq!(record.location_url, "https://www.jetphotos.com/location/x");
    }

    #[test]
    fn first_label_wins() {
        let mut record = PhotoRecord::new("1");
        detail_item(
            &mut record,
            &capture("Airline: Reg: Example Air", None, ""),
            &SiteConfig::default(),
        );
        assert_eq!(record.registration, "Airline:");
        assert_eq!(record.airline, NOT_AVAILABLE);
    }

    #[test]
    fn photographer_labels() {
        let site = SiteConfig::default();
        let mut record = PhotoRecord::new("1");
        detail_item(&mut record, &capture("Photographer: Jane Doe", None, ""), &site);
        assert_eq!(record.photographer, "Jane Doe");
        assert_eq!(record.photographer_url, NOT_AVAILABLE);

        detail_item(
            &mut record,
            &capture("By: ", Some(("/photographer/7", "John Roe")), ""),
            &site,
        );
        assert_eq!(record.photographer, "John Roe");
        assert_eq!(record.photographer_url, "https://www.jetphotos.com/photographer/7");
    }

    #[test]
    fn dates_and_aircraft() {
        let site = SiteConfig::default();
        let mut record = PhotoRecord::new("1");
        detail_item(&mut record, &capture("Photo date: 2024-05-01", None, ""), &site);
        detail_item(&mut record, &capture("Uploaded: 2024-05-03", None, ""), &site);
        detail_item(&mut record, &capture("Aircraft: Airbus A320", None, ""), &site);
        assert_eq!(record.photo_date, "2024-05-01");
        assert_eq!(record.uploaded_date, "2024-05-03");
        assert_eq!(record.aircraft_type, "Airbus A320");
    }

    #[test]
    fn unlabeled_item_is_ignored() {
        let mut record = PhotoRecord::new("1");
        let before = record.clone();
        detail_item(
            &mut record,
            &capture("Serial: 1234", Some(("/x", "x")), ""),
            &SiteConfig::default(),
        );
        assert_eq!(record, before);
    }

    #[test]
    fn counters() {
        let mut record = PhotoRecord::new("1");
        statistic(&mut record, &stat("Likes: 42"));
        statistic(&mut record, &stat("\n  Comments:\n  3 "));
        statistic(&mut record, &stat("Views: none"));
        assert_eq!(record.likes, 42);
        assert_eq!(record.comments, 3);
        assert_eq!(record.views, 0);
    }

    #[test]
    fn unlabeled_counter_is_ignored() {
        let mut record = PhotoRecord::new("1");
        statistic(&mut record, &stat("Favourites: 9"));
        assert_eq!(record, PhotoRecord::new("1"));
    }

    #[test]
    fn numbers() {
        assert_eq!(first_number("Views: 1,234"), 1);
        assert_eq!(first_number("007"), 7);
        assert_eq!(first_number(""), 0);
        assert_eq!(first_number("99999999999999999999999"), u64::MAX);
    }
}
