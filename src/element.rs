//! Start tags as seen by the extractors, and the markup patterns they are matched against.

/// A start tag with all of its attributes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Element {
    pub name: String,
    attributes: Vec<(String, String)>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute. Like in HTML, the first occurrence of a duplicate attribute wins.
    ///
    /// Returns `false` if the attribute was already present and nothing was added.
    pub fn push_attribute(&mut self, name: String, value: String) -> bool {
        if self.attribute(&name).is_some() {
            return false;
        }
        self.attributes.push((name, value));
        true
    }

    /// Append to the value of an attribute that was already pushed.
    pub fn extend_attribute(&mut self, name: &str, value: &str) {
        if let Some((_, existing)) = self.attributes.iter_mut().find(|(n, _)| n == name) {
            existing.push_str(value);
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Like [Element::attribute], but treats an empty value as missing.
    pub fn non_empty_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).filter(|v| !v.is_empty())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .map_or(false, |classes| classes.split_ascii_whitespace().any(|c| c == class))
    }
}

/// The markup patterns the extractors are bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Marker {
    /// `div[data-photo]`, carrying the photo identifier.
    RecordStart(String),
    /// `img.result__photo`
    PrimaryImage,
    /// `a.result__photoLink`
    PhotoLink,
    /// `.result__infoListText`
    InfoItem,
    /// `.result__infoListText a`
    InfoLink,
    /// `.result__stat`
    Stat,
}

impl Marker {
    /// Find the pattern a start tag matches, if any. `in_info_item` tells whether a detail-list
    /// item is open, which is the only ancestor any pattern depends on.
    pub fn classify(element: &Element, in_info_item: bool) -> Option<Marker> {
        if element.name == "div" {
            if let Some(id) = element.attribute("data-photo") {
                return Some(Marker::RecordStart(id.to_owned()));
            }
        }

        if element.name == "img" && element.has_class("result__photo") {
            Some(Marker::PrimaryImage)
        } else if element.name == "a" && element.has_class("result__photoLink") {
            Some(Marker::PhotoLink)
        } else if element.has_class("result__infoListText") {
            Some(Marker::InfoItem)
        } else if element.name == "a" && in_info_item {
            Some(Marker::InfoLink)
        } else if element.has_class("result__stat") {
            Some(Marker::Stat)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(name: &str, attributes: &[(&str, &str)]) -> Element {
        let mut element = Element::new(name);
        for (name, value) in attributes {
            element.push_attribute((*name).to_owned(), (*value).to_owned());
        }
        element
    }

    #[test]
    fn classes_are_tokens() {
        let img = element("img", &[("class", "lazy  result__photo\tbig")]);
        assert!(img.has_class("result__photo"));
        assert!(!img.has_class("result__"));
        assert_eq!(Marker::classify(&img, false), Some(Marker::PrimaryImage));
    }

    #[test]
    fn duplicate_attributes() {
        let div = element("div", &[("data-photo", "1"), ("data-photo", "2")]);
        assert_eq!(
            Marker::classify(&div, false),
            Some(Marker::RecordStart("1".to_owned()))
        );
        let mut img = Element::new("img");
        assert!(img.push_attribute("src".to_owned(), "a".to_owned()));
        assert!(!img.push_attribute("src".to_owned(), "b".to_owned()));
        assert_eq!(img.attribute("src"), Some("a"));
    }

    #[test]
    fn record_start_needs_a_div() {
        let span = element("span", &[("data-photo", "1")]);
        assert_eq!(Marker::classify(&span, false), None);
        let empty_id = element("div", &[("data-photo", "")]);
        assert_eq!(
            Marker::classify(&empty_id, false),
            Some(Marker::RecordStart(String::new()))
        );
    }

    #[test]
    fn anchors_depend_on_context() {
        let a = element("a", &[("href", "/x")]);
        assert_eq!(Marker::classify(&a, false), None);
        assert_eq!(Marker::classify(&a, true), Some(Marker::InfoLink));

        let photo_link = element("a", &[("class", "result__photoLink"), ("href", "/p")]);
        assert_eq!(Marker::classify(&photo_link, true), Some(Marker::PhotoLink));
    }

    #[test]
    fn regions_on_any_element() {
        let li = element("li", &[("class", "result__infoListText")]);
        assert_eq!(Marker::classify(&li, false), Some(Marker::InfoItem));
        let span = element("span", &[("class", "result__stat")]);
        assert_eq!(Marker::classify(&span, false), Some(Marker::Stat));
    }
}
