//! Drive the html5gum tokenizer and feed its events into the record assembler.
//!
//! html5gum splits a start tag into several events (`OpenStartTag`, then `AttributeName` and
//! `AttributeValue` pairs, then `CloseStartTag`). They are folded back into one [Element] here,
//! so that extractors see every attribute of a tag at once.
use std::convert::Infallible;

use html5gum::emitters::callback::{CallbackEmitter, CallbackEvent};
use html5gum::Tokenizer;
use tracing::trace;

use crate::assembler::RecordAssembler;
use crate::config::SiteConfig;
use crate::element::Element;
use crate::record::PhotoRecord;

/// Extracts [PhotoRecord]s from search result pages.
///
/// ```
/// use jetphotos_extract::Extractor;
///
/// let html = r#"
///     <div data-photo="123">
///         <img class="result__photo" src="//cdn.example/x/400/y.jpg" alt="N1 - Airbus A320 - Example Air">
///         <span class="result__stat">Views: 7</span>
///     </div>
/// "#;
///
/// let photos = Extractor::default().extract(html);
/// assert_eq!(photos.len(), 1);
/// assert_eq!(photos[0].photo_id, "123");
/// assert_eq!(photos[0].image_url, "https://cdn.example/x/full/y.jpg");
/// assert_eq!(photos[0].views, 7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    site: SiteConfig,
}

impl Extractor {
    /// Create an extractor that resolves links against the given site.
    #[must_use]
    pub fn new(site: SiteConfig) -> Self {
        Extractor { site }
    }

    /// The site links are resolved against.
    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Run one pass over `html` and return the records in document order.
    ///
    /// This never fails. Markup that does not match the expected shape simply produces fewer
    /// records or records with default values.
    pub fn extract(&self, html: &str) -> Vec<PhotoRecord> {
        let mut assembler = RecordAssembler::new(&self.site);
        let mut events = EventFolder::default();

        let mut emitter =
            CallbackEmitter::new(|event: CallbackEvent<'_>| -> Option<Infallible> {
                events.handle(event, &mut assembler);
                None
            });
        // treat <script>, <style> and friends as text, so their contents cannot open or close
        // elements
        emitter.naively_switch_states(true);

        for token in Tokenizer::new_with_emitter(html, emitter) {
            match token {
                Ok(never) | Err(never) => match never {},
            }
        }

        assembler.finish()
    }
}

/// Extract records from `html` using the live site's origin for links.
///
/// Shorthand for `Extractor::default().extract(html)`.
pub fn extract_photos(html: &str) -> Vec<PhotoRecord> {
    Extractor::default().extract(html)
}

/// Folds start tag events back into whole elements.
#[derive(Debug, Default)]
struct EventFolder {
    element: Element,
    /// The attribute whose value is being read, `None` while skipping a duplicate.
    attribute_name: Option<String>,
}

impl EventFolder {
    fn handle(&mut self, event: CallbackEvent<'_>, assembler: &mut RecordAssembler<'_>) {
        match event {
            CallbackEvent::OpenStartTag { name } => {
                self.element = Element::new(String::from_utf8_lossy(name));
                self.attribute_name = None;
            }
            CallbackEvent::AttributeName { name } => {
                let name = String::from_utf8_lossy(name).into_owned();
                let inserted = self.element.push_attribute(name.clone(), String::new());
                self.attribute_name = Some(name).filter(|_| inserted);
            }
            CallbackEvent::AttributeValue { value } => {
                if let Some(name) = &self.attribute_name {
                    self.element
                        .extend_attribute(name, &String::from_utf8_lossy(value));
                }
            }
            CallbackEvent::CloseStartTag { .. } => {
                let element = std::mem::take(&mut self.element);
                assembler.start_tag(&element);
            }
            CallbackEvent::EndTag { name } => {
                assembler.end_tag(&String::from_utf8_lossy(name));
            }
            CallbackEvent::String { value } => {
                assembler.text(&String::from_utf8_lossy(value));
            }
            CallbackEvent::Error(error) => {
                trace!(?error, "tolerating parse error");
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NOT_AVAILABLE;
    use pretty_assertions::assert_eq;

    #[test]
    fn attributes_are_folded_into_the_element() {
        let html = r#"<div data-photo="9"><a class="result__photoLink" id=x href="/photo/9">x</a></div>"#;
        let photos = extract_photos(html);
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].photo_page_url, "https://www.jetphotos.com/photo/9");
    }

    #[test]
    fn first_duplicate_attribute_wins() {
        let html = r#"<div data-photo="1" data-photo="2">
            <img class="result__photo" src="//a/400/x.jpg" src="//b/400/y.jpg">
        </div>"#;
        let photos = extract_photos(html);
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].photo_id, "1");
        assert_eq!(photos[0].thumbnail_url, "https://a/400/x.jpg");
        assert_eq!(photos[0].image_url, "https://a/full/x.jpg");
    }

    #[test]
    fn entities_are_decoded() {
        let html = r#"<div data-photo="1">
            <span class="result__infoListText">Airline: <a href="/airline/A&amp;B">A&amp;B Air</a></span>
        </div>"#;
        let photos = extract_photos(html);
        assert_eq!(photos[0].airline, "A&B Air");
        assert_eq!(photos[0].airline_url, "https://www.jetphotos.com/airline/A&B");
    }

    #[test]
    fn script_contents_are_text() {
        let html = r#"<div data-photo="1"><script>if (a<b) { document.write("</div>") }</script>
            <span class="result__stat">Likes: 5</span></div>"#;
        let photos = extract_photos(html);
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].likes, 5);
    }

    #[test]
    fn uppercase_markup() {
        let html = r#"<DIV DATA-PHOTO="1"><IMG CLASS="result__photo" SRC="//x/400/y.jpg"></DIV>"#;
        let photos = extract_photos(html);
        assert_eq!(photos[0].thumbnail_url, "https://x/400/y.jpg");
        assert_eq!(photos[0].photo_page_url, NOT_AVAILABLE);
    }

    #[test]
    fn custom_site() {
        let site = SiteConfig::new("http://localhost:1234").unwrap();
        let html = r#"<div data-photo="1"><a class="result__photoLink" href="/photo/1"></a></div>"#;
        let photos = Extractor::new(site).extract(html);
        assert_eq!(photos[0].photo_page_url, "http://localhost:1234/photo/1");
    }
}
