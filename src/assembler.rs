//! The record assembler: a small state machine fed with start tags, end tags and text, in
//! document order.
//!
//! It keeps a stack of open elements so that end tags can be paired with their start tags.
//! Elements that matter carry a [Finalizer], which runs once when the element closes, after the
//! finalizers of everything nested inside it.
use tracing::{debug, trace, warn};

use crate::accumulator::AccumulatorState;
use crate::config::SiteConfig;
use crate::element::{Element, Marker};
use crate::extractors;
use crate::record::PhotoRecord;
use crate::scopes::{implied_ends, is_void};

/// Deferred action attached to an open element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Finalizer {
    Record,
    InfoItem,
    InfoLink,
    Stat,
}

#[derive(Debug)]
struct OpenElement {
    name: String,
    finalizer: Option<Finalizer>,
}

/// Turns the events of one document into [PhotoRecord]s.
#[derive(Debug)]
pub(crate) struct RecordAssembler<'a> {
    site: &'a SiteConfig,
    current: Option<PhotoRecord>,
    open_elements: Vec<OpenElement>,
    accumulators: AccumulatorState,
    records: Vec<PhotoRecord>,
}

impl<'a> RecordAssembler<'a> {
    pub fn new(site: &'a SiteConfig) -> Self {
        RecordAssembler {
            site,
            current: None,
            open_elements: Vec::new(),
            accumulators: AccumulatorState::default(),
            records: Vec::new(),
        }
    }

    pub fn start_tag(&mut self, element: &Element) {
        for implied in implied_ends(&element.name) {
            self.close_in_scope(implied.name, implied.scope);
        }

        let finalizer = match Marker::classify(element, self.accumulators.in_info()) {
            Some(marker) => self.on_marker(marker, element),
            None => None,
        };

        if is_void(&element.name) {
            // nothing will ever close it
            if let Some(finalizer) = finalizer {
                self.run(finalizer);
            }
            return;
        }

        self.open_elements.push(OpenElement {
            name: element.name.clone(),
            finalizer,
        });
    }

    /// Close the innermost open element called `name`, and everything opened after it.
    pub fn end_tag(&mut self, name: &str) {
        match self.open_elements.iter().rposition(|open| open.name == name) {
            Some(index) => self.close_down_to(index),
            None => trace!("ignoring stray end tag </{}>", name),
        }
    }

    pub fn text(&mut self, text: &str) {
        self.accumulators.push_text(text);
    }

    /// End of input. Elements still open are dropped without running their finalizers, so a
    /// record whose container never closed is not emitted.
    pub fn finish(self) -> Vec<PhotoRecord> {
        if let Some(record) = self.current {
            debug!(photo_id = %record.photo_id, "dropping unterminated record");
        }
        self.records
    }

    fn on_marker(&mut self, marker: Marker, element: &Element) -> Option<Finalizer> {
        if let Marker::RecordStart(photo_id) = marker {
            self.start_record(photo_id);
            return Some(Finalizer::Record);
        }

        let record = self.current.as_mut()?;
        match marker {
            Marker::RecordStart(_) => unreachable!(),
            Marker::PrimaryImage => {
                extractors::primary_image(record, element);
                None
            }
            Marker::PhotoLink => {
                extractors::photo_link(record, element, self.site);
                None
            }
            Marker::InfoItem => {
                self.accumulators.open_info();
                Some(Finalizer::InfoItem)
            }
            Marker::InfoLink => {
                self.accumulators.open_link(element.attribute("href"));
                Some(Finalizer::InfoLink)
            }
            Marker::Stat => {
                self.accumulators.open_stat();
                Some(Finalizer::Stat)
            }
        }
    }

    fn start_record(&mut self, photo_id: String) {
        if let Some(stale) = &self.current {
            warn!(
                stale = %stale.photo_id,
                new = %photo_id,
                "photo container opened inside another one, closing the outer record early"
            );
            self.finish_record();
        }

        trace!(%photo_id, "opening record");
        self.current = Some(PhotoRecord::new(photo_id));
    }

    fn finish_record(&mut self) {
        if let Some(mut record) = self.current.take() {
            record.seal();
            debug!(photo_id = %record.photo_id, "emitting record");
            self.records.push(record);
        }
    }

    fn run(&mut self, finalizer: Finalizer) {
        match finalizer {
            Finalizer::Record => self.finish_record(),
            Finalizer::InfoItem => {
                let capture = self.accumulators.take_info();
                if let (Some(record), Some(capture)) = (self.current.as_mut(), capture) {
                    extractors::detail_item(record, &capture, self.site);
                }
            }
            Finalizer::InfoLink => self.accumulators.close_link(),
            Finalizer::Stat => {
                let text = self.accumulators.take_stat();
                if let (Some(record), Some(text)) = (self.current.as_mut(), text) {
                    extractors::statistic(record, &text);
                }
            }
        }
    }

    fn close_down_to(&mut self, index: usize) {
        while self.open_elements.len() > index {
            if let Some(finalizer) = self.open_elements.pop().and_then(|open| open.finalizer) {
                self.run(finalizer);
            }
        }
    }

    /// Implicitly close `name` if it is open and no element matching `scope` sits above it.
    fn close_in_scope(&mut self, name: &str, scope: fn(&str) -> bool) {
        for index in (0..self.open_elements.len()).rev() {
            let open = &self.open_elements[index].name;
            if open == name {
                trace!("implicitly closing <{}>", name);
                self.close_down_to(index);
                return;
            }
            if scope(open) {
                return;
            }
        }
    }
}
