//! Text buffers that collect the character data of one region between its start and end tag.

/// An append-only text buffer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct TextBuffer(String);

impl TextBuffer {
    pub fn push(&mut self, text: &str) {
        self.0.push_str(text);
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The most recent link seen inside a detail-list item.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct LinkCapture {
    /// Raw `href`, empty if the anchor had none.
    pub href: String,
    pub text: TextBuffer,
}

/// State of the detail-list item currently open.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct InfoCapture {
    pub full_text: TextBuffer,
    pub link: LinkCapture,
    inside_link: bool,
}

/// All buffers owned by the record assembler.
///
/// Both the full text and the link text of a detail-list item accumulate while inside the
/// item's anchor.
#[derive(Debug, Default)]
pub(crate) struct AccumulatorState {
    info: Option<InfoCapture>,
    stat: Option<TextBuffer>,
}

impl AccumulatorState {
    pub fn open_info(&mut self) {
        self.info = Some(InfoCapture::default());
    }

    pub fn in_info(&self) -> bool {
        self.info.is_some()
    }

    pub fn take_info(&mut self) -> Option<InfoCapture> {
        self.info.take()
    }

    /// Start capturing a new link. Returns false if no detail-list item is open.
    pub fn open_link(&mut self, href: Option<&str>) -> bool {
        match self.info {
            Some(ref mut info) => {
                info.link = LinkCapture {
                    href: href.unwrap_or_default().to_owned(),
                    text: TextBuffer::default(),
                };
                info.inside_link = true;
                true
            }
            None => false,
        }
    }

    pub fn close_link(&mut self) {
        if let Some(ref mut info) = self.info {
            info.inside_link = false;
        }
    }

    pub fn open_stat(&mut self) {
        self.stat = Some(TextBuffer::default());
    }

    pub fn take_stat(&mut self) -> Option<TextBuffer> {
        self.stat.take()
    }

    pub fn push_text(&mut self, text: &str) {
        if let Some(ref mut info) = self.info {
            info.full_text.push(text);
            if info.inside_link && !info.link.href.is_empty() {
                info.link.text.push(text);
            }
        }

        if let Some(ref mut stat) = self.stat {
            stat.push(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_text_only_inside_anchor() {
        let mut state = AccumulatorState::default();
        state.open_info();
        state.push_text("Airline: ");
        assert!(state.open_link(Some("/airline/x")));
        state.push_text("Example Air");
        state.close_link();
        state.push_text(" (more)");

        let info = state.take_info().unwrap();
        assert_eq!(info.full_text.as_str(), "Airline: Example Air (more)");
        assert_eq!(info.link.text.as_str(), "Example Air");
        assert_eq!(info.link.href, "/airline/x");
        assert!(!state.in_info());
    }

    #[test]
    fn anchor_without_href_collects_no_link_text() {
        let mut state = AccumulatorState::default();
        state.open_info();
        state.open_link(None);
        state.push_text("Reg: N1");
        let info = state.take_info().unwrap();
        assert!(info.link.text.is_empty());
        assert_eq!(info.full_text.as_str(), "Reg: N1");
    }

    #[test]
    fn last_link_wins() {
        let mut state = AccumulatorState::default();
        state.open_info();
        state.open_link(Some("/first"));
        state.push_text("first");
        state.close_link();
        state.open_link(Some("/second"));
        state.push_text("second");
        let info = state.take_info().unwrap();
        assert_eq!(info.link.href, "/second");
        assert_eq!(info.link.text.as_str(), "second");
    }

    #[test]
    fn no_link_outside_item() {
        let mut state = AccumulatorState::default();
        assert!(!state.open_link(Some("/x")));
        state.open_stat();
        state.push_text("Views: 7");
        assert_eq!(state.take_stat().unwrap().as_str(), "Views: 7");
        assert!(state.take_stat().is_none());
    }
}
