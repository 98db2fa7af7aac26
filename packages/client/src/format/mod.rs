//! Display formatting of raw API responses

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

/// Turns raw response text into display text.
pub trait ResponseFormatter {
    fn format(&self, raw: &str) -> String;
}

/// Re-indents XML bodies; anything that is not well-formed XML passes
/// through unchanged.
#[derive(Debug, Clone, Copy)]
pub struct XmlFormatter {
    indent: usize,
}

impl XmlFormatter {
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    fn pretty(&self, raw: &str) -> Option<String> {
        let mut reader = Reader::from_str(raw);
        reader.config_mut().trim_text(true);
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', self.indent);
        let mut saw_element = false;

        loop {
            match reader.read_event().ok()? {
                Event::Eof => break,
                event => {
                    saw_element |= matches!(event, Event::Start(_) | Event::Empty(_));
                    writer.write_event(event).ok()?;
                }
            }
        }

        if !saw_element {
            return None;
        }
        String::from_utf8(writer.into_inner()).ok()
    }
}

impl Default for XmlFormatter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl ResponseFormatter for XmlFormatter {
    fn format(&self, raw: &str) -> String {
        self.pretty(raw).unwrap_or_else(|| raw.to_string())
    }
}

/// Leaves the text as received.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFormatter;

impl ResponseFormatter for RawFormatter {
    fn format(&self, raw: &str) -> String {
        raw.to_string()
    }
}
