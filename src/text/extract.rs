//! Structured XML Extraction
//!
//! Pulls the text of paragraph (`<P>`) elements out of an upstream title
//! document and concatenates it with single spaces. Requires the full document
//! in memory; the streaming path exists for when that is too expensive.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::ExtractError;

/// Extracts paragraph text from an XML document body.
///
/// Text inside nested markup within a paragraph is included. Text outside any
/// `<P>` element (headings, authority notes, tag soup) is ignored. Invalid
/// UTF-8 is replaced rather than rejected, since upstream documents are
/// nominally UTF-8 but not guaranteed clean.
pub fn extract_paragraph_text(body: &[u8]) -> Result<String, ExtractError> {
    let document = String::from_utf8_lossy(body);
    let mut reader = Reader::from_str(&document);
    reader.trim_text(true);

    let mut out = String::new();
    let mut paragraph_depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"P" => paragraph_depth += 1,
            Event::End(e) if e.name().as_ref() == b"P" => {
                paragraph_depth = paragraph_depth.saturating_sub(1);
            }
            Event::Text(t) if paragraph_depth > 0 => {
                let text = t.unescape()?;
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push_str(trimmed);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}
