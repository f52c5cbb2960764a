//! Tokenizer
//!
//! Splits extracted text into lowercase word tokens: maximal runs of
//! alphanumeric or underscore characters, everything else a separator.

/// Returns a lazy token iterator over `text`.
///
/// Restartable: calling `tokenize` again on the same text yields the same
/// sequence from the start.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { text, pos: 0 }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// == Tokens Iterator ==
/// Lazy iterator over lowercase word tokens.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut start = None;

        for (offset, c) in self.text[self.pos..].char_indices() {
            let abs = self.pos + offset;
            if is_word_char(c) {
                if start.is_none() {
                    start = Some(abs);
                }
            } else if let Some(begin) = start {
                self.pos = abs;
                return Some(self.text[begin..abs].to_lowercase());
            }
        }

        // Tail token or exhausted input
        let begin = start?;
        let token = self.text[begin..].to_lowercase();
        self.pos = self.text.len();
        Some(token)
    }
}
