//! Text Extraction & Tokenization Module
//!
//! Two ways to turn an upstream XML document into word counts:
//!
//! - **Structured**: parse the whole document, pull paragraph text, and yield a
//!   restartable stream of lowercase tokens. Accurate, needs the full body in
//!   memory.
//! - **Streaming-approximate**: split raw byte chunks on whitespace, cap the
//!   chunks consumed, and scale the naive count down to correct for XML tag
//!   noise. Bounded memory, approximate by design.

mod extract;
mod stream;
mod tokenize;

pub use extract::extract_paragraph_text;
pub use stream::approximate_word_count;
pub use tokenize::{tokenize, Tokens};
