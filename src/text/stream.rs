//! Streaming-Approximate Word Count
//!
//! Counts whitespace-separated tokens per raw byte chunk without parsing the
//! document, caps the chunks consumed, and scales the naive count down by an
//! empirical factor. The factor corrects for XML tags inflating the raw count;
//! it is a preserved calibration constant, not something derived here, and the
//! approximation is the accepted trade-off for bounded memory.

use futures::StreamExt;

use crate::error::FetchError;
use crate::upstream::ByteStream;

/// Approximates the word count of a streamed document body.
///
/// Consumes at most `max_chunks` chunks, counts tokens naively per chunk, and
/// returns `floor(raw_count * scaling_factor)`. A mid-stream transport error
/// aborts the count; the caller degrades to its documented default.
pub async fn approximate_word_count(
    mut stream: ByteStream,
    max_chunks: usize,
    scaling_factor: f64,
) -> Result<u64, FetchError> {
    let mut raw_count: u64 = 0;
    let mut chunks = 0usize;

    while chunks < max_chunks {
        let Some(chunk) = stream.next().await else {
            break;
        };
        raw_count += count_whitespace_tokens(&chunk?) as u64;
        chunks += 1;
    }

    Ok((raw_count as f64 * scaling_factor).floor() as u64)
}

/// Counts runs of non-whitespace bytes in a chunk.
///
/// A token split across a chunk boundary counts twice; that inaccuracy is part
/// of the approximation the scaling factor was calibrated against.
fn count_whitespace_tokens(chunk: &[u8]) -> usize {
    chunk
        .split(|b| b.is_ascii_whitespace())
        .filter(|run| !run.is_empty())
        .count()
}
