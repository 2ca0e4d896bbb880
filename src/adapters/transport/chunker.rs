//! Long-message splitting for transports with a per-message size limit.
//!
//! A digest that fits the platform limit goes out untouched. Anything
//! longer is split preferentially at entry separators so one hotel never
//! straddles two messages, and each piece gets a "Часть i/n" header. A
//! single block longer than the chunk budget is hard-split on character
//! boundaries as the last resort.

use crate::domain::search::ENTRY_SEPARATOR;

/// Splits `text` into transport-sized messages.
///
/// `max_chars` is the hard platform limit; `chunk_chars` is the target size
/// of each piece, kept below the limit to leave room for the part header.
pub fn split_message(text: &str, max_chars: usize, chunk_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for block in blocks(text) {
        let block_len = block.chars().count();

        if current_len + block_len > chunk_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if block_len > chunk_chars {
            for piece in hard_split(block, chunk_chars) {
                chunks.push(piece);
            }
            continue;
        }

        current.push_str(block);
        current_len += block_len;
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    let total = chunks.len();
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| format!("📄 Часть {}/{}:\n\n{}", i + 1, total, chunk.trim_start()))
        .collect()
}

/// Splits the text after each separator line, keeping the separator with
/// the block it closes.
fn blocks(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find(ENTRY_SEPARATOR) {
        let end = pos + ENTRY_SEPARATOR.len();
        // Include the trailing newline(s) of the separator line.
        let end = rest[end..]
            .find(|c: char| c != '\n')
            .map_or(rest.len(), |offset| end + offset);
        out.push(&rest[..end]);
        rest = &rest[end..];
    }
    if !rest.is_empty() {
        out.push(rest);
    }
    out
}

/// Splits one oversized block at character boundaries.
fn hard_split(block: &str, chunk_chars: usize) -> Vec<String> {
    let chars: Vec<char> = block.chars().collect();
    chars
        .chunks(chunk_chars)
        .map(|piece| piece.iter().collect())
        .collect()
}
