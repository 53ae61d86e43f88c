//! Budgeting helpers for the text an agent hands to its generator.

use crate::history::HistoryEntry;

/// Token budget for conversation history included in a prompt.
pub const HISTORY_TOKEN_LIMIT: usize = 2000;

/// Maximum characters kept in a decision summary.
pub const SUMMARY_CHAR_LIMIT: usize = 200;

/// Estimates token count for a text string, ~4 characters per token.
pub fn estimate_tokens(text: &str) -> usize {
    text.len().div_ceil(4)
}

/// Returns the most recent entries whose combined estimate fits `limit`,
/// oldest first. Stops at the first entry that does not fit so the result
/// stays a contiguous tail of the history.
pub fn fit_history(entries: &[HistoryEntry], limit: usize) -> Vec<HistoryEntry> {
    let mut used = 0;
    let mut kept = Vec::new();

    for entry in entries.iter().rev() {
        let tokens = estimate_tokens(&entry.text);
        if used + tokens > limit {
            break;
        }
        used += tokens;
        kept.push(entry.clone());
    }

    kept.reverse();
    kept
}

const ELLIPSIS: &str = "...";

/// First non-empty line of `text`, cut to at most `max_chars` characters.
///
/// A cut line ends in `...` when the cap leaves room for it.
pub fn summary_line(text: &str, max_chars: usize) -> String {
    let line = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();

    if line.chars().count() <= max_chars {
        return line.to_string();
    }

    if max_chars <= ELLIPSIS.len() {
        return line.chars().take(max_chars).collect();
    }

    let mut summary: String = line.chars().take(max_chars - ELLIPSIS.len()).collect();
    summary.push_str(ELLIPSIS);
    summary
}
