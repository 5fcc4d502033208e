//! Substring search over a catalog snapshot, formatted into reply chunks.

use crate::models::CatalogSnapshot;

/// Appended when a further match exists beyond the result cap.
const MORE_PAPERS_NOTICE: &str = "There are more papers. Please use a more precise query.";

/// The whole reply body when nothing matched.
const NO_RESULT_NOTICE: &str = "Found nothing. Sorry.";

/// Reply budget limits, taken from the CLI.
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    /// Matches emitted before the scan stops with the "more papers" notice
    pub max_results: usize,
    /// Byte budget per outbound message chunk
    pub max_message_length: usize,
}

/// Why a search ended the way it did; logged per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Success,
    ReachedMaxResults,
    ReachedMaxLength,
    NoResult,
}

/// Formatted reply chunks in scan order plus the outcome category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReply {
    pub chunks: Vec<String>,
    pub outcome: SearchOutcome,
}

/// Scans the snapshot for papers whose id, title or author contains
/// `query` case-insensitively, in catalog document order.
///
/// Every chunk starts with the `For the request "..."` header and each
/// match renders as `<id>: <title> from <author>` plus the link. Chunks
/// never split an entry: a new chunk opens when appending the next entry
/// would push the buffer past `max_message_length`, so a single oversized
/// entry still lands in exactly one chunk. When a match is found after
/// `max_results` entries were already emitted, the notice is appended and
/// the scan stops.
pub fn search(query: &str, snapshot: &CatalogSnapshot, limits: &SearchLimits) -> SearchReply {
    let header = format!("For the request \"{query}\":\n");
    let needle = query.to_lowercase();

    let mut chunks = Vec::new();
    let mut buffer = header.clone();
    let mut emitted = 0usize;
    let mut reached_max_results = false;
    let mut reached_max_length = false;

    for paper in &snapshot.papers {
        if !paper.matches(&needle) {
            continue;
        }

        if emitted == limits.max_results {
            buffer.push_str(MORE_PAPERS_NOTICE);
            reached_max_results = true;
            break;
        }

        let line = format!(
            "{}: {} from {}\n{}\n\n",
            paper.id, paper.title, paper.author, paper.link
        );
        if buffer != header && buffer.len() + line.len() > limits.max_message_length {
            chunks.push(std::mem::replace(&mut buffer, header.clone()));
            reached_max_length = true;
        }
        buffer.push_str(&line);
        emitted += 1;
    }

    if emitted == 0 && !reached_max_results {
        buffer.push_str(NO_RESULT_NOTICE);
        return SearchReply {
            chunks: vec![buffer],
            outcome: SearchOutcome::NoResult,
        };
    }

    // A trailing bare header carries no entry and is not sent.
    if buffer != header {
        chunks.push(buffer);
    }

    let outcome = if reached_max_results {
        SearchOutcome::ReachedMaxResults
    } else if reached_max_length {
        SearchOutcome::ReachedMaxLength
    } else {
        SearchOutcome::Success
    };

    SearchReply { chunks, outcome }
}
