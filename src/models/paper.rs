//! Paper records and catalog document parsing.

use serde::Deserialize;
use serde_json::Value;

/// One searchable paper from the catalog.
///
/// Only entries that carry all four string fields with `type == "paper"`
/// become records; everything else in the document is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperRecord {
    /// Paper identifier, the key in the catalog document (e.g. "P0001R0")
    pub id: String,
    /// Paper title
    pub title: String,
    /// Author (verbatim from the catalog, may list several names)
    pub author: String,
    /// Link to the paper
    pub link: String,
}

impl PaperRecord {
    /// Case-insensitive containment over id, title and author.
    ///
    /// `needle` must already be lowercased; callers lowercase the query
    /// once per search. The empty needle matches every record.
    pub fn matches(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(needle)
            || self.title.to_lowercase().contains(needle)
            || self.author.to_lowercase().contains(needle)
    }
}

/// One immutable, wholly-replaced in-memory copy of the catalog.
///
/// `papers` keeps catalog document order; searches scan it linearly and
/// results come back in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    /// Valid paper records in document order
    pub papers: Vec<PaperRecord>,
    /// How many entries the document contained before filtering
    pub total_entries: usize,
}

/// The shape each catalog value may take; every field is optional so a
/// sparse entry deserializes instead of failing the whole document.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(rename = "type")]
    kind: Option<String>,
    title: Option<String>,
    author: Option<String>,
    link: Option<String>,
}

/// Parses a whole catalog document into a snapshot.
///
/// The document must be a JSON object keyed by paper identifier. Values
/// that are not objects, lack a required field, or are not of type
/// `"paper"` are skipped silently. Fails only when the document itself is
/// not an object.
pub fn parse_catalog(body: &str) -> Result<CatalogSnapshot, serde_json::Error> {
    let document: serde_json::Map<String, Value> = serde_json::from_str(body)?;
    let total_entries = document.len();

    let mut papers = Vec::new();
    for (id, value) in document {
        let Ok(raw) = serde_json::from_value::<RawEntry>(value) else {
            continue;
        };
        let (Some(kind), Some(title), Some(author), Some(link)) =
            (raw.kind, raw.title, raw.author, raw.link)
        else {
            continue;
        };
        if kind != "paper" {
            continue;
        }
        papers.push(PaperRecord {
            id,
            title,
            author,
            link,
        });
    }

    Ok(CatalogSnapshot {
        papers,
        total_entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_entry() {
        let snapshot = parse_catalog(
            r#"{"P0001":{"type":"paper","title":"Foo Bar","author":"Jane Doe","link":"http://x/1"}}"#,
        )
        .unwrap();

        assert_eq!(snapshot.total_entries, 1);
        assert_eq!(
            snapshot.papers,
            vec![PaperRecord {
                id: "P0001".to_string(),
                title: "Foo Bar".to_string(),
                author: "Jane Doe".to_string(),
                link: "http://x/1".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_skips_entry_missing_link() {
        let snapshot =
            parse_catalog(r#"{"P0001":{"type":"paper","title":"Foo Bar","author":"Jane Doe"}}"#)
                .unwrap();

        assert_eq!(snapshot.total_entries, 1);
        assert!(snapshot.papers.is_empty());
    }

    #[test]
    fn test_parse_skips_non_paper_type() {
        let snapshot = parse_catalog(
            r#"{"N0001":{"type":"editorial","title":"Notes","author":"Ed","link":"http://x/n"}}"#,
        )
        .unwrap();

        assert!(snapshot.papers.is_empty());
    }

    #[test]
    fn test_parse_skips_non_object_values() {
        let snapshot = parse_catalog(
            r#"{"weird":"just a string","P0001":{"type":"paper","title":"T","author":"A","link":"L"}}"#,
        )
        .unwrap();

        assert_eq!(snapshot.total_entries, 2);
        assert_eq!(snapshot.papers.len(), 1);
        assert_eq!(snapshot.papers[0].id, "P0001");
    }

    #[test]
    fn test_parse_preserves_document_order() {
        let snapshot = parse_catalog(
            r#"{
                "P0900":{"type":"paper","title":"C","author":"A","link":"L"},
                "P0100":{"type":"paper","title":"A","author":"A","link":"L"},
                "P0500":{"type":"paper","title":"B","author":"A","link":"L"}
            }"#,
        )
        .unwrap();

        let ids: Vec<&str> = snapshot.papers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P0900", "P0100", "P0500"]);
    }

    #[test]
    fn test_parse_rejects_non_object_document() {
        assert!(parse_catalog("[1, 2, 3]").is_err());
        assert!(parse_catalog("not json at all").is_err());
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let paper = PaperRecord {
            id: "P0001".to_string(),
            title: "Concepts for Ranges".to_string(),
            author: "Jane Doe".to_string(),
            link: "http://x/1".to_string(),
        };

        assert!(paper.matches("ranges"));
        assert!(paper.matches("p0001"));
        assert!(paper.matches("jane"));
        assert!(!paper.matches("modules"));
        // Empty needle is contained in every string
        assert!(paper.matches(""));
    }
}
