//! Query matcher — filters the post corpus against a raw query string.
//!
//! Two query shapes exist. A query containing the literal delimiter `" OR "`
//! (space, capital OR, space) is an *OR-of-tags* query: each operand must
//! equal one of a post's tags exactly, and title/content are never consulted.
//! Anything else is an *AND-of-terms* query: every whitespace-separated term
//! must tag-match exactly or appear as a substring of the title or content.
//!
//! All comparisons are case-folded and whitespace-trimmed. Output order is
//! strictly corpus order, capped at [`RESULT_LIMIT`] hits; the field-priority
//! weight carried on each [`Hit`] is informational and never reorders
//! results.

use crate::types::Post;
use regex::Regex;
use std::sync::LazyLock;

/// Maximum number of hits a single query may return.
pub const RESULT_LIMIT: usize = 50;

/// The literal that switches a query into OR-of-tags mode. Detection is
/// case-sensitive; a lowercase `" or "` is an ordinary AND term.
const OR_DELIMITER: &str = " OR ";

static OR_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+or\s+").expect("hardcoded OR-split pattern must compile")
});

// ---------------------------------------------------------------------------
// Normalization helpers
// ---------------------------------------------------------------------------

/// Case-fold and trim surrounding whitespace. Applied to every value before
/// any comparison.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Split a comma-separated tag field into normalized tags.
///
/// Each element is trimmed; empty elements are dropped, so an empty or
/// missing tag field yields an empty list that never matches any term.
pub fn split_tags(tags: &str) -> Vec<String> {
    normalize(tags)
        .split(',')
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Case-insensitive substring containment. `term` must already be
/// normalized.
fn contains_term(text: &str, term: &str) -> bool {
    normalize(text).contains(term)
}

// ---------------------------------------------------------------------------
// Field priority
// ---------------------------------------------------------------------------

/// Which post field satisfied a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Tags,
    Title,
    Excerpt,
    Other,
}

/// Weight of a matched field: tags outrank titles outrank excerpts;
/// everything else (including the content body) carries no weight.
///
/// The weight is attached to every [`Hit`] but deliberately never used to
/// reorder results — output order stays corpus order.
pub fn match_priority(field: MatchField) -> u8 {
    match field {
        MatchField::Tags => 5,
        MatchField::Title => 4,
        MatchField::Excerpt => 3,
        MatchField::Other => 0,
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A single match produced by [`search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit<'a> {
    /// Position of the post within the corpus. Hits are emitted in
    /// ascending index order.
    pub index: usize,
    pub post: &'a Post,
    /// Field-priority weight of the best field that satisfied the query.
    pub priority: u8,
}

/// Filter `corpus` against a raw query string.
///
/// An empty or whitespace-only query yields an empty result set. The result
/// is rebuilt from scratch on every call; nothing is cached between queries.
pub fn search<'a>(query: &str, corpus: &'a [Post]) -> Vec<Hit<'a>> {
    if normalize(query).is_empty() {
        return Vec::new();
    }

    let mut hits = if query.contains(OR_DELIMITER) {
        or_search(query, corpus)
    } else {
        and_search(query, corpus)
    };
    hits.truncate(RESULT_LIMIT);

    tracing::debug!(query = %query, hits = hits.len(), "search executed");
    hits
}

/// OR-of-tags: a post matches when any operand equals any of its tags.
/// Title, excerpt, and content are never consulted in this mode.
fn or_search<'a>(query: &str, corpus: &'a [Post]) -> Vec<Hit<'a>> {
    let terms: Vec<String> = OR_SPLIT
        .split(query)
        .map(normalize)
        .filter(|term| !term.is_empty())
        .collect();
    tracing::debug!(terms = ?terms, "tag OR search");

    corpus
        .iter()
        .enumerate()
        .filter(|(_, post)| {
            let tags = split_tags(&post.tags);
            terms.iter().any(|term| tags.iter().any(|tag| tag == term))
        })
        .map(|(index, post)| Hit {
            index,
            post,
            priority: match_priority(MatchField::Tags),
        })
        .collect()
}

/// AND-of-terms: every term must tag-match exactly or appear within the
/// title or content. The hit's priority is the weight of the best field any
/// term matched.
fn and_search<'a>(query: &str, corpus: &'a [Post]) -> Vec<Hit<'a>> {
    let normalized = normalize(query);
    let terms: Vec<&str> = normalized.split_whitespace().collect();
    tracing::debug!(terms = ?terms, "term AND search");

    corpus
        .iter()
        .enumerate()
        .filter_map(|(index, post)| {
            let tags = split_tags(&post.tags);
            let mut priority = match_priority(MatchField::Other);
            let all_match = terms.iter().all(|term| {
                if tags.iter().any(|tag| tag == term) {
                    priority = priority.max(match_priority(MatchField::Tags));
                    true
                } else if contains_term(&post.title, term) {
                    priority = priority.max(match_priority(MatchField::Title));
                    true
                } else {
                    contains_term(&post.content, term)
                }
            });
            all_match.then_some(Hit {
                index,
                post,
                priority,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn post(title: &str, tags: &str, content: &str) -> Post {
        Post {
            title: title.to_string(),
            tags: tags.to_string(),
            content: content.to_string(),
            ..Post::default()
        }
    }

    fn corpus() -> Vec<Post> {
        vec![
            post("Go basics", "go,programming", "Goroutines and channels."),
            post("Rust intro", "rust,systems", "Ownership and borrowing."),
            post("Web servers", "programming", "Writing HTTP servers in Go."),
        ]
    }

    fn titles<'a>(hits: &[Hit<'a>]) -> Vec<&'a str> {
        hits.iter().map(|h| h.post.title.as_str()).collect()
    }

    // ── Normalization ──────────────────────────────────────────────────────

    #[test]
    fn normalize_folds_case_and_trims() {
        assert_eq!(normalize("  Foo Bar "), "foo bar");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn split_tags_trims_each_element() {
        assert_eq!(split_tags("Go, Programming , web"), vec!["go", "programming", "web"]);
    }

    #[test]
    fn split_tags_drops_empty_elements() {
        assert_eq!(split_tags(""), Vec::<String>::new());
        assert_eq!(split_tags(" , ,go,"), vec!["go"]);
    }

    // ── Field priority ─────────────────────────────────────────────────────

    #[rstest]
    #[case(MatchField::Tags, 5)]
    #[case(MatchField::Title, 4)]
    #[case(MatchField::Excerpt, 3)]
    #[case(MatchField::Other, 0)]
    fn priority_weights(#[case] field: MatchField, #[case] weight: u8) {
        assert_eq!(match_priority(field), weight);
    }

    // ── Mode selection ─────────────────────────────────────────────────────

    #[test]
    fn or_delimiter_is_case_sensitive() {
        // Lowercase "or" does not switch modes: "go or rust" is an AND query
        // whose term "or" matches nothing in this corpus.
        assert!(search("go or rust", &corpus()).is_empty());
        // The capitalized delimiter does.
        assert_eq!(
            titles(&search("go OR rust", &corpus())),
            vec!["Go basics", "Rust intro"]
        );
    }

    #[test]
    fn or_operands_are_case_insensitive() {
        assert_eq!(
            titles(&search("GO OR Rust", &corpus())),
            vec!["Go basics", "Rust intro"]
        );
    }

    // ── OR mode ────────────────────────────────────────────────────────────

    #[test]
    fn or_mode_matches_tags_only() {
        // "servers" appears in a title and in content, but OR mode consults
        // tags alone.
        assert!(search("servers OR nothing", &corpus()).is_empty());
    }

    #[test]
    fn or_mode_requires_exact_tag_equality() {
        // "program" is a prefix of the tag "programming", not an exact match.
        assert!(search("program OR nada", &corpus()).is_empty());
    }

    #[test]
    fn or_hits_carry_tag_priority() {
        let corpus = corpus();
        let hits = search("go OR rust", &corpus);
        assert!(hits.iter().all(|h| h.priority == 5));
    }

    // ── AND mode ───────────────────────────────────────────────────────────

    #[test]
    fn single_term_tag_match() {
        assert_eq!(titles(&search("go", &corpus())), vec!["Go basics"]);
    }

    #[test]
    fn single_term_title_substring() {
        assert_eq!(titles(&search("web", &corpus())), vec!["Web servers"]);
    }

    #[test]
    fn single_term_content_substring() {
        assert_eq!(titles(&search("ownership", &corpus())), vec!["Rust intro"]);
    }

    #[test]
    fn and_mode_is_conjunctive() {
        // "programming" tags two posts, "http" appears only in one of them.
        assert_eq!(
            titles(&search("programming http", &corpus())),
            vec!["Web servers"]
        );
    }

    #[test]
    fn and_mode_conjunction_equals_intersection() {
        let corpus = corpus();
        let both = search("go channels", &corpus);
        let only_go = search("go", &corpus);
        let only_channels = search("channels", &corpus);
        for hit in &both {
            assert!(only_go.iter().any(|h| h.index == hit.index));
            assert!(only_channels.iter().any(|h| h.index == hit.index));
        }
    }

    #[test]
    fn queries_are_case_insensitive() {
        assert_eq!(titles(&search("Go", &corpus())), titles(&search("go", &corpus())));
        assert_eq!(
            titles(&search("OWNERSHIP", &corpus())),
            titles(&search("ownership", &corpus()))
        );
    }

    #[test]
    fn and_priority_prefers_best_field() {
        let corpus = corpus();
        let hits = search("go", &corpus);
        // Tag match on "Go basics".
        assert_eq!(hits[0].priority, 5);
        let hits = search("web", &corpus);
        // Title-only match.
        assert_eq!(hits[0].priority, 4);
        let hits = search("ownership", &corpus);
        // Content-only match carries no weight.
        assert_eq!(hits[0].priority, 0);
    }

    // ── Edge cases ─────────────────────────────────────────────────────────

    #[test]
    fn empty_query_yields_nothing() {
        assert!(search("", &corpus()).is_empty());
        assert!(search("   ", &corpus()).is_empty());
    }

    #[test]
    fn empty_tag_field_never_matches() {
        let posts = vec![post("Untagged", "", "body text")];
        assert!(search("untagged OR anything", &posts).is_empty());
    }

    #[test]
    fn missing_fields_degrade_to_empty_text() {
        let posts = vec![Post::default()];
        assert!(search("anything", &posts).is_empty());
        assert!(search("a OR b", &posts).is_empty());
    }

    #[test]
    fn results_keep_corpus_order() {
        // Both posts match "programming" with different priorities (tag vs
        // tag), and "go" matches with tag=5 and content=0 — order must stay
        // by corpus index either way.
        let corpus = corpus();
        let hits = search("go", &corpus);
        let indices: Vec<usize> = hits.iter().map(|h| h.index).collect();
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        assert_eq!(indices, sorted);
    }

    #[test]
    fn result_count_is_capped() {
        let posts: Vec<Post> = (0..RESULT_LIMIT + 25)
            .map(|i| post(&format!("Post {i}"), "common", ""))
            .collect();
        let hits = search("common", &posts);
        assert_eq!(hits.len(), RESULT_LIMIT);
        // The cap keeps the *first* 50 in corpus order.
        assert_eq!(hits[0].index, 0);
        assert_eq!(hits[RESULT_LIMIT - 1].index, RESULT_LIMIT - 1);
    }

    #[test]
    fn two_post_corpus_end_to_end() {
        let posts = vec![
            post("Go basics", "go,programming", "..."),
            post("Rust intro", "rust,systems", "..."),
        ];
        assert_eq!(titles(&search("go", &posts)), vec!["Go basics"]);
        assert_eq!(
            titles(&search("go OR rust", &posts)),
            vec!["Go basics", "Rust intro"]
        );
        assert_eq!(titles(&search("systems", &posts)), vec!["Rust intro"]);
        assert!(search("", &posts).is_empty());
    }
}
