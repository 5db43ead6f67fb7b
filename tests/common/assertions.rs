//! Domain-specific assertion helpers for postfind harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! matcher invariant was violated.

use postfind_core::{Hit, Post};
use pretty_assertions::assert_eq;

/// Assert that a hit list contains exactly the given titles, in order.
pub fn assert_titles(hits: &[Hit<'_>], expected: &[&str]) {
    let actual: Vec<&str> = hits.iter().map(|hit| hit.post.title.as_str()).collect();
    assert_eq!(
        actual, expected,
        "result titles diverged from the expected corpus-order list"
    );
}

/// Assert that every hit points back into the corpus at its own index —
/// search must never fabricate or misattribute posts.
pub fn assert_hits_subset_of_corpus(hits: &[Hit<'_>], corpus: &[Post]) {
    for hit in hits {
        let from_corpus = corpus
            .get(hit.index)
            .unwrap_or_else(|| panic!("hit index {} outside corpus of {}", hit.index, corpus.len()));
        assert_eq!(
            from_corpus, hit.post,
            "hit at index {} does not match the corpus record",
            hit.index
        );
    }
}

/// Assert that hit indices are strictly increasing, i.e. results keep
/// corpus order with no duplicates.
pub fn assert_corpus_order(hits: &[Hit<'_>]) {
    let indices: Vec<usize> = hits.iter().map(|hit| hit.index).collect();
    assert!(
        indices.windows(2).all(|w| w[0] < w[1]),
        "hit indices are not strictly increasing: {indices:?}"
    );
}
