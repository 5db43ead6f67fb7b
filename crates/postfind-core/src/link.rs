//! Share-link helpers — reading and writing the `q` query parameter.
//!
//! A search is shareable as `<site base>?q=<term>`. At startup the `q`
//! parameter of a pasted link becomes the initial query; on pill activation
//! the active term is written back into a fresh link shown on the status
//! line.

use url::Url;

/// Extract the decoded `q` parameter from a link.
///
/// A malformed URL or a link without `q` is simply "no query", never an
/// error.
pub fn query_param(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
}

/// Build a share link for `term`: clone `base`, set its `q` parameter, and
/// keep every other query parameter intact (replace, not append).
pub fn search_link(base: &Url, term: &str) -> Url {
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != "q")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut link = base.clone();
    {
        let mut pairs = link.query_pairs_mut();
        pairs.clear();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
        pairs.append_pair("q", term);
    }
    link
}

/// Reduce a URL to its site root (scheme + authority, path `/`). Used to
/// derive a share base from a remote corpus URL when no `base_url` is
/// configured.
pub fn site_root(url: &Url) -> Url {
    let mut root = url.clone();
    root.set_path("/");
    root.set_query(None);
    root.set_fragment(None);
    root
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
