//! postfind-core — core library for postfind.
//!
//! This crate holds everything that runs without a terminal: the post types,
//! the query matcher, the one-shot corpus loader, the share-link helpers, and
//! the user configuration.
//!
//! # Architecture
//!
//! ```text
//! Corpus (posts.json, loaded once) ──► Matcher ──► UI
//!                                         ▲
//!                              Link (`q` parameter)
//! ```
//!
//! The matcher is a pure function of `(query, corpus)`; the UI in
//! `postfind-tui` is the only component with side effects.

pub mod config;
pub mod corpus;
pub mod link;
pub mod search;
pub mod types;

pub use search::{search, Hit};
pub use types::Post;
