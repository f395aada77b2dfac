//! Client code for lmu-races.
//!
//! This crate provides the HTTP fetch pipeline, the queryable document
//! abstraction and race extraction used by the server's schedulers.

pub mod document;
pub mod extract;
pub mod fetch;

pub use document::{Document, HtmlDocument, HtmlNode, Node};
pub use extract::{Extraction, RaceExtractor, parse_duration_minutes, parse_timestamp};
pub use fetch::{FetchClient, FetchConfig, PageSource};
