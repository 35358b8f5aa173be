//! Engine access and search orchestration for sift.
//!
//! [`Lens`] is the entry point: it compiles typed requests with `sift-query`, sends them
//! to a [`SearchEngine`] and assembles [`SearchResult`] pages. Entity searches that match
//! nothing are relaxed once by the [`RelaxationController`]; comment listings, reports and
//! ingestion are single round trips.
//!
//! [`HttpEngine`] talks to an Elasticsearch-compatible engine over blocking HTTP. Tests
//! and embedders can supply any other [`SearchEngine`].

#![warn(missing_docs)]

mod controller;
mod engine;
mod error;
mod http;
mod ingest;
mod lens;
mod response;
mod result;
#[cfg(test)]
mod testing;

pub use controller::{Attempt, Outcome, RelaxationController};
pub use engine::SearchEngine;
pub use error::{EngineError, SearchError};
pub use http::HttpEngine;
pub use ingest::{ContentAttribute, ContentDocument, ContentMedia, parse_contents};
pub use lens::{DEFAULT_MAX_BULK_DOCUMENTS, IndexNames, Lens};
pub use response::{BulkDocument, BulkSummary, EngineResponse, Hit, decode_buckets};
pub use result::SearchResult;
