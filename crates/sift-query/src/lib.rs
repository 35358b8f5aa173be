//! Query compilation and relaxation for sift search.
//!
//! This crate turns typed entity requests into boolean engine queries and derives
//! corrected requests from engine suggestions:
//!
//! - **Requests**: [`PublicationQuery`], [`ProfileQuery`], [`AssetQuery`], [`ContentQuery`]
//! - **Field tables**: static [`EntitySchema`] routing per entity kind
//! - **Compilation**: [`compile`] fans free text over text fields and adds hard filters
//! - **Relaxation**: [`relax`] folds term suggestions back into a request copy
//! - **Aggregations**: [`AggregationSpec`] for trend and application reports
//!
//! Nothing here performs I/O; every function is a pure transformation of its input.
//!
//! # Example
//!
//! ```
//! use sift_query::{ProfileQuery, compile};
//!
//! let query = compile(&ProfileQuery::new("").with_owned_by("0xabc"));
//! assert_eq!(query.must.len(), 1);
//! assert!(query.should.is_empty());
//! ```

#![warn(missing_docs)]

mod aggregation;
mod clause;
mod compile;
mod compiled;
mod mode;
mod page;
mod relax;
mod request;
pub mod schema;
mod suggest;

pub use aggregation::{
    APP_ID_FIELD, AggregationKind, AggregationSpec, INGESTED_AT_FIELD, TREND_FIELD,
    TREND_MIN_DOC_COUNT, TermBucket,
};
pub use clause::{
    Clause, HASHTAG_MARKER, RangeBound, build_clause, date_range_clause, hashtagify,
    prefix_clause, threshold_clause,
};
pub use compile::{COMMENT_PARENT_FIELD, annotate, compile, compile_comments};
pub use compiled::{CompiledQuery, Sort, SortOrder, SuggestRequest};
pub use mode::{ClauseRole, ParseKnobError, ResultShape, TextMatchMode};
pub use page::{DEFAULT_PAGE_SIZE, DateRange, Pagination};
pub use relax::relax;
pub use request::{
    AssetQuery, CommentsQuery, ContentQuery, EntityRequest, ProfileQuery, PublicationQuery,
    SearchRequest, TextQuery,
};
pub use schema::{
    Correction, EntityKind, EntitySchema, Scope, ScopeRule, ShapeRule, Threshold, ThresholdRule,
};
pub use suggest::{MAX_CANDIDATES_PER_FIELD, Suggestions};
