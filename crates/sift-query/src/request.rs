//! Typed search requests for each entity kind.
//!
//! Requests are plain values: the compiler reads them through [`EntityRequest`] and the
//! relaxation pass derives corrected copies from them without touching the original.

use serde::{Deserialize, Serialize};

use crate::{
    CompiledQuery, DateRange, EntityKind, EntitySchema, Pagination, ResultShape, Scope,
    TextMatchMode, Threshold, compile,
    schema::{ASSETS, CONTENTS, PROFILES, PUBLICATIONS},
};

/// Free text together with the discipline it is matched under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextQuery {
    /// Free text; empty means no text filter.
    pub text: String,
    /// Matching discipline.
    pub mode: TextMatchMode,
}

impl TextQuery {
    /// Creates a text query under the default mode.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: TextMatchMode::default(),
        }
    }
}

/// Read and rewrite access to a request through its entity's field table.
///
/// The compiler and the relaxation pass are written against this trait so they carry no
/// per-entity branching.
pub trait EntityRequest: Clone {
    /// Field table for the entity this request targets.
    fn schema(&self) -> &'static EntitySchema;

    /// Free text and matching mode.
    fn text_query(&self) -> &TextQuery;

    /// Mutable free text and matching mode.
    fn text_query_mut(&mut self) -> &mut TextQuery;

    /// Page window.
    fn pagination(&self) -> Pagination;

    /// Value of a scoping parameter, if the entity supports it and it is set.
    fn scope(&self, _scope: Scope) -> Option<&str> {
        None
    }

    /// Replaces a scoping parameter. Unsupported scopes are ignored.
    fn set_scope(&mut self, _scope: Scope, _value: String) {}

    /// Value of a numeric minimum, if the entity supports it and it is set.
    fn threshold(&self, _threshold: Threshold) -> Option<i64> {
        None
    }

    /// Requested result shape.
    fn shape(&self) -> ResultShape {
        ResultShape::default()
    }

    /// Requested date window.
    fn dates(&self) -> DateRange {
        DateRange::default()
    }

    /// Free text.
    fn text(&self) -> &str {
        &self.text_query().text
    }

    /// Matching mode.
    fn mode(&self) -> TextMatchMode {
        self.text_query().mode
    }

    /// Replaces the free text.
    fn set_text(&mut self, text: String) {
        self.text_query_mut().text = text;
    }
}

/// Search over publications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationQuery {
    /// Free text.
    #[serde(flatten)]
    pub query: TextQuery,
    /// Result shape.
    pub shape: ResultShape,
    /// Author biography filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Author handle filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_users: Option<String>,
    /// Mentioned profiles filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_users: Option<String>,
    /// Application filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// Minimum collects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_collects: Option<i64>,
    /// Minimum mirrors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_mirror: Option<i64>,
    /// Minimum comments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_comments: Option<i64>,
    /// Minimum author followers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_profile_follower: Option<i64>,
    /// Minimum author posts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_profile_posts: Option<i64>,
    /// Creation-date window.
    #[serde(skip_serializing_if = "DateRange::is_empty")]
    pub dates: DateRange,
    /// Page window.
    #[serde(skip)]
    pub pagination: Pagination,
}

impl PublicationQuery {
    /// Creates a publication search for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            query: TextQuery::new(text),
            ..Self::default()
        }
    }

    /// Sets the matching mode.
    pub fn with_mode(mut self, mode: TextMatchMode) -> Self {
        self.query.mode = mode;
        self
    }

    /// Sets the result shape.
    pub fn with_shape(mut self, shape: ResultShape) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the page window.
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }
}

impl EntityRequest for PublicationQuery {
    fn schema(&self) -> &'static EntitySchema {
        &PUBLICATIONS
    }

    fn text_query(&self) -> &TextQuery {
        &self.query
    }

    fn text_query_mut(&mut self) -> &mut TextQuery {
        &mut self.query
    }

    fn pagination(&self) -> Pagination {
        self.pagination
    }

    fn scope(&self, scope: Scope) -> Option<&str> {
        match scope {
            Scope::AppId => self.app_id.as_deref(),
            Scope::Handle => self.from_users.as_deref(),
            Scope::Bio => self.bio.as_deref(),
            Scope::Mentions => self.mention_users.as_deref(),
            Scope::OwnedBy | Scope::ProfileId => None,
        }
    }

    fn set_scope(&mut self, scope: Scope, value: String) {
        match scope {
            Scope::AppId => self.app_id = Some(value),
            Scope::Handle => self.from_users = Some(value),
            Scope::Bio => self.bio = Some(value),
            Scope::Mentions => self.mention_users = Some(value),
            Scope::OwnedBy | Scope::ProfileId => {}
        }
    }

    fn threshold(&self, threshold: Threshold) -> Option<i64> {
        match threshold {
            Threshold::Mirrors => self.min_mirror,
            Threshold::Collects => self.min_collects,
            Threshold::Comments => self.min_comments,
            Threshold::ProfileFollowers => self.min_profile_follower,
            Threshold::ProfilePosts => self.min_profile_posts,
            Threshold::Followers | Threshold::Publications | Threshold::Posts => None,
        }
    }

    fn shape(&self) -> ResultShape {
        self.shape
    }

    fn dates(&self) -> DateRange {
        self.dates
    }
}

/// Search over profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileQuery {
    /// Free text.
    #[serde(flatten)]
    pub query: TextQuery,
    /// Biography filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Owner address filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,
    /// Minimum followers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_follower: Option<i64>,
    /// Minimum posts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_posts: Option<i64>,
    /// Minimum publications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_publications: Option<i64>,
    /// Minimum comments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_comments: Option<i64>,
    /// Page window.
    #[serde(skip)]
    pub pagination: Pagination,
}

impl ProfileQuery {
    /// Creates a profile search for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            query: TextQuery::new(text),
            ..Self::default()
        }
    }

    /// Restricts results to profiles owned by `address`.
    pub fn with_owned_by(mut self, address: impl Into<String>) -> Self {
        self.owned_by = Some(address.into());
        self
    }

    /// Restricts results by biography.
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }
}

impl EntityRequest for ProfileQuery {
    fn schema(&self) -> &'static EntitySchema {
        &PROFILES
    }

    fn text_query(&self) -> &TextQuery {
        &self.query
    }

    fn text_query_mut(&mut self) -> &mut TextQuery {
        &mut self.query
    }

    fn pagination(&self) -> Pagination {
        self.pagination
    }

    fn scope(&self, scope: Scope) -> Option<&str> {
        match scope {
            Scope::OwnedBy => self.owned_by.as_deref(),
            Scope::Bio => self.bio.as_deref(),
            _ => None,
        }
    }

    fn set_scope(&mut self, scope: Scope, value: String) {
        match scope {
            Scope::OwnedBy => self.owned_by = Some(value),
            Scope::Bio => self.bio = Some(value),
            _ => {}
        }
    }

    fn threshold(&self, threshold: Threshold) -> Option<i64> {
        match threshold {
            Threshold::Followers => self.min_follower,
            Threshold::Publications => self.min_publications,
            Threshold::Comments => self.min_comments,
            Threshold::Posts => self.min_posts,
            _ => None,
        }
    }
}

/// Search over collectible assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetQuery {
    /// Free text.
    #[serde(flatten)]
    pub query: TextQuery,
    /// Page window.
    #[serde(skip)]
    pub pagination: Pagination,
}

impl AssetQuery {
    /// Creates an asset search for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            query: TextQuery::new(text),
            ..Self::default()
        }
    }
}

impl EntityRequest for AssetQuery {
    fn schema(&self) -> &'static EntitySchema {
        &ASSETS
    }

    fn text_query(&self) -> &TextQuery {
        &self.query
    }

    fn text_query_mut(&mut self) -> &mut TextQuery {
        &mut self.query
    }

    fn pagination(&self) -> Pagination {
        self.pagination
    }
}

/// Search over ingested content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentQuery {
    /// Free text.
    #[serde(flatten)]
    pub query: TextQuery,
    /// Result shape.
    pub shape: ResultShape,
    /// Application filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// Profile filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    /// Ingestion-date window.
    #[serde(skip_serializing_if = "DateRange::is_empty")]
    pub dates: DateRange,
    /// Page window.
    #[serde(skip)]
    pub pagination: Pagination,
}

impl ContentQuery {
    /// Creates a content search for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            query: TextQuery::new(text),
            ..Self::default()
        }
    }

    /// Sets the matching mode.
    pub fn with_mode(mut self, mode: TextMatchMode) -> Self {
        self.query.mode = mode;
        self
    }

    /// Sets the result shape.
    pub fn with_shape(mut self, shape: ResultShape) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the page window.
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }
}

impl EntityRequest for ContentQuery {
    fn schema(&self) -> &'static EntitySchema {
        &CONTENTS
    }

    fn text_query(&self) -> &TextQuery {
        &self.query
    }

    fn text_query_mut(&mut self) -> &mut TextQuery {
        &mut self.query
    }

    fn pagination(&self) -> Pagination {
        self.pagination
    }

    fn scope(&self, scope: Scope) -> Option<&str> {
        match scope {
            Scope::AppId => self.app_id.as_deref(),
            Scope::ProfileId => self.profile_id.as_deref(),
            _ => None,
        }
    }

    fn set_scope(&mut self, scope: Scope, value: String) {
        match scope {
            Scope::AppId => self.app_id = Some(value),
            Scope::ProfileId => self.profile_id = Some(value),
            _ => {}
        }
    }

    fn shape(&self) -> ResultShape {
        self.shape
    }

    fn dates(&self) -> DateRange {
        self.dates
    }
}

/// Lists the comments attached to one publication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsQuery {
    /// Identifier of the commented publication.
    pub publication_id: String,
    /// Page window.
    #[serde(skip)]
    pub pagination: Pagination,
}

impl CommentsQuery {
    /// Creates a comment listing for `publication_id`.
    pub fn new(publication_id: impl Into<String>) -> Self {
        Self {
            publication_id: publication_id.into(),
            pagination: Pagination::default(),
        }
    }
}

/// A search request for any entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchRequest {
    /// Content search.
    Content(ContentQuery),
    /// Publication search.
    Publication(PublicationQuery),
    /// Profile search.
    Profile(ProfileQuery),
    /// Asset search.
    Asset(AssetQuery),
}

impl SearchRequest {
    /// Entity kind searched.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Content(_) => EntityKind::Content,
            Self::Publication(_) => EntityKind::Publication,
            Self::Profile(_) => EntityKind::Profile,
            Self::Asset(_) => EntityKind::Asset,
        }
    }

    /// Compiles the request into an engine query.
    pub fn compile(&self) -> CompiledQuery {
        match self {
            Self::Content(q) => compile(q),
            Self::Publication(q) => compile(q),
            Self::Profile(q) => compile(q),
            Self::Asset(q) => compile(q),
        }
    }
}

impl From<ContentQuery> for SearchRequest {
    fn from(query: ContentQuery) -> Self {
        Self::Content(query)
    }
}

impl From<PublicationQuery> for SearchRequest {
    fn from(query: PublicationQuery) -> Self {
        Self::Publication(query)
    }
}

impl From<ProfileQuery> for SearchRequest {
    fn from(query: ProfileQuery) -> Self {
        Self::Profile(query)
    }
}

impl From<AssetQuery> for SearchRequest {
    fn from(query: AssetQuery) -> Self {
        Self::Asset(query)
    }
}
