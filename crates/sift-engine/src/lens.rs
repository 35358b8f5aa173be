//! The search facade: one operation per entity kind plus the reports.

use chrono::{DateTime, Utc};
use sift_config::{Config, IndexSettings};
use sift_query::{
    AggregationSpec, AssetQuery, CommentsQuery, ContentQuery, EntityKind, EntityRequest,
    ProfileQuery, PublicationQuery, SearchRequest, TermBucket, compile_comments,
};
use tracing::{debug, warn};

use crate::{
    BulkSummary, ContentDocument, HttpEngine, RelaxationController, SearchEngine, SearchError,
    SearchResult,
};

/// Default largest accepted ingestion batch.
pub const DEFAULT_MAX_BULK_DOCUMENTS: usize = 100;

/// Index names per entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexNames {
    /// Ingested content.
    pub contents: String,
    /// Publications and their comments.
    pub publications: String,
    /// Profiles.
    pub profiles: String,
    /// Collectible assets.
    pub assets: String,
}

impl IndexNames {
    /// Index holding documents of `kind`.
    pub fn for_kind(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Content => &self.contents,
            EntityKind::Publication => &self.publications,
            EntityKind::Profile => &self.profiles,
            EntityKind::Asset => &self.assets,
        }
    }
}

impl Default for IndexNames {
    fn default() -> Self {
        Self::from(&IndexSettings::default())
    }
}

impl From<&IndexSettings> for IndexNames {
    fn from(settings: &IndexSettings) -> Self {
        Self {
            contents: settings.contents.clone(),
            publications: settings.publications.clone(),
            profiles: settings.profiles.clone(),
            assets: settings.assets.clone(),
        }
    }
}

/// Searches, reports and ingestion over one engine.
#[derive(Debug, Clone)]
pub struct Lens<E> {
    /// Engine all operations go to.
    engine: E,
    /// Index per entity kind.
    indices: IndexNames,
    /// Largest accepted ingestion batch.
    max_bulk_documents: usize,
}

impl Lens<HttpEngine> {
    /// Creates a facade over the HTTP engine described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, SearchError> {
        let engine = HttpEngine::from_config(&config.engine)?;
        Ok(Self::new(engine, IndexNames::from(&config.indices))
            .with_max_bulk_documents(config.search.max_bulk_documents))
    }
}

impl<E: SearchEngine> Lens<E> {
    /// Creates a facade over `engine`.
    pub fn new(engine: E, indices: IndexNames) -> Self {
        Self {
            engine,
            indices,
            max_bulk_documents: DEFAULT_MAX_BULK_DOCUMENTS,
        }
    }

    /// Sets the largest accepted ingestion batch.
    pub fn with_max_bulk_documents(mut self, limit: usize) -> Self {
        self.max_bulk_documents = limit;
        self
    }

    /// The underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Index names in use.
    pub fn indices(&self) -> &IndexNames {
        &self.indices
    }

    /// Searches publications.
    pub fn search_publications(
        &self,
        request: PublicationQuery,
    ) -> Result<SearchResult<PublicationQuery>, SearchError> {
        self.run(request)
    }

    /// Searches profiles.
    pub fn search_profiles(
        &self,
        request: ProfileQuery,
    ) -> Result<SearchResult<ProfileQuery>, SearchError> {
        self.run(request)
    }

    /// Searches collectible assets.
    pub fn search_assets(
        &self,
        request: AssetQuery,
    ) -> Result<SearchResult<AssetQuery>, SearchError> {
        self.run(request)
    }

    /// Searches ingested content.
    pub fn search_contents(
        &self,
        request: ContentQuery,
    ) -> Result<SearchResult<ContentQuery>, SearchError> {
        self.run(request)
    }

    /// Searches whichever entity kind `request` targets.
    pub fn search(
        &self,
        request: SearchRequest,
    ) -> Result<SearchResult<SearchRequest>, SearchError> {
        Ok(match request {
            SearchRequest::Content(q) => self.run(q)?.map_query(SearchRequest::from),
            SearchRequest::Publication(q) => self.run(q)?.map_query(SearchRequest::from),
            SearchRequest::Profile(q) => self.run(q)?.map_query(SearchRequest::from),
            SearchRequest::Asset(q) => self.run(q)?.map_query(SearchRequest::from),
        })
    }

    /// Lists comments on a publication. Comment listings are never relaxed.
    pub fn publication_comments(
        &self,
        request: CommentsQuery,
    ) -> Result<SearchResult<CommentsQuery>, SearchError> {
        if request.publication_id.trim().is_empty() {
            return Err(SearchError::Validation(
                "publication id must not be empty".into(),
            ));
        }
        let index = self.indices.publications.as_str();
        debug!(index, publication = %request.publication_id, "listing comments");
        let response = self.engine.search(index, &compile_comments(&request))?;
        let page = request.pagination.page();
        Ok(SearchResult::assemble(response, page, request, false))
    }

    /// Terms trending in content ingested over the last `days_back` days.
    ///
    /// Buckets whose key does not start with a letter are dropped.
    pub fn trending_terms(&self, size: u32, days_back: u32) -> Result<Vec<TermBucket>, SearchError> {
        self.trending_terms_at(size, days_back, Utc::now())
    }

    /// [`Lens::trending_terms`] with an explicit current time.
    pub fn trending_terms_at(
        &self,
        size: u32,
        days_back: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<TermBucket>, SearchError> {
        let spec = AggregationSpec::trending(size, days_back, now);
        let buckets = self.engine.aggregate(&self.indices.contents, &spec)?;
        Ok(buckets
            .into_iter()
            .filter(TermBucket::is_alphabetic_key)
            .collect())
    }

    /// The `size` most common application identifiers among publications.
    pub fn distinct_app_ids(&self, size: u32) -> Result<Vec<TermBucket>, SearchError> {
        let spec = AggregationSpec::app_ids(size);
        Ok(self.engine.aggregate(&self.indices.publications, &spec)?)
    }

    /// Writes content documents into the content index.
    pub fn index_contents(
        &self,
        documents: Vec<ContentDocument>,
    ) -> Result<BulkSummary, SearchError> {
        self.index_contents_at(documents, Utc::now())
    }

    /// [`Lens::index_contents`] with an explicit ingestion time.
    ///
    /// Every document of one batch carries the same `ingested_at` stamp.
    pub fn index_contents_at(
        &self,
        documents: Vec<ContentDocument>,
        ingested_at: DateTime<Utc>,
    ) -> Result<BulkSummary, SearchError> {
        if documents.len() > self.max_bulk_documents {
            warn!(
                count = documents.len(),
                limit = self.max_bulk_documents,
                "rejecting oversized batch"
            );
            return Err(SearchError::Validation(format!(
                "batch of {} documents exceeds the limit of {}",
                documents.len(),
                self.max_bulk_documents
            )));
        }
        let entries = documents
            .into_iter()
            .map(|doc| doc.into_bulk(ingested_at))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SearchError::Validation(e.to_string()))?;
        let index = self.indices.contents.as_str();
        debug!(index, count = entries.len(), "indexing contents");
        Ok(self.engine.bulk_index(index, &entries)?)
    }

    /// Runs an entity search with relaxation on its kind's index.
    fn run<R: EntityRequest>(&self, request: R) -> Result<SearchResult<R>, SearchError> {
        let index = self.indices.for_kind(request.schema().kind);
        let outcome = RelaxationController::new(&self.engine, index).run(request)?;
        Ok(SearchResult::from(outcome))
    }
}
