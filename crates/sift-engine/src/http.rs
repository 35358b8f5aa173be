//! Blocking HTTP client for an Elasticsearch-compatible engine.

use std::{fmt, time::Duration};

use reqwest::{
    blocking::{Client, Response},
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::{Value, json};
use sift_config::EngineSettings;
use sift_query::{AggregationSpec, CompiledQuery, TermBucket};
use tracing::debug;

use crate::{
    BulkDocument, BulkSummary, EngineError, EngineResponse, SearchEngine, response::decode_buckets,
};

/// Content type of bulk request bodies.
const NDJSON: &str = "application/x-ndjson";

/// Engine client speaking the `_search` and `_bulk` HTTP APIs.
#[derive(Clone)]
pub struct HttpEngine {
    /// Base URL without a trailing slash.
    base_url: String,
    /// Pooled client carrying the auth header and timeout.
    http: Client,
}

impl fmt::Debug for HttpEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpEngine")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpEngine {
    /// Creates a client for the engine at `base_url`.
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self, EngineError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let value = HeaderValue::from_str(&format!("ApiKey {key}"))
                .map_err(|e| EngineError::Config(format!("invalid api key: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| EngineError::Config(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Creates a client from the `[engine]` settings.
    pub fn from_config(settings: &EngineSettings) -> Result<Self, EngineError> {
        Self::new(
            &settings.url,
            settings.api_key.as_deref(),
            settings.timeout,
            settings.accept_invalid_certs,
        )
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the engine's root document, which names the cluster and its version.
    pub fn health(&self) -> Result<Value, EngineError> {
        debug!(url = %self.base_url, "checking engine");
        let resp = self.http.get(&self.base_url).send()?;
        let body = read_body(resp)?;
        serde_json::from_str(&body).map_err(|e| EngineError::MalformedResponse(e.to_string()))
    }

    /// POSTs a JSON body to `{base}/{index}/_search` and returns the response text.
    fn post_search(&self, index: &str, body: &Value) -> Result<String, EngineError> {
        let url = format!("{}/{index}/_search", self.base_url);
        let resp = self.http.post(url).json(body).send()?;
        read_body(resp)
    }
}

impl SearchEngine for HttpEngine {
    fn search(&self, index: &str, query: &CompiledQuery) -> Result<EngineResponse, EngineError> {
        let body = self.post_search(index, &query.to_body())?;
        EngineResponse::from_json(&body)
    }

    fn aggregate(
        &self,
        index: &str,
        spec: &AggregationSpec,
    ) -> Result<Vec<TermBucket>, EngineError> {
        let body = self.post_search(index, &spec.to_body())?;
        decode_buckets(&body, spec.name)
    }

    fn bulk_index(
        &self,
        index: &str,
        documents: &[BulkDocument],
    ) -> Result<BulkSummary, EngineError> {
        if documents.is_empty() {
            return Ok(BulkSummary::default());
        }
        let url = format!("{}/_bulk", self.base_url);
        let resp = self
            .http
            .post(url)
            .header(CONTENT_TYPE, NDJSON)
            .body(bulk_body(index, documents))
            .send()?;
        let body = read_body(resp)?;
        BulkSummary::from_json(&body)
    }
}

/// Reads the response text, turning non-success statuses into [`EngineError::Status`].
fn read_body(resp: Response) -> Result<String, EngineError> {
    let status = resp.status();
    let body = resp.text()?;
    if !status.is_success() {
        return Err(EngineError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

/// Renders the NDJSON body of a bulk request: one action line and one source line per
/// document, each terminated by a newline.
fn bulk_body(index: &str, documents: &[BulkDocument]) -> String {
    let mut out = String::new();
    for doc in documents {
        let action = json!({ "index": { "_index": index, "_id": doc.id } });
        out.push_str(&action.to_string());
        out.push('\n');
        out.push_str(&doc.source.to_string());
        out.push('\n');
    }
    out
}
