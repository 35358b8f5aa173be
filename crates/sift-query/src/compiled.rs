//! The compiled boolean query and its wire rendering.

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use crate::{Clause, ClauseRole, Pagination};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortOrder {
    /// Engine name of the direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// An explicit sort directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    /// Field to sort on.
    pub field: &'static str,
    /// Direction.
    pub order: SortOrder,
}

impl Sort {
    /// Sorts newest (largest) first.
    pub fn descending(field: &'static str) -> Self {
        Self {
            field,
            order: SortOrder::Descending,
        }
    }
}

/// A term-suggestion request scoped to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestRequest {
    /// Text to produce spelling candidates for.
    pub text: String,
}

/// A structured boolean query ready to be sent to the engine.
///
/// A pure value derived from a request; executing it has no effect on it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompiledQuery {
    /// Hard filters; all must match.
    pub must: Vec<Clause>,
    /// Soft filters; at least `minimum_should_match` must match.
    pub should: Vec<Clause>,
    /// Exclusions.
    pub must_not: Vec<Clause>,
    /// Set to 1 whenever `should` is non-empty.
    pub minimum_should_match: Option<u32>,
    /// Page length.
    pub size: u32,
    /// Documents skipped.
    pub from: u64,
    /// Optional explicit ordering; `None` leaves relevance order.
    pub sort: Option<Sort>,
    /// Field to suggestion request.
    pub suggest: BTreeMap<&'static str, SuggestRequest>,
}

impl CompiledQuery {
    /// Creates an empty query for the given page.
    pub fn new(pagination: Pagination) -> Self {
        Self {
            size: pagination.size(),
            from: pagination.offset(),
            ..Self::default()
        }
    }

    /// Places a clause in the bucket named by `role`.
    pub fn push(&mut self, role: ClauseRole, clause: Clause) {
        match role {
            ClauseRole::Must => self.must.push(clause),
            ClauseRole::Should => {
                self.should.push(clause);
                self.minimum_should_match = Some(1);
            }
            ClauseRole::MustNot => self.must_not.push(clause),
        }
    }

    /// Returns the clauses in the bucket named by `role`.
    pub fn clauses(&self, role: ClauseRole) -> &[Clause] {
        match role {
            ClauseRole::Must => &self.must,
            ClauseRole::Should => &self.should,
            ClauseRole::MustNot => &self.must_not,
        }
    }

    /// Returns true when no bucket holds a clause.
    pub fn is_unconstrained(&self) -> bool {
        self.must.is_empty() && self.should.is_empty() && self.must_not.is_empty()
    }

    /// Renders the full request body in the engine's query DSL.
    pub fn to_body(&self) -> Value {
        let mut bool_query = Map::new();
        for role in [ClauseRole::MustNot, ClauseRole::Must, ClauseRole::Should] {
            let clauses = self.clauses(role).iter().map(Clause::to_json).collect();
            bool_query.insert(role.as_str().into(), Value::Array(clauses));
        }
        if let Some(minimum) = self.minimum_should_match {
            bool_query.insert("minimum_should_match".into(), json!(minimum));
        }

        let mut body = Map::new();
        body.insert("query".into(), json!({ "bool": bool_query }));
        body.insert("size".into(), json!(self.size));
        body.insert("from".into(), json!(self.from));

        if let Some(sort) = self.sort {
            let mut order = Map::new();
            order.insert(sort.field.into(), json!(sort.order.as_str()));
            body.insert("sort".into(), Value::Object(order));
        }

        if !self.suggest.is_empty() {
            let mut suggest = Map::new();
            for (field, request) in &self.suggest {
                suggest.insert(
                    (*field).to_string(),
                    json!({ "text": request.text, "term": { "field": field } }),
                );
            }
            body.insert("suggest".into(), Value::Object(suggest));
        }

        Value::Object(body)
    }
}
