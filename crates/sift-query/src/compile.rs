//! The query assembler and suggestion annotator.

use crate::{
    ClauseRole, CommentsQuery, CompiledQuery, EntityRequest, ResultShape, Sort, SuggestRequest,
    TextMatchMode, build_clause, date_range_clause, prefix_clause, threshold_clause,
};

/// Field holding the parent publication id on comment documents.
pub const COMMENT_PARENT_FIELD: &str = "mainPost.id.keyword";

/// Compiles an entity request into a boolean engine query.
///
/// Free text is fanned out over every text field of the entity as `should` clauses, or as
/// `must_not` clauses under [`TextMatchMode::NoneOfWords`]. Scoping filters, numeric
/// minimums, the date window and the shape filter are `must` clauses. Every positive text
/// clause is annotated with a term-suggestion request.
pub fn compile<R: EntityRequest>(request: &R) -> CompiledQuery {
    let schema = request.schema();
    let mode = request.mode();
    let mut query = CompiledQuery::new(request.pagination());
    let mut suggested: Vec<(&'static str, &str)> = Vec::new();

    let text_role = if mode == TextMatchMode::NoneOfWords {
        ClauseRole::MustNot
    } else {
        ClauseRole::Should
    };
    for &field in schema.text_fields {
        if let Some(clause) = build_clause(field, request.text(), mode) {
            query.push(text_role, clause);
            if text_role == ClauseRole::Should {
                suggested.push((field, request.text()));
            }
        }
    }

    for rule in schema.scopes {
        if let Some(value) = request.scope(rule.scope)
            && let Some(clause) = build_clause(rule.field, value, mode.for_scoping())
        {
            query.push(ClauseRole::Must, clause);
            suggested.push((rule.field, value));
        }
    }

    for rule in schema.thresholds {
        if let Some(clause) = threshold_clause(rule.field, request.threshold(rule.threshold)) {
            query.push(ClauseRole::Must, clause);
        }
    }

    if let Some(field) = schema.timestamp
        && let Some(clause) = date_range_clause(field, request.dates())
    {
        query.push(ClauseRole::Must, clause);
    }

    let shape = request.shape();
    if let Some(rule) = schema.shape_rule(shape)
        && let Some(clause) = prefix_clause(rule.field, rule.prefix)
    {
        query.push(ClauseRole::Must, clause);
    }

    query.sort = match schema.timestamp {
        Some(field) if shape != ResultShape::Top => Some(Sort::descending(field)),
        _ => None,
    };

    annotate(query, &suggested)
}

/// Attaches a term-suggestion request for each `(field, text)` pair.
///
/// Later pairs override earlier ones on the same field.
pub fn annotate(mut query: CompiledQuery, fields: &[(&'static str, &str)]) -> CompiledQuery {
    for &(field, text) in fields {
        query.suggest.insert(
            field,
            SuggestRequest {
                text: text.to_string(),
            },
        );
    }
    query
}

/// Compiles a comment listing for one publication.
pub fn compile_comments(request: &CommentsQuery) -> CompiledQuery {
    let mut query = CompiledQuery::new(request.pagination);
    if let Some(clause) = build_clause(
        COMMENT_PARENT_FIELD,
        &request.publication_id,
        TextMatchMode::AnyWords,
    ) {
        query.push(ClauseRole::Must, clause);
    }
    query
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::{
        AssetQuery, Clause, ContentQuery, DateRange, Pagination, ProfileQuery, PublicationQuery,
    };

    #[test]
    fn empty_request_compiles_to_empty_buckets() {
        for query in [
            compile(&ContentQuery::default()),
            compile(&PublicationQuery::default()),
            compile(&ProfileQuery::default()),
            compile(&AssetQuery::default()),
        ] {
            assert!(query.is_unconstrained());
            assert!(query.minimum_should_match.is_none());
            assert!(query.suggest.is_empty());
        }
    }

    #[test]
    fn free_text_fans_out_over_text_fields() {
        let query = compile(&AssetQuery::new("punk"));
        assert_eq!(query.should.len(), 11);
        assert_eq!(query.minimum_should_match, Some(1));
        assert!(query.should.iter().all(|c| c.text() == Some("punk")));
        assert_eq!(query.suggest.len(), 11);
    }

    #[test]
    fn none_of_words_moves_text_to_exclusions() {
        let query = compile(&ContentQuery::new("spam").with_mode(TextMatchMode::NoneOfWords));
        assert!(query.should.is_empty());
        assert_eq!(query.must_not.len(), 3);
        assert!(query.minimum_should_match.is_none());
        assert!(query.suggest.is_empty());
    }

    #[test]
    fn all_words_requires_every_token_on_each_field() {
        let query = compile(&ContentQuery::new("red fox").with_mode(TextMatchMode::AllWords));
        assert_eq!(query.should.len(), 3);
        for clause in &query.should {
            let body = clause.to_json();
            assert_eq!(body["match"][clause.field()]["operator"], "and");
        }
    }

    #[test]
    fn owner_without_threshold_is_single_must() {
        let query = compile(&ProfileQuery {
            owned_by: Some("0xabc".into()),
            min_follower: Some(0),
            ..ProfileQuery::default()
        });
        assert_eq!(
            query.must,
            vec![Clause::Match {
                field: "ownedBy",
                query: "0xabc".into(),
            }]
        );
        assert!(query.should.is_empty());
        assert!(query.must_not.is_empty());
    }

    #[test]
    fn positive_thresholds_compile_to_ranges() {
        let query = compile(&PublicationQuery {
            min_collects: Some(3),
            min_mirror: Some(0),
            ..PublicationQuery::default()
        });
        assert_eq!(query.must.len(), 1);
        assert_eq!(
            query.must[0].to_json(),
            json!({ "range": { "stats.totalAmountOfCollects": { "gte": 3 } } })
        );
    }

    #[test]
    fn top_shape_omits_sort() {
        let top = compile(&PublicationQuery::new("x").with_shape(ResultShape::Top));
        assert!(top.sort.is_none());
        let latest = compile(&PublicationQuery::new("x").with_shape(ResultShape::Latest));
        assert_eq!(latest.sort, Some(Sort::descending("createdAt")));
    }

    #[test]
    fn entities_without_timestamp_never_sort() {
        assert!(compile(&ProfileQuery::new("x")).sort.is_none());
        assert!(compile(&AssetQuery::new("x")).sort.is_none());
    }

    #[test]
    fn photo_shape_adds_prefix_filter() {
        let query = compile(&ContentQuery::new("").with_shape(ResultShape::Photo));
        assert_eq!(
            query.must,
            vec![Clause::Prefix {
                field: "imageMimeType",
                value: "image".into(),
            }]
        );
        assert_eq!(query.sort, Some(Sort::descending("ingested_at")));
    }

    #[test]
    fn scoping_values_ignore_hashtag_coercion() {
        let query = compile(&ContentQuery {
            app_id: Some("lenster".into()),
            ..ContentQuery::new("rust").with_mode(TextMatchMode::Hashtags)
        });
        assert!(query.should.iter().all(|c| c.text() == Some("#rust")));
        assert_eq!(query.must[0].text(), Some("lenster"));
    }

    #[test]
    fn scoping_suggestion_overrides_text_on_shared_field() {
        let query = compile(&ProfileQuery::new("art").with_bio("painter"));
        assert_eq!(query.suggest["bio"].text, "painter");
        assert_eq!(query.suggest["name"].text, "art");
    }

    #[test]
    fn date_window_filters_timestamp() {
        let query = compile(&PublicationQuery {
            dates: DateRange::new(None, NaiveDate::from_ymd_opt(2022, 6, 30)),
            ..PublicationQuery::default()
        });
        assert_eq!(
            query.must[0].to_json(),
            json!({ "range": { "createdAt": { "lte": "2022-06-30" } } })
        );
    }

    #[test]
    fn pagination_carries_into_query() {
        let query = compile(&ContentQuery::new("x").with_pagination(Pagination::new(3, 25)));
        assert_eq!(query.size, 25);
        assert_eq!(query.from, 50);
    }

    #[test]
    fn comments_filter_on_parent() {
        let query = compile_comments(&CommentsQuery::new("0x01-0x02"));
        assert_eq!(
            query.must,
            vec![Clause::Match {
                field: COMMENT_PARENT_FIELD,
                query: "0x01-0x02".into(),
            }]
        );
        assert!(query.sort.is_none());
        assert!(query.suggest.is_empty());
    }
}
