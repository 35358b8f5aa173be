//! Derives a corrected request from engine suggestions after a zero-hit search.

use crate::{Correction, EntityRequest, Suggestions, TextMatchMode};

/// Folds suggestions back into a copy of `request`.
///
/// Scoping parameters are handled first: every scoping field whose original value is set is
/// withdrawn from the candidate pool, and only [`Correction::Replace`] scopes take the
/// suggested value. The remaining phrases, read in text-field order, replace the free text:
/// all of them joined under [`TextMatchMode::AnyWords`], only the first under any other mode.
///
/// Returns `None` only when the engine offered no usable candidate for any field. Otherwise the
/// copy is returned even if no parameter changed, so the search still gets its second attempt.
pub fn relax<R: EntityRequest>(request: &R, suggestions: &Suggestions) -> Option<R> {
    if suggestions.is_empty() {
        return None;
    }
    let schema = request.schema();
    let mut pool = suggestions.phrases();
    let mut relaxed = request.clone();

    for rule in schema.scopes {
        if request.scope(rule.scope).is_none_or(|v| v.trim().is_empty()) {
            continue;
        }
        let Some(phrase) = pool.remove(rule.field) else {
            continue;
        };
        if rule.correction == Correction::Replace {
            relaxed.set_scope(rule.scope, phrase);
        }
    }

    let mut remaining = schema
        .text_fields
        .iter()
        .filter_map(|field| pool.remove(*field));
    let text = if request.mode() == TextMatchMode::AnyWords {
        remaining.collect::<Vec<_>>().join(" ")
    } else {
        remaining.next().unwrap_or_default()
    };
    if !text.is_empty() {
        relaxed.set_text(text);
    }

    Some(relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContentQuery, ProfileQuery, PublicationQuery, Scope};

    fn suggestions(entries: &[(&str, &[&str])]) -> Suggestions {
        entries
            .iter()
            .map(|(field, candidates)| {
                (
                    (*field).to_string(),
                    candidates.iter().map(|c| (*c).to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn any_words_uses_joined_top_candidates() {
        let request = ContentQuery::new("art");
        let relaxed = relax(&request, &suggestions(&[("content", &["arts", "artsy"])])).unwrap();
        assert_eq!(relaxed.text(), "arts artsy");
        assert_eq!(request.text(), "art");
    }

    #[test]
    fn any_words_concatenates_fields_in_table_order() {
        let request = ContentQuery::new("rsut");
        let relaxed = relax(
            &request,
            &suggestions(&[("name", &["rusty"]), ("content", &["rust"])]),
        )
        .unwrap();
        assert_eq!(relaxed.text(), "rust rusty");
    }

    #[test]
    fn other_modes_use_first_field_only() {
        let request = ContentQuery::new("rsut").with_mode(TextMatchMode::ExactPhrase);
        let relaxed = relax(
            &request,
            &suggestions(&[("name", &["rusty"]), ("description", &["rust"])]),
        )
        .unwrap();
        assert_eq!(relaxed.text(), "rust");
    }

    #[test]
    fn empty_suggestions_produce_nothing() {
        assert!(relax(&ContentQuery::new("art"), &Suggestions::new()).is_none());
        assert!(relax(&ContentQuery::new("art"), &suggestions(&[("content", &[])])).is_none());
    }

    #[test]
    fn identical_suggestion_still_yields_a_retry() {
        let request = ContentQuery::new("art");
        let relaxed = relax(&request, &suggestions(&[("content", &["art"])])).unwrap();
        assert_eq!(relaxed.text(), "art");
    }

    #[test]
    fn bio_is_corrected_and_withheld_from_text() {
        let request = ProfileQuery::new("paynter").with_bio("painer");
        let relaxed = relax(
            &request,
            &suggestions(&[("bio", &["painter"]), ("name", &["painter"])]),
        )
        .unwrap();
        assert_eq!(relaxed.bio.as_deref(), Some("painter"));
        assert_eq!(relaxed.text(), "painter");
    }

    #[test]
    fn bio_suggestion_feeds_text_when_bio_unset() {
        let request = ProfileQuery::new("paynter");
        let relaxed = relax(&request, &suggestions(&[("bio", &["painter"])])).unwrap();
        assert_eq!(relaxed.bio, None);
        assert_eq!(relaxed.text(), "painter");
    }

    #[test]
    fn kept_scopes_are_not_rewritten() {
        let request = PublicationQuery {
            from_users: Some("stani.lens".into()),
            ..PublicationQuery::new("")
        };
        let relaxed = relax(
            &request,
            &suggestions(&[("profile.handle", &["stan.lens"])]),
        )
        .unwrap();
        assert_eq!(relaxed.scope(Scope::Handle), Some("stani.lens"));
        assert_eq!(relaxed.text(), "");
    }

    #[test]
    fn kept_scope_field_is_withheld_from_text() {
        let request = PublicationQuery {
            from_users: Some("stani".into()),
            ..PublicationQuery::new("stani")
        };
        let relaxed = relax(
            &request,
            &suggestions(&[("profile.handle", &["stan"]), ("metadata.name", &["stain"])]),
        )
        .unwrap();
        assert_eq!(relaxed.text(), "stain");
        assert_eq!(relaxed.from_users.as_deref(), Some("stani"));
    }
}
