//! The one-shot relaxation controller.
//!
//! A request is executed once. When that attempt matches nothing, the engine's term
//! suggestions are folded into a copy of the request and the copy is executed once more.
//! The second attempt is final whatever it returns, so a search costs at most two engine
//! round trips.

use serde::Serialize;
use sift_query::{EntityRequest, compile, relax};
use tracing::{debug, info};

use crate::{EngineError, EngineResponse, SearchEngine};

/// Which attempt produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attempt {
    /// The request as given.
    First,
    /// The relaxed copy. Terminal.
    Retried,
}

/// The final response together with the request that produced it.
#[derive(Debug, Clone)]
pub struct Outcome<R> {
    /// Effective request: the original, or its relaxed copy.
    pub request: R,
    /// Engine response for `request`.
    pub response: EngineResponse,
    /// Attempt that produced `response`.
    pub attempt: Attempt,
}

impl<R> Outcome<R> {
    /// Whether the relaxed copy was executed.
    pub fn relaxed(&self) -> bool {
        self.attempt == Attempt::Retried
    }
}

/// Runs entity searches against one index with a single relaxation pass.
#[derive(Debug, Clone, Copy)]
pub struct RelaxationController<'a, E> {
    /// Engine queried.
    engine: &'a E,
    /// Index searched.
    index: &'a str,
}

impl<'a, E: SearchEngine> RelaxationController<'a, E> {
    /// Creates a controller searching `index`.
    pub fn new(engine: &'a E, index: &'a str) -> Self {
        Self { engine, index }
    }

    /// Executes `request`, relaxing it once if nothing matched.
    ///
    /// Engine failures of either attempt are returned unchanged. A failed first attempt
    /// never leads to a second one.
    pub fn run<R: EntityRequest>(&self, request: R) -> Result<Outcome<R>, EngineError> {
        let response = self.execute(&request, Attempt::First)?;
        let first = Outcome {
            request,
            response,
            attempt: Attempt::First,
        };
        if !first.response.is_empty() {
            return Ok(first);
        }

        let Some(relaxed) = relax(&first.request, &first.response.suggestions) else {
            debug!(index = self.index, "no usable suggestions, keeping empty result");
            return Ok(first);
        };

        info!(
            index = self.index,
            from = first.request.text(),
            to = relaxed.text(),
            "relaxing zero-hit search"
        );
        let response = self.execute(&relaxed, Attempt::Retried)?;
        Ok(Outcome {
            request: relaxed,
            response,
            attempt: Attempt::Retried,
        })
    }

    /// Compiles and executes one attempt.
    fn execute<R: EntityRequest>(
        &self,
        request: &R,
        attempt: Attempt,
    ) -> Result<EngineResponse, EngineError> {
        let query = compile(request);
        debug!(
            index = self.index,
            kind = %request.schema().kind,
            ?attempt,
            from = query.from,
            size = query.size,
            "dispatching search"
        );
        let response = self.engine.search(self.index, &query)?;
        debug!(index = self.index, total = response.total, ?attempt, "search answered");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use sift_query::{ProfileQuery, PublicationQuery, Scope, Suggestions};

    use super::*;
    use crate::testing::{FakeEngine, hits, suggesting};

    #[test]
    fn test_hits_on_first_attempt_are_final() {
        let engine = FakeEngine::new(vec![Ok(hits(3))]);
        let outcome = RelaxationController::new(&engine, "posts")
            .run(PublicationQuery::new("lens"))
            .unwrap();

        assert_eq!(outcome.attempt, Attempt::First);
        assert_eq!(outcome.response.total, 3);
        assert_eq!(engine.calls(), 1);
    }

    #[test]
    fn test_second_empty_response_does_not_trigger_third_attempt() {
        let engine = FakeEngine::new(vec![
            Ok(suggesting(&[("metadata.content", &["lenz"])])),
            Ok(suggesting(&[("metadata.content", &["lens"])])),
            Ok(hits(9)),
        ]);
        let outcome = RelaxationController::new(&engine, "posts")
            .run(PublicationQuery::new("lnes"))
            .unwrap();

        assert_eq!(engine.calls(), 2);
        assert!(outcome.relaxed());
        assert!(outcome.response.is_empty());
        assert_eq!(outcome.request.text(), "lenz");
    }

    #[test]
    fn test_no_suggestions_returns_first_response() {
        let engine = FakeEngine::new(vec![Ok(EngineResponse::default())]);
        let outcome = RelaxationController::new(&engine, "posts")
            .run(PublicationQuery::new("qqqq"))
            .unwrap();

        assert_eq!(engine.calls(), 1);
        assert_eq!(outcome.attempt, Attempt::First);
        assert_eq!(outcome.request.text(), "qqqq");
    }

    #[test]
    fn test_suggestion_equal_to_input_is_still_retried() {
        let engine = FakeEngine::new(vec![
            Ok(suggesting(&[("metadata.content", &["lens"])])),
            Ok(hits(1)),
        ]);
        let outcome = RelaxationController::new(&engine, "posts")
            .run(PublicationQuery::new("lens"))
            .unwrap();

        assert_eq!(engine.calls(), 2);
        assert!(outcome.relaxed());
        assert_eq!(outcome.request.text(), "lens");
        assert_eq!(outcome.response.total, 1);
    }

    #[test]
    fn test_kept_scope_suggestion_still_triggers_retry() {
        let engine = FakeEngine::new(vec![
            Ok(suggesting(&[("profile.handle", &["stan"])])),
            Ok(hits(1)),
        ]);
        let request = PublicationQuery {
            from_users: Some("stani".into()),
            ..PublicationQuery::new("")
        };
        let outcome = RelaxationController::new(&engine, "posts")
            .run(request)
            .unwrap();

        assert_eq!(engine.calls(), 2);
        assert!(outcome.relaxed());
        assert_eq!(outcome.request.scope(Scope::Handle), Some("stani"));
    }

    #[test]
    fn test_failed_first_attempt_is_not_retried() {
        let engine = FakeEngine::new(vec![
            Err(EngineError::Timeout("deadline".into())),
            Ok(hits(1)),
        ]);
        let err = RelaxationController::new(&engine, "posts")
            .run(PublicationQuery::new("lens"))
            .unwrap_err();

        assert!(matches!(err, EngineError::Timeout(_)));
        assert_eq!(engine.calls(), 1);
    }

    #[test]
    fn test_failed_second_attempt_propagates() {
        let engine = FakeEngine::new(vec![
            Ok(suggesting(&[("metadata.content", &["lens"])])),
            Err(EngineError::Unavailable("connection reset".into())),
        ]);
        let err = RelaxationController::new(&engine, "posts")
            .run(PublicationQuery::new("lnes"))
            .unwrap_err();

        assert!(matches!(err, EngineError::Unavailable(_)));
        assert_eq!(engine.calls(), 2);
    }

    #[test]
    fn test_scoping_correction_is_sent_on_retry() {
        let mut response = EngineResponse::default();
        response.suggestions = [("bio".to_string(), vec!["designer".to_string()])]
            .into_iter()
            .collect::<Suggestions>();
        let engine = FakeEngine::new(vec![Ok(response), Ok(hits(2))]);

        let outcome = RelaxationController::new(&engine, "profiles")
            .run(ProfileQuery::new("").with_bio("desinger"))
            .unwrap();

        assert!(outcome.relaxed());
        assert_eq!(outcome.request.scope(Scope::Bio), Some("designer"));
        assert_eq!(outcome.response.total, 2);
        let retried = &engine.queries()[1];
        assert!(retried.must.iter().any(|c| c.text() == Some("designer")));
    }
}
