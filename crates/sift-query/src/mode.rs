//! Enumerated request knobs: text-matching disciplines, result shapes and clause roles.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a knob name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseKnobError {
    /// Human-readable name of the knob being parsed.
    kind: &'static str,
    /// The rejected input.
    value: String,
    /// Comma-separated list of accepted names.
    expected: String,
}

impl ParseKnobError {
    /// Builds an error listing the accepted names.
    fn new(kind: &'static str, value: &str, accepted: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: accepted.join(", "),
        }
    }
}

/// Normalizes a knob name so `all-words`, `ALL_WORDS` and `all_words` compare equal.
fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase().replace('-', "_")
}

/// How free text is matched against each field it is fanned out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMatchMode {
    /// Tokens must appear contiguously and in order.
    ExactPhrase,
    /// Every token must appear (logical AND).
    AllWords,
    /// At least one token must appear (logical OR).
    #[default]
    AnyWords,
    /// Every token is coerced to a hashtag before matching.
    Hashtags,
    /// The text becomes an exclusion rather than a positive filter.
    NoneOfWords,
}

impl TextMatchMode {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::ExactPhrase,
        Self::AllWords,
        Self::AnyWords,
        Self::Hashtags,
        Self::NoneOfWords,
    ];

    /// Returns the wire name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExactPhrase => "exact_phrase",
            Self::AllWords => "all_words",
            Self::AnyWords => "any_words",
            Self::Hashtags => "hashtags",
            Self::NoneOfWords => "none_of_words",
        }
    }

    /// The discipline applied to scoping filters compiled under this mode.
    ///
    /// Hashtag coercion and exclusion describe free text only; scoping values such as an
    /// owner handle keep plain relevance matching under those modes.
    pub fn for_scoping(self) -> Self {
        match self {
            Self::Hashtags | Self::NoneOfWords => Self::AnyWords,
            other => other,
        }
    }
}

impl fmt::Display for TextMatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextMatchMode {
    type Err = ParseKnobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|m| m.as_str()).collect();
                ParseKnobError::new("match mode", s, &names)
            })
    }
}

/// Caller-requested classification hint that adds filter or sort behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultShape {
    /// Most recent first.
    #[default]
    Latest,
    /// Only documents carrying links.
    Links,
    /// Only photo documents.
    Photo,
    /// Only video documents.
    Video,
    /// Relevance order as scored by the engine.
    Top,
}

impl ResultShape {
    /// Every shape, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Latest,
        Self::Links,
        Self::Photo,
        Self::Video,
        Self::Top,
    ];

    /// Returns the wire name of the shape.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Links => "links",
            Self::Photo => "photo",
            Self::Video => "video",
            Self::Top => "top",
        }
    }
}

impl fmt::Display for ResultShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultShape {
    type Err = ParseKnobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|shape| shape.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                ParseKnobError::new("result shape", s, &names)
            })
    }
}

/// The boolean bucket a compiled clause is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseRole {
    /// Required to match.
    Must,
    /// Contributes to relevance; at least one must match when the bucket is non-empty.
    Should,
    /// Excludes matching documents.
    MustNot,
}

impl ClauseRole {
    /// Returns the bucket name used in the engine's boolean query.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Must => "must",
            Self::Should => "should",
            Self::MustNot => "must_not",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_defaults_to_any_words() {
        assert_eq!(TextMatchMode::default(), TextMatchMode::AnyWords);
    }

    #[test]
    fn mode_parses_wire_and_dashed_names() {
        assert_eq!(
            "all_words".parse::<TextMatchMode>().unwrap(),
            TextMatchMode::AllWords
        );
        assert_eq!(
            "None-Of-Words".parse::<TextMatchMode>().unwrap(),
            TextMatchMode::NoneOfWords
        );
    }

    #[test]
    fn unknown_mode_lists_choices() {
        let err = "fuzzy".parse::<TextMatchMode>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("fuzzy"));
        assert!(message.contains("exact_phrase"));
    }

    #[test]
    fn scoping_discipline_drops_text_only_modes() {
        assert_eq!(
            TextMatchMode::Hashtags.for_scoping(),
            TextMatchMode::AnyWords
        );
        assert_eq!(
            TextMatchMode::NoneOfWords.for_scoping(),
            TextMatchMode::AnyWords
        );
        assert_eq!(
            TextMatchMode::ExactPhrase.for_scoping(),
            TextMatchMode::ExactPhrase
        );
    }

    #[test]
    fn shape_round_trips_through_display() {
        for shape in ResultShape::ALL {
            assert_eq!(shape.to_string().parse::<ResultShape>().unwrap(), shape);
        }
    }

    #[test]
    fn role_bucket_names() {
        assert_eq!(ClauseRole::Must.as_str(), "must");
        assert_eq!(ClauseRole::MustNot.as_str(), "must_not");
    }
}
