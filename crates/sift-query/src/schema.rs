//! Static per-entity field tables.
//!
//! Each entity kind maps request parameters to index fields through an [`EntitySchema`].
//! The tables decide clause roles, relaxation behavior and sorting for the compiler; the
//! compiler itself contains no entity-specific branching.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ResultShape;

/// The four searchable entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Ingested content items.
    Content,
    /// Posts published on the social graph.
    Publication,
    /// Social-graph profiles.
    Profile,
    /// Collectible-asset records.
    Asset,
}

impl EntityKind {
    /// Returns the lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Publication => "publication",
            Self::Profile => "profile",
            Self::Asset => "asset",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scoping parameter: one that disambiguates which author, app or profile is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Application identifier.
    AppId,
    /// Author handle.
    Handle,
    /// Profile biography.
    Bio,
    /// Mentioned profiles.
    Mentions,
    /// Owning wallet address.
    OwnedBy,
    /// Profile identifier.
    ProfileId,
}

/// A numeric minimum parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Threshold {
    /// Minimum mirror count.
    Mirrors,
    /// Minimum collect count.
    Collects,
    /// Minimum comment count.
    Comments,
    /// Minimum follower count of the author profile.
    ProfileFollowers,
    /// Minimum post count of the author profile.
    ProfilePosts,
    /// Minimum follower count.
    Followers,
    /// Minimum publication count.
    Publications,
    /// Minimum post count.
    Posts,
}

/// What the relaxation pass may do with a scoping field's suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// The suggestion replaces the scoping value.
    Replace,
    /// The scoping value is kept; the suggestion is only withheld from the free text.
    Keep,
}

/// Routes a scoping parameter to a field as a hard filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeRule {
    /// Request parameter.
    pub scope: Scope,
    /// Index field.
    pub field: &'static str,
    /// Relaxation behavior.
    pub correction: Correction,
}

/// Routes a numeric minimum to a range filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdRule {
    /// Request parameter.
    pub threshold: Threshold,
    /// Index field.
    pub field: &'static str,
}

/// Routes a result shape to a prefix filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeRule {
    /// Shape that activates the filter.
    pub shape: ResultShape,
    /// Index field.
    pub field: &'static str,
    /// Required value prefix.
    pub prefix: &'static str,
}

/// The complete field routing for one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    /// Entity kind described.
    pub kind: EntityKind,
    /// Fields free text is fanned out to, in relaxation order.
    pub text_fields: &'static [&'static str],
    /// Scoping filters.
    pub scopes: &'static [ScopeRule],
    /// Numeric minimums.
    pub thresholds: &'static [ThresholdRule],
    /// Classification filters.
    pub shapes: &'static [ShapeRule],
    /// Field sorted on for recency; `None` means relevance order only.
    pub timestamp: Option<&'static str>,
}

impl EntitySchema {
    /// Returns the rule for a scoping parameter.
    pub fn scope_rule(&self, scope: Scope) -> Option<&ScopeRule> {
        self.scopes.iter().find(|rule| rule.scope == scope)
    }

    /// Returns the prefix filter for a shape, if the entity classifies by it.
    pub fn shape_rule(&self, shape: ResultShape) -> Option<&ShapeRule> {
        self.shapes.iter().find(|rule| rule.shape == shape)
    }
}

/// Field routing for publications.
pub static PUBLICATIONS: EntitySchema = EntitySchema {
    kind: EntityKind::Publication,
    text_fields: &[
        "metadata.content",
        "metadata.description",
        "metadata.name",
        "profile.name",
        "profile.id",
        "profile.bio",
        "profile.location",
        "profile.handle",
        "profile.twitterUrl",
        "profile.ownedBy",
    ],
    scopes: &[
        ScopeRule {
            scope: Scope::AppId,
            field: "appId",
            correction: Correction::Keep,
        },
        ScopeRule {
            scope: Scope::Handle,
            field: "profile.handle",
            correction: Correction::Keep,
        },
        ScopeRule {
            scope: Scope::Bio,
            field: "profile.bio",
            correction: Correction::Replace,
        },
        ScopeRule {
            scope: Scope::Mentions,
            field: "metadata.description",
            correction: Correction::Keep,
        },
    ],
    thresholds: &[
        ThresholdRule {
            threshold: Threshold::Mirrors,
            field: "stats.totalAmountOfMirrors",
        },
        ThresholdRule {
            threshold: Threshold::Collects,
            field: "stats.totalAmountOfCollects",
        },
        ThresholdRule {
            threshold: Threshold::Comments,
            field: "stats.totalAmountOfComments",
        },
        ThresholdRule {
            threshold: Threshold::ProfileFollowers,
            field: "profile.stats.totalFollowers",
        },
        ThresholdRule {
            threshold: Threshold::ProfilePosts,
            field: "profile.stats.totalPosts",
        },
    ],
    shapes: &[
        ShapeRule {
            shape: ResultShape::Links,
            field: "metadata.content",
            prefix: "http",
        },
        ShapeRule {
            shape: ResultShape::Photo,
            field: "metadata.media.original.mimeType",
            prefix: "image",
        },
        ShapeRule {
            shape: ResultShape::Video,
            field: "metadata.media.original.mimeType",
            prefix: "video",
        },
    ],
    timestamp: Some("createdAt"),
};

/// Field routing for profiles.
pub static PROFILES: EntitySchema = EntitySchema {
    kind: EntityKind::Profile,
    text_fields: &["name", "bio", "location", "handle", "twitterUrl"],
    scopes: &[
        ScopeRule {
            scope: Scope::OwnedBy,
            field: "ownedBy",
            correction: Correction::Keep,
        },
        ScopeRule {
            scope: Scope::Bio,
            field: "bio",
            correction: Correction::Replace,
        },
    ],
    thresholds: &[
        ThresholdRule {
            threshold: Threshold::Followers,
            field: "stats.totalFollowers",
        },
        ThresholdRule {
            threshold: Threshold::Publications,
            field: "stats.totalPublications",
        },
        ThresholdRule {
            threshold: Threshold::Comments,
            field: "stats.totalComments",
        },
        ThresholdRule {
            threshold: Threshold::Posts,
            field: "stats.totalPosts",
        },
    ],
    shapes: &[],
    timestamp: None,
};

/// Field routing for collectible assets.
pub static ASSETS: EntitySchema = EntitySchema {
    kind: EntityKind::Asset,
    text_fields: &[
        "contractName",
        "contractAddress",
        "symbol",
        "tokenId",
        "owners.address",
        "ercType",
        "name",
        "description",
        "contentURI",
        "originalContent.uri",
        "collectionName",
    ],
    scopes: &[],
    thresholds: &[],
    shapes: &[],
    timestamp: None,
};

/// Field routing for ingested content.
pub static CONTENTS: EntitySchema = EntitySchema {
    kind: EntityKind::Content,
    text_fields: &["content", "description", "name"],
    scopes: &[
        ScopeRule {
            scope: Scope::AppId,
            field: "appId",
            correction: Correction::Keep,
        },
        ScopeRule {
            scope: Scope::ProfileId,
            field: "profileId",
            correction: Correction::Keep,
        },
    ],
    thresholds: &[],
    shapes: &[
        ShapeRule {
            shape: ResultShape::Links,
            field: "content",
            prefix: "http",
        },
        ShapeRule {
            shape: ResultShape::Photo,
            field: "imageMimeType",
            prefix: "image",
        },
        ShapeRule {
            shape: ResultShape::Video,
            field: "imageMimeType",
            prefix: "video",
        },
    ],
    timestamp: Some("ingested_at"),
};
