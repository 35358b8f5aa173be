//! Content documents accepted by bulk ingestion.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sift_query::INGESTED_AT_FIELD;

use crate::BulkDocument;

/// A trait of a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAttribute {
    /// Trait name.
    pub trait_type: String,
    /// Trait value.
    pub value: i64,
}

/// A media item attached to content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMedia {
    /// Media location.
    pub item: String,
    /// MIME type of `item`.
    pub mime_type: String,
}

/// A content metadata document as submitted for ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDocument {
    /// Metadata identifier, used as the document id.
    pub metadata_id: String,
    /// Metadata schema version.
    pub version: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Body text.
    #[serde(default, alias = "contents", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// External link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Traits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<ContentAttribute>>,
    /// Cover image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// MIME type of `image`.
    #[serde(
        default,
        rename = "imageMimeType",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_mime_type: Option<String>,
    /// Attached media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<ContentMedia>>,
    /// Publishing application.
    #[serde(rename = "appId")]
    pub app_id: String,
    /// Publishing profile.
    #[serde(default, rename = "profileId", skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
}

impl ContentDocument {
    /// Converts the document into a bulk entry stamped with `ingested_at`.
    pub fn into_bulk(self, ingested_at: DateTime<Utc>) -> Result<BulkDocument, serde_json::Error> {
        let id = self.metadata_id.clone();
        let mut source = serde_json::to_value(self)?;
        if let Value::Object(fields) = &mut source {
            fields.insert(
                INGESTED_AT_FIELD.to_string(),
                Value::String(ingested_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            );
        }
        Ok(BulkDocument { id, source })
    }
}

/// Parses a batch of content documents from a JSON array.
pub fn parse_contents(json: &str) -> Result<Vec<ContentDocument>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn document() -> ContentDocument {
        serde_json::from_value(json!({
            "version": "2.0.0",
            "metadata_id": "meta-1",
            "contents": "gm from the lens garden",
            "name": "Post by @alice",
            "attributes": [{ "traitType": "type", "value": 1 }],
            "imageMimeType": "image/png",
            "media": [{ "item": "ipfs://x", "mimeType": "image/png" }],
            "appId": "lenster"
        }))
        .unwrap()
    }

    #[test]
    fn test_accepts_contents_alias() {
        let doc = document();
        assert_eq!(doc.content.as_deref(), Some("gm from the lens garden"));
        assert_eq!(doc.attributes.as_ref().unwrap()[0].trait_type, "type");
        assert!(doc.profile_id.is_none());
    }

    #[test]
    fn test_bulk_entry_is_stamped_and_keyed() {
        let at = Utc.with_ymd_and_hms(2022, 7, 3, 9, 30, 0).unwrap();
        let entry = document().into_bulk(at).unwrap();

        assert_eq!(entry.id, "meta-1");
        assert_eq!(entry.source["ingested_at"], "2022-07-03T09:30:00.000Z");
        assert_eq!(entry.source["content"], "gm from the lens garden");
        assert_eq!(entry.source["imageMimeType"], "image/png");
        assert_eq!(entry.source["appId"], "lenster");
        assert!(entry.source.get("description").is_none());
    }

    #[test]
    fn test_missing_required_fields_rejected() {
        let err = parse_contents(r#"[{ "metadata_id": "m" }]"#).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn test_parse_batch() {
        let docs = parse_contents(
            r#"[
                { "version": "1", "metadata_id": "a", "appId": "lenster" },
                { "version": "1", "metadata_id": "b", "appId": "orb", "profileId": "0x01" }
            ]"#,
        )
        .unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].profile_id.as_deref(), Some("0x01"));
    }
}
