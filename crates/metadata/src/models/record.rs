//! Parsed token metadata records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ContentRef;
use crate::errors::MetadataError;

/// One entry of a record's free-form attribute list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(default)]
    pub trait_type: String,
    pub value: Value,
}

/// Wire shape of a metadata document as gateways serve it.
///
/// Field tolerance follows what marketplaces actually emit: `image` may
/// arrive under an alias, attributes may be absent.
#[derive(Debug, Deserialize)]
struct RawMetadata {
    name: Option<String>,
    description: Option<String>,
    #[serde(alias = "image_url", alias = "imageUrl")]
    image: Option<String>,
    #[serde(default)]
    attributes: Vec<Attribute>,
}

/// A canonical metadata record ready for presentation.
///
/// The `image` field is always a directly fetchable URL; raw
/// content-addressed identifiers never leave this crate unresolved. When
/// the image was content-addressed, `image_ref` keeps the canonical form so
/// render layers can rotate delivery endpoints lazily.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub image_ref: Option<ContentRef>,
    pub attributes: Vec<Attribute>,
}

impl MetadataRecord {
    /// Parse a fetched JSON document into a record.
    ///
    /// The image reference is left as served; callers run
    /// [`normalize_refs`](Self::normalize_refs) before handing the record out.
    pub fn from_value(gateway: &str, value: Value) -> Result<Self, MetadataError> {
        let raw: RawMetadata =
            serde_json::from_value(value).map_err(|e| MetadataError::InvalidRecord {
                gateway: gateway.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            name: raw.name,
            description: raw.description,
            image: raw.image,
            image_ref: None,
            attributes: raw.attributes,
        })
    }

    /// Canonicalize the embedded asset references.
    ///
    /// The image and any content-addressed attribute value are rewritten
    /// to fetchable URLs on `primary_host`; the image's canonical form is
    /// retained in `image_ref`. Plain HTTP(S) URLs pass through unchanged;
    /// an image reference that is neither is dropped rather than handed to
    /// the presentation layer unresolvable. Idempotent.
    pub fn normalize_refs(&mut self, primary_host: &str) {
        if let Some(raw) = self.image.take() {
            match ContentRef::parse(&raw) {
                Ok(content) => {
                    self.image = Some(content.gateway_url(primary_host));
                    self.image_ref = Some(content);
                }
                Err(_) if raw.starts_with("http://") || raw.starts_with("https://") => {
                    self.image = Some(raw);
                }
                Err(_) => {
                    log::debug!("dropping unresolvable image reference: {}", raw);
                }
            }
        }

        for attribute in &mut self.attributes {
            if let Some(raw) = attribute.value.as_str() {
                if let Ok(content) = ContentRef::parse(raw) {
                    attribute.value = Value::String(content.gateway_url(primary_host));
                }
            }
        }
    }
}

/// Terminal result of a metadata resolution.
///
/// Resolution never raises past the registry boundary; exhausting every
/// step yields `Unavailable` so callers can attach a placeholder instead of
/// dropping the asset.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolutionOutcome {
    Resolved(MetadataRecord),
    Unavailable,
}

impl ResolutionOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The resolved record, if any.
    pub fn record(&self) -> Option<&MetadataRecord> {
        match self {
            Self::Resolved(record) => Some(record),
            Self::Unavailable => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CID: &str = "QmPK1s3pNYLi9ERiq3BDxKa4XosgWwFRQUydHUtz4YgpqB";

    #[test]
    fn test_from_value_full_record() {
        let value = json!({
            "name": "Sunset #7",
            "description": "A test piece",
            "image": format!("ipfs://{}", CID),
            "attributes": [
                { "trait_type": "Background", "value": "Orange" },
                { "trait_type": "Edition", "value": 7 }
            ]
        });

        let record = MetadataRecord::from_value("test", value).unwrap();
        assert_eq!(record.name.as_deref(), Some("Sunset #7"));
        assert_eq!(record.attributes.len(), 2);
        assert_eq!(record.attributes[0].trait_type, "Background");
    }

    #[test]
    fn test_from_value_tolerates_missing_fields() {
        let record = MetadataRecord::from_value("test", json!({})).unwrap();
        assert!(record.name.is_none());
        assert!(record.image.is_none());
        assert!(record.attributes.is_empty());
    }

    #[test]
    fn test_from_value_image_url_alias() {
        let value = json!({ "image_url": "https://example.com/a.png" });
        let record = MetadataRecord::from_value("test", value).unwrap();
        assert_eq!(record.image.as_deref(), Some("https://example.com/a.png"));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        assert!(MetadataRecord::from_value("test", json!("just a string")).is_err());
    }

    #[test]
    fn test_normalize_refs_rewrites_content_image() {
        let value = json!({ "image": format!("ipfs://{}", CID) });
        let mut record = MetadataRecord::from_value("test", value).unwrap();
        record.normalize_refs("ipfs.io");

        assert_eq!(
            record.image.as_deref(),
            Some(format!("https://ipfs.io/ipfs/{}", CID).as_str())
        );
        assert_eq!(record.image_ref.as_ref().map(|c| c.id()), Some(CID));
    }

    #[test]
    fn test_normalize_refs_keeps_plain_url() {
        let value = json!({ "image": "https://example.com/a.png" });
        let mut record = MetadataRecord::from_value("test", value).unwrap();
        record.normalize_refs("ipfs.io");

        assert_eq!(record.image.as_deref(), Some("https://example.com/a.png"));
        assert!(record.image_ref.is_none());
    }

    #[test]
    fn test_normalize_refs_drops_garbage_image() {
        let value = json!({ "image": "not a reference" });
        let mut record = MetadataRecord::from_value("test", value).unwrap();
        record.normalize_refs("ipfs.io");

        assert!(record.image.is_none());
    }

    #[test]
    fn test_normalize_refs_rewrites_content_addressed_attributes() {
        let value = json!({
            "attributes": [
                { "trait_type": "Certificate", "value": format!("ipfs://{}", CID) },
                { "trait_type": "Background", "value": "Orange" },
                { "trait_type": "Edition", "value": 7 }
            ]
        });
        let mut record = MetadataRecord::from_value("test", value).unwrap();
        record.normalize_refs("ipfs.io");

        assert_eq!(
            record.attributes[0].value,
            json!(format!("https://ipfs.io/ipfs/{}", CID))
        );
        // Non-reference values pass through untouched.
        assert_eq!(record.attributes[1].value, json!("Orange"));
        assert_eq!(record.attributes[2].value, json!(7));
    }

    #[test]
    fn test_normalize_refs_is_idempotent() {
        let value = json!({ "image": format!("ipfs://{}", CID) });
        let mut record = MetadataRecord::from_value("test", value).unwrap();
        record.normalize_refs("ipfs.io");
        let once = record.clone();
        record.normalize_refs("ipfs.io");

        assert_eq!(record, once);
    }
}
