//! Canonical content-addressed identifiers.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::MetadataError;

lazy_static! {
    /// CIDv0 ("Qm" + 44 base58 chars) or CIDv1 ("bafy" + base32).
    static ref CID_RE: Regex =
        Regex::new(r"(Qm[1-9A-HJ-NP-Za-km-z]{44}|bafy[a-z2-7]{20,})").expect("valid CID pattern");
}

/// Addressing scheme of a content identifier.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentScheme {
    Ipfs,
}

impl ContentScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ipfs => "ipfs",
        }
    }
}

/// A normalized content identifier: scheme plus hash, never a URL.
///
/// Every accepted textual form normalizes to the same `ContentRef` - an
/// `ipfs://` URI (including the single-slash and doubled variants seen in
/// the wild), a gateway URL that may itself wrap another gateway URL, or a
/// bare hash. Because the normalized form carries no host, every resolution
/// step chooses its own gateway.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct ContentRef {
    scheme: ContentScheme,
    id: String,
}

impl ContentRef {
    /// Parse any accepted textual form into a canonical reference.
    ///
    /// Fails with [`MetadataError::UnrecognizedUri`] when no content hash
    /// can be located in the input.
    pub fn parse(raw: &str) -> Result<Self, MetadataError> {
        let mut rest = raw.trim();
        if rest.is_empty() {
            return Err(MetadataError::UnrecognizedUri(raw.to_string()));
        }

        // Peel scheme prefixes; re-uploaded URIs sometimes arrive doubled
        // ("ipfs://ipfs://Qm..." or "ipfs://ipfs/Qm...").
        loop {
            if let Some(stripped) = rest.strip_prefix("ipfs://") {
                rest = stripped;
            } else if let Some(stripped) = rest.strip_prefix("ipfs:/") {
                rest = stripped;
            } else if let Some(stripped) = rest.strip_prefix("ipfs/") {
                rest = stripped;
            } else {
                break;
            }
        }

        match CID_RE.find(rest) {
            Some(m) => Ok(Self {
                scheme: ContentScheme::Ipfs,
                id: m.as_str().to_string(),
            }),
            None => Err(MetadataError::UnrecognizedUri(raw.to_string())),
        }
    }

    /// The bare content hash.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn scheme(&self) -> ContentScheme {
        self.scheme
    }

    /// Canonical textual form, e.g. `ipfs://Qm...`.
    pub fn uri(&self) -> String {
        format!("{}://{}", self.scheme.as_str(), self.id)
    }

    /// Fetchable URL through the given gateway host.
    pub fn gateway_url(&self, host: &str) -> String {
        format!("https://{}/ipfs/{}", host, self.id)
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri())
    }
}
