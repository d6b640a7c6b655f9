//! Mintfolio Metadata Crate
//!
//! This crate resolves off-chain NFT metadata through content-addressed
//! storage, independent of any wallet or chain state.
//!
//! # Overview
//!
//! The metadata crate supports:
//! - Canonicalizing every textual form a token URI arrives in
//! - A local cache/proxy service tried before any public gateway
//! - An ordered gateway cascade with one bounded attempt per gateway
//! - Lazy, non-looping endpoint rotation for image fetches
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |    raw tokenURI  | --> |    ContentRef    |  (scheme + identifier)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | GatewayRegistry  |  (ordered cascade)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | MetadataGateway  |  (cache proxy, IPFS hosts)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  MetadataRecord  |  (or terminal Unavailable)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`ContentRef`] - Canonical content identifier; never a URL
//! - [`MetadataRecord`] - Parsed metadata with a fetchable image reference
//! - [`ResolutionOutcome`] - Terminal result value (resolution never throws)
//! - [`GatewayRegistry`] - Ordered fallback over [`MetadataGateway`] impls
//! - [`ImageSource`] - One-attempt-per-endpoint image URL rotation

pub mod errors;
pub mod gateway;
pub mod image;
pub mod models;
pub mod registry;

pub use errors::{MetadataError, RetryClass};
pub use gateway::{CacheProxyGateway, IpfsGateway, MetadataGateway, DEFAULT_GATEWAY_HOSTS};
pub use image::ImageSource;
pub use models::{Attribute, ContentRef, ContentScheme, MetadataRecord, ResolutionOutcome};
pub use registry::GatewayRegistry;
