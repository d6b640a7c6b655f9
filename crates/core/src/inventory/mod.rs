//! Inventory module - per-flavor enumeration of owned NFTs.

mod inventory_model;
mod inventory_service;


pub use inventory_model::{FractionalPosition, NftAsset};
pub use inventory_service::InventoryService;
