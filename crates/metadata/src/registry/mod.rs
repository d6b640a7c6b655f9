//! Gateway registry - ordered fallback over metadata gateways.

mod gateway_registry;

pub use gateway_registry::GatewayRegistry;
