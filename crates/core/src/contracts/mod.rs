//! Contracts module - flavors, deployments, handles, and the call surface.

mod abi;
mod contracts_errors;
mod contracts_model;
mod contracts_traits;
mod deployments;
mod handle_factory;
mod rpc_contract;

pub use abi::{IFlavorNft, IFractionShare};
pub use contracts_errors::{ContractCallError, ContractError};
pub use contracts_model::{ContractHandle, Flavor};
pub use contracts_traits::{ContractConnector, NftContract};
pub use deployments::DeploymentRegistry;
pub use handle_factory::HandleFactory;
pub use rpc_contract::{RpcContractConnector, RpcNftContract};
