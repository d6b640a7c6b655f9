//! Injected provider selection.

use log::debug;

use super::provider_model::{HostEnvironment, InjectedProvider};
use crate::session::SessionError;

/// Select the EVM wallet injection to use.
///
/// A single injection is used as-is when it speaks EVM. When several
/// wallets announce themselves at once, the first EVM-capable one wins;
/// a known non-EVM wallet occupying the slot is skipped rather than
/// guessed at. With no injection at all the caller may offer remote
/// pairing - that path is user-initiated, never taken here.
pub fn locate(env: &HostEnvironment) -> Result<InjectedProvider, SessionError> {
    let injected = env.injected();
    if injected.is_empty() {
        return Err(SessionError::NoInjectedProvider);
    }

    match injected.iter().find(|p| p.evm) {
        Some(provider) => {
            debug!("selected injected wallet '{}'", provider.label);
            Ok(provider.clone())
        }
        None => Err(SessionError::NoEvmProvider),
    }
}
