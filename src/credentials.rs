//! Credential lookup in the OS keychain.
//!
//! API keys live in the system keychain under the `bfx-wallet` service.
//! At startup, [`populate_env_from_keychain`] copies them into the `BFX_*`
//! environment variables so [`crate::config::fetch_config`] picks them up.

use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Keychain service name used for all stored credentials.
const SERVICE: &str = "bfx-wallet";

/// Known API credential keys managed by this module.
#[derive(Clone, Copy, Debug)]
pub enum CredentialKey {
    ApiKey,
    ApiSecret,
}

impl CredentialKey {
    /// Returns the keychain entry identifier.
    pub fn keyring_id(self) -> &'static str {
        match self {
            Self::ApiKey => "bitfinex_api_key",
            Self::ApiSecret => "bitfinex_api_secret",
        }
    }

    /// Returns the environment variable name for this credential.
    pub fn env_var(self) -> &'static str {
        match self {
            Self::ApiKey => "BFX_API_KEY",
            Self::ApiSecret => "BFX_API_SECRET",
        }
    }

    /// All credential keys.
    pub const ALL: [CredentialKey; 2] = [Self::ApiKey, Self::ApiSecret];
}

/// Loads a credential from the keychain, returning `None` if not set.
pub fn load(key: CredentialKey) -> Option<Zeroizing<String>> {
    let entry = keyring::Entry::new(SERVICE, key.keyring_id()).ok()?;
    match entry.get_password() {
        Ok(password) => Some(Zeroizing::new(password)),
        Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            warn!(key = key.keyring_id(), error = %e, "failed to read keychain entry");
            None
        }
    }
}

/// Copies keychain credentials into any `BFX_*` variable that is unset or
/// empty, and returns the keys that were filled in.
///
/// Call this at startup before [`crate::config::fetch_config`].
pub fn populate_env_from_keychain() -> Vec<CredentialKey> {
    populate_env_with(load)
}

/// [`populate_env_from_keychain`] with the keychain lookup supplied by the caller.
fn populate_env_with<L>(mut lookup: L) -> Vec<CredentialKey>
where
    L: FnMut(CredentialKey) -> Option<Zeroizing<String>>,
{
    let mut loaded = Vec::new();
    for key in CredentialKey::ALL {
        let present = std::env::var(key.env_var()).is_ok_and(|v| !v.is_empty());
        if present {
            continue;
        }
        let Some(value) = lookup(key).filter(|v| !v.is_empty()) else {
            continue;
        };

        debug!(key = key.env_var(), "loaded credential from keychain");
        // SAFETY: called from `main` before any other thread is spawned.
        unsafe {
            std::env::set_var(key.env_var(), value.as_str());
        }
        loaded.push(key);
    }
    loaded
}
