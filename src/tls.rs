//! TLS configuration with an operator-supplied CA bundle.
//!
//! Builds a [`rustls::ClientConfig`] that trusts only the certificates in
//! a PEM file, for deployments that pin the exchange's CA chain or sit
//! behind an intercepting proxy.

use std::path::Path;

use rustls::ClientConfig;

use crate::Result;

/// Builds a [`ClientConfig`] whose root store contains only the
/// certificates found in the PEM file at `path`.
///
/// # Errors
///
/// Returns [`BfxError::Tls`](crate::BfxError::Tls) if the file cannot be
/// read, cannot be parsed, or contains no certificates.
pub fn build_tls_config(path: &Path) -> Result<ClientConfig> {
    let pem = std::fs::read(path)
        .map_err(|e| crate::BfxError::Tls(format!("failed to read {}: {e}", path.display())))?;

    let certs: Vec<_> = rustls_pemfile::certs(&mut &pem[..])
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| crate::BfxError::Tls(format!("failed to parse CA PEM: {e}")))?;

    if certs.is_empty() {
        return Err(crate::BfxError::Tls(format!(
            "no certificates found in {}",
            path.display()
        )));
    }

    let mut root_store = rustls::RootCertStore::empty();
    root_store.add_parsable_certificates(certs);

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(config)
}
