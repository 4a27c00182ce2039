//! Signers whose key lives elsewhere and must be resolved first.

use crate::error::{SuiError, SuiResult};
use crate::signer::ReadySigner;
use crate::types::SuiAddress;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Source of a [`ReadySigner`] for an address, such as a wallet connection
/// or a remote key service.
#[async_trait]
pub trait SignerProvider: Send + Sync {
    /// Obtains a signer for `address`.
    ///
    /// Implementations should fail with [`SuiError::SignerUnavailable`] when
    /// the key cannot be reached.
    async fn resolve(&self, address: SuiAddress) -> SuiResult<Arc<dyn ReadySigner>>;
}

/// A signer resolved on first use through a [`SignerProvider`].
///
/// The address is known up front so transactions can be built before the
/// key is reachable. The first successful [`resolve`](Self::resolve) is
/// cached; a failed one may be retried.
pub struct DeferredSigner {
    address: SuiAddress,
    provider: Arc<dyn SignerProvider>,
    timeout: Duration,
    resolved: OnceCell<Arc<dyn ReadySigner>>,
}

impl DeferredSigner {
    /// How long [`resolve`](Self::resolve) waits by default.
    pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a deferred signer for `address`.
    pub fn new(address: SuiAddress, provider: Arc<dyn SignerProvider>) -> Self {
        Self {
            address,
            provider,
            timeout: Self::DEFAULT_RESOLVE_TIMEOUT,
            resolved: OnceCell::new(),
        }
    }

    /// Sets the resolution timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The address this signer signs for.
    pub fn address(&self) -> SuiAddress {
        self.address
    }

    /// Whether a signer has been resolved and cached.
    pub fn is_resolved(&self) -> bool {
        self.resolved.initialized()
    }

    /// Resolves the signer, waiting on the provider at most once per success.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::SignerUnavailable`] if the provider fails, times
    /// out, or hands back a signer for a different address.
    /// [`SuiError::UserRejected`] from the provider is passed through.
    pub async fn resolve(&self) -> SuiResult<Arc<dyn ReadySigner>> {
        let signer = self
            .resolved
            .get_or_try_init(|| self.resolve_uncached())
            .await?;
        Ok(Arc::clone(signer))
    }

    async fn resolve_uncached(&self) -> SuiResult<Arc<dyn ReadySigner>> {
        debug!(address = %self.address, "resolving signer");
        let signer = match tokio::time::timeout(self.timeout, self.provider.resolve(self.address))
            .await
        {
            Ok(Ok(signer)) => signer,
            Ok(Err(e @ (SuiError::SignerUnavailable(_) | SuiError::UserRejected))) => {
                warn!(address = %self.address, error = %e, "signer resolution failed");
                return Err(e);
            }
            Ok(Err(e)) => {
                warn!(address = %self.address, error = %e, "signer resolution failed");
                return Err(SuiError::SignerUnavailable(e.to_string()));
            }
            Err(_) => {
                warn!(address = %self.address, timeout = ?self.timeout, "signer resolution timed out");
                return Err(SuiError::SignerUnavailable(format!(
                    "no signer for {} within {:?}",
                    self.address, self.timeout
                )));
            }
        };

        if signer.address() != self.address {
            return Err(SuiError::SignerUnavailable(format!(
                "provider returned a signer for {} instead of {}",
                signer.address(),
                self.address
            )));
        }
        debug!(address = %self.address, scheme = %signer.scheme(), "signer resolved");
        Ok(signer)
    }
}

impl fmt::Debug for DeferredSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredSigner")
            .field("address", &self.address)
            .field("timeout", &self.timeout)
            .field("resolved", &self.is_resolved())
            .finish_non_exhaustive()
    }
}
