//! Bridges an identity-provider session onto the storage backend.

use tracing::warn;

use crate::{
    runtime::handle::{BookLogHandle, RuntimeError},
    types::UserId,
};

/// Token template requested from the identity provider by default.
pub const DEFAULT_TOKEN_TEMPLATE: &str = "integration_storage";

/// Minimal surface of the identity provider.
pub trait IdentityProvider: Send + Sync {
    /// True once the provider has resolved the session either way.
    fn is_loaded(&self) -> bool;
    /// True when a user session is active.
    fn is_signed_in(&self) -> bool;
    /// Identifier of the signed-in user.
    fn user_id(&self) -> Option<UserId>;
    /// Mints a credential for the named template, if the provider can.
    fn get_token(&self, template: &str) -> Option<String>;
}

/// Exchanges the provider session for a storage-scoped session.
///
/// Idempotent: re-running with an already-bridged session is a no-op inside
/// the runtime, and running with no provider session clears any bridged
/// credential. Bridging failure leaves the runtime unauthenticated for
/// storage purposes and is only logged; nothing else stops rendering.
#[derive(Debug, Clone)]
pub struct SessionBridge {
    template: String,
}

impl Default for SessionBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBridge {
    /// Bridge using [`DEFAULT_TOKEN_TEMPLATE`].
    pub fn new() -> Self {
        Self::with_template(DEFAULT_TOKEN_TEMPLATE)
    }

    /// Bridge using a custom token template.
    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Template this bridge requests tokens for.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Aligns the runtime's storage session with the provider session.
    ///
    /// Returns the owner the storage side ended up with, or `None` when
    /// unauthenticated. Errors only when the runtime itself is gone.
    pub async fn sync(
        &self,
        provider: &dyn IdentityProvider,
        handle: &BookLogHandle,
    ) -> Result<Option<UserId>, RuntimeError> {
        if !provider.is_loaded() {
            return handle.owner().await;
        }

        let provider_id = provider.user_id();
        if !provider.is_signed_in() || provider_id.is_none() {
            handle.sign_out().await?;
            return Ok(None);
        }

        let Some(token) = provider.get_token(&self.template) else {
            warn!(template = %self.template, "identity provider returned no token");
            handle.sign_out().await?;
            return Ok(None);
        };

        let owner = handle.sign_in(token).await?;
        if let (Some(owner), Some(provider_id)) = (&owner, &provider_id)
            && owner != provider_id
        {
            warn!(%owner, %provider_id, "bridged owner disagrees with provider");
        }
        Ok(owner)
    }
}
