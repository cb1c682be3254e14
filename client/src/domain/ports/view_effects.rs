//! Port for presentation effects the controller must wait on.

use async_trait::async_trait;

/// Transitions owned by the renderer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ViewEffects: Send + Sync {
    /// Resolve once the logout overlay has faded out.
    async fn fade_out_logout_overlay(&self);
}

/// Effects that complete immediately, for headless use and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateViewEffects;

#[async_trait]
impl ViewEffects for ImmediateViewEffects {
    async fn fade_out_logout_overlay(&self) {}
}
