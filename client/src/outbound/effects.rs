//! View effects backed by timers.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ports::ViewEffects;

/// Length of the logout overlay fade.
pub const LOGOUT_FADE: Duration = Duration::from_millis(300);

/// Effects that resolve after a fixed transition time.
#[derive(Debug, Clone, Copy)]
pub struct TimedViewEffects {
    logout_fade: Duration,
}

impl TimedViewEffects {
    /// Effects with a custom fade length.
    pub const fn new(logout_fade: Duration) -> Self {
        Self { logout_fade }
    }
}

impl Default for TimedViewEffects {
    fn default() -> Self {
        Self::new(LOGOUT_FADE)
    }
}

#[async_trait]
impl ViewEffects for TimedViewEffects {
    async fn fade_out_logout_overlay(&self) {
        tokio::time::sleep(self.logout_fade).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fade_waits_for_the_transition() {
        let started = tokio::time::Instant::now();
        TimedViewEffects::default().fade_out_logout_overlay().await;
        assert!(started.elapsed() >= LOGOUT_FADE);
    }
}
