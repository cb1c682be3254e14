//! Port construction for the fixture and platform backends.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;
use url::Url;

use crate::config::AppSettings;
use crate::controller::AppPorts;
use crate::outbound::effects::TimedViewEffects;
use crate::outbound::fixture::FixtureApi;
use crate::outbound::http::HttpApi;
use crate::outbound::metrics::TracingMetrics;
use crate::outbound::processing::ChronologicalProcessor;

/// Failures while assembling the ports.
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    /// The bundled fixture data did not decode.
    #[error("fixture seed is invalid: {0}")]
    Seed(#[from] serde_json::Error),
    /// The configured API host is not a URL.
    #[error("API host is invalid: {0}")]
    ApiHost(#[from] url::ParseError),
    /// The HTTP client could not be built.
    #[error("HTTP client could not be built: {0}")]
    Client(#[from] reqwest::Error),
}

/// Build the controller ports for `settings`.
///
/// Uses the in-memory fixture API when mock mode is on, steered by the mock
/// parameters of `settings` overlaid with the query of `url`; otherwise talks
/// to the configured platform API.
///
/// # Errors
/// Returns [`WiringError`] when the selected backend cannot be constructed.
pub fn build_ports(settings: &AppSettings, url: Option<&Url>) -> Result<AppPorts, WiringError> {
    if settings.mock {
        let params = settings.mock_params(url);
        info!(params = ?params.params(), "running with mock services");
        let fixture = Arc::new(FixtureApi::demo(params)?);
        return Ok(AppPorts {
            user: fixture.clone(),
            patient: fixture.clone(),
            patient_data: fixture.clone(),
            team: fixture.clone(),
            errors: fixture,
            metrics: Arc::new(TracingMetrics),
            processor: Arc::new(ChronologicalProcessor),
            effects: Arc::new(TimedViewEffects::default()),
            clock: Arc::new(DefaultClock),
        });
    }

    let base = settings.api_base()?;
    info!(api_host = %base, "running against platform API");
    let api = Arc::new(HttpApi::new(base, settings.request_timeout())?);
    Ok(AppPorts {
        user: api.clone(),
        patient: api.clone(),
        patient_data: api.clone(),
        team: api.clone(),
        errors: api.clone(),
        metrics: api,
        processor: Arc::new(ChronologicalProcessor),
        effects: Arc::new(TimedViewEffects::default()),
        clock: Arc::new(DefaultClock),
    })
}
