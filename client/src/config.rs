//! Client configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use querystring::QueryParams;
use serde::Deserialize;
use url::Url;

use crate::controller::ControllerOptions;
use crate::outbound::fixture::MockParams;

const DEFAULT_API_HOST: &str = "http://localhost:8009";
const DEFAULT_IMAGES_ENDPOINT: &str = "/images";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Deployment settings read from `BLIP_*` variables and config files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLIP")]
pub struct AppSettings {
    /// Serve the in-memory fixture API instead of the platform API.
    #[ortho_config(default = false)]
    pub mock: bool,
    /// Mock parameters as a query string, such as `auth.skip&api.delay=200`.
    pub mock_params: Option<String>,
    /// Show the terms overlay after signup.
    #[ortho_config(default = false)]
    pub show_accept_terms: bool,
    /// Build version shown in the navbar.
    #[ortho_config(skip_cli)]
    pub version: Option<String>,
    /// Base URL for static images.
    pub images_endpoint: Option<String>,
    /// Base URL of the platform API.
    pub api_host: Option<String>,
    /// Per-request timeout for the platform API.
    pub request_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Return the configured API host, falling back to the default.
    pub fn api_host(&self) -> &str {
        self.api_host.as_deref().unwrap_or(DEFAULT_API_HOST)
    }

    /// Parse the API host.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured host is not an absolute URL.
    pub fn api_base(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.api_host())
    }

    /// Return the configured images endpoint, falling back to the default.
    pub fn images_endpoint(&self) -> &str {
        self.images_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_IMAGES_ENDPOINT)
    }

    /// Return the configured request timeout, falling back to the default.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Configured mock parameters overlaid with the query of `url`; keys in
    /// the URL win.
    pub fn mock_params(&self, url: Option<&Url>) -> MockParams {
        let configured = QueryParams::parse(self.mock_params.as_deref().unwrap_or_default());
        let from_url = QueryParams::parse(url.and_then(Url::query).unwrap_or_default());
        MockParams::new(configured.overlay(from_url))
    }

    /// Controller switches derived from these settings.
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            show_accept_terms: self.show_accept_terms,
            version: self.version.clone(),
            ..ControllerOptions::default()
        }
    }
}
