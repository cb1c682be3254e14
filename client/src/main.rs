//! Client entry-point: loads settings, wires ports and settles the first view.

use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use client::config::AppSettings;
use client::domain::ErrorStore;
use client::{AppController, build_ports};

/// Headless diabetes data viewer.
#[derive(Debug, Parser)]
#[command(name = "client", version)]
struct Cli {
    /// Page URL. The fragment selects the route (`#/patients`) and the query
    /// carries mock parameters.
    url: Option<Url>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = AppSettings::load_from_iter([OsString::from("client")])
        .wrap_err("failed to load settings")?;
    info!(
        mock = settings.mock,
        version = settings.version.as_deref().unwrap_or("unknown"),
        images_endpoint = settings.images_endpoint(),
        "settings loaded"
    );

    let ports = build_ports(&settings, cli.url.as_ref())?;
    let controller = AppController::new(
        ports,
        Arc::new(ErrorStore::new()),
        settings.controller_options(),
    );

    let route = controller.start(start_path(cli.url.as_ref())).await;
    let view = serde_json::to_string(&controller.view()).wrap_err("failed to encode view")?;
    info!(%route, %view, "view settled");
    Ok(())
}

/// Route path carried by the URL fragment, `/` when there is none.
fn start_path(url: Option<&Url>) -> &str {
    url.and_then(Url::fragment)
        .filter(|fragment| !fragment.is_empty())
        .unwrap_or("/")
}
