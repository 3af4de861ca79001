pub mod categories;
pub mod guilds;
pub mod profile;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;
use serde_json::json;

use dashboard_core::{DashboardConfig, NormalizedError};
use dashboard_sync::HttpTransport;

/// Resolved configuration plus the shared transport for one invocation.
pub struct Session {
    pub config: DashboardConfig,
    pub transport: Arc<HttpTransport>,
    pub json: bool,
}

impl Session {
    pub fn load(base_url: Option<String>, json: bool) -> Result<Self> {
        let mut config = DashboardConfig::load().context("failed to load ~/.dashboard/config.yaml")?;
        if let Some(base_url) = base_url {
            config = config
                .with_base_url(base_url)
                .context("invalid --base-url")?;
        }
        let transport = Arc::new(HttpTransport::from_config(&config));
        Ok(Self {
            config,
            transport,
            json,
        })
    }
}

/// Print a settled resource as JSON (`--json`).
pub fn print_ready_json(resource: &str, data: &impl Serialize) -> Result<()> {
    let payload = json!({
        "resource": resource,
        "status": "ready",
        "data": data,
        "fetched_at": Utc::now().to_rfc3339(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to render JSON")?
    );
    Ok(())
}

/// Report a failed resource and turn it into a non-zero exit.
pub fn report_failure(session: &Session, resource: &str, error: &NormalizedError) -> Result<()> {
    if session.json {
        let payload = json!({
            "resource": resource,
            "status": "failed",
            "error": error,
            "fetched_at": Utc::now().to_rfc3339(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).context("failed to render JSON")?
        );
    } else {
        eprintln!("{} {resource}: {error}", "✗".red());
    }
    bail!("{resource} failed with {}", error.code)
}
