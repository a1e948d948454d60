//! CLI Commands

pub mod accounts;
pub mod clients;
pub mod config;
pub mod investments;

use javer_client::{Bridge, Outcome, Submission};

use crate::config::Config;
use crate::output::{OutputFormat, TerminalSurface};

/// Bridge rendering to the terminal
pub type CliBridge = Bridge<TerminalSurface>;

/// Build the bridge from the config file, then flag/env overrides
pub fn connect(
    profile: Option<&str>,
    core_url: Option<String>,
    investment_url: Option<String>,
    format: OutputFormat,
) -> Result<CliBridge, String> {
    let mut api = Config::load(profile)?.api_config()?;
    if let Some(url) = core_url {
        api.core_url = url;
    }
    if let Some(url) = investment_url {
        api.investment_url = url;
    }
    Bridge::new(api, TerminalSurface::new(format)).map_err(|e| e.to_string())
}

/// Open the form's modal and submit it, as the page would.
///
/// The command ends once any scheduled modal close has run.
pub async fn submit(
    bridge: &mut CliBridge,
    submission: Submission,
) -> Result<Option<Outcome>, String> {
    bridge.open_modal(submission.form().modal());
    let outcome = bridge.submit(submission).await.map_err(|e| e.to_string())?;
    bridge.settle().await;
    Ok(Some(outcome))
}
