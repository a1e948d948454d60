//! Config commands

use crate::config::{parse_score_route, Config};
use crate::ConfigCommands;
use javer_client::Outcome;

const KEYS: [&str; 5] = [
    "core_url",
    "investment_url",
    "confirm_delay_ms",
    "score_route",
    "portal_view",
];

pub async fn handle(
    action: ConfigCommands,
    profile: Option<&str>,
) -> Result<Option<Outcome>, String> {
    match action {
        ConfigCommands::Init => {
            let path = Config::default().save(profile)?;
            println!("Configuration initialized at {}", path.display());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(profile).unwrap_or_default();
            set_value(&mut config, &key, value)?;
            config.save(profile)?;
            println!("Set {} successfully", key);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(profile).unwrap_or_default();
            let value =
                value_of(&config, &key).ok_or_else(|| format!("Unknown config key: {}", key))?;
            println!("{}: {}", key, value.unwrap_or_else(|| "(not set)".into()));
        }
        ConfigCommands::List => {
            let config = Config::load(profile).unwrap_or_default();
            for key in KEYS {
                let value = value_of(&config, key).flatten();
                println!("{}: {}", key, value.unwrap_or_else(|| "(not set)".into()));
            }
        }
    }
    Ok(None)
}

fn set_value(config: &mut Config, key: &str, value: String) -> Result<(), String> {
    match key {
        "core_url" => config.core_url = Some(value),
        "investment_url" => config.investment_url = Some(value),
        "confirm_delay_ms" => {
            let delay = value.parse().map_err(|_| format!("Invalid delay: {}", value))?;
            config.confirm_delay_ms = Some(delay);
        }
        "score_route" => {
            parse_score_route(&value)?;
            config.score_route = Some(value);
        }
        "portal_view" => config.portal_view = Some(value),
        _ => return Err(format!("Unknown config key: {}", key)),
    }
    Ok(())
}

fn value_of(config: &Config, key: &str) -> Option<Option<String>> {
    match key {
        "core_url" => Some(config.core_url.clone()),
        "investment_url" => Some(config.investment_url.clone()),
        "confirm_delay_ms" => Some(config.confirm_delay_ms.map(|d| d.to_string())),
        "score_route" => Some(config.score_route.clone()),
        "portal_view" => Some(config.portal_view.clone()),
        _ => None,
    }
}
