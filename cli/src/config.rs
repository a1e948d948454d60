//! CLI Configuration

use javer_client::{ApiConfig, ScoreRoute};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub core_url: Option<String>,
    pub investment_url: Option<String>,
    pub confirm_delay_ms: Option<u64>,
    pub score_route: Option<String>,
    pub portal_view: Option<String>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> Result<Self, String> {
        let path = Self::config_path(profile)?;
        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| e.to_string())?;
            toml::from_str(&content).map_err(|e| e.to_string())
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, profile: Option<&str>) -> Result<PathBuf, String> {
        let path = Self::config_path(profile)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(&path, content).map_err(|e| e.to_string())?;
        Ok(path)
    }

    /// Bridge configuration: defaults, overlaid with this file
    pub fn api_config(&self) -> Result<ApiConfig, String> {
        let mut api = ApiConfig::default();
        if let Some(url) = &self.core_url {
            api.core_url = url.clone();
        }
        if let Some(url) = &self.investment_url {
            api.investment_url = url.clone();
        }
        if let Some(delay) = self.confirm_delay_ms {
            api.confirm_delay_ms = delay;
        }
        if let Some(route) = &self.score_route {
            api.score_route = parse_score_route(route)?;
        }
        if let Some(view) = &self.portal_view {
            api.portal_view = view.clone();
        }
        Ok(api)
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf, String> {
        let home = dirs::home_dir().ok_or("Cannot find home directory")?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".javer").join(filename))
    }
}

pub fn parse_score_route(value: &str) -> Result<ScoreRoute, String> {
    match value {
        "path" => Ok(ScoreRoute::Path),
        "query" => Ok(ScoreRoute::Query),
        other => Err(format!("Unknown score route: {} (expected path or query)", other)),
    }
}
