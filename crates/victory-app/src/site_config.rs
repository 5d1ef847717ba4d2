// Frontend configuration document (website_config.json).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::LeagueConfig;

pub const WEBSITE_CONFIG_FILE: &str = "website_config.json";

const PLACEHOLDER_LEAGUE_ID: &str = "your_league_id_here";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsiteConfig {
    pub league: WebsiteLeague,
    pub features: WebsiteFeatures,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsiteLeague {
    pub id: Option<String>,
    pub url: String,
    pub rules_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsiteFeatures {
    pub show_league_link: bool,
    pub show_rules_link: bool,
}

/// League page URL, or an empty string when no real league id is set.
pub fn league_url(league_id: Option<&str>) -> String {
    match usable_league_id(league_id) {
        Some(id) => format!("https://football.fantasysports.yahoo.com/f1/{id}/"),
        None => String::new(),
    }
}

fn usable_league_id(league_id: Option<&str>) -> Option<&str> {
    league_id
        .map(str::trim)
        .filter(|id| !id.is_empty() && *id != PLACEHOLDER_LEAGUE_ID)
}

pub fn build_website_config(league: &LeagueConfig, generated_at: DateTime<Utc>) -> WebsiteConfig {
    let id = league.league_id.as_deref();
    let rules_url = league
        .rules_url
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    WebsiteConfig {
        league: WebsiteLeague {
            id: id.map(str::to_string),
            url: league_url(id),
            rules_url: rules_url.clone(),
        },
        features: WebsiteFeatures {
            show_league_link: usable_league_id(id).is_some(),
            show_rules_link: !rules_url.is_empty(),
        },
        generated_at,
    }
}
