//! Socrata data API client for the Community Levels by County dataset.

use chrono::{Duration, NaiveDate};
use serde::Deserialize;

use crate::config::LevelConfig;
use crate::error::{LevelError, LevelResult};

/// One county row from the dataset. Unused columns are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountyRecord {
    /// County name, e.g. "Howard County".
    pub county: String,

    /// State name.
    #[serde(default)]
    pub state: Option<String>,

    /// Community level as published (low/medium/high, any case).
    pub covid_19_community_level: String,

    /// Floating timestamp of the weekly update.
    #[serde(default)]
    pub date_updated: Option<String>,
}

/// Which rows to fetch: one state, optionally one county, for the week ending on `end`.
#[derive(Debug, Clone)]
pub struct WeekQuery {
    pub state: String,
    pub county: Option<String>,
    pub end: NaiveDate,
}

impl WeekQuery {
    /// Data is published weekly, so look back seven days from `end`.
    pub fn start(&self) -> NaiveDate {
        self.end - Duration::days(7)
    }

    /// SoQL filter selecting the week's update.
    pub fn where_clause(&self) -> String {
        format!(
            "date_updated between \"{}\" and \"{}\"",
            self.start(),
            self.end
        )
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("state", self.state.clone())];
        if let Some(county) = &self.county {
            params.push(("county", county.clone()));
        }
        params.push(("$where", self.where_clause()));
        params
    }
}

/// HTTP client for the data API.
#[derive(Clone)]
pub struct CommunityLevelClient {
    client: reqwest::Client,
    resource_url: String,
    app_token: Option<String>,
}

impl CommunityLevelClient {
    /// Create a new client.
    pub fn new(config: &LevelConfig) -> LevelResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout()).build()?;

        if config.app_token.is_none() {
            tracing::warn!("No app token configured; requests will be rate-limited");
        }

        Ok(Self {
            client,
            resource_url: config.resource_url(),
            app_token: config.app_token.clone(),
        })
    }

    /// Fetch the week's rows. One request, no retry.
    pub async fn fetch_week(&self, query: &WeekQuery) -> LevelResult<Vec<CountyRecord>> {
        tracing::debug!(
            url = %self.resource_url,
            state = %query.state,
            county = ?query.county,
            start = %query.start(),
            end = %query.end,
            "Fetching community levels"
        );

        let mut request = self.client.get(&self.resource_url).query(&query.params());
        if let Some(token) = &self.app_token {
            request = request.header("X-App-Token", token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LevelError::Status { status, body });
        }

        let records: Vec<CountyRecord> = serde_json::from_str(&body)?;
        tracing::debug!(count = records.len(), "Fetched community levels");
        Ok(records)
    }
}
