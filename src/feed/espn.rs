use super::request::get_json;
use super::types::ApiResponse;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

pub const SITE_API: &str = "https://site.api.espn.com";
pub const WEB_API: &str = "https://site.web.api.espn.com";

/// Client for ESPN's public (unauthenticated) site and web APIs.
pub struct EspnClient {
    client: Client,
    site_api: String,
    web_api: String,
}

impl EspnClient {
    pub fn new(site_api: &str, web_api: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build ESPN HTTP client")?;
        Ok(Self {
            client,
            site_api: site_api.trim_end_matches('/').to_string(),
            web_api: web_api.trim_end_matches('/').to_string(),
        })
    }

    fn league_url(&self, sport: &str, league: &str, rest: &str) -> String {
        format!(
            "{}/apis/site/v2/sports/{}/{}/{}",
            self.site_api, sport, league, rest
        )
    }

    /// Scoreboard for a league; `date` is `YYYYMMDD`.
    pub async fn get_scoreboard(
        &self,
        sport: &str,
        league: &str,
        date: Option<&str>,
        limit: u32,
    ) -> ApiResponse {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(date) = date {
            query.push(("dates", date.to_string()));
        }
        let url = self.league_url(sport, league, "scoreboard");
        get_json(&self.client, &url, &query).await
    }

    pub async fn get_standings(
        &self,
        sport: &str,
        league: &str,
        season: Option<u32>,
    ) -> ApiResponse {
        let query = season_query(season);
        let url = self.league_url(sport, league, "standings");
        get_json(&self.client, &url, &query).await
    }

    pub async fn get_teams(&self, sport: &str, league: &str) -> ApiResponse {
        let url = self.league_url(sport, league, "teams");
        get_json(&self.client, &url, &[]).await
    }

    /// Team record, optionally with roster, projection and stats enabled.
    pub async fn get_team_details(
        &self,
        sport: &str,
        league: &str,
        team_id: &str,
        include_roster: bool,
    ) -> ApiResponse {
        let mut query = Vec::new();
        if include_roster {
            query.push(("enable", "roster,projection,stats".to_string()));
        }
        let url = self.league_url(sport, league, &format!("teams/{}", team_id));
        get_json(&self.client, &url, &query).await
    }

    pub async fn get_team_schedule(
        &self,
        sport: &str,
        league: &str,
        team_id: &str,
        season: Option<u32>,
    ) -> ApiResponse {
        let query = season_query(season);
        let url = self.league_url(sport, league, &format!("teams/{}/schedule", team_id));
        get_json(&self.client, &url, &query).await
    }

    pub async fn get_news(&self, sport: &str, league: &str, limit: u32) -> ApiResponse {
        let url = self.league_url(sport, league, "news");
        get_json(&self.client, &url, &[("limit", limit.to_string())]).await
    }

    /// Free-text search over teams, players and articles (web API).
    pub async fn search(&self, query: &str, limit: u32) -> ApiResponse {
        let url = format!("{}/apis/common/v3/search", self.web_api);
        let params = [("query", query.to_string()), ("limit", limit.to_string())];
        get_json(&self.client, &url, &params).await
    }

    /// Box score, leaders, game info and recap for one event.
    pub async fn get_game_summary(&self, sport: &str, league: &str, event_id: &str) -> ApiResponse {
        let url = self.league_url(sport, league, "summary");
        get_json(&self.client, &url, &[("event", event_id.to_string())]).await
    }
}

fn season_query(season: Option<u32>) -> Vec<(&'static str, String)> {
    season.map(|s| ("season", s.to_string())).into_iter().collect()
}
