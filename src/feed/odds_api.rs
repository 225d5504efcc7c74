use super::bookmakers::BookmakerFilter;
use super::keys::KeyRing;
use super::request::fetch_json;
use super::types::ApiResponse;
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.the-odds-api.com";

/// Sports scanned by `search_odds` when the caller names none.
pub const SEARCH_SPORTS: [&str; 4] = [
    "americanfootball_nfl",
    "basketball_nba",
    "baseball_mlb",
    "icehockey_nhl",
];

/// Vendor caps the scores lookback at three days.
const MAX_DAYS_FROM: u32 = 3;

/// Query knobs shared by the odds endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct OddsParams {
    pub regions: String,
    pub markets: Option<String>,
    pub odds_format: String,
    pub date_format: String,
}

impl Default for OddsParams {
    fn default() -> Self {
        Self {
            regions: "us".to_string(),
            markets: None,
            odds_format: "american".to_string(),
            date_format: "iso".to_string(),
        }
    }
}

/// Client for the-odds-api.com v4.
pub struct OddsApiClient {
    client: Client,
    base_url: String,
    keys: KeyRing,
    bookmakers: BookmakerFilter,
}

impl OddsApiClient {
    pub fn new(
        keys: KeyRing,
        base_url: &str,
        bookmakers: BookmakerFilter,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build odds API HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            keys,
            bookmakers,
        })
    }

    /// Every call consumes the next key from the ring.
    async fn request(&self, path: &str, mut query: Vec<(&str, String)>) -> ApiResponse {
        query.push(("apiKey", self.keys.next_key().to_string()));
        let url = format!("{}{}", self.base_url, path);

        match fetch_json(&self.client, &url, &query).await {
            Ok((data, usage)) => {
                if let Some(remaining) = usage.remaining_count() {
                    tracing::info!(remaining, "odds API requests remaining");
                }
                ApiResponse::ok(data).with_usage(usage)
            }
            Err(failed) => failed,
        }
    }

    /// In-season sports, or every sport when `all_sports` is set.
    pub async fn get_sports(&self, all_sports: bool) -> ApiResponse {
        let mut query = Vec::new();
        if all_sports {
            query.push(("all", "true".to_string()));
        }
        self.request("/v4/sports", query).await
    }

    /// Upcoming games with odds. Bookmakers are filtered and capped on success.
    pub async fn get_odds(&self, sport: &str, params: &OddsParams) -> ApiResponse {
        let mut query = vec![
            ("regions", params.regions.clone()),
            ("oddsFormat", params.odds_format.clone()),
            ("dateFormat", params.date_format.clone()),
        ];
        if let Some(markets) = &params.markets {
            query.push(("markets", markets.clone()));
        }

        let mut resp = self.request(&format!("/v4/sports/{}/odds", sport), query).await;
        if let Some(data) = resp.data.as_mut() {
            self.bookmakers.apply_to_games(data);
        }
        resp
    }

    /// Recent, live and upcoming scores. `days_from` is clamped to the vendor max.
    pub async fn get_scores(&self, sport: &str, days_from: u32) -> ApiResponse {
        let query = vec![("daysFrom", days_from.min(MAX_DAYS_FROM).to_string())];
        self.request(&format!("/v4/sports/{}/scores", sport), query).await
    }

    /// Odds for a single event. `date_format` is not used by this endpoint.
    pub async fn get_event_odds(
        &self,
        sport: &str,
        event_id: &str,
        params: &OddsParams,
    ) -> ApiResponse {
        let mut query = vec![
            ("regions", params.regions.clone()),
            ("oddsFormat", params.odds_format.clone()),
        ];
        if let Some(markets) = &params.markets {
            query.push(("markets", markets.clone()));
        }

        let path = format!("/v4/sports/{}/events/{}/odds", sport, event_id);
        let mut resp = self.request(&path, query).await;
        if let Some(data) = resp.data.as_mut() {
            self.bookmakers.apply_to_games(data);
        }
        resp
    }

    /// Games whose home or away team contains `query` (case-insensitive),
    /// across `sport` or the popular-sports list. Failed sports are skipped.
    pub async fn search_odds(
        &self,
        query: &str,
        sport: Option<&str>,
        regions: &str,
        markets: &str,
    ) -> Value {
        let sports: Vec<&str> = match sport {
            Some(s) => vec![s],
            None => SEARCH_SPORTS.to_vec(),
        };
        let params = OddsParams {
            regions: regions.to_string(),
            markets: Some(markets.to_string()),
            ..OddsParams::default()
        };

        let needle = query.to_lowercase();
        let mut matching_games = Vec::new();

        for sport_key in sports {
            let resp = self.get_odds(sport_key, &params).await;
            if !resp.success {
                tracing::warn!(sport = sport_key, error = ?resp.error, "odds search skipped sport");
                continue;
            }
            let Some(Value::Array(games)) = resp.data else {
                continue;
            };
            for game in games {
                if game_mentions(&game, &needle) {
                    matching_games.push(tag_sport(game, sport_key));
                }
            }
        }

        json!({
            "success": true,
            "query": query,
            "count": matching_games.len(),
            "matching_games": matching_games,
        })
    }
}

fn game_mentions(game: &Value, needle: &str) -> bool {
    ["home_team", "away_team"].iter().any(|field| {
        game.get(*field)
            .and_then(Value::as_str)
            .map(|team| team.to_lowercase().contains(needle))
            .unwrap_or(false)
    })
}

/// Add the sport key the game was found under.
fn tag_sport(mut game: Value, sport_key: &str) -> Value {
    if let Some(fields) = game.as_object_mut() {
        fields.insert("sport".to_string(), Value::String(sport_key.to_string()));
    }
    game
}
