use super::request::send_json;
use super::types::ApiResponse;
use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Tag the dashboard uses to tell assistant-placed bets from manual ones.
const BET_SOURCE: &str = "mcp";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BetMarket {
    Moneyline,
    Spread,
    Total,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BetSide {
    Home,
    Away,
    Over,
    Under,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BetType {
    Single,
    Parlay,
    Teaser,
}

/// One leg of a bet, keyed by a dashboard game ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BetSelection {
    pub game_id: String,
    #[serde(rename = "type")]
    pub market: BetMarket,
    pub selection: BetSide,
    /// American odds, e.g. -110 or 150.
    pub odds: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateBetRequest {
    pub selections: Vec<BetSelection>,
    pub bet_type: BetType,
    pub stake: f64,
    pub notes: String,
    pub source: &'static str,
}

impl CreateBetRequest {
    pub fn new(selections: Vec<BetSelection>, bet_type: BetType, stake: f64, notes: &str) -> Self {
        Self {
            selections,
            bet_type,
            stake,
            notes: notes.to_string(),
            source: BET_SOURCE,
        }
    }
}

/// Client for the betting dashboard's REST API. Every call sends the
/// dashboard API key as a bearer token.
pub struct DashboardClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DashboardClient {
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build dashboard HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/api{}", self.base_url, endpoint)
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> ApiResponse {
        match send_json(request.bearer_auth(&self.api_key), url).await {
            Ok((data, _)) => ApiResponse::ok(data),
            Err(failed) => failed,
        }
    }

    async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> ApiResponse {
        let url = self.url(endpoint);
        self.send(self.client.get(&url).query(query), &url).await
    }

    /// Games open for betting, optionally narrowed to a sport key and a `YYYY-MM-DD` date.
    pub async fn get_games(&self, sport: Option<&str>, date: Option<&str>) -> ApiResponse {
        let mut query = Vec::new();
        if let Some(sport) = sport {
            query.push(("sport", sport.to_string()));
        }
        if let Some(date) = date {
            query.push(("date", date.to_string()));
        }
        self.get("/games", &query).await
    }

    pub async fn get_game_odds(&self, game_id: &str) -> ApiResponse {
        self.get(&format!("/games/{}/odds", game_id), &[]).await
    }

    /// Betting history. `None` returns bets of every status.
    pub async fn get_bets(&self, status: Option<&str>) -> ApiResponse {
        let query: Vec<(&str, String)> = status
            .map(|s| vec![("status", s.to_string())])
            .unwrap_or_default();
        self.get("/bets", &query).await
    }

    pub async fn get_bet(&self, bet_id: &str) -> ApiResponse {
        self.get(&format!("/bets/{}", bet_id), &[]).await
    }

    pub async fn get_stats(&self) -> ApiResponse {
        self.get("/bets/stats", &[]).await
    }

    pub async fn search_teams(&self, query: &str) -> ApiResponse {
        self.get("/teams/search", &[("q", query.to_string())]).await
    }

    pub async fn create_bet(&self, bet: &CreateBetRequest) -> ApiResponse {
        let url = self.url("/ai/bets");
        tracing::info!(
            legs = bet.selections.len(),
            bet_type = ?bet.bet_type,
            stake = bet.stake,
            "placing dashboard bet"
        );
        self.send(self.client.post(&url).json(bet), &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::ServerGuard) -> DashboardClient {
        DashboardClient::new("dash-key", &server.url(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_selection_wire_format() {
        let sel: BetSelection = serde_json::from_value(json!({
            "gameId": "g-1", "type": "spread", "selection": "home", "odds": -110, "line": -3.5
        }))
        .unwrap();
        assert_eq!(sel.market, BetMarket::Spread);
        assert_eq!(
            serde_json::to_value(&sel).unwrap(),
            json!({"gameId": "g-1", "type": "spread", "selection": "home", "odds": -110, "line": -3.5})
        );
        assert!(serde_json::from_value::<BetSelection>(json!({
            "gameId": "g-1", "type": "prop", "selection": "home", "odds": 100
        }))
        .is_err());
    }

    #[tokio::test]
    async fn test_get_sends_bearer_and_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/games")
            .match_header("authorization", "Bearer dash-key")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("sport".into(), "basketball_nba".into()),
                Matcher::UrlEncoded("date".into(), "2026-10-18".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"games": [{"id": "g-1"}]}"#)
            .create_async()
            .await;

        let resp = client_for(&server)
            .get_games(Some("basketball_nba"), Some("2026-10-18"))
            .await;
        mock.assert_async().await;
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["games"][0]["id"], "g-1");
        assert!(resp.usage.is_none());
    }

    #[tokio::test]
    async fn test_bets_filtered_by_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/bets")
            .match_query(Matcher::UrlEncoded("status".into(), "pending".into()))
            .with_status(200)
            .with_body(r#"{"bets": []}"#)
            .create_async()
            .await;

        assert!(client_for(&server).get_bets(Some("pending")).await.success);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_bet_posts_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/ai/bets")
            .match_header("authorization", "Bearer dash-key")
            .match_body(Matcher::Json(json!({
                "selections": [{"gameId": "g-1", "type": "moneyline", "selection": "away", "odds": 150}],
                "betType": "single",
                "stake": 10.0,
                "notes": "",
                "source": "mcp"
            })))
            .with_status(201)
            .with_body(r#"{"id": "b-1", "potentialPayout": 25.0}"#)
            .create_async()
            .await;

        let bet = CreateBetRequest::new(
            vec![BetSelection {
                game_id: "g-1".into(),
                market: BetMarket::Moneyline,
                selection: BetSide::Away,
                odds: 150,
                line: None,
                team_name: None,
            }],
            BetType::Single,
            10.0,
            "",
        );
        let resp = client_for(&server).create_bet(&bet).await;
        mock.assert_async().await;
        assert_eq!(resp.data.unwrap()["id"], "b-1");
    }

    #[tokio::test]
    async fn test_rejected_key_is_error_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/bets/stats")
            .with_status(401)
            .with_body(r#"{"error": "Invalid API key"}"#)
            .create_async()
            .await;

        let resp = client_for(&server).get_stats().await;
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("API returned status 401"));
        assert!(resp.details.unwrap().contains("Invalid API key"));
    }
}
