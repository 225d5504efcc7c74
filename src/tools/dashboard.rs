use super::*;
use crate::feed::dashboard::{BetSelection, BetType, CreateBetRequest};

const BET_STATUSES: [&str; 5] = ["all", "pending", "won", "lost", "pushed"];

/// Typed view of a dashboard argument, with serde's message on mismatch.
fn parse_arg<T: serde::de::DeserializeOwned>(input: &Value, key: &str) -> Result<T, ToolError> {
    let raw = input
        .get(key)
        .cloned()
        .ok_or_else(|| ToolError::invalid_input(format!("Missing required parameter: {}", key)))?;
    serde_json::from_value(raw)
        .map_err(|e| ToolError::invalid_input(format!("Invalid {}: {}", key, e)))
}

fn bet_request(input: &Value) -> Result<CreateBetRequest, ToolError> {
    let selections: Vec<BetSelection> = parse_arg(input, "selections")?;
    if selections.is_empty() {
        return Err(ToolError::invalid_input("selections must not be empty"));
    }
    let bet_type: BetType = parse_arg(input, "bet_type")?;
    let stake = input
        .get("stake")
        .and_then(Value::as_f64)
        .ok_or_else(|| ToolError::invalid_input("Missing required parameter: stake"))?;
    if !(stake.is_finite() && stake > 0.0) {
        return Err(ToolError::invalid_input("stake must be a positive amount"));
    }
    let notes = optional_str(input, "notes").unwrap_or_default();
    Ok(CreateBetRequest::new(selections, bet_type, stake, notes))
}

pub struct CreateBet;

#[async_trait]
impl Tool for CreateBet {
    fn name(&self) -> &'static str {
        "create_bet"
    }

    fn description(&self) -> &'static str {
        "Place a bet on the dashboard. Take game IDs from get_active_games first."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "selections": {
                    "type": "array",
                    "minItems": 1,
                    "items": {
                        "type": "object",
                        "properties": {
                            "gameId": {"type": "string", "description": "Game ID from get_active_games"},
                            "type": {"type": "string", "enum": ["moneyline", "spread", "total"]},
                            "selection": {"type": "string", "enum": ["home", "away", "over", "under"]},
                            "odds": {"type": "integer", "description": "American odds, e.g. -110 or 150"},
                            "line": {"type": "number", "description": "Spread or total line, e.g. -3.5"},
                            "teamName": {"type": "string"}
                        },
                        "required": ["gameId", "type", "selection", "odds"]
                    }
                },
                "bet_type": {"type": "string", "enum": ["single", "parlay", "teaser"]},
                "stake": {"type": "number", "exclusiveMinimum": 0, "description": "Amount to wager in dollars"},
                "notes": {"type": "string", "default": ""}
            },
            "required": ["selections", "bet_type", "stake"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let client = ctx.dashboard()?;
        let bet = bet_request(&input)?;
        Ok(client.create_bet(&bet).await.to_value())
    }
}

pub struct ActiveGames;

#[async_trait]
impl Tool for ActiveGames {
    fn name(&self) -> &'static str {
        "get_active_games"
    }

    fn description(&self) -> &'static str {
        "Games open for betting on the dashboard, with IDs, teams, times and odds."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "sport": {"type": "string", "description": "Sport key, e.g. basketball_nba"},
                "date": {"type": "string", "description": "YYYY-MM-DD, defaults to today"}
            },
            "required": []
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let client = ctx.dashboard()?;
        let resp = client
            .get_games(optional_str(&input, "sport"), optional_str(&input, "date"))
            .await;
        Ok(resp.to_value())
    }
}

pub struct MyBets;

#[async_trait]
impl Tool for MyBets {
    fn name(&self) -> &'static str {
        "get_my_bets"
    }

    fn description(&self) -> &'static str {
        "Betting history from the dashboard, optionally filtered by status."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "status": {"type": "string", "enum": BET_STATUSES, "default": "all"}
            },
            "required": []
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let client = ctx.dashboard()?;
        let status = str_or(&input, "status", "all");
        if !BET_STATUSES.contains(&status) {
            return Err(ToolError::invalid_input(format!(
                "Unknown status: {}. Supported: {}",
                status,
                BET_STATUSES.join(", ")
            )));
        }
        let filter = (status != "all").then_some(status);
        Ok(client.get_bets(filter).await.to_value())
    }
}

pub struct BetDetails;

#[async_trait]
impl Tool for BetDetails {
    fn name(&self) -> &'static str {
        "get_bet_details"
    }

    fn description(&self) -> &'static str {
        "One dashboard bet with its legs, outcomes and timeline."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"bet_id": {"type": "string"}},
            "required": ["bet_id"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let client = ctx.dashboard()?;
        let bet_id = required_id(&input, "bet_id")?;
        Ok(client.get_bet(&bet_id).await.to_value())
    }
}

pub struct GameOdds;

#[async_trait]
impl Tool for GameOdds {
    fn name(&self) -> &'static str {
        "get_game_odds"
    }

    fn description(&self) -> &'static str {
        "Current bookmaker odds the dashboard holds for one of its games."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"game_id": {"type": "string"}},
            "required": ["game_id"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let client = ctx.dashboard()?;
        let game_id = required_id(&input, "game_id")?;
        Ok(client.get_game_odds(&game_id).await.to_value())
    }
}

pub struct SearchTeams;

#[async_trait]
impl Tool for SearchTeams {
    fn name(&self) -> &'static str {
        "search_teams"
    }

    fn description(&self) -> &'static str {
        "Search the dashboard's teams by name or abbreviation."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "e.g. 'Lakers', 'LAL', 'Los Angeles'"}
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let client = ctx.dashboard()?;
        let query = required_str(&input, "query")?;
        Ok(client.search_teams(query).await.to_value())
    }
}

pub struct DashboardStats;

#[async_trait]
impl Tool for DashboardStats {
    fn name(&self) -> &'static str {
        "get_dashboard_stats"
    }

    fn description(&self) -> &'static str {
        "Win rate, bet count and profit/loss from the dashboard."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}, "required": []})
    }

    async fn execute(&self, _input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let client = ctx.dashboard()?;
        Ok(client.get_stats().await.to_value())
    }
}
