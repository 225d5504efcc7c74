//! Named, schema-described operations over the vendor clients.
//!
//! Every call resolves to a JSON object: vendor failures arrive as
//! `{success: false, ...}` envelopes and argument problems as `{error}`.

mod combined;
mod dashboard;
mod espn;
mod odds;
mod reference;

use crate::feed::{DashboardClient, EspnClient, OddsApiClient};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::fmt;

pub const ODDS_NOT_CONFIGURED: &str =
    "Odds API not configured. Please set ODDS_API_KEY environment variable.";
pub const DASHBOARD_NOT_CONFIGURED: &str =
    "Dashboard API not configured. Please set DASHBOARD_API_KEY environment variable.";

#[derive(Debug, Clone, PartialEq)]
pub enum ToolError {
    InvalidInput(String),
    UnknownTool(String),
    NotConfigured(String),
}

impl ToolError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        ToolError::InvalidInput(msg.into())
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::InvalidInput(msg) => write!(f, "{}", msg),
            ToolError::UnknownTool(name) => write!(f, "Unknown tool: {}", name),
            ToolError::NotConfigured(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ToolError {}

/// Vendor clients shared by every tool. The odds and dashboard clients are
/// optional since they need API keys; ESPN is public.
pub struct ToolContext {
    odds: Option<OddsApiClient>,
    espn: EspnClient,
    dashboard: Option<DashboardClient>,
}

impl ToolContext {
    pub fn new(odds: Option<OddsApiClient>, espn: EspnClient) -> Self {
        Self {
            odds,
            espn,
            dashboard: None,
        }
    }

    pub fn with_dashboard(mut self, dashboard: DashboardClient) -> Self {
        self.dashboard = Some(dashboard);
        self
    }

    pub fn odds(&self) -> Result<&OddsApiClient, ToolError> {
        self.odds
            .as_ref()
            .ok_or_else(|| ToolError::NotConfigured(ODDS_NOT_CONFIGURED.to_string()))
    }

    pub fn has_odds(&self) -> bool {
        self.odds.is_some()
    }

    pub fn espn(&self) -> &EspnClient {
        &self.espn
    }

    pub fn dashboard(&self) -> Result<&DashboardClient, ToolError> {
        self.dashboard
            .as_ref()
            .ok_or_else(|| ToolError::NotConfigured(DASHBOARD_NOT_CONFIGURED.to_string()))
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> Value;
    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError>;
}

pub struct ToolRegistry {
    ctx: ToolContext,
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Registry with every tool registered, in listing order.
    pub fn new(ctx: ToolContext) -> Self {
        let tools: Vec<Box<dyn Tool>> = vec![
            Box::new(odds::AvailableSports),
            Box::new(odds::Odds),
            Box::new(odds::Scores),
            Box::new(odds::EventOdds),
            Box::new(odds::SearchOdds),
            Box::new(espn::Scoreboard),
            Box::new(espn::Standings),
            Box::new(espn::Teams),
            Box::new(espn::TeamDetails),
            Box::new(espn::TeamSchedule),
            Box::new(espn::News),
            Box::new(espn::Search),
            Box::new(espn::GameSummary),
            Box::new(combined::ComprehensiveGameInfo),
            Box::new(reference::FindTeam),
            Box::new(reference::TeamReference),
            Box::new(combined::FormattedOdds),
            Box::new(combined::FormattedScoreboard),
            Box::new(combined::FormattedStandings),
            Box::new(combined::FormattedGameSummary),
            Box::new(dashboard::CreateBet),
            Box::new(dashboard::ActiveGames),
            Box::new(dashboard::MyBets),
            Box::new(dashboard::BetDetails),
            Box::new(dashboard::GameOdds),
            Box::new(dashboard::SearchTeams),
            Box::new(dashboard::DashboardStats),
        ];
        tracing::info!(
            tools = tools.len(),
            odds_configured = ctx.has_odds(),
            dashboard_configured = ctx.dashboard.is_some(),
            "tool registry ready"
        );
        Self { ctx, tools }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// `[{name, description, input_schema}]` for every tool.
    pub fn descriptors(&self) -> Value {
        Value::Array(
            self.tools
                .iter()
                .map(|t| {
                    json!({
                        "name": t.name(),
                        "description": t.description(),
                        "input_schema": t.input_schema(),
                    })
                })
                .collect(),
        )
    }

    pub async fn call(&self, name: &str, args: Value) -> Value {
        let args = if args.is_null() { json!({}) } else { args };
        let result = match self.tools.iter().find(|t| t.name() == name) {
            Some(tool) => {
                tracing::debug!(tool = name, "executing tool");
                tool.execute(args, &self.ctx).await
            }
            None => Err(ToolError::UnknownTool(name.to_string())),
        };
        match result {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "tool call rejected");
                json!({ "error": e.to_string() })
            }
        }
    }
}

pub(crate) fn required_str<'a>(input: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    input
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ToolError::invalid_input(format!("Missing required parameter: {}", key)))
}

/// Like `required_str` but also accepts a bare number, as vendor IDs often are.
pub(crate) fn required_id(input: &Value, key: &str) -> Result<String, ToolError> {
    match input.get(key) {
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => required_str(input, key).map(str::to_string),
    }
}

pub(crate) fn optional_str<'a>(input: &'a Value, key: &str) -> Option<&'a str> {
    input
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub(crate) fn str_or<'a>(input: &'a Value, key: &str, default: &'a str) -> &'a str {
    optional_str(input, key).unwrap_or(default)
}

pub(crate) fn optional_u64(input: &Value, key: &str, default: u64) -> u64 {
    input.get(key).and_then(Value::as_u64).unwrap_or(default)
}

pub(crate) fn optional_season(input: &Value) -> Option<u32> {
    input
        .get("season")
        .and_then(Value::as_u64)
        .and_then(|s| u32::try_from(s).ok())
}

pub(crate) fn optional_bool(input: &Value, key: &str, default: bool) -> bool {
    input.get(key).and_then(Value::as_bool).unwrap_or(default)
}

pub(crate) fn as_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Properties shared by the ESPN league-scoped tools.
pub(crate) fn league_properties() -> serde_json::Map<String, Value> {
    let mut props = serde_json::Map::new();
    props.insert(
        "sport".into(),
        json!({"type": "string", "description": "ESPN sport (football, basketball, baseball, hockey, soccer)"}),
    );
    props.insert(
        "league".into(),
        json!({"type": "string", "description": "ESPN league code (nfl, nba, mlb, nhl, college-football, ...)"}),
    );
    props
}

pub(crate) fn object_schema(
    properties: serde_json::Map<String, Value>,
    required: &[&str],
) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{BookmakerFilter, KeyRing};
    use std::time::Duration;

    pub(crate) fn registry(odds_url: Option<&str>, espn_url: &str) -> ToolRegistry {
        let odds = odds_url.map(|url| {
            OddsApiClient::new(
                KeyRing::new(["k1", "k2"]).unwrap(),
                url,
                BookmakerFilter::default(),
                Duration::from_secs(5),
            )
            .unwrap()
        });
        let espn = EspnClient::new(espn_url, espn_url, Duration::from_secs(5)).unwrap();
        ToolRegistry::new(ToolContext::new(odds, espn))
    }

    pub(crate) fn dashboard_registry(dashboard_url: &str) -> ToolRegistry {
        let espn = EspnClient::new(dashboard_url, dashboard_url, Duration::from_secs(5)).unwrap();
        let dashboard =
            DashboardClient::new("dash-key", dashboard_url, Duration::from_secs(5)).unwrap();
        ToolRegistry::new(ToolContext::new(None, espn).with_dashboard(dashboard))
    }

    #[test]
    fn test_param_helpers() {
        let input = json!({"a": " x ", "blank": "", "n": 7, "flag": true});
        assert_eq!(required_str(&input, "a").unwrap(), "x");
        assert_eq!(
            required_str(&input, "blank").unwrap_err(),
            ToolError::invalid_input("Missing required parameter: blank")
        );
        assert_eq!(required_id(&input, "n").unwrap(), "7");
        assert_eq!(str_or(&input, "missing", "us"), "us");
        assert_eq!(optional_u64(&input, "n", 3), 7);
        assert_eq!(optional_u64(&input, "a", 3), 3);
        assert!(optional_bool(&input, "flag", false));
        assert_eq!(optional_season(&json!({"season": 2025})), Some(2025));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ToolError::UnknownTool("x".into()).to_string(), "Unknown tool: x");
        assert_eq!(
            ToolError::NotConfigured(ODDS_NOT_CONFIGURED.into()).to_string(),
            ODDS_NOT_CONFIGURED
        );
    }

    #[test]
    fn test_descriptors_unique_and_complete() {
        let reg = registry(None, "http://127.0.0.1:1");
        let names = reg.names();
        assert_eq!(names.len(), 27);
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), names.len());

        for d in reg.descriptors().as_array().unwrap() {
            assert!(!d["description"].as_str().unwrap().is_empty());
            assert_eq!(d["input_schema"]["type"], "object");
        }
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let reg = registry(None, "http://127.0.0.1:1");
        let out = reg.call("nope", json!({})).await;
        assert_eq!(out, json!({"error": "Unknown tool: nope"}));
    }

    #[tokio::test]
    async fn test_odds_tools_without_key() {
        let reg = registry(None, "http://127.0.0.1:1");
        for name in ["get_available_sports", "get_odds", "get_scores", "get_event_odds", "search_odds"] {
            let out = reg
                .call(name, json!({"sport": "basketball_nba", "event_id": "e1", "query": "Lakers"}))
                .await;
            assert_eq!(out["error"], ODDS_NOT_CONFIGURED, "{name}");
        }
    }

    #[tokio::test]
    async fn test_missing_param_is_error_object() {
        let reg = registry(None, "http://127.0.0.1:1");
        let out = reg.call("get_espn_scoreboard", json!({"sport": "basketball"})).await;
        assert_eq!(out["error"], "Missing required parameter: league");
    }
}
