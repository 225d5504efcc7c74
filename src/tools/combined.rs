use super::*;
use crate::feed::{ApiResponse, OddsParams};
use crate::format::{
    self,
    layout::{array_at, text_at},
};
use futures_util::future;

/// ESPN sport path for an odds sport key (`americanfootball_nfl` -> `football`).
fn espn_sport_for(sport_key: &str) -> &str {
    match sport_key.split('_').next().unwrap_or(sport_key) {
        "americanfootball" => "football",
        "icehockey" => "hockey",
        other => other,
    }
}

/// ESPN league code for an odds sport key (`basketball_nba` -> `nba`).
fn espn_league_for(sport_key: &str) -> &str {
    sport_key
        .split_once('_')
        .map(|(_, league)| league)
        .unwrap_or(sport_key)
}

fn formatted(count: usize, text: String) -> Value {
    json!({"success": true, "count": count, "text": text})
}

fn events(resp: &ApiResponse) -> &[Value] {
    resp.data
        .as_ref()
        .and_then(|d| d.get("events"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn sport_and_league(input: &Value) -> Result<(&str, &str), ToolError> {
    Ok((required_str(input, "sport")?, required_str(input, "league")?))
}

pub struct ComprehensiveGameInfo;

#[async_trait]
impl Tool for ComprehensiveGameInfo {
    fn name(&self) -> &'static str {
        "get_comprehensive_game_info"
    }

    fn description(&self) -> &'static str {
        "Odds search plus the ESPN scoreboard for a team, fetched together. Odds are skipped when no key is configured."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "sport_key": {"type": "string", "description": "Odds API sport key, e.g. basketball_nba"},
                "league": {"type": "string", "description": "ESPN league code, e.g. nba"},
                "team_query": {"type": "string"}
            },
            "required": ["sport_key", "league", "team_query"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let sport_key = required_str(&input, "sport_key")?;
        let league = required_str(&input, "league")?;
        let team_query = required_str(&input, "team_query")?;

        let odds_search = async {
            match ctx.odds() {
                Ok(client) => Some(
                    client
                        .search_odds(team_query, Some(sport_key), "us", "h2h")
                        .await,
                ),
                Err(_) => None,
            }
        };
        let scoreboard = ctx
            .espn()
            .get_scoreboard(espn_sport_for(sport_key), league, None, 50);
        let (odds_data, espn_resp) = future::join(odds_search, scoreboard).await;

        let mut errors = Vec::new();
        if let Some(err) = odds_data.as_ref().and_then(|d| text_at(d, &["error"])) {
            errors.push(format!("Odds API error: {}", err));
        }
        if let Some(err) = &espn_resp.error {
            errors.push(format!("ESPN API error: {}", err));
        }

        Ok(json!({
            "team_query": team_query,
            "odds_data": odds_data,
            "espn_data": espn_resp.to_value(),
            "error": if errors.is_empty() { Value::Null } else { Value::String(errors.join("; ")) },
        }))
    }
}

pub struct FormattedOdds;

#[async_trait]
impl Tool for FormattedOdds {
    fn name(&self) -> &'static str {
        "get_formatted_odds"
    }

    fn description(&self) -> &'static str {
        "Upcoming games as matchup cards: odds from The Odds API merged with ESPN broadcasts, weather and live scores. format=comparison gives a side-by-side bookmaker table instead."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "sport": {"type": "string", "description": "Odds API sport key, e.g. americanfootball_nfl"},
                "league": {"type": "string", "description": "ESPN league code; derived from the sport key when omitted"},
                "regions": {"type": "string", "default": "us"},
                "markets": {"type": "string", "default": "h2h"},
                "limit": {"type": "integer", "default": 10},
                "format": {"type": "string", "enum": ["cards", "comparison"], "default": "cards"}
            },
            "required": ["sport"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let client = ctx.odds()?;
        let sport = required_str(&input, "sport")?;
        let league = optional_str(&input, "league").unwrap_or_else(|| espn_league_for(sport));
        let limit = optional_u64(&input, "limit", 10) as usize;
        let params = OddsParams {
            regions: str_or(&input, "regions", "us").to_string(),
            markets: Some(str_or(&input, "markets", "h2h").to_string()),
            ..OddsParams::default()
        };

        match str_or(&input, "format", "cards") {
            "cards" => {}
            "comparison" => {
                let resp = client.get_odds(sport, &params).await;
                if !resp.success {
                    return Ok(resp.to_value());
                }
                let mut games: Vec<Value> = resp
                    .data
                    .as_ref()
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                games.truncate(limit);
                return Ok(formatted(games.len(), format::format_odds_comparison(&games)));
            }
            other => {
                return Err(ToolError::invalid_input(format!(
                    "Unknown format: {}. Supported: cards, comparison",
                    other
                )))
            }
        }

        let (odds_resp, espn_resp) = future::join(
            client.get_odds(sport, &params),
            ctx.espn()
                .get_scoreboard(espn_sport_for(sport), league, None, 50),
        )
        .await;

        if !odds_resp.success {
            return Ok(odds_resp.to_value());
        }
        if !espn_resp.success {
            tracing::warn!(sport, league, error = ?espn_resp.error, "no ESPN data to merge");
        }

        let mut games: Vec<Value> = odds_resp
            .data
            .as_ref()
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        games.truncate(limit);

        let espn_events = events(&espn_resp);
        for game in games.iter_mut() {
            if let Some(event) = espn_events.iter().find(|e| event_matches(e, game)) {
                merge_event(game, event);
            }
        }

        if games.is_empty() {
            return Ok(formatted(0, "No games found.".to_string()));
        }
        let text = games
            .iter()
            .map(format::format_matchup_card)
            .collect::<Vec<_>>()
            .join("\n");
        Ok(formatted(games.len(), text))
    }
}

fn names_match(a: &str, b: &str) -> bool {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b
        || a.contains(&b)
        || b.contains(&a)
        || a.split_whitespace().last() == b.split_whitespace().last()
}

fn event_matches(event: &Value, game: &Value) -> bool {
    let Some(comp) = array_at(event, &["competitions"]).first() else {
        return false;
    };
    let Some((away, home)) = format::split_competitors(array_at(comp, &["competitors"])) else {
        return false;
    };
    let side = |comp: &Value, field: &str| {
        match (text_at(comp, &["team", "displayName"]), text_at(game, &[field])) {
            (Some(espn), Some(odds)) => names_match(&espn, &odds),
            _ => false,
        }
    };
    side(away, "away_team") && side(home, "home_team")
}

/// Copy ESPN broadcasts, weather and (once started) scores into an odds game.
fn merge_event(game: &mut Value, event: &Value) {
    let Some(comp) = array_at(event, &["competitions"]).first() else {
        return;
    };
    let Some(fields) = game.as_object_mut() else {
        return;
    };

    if let Some(broadcasts) = comp.get("broadcasts").filter(|b| b.is_array()) {
        fields.insert("broadcasts".into(), broadcasts.clone());
    }
    if let Some(weather) = event
        .get("weather")
        .or_else(|| comp.get("weather"))
        .filter(|w| w.is_object())
    {
        fields.insert("weather".into(), weather.clone());
    }

    let state = text_at(comp, &["status", "type", "state"])
        .or_else(|| text_at(event, &["status", "type", "state"]));
    if state.as_deref() == Some("pre") {
        return;
    }
    if let Some((away, home)) = format::split_competitors(array_at(comp, &["competitors"])) {
        if let (Some(a), Some(h)) = (text_at(away, &["score"]), text_at(home, &["score"])) {
            fields.insert("away_score".into(), Value::String(a));
            fields.insert("home_score".into(), Value::String(h));
        }
    }
}

pub struct FormattedScoreboard;

#[async_trait]
impl Tool for FormattedScoreboard {
    fn name(&self) -> &'static str {
        "get_formatted_scoreboard"
    }

    fn description(&self) -> &'static str {
        "ESPN scoreboard as a text table, or per-game line-score cards when detailed is true."
    }

    fn input_schema(&self) -> Value {
        let mut props = league_properties();
        props.insert("date".into(), json!({"type": "string", "description": "YYYYMMDD"}));
        props.insert("detailed".into(), json!({"type": "boolean", "default": false}));
        object_schema(props, &["sport", "league"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let (sport, league) = sport_and_league(&input)?;
        let resp = ctx
            .espn()
            .get_scoreboard(sport, league, optional_str(&input, "date"), 50)
            .await;
        if !resp.success {
            return Ok(resp.to_value());
        }

        let events = events(&resp);
        let text = if optional_bool(&input, "detailed", false) {
            format::format_detailed_scoreboard(events, sport)
        } else {
            let rows: Vec<Value> = events.iter().map(format::espn_event_row).collect();
            format::format_scoreboard_table(&rows)
        };
        Ok(formatted(events.len(), text))
    }
}

pub struct FormattedStandings;

#[async_trait]
impl Tool for FormattedStandings {
    fn name(&self) -> &'static str {
        "get_formatted_standings"
    }

    fn description(&self) -> &'static str {
        "ESPN league standings as a text table."
    }

    fn input_schema(&self) -> Value {
        let mut props = league_properties();
        props.insert("season".into(), json!({"type": "integer"}));
        object_schema(props, &["sport", "league"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let (sport, league) = sport_and_league(&input)?;
        let resp = ctx
            .espn()
            .get_standings(sport, league, optional_season(&input))
            .await;
        let Some(data) = resp.data.as_ref().filter(|_| resp.success) else {
            return Ok(resp.to_value());
        };
        let entries = format::collect_standings_entries(data);
        Ok(formatted(entries.len(), format::format_standings_table(&entries)))
    }
}

pub struct FormattedGameSummary;

#[async_trait]
impl Tool for FormattedGameSummary {
    fn name(&self) -> &'static str {
        "get_formatted_game_summary"
    }

    fn description(&self) -> &'static str {
        "ESPN game summary as a box-score card: scores by period, team stats, top performers and notes."
    }

    fn input_schema(&self) -> Value {
        let mut props = league_properties();
        props.insert("event_id".into(), json!({"type": "string"}));
        object_schema(props, &["sport", "league", "event_id"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let (sport, league) = sport_and_league(&input)?;
        let event_id = required_id(&input, "event_id")?;
        let resp = ctx.espn().get_game_summary(sport, league, &event_id).await;
        let Some(data) = resp.data.as_ref().filter(|_| resp.success) else {
            return Ok(resp.to_value());
        };
        Ok(formatted(1, format::format_game_summary(data)))
    }
}
