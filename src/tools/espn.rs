use super::*;

pub struct Scoreboard;

#[async_trait]
impl Tool for Scoreboard {
    fn name(&self) -> &'static str {
        "get_espn_scoreboard"
    }

    fn description(&self) -> &'static str {
        "Current and scheduled games from the ESPN scoreboard, optionally for one date (YYYYMMDD)."
    }

    fn input_schema(&self) -> Value {
        let mut props = league_properties();
        props.insert("date".into(), json!({"type": "string", "description": "YYYYMMDD"}));
        props.insert("limit".into(), json!({"type": "integer", "default": 50}));
        object_schema(props, &["sport", "league"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let sport = required_str(&input, "sport")?;
        let league = required_str(&input, "league")?;
        let limit = as_u32(optional_u64(&input, "limit", 50));
        let resp = ctx
            .espn()
            .get_scoreboard(sport, league, optional_str(&input, "date"), limit)
            .await;
        Ok(resp.to_value())
    }
}

pub struct Standings;

#[async_trait]
impl Tool for Standings {
    fn name(&self) -> &'static str {
        "get_espn_standings"
    }

    fn description(&self) -> &'static str {
        "League standings from ESPN, optionally for a past season."
    }

    fn input_schema(&self) -> Value {
        let mut props = league_properties();
        props.insert("season".into(), json!({"type": "integer", "description": "e.g. 2024"}));
        object_schema(props, &["sport", "league"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let sport = required_str(&input, "sport")?;
        let league = required_str(&input, "league")?;
        let resp = ctx
            .espn()
            .get_standings(sport, league, optional_season(&input))
            .await;
        Ok(resp.to_value())
    }
}

pub struct Teams;

#[async_trait]
impl Tool for Teams {
    fn name(&self) -> &'static str {
        "get_espn_teams"
    }

    fn description(&self) -> &'static str {
        "All teams in a league with their ESPN IDs."
    }

    fn input_schema(&self) -> Value {
        object_schema(league_properties(), &["sport", "league"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let sport = required_str(&input, "sport")?;
        let league = required_str(&input, "league")?;
        Ok(ctx.espn().get_teams(sport, league).await.to_value())
    }
}

pub struct TeamDetails;

#[async_trait]
impl Tool for TeamDetails {
    fn name(&self) -> &'static str {
        "get_espn_team_details"
    }

    fn description(&self) -> &'static str {
        "Details for one team, optionally with roster and stats."
    }

    fn input_schema(&self) -> Value {
        let mut props = league_properties();
        props.insert("team_id".into(), json!({"type": "string", "description": "ESPN team ID (see find_team)"}));
        props.insert("include_roster".into(), json!({"type": "boolean", "default": false}));
        object_schema(props, &["sport", "league", "team_id"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let sport = required_str(&input, "sport")?;
        let league = required_str(&input, "league")?;
        let team_id = required_id(&input, "team_id")?;
        let roster = optional_bool(&input, "include_roster", false);
        let resp = ctx
            .espn()
            .get_team_details(sport, league, &team_id, roster)
            .await;
        Ok(resp.to_value())
    }
}

pub struct TeamSchedule;

#[async_trait]
impl Tool for TeamSchedule {
    fn name(&self) -> &'static str {
        "get_espn_team_schedule"
    }

    fn description(&self) -> &'static str {
        "Schedule and results for one team."
    }

    fn input_schema(&self) -> Value {
        let mut props = league_properties();
        props.insert("team_id".into(), json!({"type": "string"}));
        props.insert("season".into(), json!({"type": "integer"}));
        object_schema(props, &["sport", "league", "team_id"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let sport = required_str(&input, "sport")?;
        let league = required_str(&input, "league")?;
        let team_id = required_id(&input, "team_id")?;
        let resp = ctx
            .espn()
            .get_team_schedule(sport, league, &team_id, optional_season(&input))
            .await;
        Ok(resp.to_value())
    }
}

pub struct News;

#[async_trait]
impl Tool for News {
    fn name(&self) -> &'static str {
        "get_espn_news"
    }

    fn description(&self) -> &'static str {
        "Latest news articles for a league."
    }

    fn input_schema(&self) -> Value {
        let mut props = league_properties();
        props.insert("limit".into(), json!({"type": "integer", "default": 20}));
        object_schema(props, &["sport", "league"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let sport = required_str(&input, "sport")?;
        let league = required_str(&input, "league")?;
        let limit = as_u32(optional_u64(&input, "limit", 20));
        Ok(ctx.espn().get_news(sport, league, limit).await.to_value())
    }
}

pub struct Search;

#[async_trait]
impl Tool for Search {
    fn name(&self) -> &'static str {
        "search_espn"
    }

    fn description(&self) -> &'static str {
        "Search ESPN for teams, players or articles."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string"},
                "limit": {"type": "integer", "default": 10}
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let query = required_str(&input, "query")?;
        let limit = as_u32(optional_u64(&input, "limit", 10));
        Ok(ctx.espn().search(query, limit).await.to_value())
    }
}

pub struct GameSummary;

#[async_trait]
impl Tool for GameSummary {
    fn name(&self) -> &'static str {
        "get_espn_game_summary"
    }

    fn description(&self) -> &'static str {
        "Box score, leaders, game info and recap for one ESPN event."
    }

    fn input_schema(&self) -> Value {
        let mut props = league_properties();
        props.insert("event_id".into(), json!({"type": "string"}));
        object_schema(props, &["sport", "league", "event_id"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let sport = required_str(&input, "sport")?;
        let league = required_str(&input, "league")?;
        let event_id = required_id(&input, "event_id")?;
        let resp = ctx.espn().get_game_summary(sport, league, &event_id).await;
        Ok(resp.to_value())
    }
}
