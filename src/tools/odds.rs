use super::*;
use crate::feed::OddsParams;

fn sport_property() -> Value {
    json!({
        "type": "string",
        "description": "Odds API sport key (e.g. americanfootball_nfl, basketball_nba, icehockey_nhl, or 'upcoming')"
    })
}

fn odds_params(input: &Value) -> OddsParams {
    OddsParams {
        regions: str_or(input, "regions", "us").to_string(),
        markets: optional_str(input, "markets").map(str::to_string),
        odds_format: str_or(input, "odds_format", "american").to_string(),
        date_format: str_or(input, "date_format", "iso").to_string(),
    }
}

pub struct AvailableSports;

#[async_trait]
impl Tool for AvailableSports {
    fn name(&self) -> &'static str {
        "get_available_sports"
    }

    fn description(&self) -> &'static str {
        "List sports from The Odds API. In-season only unless all_sports is true."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "all_sports": {"type": "boolean", "default": false}
            },
            "required": []
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let client = ctx.odds()?;
        let all = optional_bool(&input, "all_sports", false);
        Ok(client.get_sports(all).await.to_value())
    }
}

pub struct Odds;

#[async_trait]
impl Tool for Odds {
    fn name(&self) -> &'static str {
        "get_odds"
    }

    fn description(&self) -> &'static str {
        "Current betting odds for upcoming games in a sport (h2h, spreads, totals)."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "sport": sport_property(),
                "regions": {"type": "string", "default": "us", "description": "us, uk, eu, au (comma separated)"},
                "markets": {"type": "string", "description": "h2h, spreads, totals (comma separated)"},
                "odds_format": {"type": "string", "default": "american", "enum": ["american", "decimal"]},
                "date_format": {"type": "string", "default": "iso", "enum": ["iso", "unix"]}
            },
            "required": ["sport"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let client = ctx.odds()?;
        let sport = required_str(&input, "sport")?;
        Ok(client.get_odds(sport, &odds_params(&input)).await.to_value())
    }
}

pub struct Scores;

#[async_trait]
impl Tool for Scores {
    fn name(&self) -> &'static str {
        "get_scores"
    }

    fn description(&self) -> &'static str {
        "Scores for recent, live and upcoming games. Looks back at most 3 days."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "sport": sport_property(),
                "days_from": {"type": "integer", "default": 3, "minimum": 1, "maximum": 3}
            },
            "required": ["sport"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let client = ctx.odds()?;
        let sport = required_str(&input, "sport")?;
        let days_from = as_u32(optional_u64(&input, "days_from", 3));
        Ok(client.get_scores(sport, days_from).await.to_value())
    }
}

pub struct EventOdds;

#[async_trait]
impl Tool for EventOdds {
    fn name(&self) -> &'static str {
        "get_event_odds"
    }

    fn description(&self) -> &'static str {
        "Detailed odds for a single game/event by event ID."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "sport": sport_property(),
                "event_id": {"type": "string"},
                "regions": {"type": "string", "default": "us"},
                "markets": {"type": "string"},
                "odds_format": {"type": "string", "default": "american", "enum": ["american", "decimal"]}
            },
            "required": ["sport", "event_id"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let client = ctx.odds()?;
        let sport = required_str(&input, "sport")?;
        let event_id = required_id(&input, "event_id")?;
        let resp = client
            .get_event_odds(sport, &event_id, &odds_params(&input))
            .await;
        Ok(resp.to_value())
    }
}

pub struct SearchOdds;

#[async_trait]
impl Tool for SearchOdds {
    fn name(&self) -> &'static str {
        "search_odds"
    }

    fn description(&self) -> &'static str {
        "Find odds for games involving a team name. Scans NFL, NBA, MLB and NHL unless a sport is given."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Team name or part of one, e.g. 'Lakers'"},
                "sport": sport_property(),
                "regions": {"type": "string", "default": "us"},
                "markets": {"type": "string", "default": "h2h"}
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let client = ctx.odds()?;
        let query = required_str(&input, "query")?;
        let result = client
            .search_odds(
                query,
                optional_str(&input, "sport"),
                str_or(&input, "regions", "us"),
                str_or(&input, "markets", "h2h"),
            )
            .await;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::registry;
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_get_odds_defaults() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v4/sports/basketball_nba/odds")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("regions".into(), "us".into()),
                Matcher::UrlEncoded("oddsFormat".into(), "american".into()),
                Matcher::UrlEncoded("dateFormat".into(), "iso".into()),
                Matcher::UrlEncoded("apiKey".into(), "k1".into()),
            ]))
            .with_status(200)
            .with_header("x-requests-remaining", "499")
            .with_body("[]")
            .create_async()
            .await;

        let reg = registry(Some(&server.url()), "http://127.0.0.1:1");
        let out = reg.call("get_odds", json!({"sport": "basketball_nba"})).await;
        mock.assert_async().await;
        assert_eq!(out["success"], true);
        assert_eq!(out["data"], json!([]));
        assert_eq!(out["usage"]["remaining"], "499");
    }

    #[tokio::test]
    async fn test_scores_days_clamped() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v4/sports/icehockey_nhl/scores")
            .match_query(Matcher::UrlEncoded("daysFrom".into(), "3".into()))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let reg = registry(Some(&server.url()), "http://127.0.0.1:1");
        let out = reg
            .call("get_scores", json!({"sport": "icehockey_nhl", "days_from": 9}))
            .await;
        mock.assert_async().await;
        assert_eq!(out["success"], true);
    }

    #[tokio::test]
    async fn test_vendor_failure_is_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v4/sports")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body("bad key")
            .create_async()
            .await;

        let reg = registry(Some(&server.url()), "http://127.0.0.1:1");
        let out = reg.call("get_available_sports", json!({})).await;
        assert_eq!(out["success"], false);
        assert_eq!(out["error"], "API returned status 401");
        assert_eq!(out["details"], "bad key");
    }

    #[tokio::test]
    async fn test_event_odds_numeric_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v4/sports/basketball_nba/events/12345/odds")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"id": "12345", "bookmakers": []}"#)
            .create_async()
            .await;

        let reg = registry(Some(&server.url()), "http://127.0.0.1:1");
        let out = reg
            .call("get_event_odds", json!({"sport": "basketball_nba", "event_id": 12345}))
            .await;
        mock.assert_async().await;
        assert_eq!(out["data"]["id"], "12345");
    }
}
