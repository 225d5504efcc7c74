use super::*;
use crate::teams::{self, League};

fn league_property() -> Value {
    json!({"type": "string", "enum": ["nfl", "nba", "nhl"]})
}

pub struct FindTeam;

#[async_trait]
impl Tool for FindTeam {
    fn name(&self) -> &'static str {
        "find_team"
    }

    fn description(&self) -> &'static str {
        "Resolve a team name, nickname or abbreviation to its ESPN team ID (NFL, NBA, NHL). No network call."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "e.g. 'Chiefs', 'KC', 'Kansas City Chiefs'"},
                "league": league_property()
            },
            "required": ["query", "league"]
        })
    }

    async fn execute(&self, input: Value, _ctx: &ToolContext) -> Result<Value, ToolError> {
        let query = required_str(&input, "query")?;
        let league = required_str(&input, "league")?;
        Ok(match teams::find_team(query, league) {
            Some(team) => json!({"success": true, "team": team}),
            None => json!({
                "success": false,
                "error": format!("No {} team matches '{}'", league.to_uppercase(), query),
            }),
        })
    }
}

pub struct TeamReference;

#[async_trait]
impl Tool for TeamReference {
    fn name(&self) -> &'static str {
        "get_team_reference"
    }

    fn description(&self) -> &'static str {
        "Text table of every team in a league with ESPN ID, abbreviation and division."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"league": league_property()},
            "required": ["league"]
        })
    }

    async fn execute(&self, input: Value, _ctx: &ToolContext) -> Result<Value, ToolError> {
        let league = required_str(&input, "league")?;
        let parsed = league.parse::<League>().map_err(ToolError::InvalidInput)?;
        Ok(json!({
            "success": true,
            "league": parsed.to_string(),
            "count": parsed.teams().len(),
            "text": teams::reference_table(league),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::registry;
    use super::*;

    #[tokio::test]
    async fn test_find_team_tool() {
        let reg = registry(None, "http://127.0.0.1:1");
        let out = reg
            .call("find_team", json!({"query": "lakers", "league": "NBA"}))
            .await;
        assert_eq!(out["success"], true);
        assert_eq!(out["team"]["id"], "13");
        assert_eq!(out["team"]["abbr"], "LAL");

        let miss = reg
            .call("find_team", json!({"query": "lakers", "league": "nfl"}))
            .await;
        assert_eq!(miss["success"], false);
    }

    #[tokio::test]
    async fn test_team_reference_tool() {
        let reg = registry(None, "http://127.0.0.1:1");
        let out = reg.call("get_team_reference", json!({"league": "nfl"})).await;
        assert_eq!(out["count"], 32);
        assert!(out["text"].as_str().unwrap().contains("NFL TEAMS"));

        let bad = reg.call("get_team_reference", json!({"league": "mls"})).await;
        assert_eq!(bad["error"], "Unknown league: mls. Supported: nfl, nba, nhl");
    }
}
