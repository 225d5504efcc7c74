// Tool surface: listing, argument errors and the not-configured odds and dashboard paths

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;
    use sports_tools::feed::{BookmakerFilter, DashboardClient, EspnClient, KeyRing, OddsApiClient};
    use sports_tools::tools::{ToolContext, ToolRegistry, DASHBOARD_NOT_CONFIGURED, ODDS_NOT_CONFIGURED};
    use std::time::Duration;

    fn registry(odds_url: Option<&str>, espn_url: &str) -> ToolRegistry {
        let odds = odds_url.map(|url| {
            OddsApiClient::new(
                KeyRing::new(["key-1"]).unwrap(),
                url,
                BookmakerFilter::default(),
                Duration::from_secs(5),
            )
            .unwrap()
        });
        let espn = EspnClient::new(espn_url, espn_url, Duration::from_secs(5)).unwrap();
        ToolRegistry::new(ToolContext::new(odds, espn))
    }

    #[test]
    fn test_listing_covers_every_tool() {
        let names = registry(None, "http://127.0.0.1:1").names();
        for expected in [
            "get_available_sports",
            "get_odds",
            "get_scores",
            "get_event_odds",
            "search_odds",
            "get_espn_scoreboard",
            "get_espn_standings",
            "get_espn_teams",
            "get_espn_team_details",
            "get_espn_team_schedule",
            "get_espn_news",
            "search_espn",
            "get_espn_game_summary",
            "get_comprehensive_game_info",
            "find_team",
            "get_team_reference",
            "get_formatted_odds",
            "get_formatted_scoreboard",
            "get_formatted_standings",
            "get_formatted_game_summary",
            "create_bet",
            "get_active_games",
            "get_my_bets",
            "get_bet_details",
            "get_game_odds",
            "search_teams",
            "get_dashboard_stats",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_required_params_listed_in_schema() {
        let descriptors = registry(None, "http://127.0.0.1:1").descriptors();
        let summary = descriptors
            .as_array()
            .unwrap()
            .iter()
            .find(|d| d["name"] == "get_espn_game_summary")
            .unwrap();
        assert_eq!(
            summary["input_schema"]["required"],
            json!(["sport", "league", "event_id"])
        );
    }

    #[tokio::test]
    async fn test_odds_tools_report_not_configured() {
        let reg = registry(None, "http://127.0.0.1:1");
        let out = reg
            .call("get_formatted_odds", json!({"sport": "basketball_nba"}))
            .await;
        assert_eq!(out, json!({"error": ODDS_NOT_CONFIGURED}));
    }

    #[tokio::test]
    async fn test_dashboard_tools_report_not_configured() {
        let reg = registry(None, "http://127.0.0.1:1");
        let out = reg.call("get_active_games", json!({})).await;
        assert_eq!(out, json!({"error": DASHBOARD_NOT_CONFIGURED}));
    }

    #[tokio::test]
    async fn test_active_games_feed_bet_placement() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/games")
            .match_header("authorization", "Bearer dash-key")
            .match_query(Matcher::UrlEncoded("sport".into(), "basketball_nba".into()))
            .with_status(200)
            .with_body(r#"{"games": [{"id": "g-42", "homeTeam": "Los Angeles Lakers"}]}"#)
            .create_async()
            .await;
        let placed = server
            .mock("POST", "/api/ai/bets")
            .match_header("authorization", "Bearer dash-key")
            .match_body(Matcher::PartialJson(json!({
                "selections": [{"gameId": "g-42", "type": "moneyline", "selection": "home", "odds": -140}],
                "betType": "single"
            })))
            .with_status(201)
            .with_body(r#"{"id": "b-1"}"#)
            .create_async()
            .await;

        let espn = EspnClient::new(&server.url(), &server.url(), Duration::from_secs(5)).unwrap();
        let dashboard = DashboardClient::new("dash-key", &server.url(), Duration::from_secs(5)).unwrap();
        let reg = ToolRegistry::new(ToolContext::new(None, espn).with_dashboard(dashboard));

        let games = reg
            .call("get_active_games", json!({"sport": "basketball_nba"}))
            .await;
        let game_id = games["data"]["games"][0]["id"].clone();
        let bet = reg
            .call(
                "create_bet",
                json!({
                    "selections": [{"gameId": game_id, "type": "moneyline", "selection": "home", "odds": -140}],
                    "bet_type": "single",
                    "stake": 25.5
                }),
            )
            .await;
        placed.assert_async().await;
        assert_eq!(bet["success"], true);
        assert_eq!(bet["data"]["id"], "b-1");
    }

    #[tokio::test]
    async fn test_null_args_treated_as_empty() {
        let reg = registry(None, "http://127.0.0.1:1");
        let out = reg.call("search_espn", serde_json::Value::Null).await;
        assert_eq!(out["error"], "Missing required parameter: query");
    }

    #[tokio::test]
    async fn test_team_lookup_feeds_espn_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/apis/site/v2/sports/football/nfl/teams/12/schedule")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"events": []}"#)
            .create_async()
            .await;

        let reg = registry(None, &server.url());
        let found = reg
            .call("find_team", json!({"query": "KC", "league": "nfl"}))
            .await;
        let team_id = found["team"]["id"].clone();
        let out = reg
            .call(
                "get_espn_team_schedule",
                json!({"sport": "football", "league": "nfl", "team_id": team_id}),
            )
            .await;
        mock.assert_async().await;
        assert_eq!(out["success"], true);
    }

    #[tokio::test]
    async fn test_usage_reported_for_odds_only() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v4/sports")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("x-requests-remaining", "12")
            .with_header("x-requests-used", "488")
            .with_body("[]")
            .create_async()
            .await;
        server
            .mock("GET", "/apis/site/v2/sports/basketball/nba/teams")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let reg = registry(Some(&server.url()), &server.url());
        let odds = reg.call("get_available_sports", json!({})).await;
        assert_eq!(odds["usage"], json!({"remaining": "12", "used": "488"}));
        let espn = reg
            .call("get_espn_teams", json!({"sport": "basketball", "league": "nba"}))
            .await;
        assert!(espn.get("usage").is_none());
    }
}
