use super::layout::*;
use serde_json::Value;

const RULE_WIDTH: usize = 70;
const MAX_GAMES: usize = 5;
const MAX_BOOKMAKERS: usize = 3;

/// Plain-text side-by-side of each game's first market across bookmakers.
pub fn format_odds_comparison(games: &[Value]) -> String {
    if games.is_empty() {
        return "No odds available.".to_string();
    }

    let mut out = Vec::new();
    for game in games.iter().take(MAX_GAMES) {
        out.push(format!("\n{}", "═".repeat(RULE_WIDTH)));
        out.push(format!(
            "{} @ {}",
            text_or(game, &["away_team"], "Away"),
            text_or(game, &["home_team"], "Home")
        ));
        out.push("─".repeat(RULE_WIDTH));

        let bookmakers = array_at(game, &["bookmakers"]);
        if bookmakers.is_empty() {
            out.push("  No odds available".to_string());
            continue;
        }
        for bm in bookmakers.iter().take(MAX_BOOKMAKERS) {
            let Some(market) = array_at(bm, &["markets"]).first() else {
                continue;
            };
            let prices: Vec<String> = array_at(market, &["outcomes"])
                .iter()
                .map(|o| {
                    let price = o.get("price").and_then(display_value).unwrap_or_default();
                    format!("{}: {}", text_or(o, &["name"], ""), price)
                })
                .collect();
            out.push(format!(
                "  {:20} ({}): {}",
                text_or(bm, &["title"], "Unknown"),
                text_or(market, &["key"], "h2h"),
                prices.join(" | ")
            ));
        }
    }
    out.join("\n")
}
