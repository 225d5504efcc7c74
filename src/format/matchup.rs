use super::layout::*;
use serde_json::Value;

const WIDTH: usize = 66;
const INNER: usize = WIDTH - 2;
const NAME_MAX: usize = 24;
const OUTCOME_NAME_MAX: usize = 28;
const PRICE_MAX: usize = 24;
const MAX_BOOKMAKERS: usize = 3;

/// Render one game as a boxed matchup card: teams, score when both sides
/// have one, kickoff time, TV, weather and up to three bookmakers' odds.
pub fn format_matchup_card(game: &Value) -> String {
    let home = text_or(game, &["home_team"], "Home");
    let away = text_or(game, &["away_team"], "Away");

    let time_str = match text_at(game, &["commence_time"]) {
        Some(raw) => format_time(&raw, "%a, %b %d @ %I:%M %p").unwrap_or(raw),
        None => "TBD".to_string(),
    };

    let mut lines = vec![
        String::new(),
        top_border(INNER),
        blank_row(INNER),
        centered_row("MATCHUP", INNER),
        blank_row(INNER),
        divider(INNER),
        blank_row(INNER),
    ];

    let matchup = format!(
        "{}  vs  {}",
        shorten_name(&away, NAME_MAX),
        shorten_name(&home, NAME_MAX)
    );
    lines.push(centered_row(&matchup, INNER));
    lines.push(blank_row(INNER));

    if let (Some(away_score), Some(home_score)) =
        (text_at(game, &["away_score"]), text_at(game, &["home_score"]))
    {
        lines.push(centered_row(&format!("{}  -  {}", away_score, home_score), INNER));
        lines.push(blank_row(INNER));
    }

    lines.push(centered_row(&time_str, INNER));

    if let Some(tv) = broadcast_line(array_at(game, &["broadcasts"])) {
        lines.push(centered_row(&tv, INNER));
    }
    if let Some(weather) = weather_line(game.get("weather")) {
        lines.push(centered_row(&weather, INNER));
    }

    push_bookmakers(&mut lines, array_at(game, &["bookmakers"]));

    lines.push(blank_row(INNER));
    lines.push(bottom_border(INNER));
    lines.join("\n")
}

/// National broadcasts first, else the first two; at most three channel names.
fn broadcast_line(broadcasts: &[Value]) -> Option<String> {
    if broadcasts.is_empty() {
        return None;
    }
    let national: Vec<&Value> = broadcasts
        .iter()
        .filter(|b| {
            matches!(
                value_at(b, &["type", "shortName"]).and_then(Value::as_str),
                Some("") | Some("National")
            )
        })
        .collect();
    let chosen: Vec<&Value> = if national.is_empty() {
        broadcasts.iter().take(2).collect()
    } else {
        national
    };

    let channels: Vec<String> = chosen
        .iter()
        .take(2)
        .flat_map(|b| array_at(b, &["names"]).iter().take(2))
        .filter_map(display_value)
        .take(3)
        .collect();
    if channels.is_empty() {
        return None;
    }
    let line = format!("TV: {}", channels.join(", "));
    (line.chars().count() <= WIDTH - 4).then_some(line)
}

fn weather_line(weather: Option<&Value>) -> Option<String> {
    let weather = weather.filter(|w| w.is_object())?;
    let mut parts = Vec::new();
    if let Some(temp) = text_at(weather, &["temperature"]) {
        parts.push(format!("{}°F", temp));
    }
    if let Some(cond) =
        text_at(weather, &["condition"]).or_else(|| text_at(weather, &["displayValue"]))
    {
        parts.push(cond);
    }
    if let Some(wind) = text_at(weather, &["wind"]) {
        parts.push(wind);
    }
    if parts.is_empty() {
        return None;
    }
    let line = format!("Weather: {}", parts.join(", "));
    (line.chars().count() <= WIDTH - 4).then_some(line)
}

fn push_bookmakers(lines: &mut Vec<String>, bookmakers: &[Value]) {
    let shown = bookmakers.len().min(MAX_BOOKMAKERS);
    let mut separated = false;

    for (idx, bm) in bookmakers.iter().take(MAX_BOOKMAKERS).enumerate() {
        let Some(market) = array_at(bm, &["markets"]).first() else {
            continue;
        };
        let outcomes = array_at(market, &["outcomes"]);
        if outcomes.is_empty() {
            continue;
        }

        if !separated {
            lines.push(blank_row(INNER));
            lines.push(format!("│{}│", "─".repeat(INNER)));
            separated = true;
        }

        let title = text_or(bm, &["title"], "Bookmaker");
        let header = match text_or(market, &["key"], "h2h").as_str() {
            "h2h" => format!("Moneyline ({})", title),
            "spreads" => format!("Spread ({})", title),
            _ => format!("Odds ({})", title),
        };
        lines.push(centered_row(&header, INNER));
        lines.push(blank_row(INNER));

        for outcome in outcomes.iter().take(2) {
            let name = shorten_name(&text_or(outcome, &["name"], ""), OUTCOME_NAME_MAX);
            let price = truncate(&price_text(outcome), PRICE_MAX);
            let price_width = price.chars().count().max(8);
            let name_width = INNER.saturating_sub(4 + price_width);
            lines.push(format!(
                "│  {}{:>pw$}  │",
                fit(&name, name_width),
                price,
                pw = price_width
            ));
        }

        if idx + 1 < shown {
            lines.push(blank_row(INNER));
        }
    }
}

/// American-style price with an explicit `+`, plus the spread/total point.
fn price_text(outcome: &Value) -> String {
    let price = match outcome.get("price") {
        Some(Value::Number(n)) => {
            let text = match n.as_f64() {
                Some(p) if p.fract() == 0.0 => format!("{}", p as i64),
                _ => n.to_string(),
            };
            if n.as_f64().is_some_and(|p| p > 0.0) {
                format!("+{}", text)
            } else {
                text
            }
        }
        Some(other) => display_value(other).unwrap_or_default(),
        None => String::new(),
    };
    match outcome.get("point").and_then(Value::as_f64) {
        Some(point) if point != 0.0 => format!("{} ({:+.1})", price, point),
        _ => price,
    }
}
