use super::layout::*;
use serde_json::{json, Value};

const TABLE_INNER: usize = 101;
const MAX_TABLE_GAMES: usize = 15;

const CARD_INNER: usize = 88;
const MAX_DETAILED_GAMES: usize = 10;
const NAME_WIDTH: usize = 22;
const MIN_NAME_WIDTH: usize = 12;
const TOTAL_CELL: usize = 6;
const MIN_PERIOD_CELL: usize = 3;
/// Periods past this many share the last column.
const MAX_PERIOD_COLUMNS: usize = 9;

/// Pick (away, home) competitors by `homeAway`, falling back to ESPN's
/// home-first ordering.
pub fn split_competitors(competitors: &[Value]) -> Option<(&Value, &Value)> {
    if competitors.len() < 2 {
        return None;
    }
    let side = |which: &str| {
        competitors
            .iter()
            .find(|c| c.get("homeAway").and_then(Value::as_str) == Some(which))
    };
    let away = side("away").unwrap_or(&competitors[1]);
    let home = side("home").unwrap_or(&competitors[0]);
    Some((away, home))
}

/// Flatten an ESPN scoreboard event into the odds-style game shape the
/// table formatter reads.
pub fn espn_event_row(event: &Value) -> Value {
    let competition = array_at(event, &["competitions"]).first();
    let sides = competition.and_then(|c| split_competitors(array_at(c, &["competitors"])));

    let mut row = json!({
        "status": event.get("status").cloned().unwrap_or(Value::Null),
    });
    if let Some(date) = text_at(event, &["date"]) {
        row["commence_time"] = Value::String(date);
    }
    if let Some((away, home)) = sides {
        for (prefix, comp) in [("away", away), ("home", home)] {
            if let Some(name) = text_at(comp, &["team", "displayName"]) {
                row[format!("{prefix}_team")] = Value::String(name);
            }
            if let Some(score) = text_at(comp, &["score"]) {
                row[format!("{prefix}_score")] = Value::String(score);
            }
        }
    }
    row
}

/// One row per game: away, home, score and time or status.
pub fn format_scoreboard_table(games: &[Value]) -> String {
    if games.is_empty() {
        return "No games found.".to_string();
    }

    let mut lines = vec![
        String::new(),
        top_border(TABLE_INNER),
        table_row("AWAY TEAM", "HOME TEAM", "SCORE", "TIME/STATUS"),
        divider(TABLE_INNER),
    ];

    for game in games.iter().take(MAX_TABLE_GAMES) {
        let away = text_at(game, &["away_team"])
            .or_else(|| text_at(game, &["awayTeam", "name"]))
            .unwrap_or_else(|| "TBD".to_string());
        let home = text_at(game, &["home_team"])
            .or_else(|| text_at(game, &["homeTeam", "name"]))
            .unwrap_or_else(|| "TBD".to_string());

        let away_score = text_at(game, &["away_score"])
            .or_else(|| text_at(game, &["awayTeam", "score"]))
            .unwrap_or_else(|| "-".to_string());
        let home_score = text_at(game, &["home_score"])
            .or_else(|| text_at(game, &["homeTeam", "score"]))
            .unwrap_or_else(|| "-".to_string());

        lines.push(table_row(
            &away,
            &home,
            &format!("{} - {}", away_score, home_score),
            &game_time(game),
        ));
    }

    lines.push(bottom_border(TABLE_INNER));
    lines.join("\n") + "\n"
}

fn table_row(away: &str, home: &str, score: &str, time: &str) -> String {
    format!(
        "│ {} │ {} │ {} │ {} │",
        fit(away, 20),
        fit(home, 20),
        fit(score, 15),
        fit(time, 35)
    )
}

/// Status detail beats the scheduled start; ISO timestamps are reformatted.
fn game_time(game: &Value) -> String {
    let raw = text_at(game, &["status", "type", "detail"])
        .or_else(|| text_at(game, &["commence_time"]))
        .unwrap_or_default();
    if raw.contains('T') {
        if let Some(formatted) = format_time(&raw, "%a %m/%d %I:%M %p") {
            return formatted;
        }
    }
    raw
}

fn period_labels(sport: &str) -> &'static [&'static str] {
    match sport {
        "hockey" => &["P1", "P2", "P3", "OT", "SO"],
        _ => &["Q1", "Q2", "Q3", "Q4", "OT"],
    }
}

/// Periods past the named ones count up from `OT2`.
fn period_label(labels: &[&str], i: usize) -> String {
    match labels.get(i) {
        Some(label) => label.to_string(),
        None => format!("OT{}", i + 2 - labels.len()),
    }
}

/// Fold every period from `from` on into one number, when they all parse.
fn folded_score(line: &[Value], from: usize) -> String {
    let scores: Option<Vec<f64>> = line
        .iter()
        .skip(from)
        .map(|ls| period_score(ls).parse::<f64>().ok())
        .collect();
    match scores {
        Some(s) if !s.is_empty() => format!("{}", s.iter().sum::<f64>()),
        _ => "-".to_string(),
    }
}

/// Cell and name widths that keep every period plus TOTAL inside the card.
fn column_widths(columns: usize) -> (usize, usize) {
    // leading space, then " │ " before each period cell and the TOTAL cell
    let budget = CARD_INNER - 1 - (3 + TOTAL_CELL);
    for cell in (MIN_PERIOD_CELL..=TOTAL_CELL).rev() {
        let name = budget.saturating_sub((cell + 3) * columns);
        if name >= MIN_NAME_WIDTH {
            return (cell, name.min(NAME_WIDTH));
        }
    }
    (MIN_PERIOD_CELL, MIN_NAME_WIDTH)
}

fn period_score(linescore: &Value) -> String {
    if let Some(text) = text_at(linescore, &["displayValue"]) {
        return text;
    }
    match linescore.get("value") {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
            _ => n.to_string(),
        },
        Some(other) => display_value(other).unwrap_or_else(|| "-".to_string()),
        None => display_value(linescore).unwrap_or_else(|| "-".to_string()),
    }
}

/// Per-game cards with period-by-period line scores. Expects raw ESPN
/// scoreboard events.
pub fn format_detailed_scoreboard(games: &[Value], sport: &str) -> String {
    if games.is_empty() {
        return "No games found.".to_string();
    }
    let labels = period_labels(sport);
    let mut out = String::from("\n");

    for game in games.iter().take(MAX_DETAILED_GAMES) {
        let Some(comp) = array_at(game, &["competitions"]).first() else {
            continue;
        };
        let Some((away, home)) = split_competitors(array_at(comp, &["competitors"])) else {
            continue;
        };

        let away_line = array_at(away, &["linescores"]);
        let home_line = array_at(home, &["linescores"]);
        let periods = away_line.len().max(home_line.len());
        let columns = periods.min(MAX_PERIOD_COLUMNS);
        let folded = periods > MAX_PERIOD_COLUMNS;
        let (cell, name_width) = column_widths(columns);
        let cell_text = |text: &str| format!(" │ {:^w$}", truncate(text, cell), w = cell);

        let mut header = format!(" {}", fit("TEAM", name_width));
        for i in 0..columns {
            let mut label = period_label(labels, i);
            if folded && i + 1 == columns {
                label.push('+');
            }
            header.push_str(&cell_text(&label));
        }
        header.push_str(&format!(" │ {:^w$}", "TOTAL", w = TOTAL_CELL));

        let team_row = |comp: &Value, fallback: &str, line: &[Value]| {
            let name = text_or(comp, &["team", "displayName"], fallback);
            let mut row = format!(" {}", fit(&name, name_width));
            for i in 0..columns {
                let score = if folded && i + 1 == columns {
                    folded_score(line, i)
                } else {
                    line.get(i).map(period_score).unwrap_or_else(|| "-".to_string())
                };
                row.push_str(&cell_text(&score));
            }
            let total = truncate(&text_or(comp, &["score"], "0"), TOTAL_CELL);
            row.push_str(&format!(" │ {:^w$}", total, w = TOTAL_CELL));
            row
        };

        let mut footer = vec![text_or(comp, &["status", "type", "detail"], "TBD")];
        if let Some(weather) = comp.get("weather").and_then(weather_summary) {
            footer.push(weather);
        }

        let card = [
            top_border(CARD_INNER),
            centered_row(&text_or(game, &["name"], "Game"), CARD_INNER),
            divider(CARD_INNER),
            left_row(&header, CARD_INNER),
            divider(CARD_INNER),
            left_row(&team_row(away, "Away", away_line), CARD_INNER),
            left_row(&team_row(home, "Home", home_line), CARD_INNER),
            divider(CARD_INNER),
            centered_row(&footer.join(" • "), CARD_INNER),
            bottom_border(CARD_INNER),
        ];
        out.push_str(&card.join("\n"));
        out.push_str("\n\n");
    }

    if out.trim().is_empty() {
        return "No games found.".to_string();
    }
    out
}

fn weather_summary(weather: &Value) -> Option<String> {
    let temp = text_at(weather, &["temperature"]);
    let cond = text_at(weather, &["displayValue"]).or_else(|| text_at(weather, &["condition"]));
    match (temp, cond) {
        (Some(t), Some(c)) => Some(format!("Weather: {}°F, {}", t, c)),
        (Some(t), None) => Some(format!("Weather: {}°F", t)),
        (None, Some(c)) => Some(format!("Weather: {}", c)),
        (None, None) => None,
    }
}
