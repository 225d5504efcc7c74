use super::layout::*;
use serde_json::Value;

const INNER: usize = 64;
const NOTES_WIDTH: usize = INNER - 6;
const MAX_NOTE_LINES: usize = 5;
const MAX_PERFORMERS: usize = 3;

const STAT_LABELS: [(&str, &str); 5] = [
    ("fieldGoalPct", "FG%"),
    ("threePointPct", "3P%"),
    ("freeThrowPct", "FT%"),
    ("rebounds", "REB"),
    ("assists", "AST"),
];

/// Box-score card for an ESPN game summary payload.
pub fn format_game_summary(summary: &Value) -> String {
    let competition = array_at(summary, &["header", "competitions"]).first();
    let competitors = competition
        .map(|c| array_at(c, &["competitors"]))
        .unwrap_or(&[]);
    let teams = array_at(summary, &["boxscore", "teams"]);

    let status = competition
        .and_then(|c| text_at(c, &["status", "type", "detail"]))
        .unwrap_or_else(|| "Game".to_string());

    let mut card = vec![top_border(INNER), centered_row(&status, INNER)];
    if let Some(venue) = text_at(summary, &["gameInfo", "venue", "fullName"]) {
        card.push(centered_row(&format!("@ {}", venue), INNER));
    }
    card.push(divider(INNER));
    card.push(blank_row(INNER));

    for team in teams {
        let name = text_or(team, &["team", "displayName"], "").to_uppercase();
        let record = text_at(team, &["team", "record"])
            .map(|r| format!(" ({})", r))
            .unwrap_or_default();
        let score = final_score(team, competitors);
        let line = format!(
            "{}{:>width$}",
            fit(&format!("   {}{}", name, record), 42),
            format!("{} ", score),
            width = INNER - 42
        );
        card.push(left_row(&line, INNER));
    }
    card.push(blank_row(INNER));

    section(&mut card, "QUARTER-BY-QUARTER");
    let periods = teams
        .first()
        .map(|t| linescores(t, competitors).len())
        .unwrap_or(0);
    let mut header = " ".repeat(12);
    for i in 0..periods {
        header.push_str(if i < 4 { ["Q1", "Q2", "Q3", "Q4"][i] } else { "OT" });
        header.push_str("   ");
    }
    header.push_str("FINAL");
    card.push(left_row(&header, INNER));
    for team in teams {
        let mut line = format!("   {:7}", text_or(team, &["team", "abbreviation"], "TM"));
        for ls in linescores(team, competitors) {
            line.push_str(&format!("{:>5}", text_or(ls, &["displayValue"], "0")));
        }
        line.push_str(&format!("{:>7}", final_score(team, competitors)));
        card.push(left_row(&line, INNER));
    }
    card.push(blank_row(INNER));

    section(&mut card, "TEAM STATS");
    let abbr = |idx: usize, fallback: &str| {
        teams
            .get(idx)
            .map(|t| text_or(t, &["team", "abbreviation"], fallback))
            .unwrap_or_else(|| fallback.to_string())
    };
    card.push(left_row(
        &format!("{:13}{:^21} {:^21}", "", abbr(0, "TM1"), abbr(1, "TM2")),
        INNER,
    ));
    for (key, label) in STAT_LABELS {
        let value = |idx: usize| {
            teams
                .get(idx)
                .and_then(|t| team_stat(t, key))
                .unwrap_or_else(|| "-".to_string())
        };
        card.push(left_row(
            &format!("   {:8} {:^21} {:^21}", label, value(0), value(1)),
            INNER,
        ));
    }
    card.push(blank_row(INNER));

    section(&mut card, "TOP PERFORMERS");
    for team in teams {
        let name = text_or(team, &["team", "displayName"], "").to_uppercase();
        card.push(left_row(&format!("   {}", name), INNER));
        for line in performers(team, summary) {
            card.push(left_row(&line, INNER));
        }
        card.push(blank_row(INNER));
    }

    if let Some(story) = text_at(summary, &["article", "story"]) {
        section(&mut card, "GAME NOTES");
        for line in wrap(&strip_tags(&story), NOTES_WIDTH)
            .into_iter()
            .take(MAX_NOTE_LINES)
        {
            card.push(left_row(&format!("   {}", line), INNER));
        }
        card.push(blank_row(INNER));
    }

    section(&mut card, "GAME INFO");
    let tv: Vec<String> = array_at(summary, &["gameInfo", "broadcast", "broadcasters"])
        .iter()
        .take(2)
        .filter_map(|b| array_at(b, &["names"]).first().and_then(display_value))
        .collect();
    if !tv.is_empty() {
        card.push(left_row(&format!("   TV: {}", tv.join(", ")), INNER));
    }
    if let Some(attendance) = text_at(summary, &["gameInfo", "attendance"]) {
        card.push(left_row(&format!("   Attendance: {}", attendance), INNER));
    }
    card.push(bottom_border(INNER));

    card.join("\n")
}

fn section(card: &mut Vec<String>, title: &str) {
    card.push(divider(INNER));
    card.push(centered_row(title, INNER));
    card.push(blank_row(INNER));
}

fn header_competitor<'a>(team: &Value, competitors: &'a [Value]) -> Option<&'a Value> {
    let id = text_at(team, &["team", "id"])?;
    competitors.iter().find(|c| {
        let cid = text_at(c, &["team", "id"]).or_else(|| text_at(c, &["id"]));
        cid.as_deref() == Some(id.as_str())
    })
}

/// Header competitor score, then the last boxscore statistic, then `0`.
fn final_score(team: &Value, competitors: &[Value]) -> String {
    header_competitor(team, competitors)
        .and_then(|c| text_at(c, &["score"]))
        .or_else(|| {
            array_at(team, &["statistics"])
                .last()
                .and_then(|s| text_at(s, &["displayValue"]))
        })
        .unwrap_or_else(|| "0".to_string())
}

fn linescores<'a>(team: &'a Value, competitors: &'a [Value]) -> &'a [Value] {
    let own = array_at(team, &["linescores"]);
    if !own.is_empty() {
        return own;
    }
    header_competitor(team, competitors)
        .map(|c| array_at(c, &["linescores"]))
        .unwrap_or(&[])
}

fn team_stat(team: &Value, name: &str) -> Option<String> {
    array_at(team, &["statistics"])
        .iter()
        .find(|s| s.get("name").and_then(Value::as_str) == Some(name))
        .and_then(|s| text_at(s, &["displayValue"]))
}

/// Up to three player lines: the team's own `players` list, else the
/// summary's per-category `leaders` for that team.
fn performers(team: &Value, summary: &Value) -> Vec<String> {
    let players = array_at(team, &["players"]);
    if !players.is_empty() {
        return players
            .iter()
            .take(MAX_PERFORMERS)
            .map(|p| {
                let stats: Vec<String> = array_at(p, &["stats"])
                    .iter()
                    .take(4)
                    .filter_map(display_value)
                    .collect();
                format!(
                    "   {:20} {}",
                    text_or(p, &["athlete", "displayName"], ""),
                    stats.join(", ")
                )
            })
            .collect();
    }

    let Some(team_id) = text_at(team, &["team", "id"]) else {
        return Vec::new();
    };
    array_at(summary, &["leaders"])
        .iter()
        .find(|l| text_at(l, &["team", "id"]).as_deref() == Some(team_id.as_str()))
        .map(|l| array_at(l, &["leaders"]))
        .unwrap_or(&[])
        .iter()
        .filter_map(|category| {
            let top = array_at(category, &["leaders"]).first()?;
            Some(format!(
                "   {:20} {}: {}",
                text_or(top, &["athlete", "displayName"], ""),
                text_or(category, &["displayName"], ""),
                text_or(top, &["displayValue"], "-")
            ))
        })
        .take(MAX_PERFORMERS)
        .collect()
}
