use super::layout::*;
use serde_json::Value;

const INNER: usize = 76;
const MAX_ROWS: usize = 16;

/// Flatten ESPN standings groups (conferences, divisions) into one entry list.
pub fn collect_standings_entries(value: &Value) -> Vec<Value> {
    if let Some(entries) = value_at(value, &["standings", "entries"]).and_then(Value::as_array) {
        return entries.clone();
    }
    array_at(value, &["children"])
        .iter()
        .flat_map(collect_standings_entries)
        .collect()
}

/// Read a stat from either a `{name: value}` object or ESPN's
/// `[{name, displayValue}]` list.
fn stat(entry: &Value, name: &str) -> Option<String> {
    match entry.get("stats")? {
        Value::Object(map) => map.get(name).and_then(display_value),
        Value::Array(list) => list
            .iter()
            .find(|s| s.get("name").and_then(Value::as_str) == Some(name))
            .and_then(|s| text_at(s, &["displayValue"]).or_else(|| text_at(s, &["value"]))),
        _ => None,
    }
}

pub fn format_standings_table(standings: &[Value]) -> String {
    if standings.is_empty() {
        return "No standings data available.".to_string();
    }

    let mut lines = vec![
        String::new(),
        top_border(INNER),
        row("RANK", "TEAM", "W", "L", "PCT", "GB"),
        divider(INNER),
    ];

    for (idx, entry) in standings.iter().take(MAX_ROWS).enumerate() {
        lines.push(row(
            &(idx + 1).to_string(),
            &text_or(entry, &["team", "displayName"], "Unknown"),
            &stat(entry, "wins").unwrap_or_else(|| "0".into()),
            &stat(entry, "losses").unwrap_or_else(|| "0".into()),
            &stat(entry, "winPercent").unwrap_or_else(|| "0.000".into()),
            &stat(entry, "gamesBehind").unwrap_or_else(|| "-".into()),
        ));
    }

    lines.push(bottom_border(INNER));
    lines.join("\n") + "\n"
}

fn row(rank: &str, team: &str, wins: &str, losses: &str, pct: &str, gb: &str) -> String {
    format!(
        "│ {} │ {} │ {} │ {} │ {} │ {} │",
        fit(rank, 5),
        fit(team, 30),
        fit(wins, 5),
        fit(losses, 5),
        fit(pct, 8),
        fit(gb, 6)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty() {
        assert_eq!(format_standings_table(&[]), "No standings data available.");
    }

    #[test]
    fn test_placeholders() {
        let table = format_standings_table(&[json!({})]);
        assert!(table.contains("Unknown"));
        assert!(table.contains("0.000"));
        assert!(table.contains("│ -      │"));
    }

    #[test]
    fn test_stats_object_and_array() {
        let rows = vec![
            json!({"team": {"displayName": "Boston Celtics"},
                   "stats": {"wins": 40, "losses": 12, "winPercent": ".769", "gamesBehind": "-"}}),
            json!({"team": {"displayName": "New York Knicks"},
                   "stats": [{"name": "wins", "displayValue": "35"},
                             {"name": "losses", "displayValue": "17"},
                             {"name": "gamesBehind", "displayValue": "5"}]}),
        ];
        let table = format_standings_table(&rows);
        assert!(table.contains("│ 1     │ Boston Celtics"));
        assert!(table.contains("│ 40    │ 12    │ .769     │"));
        assert!(table.contains("│ 35    │ 17    │ 0.000    │ 5      │"));
        for line in table.lines().filter(|l| !l.is_empty()) {
            assert_eq!(line.chars().count(), INNER + 2, "{line:?}");
        }
    }

    #[test]
    fn test_caps_rows() {
        let rows: Vec<Value> = (0..20).map(|_| json!({})).collect();
        let table = format_standings_table(&rows);
        assert!(table.contains("│ 16    │"));
        assert!(!table.contains("│ 17    │"));
    }

    #[test]
    fn test_collect_entries_from_groups() {
        let standings = json!({
            "children": [
                {"standings": {"entries": [{"team": {"displayName": "A"}}]}},
                {"children": [{"standings": {"entries": [{"team": {"displayName": "B"}}, {"team": {"displayName": "C"}}]}}]}
            ]
        });
        let entries = collect_standings_entries(&standings);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2]["team"]["displayName"], "C");
        assert!(collect_standings_entries(&json!({})).is_empty());
    }
}
