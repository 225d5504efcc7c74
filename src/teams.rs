//! Static team reference data for the leagues ESPN tools are most often
//! pointed at, so callers can resolve a name to a vendor team ID offline.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamInfo {
    pub name: &'static str,
    pub id: &'static str,
    pub abbr: &'static str,
    pub division: &'static str,
}

const fn team(
    name: &'static str,
    id: &'static str,
    abbr: &'static str,
    division: &'static str,
) -> TeamInfo {
    TeamInfo {
        name,
        id,
        abbr,
        division,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum League {
    Nfl,
    Nba,
    Nhl,
}

impl League {
    pub fn teams(self) -> &'static [TeamInfo] {
        match self {
            League::Nfl => NFL_TEAMS,
            League::Nba => NBA_TEAMS,
            League::Nhl => NHL_TEAMS,
        }
    }

    fn title(self) -> &'static str {
        match self {
            League::Nfl => "NFL TEAMS",
            League::Nba => "NBA TEAMS",
            League::Nhl => "NHL TEAMS",
        }
    }
}

impl FromStr for League {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nfl" => Ok(League::Nfl),
            "nba" => Ok(League::Nba),
            "nhl" => Ok(League::Nhl),
            other => Err(format!("Unknown league: {}. Supported: nfl, nba, nhl", other)),
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            League::Nfl => "nfl",
            League::Nba => "nba",
            League::Nhl => "nhl",
        };
        f.write_str(name)
    }
}

/// Case-insensitive lookup: exact name, then abbreviation, then the first
/// name containing `query`. `None` for unknown leagues or blank queries.
pub fn find_team(query: &str, league: &str) -> Option<TeamInfo> {
    let teams = league.parse::<League>().ok()?.teams();
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    teams
        .iter()
        .find(|t| t.name.to_lowercase() == needle)
        .or_else(|| teams.iter().find(|t| t.abbr.to_lowercase() == needle))
        .or_else(|| teams.iter().find(|t| t.name.to_lowercase().contains(&needle)))
        .copied()
}

/// 80-column table of every team in `league`, sorted by name.
pub fn reference_table(league: &str) -> String {
    let league = match league.parse::<League>() {
        Ok(l) => l,
        Err(msg) => return msg,
    };

    let mut teams = league.teams().to_vec();
    teams.sort_by_key(|t| t.name);

    let heavy = "═".repeat(80);
    let mut out = format!("\n{heavy}\n{:^80}\n{heavy}\n", league.title());
    out.push_str(&format!(
        "{:<35} {:<8} {:<8} {:<20}\n",
        "TEAM", "ID", "ABBR", "DIVISION"
    ));
    out.push_str(&"─".repeat(80));
    out.push('\n');
    for t in &teams {
        out.push_str(&format!(
            "{:<35} {:<8} {:<8} {:<20}\n",
            t.name, t.id, t.abbr, t.division
        ));
    }
    out.push_str(&heavy);
    out.push('\n');
    out
}

const NFL_TEAMS: &[TeamInfo] = &[
    team("Arizona Cardinals", "22", "ARI", "NFC West"),
    team("Atlanta Falcons", "1", "ATL", "NFC South"),
    team("Baltimore Ravens", "33", "BAL", "AFC North"),
    team("Buffalo Bills", "2", "BUF", "AFC East"),
    team("Carolina Panthers", "29", "CAR", "NFC South"),
    team("Chicago Bears", "3", "CHI", "NFC North"),
    team("Cincinnati Bengals", "4", "CIN", "AFC North"),
    team("Cleveland Browns", "5", "CLE", "AFC North"),
    team("Dallas Cowboys", "6", "DAL", "NFC East"),
    team("Denver Broncos", "7", "DEN", "AFC West"),
    team("Detroit Lions", "8", "DET", "NFC North"),
    team("Green Bay Packers", "9", "GB", "NFC North"),
    team("Houston Texans", "34", "HOU", "AFC South"),
    team("Indianapolis Colts", "11", "IND", "AFC South"),
    team("Jacksonville Jaguars", "30", "JAX", "AFC South"),
    team("Kansas City Chiefs", "12", "KC", "AFC West"),
    team("Las Vegas Raiders", "13", "LV", "AFC West"),
    team("Los Angeles Chargers", "24", "LAC", "AFC West"),
    team("Los Angeles Rams", "14", "LAR", "NFC West"),
    team("Miami Dolphins", "15", "MIA", "AFC East"),
    team("Minnesota Vikings", "16", "MIN", "NFC North"),
    team("New England Patriots", "17", "NE", "AFC East"),
    team("New Orleans Saints", "18", "NO", "NFC South"),
    team("New York Giants", "19", "NYG", "NFC East"),
    team("New York Jets", "20", "NYJ", "AFC East"),
    team("Philadelphia Eagles", "21", "PHI", "NFC East"),
    team("Pittsburgh Steelers", "23", "PIT", "AFC North"),
    team("San Francisco 49ers", "25", "SF", "NFC West"),
    team("Seattle Seahawks", "26", "SEA", "NFC West"),
    team("Tampa Bay Buccaneers", "27", "TB", "NFC South"),
    team("Tennessee Titans", "10", "TEN", "AFC South"),
    team("Washington Commanders", "28", "WAS", "NFC East"),
];

const NBA_TEAMS: &[TeamInfo] = &[
    team("Atlanta Hawks", "1", "ATL", "Southeast"),
    team("Boston Celtics", "2", "BOS", "Atlantic"),
    team("Brooklyn Nets", "17", "BKN", "Atlantic"),
    team("Charlotte Hornets", "30", "CHA", "Southeast"),
    team("Chicago Bulls", "4", "CHI", "Central"),
    team("Cleveland Cavaliers", "5", "CLE", "Central"),
    team("Dallas Mavericks", "6", "DAL", "Southwest"),
    team("Denver Nuggets", "7", "DEN", "Northwest"),
    team("Detroit Pistons", "8", "DET", "Central"),
    team("Golden State Warriors", "9", "GSW", "Pacific"),
    team("Houston Rockets", "10", "HOU", "Southwest"),
    team("Indiana Pacers", "11", "IND", "Central"),
    team("LA Clippers", "12", "LAC", "Pacific"),
    team("Los Angeles Lakers", "13", "LAL", "Pacific"),
    team("Memphis Grizzlies", "29", "MEM", "Southwest"),
    team("Miami Heat", "14", "MIA", "Southeast"),
    team("Milwaukee Bucks", "15", "MIL", "Central"),
    team("Minnesota Timberwolves", "16", "MIN", "Northwest"),
    team("New Orleans Pelicans", "3", "NOP", "Southwest"),
    team("New York Knicks", "18", "NYK", "Atlantic"),
    team("Oklahoma City Thunder", "25", "OKC", "Northwest"),
    team("Orlando Magic", "19", "ORL", "Southeast"),
    team("Philadelphia 76ers", "20", "PHI", "Atlantic"),
    team("Phoenix Suns", "21", "PHX", "Pacific"),
    team("Portland Trail Blazers", "22", "POR", "Northwest"),
    team("Sacramento Kings", "23", "SAC", "Pacific"),
    team("San Antonio Spurs", "24", "SAS", "Southwest"),
    team("Toronto Raptors", "28", "TOR", "Atlantic"),
    team("Utah Jazz", "26", "UTA", "Northwest"),
    team("Washington Wizards", "27", "WAS", "Southeast"),
];

const NHL_TEAMS: &[TeamInfo] = &[
    team("Anaheim Ducks", "25", "ANA", "Pacific"),
    team("Arizona Coyotes", "28", "ARI", "Central"),
    team("Boston Bruins", "6", "BOS", "Atlantic"),
    team("Buffalo Sabres", "7", "BUF", "Atlantic"),
    team("Calgary Flames", "20", "CGY", "Pacific"),
    team("Carolina Hurricanes", "12", "CAR", "Metropolitan"),
    team("Chicago Blackhawks", "16", "CHI", "Central"),
    team("Colorado Avalanche", "21", "COL", "Central"),
    team("Columbus Blue Jackets", "29", "CBJ", "Metropolitan"),
    team("Dallas Stars", "25", "DAL", "Central"),
    team("Detroit Red Wings", "17", "DET", "Atlantic"),
    team("Edmonton Oilers", "22", "EDM", "Pacific"),
    team("Florida Panthers", "13", "FLA", "Atlantic"),
    team("Los Angeles Kings", "26", "LAK", "Pacific"),
    team("Minnesota Wild", "30", "MIN", "Central"),
    team("Montreal Canadiens", "8", "MTL", "Atlantic"),
    team("Nashville Predators", "18", "NSH", "Central"),
    team("New Jersey Devils", "1", "NJD", "Metropolitan"),
    team("New York Islanders", "2", "NYI", "Metropolitan"),
    team("New York Rangers", "3", "NYR", "Metropolitan"),
    team("Ottawa Senators", "9", "OTT", "Atlantic"),
    team("Philadelphia Flyers", "4", "PHI", "Metropolitan"),
    team("Pittsburgh Penguins", "5", "PIT", "Metropolitan"),
    team("San Jose Sharks", "28", "SJS", "Pacific"),
    team("Seattle Kraken", "55", "SEA", "Pacific"),
    team("St. Louis Blues", "19", "STL", "Central"),
    team("Tampa Bay Lightning", "14", "TBL", "Atlantic"),
    team("Toronto Maple Leafs", "10", "TOR", "Atlantic"),
    team("Vancouver Canucks", "23", "VAN", "Pacific"),
    team("Vegas Golden Knights", "54", "VGK", "Pacific"),
    team("Washington Capitals", "15", "WSH", "Metropolitan"),
    team("Winnipeg Jets", "52", "WPG", "Central"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_sizes() {
        assert_eq!(League::Nfl.teams().len(), 32);
        assert_eq!(League::Nba.teams().len(), 30);
        assert_eq!(League::Nhl.teams().len(), 32);
    }

    #[test]
    fn test_exact_partial_and_abbr_agree() {
        let exact = find_team("Kansas City Chiefs", "nfl").unwrap();
        assert_eq!(exact.id, "12");
        assert_eq!(find_team("chiefs", "NFL"), Some(exact));
        assert_eq!(find_team("KC", "nfl"), Some(exact));
        assert_eq!(find_team("kc", "nfl"), Some(exact));
    }

    #[test]
    fn test_abbreviation_beats_substring() {
        // "ne" also appears inside "Minnesota Vikings", which sorts first.
        assert_eq!(find_team("ne", "nfl").unwrap().name, "New England Patriots");
        assert_eq!(find_team("LAL", "nba").unwrap().name, "Los Angeles Lakers");
    }

    #[test]
    fn test_misses() {
        assert!(find_team("Lakers", "mlb").is_none());
        assert!(find_team("zzz", "nba").is_none());
        assert!(find_team("  ", "nba").is_none());
    }

    #[test]
    fn test_reference_table() {
        let table = reference_table("NHL");
        assert!(table.contains("NHL TEAMS"));
        assert!(table.contains("Winnipeg Jets"));
        let rows: Vec<&str> = table.lines().filter(|l| l.contains("Atlantic")).collect();
        assert_eq!(rows.len(), 8);
        assert!(rows[0].starts_with("Boston Bruins"));
    }

    #[test]
    fn test_reference_table_unknown() {
        assert_eq!(
            reference_table("xfl"),
            "Unknown league: xfl. Supported: nfl, nba, nhl"
        );
    }
}
