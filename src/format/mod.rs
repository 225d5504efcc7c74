//! Fixed-width text renderings of vendor payloads for chat display.
//!
//! Every formatter takes borrowed JSON and returns a `String`; missing
//! fields render as placeholders.

pub mod layout;
mod matchup;
mod odds;
mod scoreboard;
mod standings;
mod summary;

pub use matchup::format_matchup_card;
pub use odds::format_odds_comparison;
pub use scoreboard::{
    espn_event_row, format_detailed_scoreboard, format_scoreboard_table, split_competitors,
};
pub use standings::{collect_standings_entries, format_standings_table};
pub use summary::format_game_summary;
