pub mod bookmakers;
pub mod dashboard;
pub mod espn;
pub mod keys;
pub mod odds_api;
pub mod request;
pub mod types;

pub use bookmakers::BookmakerFilter;
pub use dashboard::DashboardClient;
pub use espn::EspnClient;
pub use keys::KeyRing;
pub use odds_api::{OddsApiClient, OddsParams};
pub use types::{ApiResponse, ApiUsage};
