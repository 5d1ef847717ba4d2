// Victory points scoring and ranking engine.
//
// Pure, synchronous computation: callers hand in normalized week records and
// get back week results and season standings. No I/O happens here.

pub mod combine;
pub mod compliance;
pub mod error;
pub mod head_to_head;
pub mod model;
pub mod performance;
pub mod rules;
pub mod season;
pub mod standings;
pub mod validate;

pub use combine::calculate_week_results;
pub use error::ScoringError;
pub use rules::LeagueRules;
pub use season::aggregate_season;
pub use standings::calculate_season_standings;
