//! Swiss-system core for the tournament manager
//!
//! Pure functions over plain records:
//! - pairing competitors for the next round, with colour allocation and byes
//! - Buchholz tiebreaks from completed games
//! - the standings order used by reports
//!
//! Nothing here performs I/O or keeps state between calls. The caller owns the
//! roster and the game log and applies the returned values itself.

pub mod pairing;
pub mod ranking;
pub mod types;

pub use pairing::*;
pub use ranking::*;
pub use types::*;
