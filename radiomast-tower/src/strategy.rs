//! Placement strategy selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Policy for assigning subscribers to channels.
///
/// `BestFit` is the default and the fallback for any unrecognized token, so
/// strategy selection itself can never fail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Rotating start cursor: consecutive subscribers begin their channel
    /// scan one slot apart, spreading load across the spectrum.
    RoundRobin,
    /// Forward-only fill: channels are packed strictly left to right and an
    /// earlier channel is never revisited once the cursor moves past it.
    #[default]
    BestFit,
}

impl PlacementStrategy {
    /// Token as it appears in plan files and on the command line.
    pub fn token(&self) -> &'static str {
        match self {
            PlacementStrategy::RoundRobin => "round_robin",
            PlacementStrategy::BestFit => "best_fit",
        }
    }

    /// Lenient parse: `round_robin` selects rotation, everything else falls
    /// back to best-fit.
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("round_robin") {
            PlacementStrategy::RoundRobin
        } else {
            PlacementStrategy::BestFit
        }
    }
}

impl fmt::Display for PlacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
