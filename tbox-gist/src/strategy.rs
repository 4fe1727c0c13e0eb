use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{GistError, GistResult};

/// Search operators understood by the consistency check.
///
/// The discriminants are the R-tree strategy numbers hosts pass in, so
/// `Strategy::Before as u16 == 29`. The set is closed: any other number is
/// rejected by [`Strategy::try_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum Strategy {
    Left = 1,
    OverLeft = 2,
    Overlaps = 3,
    OverRight = 4,
    Right = 5,
    Same = 6,
    Contains = 7,
    ContainedBy = 8,
    OverBefore = 28,
    Before = 29,
    After = 30,
    OverAfter = 31,
}

impl Strategy {
    /// Every strategy, in ordinal order.
    pub const ALL: [Strategy; 12] = [
        Strategy::Left,
        Strategy::OverLeft,
        Strategy::Overlaps,
        Strategy::OverRight,
        Strategy::Right,
        Strategy::Same,
        Strategy::Contains,
        Strategy::ContainedBy,
        Strategy::OverBefore,
        Strategy::Before,
        Strategy::After,
        Strategy::OverAfter,
    ];

    /// Strategy number as seen by the host.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Dense position in [`Strategy::ALL`], used to index dispatch tables.
    pub const fn ordinal(self) -> usize {
        match self {
            Strategy::Left => 0,
            Strategy::OverLeft => 1,
            Strategy::Overlaps => 2,
            Strategy::OverRight => 3,
            Strategy::Right => 4,
            Strategy::Same => 5,
            Strategy::Contains => 6,
            Strategy::ContainedBy => 7,
            Strategy::OverBefore => 8,
            Strategy::Before => 9,
            Strategy::After => 10,
            Strategy::OverAfter => 11,
        }
    }

    /// Operator spelling, as used in MobilityDB.
    pub fn operator(self) -> &'static str {
        match self {
            Strategy::Left => "<<",
            Strategy::OverLeft => "&<",
            Strategy::Overlaps => "&&",
            Strategy::OverRight => "&>",
            Strategy::Right => ">>",
            Strategy::Same => "~=",
            Strategy::Contains => "@>",
            Strategy::ContainedBy => "<@",
            Strategy::OverBefore => "&<#",
            Strategy::Before => "<<#",
            Strategy::After => "#>>",
            Strategy::OverAfter => "#&>",
        }
    }

    pub fn from_code(code: u16) -> GistResult<Strategy> {
        Strategy::try_from(code)
    }
}

impl TryFrom<u16> for Strategy {
    type Error = GistError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Strategy::Left),
            2 => Ok(Strategy::OverLeft),
            3 => Ok(Strategy::Overlaps),
            4 => Ok(Strategy::OverRight),
            5 => Ok(Strategy::Right),
            6 => Ok(Strategy::Same),
            7 => Ok(Strategy::Contains),
            8 => Ok(Strategy::ContainedBy),
            28 => Ok(Strategy::OverBefore),
            29 => Ok(Strategy::Before),
            30 => Ok(Strategy::After),
            31 => Ok(Strategy::OverAfter),
            _ => {
                log::error!("unrecognized strategy number: {}", code);
                Err(GistError::UnrecognizedStrategy(code))
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.operator())
    }
}
