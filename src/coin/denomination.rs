use core::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Face-value tier of a coin.
///
/// Each tier carries a stable numeric code used on the wire. [`Denomination::DenomError`]
/// is the sentinel for "no denomination assigned yet".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Denomination {
    /// No denomination assigned.
    #[default]
    DenomError,
    /// Face value 1.
    One,
    /// Face value 5.
    Five,
    /// Face value 10.
    Ten,
    /// Face value 50.
    Fifty,
    /// Face value 100.
    OneHundred,
    /// Face value 500.
    FiveHundred,
    /// Face value 1000.
    OneThousand,
    /// Face value 5000.
    FiveThousand,
}

impl Denomination {
    /// All assigned tiers, smallest first.
    pub const ALL: [Denomination; 8] = [
        Denomination::One,
        Denomination::Five,
        Denomination::Ten,
        Denomination::Fifty,
        Denomination::OneHundred,
        Denomination::FiveHundred,
        Denomination::OneThousand,
        Denomination::FiveThousand,
    ];

    /// Returns the numeric code of this tier.
    pub fn code(self) -> u32 {
        match self {
            Denomination::DenomError => 0,
            Denomination::One => 1,
            Denomination::Five => 5,
            Denomination::Ten => 10,
            Denomination::Fifty => 50,
            Denomination::OneHundred => 100,
            Denomination::FiveHundred => 500,
            Denomination::OneThousand => 1000,
            Denomination::FiveThousand => 5000,
        }
    }

    /// Whether a real tier has been assigned.
    pub fn is_assigned(self) -> bool {
        self != Denomination::DenomError
    }
}

impl TryFrom<u32> for Denomination {
    type Error = Error;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Denomination::DenomError),
            1 => Ok(Denomination::One),
            5 => Ok(Denomination::Five),
            10 => Ok(Denomination::Ten),
            50 => Ok(Denomination::Fifty),
            100 => Ok(Denomination::OneHundred),
            500 => Ok(Denomination::FiveHundred),
            1000 => Ok(Denomination::OneThousand),
            5000 => Ok(Denomination::FiveThousand),
            other => Err(Error::InvalidDenomination(format!(
                "Unknown denomination code: {other}"
            ))),
        }
    }
}

impl From<Denomination> for u32 {
    fn from(denomination: Denomination) -> Self {
        denomination.code()
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denomination::DenomError => f.write_str("unassigned"),
            other => write!(f, "{}", other.code()),
        }
    }
}
