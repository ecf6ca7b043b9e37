//! Tip Rate Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Gratuity fraction, restricted to the six offered options
///
/// Serialized as the whole percentage (`20` for 20%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum TipRate {
    FivePercent,
    TenPercent,
    FifteenPercent,
    TwentyPercent,
    TwentyFivePercent,
    ThirtyPercent,
}

/// Rejected tip percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported tip percentage: {0}%")]
pub struct UnsupportedTipRate(pub u32);

impl TipRate {
    /// All options in the order they are offered (highest first)
    pub const ALL: [TipRate; 6] = [
        TipRate::ThirtyPercent,
        TipRate::TwentyFivePercent,
        TipRate::TwentyPercent,
        TipRate::FifteenPercent,
        TipRate::TenPercent,
        TipRate::FivePercent,
    ];

    /// Whole percentage (5, 10, ... 30)
    pub const fn percent(&self) -> u32 {
        match self {
            TipRate::FivePercent => 5,
            TipRate::TenPercent => 10,
            TipRate::FifteenPercent => 15,
            TipRate::TwentyPercent => 20,
            TipRate::TwentyFivePercent => 25,
            TipRate::ThirtyPercent => 30,
        }
    }

    /// Exact fraction (`0.20` for 20%)
    pub fn fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.percent()), 2)
    }

    pub fn from_percent(percent: u32) -> Result<Self, UnsupportedTipRate> {
        match percent {
            5 => Ok(TipRate::FivePercent),
            10 => Ok(TipRate::TenPercent),
            15 => Ok(TipRate::FifteenPercent),
            20 => Ok(TipRate::TwentyPercent),
            25 => Ok(TipRate::TwentyFivePercent),
            30 => Ok(TipRate::ThirtyPercent),
            other => Err(UnsupportedTipRate(other)),
        }
    }

    /// Match a fraction such as `0.15` against the offered options
    pub fn from_fraction(fraction: Decimal) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|rate| rate.fraction() == fraction)
    }
}

impl From<TipRate> for u32 {
    #[inline]
    fn from(rate: TipRate) -> Self {
        rate.percent()
    }
}

impl TryFrom<u32> for TipRate {
    type Error = UnsupportedTipRate;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_percent(value)
    }
}

impl fmt::Display for TipRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}
