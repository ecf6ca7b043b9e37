//! Tip Calculator
//!
//! Converts a cost of service, a tip rate and a round-up flag into a
//! [`PaymentResult`]. All arithmetic runs on `rust_decimal`, so
//! `tip == cost * rate` holds exactly; only the total is ever rounded,
//! and only upwards to the next whole unit.

pub mod dice;


use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use shared::util::format_timestamp;
use shared::{ErrorCode, PaymentResult, TipRate};
use thiserror::Error;

pub use dice::{Die, DieRoll};

/// Rejected calculator input
///
/// Recovered by the caller re-prompting; never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("invalid cost of service: {0:?}")]
    Cost(String),

    #[error("no tip option selected")]
    NoTipRate,

    #[error("amount out of range")]
    Overflow,

    #[error("amount has more digits than a payment record keeps")]
    Precision,
}

impl InvalidInput {
    pub fn code(&self) -> ErrorCode {
        match self {
            InvalidInput::Cost(_) | InvalidInput::Overflow | InvalidInput::Precision => {
                ErrorCode::InvalidCost
            }
            InvalidInput::NoTipRate => ErrorCode::TipRateNotSelected,
        }
    }
}

/// Source of the calculation timestamp
pub trait Clock: Send + Sync {
    /// Local wall-clock time
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        shared::util::now_local()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Largest cost scale whose product with a two-place rate is still exact
pub const MAX_COST_SCALE: u32 = 26;

/// Parse user-typed cost of service
///
/// Accepts plain decimals (`"33.33"`) and scientific notation (`"1e2"`);
/// rejects blanks, non-numbers, digit separators, negative values and
/// anything that would need rounding to fit.
pub fn parse_cost(input: &str) -> Result<Decimal, InvalidInput> {
    let trimmed = input.trim();
    let invalid = || InvalidInput::Cost(input.to_string());
    if trimmed.is_empty() || trimmed.contains('_') {
        return Err(invalid());
    }

    let cost = Decimal::from_str_exact(trimmed)
        .ok()
        .or_else(|| parse_scientific_exact(trimmed))
        .ok_or_else(invalid)?;

    require_valid_cost(cost)?;
    Ok(cost)
}

/// `from_scientific` rounds an over-long mantissa, so check it exactly first
fn parse_scientific_exact(input: &str) -> Option<Decimal> {
    let (mantissa, _) = input.split_once(['e', 'E'])?;
    Decimal::from_str_exact(mantissa).ok()?;
    Decimal::from_scientific(input).ok()
}

fn require_valid_cost(cost: Decimal) -> Result<(), InvalidInput> {
    if cost < Decimal::ZERO || cost.normalize().scale() > MAX_COST_SCALE {
        return Err(InvalidInput::Cost(cost.to_string()));
    }
    Ok(())
}

/// `cost * rate`, unrounded
pub fn tip_amount(cost: Decimal, rate: TipRate) -> Result<Decimal, InvalidInput> {
    cost.checked_mul(rate.fraction()).ok_or(InvalidInput::Overflow)
}

/// `cost + tip`, ceiling-rounded to a whole unit when `round_up`
pub fn total_amount(cost: Decimal, tip: Decimal, round_up: bool) -> Result<Decimal, InvalidInput> {
    let total = cost.checked_add(tip).ok_or(InvalidInput::Overflow)?;
    Ok(if round_up { total.ceil() } else { total })
}

/// Tip calculator with an injected clock
#[derive(Clone)]
pub struct TipCalculator {
    clock: Arc<dyn Clock>,
}

impl Default for TipCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl TipCalculator {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Compute tip and total for an already-parsed cost
    pub fn compute(
        &self,
        cost: Decimal,
        rate: TipRate,
        round_up: bool,
    ) -> Result<PaymentResult, InvalidInput> {
        require_valid_cost(cost)?;

        let tip = tip_amount(cost, rate)?;
        let total = total_amount(cost, tip, round_up)?;

        let result = PaymentResult {
            cost,
            tip_rate: rate,
            tip,
            total,
            rounded_up: round_up,
            timestamp: format_timestamp(self.clock.now()),
        };

        // Stored amounts are JSON numbers; refuse what would come back altered
        if !result.to_record().survives_document() {
            return Err(InvalidInput::Precision);
        }
        Ok(result)
    }

    /// Compute from raw form input: typed cost and optional tip selection
    pub fn compute_input(
        &self,
        cost: &str,
        rate: Option<TipRate>,
        round_up: bool,
    ) -> Result<PaymentResult, InvalidInput> {
        let cost = parse_cost(cost)?;
        let rate = rate.ok_or(InvalidInput::NoTipRate)?;
        self.compute(cost, rate, round_up)
    }
}
