//! Market prices: daily drift and bounded history.
//!
//! Each tradeable good follows a multiplicative random walk. Ordinary
//! goods drift by a symmetric-ish factor and never fall below a fixed
//! floor. Feed is special: its drift carries an inflationary bias that
//! scales with the day count (capped), and its floor itself rises with
//! time, so feed only gets more expensive as the farm matures.
//!
//! Drift magnitudes are drawn as integer basis points and scaled into
//! [`Decimal`], keeping every price computation exact.

use std::collections::BTreeMap;

use rand::Rng;
use rust_decimal::Decimal;
use tracing::trace;

use farmstead_types::Resource;

use crate::config::MarketConfig;
use crate::error::SimError;

/// Basis-point scale: `Decimal::new(bp, BP_SCALE)` turns a draw of e.g.
/// `3500` into `0.3500`.
const BP_SCALE: u32 = 4;

/// Current prices plus a bounded FIFO history of past price vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    /// Current price per tradeable resource.
    prices: BTreeMap<Resource, Decimal>,
    /// Past price vectors, oldest first.
    history: Vec<BTreeMap<Resource, Decimal>>,
}

impl Market {
    /// Create a market with the given opening prices.
    ///
    /// The opening price vector is also the first history entry, so a
    /// fresh farm's chart starts at day zero rather than empty.
    pub fn new(opening_prices: BTreeMap<Resource, Decimal>) -> Self {
        let history = vec![opening_prices.clone()];
        Self {
            prices: opening_prices,
            history,
        }
    }

    /// The current price of a resource, if it trades on this market.
    pub fn price(&self, resource: Resource) -> Option<Decimal> {
        self.prices.get(&resource).copied()
    }

    /// The full current price vector.
    pub const fn prices(&self) -> &BTreeMap<Resource, Decimal> {
        &self.prices
    }

    /// The retained price history, oldest first.
    pub fn history(&self) -> &[BTreeMap<Resource, Decimal>] {
        &self.history
    }

    /// Apply one day of price drift and append the result to history.
    ///
    /// `day` is the current day count (after the daily increment); it
    /// drives feed's inflation factor and rising floor. The oldest
    /// history entry is evicted once the configured capacity is exceeded.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ArithmeticOverflow`] if a price computation
    /// leaves the [`Decimal`] domain.
    pub fn advance_day(
        &mut self,
        day: u64,
        config: &MarketConfig,
        rng: &mut impl Rng,
    ) -> Result<(), SimError> {
        let goods: Vec<Resource> = self.prices.keys().copied().collect();

        for good in goods {
            let Some(current) = self.prices.get(&good).copied() else {
                continue;
            };
            let updated = if good == Resource::Feed {
                drift_feed(current, day, config, rng)?
            } else {
                drift_ordinary(current, config, rng)?
            };
            trace!(%good, %current, %updated, "price drift");
            self.prices.insert(good, updated);
        }

        self.history.push(self.prices.clone());
        if self.history.len() > config.history_cap {
            drop(self.history.remove(0));
        }

        Ok(())
    }
}

/// Drift an ordinary good: `price * (1 + uniform(min, max))`, floored.
fn drift_ordinary(
    price: Decimal,
    config: &MarketConfig,
    rng: &mut impl Rng,
) -> Result<Decimal, SimError> {
    let change = Decimal::new(
        rng.random_range(config.drift_min_bp..=config.drift_max_bp),
        BP_SCALE,
    );
    let drifted = apply_change(price, change)?;
    Ok(drifted.max(config.price_floor))
}

/// Drift feed: the random change is scaled by a day-driven inflation
/// factor, and the floor rises with the day count.
fn drift_feed(
    price: Decimal,
    day: u64,
    config: &MarketConfig,
    rng: &mut impl Rng,
) -> Result<Decimal, SimError> {
    let time_factor = day_scaled_factor(day, config.feed_inflation_divisor)?
        .min(config.feed_time_factor_cap);

    let raw_change = Decimal::new(
        rng.random_range(config.feed_drift_min_bp..=config.feed_drift_max_bp),
        BP_SCALE,
    );
    let change = raw_change
        .checked_mul(time_factor)
        .ok_or_else(|| SimError::overflow("feed drift scaling"))?;

    let floor_factor = day_scaled_factor(day, config.feed_floor_divisor)?;
    let floor = config
        .feed_base_price
        .checked_mul(floor_factor)
        .ok_or_else(|| SimError::overflow("feed price floor"))?;

    let drifted = apply_change(price, change)?;
    Ok(drifted.max(floor))
}

/// Compute `1 + day / divisor` as a [`Decimal`].
fn day_scaled_factor(day: u64, divisor: u64) -> Result<Decimal, SimError> {
    let ratio = Decimal::from(day)
        .checked_div(Decimal::from(divisor))
        .ok_or_else(|| SimError::overflow("day scaling divisor"))?;
    Decimal::ONE
        .checked_add(ratio)
        .ok_or_else(|| SimError::overflow("day scaling factor"))
}

/// Compute `price * (1 + change)`.
fn apply_change(price: Decimal, change: Decimal) -> Result<Decimal, SimError> {
    let multiplier = Decimal::ONE
        .checked_add(change)
        .ok_or_else(|| SimError::overflow("price multiplier"))?;
    price
        .checked_mul(multiplier)
        .ok_or_else(|| SimError::overflow("price drift"))
}
