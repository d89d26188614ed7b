//! The canonical farm state and its resource ledger.
//!
//! [`FarmWorld`] bundles everything the simulation owns: the ledger, the
//! roster, weather, market, diseases, achievements, breeding cooldowns,
//! and the day counter. It is held behind one exclusive lock by the
//! process; the tick pipeline and the action processor are the only
//! mutators.
//!
//! The [`Ledger`] enforces the resource invariants: balances never go
//! negative (a short debit is rejected, not clamped) and every balance
//! change uses checked [`Decimal`] arithmetic.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use farmstead_sim::Market;
use farmstead_types::{Achievement, Animal, DiseaseRecord, Resource, Weather, WorldSnapshot};

/// Errors that can occur while mutating the ledger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Attempted to debit more of a resource than is held.
    #[error("insufficient {resource}: wanted {requested} but only have {available}")]
    Insufficient {
        /// The resource being debited.
        resource: Resource,
        /// The quantity the caller attempted to remove.
        requested: Decimal,
        /// The quantity actually held.
        available: Decimal,
    },

    /// A balance computation overflowed the [`Decimal`] domain.
    #[error("ledger arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}

/// Non-negative balances per resource.
///
/// Missing entries read as zero. Credits and debits use checked
/// arithmetic; a debit exceeding the balance fails without mutating
/// anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    /// Balance per resource.
    balances: BTreeMap<Resource, Decimal>,
}

impl Ledger {
    /// Create a ledger with the given opening balances.
    pub const fn new(opening: BTreeMap<Resource, Decimal>) -> Self {
        Self { balances: opening }
    }

    /// The current balance of a resource (zero if never touched).
    pub fn amount(&self, resource: Resource) -> Decimal {
        self.balances.get(&resource).copied().unwrap_or(Decimal::ZERO)
    }

    /// All balances, keyed by resource.
    pub const fn balances(&self) -> &BTreeMap<Resource, Decimal> {
        &self.balances
    }

    /// Add to a resource balance.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ArithmeticOverflow`] if the new balance
    /// leaves the [`Decimal`] domain.
    pub fn credit(&mut self, resource: Resource, quantity: Decimal) -> Result<(), LedgerError> {
        let updated = self.amount(resource).checked_add(quantity).ok_or_else(|| {
            LedgerError::ArithmeticOverflow {
                context: format!("credit {quantity} {resource}"),
            }
        })?;
        self.balances.insert(resource, updated);
        Ok(())
    }

    /// Remove from a resource balance.
    ///
    /// The debit is rejected -- not clamped -- when the balance is short,
    /// leaving the ledger untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Insufficient`] if the balance is below
    /// `quantity`, or [`LedgerError::ArithmeticOverflow`] on a domain
    /// overflow.
    pub fn debit(&mut self, resource: Resource, quantity: Decimal) -> Result<(), LedgerError> {
        let available = self.amount(resource);
        if available < quantity {
            return Err(LedgerError::Insufficient {
                resource,
                requested: quantity,
                available,
            });
        }
        let updated = available.checked_sub(quantity).ok_or_else(|| {
            LedgerError::ArithmeticOverflow {
                context: format!("debit {quantity} {resource}"),
            }
        })?;
        self.balances.insert(resource, updated);
        Ok(())
    }
}

/// The canonical, single-instance farm state.
///
/// All fields are owned here and mutated only through the tick pipeline
/// and the action processor, both of which receive the world by mutable
/// reference under the process-wide exclusive lock.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmWorld {
    /// Resource balances, including money.
    pub ledger: Ledger,
    /// The animal roster. Names are unique.
    pub animals: Vec<Animal>,
    /// Today's weather.
    pub weather: Weather,
    /// Market prices and bounded history.
    pub market: Market,
    /// Active disease records.
    pub diseases: Vec<DiseaseRecord>,
    /// Achievements unlocked so far (monotonic).
    pub achievements: BTreeSet<Achievement>,
    /// Remaining breeding cooldown days per animal name.
    pub breeding_cooldowns: BTreeMap<String, u32>,
    /// Days elapsed since founding.
    pub total_days: u64,
}

impl FarmWorld {
    /// Look up an animal by name.
    pub fn animal(&self, name: &str) -> Option<&Animal> {
        self.animals.iter().find(|animal| animal.name == name)
    }

    /// Look up an animal by name, mutably.
    pub fn animal_mut(&mut self, name: &str) -> Option<&mut Animal> {
        self.animals.iter_mut().find(|animal| animal.name == name)
    }

    /// Whether an animal with this name is on the roster.
    pub fn has_animal(&self, name: &str) -> bool {
        self.animal(name).is_some()
    }

    /// Produce the immutable point-in-time projection for transport.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            resources: self.ledger.balances().clone(),
            animals: self.animals.clone(),
            weather: self.weather,
            market_prices: self.market.prices().clone(),
            achievements: self.achievements.clone(),
            diseases: self.diseases.clone(),
            market_history: self.market.history().to_vec(),
            total_days: self.total_days,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn ledger() -> Ledger {
        Ledger::new(BTreeMap::from([
            (Resource::Money, dec!(200)),
            (Resource::Feed, dec!(100)),
        ]))
    }

    #[test]
    fn untouched_balances_read_zero() {
        let subject = ledger();
        assert_eq!(subject.amount(Resource::Eggs), Decimal::ZERO);
    }

    #[test]
    fn credit_and_debit_round_trip() {
        let mut subject = ledger();
        subject.credit(Resource::Eggs, dec!(5.5)).unwrap();
        subject.debit(Resource::Eggs, dec!(2)).unwrap();
        assert_eq!(subject.amount(Resource::Eggs), dec!(3.5));
    }

    #[test]
    fn short_debit_is_rejected_without_mutation() {
        let mut subject = ledger();
        let result = subject.debit(Resource::Money, dec!(200.01));

        assert!(matches!(
            result,
            Err(LedgerError::Insufficient {
                resource: Resource::Money,
                ..
            })
        ));
        assert_eq!(subject.amount(Resource::Money), dec!(200), "balance untouched");
    }

    #[test]
    fn exact_debit_empties_the_balance() {
        let mut subject = ledger();
        subject.debit(Resource::Feed, dec!(100)).unwrap();
        assert_eq!(subject.amount(Resource::Feed), Decimal::ZERO);
    }
}
