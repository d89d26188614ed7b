//! The starting farm.
//!
//! Every run begins from the same modest homestead: a little produce in
//! the barn, a hundred units of feed, two hundred in cash, and the two
//! founding animals. Opening market prices seed both the price board and
//! the first history entry.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use farmstead_sim::Market;
use farmstead_types::{Animal, Resource, Species, Weather};

use crate::world::{FarmWorld, Ledger};

/// Build the starting world: day 0, sunny, two animals, starter stock.
pub fn starting_farm() -> FarmWorld {
    let opening_resources = BTreeMap::from([
        (Resource::Eggs, Decimal::from(5)),
        (Resource::Milk, Decimal::from(2)),
        (Resource::Feed, Decimal::from(100)),
        (Resource::Money, Decimal::from(200)),
    ]);

    let opening_prices = BTreeMap::from([
        (Resource::Eggs, Decimal::new(15, 1)),
        (Resource::Milk, Decimal::from(3)),
        (Resource::Feed, Decimal::new(75, 2)),
    ]);

    FarmWorld {
        ledger: Ledger::new(opening_resources),
        animals: vec![
            Animal::fresh(Species::Chicken, String::from("Clucky")),
            Animal::fresh(Species::Cow, String::from("Bessie")),
        ],
        weather: Weather::Sunny,
        market: Market::new(opening_prices),
        diseases: Vec::new(),
        achievements: BTreeSet::new(),
        breeding_cooldowns: BTreeMap::new(),
        total_days: 0,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn starting_farm_matches_the_founding_stock() {
        let world = starting_farm();

        assert_eq!(world.ledger.amount(Resource::Eggs), dec!(5));
        assert_eq!(world.ledger.amount(Resource::Milk), dec!(2));
        assert_eq!(world.ledger.amount(Resource::Feed), dec!(100));
        assert_eq!(world.ledger.amount(Resource::Money), dec!(200));
        assert_eq!(world.animals.len(), 2);
        assert!(world.has_animal("Clucky"));
        assert!(world.has_animal("Bessie"));
        assert_eq!(world.weather, Weather::Sunny);
        assert_eq!(world.total_days, 0);
    }

    #[test]
    fn opening_prices_are_on_the_board_and_in_history() {
        let world = starting_farm();

        assert_eq!(world.market.price(Resource::Eggs), Some(dec!(1.5)));
        assert_eq!(world.market.price(Resource::Milk), Some(dec!(3)));
        assert_eq!(world.market.price(Resource::Feed), Some(dec!(0.75)));
        assert_eq!(world.market.history().len(), 1);
    }
}
