//! The action processor: player commands against the farm.
//!
//! Every action follows the same discipline: validate completely against
//! current state, then mutate, then report. A failed validation returns a
//! typed [`ActionError`] with the world untouched -- no action ever
//! partially applies.
//!
//! Dispatch is the explicit match in [`apply`]; there is no reflective
//! lookup, and the transport rejects unrecognized action names before
//! they reach this module.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use farmstead_sim::{SimError, SimTuning, vitals};
use farmstead_types::{Achievement, Action, Animal, FarmEvent, Resource, Species};

use crate::achievements::{self, AchievementTrigger};
use crate::events::{self, EventSink};
use crate::world::{FarmWorld, LedgerError};

/// Errors an action can fail with. State is unchanged in every case.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// The purchase costs more money than the farm holds.
    #[error("not enough money: need ${needed} but have ${available}")]
    InsufficientFunds {
        /// The money the action would cost.
        needed: Decimal,
        /// The money actually held.
        available: Decimal,
    },

    /// There is no whole unit of feed in stock.
    #[error("no feed available")]
    NoFeedAvailable,

    /// Every animal is already fed.
    #[error("no hungry animals to feed")]
    NothingToFeed,

    /// The named item does not trade on the market.
    #[error("invalid item: {item}")]
    InvalidItem {
        /// The wire name the client sent.
        item: String,
    },

    /// The farm holds less of the item than the sale requires.
    #[error("not enough {item}: wanted {requested} but have {available}")]
    InsufficientStock {
        /// The item being sold.
        item: Resource,
        /// The quantity requested.
        requested: u32,
        /// The quantity held.
        available: Decimal,
    },

    /// No animal with this name is on the roster.
    #[error("no animal named {name}")]
    AnimalNotFound {
        /// The name the client sent.
        name: String,
    },

    /// The two animals are different species.
    #[error("different species can't breed ({first} and {second})")]
    SpeciesMismatch {
        /// The first parent's species.
        first: Species,
        /// The second parent's species.
        second: Species,
    },

    /// A parent is too hungry to breed.
    #[error("{name} is too hungry to breed")]
    TooHungry {
        /// The hungry parent's name.
        name: String,
    },

    /// A parent is still on its breeding cooldown.
    #[error("{name} needs rest")]
    OnRestCooldown {
        /// The resting parent's name.
        name: String,
    },

    /// The named species is not kept on this farm.
    #[error("invalid animal type: {species}")]
    UnknownSpecies {
        /// The wire name the client sent.
        species: String,
    },

    /// An animal with this name already exists.
    #[error("an animal named {name} already exists")]
    NameTaken {
        /// The requested name.
        name: String,
    },

    /// A market price that should always exist was missing.
    #[error("no market price for {item}")]
    PriceUnavailable {
        /// The item with no price.
        item: Resource,
    },

    /// A ledger mutation failed after validation passed.
    #[error("ledger fault: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },

    /// A rules-engine computation failed.
    #[error("simulation fault: {source}")]
    Sim {
        /// The underlying simulation error.
        #[from]
        source: SimError,
    },
}

/// The successful outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReceipt {
    /// Human-readable summary for the client.
    pub message: String,
}

impl ActionReceipt {
    fn new(message: String) -> Self {
        Self { message }
    }
}

/// Validate and apply one player action against the world.
///
/// # Errors
///
/// Returns [`ActionError`] describing the first validation failure; the
/// world is left untouched on any error.
pub fn apply(
    world: &mut FarmWorld,
    tuning: &SimTuning,
    action: &Action,
    sink: &dyn EventSink,
) -> Result<ActionReceipt, ActionError> {
    debug!(action = action.name(), "applying action");
    match action {
        Action::BuyFeed { amount } => buy_feed(world, *amount, sink),
        Action::FeedAnimals => feed_animals(world, tuning, sink),
        Action::Sell { item, quantity } => sell(world, item, *quantity, sink),
        Action::Breed { animal1, animal2 } => breed(world, tuning, animal1, animal2, sink),
        Action::BuyAnimal { species, name } => buy_animal(world, species, name, sink),
    }
}

/// Buy `amount` units of feed at the current feed price.
fn buy_feed(
    world: &mut FarmWorld,
    amount: u32,
    sink: &dyn EventSink,
) -> Result<ActionReceipt, ActionError> {
    let price = world
        .market
        .price(Resource::Feed)
        .ok_or(ActionError::PriceUnavailable {
            item: Resource::Feed,
        })?;
    let cost = price
        .checked_mul(Decimal::from(amount))
        .ok_or_else(|| SimError::overflow("feed purchase cost"))?;

    let available = world.ledger.amount(Resource::Money);
    if available < cost {
        return Err(ActionError::InsufficientFunds {
            needed: cost,
            available,
        });
    }

    world.ledger.debit(Resource::Money, cost)?;
    world.ledger.credit(Resource::Feed, Decimal::from(amount))?;

    events::emit(
        sink,
        world.total_days,
        FarmEvent::FeedPurchased { amount, cost },
    );
    drop(achievements::check_unlocks(world, AchievementTrigger::Farmer, sink));

    Ok(ActionReceipt::new(format!(
        "Bought {amount} feed for ${cost:.2}"
    )))
}

/// Distribute stocked feed to every hungry animal, in roster order.
fn feed_animals(
    world: &mut FarmWorld,
    tuning: &SimTuning,
    sink: &dyn EventSink,
) -> Result<ActionReceipt, ActionError> {
    // Feed is handed out in whole units; anything less than one unit in
    // stock cannot feed anyone.
    let stock_units = world
        .ledger
        .amount(Resource::Feed)
        .trunc()
        .to_u64()
        .unwrap_or(0);
    if stock_units == 0 {
        return Err(ActionError::NoFeedAvailable);
    }

    if !world.animals.iter().any(|animal| animal.hunger > 0) {
        return Err(ActionError::NothingToFeed);
    }

    let mut remaining = stock_units;
    let mut fed = Vec::new();
    for animal in &mut world.animals {
        if animal.hunger == 0 || remaining == 0 {
            continue;
        }
        let portion = u64::from(animal.hunger).min(remaining);
        let portion_u32 = u32::try_from(portion).unwrap_or(u32::MAX);
        vitals::apply_feeding(animal, portion_u32, &tuning.herd)?;
        remaining = remaining.saturating_sub(portion);
        fed.push(animal.name.clone());
    }

    let consumed = stock_units.saturating_sub(remaining);
    world.ledger.debit(Resource::Feed, Decimal::from(consumed))?;

    events::emit(
        sink,
        world.total_days,
        FarmEvent::AnimalsFed {
            animals: fed.clone(),
        },
    );

    Ok(ActionReceipt::new(format!(
        "Fed animals: {}",
        fed.join(", ")
    )))
}

/// Sell `quantity` of a tradeable item at the current price.
fn sell(
    world: &mut FarmWorld,
    item: &str,
    quantity: u32,
    sink: &dyn EventSink,
) -> Result<ActionReceipt, ActionError> {
    let resource = Resource::from_wire(item)
        .filter(|resource| resource.is_tradeable())
        .ok_or_else(|| ActionError::InvalidItem {
            item: item.to_owned(),
        })?;
    let price = world
        .market
        .price(resource)
        .ok_or(ActionError::PriceUnavailable { item: resource })?;

    let quantity_dec = Decimal::from(quantity);
    let available = world.ledger.amount(resource);
    if available < quantity_dec {
        return Err(ActionError::InsufficientStock {
            item: resource,
            requested: quantity,
            available,
        });
    }

    let earnings = price
        .checked_mul(quantity_dec)
        .ok_or_else(|| SimError::overflow("sale earnings"))?;

    world.ledger.debit(resource, quantity_dec)?;
    world.ledger.credit(Resource::Money, earnings)?;

    events::emit(
        sink,
        world.total_days,
        FarmEvent::ItemSold {
            item: resource,
            quantity,
            earnings,
        },
    );
    drop(achievements::check_unlocks(world, AchievementTrigger::Farmer, sink));

    Ok(ActionReceipt::new(format!(
        "Sold {quantity} {resource} for ${earnings:.2}"
    )))
}

/// Breed two same-species animals into a newborn.
fn breed(
    world: &mut FarmWorld,
    tuning: &SimTuning,
    first_name: &str,
    second_name: &str,
    sink: &dyn EventSink,
) -> Result<ActionReceipt, ActionError> {
    // --- Validation (immutable reads only) ---
    let first = world
        .animal(first_name)
        .ok_or_else(|| ActionError::AnimalNotFound {
            name: first_name.to_owned(),
        })?;
    let second = world
        .animal(second_name)
        .ok_or_else(|| ActionError::AnimalNotFound {
            name: second_name.to_owned(),
        })?;

    if first.species != second.species {
        return Err(ActionError::SpeciesMismatch {
            first: first.species,
            second: second.species,
        });
    }

    let max_hunger = tuning.breeding.max_parent_hunger;
    for parent in [first, second] {
        if parent.hunger > max_hunger {
            return Err(ActionError::TooHungry {
                name: parent.name.clone(),
            });
        }
    }

    for name in [first_name, second_name] {
        if world.breeding_cooldowns.get(name).copied().unwrap_or(0) > 0 {
            return Err(ActionError::OnRestCooldown {
                name: name.to_owned(),
            });
        }
    }

    let species = first.species;

    // --- Mutation ---
    let baby_name = next_baby_name(world, species);
    world
        .animals
        .push(Animal::fresh(species, baby_name.clone()));

    let today = world.total_days;
    let cooldown = tuning.breeding.cooldown_days;
    for name in [first_name, second_name] {
        world.breeding_cooldowns.insert(name.to_owned(), cooldown);
        if let Some(parent) = world.animal_mut(name) {
            parent.last_breeding_day = Some(today);
        }
    }

    events::emit(
        sink,
        today,
        FarmEvent::AnimalBred {
            parent1: first_name.to_owned(),
            parent2: second_name.to_owned(),
            baby: baby_name.clone(),
        },
    );
    drop(achievements::check_unlocks(world, AchievementTrigger::Breeder, sink));

    Ok(ActionReceipt::new(format!(
        "New {species} born: {baby_name}"
    )))
}

/// Buy a new animal of the given species.
fn buy_animal(
    world: &mut FarmWorld,
    species: &str,
    name: &str,
    sink: &dyn EventSink,
) -> Result<ActionReceipt, ActionError> {
    let species = Species::from_wire(species).ok_or_else(|| ActionError::UnknownSpecies {
        species: species.to_owned(),
    })?;

    let cost = Decimal::from(species.price_units());
    let available = world.ledger.amount(Resource::Money);
    if available < cost {
        return Err(ActionError::InsufficientFunds {
            needed: cost,
            available,
        });
    }

    if world.has_animal(name) {
        return Err(ActionError::NameTaken {
            name: name.to_owned(),
        });
    }

    world.ledger.debit(Resource::Money, cost)?;
    world.animals.push(Animal::fresh(species, name.to_owned()));

    events::emit(
        sink,
        world.total_days,
        FarmEvent::AnimalPurchased {
            species,
            name: name.to_owned(),
            cost,
        },
    );

    Ok(ActionReceipt::new(format!(
        "Bought {species} named {name} for ${cost}"
    )))
}

/// Generate a unique newborn name: `Baby_<species>_<n>`, bumping `n`
/// past any name already on the roster.
fn next_baby_name(world: &FarmWorld, species: Species) -> String {
    let mut ordinal = world.animals.len().saturating_add(1);
    loop {
        let candidate = format!("Baby_{species}_{ordinal}");
        if !world.has_animal(&candidate) {
            return candidate;
        }
        ordinal = ordinal.saturating_add(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use farmstead_types::Weather;

    use crate::events::NoOpSink;
    use crate::seed::starting_farm;

    use super::*;

    fn act(world: &mut FarmWorld, action: &Action) -> Result<ActionReceipt, ActionError> {
        apply(world, &SimTuning::default(), action, &NoOpSink)
    }

    #[test]
    fn buying_feed_moves_exact_amounts() {
        // Start state: 100 feed, 200 money, feed priced at 0.75.
        let mut world = starting_farm();

        let receipt = act(&mut world, &Action::BuyFeed { amount: 50 }).unwrap();

        assert_eq!(world.ledger.amount(Resource::Money), dec!(162.50));
        assert_eq!(world.ledger.amount(Resource::Feed), dec!(150));
        assert_eq!(receipt.message, "Bought 50 feed for $37.50");
    }

    #[test]
    fn feed_purchase_without_funds_changes_nothing() {
        let mut world = starting_farm();

        let result = act(&mut world, &Action::BuyFeed { amount: 1_000 });

        assert!(matches!(result, Err(ActionError::InsufficientFunds { .. })));
        assert_eq!(world.ledger.amount(Resource::Money), dec!(200));
        assert_eq!(world.ledger.amount(Resource::Feed), dec!(100));
    }

    #[test]
    fn selling_more_than_held_is_rejected_untouched() {
        // Start state holds 5 eggs.
        let mut world = starting_farm();

        let result = act(
            &mut world,
            &Action::Sell {
                item: String::from("eggs"),
                quantity: 10,
            },
        );

        assert!(matches!(
            result,
            Err(ActionError::InsufficientStock {
                item: Resource::Eggs,
                requested: 10,
                ..
            })
        ));
        assert_eq!(world.ledger.amount(Resource::Eggs), dec!(5));
        assert_eq!(world.ledger.amount(Resource::Money), dec!(200));
    }

    #[test]
    fn selling_credits_money_at_the_market_price() {
        let mut world = starting_farm();

        let receipt = act(
            &mut world,
            &Action::Sell {
                item: String::from("eggs"),
                quantity: 4,
            },
        )
        .unwrap();

        assert_eq!(world.ledger.amount(Resource::Eggs), dec!(1));
        assert_eq!(world.ledger.amount(Resource::Money), dec!(206.0));
        assert_eq!(receipt.message, "Sold 4 eggs for $6.00");
    }

    #[test]
    fn money_is_not_a_sellable_item() {
        let mut world = starting_farm();

        let result = act(
            &mut world,
            &Action::Sell {
                item: String::from("money"),
                quantity: 1,
            },
        );

        assert!(matches!(result, Err(ActionError::InvalidItem { .. })));
    }

    #[test]
    fn feeding_with_empty_stock_fails() {
        let mut world = starting_farm();
        world.ledger.debit(Resource::Feed, dec!(100)).unwrap();

        let result = act(&mut world, &Action::FeedAnimals);

        assert!(matches!(result, Err(ActionError::NoFeedAvailable)));
    }

    #[test]
    fn feeding_a_full_herd_fails() {
        let mut world = starting_farm();

        let result = act(&mut world, &Action::FeedAnimals);

        assert!(matches!(result, Err(ActionError::NothingToFeed)));
    }

    #[test]
    fn feeding_reduces_hunger_and_stock_together() {
        let mut world = starting_farm();
        world.animal_mut("Clucky").unwrap().hunger = 6;
        world.animal_mut("Clucky").unwrap().health = 50;
        world.animal_mut("Bessie").unwrap().hunger = 3;

        let receipt = act(&mut world, &Action::FeedAnimals).unwrap();

        assert_eq!(world.animal("Clucky").unwrap().hunger, 0);
        assert_eq!(world.animal("Clucky").unwrap().health, 62);
        assert_eq!(world.animal("Bessie").unwrap().hunger, 0);
        assert_eq!(world.ledger.amount(Resource::Feed), dec!(91));
        assert_eq!(receipt.message, "Fed animals: Clucky, Bessie");
    }

    #[test]
    fn feeding_stops_when_the_stock_runs_out() {
        let mut world = starting_farm();
        world.ledger.debit(Resource::Feed, dec!(96)).unwrap();
        world.animal_mut("Clucky").unwrap().hunger = 10;
        world.animal_mut("Bessie").unwrap().hunger = 10;

        act(&mut world, &Action::FeedAnimals).unwrap();

        // 4 units all went to the first hungry animal.
        assert_eq!(world.animal("Clucky").unwrap().hunger, 6);
        assert_eq!(world.animal("Bessie").unwrap().hunger, 10);
        assert_eq!(world.ledger.amount(Resource::Feed), dec!(0));
    }

    #[test]
    fn breeding_different_species_fails_and_creates_nothing() {
        let mut world = starting_farm();

        let result = act(
            &mut world,
            &Action::Breed {
                animal1: String::from("Clucky"),
                animal2: String::from("Bessie"),
            },
        );

        assert!(matches!(result, Err(ActionError::SpeciesMismatch { .. })));
        assert_eq!(world.animals.len(), 2);
    }

    #[test]
    fn breeding_creates_a_named_baby_and_sets_cooldowns() {
        let mut world = starting_farm();
        let hen = Animal::fresh(Species::Chicken, String::from("Henrietta"));
        world.animals.push(hen);

        let receipt = act(
            &mut world,
            &Action::Breed {
                animal1: String::from("Clucky"),
                animal2: String::from("Henrietta"),
            },
        )
        .unwrap();

        assert_eq!(world.animals.len(), 4);
        assert!(world.has_animal("Baby_chicken_4"));
        assert_eq!(receipt.message, "New chicken born: Baby_chicken_4");
        assert_eq!(world.breeding_cooldowns.get("Clucky"), Some(&5));
        assert_eq!(world.breeding_cooldowns.get("Henrietta"), Some(&5));
        assert_eq!(world.animal("Clucky").unwrap().last_breeding_day, Some(0));
    }

    #[test]
    fn parents_on_cooldown_cannot_breed_again() {
        let mut world = starting_farm();
        world
            .animals
            .push(Animal::fresh(Species::Chicken, String::from("Henrietta")));
        let breed_action = Action::Breed {
            animal1: String::from("Clucky"),
            animal2: String::from("Henrietta"),
        };
        act(&mut world, &breed_action).unwrap();

        let result = act(&mut world, &breed_action);

        assert!(matches!(
            result,
            Err(ActionError::OnRestCooldown { ref name }) if name == "Clucky"
        ));
        assert_eq!(world.animals.len(), 3, "no second baby");
    }

    #[test]
    fn hungry_parents_cannot_breed() {
        let mut world = starting_farm();
        world
            .animals
            .push(Animal::fresh(Species::Chicken, String::from("Henrietta")));
        world.animal_mut("Henrietta").unwrap().hunger = 4;

        let result = act(
            &mut world,
            &Action::Breed {
                animal1: String::from("Clucky"),
                animal2: String::from("Henrietta"),
            },
        );

        assert!(matches!(
            result,
            Err(ActionError::TooHungry { ref name }) if name == "Henrietta"
        ));
    }

    #[test]
    fn breeding_an_unknown_animal_fails() {
        let mut world = starting_farm();

        let result = act(
            &mut world,
            &Action::Breed {
                animal1: String::from("Clucky"),
                animal2: String::from("Nobody"),
            },
        );

        assert!(matches!(
            result,
            Err(ActionError::AnimalNotFound { ref name }) if name == "Nobody"
        ));
    }

    #[test]
    fn buying_an_animal_deducts_its_price() {
        let mut world = starting_farm();

        let receipt = act(
            &mut world,
            &Action::BuyAnimal {
                species: String::from("chicken"),
                name: String::from("Pecky"),
            },
        )
        .unwrap();

        assert_eq!(world.ledger.amount(Resource::Money), dec!(150));
        assert!(world.has_animal("Pecky"));
        let pecky = world.animal("Pecky").unwrap();
        assert_eq!(pecky.health, 100);
        assert_eq!(pecky.hunger, 0);
        assert_eq!(pecky.age, 0);
        assert_eq!(receipt.message, "Bought chicken named Pecky for $50");
    }

    #[test]
    fn unknown_species_is_rejected() {
        let mut world = starting_farm();

        let result = act(
            &mut world,
            &Action::BuyAnimal {
                species: String::from("goat"),
                name: String::from("Billy"),
            },
        );

        assert!(matches!(result, Err(ActionError::UnknownSpecies { .. })));
        assert_eq!(world.ledger.amount(Resource::Money), dec!(200));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut world = starting_farm();

        let result = act(
            &mut world,
            &Action::BuyAnimal {
                species: String::from("cow"),
                name: String::from("Bessie"),
            },
        );

        assert!(matches!(result, Err(ActionError::NameTaken { .. })));
        assert_eq!(world.ledger.amount(Resource::Money), dec!(200));
        assert_eq!(world.animals.len(), 2);
    }

    #[test]
    fn a_cow_costs_more_than_the_starting_purse_minus_some() {
        let mut world = starting_farm();
        world.ledger.debit(Resource::Money, dec!(50)).unwrap();

        let result = act(
            &mut world,
            &Action::BuyAnimal {
                species: String::from("cow"),
                name: String::from("Daisy"),
            },
        );

        assert!(matches!(
            result,
            Err(ActionError::InsufficientFunds { needed, .. }) if needed == dec!(200)
        ));
    }

    #[test]
    fn actions_never_touch_the_weather_or_the_clock() {
        let mut world = starting_farm();
        drop(act(&mut world, &Action::BuyFeed { amount: 10 }));
        assert_eq!(world.weather, Weather::Sunny);
        assert_eq!(world.total_days, 0);
    }
}
