//! Player action requests submitted over the wire.
//!
//! Each action a client can take on the farm is one variant of [`Action`].
//! The enum is externally tagged by the `action` field, which is exactly
//! the dispatch the transport performs: a recognized tag routes to one
//! handler, anything else is rejected before touching world state.
//!
//! `item` and `species` arrive as raw strings and are validated by the
//! action processor, so that an unknown species or an untradeable item
//! produces a domain error rather than a parse failure.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A player command against the farm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Buy feed at the current market price.
    BuyFeed {
        /// How many units of feed to buy (10 when omitted).
        #[serde(default = "default_feed_amount")]
        amount: u32,
    },
    /// Distribute stocked feed to every hungry animal.
    FeedAnimals,
    /// Sell a held resource at the current market price.
    Sell {
        /// Wire name of the resource to sell (`eggs`, `milk`, `feed`).
        item: String,
        /// How many units to sell (1 when omitted).
        #[serde(default = "default_sell_quantity")]
        quantity: u32,
    },
    /// Breed two animals of the same species.
    Breed {
        /// Name of the first parent.
        animal1: String,
        /// Name of the second parent.
        animal2: String,
    },
    /// Buy a new animal.
    BuyAnimal {
        /// Wire name of the species (`chicken`, `cow`).
        species: String,
        /// Name for the new animal; must not already be in use.
        name: String,
    },
}

impl Action {
    /// The wire tag of this action (the `action` field value).
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BuyFeed { .. } => "buy_feed",
            Self::FeedAnimals => "feed_animals",
            Self::Sell { .. } => "sell",
            Self::Breed { .. } => "breed",
            Self::BuyAnimal { .. } => "buy_animal",
        }
    }

    /// All recognized wire tags, used to distinguish a malformed known
    /// action from an unknown one.
    pub const NAMES: [&'static str; 5] =
        ["buy_feed", "feed_animals", "sell", "breed", "buy_animal"];
}

const fn default_feed_amount() -> u32 {
    10
}

const fn default_sell_quantity() -> u32 {
    1
}
