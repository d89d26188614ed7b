//! Achievement unlock scanning.
//!
//! Achievements are evaluated by trigger category after the actions that
//! can move their inputs: the `Farmer` scan runs after trades, the
//! `Breeder` scan after breeding. The scan is idempotent -- conditions
//! are re-evaluated against current state and an identifier is inserted
//! at most once, so re-running a scan never double-unlocks.

use rust_decimal::Decimal;

use farmstead_types::{Achievement, FarmEvent, Resource};

use crate::events::{self, EventSink};
use crate::world::FarmWorld;

/// Feed stock required for [`Achievement::FeedPurchased`].
const FEED_STOCKPILE_TARGET: u32 = 100;

/// Money balance required for [`Achievement::Millionaire`].
const MILLIONAIRE_TARGET: u32 = 1000;

/// Roster size required for [`Achievement::Prolific`].
const PROLIFIC_TARGET: usize = 10;

/// Which group of achievement conditions to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementTrigger {
    /// Trade-driven achievements (feed stockpile, money balance).
    Farmer,
    /// Herd-driven achievements (roster size).
    Breeder,
}

/// Evaluate the trigger's conditions and unlock anything newly satisfied.
///
/// Returns the achievements unlocked by this scan (empty when nothing
/// new was earned). Each unlock is reported through the sink.
pub fn check_unlocks(
    world: &mut FarmWorld,
    trigger: AchievementTrigger,
    sink: &dyn EventSink,
) -> Vec<Achievement> {
    let candidates: Vec<(Achievement, bool)> = match trigger {
        AchievementTrigger::Farmer => vec![
            (
                Achievement::FeedPurchased,
                world.ledger.amount(Resource::Feed) >= Decimal::from(FEED_STOCKPILE_TARGET),
            ),
            (
                Achievement::Millionaire,
                world.ledger.amount(Resource::Money) >= Decimal::from(MILLIONAIRE_TARGET),
            ),
        ],
        AchievementTrigger::Breeder => vec![(
            Achievement::Prolific,
            world.animals.len() >= PROLIFIC_TARGET,
        )],
    };

    let mut unlocked = Vec::new();
    for (achievement, satisfied) in candidates {
        if satisfied && world.achievements.insert(achievement) {
            events::emit(
                sink,
                world.total_days,
                FarmEvent::AchievementUnlocked { name: achievement },
            );
            unlocked.push(achievement);
        }
    }
    unlocked
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use farmstead_types::Resource;

    use crate::events::NoOpSink;
    use crate::seed::starting_farm;

    use super::*;

    #[test]
    fn starting_farm_already_qualifies_for_the_stockpile() {
        // The founding stock holds exactly 100 feed.
        let mut world = starting_farm();
        let unlocked = check_unlocks(&mut world, AchievementTrigger::Farmer, &NoOpSink);
        assert_eq!(unlocked, vec![Achievement::FeedPurchased]);
    }

    #[test]
    fn scans_are_idempotent() {
        let mut world = starting_farm();
        drop(check_unlocks(&mut world, AchievementTrigger::Farmer, &NoOpSink));
        let second = check_unlocks(&mut world, AchievementTrigger::Farmer, &NoOpSink);
        assert!(second.is_empty(), "no double unlocks");
        assert_eq!(world.achievements.len(), 1);
    }

    #[test]
    fn millionaire_unlocks_at_the_target() {
        let mut world = starting_farm();
        world
            .ledger
            .credit(Resource::Money, Decimal::from(800))
            .unwrap();
        let unlocked = check_unlocks(&mut world, AchievementTrigger::Farmer, &NoOpSink);
        assert!(unlocked.contains(&Achievement::Millionaire));
    }

    #[test]
    fn breeder_trigger_ignores_farmer_conditions() {
        let mut world = starting_farm();
        let unlocked = check_unlocks(&mut world, AchievementTrigger::Breeder, &NoOpSink);
        assert!(unlocked.is_empty(), "two animals is not prolific");
        assert!(world.achievements.is_empty());
    }
}
