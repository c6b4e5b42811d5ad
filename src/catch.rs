//! Catch attempts.
//!
//! A roll is drawn uniformly from `[0, base_experience)` and the Pokemon is
//! caught when the roll reaches [`catch_threshold`]. Balance is tuned with
//! [`CATCH_THRESHOLD_PERCENT`] alone.

use rand::Rng;
use serde::Serialize;

use crate::catalog::{normalize_name, Catalog};
use crate::error::Result;
use crate::store::CollectionStore;

/// Share of the roll window, in percent, that counts as an escape.
pub const CATCH_THRESHOLD_PERCENT: i32 = 50;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatchAttempt {
    #[serde(rename = "pokemon")]
    pub creature_name: String,
    pub caught: bool,
    pub message: String,
    pub roll: u32,
    pub threshold: u32,
    pub base_experience: i32,
}

/// Source of catch rolls.
pub trait RollSource: Send + Sync {
    /// Returns a value in `[0, upper)`; `upper` is never zero.
    fn draw(&self, upper: u32) -> u32;
}

pub struct ThreadRoll;

impl RollSource for ThreadRoll {
    fn draw(&self, upper: u32) -> u32 {
        rand::thread_rng().gen_range(0..upper)
    }
}

pub fn catch_threshold(base_experience: i32) -> u32 {
    if base_experience <= 0 {
        return 0;
    }
    (i64::from(base_experience) * i64::from(CATCH_THRESHOLD_PERCENT) / 100) as u32
}

/// Decides one attempt. Pokemon without positive base experience always
/// escape and no roll is drawn for them.
pub fn resolve(name: &str, base_experience: i32, rolls: &dyn RollSource) -> CatchAttempt {
    let (roll, threshold, caught) = if base_experience <= 0 {
        (0, 0, false)
    } else {
        let upper = base_experience as u32;
        let roll = rolls.draw(upper).min(upper - 1);
        let threshold = catch_threshold(base_experience);
        (roll, threshold, roll >= threshold)
    };

    let message = if caught {
        format!("{name} was caught!")
    } else {
        format!("{name} escaped!")
    };

    CatchAttempt {
        creature_name: name.to_string(),
        caught,
        message,
        roll,
        threshold,
        base_experience,
    }
}

/// Throws a ball at `name`. A successful catch is recorded in `store`;
/// catching a Pokemon already in the pokedex still rolls but adds nothing.
pub async fn attempt_catch(
    catalog: &dyn Catalog,
    store: &CollectionStore,
    rolls: &dyn RollSource,
    name: &str,
) -> Result<CatchAttempt> {
    let name = normalize_name(name)?;
    let creature = catalog.pokemon(&name).await?;
    let attempt = resolve(&creature.name, creature.base_experience, rolls);

    if attempt.caught {
        let added = store.add(creature).await?;
        tracing::info!(
            pokemon = %attempt.creature_name,
            roll = attempt.roll,
            threshold = attempt.threshold,
            added,
            "caught"
        );
    } else {
        tracing::info!(
            pokemon = %attempt.creature_name,
            roll = attempt.roll,
            threshold = attempt.threshold,
            "escaped"
        );
    }

    Ok(attempt)
}
