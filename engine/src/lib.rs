//! Monster compendium core: challenge-rating decoding, the combined-file and
//! index builders, sorting and filtering of the loaded collection, and the
//! initiative tracker model.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod build;
pub mod catalog;
pub mod challenge;
pub mod config;
pub mod content;
pub mod error;
pub mod filter;
pub mod order;
pub mod record;
pub mod store;
pub mod tracker;

pub use build::{aggregate, build_index};
pub use catalog::{group_by_challenge, ChallengeGroup, Compendium, Facets};
pub use challenge::{normalize_display, parse_numeric, ChallengeRating};
pub use config::Config;
pub use error::{ConfigError, LoadError, RecordError, StoreError};
pub use filter::{apply, FilterCriteria};
pub use order::{compare, sort_records};
pub use record::{fallback_name, Ability, IndexEntry, MonsterRecord, RawFile};
pub use tracker::{HitPoints, SelectionState, Tracker, TrackerRow};

pub struct Dice { rng: ChaCha8Rng }

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn d20(&mut self) -> i32 {
        self.rng.gen_range(1..=20)
    }
}

/// D&D ability modifier = floor((score - 10) / 2) for integer scores.
pub fn ability_mod(score: i32) -> i32 {
    // `div_euclid` with positive divisor matches mathematical floor division.
    (score - 10).div_euclid(2)
}
