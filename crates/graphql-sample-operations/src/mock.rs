//! Mock literal values for example operations
//!
//! Example operations replace every variable with a literal whose shape
//! matches the argument's type. The literals come from a [`MockValues`]
//! provider so that callers can swap in a seeded or fixed source.

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use rand::rngs::{StdRng, ThreadRng};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// How far back generated timestamps may reach
const DATE_TIME_WINDOW_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// Lowest and highest generated `Int`
const INT_RANGE: std::ops::RangeInclusive<i32> = 1..=100;

/// Used when a word cannot be drawn, which only happens for an empty list
const FALLBACK_WORD: &str = "sample";

const WORDS: &[&str] = &[
    "amber", "anchor", "aspen", "atlas", "autumn", "bamboo", "beacon", "birch", "breeze",
    "canyon", "cedar", "citrus", "clover", "comet", "coral", "cosmos", "crimson", "delta",
    "dune", "ember", "falcon", "fern", "fjord", "glacier", "harbor", "hazel", "horizon",
    "indigo", "island", "jasper", "lagoon", "lantern", "maple", "meadow", "mesa", "nebula",
    "oasis", "orbit", "pebble", "prairie", "quartz", "raven", "ridge", "river", "saffron",
    "sierra", "summit", "thistle", "tundra", "velvet", "willow", "zephyr",
];

/// A source of mock values, one method per literal shape.
pub trait MockValues {
    /// Two space-separated words
    fn phrase(&mut self) -> String;

    fn uuid(&mut self) -> Uuid;

    /// An integer in `[1, 100]`
    fn int(&mut self) -> i32;

    fn boolean(&mut self) -> bool;

    /// A recent instant
    fn date_time(&mut self) -> DateTime<Utc>;

    /// A single word
    fn word(&mut self) -> String;

    /// Render a GraphQL literal for a type name.
    ///
    /// `None` stands for a type that is not a plain named type (a list) and,
    /// like any unrecognized name, receives a quoted word.
    fn literal_for(&mut self, type_name: Option<&str>) -> String {
        match type_name {
            Some("String") => quoted(&self.phrase()),
            Some("ID") => quoted(&self.uuid().to_string()),
            Some("Int") => self.int().to_string(),
            Some("Boolean") => self.boolean().to_string(),
            Some("DateTime") => quoted(
                &self
                    .date_time()
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
            _ => quoted(&self.word()),
        }
    }
}

fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}

/// Mock values drawn from a random number generator.
///
/// Timestamps are taken relative to a fixed `now` so that a seeded generator
/// reproduces the exact same literals.
#[derive(Debug, Clone)]
pub struct RandomMockValues<R> {
    rng: R,
    now: DateTime<Utc>,
}

impl<R: Rng> RandomMockValues<R> {
    pub fn new(rng: R, now: DateTime<Utc>) -> Self {
        Self { rng, now }
    }

    fn pick_word(&mut self) -> &'static str {
        WORDS.choose(&mut self.rng).copied().unwrap_or(FALLBACK_WORD)
    }
}

impl RandomMockValues<StdRng> {
    /// A reproducible provider
    pub fn seeded(seed: u64, now: DateTime<Utc>) -> Self {
        Self::new(StdRng::seed_from_u64(seed), now)
    }
}

impl RandomMockValues<ThreadRng> {
    /// A provider backed by the thread-local generator and the current time
    pub fn from_entropy() -> Self {
        Self::new(rand::rng(), Utc::now())
    }
}

impl<R: Rng> MockValues for RandomMockValues<R> {
    fn phrase(&mut self) -> String {
        format!("{} {}", self.pick_word(), self.pick_word())
    }

    fn uuid(&mut self) -> Uuid {
        uuid::Builder::from_random_bytes(self.rng.random()).into_uuid()
    }

    fn int(&mut self) -> i32 {
        self.rng.random_range(INT_RANGE)
    }

    fn boolean(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    fn date_time(&mut self) -> DateTime<Utc> {
        let offset = TimeDelta::milliseconds(self.rng.random_range(0..DATE_TIME_WINDOW_MS));
        self.now - offset
    }

    fn word(&mut self) -> String {
        self.pick_word().to_string()
    }
}
