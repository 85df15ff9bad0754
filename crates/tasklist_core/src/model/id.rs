//! Todo identifier generation.
//!
//! # Responsibility
//! - Provide the injectable id capability used by the list service.
//! - Ship a time+random default and a deterministic sequence generator.
//!
//! # Invariants
//! - Generated ids are non-empty ASCII strings.
//! - Uniqueness is probabilistic only; collisions are not checked.

use crate::model::todo::{now_epoch_ms, TodoId};
use uuid::Uuid;

const RANDOM_SUFFIX_CHARS: usize = 8;
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of fresh todo identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> TodoId;
}

/// Default generator: `<prefix>_<base36 epoch ms>_<8 random base36 chars>`.
#[derive(Debug, Clone)]
pub struct TimeRandomIdGenerator {
    prefix: String,
}

impl TimeRandomIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for TimeRandomIdGenerator {
    fn default() -> Self {
        Self::new("t")
    }
}

impl IdGenerator for TimeRandomIdGenerator {
    fn next_id(&mut self) -> TodoId {
        let millis = u128::try_from(now_epoch_ms()).unwrap_or_default();
        let random = to_base36(Uuid::new_v4().as_u128());
        // A v4 uuid always spans more than 8 base36 digits.
        let suffix = &random[random.len().saturating_sub(RANDOM_SUFFIX_CHARS)..];
        format!("{}_{}_{}", self.prefix, to_base36(millis), suffix)
    }
}

/// Deterministic generator yielding `<prefix>_1`, `<prefix>_2`, ...
#[derive(Debug, Clone)]
pub struct SequenceIdGenerator {
    prefix: String,
    next: u64,
}

impl SequenceIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_id(&mut self) -> TodoId {
        let id = format!("{}_{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}
