//! Instance-id and request-token generation

use burger_types::InstanceId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of constructor instance identifiers.
///
/// Contract: every id returned is distinct from all ids currently live in the
/// constructor. Implementations must be shareable across tasks.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> InstanceId;
}

/// Random v4 UUIDs. The default for real sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> InstanceId {
        InstanceId::new(Uuid::new_v4())
    }
}

/// Deterministic ids 1, 2, 3, ... encoded as UUIDs
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the n-th call (1-based) returns
    pub fn nth(n: u64) -> InstanceId {
        InstanceId::new(Uuid::from_u128(n as u128))
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> InstanceId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        Self::nth(n)
    }
}

/// Generation token of one async request.
///
/// Recorded by a slice when the request goes pending; terminal results
/// carrying any other token are stale and get discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}
