use std::fmt;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Per-writer logical timestamp.
///
/// Combines wall-clock milliseconds with a logical counter so that a single
/// writer always produces strictly increasing stamps, even for events minted
/// within the same millisecond. Stamps are used for tie-breaking and display;
/// causal ordering across branches comes from the commit DAG, not from here.
///
/// Ordering: `wall_ms` → `seq` (total order per writer).
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Timestamp {
    /// Wall-clock milliseconds since UNIX epoch.
    pub wall_ms: u64,
    /// Logical counter for stamps issued at the same wall-clock time.
    pub seq: u32,
}

impl Timestamp {
    /// Create a timestamp with explicit values.
    pub fn new(wall_ms: u64, seq: u32) -> Self {
        Self { wall_ms, seq }
    }

    /// The zero timestamp (epoch).
    pub const fn zero() -> Self {
        Self { wall_ms: 0, seq: 0 }
    }

    /// Current wall-clock time with a zero logical counter.
    pub fn now() -> Self {
        Self {
            wall_ms: wall_clock_ms(),
            seq: 0,
        }
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}.{})", self.wall_ms, self.seq)
    }
}

fn wall_clock_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Monotonic stamp issuer for a single writer.
///
/// Guarantees that successive calls to [`tick`](Clock::tick) return strictly
/// increasing timestamps: if the wall clock has not advanced (or moved
/// backwards), the logical counter advances instead.
#[derive(Debug, Default)]
pub struct Clock {
    last: Mutex<Timestamp>,
}

impl Clock {
    /// Create a clock starting at the epoch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next timestamp, strictly after every previous one.
    pub fn tick(&self) -> Timestamp {
        let mut last = self.last.lock().expect("lock poisoned");
        let now_ms = wall_clock_ms();
        let next = if now_ms > last.wall_ms {
            Timestamp::new(now_ms, 0)
        } else {
            Timestamp::new(last.wall_ms, last.seq + 1)
        };
        *last = next;
        next
    }
}
