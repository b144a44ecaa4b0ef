use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, or zero if the clock is before it.
pub fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Produces node ids of the form `{prefix}-{millis}-{n}`.
///
/// The counter keeps ids unique when several are minted within the same
/// millisecond, which is the normal case when a prefab is built.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    counter: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator whose first id uses counter `offset + 1`. Graphs loaded
    /// from a layout start past the node count so fresh ids cannot collide
    /// with ids minted for that layout in the same millisecond.
    pub fn starting_at(offset: u64) -> Self {
        Self { counter: offset }
    }

    pub fn timed(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{}-{}-{}", prefix, timestamp_millis(), self.counter)
    }
}
