//! Graph configuration: backward sweep order and arena sizing.

/// Order in which [`Graph::backward`](crate::Graph::backward) applies the
/// local gradient rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SweepOrder {
    /// Visit every node reachable from the output exactly once, in reverse
    /// topological order, after all of its consumers have contributed to its
    /// gradient.
    #[default]
    Topological,
    /// Pre-order descent along every incoming edge with no visited set.
    ///
    /// A derived node with `k` consumer paths re-distributes its accumulated
    /// gradient `k` times, so ancestors of a shared derived node are
    /// over-counted. Matches the classic recursive engine bit for bit.
    Recursive,
}

/// Configuration for a [`Graph`](crate::Graph).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphConfig {
    /// Sweep order used by `backward`.
    pub sweep: SweepOrder,
    /// Number of nodes to reserve up front.
    pub capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            sweep: SweepOrder::default(),
            capacity: 100,
        }
    }
}

impl GraphConfig {
    /// Select the sweep order.
    pub fn with_sweep(mut self, sweep: SweepOrder) -> Self {
        self.sweep = sweep;
        self
    }

    /// Select the number of nodes reserved up front.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}
