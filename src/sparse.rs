use std::collections::BTreeMap;
use std::time::Duration;

use crate::color::Color;

/// Identifies one physical light on the string (1-based).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct LightId(pub u32);

/// Frame position in a source timing file. Fractional frames are allowed.
///
/// Ordering and equality use `f64::total_cmp` so frame numbers can key a
/// `BTreeMap`.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct FrameNumber(pub f64);

impl PartialEq for FrameNumber {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for FrameNumber {}

impl PartialOrd for FrameNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrameNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Sparse mapping from (moment, light) to the color asserted at that moment.
///
/// Stored as moment -> light -> color, which gives the two invariants the
/// converter relies on for free: one entry per (moment, light) pair, with
/// later inserts overwriting earlier ones, and moments iterated in ascending
/// order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseAssignment<M> {
    by_moment: BTreeMap<M, BTreeMap<LightId, Color>>,
}

/// Assignment keyed by source frame numbers (parser output).
pub type FrameAssignment = SparseAssignment<FrameNumber>;

/// Assignment keyed by elapsed time from sequence start (generator output).
pub type TimedAssignment = SparseAssignment<Duration>;

impl<M: Ord + Copy> SparseAssignment<M> {
    pub fn new() -> Self {
        Self {
            by_moment: BTreeMap::new(),
        }
    }

    /// Asserts `color` for `light` at `moment`, returning the previously
    /// asserted color for that pair if any.
    pub fn insert(&mut self, moment: M, light: LightId, color: Color) -> Option<Color> {
        self.by_moment
            .entry(moment)
            .or_default()
            .insert(light, color)
    }

    pub fn get(&self, moment: M, light: LightId) -> Option<Color> {
        self.by_moment.get(&moment)?.get(&light).copied()
    }

    /// Distinct moments, ascending.
    pub fn moments(&self) -> impl Iterator<Item = M> + '_ {
        self.by_moment.keys().copied()
    }

    pub fn lights_at(&self, moment: M) -> Option<&BTreeMap<LightId, Color>> {
        self.by_moment.get(&moment)
    }

    /// Ascending iteration over moments and their light mappings.
    pub fn iter(&self) -> impl Iterator<Item = (M, &BTreeMap<LightId, Color>)> {
        self.by_moment.iter().map(|(m, lights)| (*m, lights))
    }

    /// Latest moment at which `light` has an assignment.
    pub fn last_moment_for(&self, light: LightId) -> Option<M> {
        self.by_moment
            .iter()
            .rev()
            .find(|(_, lights)| lights.contains_key(&light))
            .map(|(m, _)| *m)
    }

    /// Total number of (moment, light) pairs.
    pub fn len(&self) -> usize {
        self.by_moment.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_moment.is_empty()
    }
}

impl<M: Ord + Copy> Default for SparseAssignment<M> {
    fn default() -> Self {
        Self::new()
    }
}
