//! Frozen per-connection trajectory sets.
//!
//! # Representation
//!
//! A [`Traffic`] is a sorted, deduplicated boxed slice of [`TrajectoryId`]s.
//! The builder accumulates ids in a hash set while the map-matcher is
//! running; `build()` freezes each set into this form.  Sorted storage gives
//! a linear-time intersection count ([`Traffic::overlap`]), which is the
//! inner loop of the density-reachability test, and a deterministic
//! iteration order for export.
//!
//! There is no mutating API.  Changing traffic means thawing the graph back
//! into a builder, which consumes it.

use hr_core::TrajectoryId;

/// The set of trajectories that traversed one connection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<TrajectoryId>"))]
pub struct Traffic(Box<[TrajectoryId]>);

impl Traffic {
    /// An empty traffic set.
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `true` if `trajectory` traversed this connection.  O(log n).
    #[inline]
    pub fn contains(&self, trajectory: TrajectoryId) -> bool {
        self.0.binary_search(&trajectory).is_ok()
    }

    /// Trajectory ids in ascending order.
    #[inline]
    pub fn as_slice(&self) -> &[TrajectoryId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = TrajectoryId> + '_ {
        self.0.iter().copied()
    }

    /// Number of trajectories present in both sets.
    ///
    /// Linear merge over the two sorted slices: O(|self| + |other|), no
    /// allocation.
    pub fn overlap(&self, other: &Traffic) -> usize {
        let (a, b) = (&self.0, &other.0);
        let (mut i, mut j, mut shared) = (0, 0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less    => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal   => {
                    shared += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        shared
    }
}

impl FromIterator<TrajectoryId> for Traffic {
    fn from_iter<I: IntoIterator<Item = TrajectoryId>>(iter: I) -> Self {
        let mut ids: Vec<TrajectoryId> = iter.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Traffic(ids.into_boxed_slice())
    }
}

/// Sorts and deduplicates, so any id list yields a valid set.
impl From<Vec<TrajectoryId>> for Traffic {
    fn from(ids: Vec<TrajectoryId>) -> Self {
        ids.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Traffic {
    type Item = &'a TrajectoryId;
    type IntoIter = std::slice::Iter<'a, TrajectoryId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
