//! Exact maximum-weight set of pairwise disjoint intervals.
use log::{info, warn};

use exemplar_core::models::RegionSet;

use crate::errors::{SelectError, SelectResult};
use crate::heap::top_k;
use crate::linearize::{AbsoluteCoords, OffsetBasis, linearize};
use crate::models::Selection;
use crate::predecessor::disjoint_predecessors;

///
/// Output of the dynamic program: the chosen indices in ascending order
/// and their summed score.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub indices: Vec<usize>,
    pub total_score: f64,
}

///
/// Weighted interval scheduling over intervals sorted by absolute end.
///
/// `opt[j + 1]` holds the best total over intervals `0..=j`; `opt[0]` is the
/// empty prefix. Interval `j` is taken only when taking it is strictly
/// better than skipping it.
///
#[derive(Debug, Clone)]
pub struct WeightedIntervalScheduler {
    scores: Vec<f64>,
    predecessors: Vec<Option<usize>>,
}

impl WeightedIntervalScheduler {
    pub fn new(scores: Vec<f64>, coords: &AbsoluteCoords) -> SelectResult<Self> {
        if scores.len() != coords.len() {
            return Err(SelectError::LengthMismatch {
                expected: coords.len(),
                found: scores.len(),
            });
        }
        let predecessors = disjoint_predecessors(&coords.starts, &coords.ends);
        Ok(WeightedIntervalScheduler {
            scores,
            predecessors,
        })
    }

    pub fn from_region_set(rs: &RegionSet, basis: OffsetBasis) -> SelectResult<Self> {
        let coords = linearize(rs, basis)?;
        WeightedIntervalScheduler::new(rs.scores(), &coords)
    }

    pub fn predecessors(&self) -> &[Option<usize>] {
        &self.predecessors
    }

    fn slot(predecessor: Option<usize>) -> usize {
        predecessor.map_or(0, |p| p + 1)
    }

    fn take_value(&self, j: usize, opt: &[f64]) -> f64 {
        self.scores[j] + opt[Self::slot(self.predecessors[j])]
    }

    /// Forward pass
    pub fn optimal_values(&self) -> Vec<f64> {
        let n = self.scores.len();
        let mut opt = vec![0.0; n + 1];
        for j in 0..n {
            let take = self.take_value(j, &opt);
            let skip = opt[j];
            opt[j + 1] = if take > skip { take } else { skip };
        }
        opt
    }

    /// Forward pass, then walk back from the last interval.
    pub fn schedule(&self) -> Schedule {
        let opt = self.optimal_values();
        let mut indices: Vec<usize> = Vec::new();

        let mut cursor = self.scores.len();
        while cursor > 0 {
            let j = cursor - 1;
            if self.take_value(j, &opt) > opt[j] {
                indices.push(j);
                cursor = Self::slot(self.predecessors[j]);
            } else {
                cursor = j;
            }
        }
        indices.reverse();

        Schedule {
            indices,
            total_score: opt[self.scores.len()],
        }
    }

    ///
    /// Run the dynamic program and keep at most `k` of the chosen intervals,
    /// highest score first. `None` keeps all of them.
    ///
    pub fn select(&self, k: Option<usize>) -> Selection {
        if k == Some(0) || self.scores.is_empty() {
            return Selection::empty(k);
        }

        let schedule = self.schedule();
        let found = schedule.indices.len();

        match k {
            None => {
                info!("{} elements were found", found);
                Selection::new(schedule.indices, None)
            }
            Some(k) if found < k => {
                warn!("{} elements were found, fewer than the {} requested", found, k);
                Selection::new(schedule.indices, Some(k))
            }
            Some(k) => {
                info!(
                    "{} elements were found, and we pull {} best from this set",
                    found, k
                );
                Selection::new(top_k(&schedule.indices, &self.scores, k), Some(k))
            }
        }
    }
}

///
/// Exact selection of disjoint windows from a RegionSet.
///
pub fn select_optimal(
    rs: &RegionSet,
    k: Option<usize>,
    basis: OffsetBasis,
) -> SelectResult<Selection> {
    if k == Some(0) || rs.is_empty() {
        return Ok(Selection::empty(k));
    }
    let scheduler = WeightedIntervalScheduler::from_region_set(rs, basis)?;
    Ok(scheduler.select(k))
}
