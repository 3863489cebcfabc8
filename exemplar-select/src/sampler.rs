use fxhash::FxHashSet;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::alias::AliasTable;
use crate::consts::{DEFAULT_MAX_ATTEMPTS, DEFAULT_WINDOW_SPAN};
use crate::errors::{SelectError, SelectResult};
use crate::models::Selection;
use crate::occupancy::{MarkingPolicy, OccupancyVector, WindowBounds};

///
/// How the sampler rejects draws: the exclusion neighbourhood, how it is
/// marked, and how many rejected draws are tolerated in total.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectionOptions {
    pub window_span: usize,
    pub marking: MarkingPolicy,
    pub bounds: WindowBounds,
    pub max_attempts: usize,
}

impl Default for RejectionOptions {
    fn default() -> Self {
        RejectionOptions {
            window_span: DEFAULT_WINDOW_SPAN,
            marking: MarkingPolicy::FullWindow,
            bounds: WindowBounds::HalfOpen,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

///
/// Score-proportional sampling of spatially separated windows.
///
/// Owns its alias table and random source so repeated calls draw from one
/// reproducible stream when seeded.
///
pub struct AliasSampler {
    table: AliasTable,
    rng: StdRng,
}

impl AliasSampler {
    /// Create a new sampler
    ///
    /// # Arguments
    /// * `weights` - one non-negative weight per window
    /// * `seed` - Optional random seed for reproducibility
    pub fn new(weights: &[f64], seed: Option<u64>) -> SelectResult<Self> {
        let table = AliasTable::new(weights)?;
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Ok(AliasSampler { table, rng })
    }

    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    /// One weighted draw, with replacement
    pub fn sample_key(&mut self) -> usize {
        self.table.sample(&mut self.rng)
    }

    ///
    /// Draw until `k` distinct, mutually separated windows are accepted.
    ///
    /// A draw is rejected when it was already accepted or when its
    /// neighbourhood is occupied. Every rejection uses up one attempt;
    /// running out fails with [SelectError::AttemptsExhausted].
    ///
    pub fn select(&mut self, k: usize, options: &RejectionOptions) -> SelectResult<Selection> {
        let mut occupancy = OccupancyVector::new(self.table.len(), options.bounds);
        let mut accepted: FxHashSet<usize> = FxHashSet::default();
        let mut picked: Vec<usize> = Vec::with_capacity(k.min(self.table.len()));
        let mut attempts_left = options.max_attempts;

        while picked.len() < k {
            if attempts_left == 0 {
                return Err(SelectError::AttemptsExhausted {
                    found: picked.len(),
                    requested: k,
                });
            }

            let key = self.sample_key();
            if accepted.contains(&key) || occupancy.any_occupied(key, options.window_span) {
                attempts_left -= 1;
                continue;
            }

            occupancy.mark(key, options.window_span, options.marking);
            accepted.insert(key);
            picked.push(key);
        }

        debug!(
            "{} rejected draws",
            options.max_attempts - attempts_left
        );
        info!("{} elements were sampled", picked.len());
        Ok(Selection::new(picked, Some(k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn options(window_span: usize, max_attempts: usize) -> RejectionOptions {
        RejectionOptions {
            window_span,
            max_attempts,
            ..Default::default()
        }
    }

    #[rstest]
    fn test_seeded_runs_are_reproducible() {
        let weights: Vec<f64> = (1..=200).map(|i| i as f64).collect();
        let a = AliasSampler::new(&weights, Some(11))
            .unwrap()
            .select(10, &options(3, 10_000))
            .unwrap();
        let b = AliasSampler::new(&weights, Some(11))
            .unwrap()
            .select(10, &options(3, 10_000))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 10);
    }

    #[rstest]
    fn test_picks_are_distinct_and_separated() {
        let weights = vec![1.0; 300];
        let span = 4;
        let selection = AliasSampler::new(&weights, Some(3))
            .unwrap()
            .select(12, &options(span, 100_000))
            .unwrap();

        assert_eq!(selection.len(), 12);
        for pair in selection.indices.windows(2) {
            assert!(pair[1] - pair[0] >= span, "{:?} too close", pair);
        }
    }

    #[rstest]
    fn test_exhaustion_is_reported() {
        // a single window cannot yield two picks
        let mut sampler = AliasSampler::new(&[1.0], Some(1)).unwrap();
        match sampler.select(2, &options(0, 50)) {
            Err(SelectError::AttemptsExhausted { found, requested }) => {
                assert_eq!(found, 1);
                assert_eq!(requested, 2);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[rstest]
    fn test_zero_attempts_fail_immediately() {
        let mut sampler = AliasSampler::new(&[1.0, 1.0], Some(1)).unwrap();
        assert!(sampler.select(1, &options(0, 0)).is_err());
        assert!(sampler.select(0, &options(0, 0)).unwrap().is_empty());
    }

    #[rstest]
    fn test_zero_weight_windows_are_never_picked() {
        let weights = [0.0, 5.0, 0.0, 0.0, 5.0, 0.0];
        let selection = AliasSampler::new(&weights, Some(5))
            .unwrap()
            .select(2, &options(1, 1000))
            .unwrap();
        assert_eq!(selection.indices, vec![1, 4]);
    }
}
