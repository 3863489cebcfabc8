use log::{debug, info, warn};

use crate::heap::score_heap;
use crate::models::Selection;
use crate::occupancy::{MarkingPolicy, OccupancyVector, WindowBounds};

///
/// Lets a window through even when its neighbourhood is taken, as long as
/// its score reaches `threshold`. `final_pass` turns the override off.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relaxation {
    pub threshold: f64,
    pub final_pass: bool,
}

impl Relaxation {
    pub fn admits(&self, score: f64) -> bool {
        !self.final_pass && score >= self.threshold
    }
}

///
/// Greedy selection by descending score with spatial exclusion.
///
/// Windows are popped from a max-heap; a window is accepted when no slot in
/// its neighbourhood is occupied yet (or when the relaxation admits it), and
/// accepting it marks slots according to the marking policy.
///
#[derive(Debug, Clone, PartialEq)]
pub struct GreedySelector {
    pub window_span: usize,
    pub marking: MarkingPolicy,
    pub bounds: WindowBounds,
    pub relaxation: Option<Relaxation>,
    pub stop_at_zero_score: bool,
}

impl GreedySelector {
    pub fn new(window_span: usize) -> Self {
        GreedySelector {
            window_span,
            marking: MarkingPolicy::FullWindow,
            bounds: WindowBounds::HalfOpen,
            relaxation: None,
            stop_at_zero_score: false,
        }
    }

    ///
    /// Percentile-relaxed variant: single-index marking, closed windows,
    /// and a stop at the first zero score.
    ///
    pub fn relaxed(window_span: usize, threshold: f64, final_pass: bool) -> Self {
        GreedySelector {
            window_span,
            marking: MarkingPolicy::SingleIndex,
            bounds: WindowBounds::Closed,
            relaxation: Some(Relaxation {
                threshold,
                final_pass,
            }),
            stop_at_zero_score: true,
        }
    }

    pub fn with_marking(mut self, marking: MarkingPolicy) -> Self {
        self.marking = marking;
        self
    }

    pub fn with_bounds(mut self, bounds: WindowBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn select(&self, scores: &[f64], k: usize) -> Selection {
        let mut occupancy = OccupancyVector::new(scores.len(), self.bounds);
        let mut heap = score_heap(scores);
        let mut picked: Vec<usize> = Vec::with_capacity(k.min(scores.len()));
        let mut relaxed_accepts: usize = 0;

        while picked.len() < k {
            let Some(candidate) = heap.pop() else {
                break;
            };
            if self.stop_at_zero_score && candidate.score == 0.0 {
                debug!("Reached a zero score at index {}", candidate.index);
                break;
            }

            if !occupancy.any_occupied(candidate.index, self.window_span) {
                occupancy.mark(candidate.index, self.window_span, self.marking);
            } else if self
                .relaxation
                .is_some_and(|r| r.admits(candidate.score))
            {
                occupancy.mark_index(candidate.index);
                relaxed_accepts += 1;
            } else {
                continue;
            }
            picked.push(candidate.index);
        }

        if relaxed_accepts > 0 {
            debug!("{} windows accepted above the threshold", relaxed_accepts);
        }

        let selection = Selection::new(picked, Some(k));
        if selection.is_underfilled() {
            warn!(
                "{} elements were found, fewer than the {} requested",
                selection.len(),
                k
            );
        } else {
            info!("{} elements were found", selection.len());
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_alternating_scores() {
        let selection = GreedySelector::new(1).select(&[10.0, 1.0, 10.0, 1.0, 10.0], 3);
        assert_eq!(selection.indices, vec![0, 2, 4]);
    }

    #[rstest]
    fn test_window_blocks_neighbours() {
        let scores = [1.0, 2.0, 9.0, 3.0, 1.0, 1.0, 8.0];
        let selection = GreedySelector::new(2).select(&scores, 10);
        // 9 at 2 blocks [0, 4); 8 at 6 blocks [4, 7)
        assert_eq!(selection.indices, vec![2, 6]);
        assert!(selection.is_underfilled());
    }

    #[rstest]
    fn test_half_open_window_lets_right_neighbour_in() {
        // 5 at index 0 marks [0, 1); index 1 looks at [0, 2) and is blocked,
        // index 2 looks at [1, 3) and is free
        let selection = GreedySelector::new(1).select(&[5.0, 4.0, 3.0], 3);
        assert_eq!(selection.indices, vec![0, 2]);
    }

    #[rstest]
    fn test_k_caps_selection() {
        let scores = [1.0, 5.0, 2.0, 8.0, 3.0];
        let selection = GreedySelector::new(0).select(&scores, 2);
        assert_eq!(selection.indices, vec![1, 3]);
    }

    #[rstest]
    fn test_k_zero_and_empty_input() {
        assert!(GreedySelector::new(3).select(&[1.0, 2.0], 0).is_empty());
        assert!(GreedySelector::new(3).select(&[], 4).is_empty());
    }

    #[rstest]
    fn test_relaxed_admits_above_threshold() {
        let scores = [9.0, 8.0, 1.0, 0.5];
        // 9 takes index 0; 8 is adjacent but passes the threshold
        let selection = GreedySelector::relaxed(1, 5.0, false).select(&scores, 4);
        assert_eq!(selection.indices, vec![0, 1, 3]);
    }

    #[rstest]
    fn test_final_pass_disables_relaxation() {
        let scores = [9.0, 8.0, 1.0, 0.5];
        let selection = GreedySelector::relaxed(1, 5.0, true).select(&scores, 4);
        assert_eq!(selection.indices, vec![0, 2]);
    }

    #[rstest]
    fn test_relaxed_stops_at_zero_score() {
        let scores = [4.0, 0.0, 0.0, 0.0, 3.0];
        let selection = GreedySelector::relaxed(0, 10.0, false).select(&scores, 5);
        assert_eq!(selection.indices, vec![0, 4]);
    }

    #[rstest]
    fn test_builder_overrides() {
        let selector = GreedySelector::new(4)
            .with_marking(MarkingPolicy::SingleIndex)
            .with_bounds(WindowBounds::Closed);
        assert_eq!(selector.marking, MarkingPolicy::SingleIndex);
        assert_eq!(selector.bounds, WindowBounds::Closed);
        assert!(selector.relaxation.is_none());
    }
}
