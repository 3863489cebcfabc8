use serde::Serialize;

use crate::config::Strategy;

///
/// Indices of the accepted windows, sorted ascending, plus the subset size
/// that was asked for (`None` when the strategy ran uncapped).
///
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub indices: Vec<usize>,
    pub requested: Option<usize>,
}

impl Selection {
    pub fn new(mut indices: Vec<usize>, requested: Option<usize>) -> Self {
        indices.sort_unstable();
        Selection { indices, requested }
    }

    pub fn empty(requested: Option<usize>) -> Self {
        Selection {
            indices: Vec::new(),
            requested,
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Fewer windows were found than requested
    pub fn is_underfilled(&self) -> bool {
        self.requested.is_some_and(|k| self.indices.len() < k)
    }

    pub fn total_score(&self, scores: &[f64]) -> f64 {
        self.indices.iter().map(|&i| scores[i]).sum()
    }

    pub fn stats(&self, strategy: Strategy, scores: &[f64]) -> SelectionStats {
        let picked = self.indices.iter().map(|&i| scores[i]);
        SelectionStats {
            strategy: strategy.to_string(),
            candidates: scores.len(),
            requested: self.requested,
            found: self.len(),
            total_score: self.total_score(scores),
            min_score: picked.clone().min_by(f64::total_cmp),
            max_score: picked.max_by(f64::total_cmp),
        }
    }
}

///
/// Summary of one selection run, serialized for `--stats`.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionStats {
    pub strategy: String,
    pub candidates: usize,
    pub requested: Option<usize>,
    pub found: usize,
    pub total_score: f64,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
}
