use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A window index keyed by its score, ordered so a [BinaryHeap] pops the
/// highest score first. Equal scores pop the lower index first; callers
/// must not rely on that tie order.
#[derive(Debug, Clone, Copy)]
pub struct ScoredIndex {
    pub score: f64,
    pub index: usize,
}

impl PartialEq for ScoredIndex {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredIndex {}

impl PartialOrd for ScoredIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Heapify every score in O(n).
pub fn score_heap(scores: &[f64]) -> BinaryHeap<ScoredIndex> {
    scores
        .iter()
        .enumerate()
        .map(|(index, &score)| ScoredIndex { score, index })
        .collect::<Vec<_>>()
        .into()
}

/// Keep the `k` highest-scoring of `indices`, returned in ascending index order.
pub fn top_k(indices: &[usize], scores: &[f64], k: usize) -> Vec<usize> {
    let mut heap: BinaryHeap<ScoredIndex> = indices
        .iter()
        .map(|&index| ScoredIndex {
            score: scores[index],
            index,
        })
        .collect();

    let mut kept: Vec<usize> = Vec::with_capacity(k.min(indices.len()));
    while kept.len() < k {
        match heap.pop() {
            Some(item) => kept.push(item.index),
            None => break,
        }
    }
    kept.sort_unstable();
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_pops_highest_score_first() {
        let mut heap = score_heap(&[1.0, 7.0, 3.0, -2.0]);
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|s| s.index)).collect();
        assert_eq!(order, vec![1, 2, 0, 3]);
    }

    #[rstest]
    fn test_ties_pop_lower_index_first() {
        let mut heap = score_heap(&[5.0, 5.0, 5.0]);
        assert_eq!(heap.pop().unwrap().index, 0);
        assert_eq!(heap.pop().unwrap().index, 1);
    }

    #[rstest]
    #[case(vec![0, 2, 4], 2, vec![0, 4])]
    #[case(vec![0, 2, 4], 5, vec![0, 2, 4])]
    #[case(vec![0, 2, 4], 0, vec![])]
    #[case(vec![], 3, vec![])]
    fn test_top_k(#[case] indices: Vec<usize>, #[case] k: usize, #[case] expected: Vec<usize>) {
        let scores = [9.0, 1.0, 2.0, 1.0, 8.0];
        assert_eq!(top_k(&indices, &scores, k), expected);
    }
}
