///
/// For every interval `j`, the largest `i < j` whose absolute end is at or
/// before the start of `j`, or `None` when no earlier interval is disjoint
/// from it.
///
/// `ends` must be non-decreasing; each lookup is a binary search.
///
pub fn disjoint_predecessors(starts: &[u64], ends: &[u64]) -> Vec<Option<usize>> {
    starts
        .iter()
        .enumerate()
        .map(|(j, &start)| {
            // a zero-width interval may satisfy its own test; only earlier ones count
            let disjoint = ends.partition_point(|&end| end <= start).min(j);
            disjoint.checked_sub(1)
        })
        .collect()
}
