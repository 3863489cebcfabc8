use crate::errors::{SelectError, SelectResult};

///
/// Score at percentile `pct` (0 to 100), interpolating linearly between the
/// two nearest ranks. Returns `None` for an empty slice.
///
pub fn percentile(scores: &[f64], pct: f64) -> SelectResult<Option<f64>> {
    if !(0.0..=100.0).contains(&pct) {
        return Err(SelectError::InvalidPercentile(pct));
    }
    if scores.is_empty() {
        return Ok(None);
    }

    let mut sorted = scores.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    Ok(Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac))
}
