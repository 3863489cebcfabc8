//! Shrink merged records back to single exemplar-sized windows.
//!
//! Input records are `chr start end scores`, where `scores` joins the scores
//! of the windows that were merged into the record with `|`. A record exactly
//! one exemplar wide passes through unchanged. A wider record is replaced by
//! the window whose score lies closest to the mean of all its scores.

use std::io::{BufRead, Write};

use crate::consts::REDUCE_MAP_SCORE_DELIM;
use crate::errors::{RegionSetError, RegionSetResult};
use crate::utils::is_header_line;

///
/// Index of the score closest to the mean of `scores`.
///
/// Equidistant candidates resolve to the smaller score, and repeated values
/// to their first position. `None` for an empty slice.
///
pub fn centroid_index(scores: &[f64]) -> Option<usize> {
    if scores.is_empty() {
        return None;
    }
    let centroid = scores.iter().sum::<f64>() / scores.len() as f64;

    let mut ordered = scores.to_vec();
    ordered.sort_by(|a, b| a.total_cmp(b));

    let closest = ordered
        .iter()
        .copied()
        .reduce(|best, x| match (x - centroid).abs() < (best - centroid).abs() {
            true => x,
            false => best,
        })?;

    scores.iter().position(|&s| s == closest)
}

#[derive(Debug, Clone)]
pub struct ReduceMap {
    exemplar_size: u32,
    previous: Option<(String, u32, u32)>,
}

impl ReduceMap {
    ///
    /// Exemplars are `2 * window + bin_size` wide; that width must be even
    /// and non-zero.
    ///
    pub fn new(window: u32, bin_size: u32) -> RegionSetResult<Self> {
        let exemplar_size = window
            .checked_mul(2)
            .and_then(|w| w.checked_add(bin_size))
            .filter(|size| *size > 0 && size % 2 == 0)
            .ok_or(RegionSetError::InvalidExemplarSize { window, bin_size })?;

        Ok(ReduceMap {
            exemplar_size,
            previous: None,
        })
    }

    pub fn exemplar_size(&self) -> u32 {
        self.exemplar_size
    }

    ///
    /// Map one record to its output line, or `None` when the record repeats
    /// the source range of the previous one.
    ///
    pub fn map_line(&mut self, record: &str, line: usize) -> RegionSetResult<Option<String>> {
        let parse_error = |message: String| RegionSetError::RegionParseError { line, message };

        let mut fields = record.split('\t');
        let (Some(chr), Some(start_str), Some(end_str), Some(scores_str)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(parse_error("expected chr, start, end and scores".to_string()));
        };

        let start = start_str
            .trim()
            .parse::<u32>()
            .map_err(|_| parse_error(format!("start is not an integer: {:?}", start_str)))?;
        let end = end_str
            .trim()
            .parse::<u32>()
            .map_err(|_| parse_error(format!("end is not an integer: {:?}", end_str)))?;
        let width = end.checked_sub(start).ok_or_else(|| {
            parse_error(format!("end ({}) is before start ({})", end, start))
        })?;

        let size = self.exemplar_size;
        let source = (chr.to_string(), start, end);

        if width == size {
            self.previous = Some(source);
            return Ok(Some(record.to_string()));
        }
        if width < size {
            return Err(parse_error(format!(
                "record is {} wide, narrower than the exemplar size {}",
                width, size
            )));
        }

        let scores = scores_str
            .split(REDUCE_MAP_SCORE_DELIM)
            .map(|s| {
                s.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| parse_error(format!("score is not a finite number: {:?}", s)))
            })
            .collect::<RegionSetResult<Vec<f64>>>()?;
        let index = centroid_index(&scores)
            .ok_or_else(|| parse_error("empty score list".to_string()))?;

        let offset = (index as u64) * (size as u64);
        let mut new_start = start as u64 + offset;
        let mut new_end = new_start + size as u64;
        if new_end > end as u64 {
            new_end = end as u64;
            new_start = new_end - size as u64;
        }

        let mapped = format!("{}\t{}\t{}\t{:.5}", chr, new_start, new_end, scores[index]);
        let repeated = self.previous.as_ref() == Some(&source);
        self.previous = Some(source);

        match repeated {
            true => Ok(None),
            false => Ok(Some(mapped)),
        }
    }

    ///
    /// Map every record of `reader` into `writer`, skipping blank and header
    /// lines. Returns the number of lines written.
    ///
    pub fn run<R: BufRead, W: Write + ?Sized>(
        &mut self,
        reader: R,
        writer: &mut W,
    ) -> RegionSetResult<usize> {
        let mut written = 0;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() || is_header_line(&line) {
                continue;
            }
            if let Some(mapped) = self.map_line(&line, idx + 1)? {
                writeln!(writer, "{}", mapped)?;
                written += 1;
            }
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::utils::get_dynamic_reader;
    use std::path::Path;

    #[rstest]
    #[case(&[1.0, 2.0, 9.0], 1)]
    #[case(&[5.0], 0)]
    #[case(&[3.0, 1.0, 2.0], 2)]
    #[case(&[4.0, 0.0, 4.0, 0.0], 1)]
    #[case(&[7.0, 7.0, 7.0], 0)]
    fn test_centroid_index(#[case] scores: &[f64], #[case] expected: usize) {
        assert_eq!(centroid_index(scores), Some(expected));
    }

    #[rstest]
    fn test_centroid_index_empty() {
        assert_eq!(centroid_index(&[]), None);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 1)]
    fn test_invalid_exemplar_size(#[case] window: u32, #[case] bin_size: u32) {
        assert!(matches!(
            ReduceMap::new(window, bin_size),
            Err(RegionSetError::InvalidExemplarSize { .. })
        ));
    }

    #[rstest]
    fn test_exact_width_passes_through() {
        let mut rm = ReduceMap::new(10, 10).unwrap();
        assert_eq!(rm.exemplar_size(), 30);
        let mapped = rm.map_line("chr1\t100\t130\t2.5", 1).unwrap();
        assert_eq!(mapped, Some("chr1\t100\t130\t2.5".to_string()));
    }

    #[rstest]
    fn test_wide_record_picks_centroid_window() {
        let mut rm = ReduceMap::new(10, 10).unwrap();
        // mean is 4, so the score 3 at position 1 wins
        let mapped = rm.map_line("chr1\t0\t120\t1|3|8", 1).unwrap();
        assert_eq!(mapped, Some("chr1\t30\t60\t3.00000".to_string()));
    }

    #[rstest]
    fn test_window_clamped_to_record_end() {
        let mut rm = ReduceMap::new(10, 10).unwrap();
        // mean is 4, so the last score wins but only 5 bases remain past 90
        let mapped = rm.map_line("chr1\t0\t95\t0|0|0|4|16", 1).unwrap();
        assert_eq!(mapped, Some("chr1\t65\t95\t4.00000".to_string()));
    }

    #[rstest]
    fn test_repeated_source_range_is_dropped() {
        let mut rm = ReduceMap::new(10, 10).unwrap();
        assert!(rm.map_line("chr1\t0\t60\t1|2", 1).unwrap().is_some());
        assert_eq!(rm.map_line("chr1\t0\t60\t1|2", 2).unwrap(), None);
        assert!(rm.map_line("chr2\t0\t60\t1|2", 3).unwrap().is_some());
    }

    #[rstest]
    #[case("chr1\t0\t20\t1")]
    #[case("chr1\t0\t60")]
    #[case("chr1\t0\t60\t1|x")]
    #[case("chr1\t0\t60\t1|inf")]
    #[case("chr1\t60\t0\t1")]
    fn test_rejects_bad_records(#[case] record: &str) {
        let mut rm = ReduceMap::new(10, 10).unwrap();
        match rm.map_line(record, 4) {
            Err(RegionSetError::RegionParseError { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[rstest]
    fn test_reduce_map_fixture() {
        let reader = get_dynamic_reader(Path::new("../tests/data/selection/reduce_map.bed")).unwrap();
        let mut out: Vec<u8> = Vec::new();
        let written = ReduceMap::new(1000, 1000).unwrap().run(reader, &mut out).unwrap();

        assert_eq!(written, 4);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "chr1\t0\t3000\t5\n\
             chr1\t13000\t16000\t4.00000\n\
             chr1\t27000\t30000\t6.00000\n\
             chr2\t2000\t5000\t2\n"
        );
    }
}
