use std::fmt::{self, Display};

use crate::errors::{RegionSetError, RegionSetResult};

///
/// Region struct, one scored window of a BED4 file
///
#[derive(PartialEq, Debug, Clone)]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    pub score: f64,
}

impl Region {
    ///
    /// Parse one tab-delimited `chr start end score` record.
    ///
    /// Columns beyond the fourth are ignored. `line` is the 1-based line
    /// number used in error messages.
    ///
    pub fn from_bed_line(record: &str, line: usize) -> RegionSetResult<Self> {
        let parse_error = |message: String| RegionSetError::RegionParseError { line, message };

        let mut fields = record.split('\t');

        let chr = fields
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| parse_error("missing chromosome field".to_string()))?;
        let start_str = fields
            .next()
            .ok_or_else(|| parse_error("missing start field".to_string()))?;
        let end_str = fields
            .next()
            .ok_or_else(|| parse_error("missing end field".to_string()))?;
        let score_str = fields
            .next()
            .ok_or_else(|| parse_error("missing score field".to_string()))?;

        let start = start_str
            .trim()
            .parse::<u32>()
            .map_err(|_| parse_error(format!("start is not an integer: {:?}", start_str)))?;
        let end = end_str
            .trim()
            .parse::<u32>()
            .map_err(|_| parse_error(format!("end is not an integer: {:?}", end_str)))?;
        let score = score_str
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            .ok_or_else(|| parse_error(format!("score is not a finite number: {:?}", score_str)))?;

        if end < start {
            return Err(parse_error(format!("end ({}) is before start ({})", end, start)));
        }

        Ok(Region {
            chr: chr.to_string(),
            start,
            end,
            score,
        })
    }

    ///
    /// Get length of the region
    ///
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    ///
    /// Widen the region by `extend` bases on both sides. The start is
    /// clamped at 0, so windows near a chromosome start come out narrower.
    ///
    pub fn extend(&self, extend: u32) -> Region {
        Region {
            chr: self.chr.clone(),
            start: self.start.saturating_sub(extend),
            end: self.end.saturating_add(extend),
            score: self.score,
        }
    }

    /// Half-open overlap test; abutting regions do not overlap.
    pub fn overlaps(&self, other: &Region) -> bool {
        self.chr == other.chr && self.start < other.end && other.start < self.end
    }

    ///
    /// Get file string of Region
    ///
    pub fn as_string(&self) -> String {
        format!("{}\t{}\t{}\t{}", self.chr, self.start, self.end, self.score)
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
