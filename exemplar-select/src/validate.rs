use std::fmt::{self, Display};

use exemplar_core::models::{Region, RegionSet};

///
/// Two consecutive regions on one chromosome that sit closer than the
/// required distance.
///
#[derive(Debug, Clone, PartialEq)]
pub struct SpacingViolation {
    pub first: Region,
    pub second: Region,
    pub distance: u32,
}

impl Display for SpacingViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Regions closer than {}: {}:{}-{} and {}:{}-{}",
            self.distance,
            self.first.chr,
            self.first.start,
            self.first.end,
            self.second.chr,
            self.second.start,
            self.second.end
        )
    }
}

///
/// Check that each region on a chromosome starts at least `distance` bases
/// after the previous one ends. Regions must be sorted by chromosome and
/// start; the first violation found is returned.
///
pub fn validate_spacing(rs: &RegionSet, distance: u32) -> Result<(), SpacingViolation> {
    for pair in rs.regions.windows(2) {
        let (first, second) = (&pair[0], &pair[1]);
        if first.chr != second.chr {
            continue;
        }
        let gap = second.start as i64 - first.end as i64;
        if gap < distance as i64 {
            return Err(SpacingViolation {
                first: first.clone(),
                second: second.clone(),
                distance,
            });
        }
    }
    Ok(())
}

///
/// Are the regions pairwise disjoint on their chromosomes?
///
pub fn is_disjoint(rs: &RegionSet) -> bool {
    rs.regions
        .windows(2)
        .all(|pair| !pair[0].overlaps(&pair[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn region(chr: &str, start: u32) -> Region {
        Region {
            chr: chr.to_string(),
            start,
            end: start + 1000,
            score: 1.0,
        }
    }

    #[rstest]
    fn test_well_spaced_regions_pass() {
        let rs = RegionSet::from(vec![
            region("chr1", 0),
            region("chr1", 25_000),
            region("chr2", 100),
            region("chr2", 30_000),
        ]);
        assert_eq!(validate_spacing(&rs, 24_000), Ok(()));
        assert!(is_disjoint(&rs));
    }

    #[rstest]
    fn test_first_violation_is_reported() {
        let rs = RegionSet::from(vec![
            region("chr1", 0),
            region("chr1", 10_000),
            region("chr1", 12_000),
        ]);
        let violation = validate_spacing(&rs, 20_000).unwrap_err();
        assert_eq!(violation.first.start, 0);
        assert_eq!(violation.second.start, 10_000);
        assert_eq!(
            violation.to_string(),
            "Regions closer than 20000: chr1:0-1000 and chr1:10000-11000"
        );
    }

    #[rstest]
    #[case(1000, true)]
    #[case(500, false)]
    fn test_zero_distance_allows_abutting_only(#[case] second_start: u32, #[case] ok: bool) {
        let rs = RegionSet::from(vec![region("chr1", 0), region("chr1", second_start)]);
        assert_eq!(validate_spacing(&rs, 0).is_ok(), ok);
    }

    #[rstest]
    fn test_chromosome_change_resets_spacing() {
        let rs = RegionSet::from(vec![region("chr1", 50_000), region("chr2", 0)]);
        assert!(validate_spacing(&rs, 25_000).is_ok());
    }

    #[rstest]
    fn test_unsorted_regions_fail() {
        let rs = RegionSet::from(vec![region("chr1", 50_000), region("chr1", 0)]);
        assert!(validate_spacing(&rs, 10).is_err());
    }

    #[rstest]
    fn test_overlapping_regions_are_not_disjoint() {
        let rs = RegionSet::from(vec![region("chr1", 0), region("chr1", 500)]);
        assert!(!is_disjoint(&rs));
    }
}
