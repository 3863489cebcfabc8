use std::collections::{HashMap, HashSet};
use std::fmt::{self, Display};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::errors::{RegionSetError, RegionSetResult};
use crate::models::Region;
use crate::utils::{get_dynamic_reader_w_stdin, get_dynamic_writer, is_header_line};

///
/// RegionSet struct, the ordered collection of scored windows read from a
/// BED4 file.
///
/// Input order is preserved: a region's position in `regions` is its
/// identity for every selection strategy, so the set is never re-sorted.
///
#[derive(Clone, Debug)]
pub struct RegionSet {
    pub regions: Vec<Region>,
    pub header: Option<String>,
    pub path: Option<PathBuf>,
}

impl RegionSet {
    ///
    /// Read a RegionSet from any buffered reader of BED4 text.
    ///
    /// Header lines (`#`, `track`, `browser`) and blank lines are kept out
    /// of the regions; every other line must be a valid record.
    ///
    pub fn from_reader<R: BufRead>(reader: R) -> RegionSetResult<Self> {
        let mut regions: Vec<Region> = Vec::new();
        let mut header = String::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if is_header_line(&line) {
                if !header.is_empty() {
                    header.push('\n');
                }
                header.push_str(&line);
                continue;
            }
            regions.push(Region::from_bed_line(&line, idx + 1)?);
        }

        Ok(RegionSet {
            regions,
            header: match header.is_empty() {
                true => None,
                false => Some(header),
            },
            path: None,
        })
    }

    ///
    /// Save a regionset as BED4, gzip'd when the file name ends in `.gz`.
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    pub fn to_bed<T: AsRef<Path>>(&self, path: T) -> RegionSetResult<()> {
        let path = path.as_ref();
        if path.exists() {
            log::warn!("Bed file already exists. Overwriting {}", path.display());
        }
        let mut writer = get_dynamic_writer(Some(path))?;
        self.write_bed(&mut writer)?;
        writer.finish()?;
        Ok(())
    }

    ///
    /// Write every region as one BED4 line
    ///
    pub fn write_bed<W: Write + ?Sized>(&self, writer: &mut W) -> std::io::Result<()> {
        for region in &self.regions {
            writeln!(writer, "{}", region.as_string())?;
        }
        Ok(())
    }

    ///
    /// Iterate unique chromosomes in order of first appearance
    ///
    pub fn iter_chroms(&self) -> impl Iterator<Item = &String> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.regions
            .iter()
            .filter(move |&r| seen.insert(r.chr.as_str()))
            .map(|r| &r.chr)
    }

    ///
    /// Rank of every chromosome by first appearance
    ///
    fn chrom_ranks(&self) -> HashMap<&str, usize> {
        let mut ranks: HashMap<&str, usize> = HashMap::new();
        for region in &self.regions {
            let next = ranks.len();
            ranks.entry(region.chr.as_str()).or_insert(next);
        }
        ranks
    }

    ///
    /// Scores of all regions, in input order
    ///
    pub fn scores(&self) -> Vec<f64> {
        self.regions.iter().map(|r| r.score).collect()
    }

    ///
    /// Merge overlapping and adjacent regions per chromosome.
    ///
    /// Chromosomes keep their order of first appearance and regions within
    /// a chromosome are ordered by start. Merged regions carry the maximum
    /// score of their members.
    ///
    pub fn reduce(&self) -> RegionSet {
        let ranks = self.chrom_ranks();
        let mut sorted: Vec<(usize, &Region)> = self
            .regions
            .iter()
            .map(|r| (ranks[r.chr.as_str()], r))
            .collect();
        sorted.sort_by_key(|(rank, r)| (*rank, r.start, r.end));

        let mut sorted = sorted.into_iter();
        let Some((mut current_rank, first)) = sorted.next() else {
            return RegionSet::from(Vec::<Region>::new());
        };
        let mut current = first.clone();
        let mut merged: Vec<Region> = Vec::new();

        for (rank, r) in sorted {
            if rank == current_rank && r.start <= current.end {
                // overlapping or adjacent -- extend
                current.end = current.end.max(r.end);
                current.score = current.score.max(r.score);
            } else {
                merged.push(current);
                current = r.clone();
                current_rank = rank;
            }
        }
        merged.push(current);

        RegionSet::from(merged)
    }

    ///
    /// Widen every region by `extend` bases on both sides and keep only
    /// those whose width is exactly `2 * extend + window_size`.
    ///
    /// Windows near a chromosome start are clamped at 0 and therefore
    /// dropped by the width filter.
    ///
    pub fn extend_and_filter(&self, extend: u32, window_size: u32) -> RegionSet {
        let span = extend
            .saturating_mul(2)
            .saturating_add(window_size);

        let regions: Vec<Region> = self
            .regions
            .iter()
            .map(|r| r.extend(extend))
            .filter(|r| r.width() == span)
            .collect();

        RegionSet {
            regions,
            header: self.header.clone(),
            path: self.path.clone(),
        }
    }

    ///
    /// Build a new RegionSet from the regions at `indices`, in the order given
    ///
    pub fn subset(&self, indices: &[usize]) -> RegionSet {
        let regions = indices
            .iter()
            .filter_map(|&i| self.regions.get(i).cloned())
            .collect();

        RegionSet {
            regions,
            header: self.header.clone(),
            path: self.path.clone(),
        }
    }

    ///
    /// Is regionSet empty?
    ///
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    ///
    /// Get number of regions in RegionSet
    ///
    pub fn len(&self) -> usize {
        self.regions.len()
    }
}

impl TryFrom<&Path> for RegionSet {
    type Error = RegionSetError;

    ///
    /// Create a new [RegionSet] from a BED4 file.
    ///
    /// # Arguments:
    /// - value: path to bed file on disk, optionally gzip'd, or `-` for stdin.
    fn try_from(value: &Path) -> RegionSetResult<Self> {
        let path_str = value.to_string_lossy();
        let reader = get_dynamic_reader_w_stdin(&path_str)?;

        let mut rs = RegionSet::from_reader(reader)?;
        if rs.is_empty() {
            return Err(RegionSetError::EmptyRegionSet(value.display().to_string()));
        }
        rs.path = Some(value.to_owned());

        Ok(rs)
    }
}

impl TryFrom<&str> for RegionSet {
    type Error = RegionSetError;

    fn try_from(value: &str) -> RegionSetResult<Self> {
        RegionSet::try_from(Path::new(value))
    }
}

impl TryFrom<PathBuf> for RegionSet {
    type Error = RegionSetError;

    fn try_from(value: PathBuf) -> RegionSetResult<Self> {
        RegionSet::try_from(value.as_path())
    }
}

impl From<Vec<Region>> for RegionSet {
    fn from(regions: Vec<Region>) -> Self {
        RegionSet {
            regions,
            header: None,
            path: None,
        }
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

impl Display for RegionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionSet with {} regions.", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/selection")
            .join(file_name)
    }

    fn region(chr: &str, start: u32, end: u32, score: f64) -> Region {
        Region {
            chr: chr.to_string(),
            start,
            end,
            score,
        }
    }

    #[rstest]
    fn test_open_from_path() {
        let rs = RegionSet::try_from(get_test_path("windows.bed")).unwrap();
        assert_eq!(rs.len(), 12);
        assert_eq!(rs.regions[0], region("chr1", 0, 2000, 1.0));
    }

    #[rstest]
    fn test_open_bed_gz() {
        let rs = RegionSet::try_from(get_test_path("windows.bed.gz")).unwrap();
        assert_eq!(rs.len(), 12);
    }

    #[rstest]
    fn test_read_headers() {
        let rs = RegionSet::try_from(get_test_path("headers.bed")).unwrap();
        assert!(rs.header.is_some());
        assert_eq!(rs.len(), 3);
    }

    #[rstest]
    fn test_malformed_record_reports_line() {
        let result = RegionSet::try_from(get_test_path("malformed.bed"));
        match result {
            Err(RegionSetError::RegionParseError { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[rstest]
    #[case("chr1\t0\t10\tinf\nchr1\t5\t15\t1\nchr1\t10\t20\tinf\n", 1)]
    #[case("chr1\t0\t10\t2\nchr1\t5\t15\t-inf\n", 2)]
    fn test_infinite_scores_are_rejected(#[case] text: &str, #[case] bad_line: usize) {
        match RegionSet::from_reader(text.as_bytes()) {
            Err(RegionSetError::RegionParseError { line, .. }) => assert_eq!(line, bad_line),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[rstest]
    fn test_empty_file_is_an_error() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("empty.bed");
        std::fs::write(&path, "# only a header\n").unwrap();
        assert!(matches!(
            RegionSet::try_from(path.as_path()),
            Err(RegionSetError::EmptyRegionSet(_))
        ));
    }

    #[rstest]
    fn test_input_order_is_preserved() {
        let text = "chr2\t0\t10\t1\nchr1\t0\t10\t2\n";
        let rs = RegionSet::from_reader(text.as_bytes()).unwrap();
        assert_eq!(rs.regions[0].chr, "chr2");
        assert_eq!(rs.iter_chroms().collect::<Vec<_>>(), vec!["chr2", "chr1"]);
    }

    #[rstest]
    fn test_reduce_merges_per_chromosome() {
        let rs = RegionSet::from(vec![
            region("chr1", 0, 10, 1.0),
            region("chr1", 5, 20, 4.0),
            region("chr1", 20, 25, 2.0),
            region("chr1", 40, 50, 1.0),
            region("chr2", 0, 10, 3.0),
        ]);
        let merged = rs.reduce();
        assert_eq!(
            merged.regions,
            vec![
                region("chr1", 0, 25, 4.0),
                region("chr1", 40, 50, 1.0),
                region("chr2", 0, 10, 3.0),
            ]
        );
    }

    #[rstest]
    fn test_reduce_interleaved_chromosomes() {
        let rs = RegionSet::from(vec![
            region("chr2", 50, 60, 1.0),
            region("chr1", 30, 40, 2.0),
            region("chr2", 0, 55, 5.0),
            region("chr1", 0, 10, 3.0),
            region("chr1", 10, 20, 1.0),
            region("chr3", 0, 5, 0.5),
            region("chr2", 100, 110, 2.0),
        ]);
        let merged = rs.reduce();
        assert_eq!(
            merged.regions,
            vec![
                region("chr2", 0, 60, 5.0),
                region("chr2", 100, 110, 2.0),
                region("chr1", 0, 20, 3.0),
                region("chr1", 30, 40, 2.0),
                region("chr3", 0, 5, 0.5),
            ]
        );
    }

    #[rstest]
    fn test_reduce_does_not_merge_across_chromosomes() {
        let rs = RegionSet::from(vec![region("chr1", 0, 100, 1.0), region("chr2", 50, 150, 2.0)]);
        assert_eq!(rs.reduce().len(), 2);
        assert!(RegionSet::from(Vec::<Region>::new()).reduce().is_empty());
    }

    #[rstest]
    fn test_extend_and_filter_drops_clamped_windows() {
        let rs = RegionSet::from(vec![
            region("chr1", 0, 1000, 1.0),
            region("chr1", 1000, 2000, 2.0),
            region("chr1", 2000, 3000, 3.0),
        ]);
        let extended = rs.extend_and_filter(1000, 1000);
        assert_eq!(
            extended.regions,
            vec![
                region("chr1", 0, 3000, 2.0),
                region("chr1", 1000, 4000, 3.0),
            ]
        );
    }

    #[rstest]
    fn test_subset_and_write() {
        let rs = RegionSet::from(vec![
            region("chr1", 0, 10, 1.0),
            region("chr1", 10, 20, 2.5),
            region("chr1", 20, 30, 3.0),
        ]);
        let picked = rs.subset(&[0, 2]);
        let mut out: Vec<u8> = Vec::new();
        picked.write_bed(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "chr1\t0\t10\t1\nchr1\t20\t30\t3\n");
    }

    #[rstest]
    fn test_save_bed_round_trip() {
        let rs = RegionSet::try_from(get_test_path("windows.bed")).unwrap();
        let tempdir = tempfile::tempdir().unwrap();
        let new_file_path = tempdir.path().join("nested").join("copy.bed.gz");

        assert!(rs.to_bed(new_file_path.as_path()).is_ok());

        let reloaded = RegionSet::try_from(new_file_path.as_path()).unwrap();
        assert_eq!(reloaded.regions, rs.regions);
    }

    #[rstest]
    fn test_scores() {
        let rs = RegionSet::from(vec![region("chr1", 0, 10, 1.5), region("chr1", 5, 15, 0.5)]);
        assert_eq!(rs.scores(), vec![1.5, 0.5]);
        assert_eq!(format!("{}", rs), "RegionSet with 2 regions.");
    }
}
