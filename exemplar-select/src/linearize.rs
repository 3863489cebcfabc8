//! Map per-chromosome coordinates onto one absolute axis so windows on
//! different chromosomes can be compared as plain integers.
use std::fmt::{self, Display};
use std::str::FromStr;

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use exemplar_core::models::RegionSet;

use crate::errors::{SelectError, SelectResult};

///
/// How much room each chromosome takes on the absolute axis.
///
/// `MergedExtent` advances the offset by the end of the chromosome's last
/// merged block, so absolute intervals of different chromosomes never
/// overlap. `MergedWidth` advances it by the summed width of the merged
/// blocks, which can let a chromosome that does not start at 0 run into
/// the next one.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OffsetBasis {
    #[default]
    MergedExtent,
    MergedWidth,
}

impl FromStr for OffsetBasis {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extent" | "merged-extent" => Ok(OffsetBasis::MergedExtent),
            "width" | "merged-width" => Ok(OffsetBasis::MergedWidth),
            _ => Err(SelectError::UnknownVariant {
                kind: "offset basis",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for OffsetBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetBasis::MergedExtent => write!(f, "extent"),
            OffsetBasis::MergedWidth => write!(f, "width"),
        }
    }
}

///
/// Cumulative start offset of every chromosome, in order of first appearance.
///
#[derive(Debug, Clone)]
pub struct ChromOffsets {
    order: Vec<String>,
    offsets: FxHashMap<String, u64>,
}

impl ChromOffsets {
    pub fn from_region_set(rs: &RegionSet, basis: OffsetBasis) -> Self {
        let merged = rs.reduce();

        let mut order: Vec<String> = Vec::new();
        let mut room: FxHashMap<String, u64> = FxHashMap::default();

        // reduce() leaves each chromosome's blocks contiguous
        for block in &merged {
            let entry = room.entry(block.chr.clone()).or_insert_with(|| {
                order.push(block.chr.clone());
                0
            });
            *entry = match basis {
                OffsetBasis::MergedExtent => (*entry).max(block.end as u64),
                OffsetBasis::MergedWidth => *entry + block.width() as u64,
            };
        }

        let mut offsets: FxHashMap<String, u64> = FxHashMap::default();
        let mut cursor: u64 = 0;
        for chr in &order {
            offsets.insert(chr.clone(), cursor);
            cursor += room[chr];
        }

        ChromOffsets { order, offsets }
    }

    pub fn get(&self, chr: &str) -> Option<u64> {
        self.offsets.get(chr).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.order
            .iter()
            .map(|chr| (chr.as_str(), self.offsets[chr]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

///
/// Absolute start and end of every window, in input order
///
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AbsoluteCoords {
    pub starts: Vec<u64>,
    pub ends: Vec<u64>,
}

impl AbsoluteCoords {
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }
}

///
/// Linearize a RegionSet.
///
/// Fails with [SelectError::UnsortedCoordinates] if the absolute ends do not
/// come out non-decreasing, which happens when the input is not sorted by
/// chromosome and start.
///
pub fn linearize(rs: &RegionSet, basis: OffsetBasis) -> SelectResult<AbsoluteCoords> {
    let offsets = ChromOffsets::from_region_set(rs, basis);

    let mut coords = AbsoluteCoords {
        starts: Vec::with_capacity(rs.len()),
        ends: Vec::with_capacity(rs.len()),
    };
    for region in rs {
        // every chromosome of rs is present in its own reduction
        let offset = offsets.get(&region.chr).unwrap_or(0);
        coords.starts.push(offset + region.start as u64);
        coords.ends.push(offset + region.end as u64);
    }

    check_sorted_ends(&coords.ends)?;
    Ok(coords)
}

fn check_sorted_ends(ends: &[u64]) -> SelectResult<()> {
    match ends.windows(2).position(|w| w[1] < w[0]) {
        Some(pos) => Err(SelectError::UnsortedCoordinates {
            index: pos + 1,
            previous: ends[pos],
            current: ends[pos + 1],
        }),
        None => Ok(()),
    }
}
