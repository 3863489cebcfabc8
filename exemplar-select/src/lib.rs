//! # Selection of well-separated, high-scoring genomic windows
//!
//! Given an ordered [RegionSet](exemplar_core::models::RegionSet) of scored
//! windows, pick a subset that scores well while keeping picks apart.
//! Four strategies are offered:
//!
//! - **optimal**: exact weighted interval scheduling over pairwise disjoint
//!   windows, optionally cut down to the `k` best.
//! - **greedy**: descending-score selection where each accepted window blocks
//!   its neighbours in a fixed index window.
//! - **relaxed**: greedy, but windows scoring above a threshold may ignore
//!   the block.
//! - **alias**: score-proportional random sampling with the same blocking,
//!   via a Walker alias table.
//!
//! ## Example
//! ```rust
//! use exemplar_core::models::RegionSet;
//! use exemplar_select::{SelectConfig, Strategy, select};
//!
//! let bed = "chr1\t0\t2\t10\nchr1\t1\t3\t1\nchr1\t2\t4\t10\n";
//! let rs = RegionSet::from_reader(bed.as_bytes()).unwrap();
//!
//! let config = SelectConfig::new(Strategy::Optimal);
//! let selection = select(&rs, &config).unwrap();
//! assert_eq!(selection.indices, vec![0, 2]);
//! ```
pub mod alias;
pub mod config;
pub mod consts;
pub mod errors;
pub mod greedy;
pub mod heap;
pub mod linearize;
pub mod models;
pub mod occupancy;
pub mod predecessor;
pub mod sampler;
pub mod scheduler;
pub mod strategy;
pub mod threshold;
pub mod validate;

// re-exports
pub use self::alias::AliasTable;
pub use self::config::{SelectConfig, Strategy};
pub use self::errors::{SelectError, SelectResult};
pub use self::greedy::{GreedySelector, Relaxation};
pub use self::linearize::{AbsoluteCoords, ChromOffsets, OffsetBasis, linearize};
pub use self::models::{Selection, SelectionStats};
pub use self::occupancy::{MarkingPolicy, OccupancyVector, WindowBounds};
pub use self::predecessor::disjoint_predecessors;
pub use self::sampler::{AliasSampler, RejectionOptions};
pub use self::scheduler::{Schedule, WeightedIntervalScheduler, select_optimal};
pub use self::strategy::{Exemplars, select, select_exemplars};
pub use self::threshold::percentile;
pub use self::validate::{SpacingViolation, is_disjoint, validate_spacing};
