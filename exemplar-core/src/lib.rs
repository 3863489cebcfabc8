//! Core models for exemplar.
//!
//! Scored genomic windows are read from BED4 files (`chr start end score`)
//! into a [`models::RegionSet`] whose order is the identity every selection
//! strategy works with.
//!
//! ```
//! use exemplar_core::models::RegionSet;
//!
//! let text = "chr1\t0\t2000\t1.5\nchr1\t1000\t3000\t4.0\n";
//! let rs = RegionSet::from_reader(text.as_bytes()).unwrap();
//! assert_eq!(rs.len(), 2);
//! assert_eq!(rs.scores(), vec![1.5, 4.0]);
//! ```

pub mod consts;
pub mod errors;
pub mod models;
pub mod reduce_map;
pub mod utils;
