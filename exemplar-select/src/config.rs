use std::fmt::{self, Display};
use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_K, DEFAULT_MAX_ATTEMPTS, DEFAULT_RELAXED_WINDOW_SPAN, DEFAULT_WINDOW_SPAN,
};
use crate::errors::{SelectError, SelectResult};
use crate::linearize::OffsetBasis;
use crate::occupancy::{MarkingPolicy, WindowBounds};
use crate::sampler::RejectionOptions;
use crate::threshold::percentile;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// exact weighted interval scheduling, then top-k
    #[default]
    Optimal,
    Greedy,
    /// greedy with a score threshold that overrides exclusion
    Relaxed,
    /// weighted sampling without replacement via an alias table
    Alias,
}

impl FromStr for Strategy {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "optimal" | "dp" => Ok(Strategy::Optimal),
            "greedy" => Ok(Strategy::Greedy),
            "relaxed" => Ok(Strategy::Relaxed),
            "alias" => Ok(Strategy::Alias),
            _ => Err(SelectError::UnknownVariant {
                kind: "strategy",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Optimal => "optimal",
            Strategy::Greedy => "greedy",
            Strategy::Relaxed => "relaxed",
            Strategy::Alias => "alias",
        };
        write!(f, "{}", name)
    }
}

///
/// Everything a selection run needs, loadable from TOML.
///
/// Fields left unset fall back to the defaults of the chosen strategy.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SelectConfig {
    pub strategy: Strategy,
    pub k: Option<usize>,
    pub window_span: Option<usize>,
    pub marking: Option<MarkingPolicy>,
    pub bounds: Option<WindowBounds>,
    /// fixed score threshold for the relaxed strategy
    pub kth_percentile: Option<f64>,
    /// derive the threshold from this percentile of the scores instead
    pub percentile: Option<f64>,
    pub final_pass: bool,
    pub max_attempts: usize,
    pub seed: Option<u64>,
    pub extend: Option<u32>,
    pub window_size: Option<u32>,
    pub offset_basis: OffsetBasis,
}

impl Default for SelectConfig {
    fn default() -> Self {
        SelectConfig {
            strategy: Strategy::default(),
            k: None,
            window_span: None,
            marking: None,
            bounds: None,
            kth_percentile: None,
            percentile: None,
            final_pass: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
            extend: None,
            window_size: None,
            offset_basis: OffsetBasis::default(),
        }
    }
}

impl TryFrom<&Path> for SelectConfig {
    type Error = SelectError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

impl SelectConfig {
    pub fn new(strategy: Strategy) -> Self {
        SelectConfig {
            strategy,
            ..Default::default()
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> SelectResult<Self> {
        SelectConfig::try_from(path.as_ref())
    }

    pub fn window_span(&self) -> usize {
        self.window_span.unwrap_or(match self.strategy {
            Strategy::Relaxed => DEFAULT_RELAXED_WINDOW_SPAN,
            _ => DEFAULT_WINDOW_SPAN,
        })
    }

    pub fn marking(&self) -> MarkingPolicy {
        self.marking.unwrap_or(match self.strategy {
            Strategy::Relaxed => MarkingPolicy::SingleIndex,
            _ => MarkingPolicy::FullWindow,
        })
    }

    pub fn bounds(&self) -> WindowBounds {
        self.bounds.unwrap_or(match self.strategy {
            Strategy::Relaxed => WindowBounds::Closed,
            _ => WindowBounds::HalfOpen,
        })
    }

    /// Subset size for the capped strategies
    pub fn capped_k(&self) -> usize {
        self.k.unwrap_or(DEFAULT_K)
    }

    ///
    /// Score threshold of the relaxed strategy: the fixed value when given,
    /// else the configured percentile of `scores`, else 0.
    ///
    pub fn threshold(&self, scores: &[f64]) -> SelectResult<f64> {
        if let Some(threshold) = self.kth_percentile {
            return Ok(threshold);
        }
        match self.percentile {
            Some(pct) => Ok(percentile(scores, pct)?.unwrap_or(0.0)),
            None => Ok(0.0),
        }
    }

    pub fn rejection_options(&self) -> RejectionOptions {
        RejectionOptions {
            window_span: self.window_span(),
            marking: self.marking(),
            bounds: self.bounds(),
            max_attempts: self.max_attempts,
        }
    }
}
