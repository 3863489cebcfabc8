//! Pick a strategy from a [SelectConfig] and run it on a RegionSet.
use log::info;

use exemplar_core::models::RegionSet;

use crate::config::{SelectConfig, Strategy};
use crate::errors::SelectResult;
use crate::greedy::GreedySelector;
use crate::models::{Selection, SelectionStats};
use crate::sampler::AliasSampler;
use crate::scheduler::select_optimal;

///
/// Run the configured strategy. Indices in the result refer to `rs`.
///
pub fn select(rs: &RegionSet, config: &SelectConfig) -> SelectResult<Selection> {
    info!(
        "Selecting from {} windows with the {} strategy",
        rs.len(),
        config.strategy
    );

    let requested = match config.strategy {
        Strategy::Optimal => config.k,
        _ => Some(config.capped_k()),
    };
    if rs.is_empty() || requested == Some(0) {
        return Ok(Selection::empty(requested));
    }

    let k = config.capped_k();
    match config.strategy {
        Strategy::Optimal => select_optimal(rs, config.k, config.offset_basis),
        Strategy::Greedy => {
            let selector = GreedySelector::new(config.window_span())
                .with_marking(config.marking())
                .with_bounds(config.bounds());
            Ok(selector.select(&rs.scores(), k))
        }
        Strategy::Relaxed => {
            let scores = rs.scores();
            let threshold = config.threshold(&scores)?;
            info!("Relaxing exclusion for scores of at least {}", threshold);
            let selector =
                GreedySelector::relaxed(config.window_span(), threshold, config.final_pass)
                    .with_marking(config.marking())
                    .with_bounds(config.bounds());
            Ok(selector.select(&scores, k))
        }
        Strategy::Alias => {
            let mut sampler = AliasSampler::new(&rs.scores(), config.seed)?;
            sampler.select(k, &config.rejection_options())
        }
    }
}

///
/// The windows a selection run worked on, and which of them it picked.
///
#[derive(Debug, Clone)]
pub struct Exemplars {
    pub regions: RegionSet,
    pub selection: Selection,
}

impl Exemplars {
    pub fn selected(&self) -> RegionSet {
        self.regions.subset(&self.selection.indices)
    }

    pub fn stats(&self, strategy: Strategy) -> SelectionStats {
        self.selection.stats(strategy, &self.regions.scores())
    }
}

///
/// Apply the configured window extension, if any, then select.
///
pub fn select_exemplars(rs: RegionSet, config: &SelectConfig) -> SelectResult<Exemplars> {
    let regions = match (config.extend, config.window_size) {
        (Some(extend), Some(window_size)) => {
            let extended = rs.extend_and_filter(extend, window_size);
            info!(
                "{} of {} windows kept after extending by {}",
                extended.len(),
                rs.len(),
                extend
            );
            extended
        }
        _ => rs,
    };
    let selection = select(&regions, config)?;
    Ok(Exemplars { regions, selection })
}
