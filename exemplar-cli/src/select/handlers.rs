use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use exemplar_core::models::RegionSet;
use exemplar_select::{SelectConfig, Selection, select_exemplars};

use crate::output::{load_input, write_output};

/// Layer command line flags over the config (file or default).
///
/// Returns `false` when a negative `k` or window span asks for nothing.
fn apply_overrides(config: &mut SelectConfig, matches: &ArgMatches) -> Result<bool> {
    let mut wants_something = true;

    if let Some(strategy) = matches.get_one::<String>("strategy") {
        config.strategy = strategy.parse()?;
    }
    if let Some(&k) = matches.get_one::<i64>("k") {
        match usize::try_from(k) {
            Ok(k) => config.k = Some(k),
            Err(_) => wants_something = false,
        }
    }
    if let Some(&span) = matches.get_one::<i64>("window-span") {
        match usize::try_from(span) {
            Ok(span) => config.window_span = Some(span),
            Err(_) => wants_something = false,
        }
    }
    if let Some(marking) = matches.get_one::<String>("marking") {
        config.marking = Some(marking.parse()?);
    }
    if let Some(bounds) = matches.get_one::<String>("bounds") {
        config.bounds = Some(bounds.parse()?);
    }
    if let Some(&threshold) = matches.get_one::<f64>("kth-percentile") {
        config.kth_percentile = Some(threshold);
    }
    if let Some(&pct) = matches.get_one::<f64>("percentile") {
        config.percentile = Some(pct);
    }
    if matches.get_flag("final-pass") {
        config.final_pass = true;
    }
    if let Some(&attempts) = matches.get_one::<usize>("max-attempts") {
        config.max_attempts = attempts;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(seed);
    }
    if let (Some(&extend), Some(&window_size)) = (
        matches.get_one::<u32>("extend"),
        matches.get_one::<u32>("window-size"),
    ) {
        config.extend = Some(extend);
        config.window_size = Some(window_size);
    }
    if let Some(basis) = matches.get_one::<String>("offset-basis") {
        config.offset_basis = basis.parse()?;
    }

    Ok(wants_something)
}

fn spinner() -> Option<ProgressBar> {
    if !log::log_enabled!(log::Level::Info) {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg}")
            .ok()?
            .tick_strings(&["-", "\\", "|", "/"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    Some(spinner)
}

pub fn run_select(matches: &ArgMatches) -> Result<()> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => SelectConfig::from_file(path)
            .with_context(|| format!("Failed to load config file {}", path))?,
        None => SelectConfig::default(),
    };
    let wants_something = apply_overrides(&mut config, matches)?;

    let input = matches
        .get_one::<String>("input")
        .expect("--input is required");
    let output = matches.get_one::<String>("output");

    if !wants_something {
        info!("Negative k or window span requested; selecting nothing");
        write_output(&RegionSet::from(vec![]), output)?;
        if matches.get_flag("stats") {
            let stats = Selection::empty(None).stats(config.strategy, &[]);
            eprintln!("{}", serde_json::to_string_pretty(&stats)?);
        }
        return Ok(());
    }

    let rs = load_input(input)?;

    let spinner = spinner();
    if let Some(spinner) = &spinner {
        spinner.set_message(format!("Running {} selection...", config.strategy));
    }
    let result = select_exemplars(rs, &config);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let exemplars = result.with_context(|| format!("{} selection failed", config.strategy))?;

    write_output(&exemplars.selected(), output)?;

    if matches.get_flag("stats") {
        let stats = exemplars.stats(config.strategy);
        eprintln!("{}", serde_json::to_string_pretty(&stats)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use exemplar_select::{MarkingPolicy, OffsetBasis, Strategy};
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::select::cli::create_select_cli;

    fn overrides(args: &[&str]) -> (SelectConfig, bool) {
        let mut argv = vec!["select", "--input", "x.bed"];
        argv.extend_from_slice(args);
        let matches = create_select_cli().try_get_matches_from(argv).unwrap();
        let mut config = SelectConfig::default();
        let wants_something = apply_overrides(&mut config, &matches).unwrap();
        (config, wants_something)
    }

    #[rstest]
    fn test_flags_override_defaults() {
        let (config, wants_something) = overrides(&[
            "--strategy",
            "relaxed",
            "--k",
            "5",
            "--marking",
            "full",
            "--percentile",
            "90",
            "--offset-basis",
            "width",
        ]);
        assert!(wants_something);
        assert_eq!(config.strategy, Strategy::Relaxed);
        assert_eq!(config.k, Some(5));
        assert_eq!(config.marking(), MarkingPolicy::FullWindow);
        assert_eq!(config.percentile, Some(90.0));
        assert_eq!(config.offset_basis, OffsetBasis::MergedWidth);
        assert_eq!(config.window_span(), 10);
    }

    #[rstest]
    #[case(&["--k", "-1"])]
    #[case(&["--window-span", "-3"])]
    fn test_negative_values_select_nothing(#[case] args: &[&str]) {
        let (_, wants_something) = overrides(args);
        assert!(!wants_something);
    }

    #[rstest]
    fn test_extend_requires_window_size() {
        let result =
            create_select_cli().try_get_matches_from(["select", "--input", "x.bed", "--extend", "10"]);
        assert!(result.is_err());
    }
}
