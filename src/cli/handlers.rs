// src/cli/handlers.rs
use crate::cli::args::GlobalArgs;
use crate::config::Config;
use crate::discovery;
use crate::error::CodematchError;
use crate::exit::CodematchExit;
use crate::report::{self, OutputFormat};
use crate::similarity::types::Percent;
use crate::similarity::{Comparator, PairSimilarityReport, Submission};
use anyhow::{Context, Result};
use colored::Colorize;
use std::collections::BTreeSet;
use std::path::Path;

/// Loads config from `--config` (required) or `./codematch.toml` (optional)
/// and applies command-line overrides.
///
/// # Errors
/// Returns error if the config file cannot be read or parsed.
pub fn load_config(globals: &GlobalArgs) -> Result<Config> {
    let mut config = match &globals.config {
        Some(path) => {
            let mut config = Config::new();
            config
                .load_file(path, true)
                .with_context(|| format!("loading {}", path.display()))?;
            config
        }
        None => Config::load()?,
    };
    if let Some(grammar) = globals.grammar {
        config.scoring.grammar = grammar;
    }
    config.verbose = globals.verbose;
    tracing::debug!(scoring = ?config.scoring, "configuration resolved");
    Ok(config)
}

/// Handles the compare command.
///
/// # Errors
/// Returns error if either file cannot be loaded or output fails.
pub fn handle_compare(
    globals: &GlobalArgs,
    a: &Path,
    b: &Path,
    fail_above: Option<f64>,
) -> Result<CodematchExit> {
    let config = load_config(globals)?;
    let first = discovery::load_file(a)?;
    let second = discovery::load_file(b)?;

    let comparator = Comparator::new(config.scoring);
    let result = comparator.compare_pair(&first, &second);
    let ratio = comparator.ratio_result(&first, &second);

    match globals.format {
        OutputFormat::Json => println!("{}", report::format_pair_json(&result, Some(&ratio))?),
        OutputFormat::Terminal => print!("{}", report::format_pair_terminal(&result, Some(&ratio))),
    }

    Ok(threshold_exit(std::slice::from_ref(&result), fail_above))
}

/// Handles the check command: every unordered pair under `dir`.
///
/// # Errors
/// Returns error if discovery or output fails.
pub fn handle_check(globals: &GlobalArgs, dir: &Path, fail_above: Option<f64>) -> Result<CodematchExit> {
    let config = load_config(globals)?;
    let submissions = discovery::discover(dir)?;

    let comparator = Comparator::new(config.scoring);
    let results = comparator.compare_group(&submissions);
    log_cache_stats(&comparator);

    match globals.format {
        OutputFormat::Json => println!("{}", report::format_group_json(&results)?),
        OutputFormat::Terminal => print!("{}", report::format_group_terminal(&results, fail_above)),
    }

    Ok(threshold_exit(&results, fail_above))
}

/// Handles the matrix command.
///
/// # Errors
/// Returns error if discovery or output fails.
pub fn handle_matrix(globals: &GlobalArgs, dir: &Path, members: &[String]) -> Result<CodematchExit> {
    let config = load_config(globals)?;
    let submissions = match discovery::discover(dir) {
        Ok(submissions) => submissions,
        // an explicit cohort over an empty directory is an all-placeholder matrix
        Err(CodematchError::EmptyCohort(_)) if !members.is_empty() => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    let members = resolve_members(members, &submissions);
    let comparator = Comparator::new(config.scoring);
    let matrix = comparator.build_matrix(members, &submissions);

    match globals.format {
        OutputFormat::Json => println!("{}", report::format_matrix_json(&matrix)?),
        OutputFormat::Terminal => print!("{}", report::format_matrix_terminal(&matrix)),
    }

    Ok(CodematchExit::Success)
}

/// Explicit members as given, or every submitter found in sorted order.
#[must_use]
pub fn resolve_members(explicit: &[String], submissions: &[Submission]) -> Vec<String> {
    if explicit.is_empty() {
        let found: BTreeSet<&str> = submissions.iter().map(|s| s.submitter.as_str()).collect();
        return found.into_iter().map(str::to_owned).collect();
    }
    for member in explicit {
        if !submissions.iter().any(|s| &s.submitter == member) {
            tracing::warn!(%member, "cohort member has no submissions");
        }
    }
    explicit.to_vec()
}

fn threshold_exit(results: &[PairSimilarityReport], fail_above: Option<f64>) -> CodematchExit {
    let Some(limit) = fail_above else {
        return CodematchExit::Success;
    };
    let flagged = results
        .iter()
        .filter(|r| r.similarity.jaccard_similarity > limit)
        .count();
    if flagged == 0 {
        CodematchExit::Success
    } else {
        eprintln!("{}", fail_line(flagged, limit));
        CodematchExit::CheckFailed
    }
}

fn fail_line(flagged: usize, limit: f64) -> String {
    format!(
        "{} {flagged} pair(s) above {} Jaccard similarity",
        "[FAIL]".red().bold(),
        Percent(limit)
    )
}

fn log_cache_stats(comparator: &Comparator) {
    if let Some(cache) = comparator.cache() {
        let (hits, misses) = cache.stats();
        tracing::debug!(hits, misses, entries = cache.len(), "LCS cache");
    }
}
