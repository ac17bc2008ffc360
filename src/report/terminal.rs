use crate::similarity::matrix::PLACEHOLDER;
use crate::similarity::types::Percent;
use crate::similarity::{
    MatrixCell, PairSimilarity, PairSimilarityReport, RatioResult, SimilarityMatrix,
};
use colored::Colorize;
use std::fmt::Write;

const RULE_WIDTH: usize = 70;

/// Formats a single pair comparison for terminal display.
#[must_use]
pub fn format_pair_terminal(report: &PairSimilarityReport, ratio: Option<&RatioResult>) -> String {
    let mut out = String::new();
    write_header(&mut out, " PAIR COMPARISON ");
    write_pair(&mut out, 1, report);
    if let Some(ratio) = ratio {
        let _ = writeln!(out, "   Raw text:  {}", colorize_line(ratio));
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "{}", "─".repeat(RULE_WIDTH).dimmed());
    out
}

/// Formats every pair of a work group in comparison order. With a
/// threshold, the summary counts pairs whose Jaccard score exceeds it.
#[must_use]
pub fn format_group_terminal(results: &[PairSimilarityReport], threshold: Option<f64>) -> String {
    let mut out = String::new();
    write_header(&mut out, " WORK GROUP CHECK ");

    let _ = writeln!(out, "   Pairs compared: {}", results.len().to_string().white());
    let degraded = results.iter().filter(|r| r.similarity.is_degraded()).count();
    if degraded > 0 {
        let _ = writeln!(out, "   Degraded pairs: {}", degraded.to_string().yellow());
    }
    if let Some(limit) = threshold {
        let flagged = results
            .iter()
            .filter(|r| r.similarity.jaccard_similarity > limit)
            .count();
        let count = if flagged == 0 {
            flagged.to_string().green()
        } else {
            flagged.to_string().red().bold()
        };
        let _ = writeln!(out, "   Above {}:  {count}", Percent(limit));
    }
    let _ = writeln!(out);

    if results.is_empty() {
        let _ = writeln!(out, "{}", "Nothing to compare: fewer than two submissions.".dimmed());
    }
    for (i, report) in results.iter().enumerate() {
        write_pair(&mut out, i + 1, report);
    }

    let _ = writeln!(out, "{}", "─".repeat(RULE_WIDTH).dimmed());
    out
}

/// Formats the cohort matrix as an aligned table.
#[must_use]
pub fn format_matrix_terminal(matrix: &SimilarityMatrix) -> String {
    let mut out = String::new();
    write_header(&mut out, " COHORT SIMILARITY MATRIX ");

    if matrix.members().is_empty() {
        let _ = writeln!(out, "{}", "No cohort members.".dimmed());
        return out;
    }

    let label_width = matrix
        .members()
        .iter()
        .map(|m| m.chars().count())
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = matrix
        .members()
        .iter()
        .map(|m| m.chars().count().max("100.00%".len()))
        .collect();

    let _ = write!(out, "{:label_width$}", "");
    for (member, width) in matrix.members().iter().zip(widths.iter().copied()) {
        let _ = write!(out, "  {}", format!("{member:>width$}").bold());
    }
    let _ = writeln!(out);

    for (member, cells) in matrix.rows() {
        let _ = write!(out, "{}", format!("{member:label_width$}").bold());
        for (cell, width) in cells.iter().zip(widths.iter().copied()) {
            let text = format!("{:>width$}", cell.to_string());
            let _ = write!(out, "  {}", colorize_cell(*cell, &text));
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "─".repeat(RULE_WIDTH).dimmed());
    out
}

fn write_header(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", "─".repeat(RULE_WIDTH).dimmed());
    let _ = writeln!(out, "{}", title.cyan().bold());
    let _ = writeln!(out, "{}", "─".repeat(RULE_WIDTH).dimmed());
    let _ = writeln!(out);
}

fn write_pair(out: &mut String, index: usize, report: &PairSimilarityReport) {
    let _ = writeln!(
        out,
        "{}. {} ({}) vs {} ({})",
        index,
        report.work_1.user.white().bold(),
        report.work_1.id.dimmed(),
        report.work_2.user.white().bold(),
        report.work_2.id.dimmed()
    );
    write_scores(out, &report.similarity);
    let _ = writeln!(out);
}

fn write_scores(out: &mut String, sim: &PairSimilarity) {
    let _ = writeln!(
        out,
        "   Jaccard:   {}",
        colorize_percent(sim.jaccard_similarity)
    );
    let _ = writeln!(out, "   LCS:       {}", format_optional(sim.lcs_similarity));
    let _ = writeln!(out, "   Tree:      {}", format_optional(sim.tree_similarity));
    for degradation in &sim.degradations {
        let _ = writeln!(out, "   {} {}", "note:".yellow(), degradation.explanation());
    }
}

fn format_optional(value: Option<usize>) -> String {
    value.map_or_else(|| PLACEHOLDER.dimmed().to_string(), |v| v.to_string().white().to_string())
}

fn colorize_percent(pct: f64) -> String {
    let text = Percent(pct).to_string();
    severity(pct, &text)
}

fn colorize_line(ratio: &RatioResult) -> String {
    match ratio.similarity_percentage {
        Some(pct) => severity(pct, &ratio.report),
        None => ratio.report.dimmed().to_string(),
    }
}

fn colorize_cell(cell: MatrixCell, text: &str) -> String {
    match cell.value() {
        Some(pct) => severity(pct, text),
        None => text.dimmed().to_string(),
    }
}

fn severity(pct: f64, text: &str) -> String {
    if pct >= 80.0 {
        text.red().bold().to_string()
    } else if pct >= 50.0 {
        text.yellow().to_string()
    } else {
        text.green().to_string()
    }
}
