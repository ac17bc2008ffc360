use crate::error::Result;
use crate::similarity::{PairSimilarityReport, RatioResult, SimilarityMatrix};
use serde::Serialize;

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    status: &'static str,
    #[serde(flatten)]
    body: &'a T,
}

#[derive(Serialize)]
struct GroupBody<'a> {
    results: &'a [PairSimilarityReport],
}

#[derive(Serialize)]
struct PairBody<'a> {
    result: &'a PairSimilarityReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    ratio: Option<&'a RatioResult>,
}

#[derive(Serialize)]
struct MatrixBody<'a> {
    matrix: &'a SimilarityMatrix,
}

fn render<T: Serialize>(body: &T) -> Result<String> {
    let envelope = Envelope {
        status: "success",
        body,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Formats a work-group comparison as JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_group_json(results: &[PairSimilarityReport]) -> Result<String> {
    render(&GroupBody { results })
}

/// Formats a single pair comparison, with its raw-text ratio when given.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_pair_json(
    result: &PairSimilarityReport,
    ratio: Option<&RatioResult>,
) -> Result<String> {
    render(&PairBody { result, ratio })
}

/// Formats a cohort matrix as JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_matrix_json(matrix: &SimilarityMatrix) -> Result<String> {
    render(&MatrixBody { matrix })
}
