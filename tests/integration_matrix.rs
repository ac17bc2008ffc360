// tests/integration_matrix.rs
use codematch_core::{build_similarity_matrix, Comparator, MatrixCell, ScoringConfig, Submission};

fn all_placeholders(rows: &[Vec<String>]) -> bool {
    rows.iter().flatten().all(|cell| cell == "-")
}

#[test]
fn test_no_submissions_leaves_all_placeholders() {
    let m = build_similarity_matrix(["ann", "bob", "cy"], &[]);
    assert_eq!(m.members(), ["ann", "bob", "cy"]);
    assert!(all_placeholders(&m.display_rows()));
}

#[test]
fn test_single_submission_leaves_all_placeholders() {
    let subs = vec![Submission::new("w1", "bob", "print(x)")];
    let m = build_similarity_matrix(["ann", "bob", "cy"], &subs);
    assert!(all_placeholders(&m.display_rows()));
}

#[test]
fn test_self_cells_stay_placeholders() {
    let subs = vec![
        Submission::new("w1", "ann", "print(x)"),
        Submission::new("w2", "ann", "print(x)"),
        Submission::new("w3", "bob", "print(y)"),
    ];
    let m = build_similarity_matrix(["ann", "bob"], &subs);
    assert_eq!(m.get("ann", "ann"), Some(MatrixCell::Placeholder));
    assert_eq!(m.get("bob", "bob"), Some(MatrixCell::Placeholder));
    assert!(matches!(m.get("ann", "bob"), Some(MatrixCell::Percent(_))));
    assert!(matches!(m.get("bob", "ann"), Some(MatrixCell::Percent(_))));
}

#[test]
fn test_cells_render_two_decimals() {
    let subs = vec![
        Submission::new("w1", "ann", "abcd"),
        Submission::new("w2", "bob", "abxd"),
    ];
    let m = build_similarity_matrix(["ann", "bob"], &subs);
    assert_eq!(m.display_rows(), vec![vec!["-", "75.00%"], vec!["75.00%", "-"]]);
}

#[test]
fn test_parallel_and_sequential_agree() {
    let subs: Vec<Submission> = ["ann", "bob", "cy", "bob", "ann"]
        .iter()
        .enumerate()
        .map(|(i, who)| Submission::new(format!("w{i}"), *who, format!("print({i}) {}", "x".repeat(i))))
        .collect();
    let build = |parallel| {
        Comparator::new(ScoringConfig {
            parallel,
            ..ScoringConfig::default()
        })
        .build_matrix(["ann", "bob", "cy"], &subs)
    };
    assert_eq!(build(true), build(false));
}

#[test]
fn test_ratio_budget_leaves_cell_untouched() {
    let subs = vec![
        Submission::new("w1", "ann", "abcdefgh"),
        Submission::new("w2", "bob", "abcdefgh"),
    ];
    let cmp = Comparator::new(ScoringConfig {
        max_ratio_steps: 1,
        ..ScoringConfig::default()
    });
    let m = cmp.build_matrix(["ann", "bob"], &subs);
    assert_eq!(m.filled(), 0);
}

#[test]
fn test_later_budget_overrun_resets_earlier_cell() {
    let subs = vec![
        Submission::new("w1", "ann", "ab"),
        Submission::new("w2", "bob", "ab"),
        Submission::new("w3", "bob", "a".repeat(40)),
    ];
    let cmp = Comparator::new(ScoringConfig {
        max_ratio_steps: 10,
        autojunk: false,
        ..ScoringConfig::default()
    });
    // (w1, w2) writes 100% into (ann, bob), then (w1, w3) overruns
    let m = cmp.build_matrix(["ann", "bob"], &subs);
    assert_eq!(m.get("ann", "bob"), Some(MatrixCell::Placeholder));
    assert_eq!(m.get("bob", "ann"), Some(MatrixCell::Placeholder));
    assert_eq!(m.filled(), 0);
}
