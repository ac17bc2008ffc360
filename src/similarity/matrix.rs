// src/similarity/matrix.rs
//! Cohort similarity matrix keyed by submitter on both axes.

use super::types::Percent;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Display text for cells with no comparison.
pub const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatrixCell {
    Placeholder,
    Percent(f64),
}

impl MatrixCell {
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Placeholder => None,
            Self::Percent(pct) => Some(*pct),
        }
    }
}

impl fmt::Display for MatrixCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder => f.write_str(PLACEHOLDER),
            Self::Percent(pct) => fmt::Display::fmt(&Percent(*pct), f),
        }
    }
}

impl Serialize for MatrixCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Square table over cohort members. Every cell starts as a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityMatrix {
    members: Vec<String>,
    cells: Vec<Vec<MatrixCell>>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SimilarityMatrix {
    /// All-placeholder matrix. Repeated members keep their first position.
    #[must_use]
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut index = HashMap::new();
        for member in members {
            let member = member.into();
            if !index.contains_key(&member) {
                index.insert(member.clone(), ordered.len());
                ordered.push(member);
            }
        }
        let n = ordered.len();
        Self {
            members: ordered,
            cells: vec![vec![MatrixCell::Placeholder; n]; n],
            index,
        }
    }

    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    #[must_use]
    pub fn contains(&self, member: &str) -> bool {
        self.index.contains_key(member)
    }

    #[must_use]
    pub fn get(&self, row: &str, col: &str) -> Option<MatrixCell> {
        let (r, c) = (self.index.get(row)?, self.index.get(col)?);
        self.cells.get(*r)?.get(*c).copied()
    }

    /// Overwrites the cell; returns false when either member is unknown.
    pub fn set(&mut self, row: &str, col: &str, cell: MatrixCell) -> bool {
        let (Some(&r), Some(&c)) = (self.index.get(row), self.index.get(col)) else {
            return false;
        };
        match self.cells.get_mut(r).and_then(|cells| cells.get_mut(c)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Rows in member order, paired with the row's member.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[MatrixCell])> + '_ {
        self.members
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter().map(Vec::as_slice))
    }

    /// Every cell as display text, row-major.
    #[must_use]
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }

    /// Number of cells holding a comparison.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.value().is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_placeholders() {
        let m = SimilarityMatrix::new(["ann", "bob", "cy"]);
        assert_eq!(m.members(), ["ann", "bob", "cy"]);
        assert!(m.display_rows().iter().flatten().all(|c| c == "-"));
        assert_eq!(m.filled(), 0);
    }

    #[test]
    fn test_duplicate_members_collapse() {
        let m = SimilarityMatrix::new(["ann", "bob", "ann"]);
        assert_eq!(m.members(), ["ann", "bob"]);
    }

    #[test]
    fn test_set_and_get() {
        let mut m = SimilarityMatrix::new(["ann", "bob"]);
        assert!(m.set("ann", "bob", MatrixCell::Percent(73.5)));
        assert!(!m.set("ann", "zed", MatrixCell::Percent(1.0)));
        assert_eq!(m.get("ann", "bob").map(|c| c.to_string()), Some("73.50%".into()));
        assert_eq!(m.get("bob", "ann"), Some(MatrixCell::Placeholder));
        assert_eq!(m.get("zed", "ann"), None);
    }

    #[test]
    fn test_serializes_display_strings() {
        let mut m = SimilarityMatrix::new(["a", "b"]);
        m.set("a", "b", MatrixCell::Percent(12.346));
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["members"], serde_json::json!(["a", "b"]));
        assert_eq!(json["cells"], serde_json::json!([["-", "12.35%"], ["-", "-"]]));
    }
}
