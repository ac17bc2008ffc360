use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use tree_sitter::Language;

/// Reference grammar used to parse normalized submissions into syntax trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Grammar {
    #[default]
    Python,
    Rust,
    #[value(name = "typescript")]
    TypeScript,
}

impl Grammar {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "python" | "py" => Some(Self::Python),
            "rust" | "rs" => Some(Self::Rust),
            "typescript" | "ts" | "javascript" | "js" => Some(Self::TypeScript),
            _ => None,
        }
    }

    #[must_use]
    pub fn language(self) -> Language {
        match self {
            Self::Python => tree_sitter_python::language(),
            Self::Rust => tree_sitter_rust::language(),
            Self::TypeScript => tree_sitter_typescript::language_typescript(),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Rust => "rust",
            Self::TypeScript => "typescript",
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Grammar::from_name("rs"), Some(Grammar::Rust));
        assert_eq!(Grammar::from_name("Python"), Some(Grammar::Python));
        assert_eq!(Grammar::from_name("cobol"), None);
    }

    #[test]
    fn test_default_is_python() {
        assert_eq!(Grammar::default(), Grammar::Python);
    }
}
