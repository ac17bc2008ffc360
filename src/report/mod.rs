//! Output formatting for similarity reports.

pub mod json;
pub mod terminal;

use clap::ValueEnum;

pub use json::{format_group_json, format_matrix_json, format_pair_json};
pub use terminal::{format_group_terminal, format_matrix_terminal, format_pair_terminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}
