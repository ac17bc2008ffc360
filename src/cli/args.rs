use crate::lang::Grammar;
use crate::report::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "codematch", version, about = "Code similarity checker for submitted work")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,
    /// Reference grammar for structural scoring (overrides config)
    #[arg(long, global = true, value_enum)]
    pub grammar: Option<Grammar>,
    /// Config file to read instead of ./codematch.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Log scoring decisions to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two files
    Compare {
        #[arg(value_name = "FILE_A")]
        a: PathBuf,
        #[arg(value_name = "FILE_B")]
        b: PathBuf,
        /// Exit with a failure code when Jaccard similarity exceeds PCT
        #[arg(long, value_name = "PCT")]
        fail_above: Option<f64>,
    },
    /// Compare every pair of submissions under a directory
    Check {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
        /// Exit with a failure code when any pair's Jaccard similarity exceeds PCT
        #[arg(long, value_name = "PCT")]
        fail_above: Option<f64>,
    },
    /// Build the cohort similarity matrix for a directory
    Matrix {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
        /// Cohort members (defaults to every submitter found)
        #[arg(long, value_delimiter = ',')]
        members: Vec<String>,
    },
}

/// Settings shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub format: OutputFormat,
    pub grammar: Option<Grammar>,
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn globals(&self) -> GlobalArgs {
        GlobalArgs {
            format: self.format,
            grammar: self.grammar,
            config: self.config.clone(),
            verbose: self.verbose,
        }
    }
}
