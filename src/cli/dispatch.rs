//! Command dispatch, kept out of the binary.

use super::args::{Commands, GlobalArgs};
use super::handlers::{handle_check, handle_compare, handle_matrix};
use crate::exit::CodematchExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands, globals: &GlobalArgs) -> Result<CodematchExit> {
    match command {
        Commands::Compare { a, b, fail_above } => handle_compare(globals, &a, &b, fail_above),
        Commands::Check { dir, fail_above } => handle_check(globals, &dir, fail_above),
        Commands::Matrix { dir, members } => handle_matrix(globals, &dir, &members),
    }
}
