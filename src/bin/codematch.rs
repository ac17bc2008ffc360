use clap::Parser;
use colored::Colorize;
use codematch_core::cli::{self, Cli};
use codematch_core::exit::CodematchExit;
use tracing_subscriber::EnvFilter;

fn main() -> CodematchExit {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let globals = cli.globals();
    let result = if let Some(cmd) = cli.command {
        cli::dispatch::execute(cmd, &globals)
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(CodematchExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            CodematchExit::for_error(&e)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CODEMATCH_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
