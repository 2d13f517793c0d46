use clap::Parser;
use extidy::cli::{Cli, run_cli};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Fatal errors land here; per-file failures are already rendered as
    // log lines by the time run_cli returns. Either way we exit normally.
    if let Err(e) = run_cli(&cli) {
        tracing::error!("{}", e);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("extidy=debug,warn")
    } else {
        EnvFilter::new("extidy=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
