//! ctxvec CLI entry point

use clap::Parser;
use context_vector_cli::{init_tracing, run_cli, ContextCli};

fn main() {
    let cli = ContextCli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
