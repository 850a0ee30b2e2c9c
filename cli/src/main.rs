use clap::Parser;
use intake_cli::{Cli, EXIT_INVALID, EXIT_OK, init_tracing};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage errors share the invalid-input exit code; --help and
            // --version succeed.
            let code = if err.use_stderr() { EXIT_INVALID } else { EXIT_OK };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    init_tracing(cli.global.verbose);
    let code = cli.run().await;
    std::process::exit(code);
}
