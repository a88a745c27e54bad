//! azure-tenants binary entry point.

use std::process::ExitCode;

use azure_tenants::cli::{init_logging, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = cli.into_config();

    let mut stdout = std::io::stdout();
    match azure_tenants::app::run(&config, &mut stdout).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
