mod platform;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = platform::cli::Cli::parse();
    let report = platform::app::run_app(cli).await;
    println!("{}", report.status_line());
    if report.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
