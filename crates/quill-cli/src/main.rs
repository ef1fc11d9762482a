use clap::Parser;
use quill_cli::{CliArgs, QuillCli};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let result = match QuillCli::from_args("quill", &args) {
        Ok(cli) => cli.run(args).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
