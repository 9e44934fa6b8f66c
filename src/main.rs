use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match repo_status::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
