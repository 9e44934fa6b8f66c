pub mod error;
pub mod git;

use tracing_subscriber::EnvFilter;

use error::AppError;

/// Report the structured git status of the current working directory.
///
/// Check order: git must be spawnable, the directory must be a repository
/// root, then a single `git status` invocation is parsed and printed. Each
/// external call is attempted exactly once.
pub async fn run() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("repo_status=info")),
        )
        .init();

    println!("args {:?}", std::env::args().collect::<Vec<_>>());

    if !git::is_git_installed().await {
        return Err(AppError::GitUnavailable);
    }

    let cwd = std::env::current_dir()?;
    if !git::is_git_repository(&cwd) {
        return Err(AppError::NotARepository);
    }

    let status = git::read_status_for_dir(&cwd).await?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
