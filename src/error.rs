#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Could not run git. Is it installed?")]
    GitUnavailable,

    #[error("Must be run inside of a git repository.")]
    NotARepository,

    #[error("git status failed: {0}")]
    StatusCommand(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
