pub mod parser;
pub mod types;

use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::{ChildStdout, Command};
use tracing::{error, info};

use crate::error::AppError;
use parser::StatusParser;
use types::RepositoryStatus;

/// True if the `git` binary can be spawned at all.
///
/// A failing exit code still counts as installed; only a spawn failure
/// (binary missing, permission denied) does not.
pub async fn is_git_installed() -> bool {
    match Command::new("git")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(mut child) => {
            let _ = child.wait().await;
            true
        }
        Err(_) => false,
    }
}

/// A directory is a repository root when it carries a `.git` metadata dir.
pub fn is_git_repository(dir: &Path) -> bool {
    dir.join(".git").exists()
}

/// Run `git status -uall` in `dir` and parse the report into a
/// [`RepositoryStatus`].
///
/// Stdout is streamed into the parser chunk by chunk; stderr is collected
/// separately. Any stderr output fails the whole invocation with the
/// diagnostic text verbatim, no matter how far parsing got.
pub async fn read_status_for_dir(dir: &Path) -> Result<RepositoryStatus, AppError> {
    info!(dir = %dir.display(), "Reading git status");

    let mut child = Command::new("git")
        .args(["status", "-uall"])
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| AppError::StatusCommand("stdout not captured".into()))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| AppError::StatusCommand("stderr not captured".into()))?;

    let mut parser = StatusParser::new();
    let mut diagnostics = Vec::new();

    // Drain both pipes before waiting so neither can fill up and stall git.
    let (out_res, err_res) = tokio::join!(
        feed_parser(&mut stdout, &mut parser),
        stderr.read_to_end(&mut diagnostics),
    );
    out_res?;
    err_res?;
    child.wait().await?;

    if !diagnostics.is_empty() {
        let diagnostics = String::from_utf8_lossy(&diagnostics).into_owned();
        error!(dir = %dir.display(), stderr = %diagnostics, "git status failed");
        return Err(AppError::StatusCommand(diagnostics));
    }

    Ok(parser.finish())
}

async fn feed_parser(stdout: &mut ChildStdout, parser: &mut StatusParser) -> std::io::Result<()> {
    let mut buf = [0u8; 4096];
    loop {
        match stdout.read(&mut buf).await {
            Ok(0) => return Ok(()),
            Ok(n) => parser.push_chunk(&buf[..n]),
            Err(e) => return Err(e),
        }
    }
}
