use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("no such file: {}", .0.display())]
    Missing(PathBuf),
    #[error("{0}")]
    Spawn(#[from] std::io::Error),
    #[error("opener exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

fn opener_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Hand `path` to the desktop's default application for its type.
pub fn open_path(path: &Path) -> Result<(), OpenError> {
    if !path.exists() {
        return Err(OpenError::Missing(path.to_path_buf()));
    }

    let output = opener_command(path).output()?;
    if output.status.success() {
        Ok(())
    } else {
        Err(OpenError::Failed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
