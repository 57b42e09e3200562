use crate::process::ProcessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("gitの状態確認に失敗しました (exit code {code})\n{stderr}")]
    GitStatus { code: i32, stderr: String },
}

pub type Result<T> = std::result::Result<T, BuildError>;
