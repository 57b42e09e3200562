//! 外部コマンド実行層
//!
//! 実処理はすべてgit / docker CLIへの委譲であるため、起動失敗・異常終了・
//! 出力の解釈不能をここで区別して構造化します。

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(
        "コマンドが見つかりません: {program}\nヒント: {program} がインストールされているか確認してください"
    )]
    ToolNotFound { program: String },

    #[error("コマンドの起動に失敗しました: {program}\n理由: {source}")]
    Spawn { program: String, source: io::Error },

    #[error("コマンドが異常終了しました: {program} (exit code {code})\n{detail}")]
    CommandFailed {
        program: String,
        code: i32,
        detail: String,
    },

    #[error("コマンド出力を解釈できません: {program}\n理由: {message}")]
    MalformedOutput { program: String, message: String },
}

pub type Result<T> = std::result::Result<T, ProcessError>;

/// キャプチャモードの実行結果
#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

fn spawn_error(program: &str, source: io::Error) -> ProcessError {
    if source.kind() == io::ErrorKind::NotFound {
        ProcessError::ToolNotFound {
            program: program.to_string(),
        }
    } else {
        ProcessError::Spawn {
            program: program.to_string(),
            source,
        }
    }
}

/// 出力をキャプチャして実行
///
/// 終了ステータスの判定は呼び出し側の責務（`git diff --quiet` のように
/// 非ゼロが正常な問い合わせ結果であるコマンドがあるため）。
pub fn run_capture(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<Captured> {
    debug!(program = %program, args = ?args, "Running external command (capture)");

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().map_err(|e| spawn_error(program, e))?;

    Ok(Captured {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// 出力をキャプチャして実行し、非ゼロ終了をエラーとして扱う
pub fn run_checked(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<Captured> {
    let captured = run_capture(program, args, cwd)?;

    if !captured.status.success() {
        return Err(ProcessError::CommandFailed {
            program: program.to_string(),
            code: captured.status.code().unwrap_or(1),
            detail: captured.stderr.trim().to_string(),
        });
    }

    Ok(captured)
}

/// 標準入出力を引き継いだまま、組み立て済みコマンドを実行
///
/// `docker login` のような対話コマンドと、進捗をそのまま見せたい
/// ビルド本体に使う。終了ステータスを返し、成否判定は呼び出し側で行う。
pub fn run_status(label: &str, cmd: &mut Command) -> Result<ExitStatus> {
    debug!(program = %label, "Running external command (interactive)");

    cmd.status().map_err(|e| spawn_error(label, e))
}

/// 標準入出力を引き継いで実行
pub fn run_interactive(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<ExitStatus> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    run_status(program, &mut cmd)
}

/// 対話実行の終了ステータスを検査
///
/// 子プロセスの出力は既に端末へ流れているため、詳細はそちらへ誘導する。
pub fn ensure_success(program: &str, status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }

    Err(ProcessError::CommandFailed {
        program: program.to_string(),
        code: status.code().unwrap_or(1),
        detail: "詳細は直前の出力を確認してください".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_capture_missing_tool() {
        let result = run_capture("forgeflow-no-such-tool", &[], None);

        assert!(matches!(
            result,
            Err(ProcessError::ToolNotFound { program }) if program == "forgeflow-no-such-tool"
        ));
    }

    #[test]
    fn test_run_checked_captures_stdout() {
        let captured = run_checked("echo", &["hello"], None).unwrap();

        assert_eq!(captured.stdout.trim(), "hello");
        assert!(captured.status.success());
    }

    #[test]
    fn test_run_checked_nonzero_is_error() {
        // `false` は常に終了コード1で終わる
        let result = run_checked("false", &[], None);

        assert!(matches!(
            result,
            Err(ProcessError::CommandFailed { code: 1, .. })
        ));
    }

    #[test]
    fn test_run_capture_nonzero_is_ok() {
        let captured = run_capture("false", &[], None).unwrap();

        assert_eq!(captured.status.code(), Some(1));
    }

    #[test]
    fn test_ensure_success_passes_through_code() {
        let status = run_interactive("sh", &["-c", "exit 42"], None).unwrap();
        let result = ensure_success("sh", status);

        assert!(matches!(
            result,
            Err(ProcessError::CommandFailed { code: 42, .. })
        ));
    }
}
