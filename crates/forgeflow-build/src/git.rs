//! gitリポジトリへの問い合わせ
//!
//! 作業ツリー・インデックスの差分確認と、HEADコミットの短縮ID取得。

use crate::error::{BuildError, Result};
use crate::process::{self, ProcessError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 問い合わせ対象のgitリポジトリ
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
}

/// 作業ツリーとインデックスの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeState {
    Clean,
    Dirty,
}

impl GitRepo {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 作業ツリーとインデックスの両方がクリーンかを確認
    ///
    /// `git diff --quiet` は差分ありを終了コード1で報告する。
    /// それ以外の非ゼロ（リポジトリ外、gitの異常など）は「汚れている」
    /// ではなくエラーとして伝播する。
    pub fn state(&self) -> Result<TreeState> {
        let queries: [&[&str]; 2] = [&["diff", "--quiet"], &["diff", "--cached", "--quiet"]];

        for args in queries {
            let captured = process::run_capture("git", args, Some(&self.root))?;
            match captured.status.code() {
                Some(0) => {}
                Some(1) => {
                    debug!(query = ?args, "Uncommitted changes detected");
                    return Ok(TreeState::Dirty);
                }
                code => {
                    return Err(BuildError::GitStatus {
                        code: code.unwrap_or(1),
                        stderr: captured.stderr.trim().to_string(),
                    });
                }
            }
        }

        Ok(TreeState::Clean)
    }

    /// HEADコミットの短縮IDを取得
    pub fn head_revision(&self) -> Result<String> {
        let captured =
            process::run_checked("git", &["rev-parse", "--short", "HEAD"], Some(&self.root))?;

        let revision = captured.stdout.trim().to_string();
        if revision.is_empty() {
            return Err(ProcessError::MalformedOutput {
                program: "git rev-parse".to_string(),
                message: "出力が空です".to_string(),
            }
            .into());
        }

        Ok(revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::process::Command;

    fn git(root: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(root)
            .status()
            .expect("gitコマンドの実行に失敗");
        assert!(status.success(), "git {:?} が失敗しました", args);
    }

    fn init_repo(root: &Path) {
        fs::write(root.join("alpine.Dockerfile"), "FROM alpine").unwrap();
        git(root, &["init", "-q"]);
        git(root, &["config", "user.email", "forge@example.com"]);
        git(root, &["config", "user.name", "forge"]);
        git(root, &["add", "."]);
        git(root, &["-c", "commit.gpgsign=false", "commit", "-q", "-m", "init"]);
    }

    #[test]
    fn test_state_clean_after_commit() {
        let temp_dir = tempfile::tempdir().unwrap();
        init_repo(temp_dir.path());

        let repo = GitRepo::new(temp_dir.path().to_path_buf());

        assert_eq!(repo.state().unwrap(), TreeState::Clean);
    }

    #[test]
    fn test_state_dirty_working_tree() {
        let temp_dir = tempfile::tempdir().unwrap();
        init_repo(temp_dir.path());

        // コミット済みファイルを書き換える（未ステージの差分）
        fs::write(temp_dir.path().join("alpine.Dockerfile"), "FROM alpine:3.20").unwrap();

        let repo = GitRepo::new(temp_dir.path().to_path_buf());

        assert_eq!(repo.state().unwrap(), TreeState::Dirty);
    }

    #[test]
    fn test_state_dirty_staged_index() {
        let temp_dir = tempfile::tempdir().unwrap();
        init_repo(temp_dir.path());

        // 新規ファイルをステージする（作業ツリーの差分はなし）
        fs::write(temp_dir.path().join("debian.Dockerfile"), "FROM debian").unwrap();
        git(temp_dir.path(), &["add", "debian.Dockerfile"]);

        let repo = GitRepo::new(temp_dir.path().to_path_buf());

        assert_eq!(repo.state().unwrap(), TreeState::Dirty);
    }

    #[test]
    fn test_state_outside_repository_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();

        let repo = GitRepo::new(temp_dir.path().to_path_buf());
        let result = repo.state();

        assert!(matches!(result, Err(BuildError::GitStatus { .. })));
    }

    #[test]
    fn test_head_revision_short_hash() {
        let temp_dir = tempfile::tempdir().unwrap();
        init_repo(temp_dir.path());

        let repo = GitRepo::new(temp_dir.path().to_path_buf());
        let revision = repo.head_revision().unwrap();

        assert!(revision.len() >= 4);
        assert!(revision.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
