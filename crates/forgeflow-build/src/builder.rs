//! buildxビルダーの準備
//!
//! クロスアーキテクチャエミュレーションの導入と、名前付きビルダー
//! インスタンスの存在保証を行います。

use crate::error::Result;
use crate::process::{self, ProcessError};
use tracing::{debug, info};

/// QEMUエミュレータの導入に使うイメージ
const BINFMT_IMAGE: &str = "tonistiigi/binfmt";

/// 「ビルダーが存在しない」ことを示すbuildxの診断メッセージ断片
const ABSENT_MARKERS: [&str; 2] = ["no builder", "no such builder"];

/// マルチプラットフォームビルダーの状態遷移を担う
///
/// {absent} → create → bootstrap → {ready} / {present} → {ready}
pub struct BuilderProvisioner<'a> {
    builder: &'a str,
}

impl<'a> BuilderProvisioner<'a> {
    pub fn new(builder: &'a str) -> Self {
        Self { builder }
    }

    /// クロスアーキテクチャエミュレーションを導入
    ///
    /// binfmt側が冪等なので毎回実行してよい。
    pub fn install_emulators(&self) -> Result<()> {
        let status = process::run_interactive(
            "docker",
            &["run", "--privileged", "--rm", BINFMT_IMAGE, "--install", "all"],
            None,
        )?;
        process::ensure_success("docker run tonistiigi/binfmt", status)?;

        Ok(())
    }

    /// ビルダーインスタンスの存在を保証
    ///
    /// inspect失敗のうち「ビルダー不在」だけを作成パスに回す。
    /// それ以外の失敗（デーモン未起動、権限不足など）は不在と区別し、
    /// エラーとして伝播する。
    pub fn ensure(&self) -> Result<()> {
        let inspect =
            process::run_capture("docker", &["buildx", "inspect", self.builder], None)?;

        if inspect.status.success() {
            debug!(builder = %self.builder, "Builder already exists");
            return Ok(());
        }

        if !indicates_absence(&inspect.stderr) {
            return Err(ProcessError::CommandFailed {
                program: "docker buildx inspect".to_string(),
                code: inspect.status.code().unwrap_or(1),
                detail: inspect.stderr.trim().to_string(),
            }
            .into());
        }

        info!(builder = %self.builder, "Builder not found, creating");

        let status = process::run_interactive(
            "docker",
            &[
                "buildx",
                "create",
                "--name",
                self.builder,
                "--driver",
                "docker-container",
                "--use",
            ],
            None,
        )?;
        process::ensure_success("docker buildx create", status)?;

        let status = process::run_interactive(
            "docker",
            &["buildx", "inspect", self.builder, "--bootstrap"],
            None,
        )?;
        process::ensure_success("docker buildx inspect --bootstrap", status)?;

        Ok(())
    }
}

fn indicates_absence(stderr: &str) -> bool {
    let stderr = stderr.to_ascii_lowercase();
    ABSENT_MARKERS.iter().any(|marker| stderr.contains(marker))
}
