//! buildxビルドコマンドの組み立て
//!
//! 環境変数・プログラム・引数列を1つの値として保持し、確認プロンプトの
//! プレビューと実際の実行を同じ値から導出します。表示したものがそのまま
//! 実行される、が正しさの不変条件です。

use forgeflow_core::{ForgeConfig, PLATFORMS};
use std::path::PathBuf;
use std::process::Command;

/// ビルド成果物の出力先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// リモートレジストリへアップロードする
    Push,
    /// ローカルのイメージストアに取り込む
    Load,
}

impl OutputMode {
    pub fn flag(&self) -> &'static str {
        match self {
            OutputMode::Push => "--push",
            OutputMode::Load => "--load",
        }
    }
}

/// 一回のビルドに必要な入力
///
/// プロセス内でのみ生きる値で、どこにも永続化されない。
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// イメージ名（ビルド定義ファイル名から導出）
    pub image_name: String,
    /// ビルド定義ファイルへのパス
    pub descriptor: PathBuf,
    /// HEADコミットの短縮ID。タグとして使う
    pub revision: String,
    /// push / load の別
    pub output: OutputMode,
}

/// 組み立て済みのbuildx呼び出し
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    env: Vec<(String, String)>,
    program: String,
    // 表示用の行グループ。平坦化すると実行時の引数列になる
    lines: Vec<Vec<String>>,
}

impl BuildCommand {
    pub fn compose(config: &ForgeConfig, request: &BuildRequest) -> Self {
        let lines = vec![
            vec!["buildx".to_string(), "build".to_string()],
            vec!["--builder".to_string(), config.builder.clone()],
            vec!["--platform".to_string(), PLATFORMS.to_string()],
            vec![request.output.flag().to_string()],
            vec![
                "-t".to_string(),
                format!("{}:{}", request.image_name, request.revision),
            ],
            vec!["-t".to_string(), format!("{}:latest", request.image_name)],
            vec!["-f".to_string(), request.descriptor.display().to_string()],
            vec![config.root.display().to_string()],
        ];

        Self {
            env: vec![("BUILDKIT_PROGRESS".to_string(), "plain".to_string())],
            program: "docker".to_string(),
            lines,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }

    /// 実行時の引数列（表示用の行グループを平坦化したもの）
    pub fn args(&self) -> Vec<&str> {
        self.lines.iter().flatten().map(|s| s.as_str()).collect()
    }

    /// 確認プロンプトに表示するプレビュー
    pub fn render(&self) -> String {
        let mut out = Vec::new();

        for (key, value) in &self.env {
            out.push(format!("{}={} \\", key, value));
        }

        let mut lines = self.lines.iter();
        if let Some(first) = lines.next() {
            out.push(format!("{} {} \\", self.program, first.join(" ")));
        }

        let rest: Vec<&Vec<String>> = lines.collect();
        for (i, line) in rest.iter().enumerate() {
            let cont = if i + 1 == rest.len() { "" } else { " \\" };
            out.push(format!("  {}{}", line.join(" "), cont));
        }

        out.join("\n")
    }

    /// 実行用の `std::process::Command` を構築
    ///
    /// プレビューと同じ値から導出するため、両者は乖離しない。
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args());
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }
}
