//! 実行設定
//!
//! かつてグローバル定数だったルートディレクトリとビルダー名を、
//! 明示的な設定値として持ち回ります。

use std::path::PathBuf;

/// ビルド対象プラットフォーム（固定の2アーキテクチャ）
pub const PLATFORMS: &str = "linux/amd64,linux/arm64";

/// buildxビルダーインスタンスのデフォルト名
pub const DEFAULT_BUILDER: &str = "buildx_builder";

/// 一回の実行で使う設定値
#[derive(Debug, Clone)]
pub struct ForgeConfig {
    /// ビルド定義の発見ルート。ビルドコンテキストとしてもそのまま渡される
    pub root: PathBuf,
    /// buildxビルダーインスタンス名
    pub builder: String,
}

impl ForgeConfig {
    pub fn new(root: PathBuf, builder: String) -> Self {
        Self { root, builder }
    }
}
