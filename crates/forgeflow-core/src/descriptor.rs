//! ビルド定義ファイルの自動発見
//!
//! ルートディレクトリ直下から `<name>.Dockerfile` 形式のファイルを発見し、
//! イメージ名 → ビルド定義の対応を構築します。

use crate::error::{ForgeError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// ビルド定義ファイルとして認識するサフィックス
pub const DESCRIPTOR_SUFFIX: &str = ".Dockerfile";

/// 発見されたビルド定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    /// イメージ名（ファイル名からサフィックスを除いたもの）
    pub name: String,
    /// ビルド定義ファイルへのパス
    pub path: PathBuf,
}

/// ファイル名からイメージ名を導出
///
/// `ubuntu_20.04.Dockerfile` → `ubuntu_20.04`
///
/// サフィックスで終わらないファイル名、およびサフィックスのみの
/// ファイル名（イメージ名が空になる）は `None`。
pub fn image_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(DESCRIPTOR_SUFFIX)
        .filter(|name| !name.is_empty())
}

/// ルートディレクトリ直下のビルド定義を発見
///
/// 直下のファイルのみを対象とし、サブディレクトリは走査しません。
/// 定義が一つもない場合は空のマップを返します（拒否は引数検証側の責務）。
#[tracing::instrument(skip(root), fields(root = %root.display()))]
pub fn discover_descriptors(root: &Path) -> Result<BTreeMap<String, Descriptor>> {
    let mut found = BTreeMap::new();

    let entries = std::fs::read_dir(root).map_err(|e| ForgeError::DiscoveryError {
        path: root.to_path_buf(),
        message: format!("ディレクトリの読み込みに失敗: {}", e),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ForgeError::DiscoveryError {
            path: root.to_path_buf(),
            message: format!("ディレクトリエントリの読み込みに失敗: {}", e),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };

        if let Some(name) = image_name(file_name) {
            debug!(file = %path.display(), name = %name, "Found build descriptor");
            found.insert(
                name.to_string(),
                Descriptor {
                    name: name.to_string(),
                    path,
                },
            );
        }
    }

    info!(descriptor_count = found.len(), "Discovered build descriptors");
    Ok(found)
}
