//! listコマンド
//!
//! buildコマンドが受け付けるイメージ名の集合を表示する。

use anyhow::Context;
use colored::Colorize;
use forgeflow_core::{Descriptor, discover_descriptors};
use std::path::Path;

pub fn handle(root: &Path, json: bool) -> anyhow::Result<()> {
    let root = root
        .canonicalize()
        .with_context(|| format!("ルートディレクトリを解決できません: {}", root.display()))?;

    let descriptors = discover_descriptors(&root)?;

    if json {
        let list: Vec<&Descriptor> = descriptors.values().collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if descriptors.is_empty() {
        println!("ビルド定義が見つかりません（<イメージ名>.Dockerfile を配置してください）");
        return Ok(());
    }

    println!("📄 発見されたビルド定義 ({} 個):", descriptors.len());
    for descriptor in descriptors.values() {
        println!(
            "  • {} ({})",
            descriptor.name.cyan(),
            descriptor.path.display()
        );
    }

    Ok(())
}
