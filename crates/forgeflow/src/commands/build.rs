//! buildコマンド
//!
//! 発見 → 引数検証 → クリーン確認 → コマンド組み立て → 確認 →
//! （push時のみログイン）→ エミュレーション・ビルダー準備 → 実行、の直列処理。

use anyhow::Context;
use colored::Colorize;
use forgeflow_build::{
    BuildCommand, BuildRequest, BuilderProvisioner, GitRepo, OutputMode, TreeState, process,
};
use forgeflow_core::{ForgeConfig, ForgeError, discover_descriptors};
use std::path::Path;
use tracing::debug;

use crate::utils;

pub fn handle(root: &Path, image: &str, push: bool, yes: bool, builder: &str) -> anyhow::Result<()> {
    let root = root
        .canonicalize()
        .with_context(|| format!("ルートディレクトリを解決できません: {}", root.display()))?;
    debug!(root = %root.display(), "Resolved project root");

    let config = ForgeConfig::new(root, builder.to_string());

    // ビルド定義の発見と引数検証。副作用が起きる前に不正な名前を拒否する
    let descriptors = discover_descriptors(&config.root)?;
    if descriptors.is_empty() {
        return Err(ForgeError::NoDescriptors(config.root.clone()).into());
    }
    let descriptor = descriptors
        .get(image)
        .ok_or_else(|| ForgeError::UnknownImage {
            name: image.to_string(),
            available: descriptors.keys().cloned().collect::<Vec<_>>().join(", "),
        })?;

    // クリーンなリポジトリであることの確認。汚れていたらここで打ち切る
    let repo = GitRepo::new(config.root.clone());
    if repo.state()? == TreeState::Dirty {
        eprintln!(
            "{}",
            "!! クリーンなgitリポジトリで実行してください !!".red().bold()
        );
        eprintln!("中断します...");
        std::process::exit(1);
    }

    // HEADリビジョンの解決とビルドコマンドの組み立て
    let revision = repo.head_revision()?;
    let request = BuildRequest {
        image_name: descriptor.name.clone(),
        descriptor: descriptor.path.clone(),
        revision,
        output: if push {
            OutputMode::Push
        } else {
            OutputMode::Load
        },
    };
    let build_command = BuildCommand::compose(&config, &request);

    // プレビューは実行されるコマンドと同じ値から描画される
    println!("以下のビルドを実行します:");
    println!("{}", build_command.render());
    println!();

    if !yes && !utils::confirm("続行しますか？ [y/N]: ")? {
        println!("中止しました");
        return Ok(());
    }

    if push {
        println!("{}", "📤 レジストリにログインします...".blue());
        let status = process::run_interactive("docker", &["login"], None)?;
        process::ensure_success("docker login", status)?;
    }

    println!(
        "{}",
        "🔧 クロスアーキテクチャエミュレーションを準備中...".blue()
    );
    let provisioner = BuilderProvisioner::new(&config.builder);
    provisioner.install_emulators()?;

    println!(
        "{}",
        format!("🔧 ビルダー '{}' を準備中...", config.builder).blue()
    );
    provisioner.ensure()?;

    println!();
    println!(
        "{}",
        format!("🔨 {} をビルド中...", request.image_name)
            .green()
            .bold()
    );
    let status = process::run_status("docker buildx build", &mut build_command.command())?;
    process::ensure_success("docker buildx build", status)?;

    println!();
    println!(
        "{}",
        format!("✓ ビルド完了: {}:{}", request.image_name, request.revision)
            .green()
            .bold()
    );

    Ok(())
}
