mod commands;
mod utils;

use clap::{Parser, Subcommand};
use colored::Colorize;
use forgeflow_build::{BuildError, ProcessError};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "forge")]
#[command(about = "選ぶ。確かめる。焼く。マルチアーキビルドは、一言になった。", long_about = None)]
struct Cli {
    /// ビルド定義の発見ルート（ビルドコンテキストを兼ねる）
    #[arg(
        short = 'C',
        long = "root",
        env = "FORGE_ROOT",
        global = true,
        default_value = "."
    )]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// イメージをビルド（確認の上でbuildxを実行）
    Build {
        /// イメージ名（<イメージ名>.Dockerfile から発見されたもの）
        image: String,
        /// ビルド後にレジストリへpushする（デフォルトはローカルにload）
        #[arg(long)]
        push: bool,
        /// 確認プロンプトを省略する
        #[arg(short, long)]
        yes: bool,
        /// buildxビルダーインスタンス名
        #[arg(long, env = "FORGE_BUILDER", default_value = forgeflow_core::DEFAULT_BUILDER)]
        builder: String,
    },
    /// 発見されたビルド定義の一覧を表示
    List {
        /// JSON形式で出力
        #[arg(long)]
        json: bool,
    },
    /// バージョンを表示
    Version,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "✗".red().bold(), err);
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli { root, command } = cli;

    match command {
        Commands::Build {
            image,
            push,
            yes,
            builder,
        } => commands::build::handle(&root, &image, push, yes, &builder),
        Commands::List { json } => commands::list::handle(&root, json),
        Commands::Version => {
            println!("forgeflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// 外部コマンドの失敗は子プロセスの終了コードをそのまま引き継ぐ
fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(ProcessError::CommandFailed { code, .. }) =
            cause.downcast_ref::<ProcessError>()
        {
            return *code;
        }
        if let Some(BuildError::Process(ProcessError::CommandFailed { code, .. })) =
            cause.downcast_ref::<BuildError>()
        {
            return *code;
        }
    }
    1
}
