use std::path::Path;
use std::process::Command;

/// テスト用のgitリポジトリを初期化し、ビルド定義をコミットする
pub fn init_repo_with_descriptors(root: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        std::fs::write(root.join(name), content).unwrap();
    }

    git(root, &["init", "-q"]);
    git(root, &["config", "user.email", "forge@example.com"]);
    git(root, &["config", "user.name", "forge"]);
    git(root, &["add", "."]);
    git(root, &["-c", "commit.gpgsign=false", "commit", "-q", "-m", "init"]);
}

/// HEADコミットの短縮IDを取得（テストの期待値用）
pub fn head_revision(root: &Path) -> String {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .current_dir(root)
        .output()
        .expect("gitコマンドの実行に失敗");
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

pub fn git(root: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(root)
        .status()
        .expect("gitコマンドの実行に失敗");
    assert!(status.success(), "git {:?} が失敗しました", args);
}
