use std::io::Write;

/// 確認プロンプト
///
/// 行末の改行だけを取り除き、ちょうど `y` のときのみ肯定として扱う。
/// 標準入力が閉じている場合も否定扱いになる。
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    Ok(input.trim_end_matches(['\r', '\n']) == "y")
}
