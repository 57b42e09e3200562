use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("ファイル読み込みエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("ビルド定義の発見エラー: {path}\n理由: {message}")]
    DiscoveryError { path: PathBuf, message: String },

    #[error("イメージ '{name}' のビルド定義が見つかりません\n利用可能なイメージ: {available}")]
    UnknownImage { name: String, available: String },

    #[error(
        "ビルド定義が見つかりません: {0}\nヒント: <イメージ名>.Dockerfile を含むディレクトリで実行してください"
    )]
    NoDescriptors(PathBuf),
}

pub type Result<T> = std::result::Result<T, ForgeError>;
