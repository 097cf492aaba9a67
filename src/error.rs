//! msgdefエラー処理
//!
//! ライブラリ全体で共通のエラー型を提供します。
//! - キー・ロケールの検証エラー
//! - ローダーの状態エラー（未設定・二重設定）
//! - .propertiesの構文エラー（行番号付き）
//! - パス付きのI/Oエラー

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// msgdefのResult型
pub type Result<T> = std::result::Result<T, MsgDefError>;

/// msgdefのエラー
#[derive(Debug, Error)]
pub enum MsgDefError {
    /// メッセージキーが空
    #[error("message key must not be empty")]
    EmptyKey,

    /// 翻訳ストアのキー（namespace:value）が不正
    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: &'static str },

    /// ロケール文字列が不正
    #[error("invalid locale: '{0}'")]
    InvalidLocale(String),

    #[error("file extension is not set")]
    FileExtensionNotSet,

    #[error("message loader is not set")]
    LoaderNotSet,

    #[error("message loader is already set")]
    LoaderAlreadySet,

    /// 同じキー・ロケールの翻訳が登録済み
    #[error("translation already exists: {key} for {locale}")]
    DuplicateTranslation { key: String, locale: String },

    /// .propertiesの構文エラー
    #[error("malformed properties at line {line}: {reason}")]
    MalformedProperties { line: usize, reason: &'static str },

    /// ファイル操作のエラー（パス付き）
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// パスを持たないストリーム操作のエラー
    #[error(transparent)]
    Stream(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl MsgDefError {
    /// パス付きのI/Oエラーを作成
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        MsgDefError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// 不正なキーのエラーを作成
    pub fn invalid_key(key: impl Into<String>, reason: &'static str) -> Self {
        MsgDefError::InvalidKey {
            key: key.into(),
            reason,
        }
    }
}
