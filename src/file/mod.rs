//! ファイルモジュール
//!
//! メッセージファイルの入出力:
//! - extension: ファイル名とロケールの相互変換
//! - loader: 読み込み・追記の抽象（Loader / MessageAppender）
//! - properties: `.properties` 形式の読み書き

// ========================================
// サブモジュール
// ========================================

mod extension;
mod loader;
pub mod properties;

// ========================================
// 公開API
// ========================================

pub use extension::FileExtension;
pub use loader::{Loader, MessageAppender};
