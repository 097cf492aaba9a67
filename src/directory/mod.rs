//! ディレクトリモジュール
//!
//! ロケールごとのメッセージファイルをディレクトリから読み込む:
//! - source: ファイルの探索・デフォルトロケールのファイル作成・読み込み
//! - loaded: 読み込んだメッセージマップ
//! - processors: 読み込み後の加工（不足メッセージの追記など）

// ========================================
// サブモジュール
// ========================================

mod loaded;
pub mod processors;
mod source;

// ========================================
// 公開API
// ========================================

pub use loaded::LoadedMessageMap;
pub use source::DirectorySource;
