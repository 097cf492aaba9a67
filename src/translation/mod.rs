//! 翻訳モジュール
//!
//! 読み込んだメッセージをロケールごとに保持し、コンポーネントを描画する:
//! - key: 翻訳ソースの名前（`namespace:value`）
//! - minimessage: テンプレートの解釈
//! - store: キー・ロケールごとのテンプレート
//! - global: プロセス共通の翻訳ソース一覧

mod global;
mod key;
pub mod minimessage;
mod store;

pub use global::{GlobalTranslator, Translator};
pub use key::Key;
pub use store::TranslationStore;
