//! メッセージの定義と読み込み
//!
//! - [`definer`]: コード上でキーとデフォルトメッセージを定義
//! - [`file`]: `.properties` の読み書き
//! - [`directory`]: ロケールごとのファイルをディレクトリから読み込み
//! - [`translation`]: 翻訳ストアとグローバルトランスレーター

pub mod component;
pub mod config;
pub mod constants;
pub mod definer;
pub mod directory;
pub mod error;
pub mod file;
pub mod i18n;
pub mod key;
pub mod locale;
pub mod translation;

pub use component::{Component, ComponentLike};
pub use definer::DefaultMessageDefiner;
pub use directory::{DirectorySource, LoadedMessageMap};
pub use error::{MsgDefError, Result};
pub use key::{MessageKey, Placeholder};
pub use locale::Locale;
pub use translation::{GlobalTranslator, Key, TranslationStore};

// ========================================
// システム共通型定義
// ========================================

use ahash::RandomState;

/// メッセージマップ（キー -> テンプレート、挿入順を保持）
pub type MessageMap = indexmap::IndexMap<String, String>;

/// msgdef用のHashMap型（std::collections::HashMapにahashを適用）
pub type HashMap<K, V> = std::collections::HashMap<K, V, RandomState>;

/// msgdef用HashMapを作成するヘルパー関数
#[inline]
pub fn new_hashmap<K, V>() -> HashMap<K, V> {
    std::collections::HashMap::with_hasher(RandomState::new())
}

/// msgdef用のHashSet型（std::collections::HashSetにahashを適用）
pub type HashSet<T> = std::collections::HashSet<T, RandomState>;

/// msgdef用HashSetを作成するヘルパー関数
#[inline]
pub fn new_hashset<T>() -> HashSet<T> {
    std::collections::HashSet::with_hasher(RandomState::new())
}
