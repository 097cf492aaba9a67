//! グローバルトランスレーター
//!
//! プロセス全体で共有される翻訳ソースの一覧。
//! 描画時は登録順にソースを試し、最初に翻訳できたものを使う。

use super::Key;
use crate::component::Component;
use crate::locale::Locale;
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::debug;

/// 翻訳可能コンポーネントを翻訳する
pub trait Translator: Send + Sync {
    /// ソース名（グローバルトランスレーター内で一意）
    fn name(&self) -> &Key;

    /// 翻訳できない場合は `None`
    fn translate(&self, component: &Component, locale: &Locale) -> Option<Component>;
}

static GLOBAL: LazyLock<GlobalTranslator> = LazyLock::new(GlobalTranslator::new);

/// 翻訳ソースの集合
pub struct GlobalTranslator {
    sources: RwLock<Vec<Arc<dyn Translator>>>,
}

impl GlobalTranslator {
    /// プロセス共通のインスタンス
    pub fn translator() -> &'static GlobalTranslator {
        &GLOBAL
    }

    /// 独立したインスタンスを作成
    pub fn new() -> Self {
        Self {
            sources: RwLock::new(Vec::new()),
        }
    }

    /// ソースを追加（同名のソースがあれば追加せず `false`）
    pub fn add_source(&self, source: Arc<dyn Translator>) -> bool {
        let mut sources = self.sources.write();
        if sources.iter().any(|s| s.name() == source.name()) {
            return false;
        }
        debug!(name = %source.name(), "added translation source");
        sources.push(source);
        true
    }

    pub fn remove_source(&self, name: &Key) -> bool {
        let mut sources = self.sources.write();
        let before = sources.len();
        sources.retain(|s| s.name() != name);
        sources.len() != before
    }

    pub fn sources(&self) -> Vec<Arc<dyn Translator>> {
        self.sources.read().clone()
    }

    /// 登録順にソースを試して翻訳
    pub fn translate(&self, component: &Component, locale: &Locale) -> Option<Component> {
        self.sources
            .read()
            .iter()
            .find_map(|source| source.translate(component, locale))
    }

    /// コンポーネントを再帰的に描画
    ///
    /// 引数と子を先に描画してから自身を翻訳する。翻訳できない場合は
    /// 引数と子だけを描画したものを返す。
    pub fn render(&self, component: &Component, locale: &Locale) -> Component {
        let rendered = component.map_parts(|part| self.render(part, locale));
        self.translate(&rendered, locale).unwrap_or(rendered)
    }
}

impl Default for GlobalTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GlobalTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .sources
            .read()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        f.debug_struct("GlobalTranslator")
            .field("sources", &names)
            .finish()
    }
}
