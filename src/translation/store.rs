//! 翻訳ストア
//!
//! キー -> (ロケール -> テンプレート) を保持し、MiniMessage形式で描画する。
//! `&self` で登録できるため、`Arc` で共有したまま更新してよい。

use super::global::Translator;
use super::{minimessage, Key};
use crate::component::Component;
use crate::constants::translation::{DEFAULT_LANGUAGE, DEFAULT_REGION};
use crate::error::{MsgDefError, Result};
use crate::locale::Locale;
use crate::{new_hashmap, HashMap, MessageMap};
use ahash::RandomState;
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::debug;

/// MiniMessage形式の翻訳ストア
#[derive(Debug)]
pub struct TranslationStore {
    name: Key,
    default_locale: RwLock<Locale>,
    translations: DashMap<String, HashMap<Locale, String>, RandomState>,
}

impl TranslationStore {
    /// 空のストアを作成（デフォルトロケールは `en_US`）
    pub fn new(name: Key) -> Self {
        Self {
            name,
            default_locale: RwLock::new(Locale::new(DEFAULT_LANGUAGE).with_region(DEFAULT_REGION)),
            translations: DashMap::with_hasher(RandomState::new()),
        }
    }

    pub fn name(&self) -> &Key {
        &self.name
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale.read().clone()
    }

    /// 翻訳が見つからない場合に使うロケールを設定
    pub fn set_default_locale(&self, locale: Locale) {
        *self.default_locale.write() = locale;
    }

    /// 翻訳を登録
    ///
    /// 同じキー・ロケールが登録済みの場合はエラー。
    pub fn register(&self, key: &str, locale: &Locale, template: &str) -> Result<()> {
        let mut entry = self
            .translations
            .entry(key.to_string())
            .or_insert_with(new_hashmap);

        if entry.contains_key(locale) {
            return Err(MsgDefError::DuplicateTranslation {
                key: key.to_string(),
                locale: locale.to_string(),
            });
        }
        entry.insert(locale.clone(), template.to_string());
        Ok(())
    }

    /// メッセージマップの内容をまとめて登録
    pub fn register_all(&self, locale: &Locale, messages: &MessageMap) -> Result<()> {
        for (key, template) in messages {
            self.register(key, locale, template)?;
        }
        debug!(store = %self.name, %locale, count = messages.len(), "registered translations");
        Ok(())
    }

    /// キーの翻訳を（全ロケール分）削除
    pub fn unregister(&self, key: &str) -> bool {
        self.translations.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.translations.contains_key(key)
    }

    /// キーが指定ロケールで登録されているか（フォールバックなし）
    pub fn contains_for(&self, key: &str, locale: &Locale) -> bool {
        self.translations
            .get(key)
            .is_some_and(|entry| entry.value().contains_key(locale))
    }

    /// 登録済みのキー（昇順）
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.translations.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    /// テンプレートを取得
    ///
    /// ロケール完全一致 -> 言語のみ -> デフォルトロケールの順に探す。
    pub fn translate(&self, key: &str, locale: &Locale) -> Option<String> {
        let entry = self.translations.get(key)?;
        let locales = entry.value();

        if let Some(template) = locales.get(locale) {
            return Some(template.clone());
        }
        if !locale.is_language_only() {
            if let Some(template) = locales.get(&locale.language_only()) {
                return Some(template.clone());
            }
        }
        locales.get(&*self.default_locale.read()).cloned()
    }
}

impl Translator for TranslationStore {
    fn name(&self) -> &Key {
        &self.name
    }

    /// テンプレートを引数付きで描画（元のスタイルと子は保持する）
    fn translate(&self, component: &Component, locale: &Locale) -> Option<Component> {
        let key = component.key()?;
        let template = TranslationStore::translate(self, key, locale)?;

        let mut rendered =
            minimessage::render(&template, component.args()).with_style(component.style().clone());
        for child in component.children() {
            rendered.push_child(child.clone());
        }
        Some(rendered)
    }
}
