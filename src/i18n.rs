//! CLIの表示メッセージ
//!
//! 言語設定の優先順位:
//! 1. MSGDEF_LANG 環境変数（msgdef専用の設定）
//! 2. LANG 環境変数（システムのロケール設定）
//! 3. デフォルト: en
use crate::locale::Locale;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Lang {
    En = 0,
    Ja = 1,
}

impl Lang {
    /// 環境変数から言語を取得
    pub fn from_env() -> Self {
        Self::from_locale(&Locale::from_env())
    }

    pub fn from_locale(locale: &Locale) -> Self {
        match locale.language() {
            "ja" => Lang::Ja,
            _ => Lang::En, // 未対応言語は英語にフォールバック
        }
    }
}

/// UIメッセージキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum UiMsg {
    // check
    CheckLocale,
    CheckMissing,
    CheckExtra,
    CheckOk,
    CheckFailed,
    NoMessageFiles,
    NoDefaults,

    // sync
    SyncAppended,
    SyncUpToDate,

    // render
    RenderNotFound,
    DidYouMean,

    // init
    ConfigCreated,
    ConfigExists,

    ErrorPrefix,
}

static EN_UI_MSGS: [&str; 14] = [
    "{0}: {1} messages ({2})",                 // CheckLocale
    "  missing: {0}",                          // CheckMissing
    "  not in defaults: {0}",                  // CheckExtra
    "All locales are complete",                // CheckOk
    "{0} locale(s) have missing messages",     // CheckFailed
    "No message files found in {0}",           // NoMessageFiles
    "No default messages configured ([source] defaults)", // NoDefaults
    "{0}: appended {1} message(s)",            // SyncAppended
    "{0}: up to date",                         // SyncUpToDate
    "Translation not found: {0} ({1})",        // RenderNotFound
    "Did you mean: {0}?",                      // DidYouMean
    "Created {0}",                             // ConfigCreated
    "{0} already exists",                      // ConfigExists
    "Error",                                   // ErrorPrefix
];

static JA_UI_MSGS: [&str; 14] = [
    "{0}: {1} 件 ({2})",                       // CheckLocale
    "  不足: {0}",                             // CheckMissing
    "  デフォルトに無いキー: {0}",             // CheckExtra
    "すべてのロケールが揃っています",          // CheckOk
    "{0} 個のロケールでメッセージが不足しています", // CheckFailed
    "{0} にメッセージファイルがありません",    // NoMessageFiles
    "デフォルトメッセージが設定されていません ([source] defaults)", // NoDefaults
    "{0}: {1} 件追記しました",                 // SyncAppended
    "{0}: 変更なし",                           // SyncUpToDate
    "翻訳が見つかりません: {0} ({1})",         // RenderNotFound
    "もしかして: {0}?",                        // DidYouMean
    "{0} を作成しました",                      // ConfigCreated
    "{0} は既に存在します",                    // ConfigExists
    "エラー",                                  // ErrorPrefix
];

/// メッセージマネージャー（配列ベース）
pub struct Messages {
    lang: Lang,
}

impl Messages {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    /// UIメッセージを取得
    pub fn ui(&self, key: UiMsg) -> &'static str {
        match self.lang {
            Lang::En => EN_UI_MSGS[key as usize],
            Lang::Ja => JA_UI_MSGS[key as usize],
        }
    }

    /// UIメッセージをフォーマット（プレースホルダー {0}, {1}, ... を置換）
    pub fn fmt_ui(&self, key: UiMsg, args: &[&str]) -> String {
        let mut result = self.ui(key).to_string();
        for (i, arg) in args.iter().enumerate() {
            let placeholder = format!("{{{}}}", i);
            result = result.replace(&placeholder, arg);
        }
        result
    }
}

// ========================================
// グローバルインスタンス
// ========================================

static MESSAGES: OnceLock<Messages> = OnceLock::new();

/// グローバルなメッセージインスタンスを取得
pub fn messages() -> &'static Messages {
    MESSAGES.get_or_init(|| Messages::new(Lang::from_env()))
}

/// UIメッセージを取得してフォーマット
pub fn fmt_ui_msg(key: UiMsg, args: &[&str]) -> String {
    messages().fmt_ui(key, args)
}

/// UIメッセージを取得
pub fn ui_msg(key: UiMsg) -> &'static str {
    messages().ui(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_from_locale() {
        assert_eq!(Lang::from_locale(&Locale::new("ja").with_region("JP")), Lang::Ja);
        assert_eq!(Lang::from_locale(&Locale::en_us()), Lang::En);
        assert_eq!(Lang::from_locale(&Locale::new("fr")), Lang::En);
    }

    #[test]
    fn test_fmt_ui() {
        let en = Messages::new(Lang::En);
        assert_eq!(
            en.fmt_ui(UiMsg::SyncAppended, &["ja_JP", "3"]),
            "ja_JP: appended 3 message(s)"
        );

        let ja = Messages::new(Lang::Ja);
        assert_eq!(ja.fmt_ui(UiMsg::SyncUpToDate, &["en"]), "en: 変更なし");
    }

    #[test]
    fn test_tables_cover_all_keys() {
        for messages in [Messages::new(Lang::En), Messages::new(Lang::Ja)] {
            assert!(!messages.ui(UiMsg::CheckLocale).is_empty());
            assert!(!messages.ui(UiMsg::ErrorPrefix).is_empty());
        }
    }
}
