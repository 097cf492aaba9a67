//! ロケール
//!
//! `language_REGION_variant` 形式の文字列とロケールを相互変換する。
//! ファイル名（`ja_JP.properties`）や設定ファイルのロケール指定に使う。

use crate::constants::{env, translation};
use crate::error::MsgDefError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ロケール（言語・地域・バリアント）
///
/// 言語は小文字、地域は大文字に正規化される。バリアントはそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    language: String,
    region: String,
    variant: String,
}

impl Locale {
    /// 言語のみのロケールを作成（検証なし、小文字化のみ）
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: String::new(),
            variant: String::new(),
        }
    }

    /// 地域を付与
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = region.to_ascii_uppercase();
        self
    }

    /// バリアントを付与
    pub fn with_variant(mut self, variant: &str) -> Self {
        self.variant = variant.to_string();
        self
    }

    /// en_US
    pub fn en_us() -> Self {
        Locale::new(translation::DEFAULT_LANGUAGE).with_region(translation::DEFAULT_REGION)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// 言語のみのロケール（翻訳のフォールバック用）
    pub fn language_only(&self) -> Locale {
        Locale::new(&self.language)
    }

    /// 地域・バリアントを持たないか
    pub fn is_language_only(&self) -> bool {
        self.region.is_empty() && self.variant.is_empty()
    }

    /// 文字列をパース（形式: `language_REGION_variant`）
    ///
    /// `_` で最大3つに分割する。空文字列や不正なセグメントは `None`。
    pub fn parse(s: &str) -> Option<Locale> {
        if s.is_empty() {
            return None;
        }

        let mut segments = s.splitn(3, '_');
        let language = segments.next()?;
        let region = segments.next().unwrap_or("");
        let variant = segments.next().unwrap_or("");

        if !is_language(language) || !is_region(region) || !is_variant(variant) {
            return None;
        }

        Some(
            Locale::new(language)
                .with_region(region)
                .with_variant(variant),
        )
    }

    /// 環境変数からロケールを取得
    /// 優先順位: MSGDEF_LANG > LANG > デフォルト(en_US)
    pub fn from_env() -> Self {
        Self::from_env_values(
            std::env::var(env::MSGDEF_LANG).ok().as_deref(),
            std::env::var(env::LANG).ok().as_deref(),
        )
    }

    fn from_env_values(msgdef_lang: Option<&str>, lang: Option<&str>) -> Self {
        [msgdef_lang, lang]
            .into_iter()
            .flatten()
            .find_map(|value| {
                // ja_JP.UTF-8 -> ja_JP, de_DE@euro -> de_DE
                let value = value.split(['.', '@']).next().unwrap_or("");
                Locale::parse(value)
            })
            .unwrap_or_else(Locale::en_us)
    }
}

fn is_language(s: &str) -> bool {
    (2..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_region(s: &str) -> bool {
    s.is_empty()
        || (s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()))
        || (s.len() == 3 && s.chars().all(|c| c.is_ascii_digit()))
}

fn is_variant(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if !self.region.is_empty() || !self.variant.is_empty() {
            write!(f, "_{}", self.region)?;
        }
        if !self.variant.is_empty() {
            write!(f, "_{}", self.variant)?;
        }
        Ok(())
    }
}

impl FromStr for Locale {
    type Err = MsgDefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::parse(s).ok_or_else(|| MsgDefError::InvalidLocale(s.to_string()))
    }
}

impl TryFrom<String> for Locale {
    type Error = MsgDefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> String {
        locale.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let cases: [(&str, Option<Locale>); 6] = [
            ("", None),
            ("en", Some(Locale::new("en"))),
            ("ja", Some(Locale::new("ja"))),
            ("en_US", Some(Locale::new("en").with_region("US"))),
            ("ja_JP", Some(Locale::new("ja").with_region("JP"))),
            (
                "en_US_WIN",
                Some(Locale::new("en").with_region("US").with_variant("WIN")),
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(Locale::parse(input), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_parse_normalizes_case() {
        let locale = Locale::parse("EN_us").unwrap();
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.region(), "US");
        assert_eq!(locale.to_string(), "en_US");
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(Locale::parse("e"), None);
        assert_eq!(Locale::parse("en_USA"), None);
        assert_eq!(Locale::parse("messages"), Some(Locale::new("messages")));
        assert_eq!(Locale::parse("en US"), None);
        assert_eq!(Locale::parse("123"), None);
    }

    #[test]
    fn test_numeric_region() {
        let locale = Locale::parse("es_419").unwrap();
        assert_eq!(locale.region(), "419");
    }

    #[test]
    fn test_display() {
        assert_eq!(Locale::new("ja").to_string(), "ja");
        assert_eq!(Locale::new("ja").with_region("jp").to_string(), "ja_JP");
        assert_eq!(
            Locale::new("en").with_variant("POSIX").to_string(),
            "en__POSIX"
        );
    }

    #[test]
    fn test_display_roundtrip_variant() {
        let locale = Locale::parse("en__POSIX").unwrap();
        assert_eq!(locale.region(), "");
        assert_eq!(locale.variant(), "POSIX");
        assert_eq!(locale.to_string(), "en__POSIX");
    }

    #[test]
    fn test_from_str() {
        let locale: Locale = "ja_JP".parse().unwrap();
        assert_eq!(locale, Locale::new("ja").with_region("JP"));

        let err = "".parse::<Locale>().unwrap_err();
        assert!(matches!(err, MsgDefError::InvalidLocale(_)));
    }

    #[test]
    fn test_language_only() {
        let locale = Locale::parse("ja_JP").unwrap();
        assert_eq!(locale.language_only(), Locale::new("ja"));
        assert!(!locale.is_language_only());
        assert!(locale.language_only().is_language_only());
    }

    #[test]
    fn test_from_env_values() {
        // MSGDEF_LANGが優先
        assert_eq!(
            Locale::from_env_values(Some("ja_JP"), Some("en_US.UTF-8")),
            Locale::new("ja").with_region("JP")
        );
        // LANGのエンコーディング部分を除去
        assert_eq!(
            Locale::from_env_values(None, Some("ja_JP.UTF-8")),
            Locale::new("ja").with_region("JP")
        );
        // 不正な値はスキップ
        assert_eq!(
            Locale::from_env_values(Some(""), Some("de_DE@euro")),
            Locale::new("de").with_region("DE")
        );
        // C/POSIXロケールはデフォルトへ
        assert_eq!(Locale::from_env_values(None, Some("C")), Locale::en_us());
        assert_eq!(Locale::from_env_values(None, None), Locale::en_us());
    }

    #[test]
    fn test_serde_as_string() {
        #[derive(Deserialize, Serialize)]
        struct Holder {
            locale: Locale,
        }

        let holder: Holder = toml::from_str(r#"locale = "ja_JP""#).unwrap();
        assert_eq!(holder.locale, Locale::new("ja").with_region("JP"));

        let out = toml::to_string(&holder).unwrap();
        assert!(out.contains("\"ja_JP\""));

        assert!(toml::from_str::<Holder>(r#"locale = "x""#).is_err());
    }
}
