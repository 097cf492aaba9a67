//! 設定ファイル（msgdef.toml）
//!
//! メッセージディレクトリの場所と読み込み方法、翻訳ストアの設定を管理します。
//!
//! ```toml
//! [source]
//! directory = "lang"
//! extension = ".properties"
//! default-locales = ["en_US", "ja_JP"]
//! defaults = "defaults.properties"
//! append-missing = true
//!
//! [store]
//! name = "myplugin:messages"
//! default-locale = "en_US"
//! ```

use crate::constants::file::{CONFIG_FILE_NAME, DEFAULT_DIRECTORY, PROPERTIES_EXTENSION};
use crate::directory::processors;
use crate::error::{MsgDefError, Result};
use crate::file::{properties, FileExtension};
use crate::locale::Locale;
use crate::translation::Key;
use crate::{DirectorySource, MessageMap};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// msgdef設定（msgdef.toml）
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MsgDefConfig {
    pub source: SourceConfig,
    pub store: StoreConfig,
    /// 相対パスの基準ディレクトリ（設定ファイルのあるディレクトリ）
    #[serde(skip)]
    base_dir: PathBuf,
}

/// メッセージディレクトリの設定
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SourceConfig {
    pub directory: PathBuf,
    pub extension: String,
    /// ファイルが無くても作成・読み込みするロケール
    pub default_locales: Vec<Locale>,
    /// デフォルトメッセージの .properties ファイル
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<PathBuf>,
    /// 不足メッセージをファイルへ追記するか
    pub append_missing: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            extension: PROPERTIES_EXTENSION.to_string(),
            default_locales: Vec::new(),
            defaults: None,
            append_missing: false,
        }
    }
}

/// 翻訳ストアの設定
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StoreConfig {
    /// `namespace:value`
    pub name: String,
    pub default_locale: Locale,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "msgdef:messages".to_string(),
            default_locale: Locale::en_us(),
        }
    }
}

impl MsgDefConfig {
    /// msgdef.tomlを読み込む
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| MsgDefError::io(path, e))?;

        let mut config: MsgDefConfig = toml::from_str(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// ディレクトリからmsgdef.tomlを探す（無ければデフォルト設定）
    pub fn find_in<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            return Self::load(path);
        }

        debug!(dir = %dir.display(), "config not found, using defaults");
        Ok(Self {
            base_dir: dir.to_path_buf(),
            ..Self::default()
        })
    }

    /// カレントディレクトリからmsgdef.tomlを探す
    pub fn find_and_load() -> Result<Self> {
        let current = std::env::current_dir().map_err(|e| MsgDefError::io(".", e))?;
        Self::find_in(current)
    }

    /// msgdef.tomlを書き込む
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| MsgDefError::io(path, e))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// メッセージディレクトリ（基準ディレクトリからの相対パスを解決済み）
    pub fn directory(&self) -> PathBuf {
        self.resolve(&self.source.directory)
    }

    pub fn file_extension(&self) -> FileExtension {
        FileExtension::new(self.source.extension.clone())
    }

    /// デフォルトメッセージを読み込む（未設定なら `None`）
    pub fn load_defaults(&self) -> Result<Option<MessageMap>> {
        match &self.source.defaults {
            Some(path) => {
                let path = self.resolve(path);
                if !path.is_file() {
                    return Err(MsgDefError::io(
                        &path,
                        std::io::Error::new(std::io::ErrorKind::NotFound, "defaults file not found"),
                    ));
                }
                properties::load_file(&path).map(Some)
            }
            None => Ok(None),
        }
    }

    /// 設定どおりの [`DirectorySource`] を作成
    ///
    /// `defaults` があれば不足メッセージを補う。`append-missing` が有効なら
    /// 不足分をファイルへ追記する。
    pub fn directory_source(&self, defaults: Option<MessageMap>) -> Result<DirectorySource> {
        let source = DirectorySource::new(self.directory())
            .file_extension(self.file_extension())
            .default_locales(self.source.default_locales.iter().cloned())
            .message_loader(properties::DEFAULT_LOADER)?;

        match defaults {
            Some(defaults) if self.source.append_missing => source.message_processor(
                processors::append_missing_messages_to_properties_file(defaults),
            ),
            Some(defaults) => source.message_processor(processors::append_missing_messages(defaults)),
            None => Ok(source),
        }
    }

    /// 翻訳ストアの名前
    pub fn store_key(&self) -> Result<Key> {
        Key::parse(&self.store.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
[source]
directory = "messages"
extension = "lang"
default-locales = ["en_US", "ja_JP"]
defaults = "defaults.properties"
append-missing = true

[store]
name = "myplugin:messages"
default-locale = "ja_JP"
"#,
        )
        .unwrap();

        let config = MsgDefConfig::load(&path).unwrap();
        assert_eq!(config.directory(), dir.path().join("messages"));
        assert_eq!(config.file_extension().as_str(), ".lang");
        assert_eq!(
            config.source.default_locales,
            vec![Locale::en_us(), Locale::new("ja").with_region("JP")]
        );
        assert!(config.source.append_missing);
        assert_eq!(config.store_key().unwrap().to_string(), "myplugin:messages");
        assert_eq!(config.store.default_locale, Locale::new("ja").with_region("JP"));
    }

    #[test]
    fn test_defaults_when_missing() {
        let dir = TempDir::new().unwrap();
        let config = MsgDefConfig::find_in(dir.path()).unwrap();

        assert_eq!(config.directory(), dir.path().join("lang"));
        assert_eq!(config.file_extension(), FileExtension::PROPERTIES);
        assert!(config.source.default_locales.is_empty());
        assert_eq!(config.store_key().unwrap().to_string(), "msgdef:messages");
        assert_eq!(config.load_defaults().unwrap(), None);
    }

    #[test]
    fn test_invalid_locale_is_parse_error() {
        let result: std::result::Result<MsgDefConfig, _> =
            toml::from_str("[source]\ndefault-locales = [\"1\"]\n");
        assert!(result.is_err());

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[store]\ndefault-locale = \"\"\n").unwrap();
        assert!(matches!(
            MsgDefConfig::load(&path),
            Err(MsgDefError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = MsgDefConfig::default();
        config.source.default_locales = vec![Locale::new("en")];
        config.store.name = "test:saved".to_string();
        config.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("default-locales"));

        let loaded = MsgDefConfig::load(&path).unwrap();
        assert_eq!(loaded.source, config.source);
        assert_eq!(loaded.store, config.store);
    }

    #[test]
    fn test_directory_source_appends_missing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("defaults.properties"), "a=A\nb=B\n").unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[source]\ndefault-locales = [\"en\"]\ndefaults = \"defaults.properties\"\nappend-missing = true\n",
        )
        .unwrap();

        let config = MsgDefConfig::find_in(dir.path()).unwrap();
        let defaults = config.load_defaults().unwrap();
        let source = config.directory_source(defaults).unwrap();

        let mut loaded = Vec::new();
        source
            .load(|map| {
                loaded.push(map);
                Ok(())
            })
            .unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].message_map()["b"], "B");

        let written = properties::load_file(&dir.path().join("lang").join("en.properties")).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written["a"], "A");
    }
}
