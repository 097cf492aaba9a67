//! ディレクトリからのメッセージ読み込み
//!
//! 読み込みの流れ:
//! 1. ディレクトリ直下のファイルのうち、ファイル名がロケールになるものを収集
//! 2. 見つからず、デフォルトロケールも無ければ何もしない
//! 3. デフォルトロケールのファイルパスを追加（未収集のもののみ）
//! 4. パス順にローダー（+プロセッサー）を適用して結果を渡す

use crate::directory::LoadedMessageMap;
use crate::error::{MsgDefError, Result};
use crate::file::{properties, FileExtension, Loader};
use crate::locale::Locale;
use crate::translation::{GlobalTranslator, Key, TranslationStore};
use crate::{new_hashset, HashSet, MessageMap};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// 読み込み対象のファイル
struct LoadContext {
    filepath: PathBuf,
    locale: Locale,
}

/// ローダーとプロセッサーを合成した読み込み処理
type LoadFn = dyn Fn(&LoadContext) -> Result<LoadedMessageMap> + Send + Sync;

/// ディレクトリからメッセージマップを読み込む
///
/// 設定メソッドはいずれも新しいインスタンスを返す。
#[derive(Clone)]
pub struct DirectorySource {
    directory: PathBuf,
    default_locales: HashSet<Locale>,
    file_extension: Option<FileExtension>,
    loader: Option<Arc<LoadFn>>,
}

impl DirectorySource {
    /// 拡張子・ローダー未設定のソースを作成
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            default_locales: new_hashset(),
            file_extension: None,
            loader: None,
        }
    }

    /// [`DirectorySource::new`] と同じ
    pub fn create(directory: impl Into<PathBuf>) -> Self {
        Self::new(directory)
    }

    /// 文字列のメッセージマップを読み込むソースを作成（[`DirectorySource::new`] と同じ）
    pub fn for_string_message_map(directory: impl Into<PathBuf>) -> Self {
        Self::new(directory)
    }

    /// `.properties` ファイルを読み込むソースを作成
    pub fn properties_files(directory: impl Into<PathBuf>) -> Self {
        let mut source = Self::new(directory).file_extension(FileExtension::PROPERTIES);
        source.loader = Some(Self::wrap_loader(properties::DEFAULT_LOADER));
        source
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn extension(&self) -> Option<&FileExtension> {
        self.file_extension.as_ref()
    }

    /// ファイル拡張子を設定
    pub fn file_extension(mut self, file_extension: FileExtension) -> Self {
        self.file_extension = Some(file_extension);
        self
    }

    /// デフォルトロケールを追加
    ///
    /// デフォルトロケールのファイルは存在しなくても読み込み対象になる。
    pub fn default_locale(mut self, locale: Locale) -> Self {
        self.default_locales.insert(locale);
        self
    }

    /// デフォルトロケールをまとめて追加
    pub fn default_locales<I>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = Locale>,
    {
        self.default_locales.extend(locales);
        self
    }

    /// ファイルからメッセージマップを読み込むローダーを設定
    ///
    /// 既に設定済みの場合はエラー。
    pub fn message_loader<L>(mut self, loader: L) -> Result<Self>
    where
        L: for<'a> Loader<&'a Path, MessageMap> + Send + Sync + 'static,
    {
        if self.loader.is_some() {
            return Err(MsgDefError::LoaderAlreadySet);
        }
        self.loader = Some(Self::wrap_loader(loader));
        Ok(self)
    }

    fn wrap_loader<L>(loader: L) -> Arc<LoadFn>
    where
        L: for<'a> Loader<&'a Path, MessageMap> + Send + Sync + 'static,
    {
        Arc::new(move |ctx: &LoadContext| {
            let map = loader.load(ctx.filepath.as_path())?;
            Ok(LoadedMessageMap::new(
                ctx.filepath.clone(),
                ctx.locale.clone(),
                map,
            ))
        })
    }

    /// 読み込んだメッセージマップを加工するプロセッサーを追加
    ///
    /// ローダーが未設定の場合はエラー。プロセッサーは追加した順に適用される。
    pub fn message_processor<P>(mut self, processor: P) -> Result<Self>
    where
        P: Loader<LoadedMessageMap, MessageMap> + Send + Sync + 'static,
    {
        let previous = self.loader.clone().ok_or(MsgDefError::LoaderNotSet)?;
        let loader: Arc<LoadFn> = Arc::new(move |ctx: &LoadContext| {
            let loaded = previous(ctx)?;
            let map = processor.load(loaded)?;
            Ok(LoadedMessageMap::new(
                ctx.filepath.clone(),
                ctx.locale.clone(),
                map,
            ))
        });
        self.loader = Some(loader);
        Ok(self)
    }

    /// 読み込みを実行し、結果を順に `consumer` へ渡す
    ///
    /// ファイル拡張子とローダーは設定済みである必要がある。
    pub fn load<F>(&self, mut consumer: F) -> Result<()>
    where
        F: FnMut(LoadedMessageMap) -> Result<()>,
    {
        let extension = self
            .file_extension
            .as_ref()
            .ok_or(MsgDefError::FileExtensionNotSet)?;
        let loader = self.loader.as_ref().ok_or(MsgDefError::LoaderNotSet)?;

        let mut files = collect_files(&self.directory, extension)?;

        if files.is_empty() {
            if self.default_locales.is_empty() {
                debug!(directory = %self.directory.display(), "no message files found");
                return Ok(());
            }
            // この時点ではディレクトリが存在しない可能性がある
            fs::create_dir_all(&self.directory)
                .map_err(|e| MsgDefError::io(&self.directory, e))?;
        }

        for locale in &self.default_locales {
            let filepath = self.directory.join(extension.to_file_name(locale));
            files.entry(filepath).or_insert_with(|| locale.clone());
        }

        for (filepath, locale) in files {
            debug!(path = %filepath.display(), %locale, "loading messages");
            let loaded = loader(&LoadContext { filepath, locale })?;
            consumer(loaded)?;
        }

        Ok(())
    }

    /// 読み込んだメッセージを翻訳ストアとして返す
    pub fn load_as_translation_store(&self, key: Key) -> Result<TranslationStore> {
        let store = TranslationStore::new(key);
        self.load(|loaded| store.register_all(loaded.locale(), loaded.message_map()))?;
        Ok(store)
    }

    /// 読み込んだメッセージを翻訳ストアとしてグローバルトランスレーターへ登録
    pub fn load_and_register(&self, key: Key) -> Result<Arc<TranslationStore>> {
        let store = Arc::new(self.load_as_translation_store(key)?);
        if !GlobalTranslator::translator().add_source(store.clone()) {
            warn!(name = %store.name(), "a translation source with the same name is already registered");
        }
        Ok(store)
    }
}

impl fmt::Debug for DirectorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectorySource")
            .field("directory", &self.directory)
            .field("default_locales", &self.default_locales)
            .field("file_extension", &self.file_extension)
            .field("loader", &self.loader.is_some())
            .finish()
    }
}

/// ディレクトリ直下のメッセージファイルを収集（パス順）
fn collect_files(directory: &Path, extension: &FileExtension) -> Result<BTreeMap<PathBuf, Locale>> {
    let mut files = BTreeMap::new();
    if !directory.is_dir() {
        return Ok(files);
    }

    let entries = fs::read_dir(directory).map_err(|e| MsgDefError::io(directory, e))?;
    for entry in entries {
        let path = entry.map_err(|e| MsgDefError::io(directory, e))?.path();
        if !path.is_file() {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            warn!(path = %path.display(), "skipping file with non UTF-8 name");
            continue;
        };

        match extension.parse(file_name) {
            Some(locale) => {
                files.insert(path, locale);
            }
            None => debug!(path = %path.display(), "skipping file that is not a message file"),
        }
    }

    Ok(files)
}
