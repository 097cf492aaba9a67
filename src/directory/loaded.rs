use crate::locale::Locale;
use crate::MessageMap;
use std::path::{Path, PathBuf};

/// 読み込んだメッセージマップ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedMessageMap {
    filepath: PathBuf,
    locale: Locale,
    message_map: MessageMap,
}

impl LoadedMessageMap {
    pub fn new(filepath: impl Into<PathBuf>, locale: Locale, message_map: MessageMap) -> Self {
        Self {
            filepath: filepath.into(),
            locale,
            message_map,
        }
    }

    /// 読み込んだファイルのパス
    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn message_map(&self) -> &MessageMap {
        &self.message_map
    }

    pub fn into_message_map(self) -> MessageMap {
        self.message_map
    }

    pub fn into_parts(self) -> (PathBuf, Locale, MessageMap) {
        (self.filepath, self.locale, self.message_map)
    }
}
