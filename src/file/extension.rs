//! ファイル拡張子
//!
//! `ja_JP.properties` のようなファイル名とロケールを相互変換する。

use crate::constants::file::PROPERTIES_EXTENSION;
use crate::locale::Locale;
use std::borrow::Cow;
use std::fmt;

/// メッセージファイルの拡張子（先頭の `.` を含む）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileExtension(Cow<'static, str>);

impl FileExtension {
    /// `.properties`
    pub const PROPERTIES: FileExtension = FileExtension(Cow::Borrowed(PROPERTIES_EXTENSION));

    /// 拡張子を作成（`.` が無ければ補う）
    pub fn new(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        if extension.starts_with('.') {
            FileExtension(Cow::Owned(extension))
        } else {
            FileExtension(Cow::Owned(format!(".{}", extension)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ファイル名からロケールを取得（拡張子が違う・ロケールでない場合は `None`）
    pub fn parse(&self, file_name: &str) -> Option<Locale> {
        let stem = file_name.strip_suffix(self.as_str())?;
        Locale::parse(stem)
    }

    /// ロケールからファイル名を作成
    pub fn to_file_name(&self, locale: &Locale) -> String {
        format!("{}{}", locale, self.as_str())
    }
}

impl fmt::Display for FileExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
