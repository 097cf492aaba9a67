//! アプリケーション全体で使用される定数

/// 環境変数関連の定数
pub mod env {
    /// msgdef専用の言語設定（LANGより優先）
    pub const MSGDEF_LANG: &str = "MSGDEF_LANG";
    /// システムのロケール設定
    pub const LANG: &str = "LANG";
}

/// ファイル関連の定数
pub mod file {
    /// .propertiesファイルの拡張子
    pub const PROPERTIES_EXTENSION: &str = ".properties";
    /// 設定ファイル名
    pub const CONFIG_FILE_NAME: &str = "msgdef.toml";
    /// 設定ファイルが無い場合のメッセージディレクトリ
    pub const DEFAULT_DIRECTORY: &str = "lang";

    /// .propertiesに書き込む改行文字
    #[cfg(windows)]
    pub const LINE_SEPARATOR: &str = "\r\n";
    #[cfg(not(windows))]
    pub const LINE_SEPARATOR: &str = "\n";
}

/// 翻訳関連の定数
pub mod translation {
    /// 名前空間を省略したキーの名前空間
    pub const DEFAULT_NAMESPACE: &str = "minecraft";
    /// 翻訳ストアのデフォルトロケール（言語）
    pub const DEFAULT_LANGUAGE: &str = "en";
    /// 翻訳ストアのデフォルトロケール（地域）
    pub const DEFAULT_REGION: &str = "US";
}
