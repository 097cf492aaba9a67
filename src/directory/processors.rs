//! 読み込み後のメッセージ加工
//!
//! [`DirectorySource::message_processor`](crate::DirectorySource::message_processor) に渡すプロセッサー。
//! デフォルトメッセージのうち、読み込んだマップに無いものを追加する。
//! 追記先（ファイル等）が指定されていれば、不足分だけをそこへ書き出す。

use crate::directory::LoadedMessageMap;
use crate::error::Result;
use crate::file::{properties, Loader, MessageAppender};
use crate::locale::Locale;
use crate::MessageMap;
use std::path::Path;
use tracing::info;

/// 不足メッセージをメモリ上のマップにだけ追加する
pub fn append_missing_messages(
    defaults: MessageMap,
) -> impl Fn(LoadedMessageMap) -> Result<MessageMap> + Send + Sync + 'static {
    move |loaded| append_missing(loaded, &defaults, None::<&NoAppender>)
}

/// 不足メッセージを追加し、不足分を `appender` へ書き出す
pub fn append_missing_messages_with<A>(
    defaults: MessageMap,
    appender: A,
) -> impl Fn(LoadedMessageMap) -> Result<MessageMap> + Send + Sync + 'static
where
    A: MessageAppender<Path, MessageMap> + Send + Sync + 'static,
{
    move |loaded| append_missing(loaded, &defaults, Some(&appender))
}

/// ロケールごとのデフォルトメッセージを `default_loader` から取得して追加する
///
/// `default_loader` が `None` を返したロケールは何もしない。
pub fn append_missing_messages_from<D>(
    default_loader: D,
) -> impl Fn(LoadedMessageMap) -> Result<MessageMap> + Send + Sync + 'static
where
    D: for<'a> Loader<&'a Locale, Option<MessageMap>> + Send + Sync + 'static,
{
    move |loaded| match default_loader.load(loaded.locale())? {
        Some(defaults) => append_missing(loaded, &defaults, None::<&NoAppender>),
        None => Ok(loaded.into_message_map()),
    }
}

/// [`append_missing_messages_from`] に追記先を加えたもの
pub fn append_missing_messages_from_with<D, A>(
    default_loader: D,
    appender: A,
) -> impl Fn(LoadedMessageMap) -> Result<MessageMap> + Send + Sync + 'static
where
    D: for<'a> Loader<&'a Locale, Option<MessageMap>> + Send + Sync + 'static,
    A: MessageAppender<Path, MessageMap> + Send + Sync + 'static,
{
    move |loaded| match default_loader.load(loaded.locale())? {
        Some(defaults) => append_missing(loaded, &defaults, Some(&appender)),
        None => Ok(loaded.into_message_map()),
    }
}

/// 不足メッセージを追加し、読み込んだ `.properties` ファイルへ追記する
pub fn append_missing_messages_to_properties_file(
    defaults: MessageMap,
) -> impl Fn(LoadedMessageMap) -> Result<MessageMap> + Send + Sync + 'static {
    append_missing_messages_with(defaults, properties::DEFAULT_APPENDER)
}

/// [`append_missing_messages_to_properties_file`] のロケール別版
pub fn append_missing_messages_to_properties_file_from<D>(
    default_loader: D,
) -> impl Fn(LoadedMessageMap) -> Result<MessageMap> + Send + Sync + 'static
where
    D: for<'a> Loader<&'a Locale, Option<MessageMap>> + Send + Sync + 'static,
{
    append_missing_messages_from_with(default_loader, properties::DEFAULT_APPENDER)
}

/// 追記先なしを表す型（`None` の型付け用）
type NoAppender = fn(&Path, &MessageMap) -> Result<()>;

fn append_missing<A>(
    loaded: LoadedMessageMap,
    defaults: &MessageMap,
    appender: Option<&A>,
) -> Result<MessageMap>
where
    A: MessageAppender<Path, MessageMap> + ?Sized,
{
    let (filepath, locale, mut messages) = loaded.into_parts();

    let mut missing = MessageMap::new();
    for (key, value) in defaults {
        if !messages.contains_key(key) {
            messages.insert(key.clone(), value.clone());
            missing.insert(key.clone(), value.clone());
        }
    }

    if let Some(appender) = appender {
        if !missing.is_empty() {
            info!(
                path = %filepath.display(),
                %locale,
                count = missing.len(),
                "appending missing messages"
            );
            appender.append(&filepath, &missing)?;
        }
    }

    Ok(messages)
}
