//! デフォルトメッセージの定義
//!
//! キーを定義するたびにデフォルトメッセージを定義順に収集する。
//! 収集したマップは `.properties` への追記や翻訳ストアへの登録に使う。

use crate::error::Result;
use crate::key::MessageKey;
use crate::MessageMap;

/// メッセージキーを定義し、デフォルトメッセージを収集する
#[derive(Debug, Default)]
pub struct DefaultMessageDefiner {
    messages: MessageMap,
}

impl DefaultMessageDefiner {
    pub fn create() -> Self {
        Self::default()
    }

    /// キーとデフォルトメッセージを定義してキーを返す
    ///
    /// 同じキーを再定義した場合、メッセージは上書きされ順序は最初の定義のまま。
    pub fn define(
        &mut self,
        key: impl Into<String>,
        default_message: impl Into<String>,
    ) -> Result<MessageKey> {
        let key = MessageKey::key(key)?;
        self.messages
            .insert(key.as_str().to_string(), default_message.into());
        Ok(key)
    }

    /// 定義済みのキーとデフォルトメッセージ（定義順）
    pub fn collected_messages(&self) -> &MessageMap {
        &self.messages
    }

    /// 収集したマップを取り出す
    pub fn into_messages(self) -> MessageMap {
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MsgDefError;

    #[test]
    fn test_define() {
        let mut definer = DefaultMessageDefiner::create();
        assert!(definer.collected_messages().is_empty());

        let key = definer.define("test1", "test1 message").unwrap();
        assert_eq!(key.as_str(), "test1");
        assert_eq!(
            definer.collected_messages().get("test1").map(String::as_str),
            Some("test1 message")
        );

        let key2 = definer.define("test2", "test2 message").unwrap();
        assert_eq!(key2.as_str(), "test2");

        let key3 = definer.define("test3", "test3 message").unwrap();
        assert_eq!(key3.as_str(), "test3");

        // 定義順を保持
        let entries: Vec<(&str, &str)> = definer
            .collected_messages()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("test1", "test1 message"),
                ("test2", "test2 message"),
                ("test3", "test3 message"),
            ]
        );
    }

    #[test]
    fn test_empty_key() {
        let mut definer = DefaultMessageDefiner::create();
        assert!(matches!(
            definer.define("", "test message"),
            Err(MsgDefError::EmptyKey)
        ));
        // 失敗した定義は収集されない
        assert!(definer.collected_messages().is_empty());
    }

    #[test]
    fn test_redefine_keeps_position() {
        let mut definer = DefaultMessageDefiner::create();
        definer.define("a", "first").unwrap();
        definer.define("b", "second").unwrap();
        definer.define("a", "replaced").unwrap();

        let messages = definer.into_messages();
        let keys: Vec<&String> = messages.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(messages["a"], "replaced");
    }
}
