use crate::constants::translation::DEFAULT_NAMESPACE;
use crate::error::{MsgDefError, Result};
use std::fmt;
use std::str::FromStr;

/// 名前空間付きのキー（`namespace:value`）
///
/// 翻訳ソースの名前として使う。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    namespace: String,
    value: String,
}

impl Key {
    pub fn new(namespace: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        let value = value.into();

        if namespace.is_empty() {
            return Err(MsgDefError::invalid_key(
                format!("{}:{}", namespace, value),
                "namespace is empty",
            ));
        }
        if !namespace.chars().all(is_namespace_char) {
            return Err(MsgDefError::invalid_key(
                format!("{}:{}", namespace, value),
                "namespace must match [a-z0-9_.-]",
            ));
        }
        if value.is_empty() {
            return Err(MsgDefError::invalid_key(
                format!("{}:{}", namespace, value),
                "value is empty",
            ));
        }
        if !value.chars().all(is_value_char) {
            return Err(MsgDefError::invalid_key(
                format!("{}:{}", namespace, value),
                "value must match [a-z0-9_.-/]",
            ));
        }

        Ok(Self { namespace, value })
    }

    /// `namespace:value` をパース（名前空間省略時は `minecraft`）
    pub fn parse(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((namespace, value)) => Self::new(namespace, value),
            None => Self::new(DEFAULT_NAMESPACE, s),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

fn is_value_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.value)
    }
}

impl FromStr for Key {
    type Err = MsgDefError;

    fn from_str(s: &str) -> Result<Self> {
        Key::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let key = Key::parse("myplugin:messages/main").unwrap();
        assert_eq!(key.namespace(), "myplugin");
        assert_eq!(key.value(), "messages/main");
        assert_eq!(key.to_string(), "myplugin:messages/main");
    }

    #[test]
    fn test_default_namespace() {
        let key: Key = "languages".parse().unwrap();
        assert_eq!(key.namespace(), "minecraft");
        assert_eq!(key.to_string(), "minecraft:languages");
    }

    #[test]
    fn test_invalid() {
        assert!(Key::parse("").is_err());
        assert!(Key::parse(":value").is_err());
        assert!(Key::parse("ns:").is_err());
        assert!(Key::parse("Upper:value").is_err());
        assert!(Key::parse("ns/x:value").is_err());
        assert!(Key::parse("ns:a:b").is_err());

        let err = Key::parse("ns:Value").unwrap_err();
        assert!(matches!(err, MsgDefError::InvalidKey { .. }));
        assert!(err.to_string().contains("ns:Value"));
    }
}
