//! 読み込み・追記の抽象
//!
//! どちらもクロージャや関数をそのまま渡せるよう、`Fn` に対して実装している。

use crate::error::Result;

/// 入力から値を読み込む
pub trait Loader<I, O> {
    fn load(&self, input: I) -> Result<O>;
}

impl<I, O, F> Loader<I, O> for F
where
    F: Fn(I) -> Result<O>,
{
    fn load(&self, input: I) -> Result<O> {
        self(input)
    }
}

/// メッセージを追記する
///
/// `T` は追記先（ファイルパス等）、`S` は追記するメッセージ。
pub trait MessageAppender<T: ?Sized, S: ?Sized> {
    fn append(&self, target: &T, messages: &S) -> Result<()>;
}

impl<T, S, F> MessageAppender<T, S> for F
where
    T: ?Sized,
    S: ?Sized,
    F: Fn(&T, &S) -> Result<()>,
{
    fn append(&self, target: &T, messages: &S) -> Result<()> {
        self(target, messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MsgDefError;
    use std::cell::RefCell;

    #[test]
    fn test_closure_loader() {
        let loader = |n: usize| -> Result<String> {
            if n == 0 {
                Err(MsgDefError::EmptyKey)
            } else {
                Ok("x".repeat(n))
            }
        };
        assert_eq!(loader.load(3).unwrap(), "xxx");
        assert!(loader.load(0).is_err());
    }

    #[test]
    fn test_closure_appender() {
        let sink = RefCell::new(Vec::new());
        let appender = |target: &str, messages: &[&str]| -> Result<()> {
            sink.borrow_mut().push(format!("{}:{}", target, messages.join(",")));
            Ok(())
        };
        appender.append("a", &["1", "2"][..]).unwrap();
        assert_eq!(sink.borrow().as_slice(), ["a:1,2".to_string()]);
    }
}
