//! メッセージキー
//!
//! 翻訳キーと、引数をコンポーネントへ変換するプレースホルダーの組。
//! 引数の個数ごとに型（`Arg1`〜`Arg5`）を分け、`apply` の呼び出しを型で検査する。

use crate::component::{Component, ComponentLike};
use crate::error::{MsgDefError, Result};
use std::fmt;
use std::sync::Arc;

/// 値からコンポーネントを作る関数
pub trait Placeholder<T>: Send + Sync {
    fn apply(&self, value: T) -> Component;
}

impl<T, F, C> Placeholder<T> for F
where
    F: Fn(T) -> C + Send + Sync,
    C: Into<Component>,
{
    fn apply(&self, value: T) -> Component {
        self(value).into()
    }
}

/// 共有されたプレースホルダー
type SharedPlaceholder<T> = Arc<dyn Placeholder<T>>;

fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(MsgDefError::EmptyKey);
    }
    Ok(())
}

/// メッセージのキー
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageKey {
    key: String,
}

impl MessageKey {
    /// キーからメッセージキーを作成（空文字列はエラー）
    pub fn key(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        check_key(&key)?;
        Ok(Self { key })
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// 引数1個のメッセージキーを作成
    pub fn arg1<A1>(key: impl Into<String>, arg1: impl Placeholder<A1> + 'static) -> Result<Arg1<A1>> {
        Ok(MessageKey::key(key)?.with1(arg1))
    }

    /// 引数2個のメッセージキーを作成
    pub fn arg2<A1, A2>(
        key: impl Into<String>,
        arg1: impl Placeholder<A1> + 'static,
        arg2: impl Placeholder<A2> + 'static,
    ) -> Result<Arg2<A1, A2>> {
        Ok(MessageKey::key(key)?.with2(arg1, arg2))
    }

    /// 引数3個のメッセージキーを作成
    pub fn arg3<A1, A2, A3>(
        key: impl Into<String>,
        arg1: impl Placeholder<A1> + 'static,
        arg2: impl Placeholder<A2> + 'static,
        arg3: impl Placeholder<A3> + 'static,
    ) -> Result<Arg3<A1, A2, A3>> {
        Ok(MessageKey::key(key)?.with3(arg1, arg2, arg3))
    }

    /// 引数4個のメッセージキーを作成
    pub fn arg4<A1, A2, A3, A4>(
        key: impl Into<String>,
        arg1: impl Placeholder<A1> + 'static,
        arg2: impl Placeholder<A2> + 'static,
        arg3: impl Placeholder<A3> + 'static,
        arg4: impl Placeholder<A4> + 'static,
    ) -> Result<Arg4<A1, A2, A3, A4>> {
        Ok(MessageKey::key(key)?.with4(arg1, arg2, arg3, arg4))
    }

    /// 引数5個のメッセージキーを作成
    pub fn arg5<A1, A2, A3, A4, A5>(
        key: impl Into<String>,
        arg1: impl Placeholder<A1> + 'static,
        arg2: impl Placeholder<A2> + 'static,
        arg3: impl Placeholder<A3> + 'static,
        arg4: impl Placeholder<A4> + 'static,
        arg5: impl Placeholder<A5> + 'static,
    ) -> Result<Arg5<A1, A2, A3, A4, A5>> {
        Ok(MessageKey::key(key)?.with5(arg1, arg2, arg3, arg4, arg5))
    }

    /// このキーに引数1個を付与
    pub fn with1<A1>(&self, arg1: impl Placeholder<A1> + 'static) -> Arg1<A1> {
        Arg1 {
            key: self.key.clone(),
            arg1: Arc::new(arg1),
        }
    }

    /// このキーに引数2個を付与
    pub fn with2<A1, A2>(
        &self,
        arg1: impl Placeholder<A1> + 'static,
        arg2: impl Placeholder<A2> + 'static,
    ) -> Arg2<A1, A2> {
        Arg2 {
            key: self.key.clone(),
            arg1: Arc::new(arg1),
            arg2: Arc::new(arg2),
        }
    }

    /// このキーに引数3個を付与
    pub fn with3<A1, A2, A3>(
        &self,
        arg1: impl Placeholder<A1> + 'static,
        arg2: impl Placeholder<A2> + 'static,
        arg3: impl Placeholder<A3> + 'static,
    ) -> Arg3<A1, A2, A3> {
        Arg3 {
            key: self.key.clone(),
            arg1: Arc::new(arg1),
            arg2: Arc::new(arg2),
            arg3: Arc::new(arg3),
        }
    }

    /// このキーに引数4個を付与
    pub fn with4<A1, A2, A3, A4>(
        &self,
        arg1: impl Placeholder<A1> + 'static,
        arg2: impl Placeholder<A2> + 'static,
        arg3: impl Placeholder<A3> + 'static,
        arg4: impl Placeholder<A4> + 'static,
    ) -> Arg4<A1, A2, A3, A4> {
        Arg4 {
            key: self.key.clone(),
            arg1: Arc::new(arg1),
            arg2: Arc::new(arg2),
            arg3: Arc::new(arg3),
            arg4: Arc::new(arg4),
        }
    }

    /// このキーに引数5個を付与
    pub fn with5<A1, A2, A3, A4, A5>(
        &self,
        arg1: impl Placeholder<A1> + 'static,
        arg2: impl Placeholder<A2> + 'static,
        arg3: impl Placeholder<A3> + 'static,
        arg4: impl Placeholder<A4> + 'static,
        arg5: impl Placeholder<A5> + 'static,
    ) -> Arg5<A1, A2, A3, A4, A5> {
        Arg5 {
            key: self.key.clone(),
            arg1: Arc::new(arg1),
            arg2: Arc::new(arg2),
            arg3: Arc::new(arg3),
            arg4: Arc::new(arg4),
            arg5: Arc::new(arg5),
        }
    }
}

impl ComponentLike for MessageKey {
    fn as_component(&self) -> Component {
        Component::translatable(self.key.as_str())
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

// Arg1〜Arg5 の定義（フィールド・Clone・Debug・apply）を生成
macro_rules! define_arg_key {
    ($(#[$doc:meta])* $name:ident { $($field:ident : $ty:ident),+ }) => {
        $(#[$doc])*
        pub struct $name<$($ty),+> {
            key: String,
            $($field: SharedPlaceholder<$ty>,)+
        }

        impl<$($ty),+> $name<$($ty),+> {
            /// メッセージのキー
            pub fn key(&self) -> &str {
                &self.key
            }

            /// 引数をコンポーネントへ変換し、翻訳可能コンポーネントを作成
            #[allow(clippy::too_many_arguments)]
            pub fn apply(&self, $($field: $ty),+) -> Component {
                Component::translatable_with_args(
                    self.key.as_str(),
                    vec![$(self.$field.apply($field)),+],
                )
            }
        }

        impl<$($ty),+> Clone for $name<$($ty),+> {
            fn clone(&self) -> Self {
                Self {
                    key: self.key.clone(),
                    $($field: Arc::clone(&self.$field),)+
                }
            }
        }

        impl<$($ty),+> fmt::Debug for $name<$($ty),+> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("key", &self.key)
                    .finish_non_exhaustive()
            }
        }
    };
}

define_arg_key! {
    /// 引数1個のメッセージキー
    Arg1 { arg1: A1 }
}

define_arg_key! {
    /// 引数2個のメッセージキー
    Arg2 { arg1: A1, arg2: A2 }
}

define_arg_key! {
    /// 引数3個のメッセージキー
    Arg3 { arg1: A1, arg2: A2, arg3: A3 }
}

define_arg_key! {
    /// 引数4個のメッセージキー
    Arg4 { arg1: A1, arg2: A2, arg3: A3, arg4: A4 }
}

define_arg_key! {
    /// 引数5個のメッセージキー
    Arg5 { arg1: A1, arg2: A2, arg3: A3, arg4: A4, arg5: A5 }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "test";

    fn uuid_text(id: (u64, u64)) -> Component {
        Component::text(format!("{:016x}{:016x}", id.0, id.1))
    }

    const ID: (u64, u64) = (0xb56fa849896046cf, 0x8c477f2f2d522c0a);

    #[test]
    fn test_key() {
        let msg = MessageKey::key(KEY).unwrap();
        assert_eq!(msg.as_str(), KEY);
        assert_eq!(msg.as_component(), Component::translatable(KEY));
        assert_eq!(msg.to_string(), KEY);

        assert!(matches!(MessageKey::key(""), Err(MsgDefError::EmptyKey)));
    }

    #[test]
    fn test_arg1() {
        let msg = MessageKey::arg1(KEY, Component::text::<String>).unwrap();
        assert_eq!(msg.key(), KEY);
        assert_eq!(
            msg.apply("test".to_string()),
            Component::translatable_with_args(KEY, vec![Component::text("test")])
        );

        assert!(MessageKey::arg1("", Component::text::<String>).is_err());
    }

    #[test]
    fn test_arg2() {
        let msg = MessageKey::arg2(KEY, Component::text::<&str>, Component::text::<i32>).unwrap();
        assert_eq!(msg.key(), KEY);
        assert_eq!(
            msg.apply("test", 42),
            Component::translatable_with_args(
                KEY,
                vec![Component::text("test"), Component::text(42)]
            )
        );

        assert!(MessageKey::arg2("", Component::text::<&str>, Component::text::<i32>).is_err());
    }

    #[test]
    fn test_arg3() {
        let msg = MessageKey::arg3(
            KEY,
            Component::text::<&str>,
            Component::text::<i32>,
            Component::text::<f64>,
        )
        .unwrap();
        assert_eq!(
            msg.apply("test", 42, 2.5),
            Component::translatable_with_args(
                KEY,
                vec![
                    Component::text("test"),
                    Component::text(42),
                    Component::text(2.5)
                ]
            )
        );
    }

    #[test]
    fn test_arg4() {
        let msg = MessageKey::arg4(
            KEY,
            Component::text::<&str>,
            Component::text::<i32>,
            Component::text::<f64>,
            Component::text::<bool>,
        )
        .unwrap();
        assert_eq!(
            msg.apply("test", 42, 2.5, true),
            Component::translatable_with_args(
                KEY,
                vec![
                    Component::text("test"),
                    Component::text(42),
                    Component::text(2.5),
                    Component::text(true)
                ]
            )
        );
    }

    #[test]
    fn test_arg5() {
        let msg = MessageKey::arg5(
            KEY,
            Component::text::<&str>,
            Component::text::<i32>,
            Component::text::<f64>,
            Component::text::<bool>,
            uuid_text,
        )
        .unwrap();
        assert_eq!(
            msg.apply("test", 42, 2.5, true, ID),
            Component::translatable_with_args(
                KEY,
                vec![
                    Component::text("test"),
                    Component::text(42),
                    Component::text(2.5),
                    Component::text(true),
                    uuid_text(ID)
                ]
            )
        );

        assert!(MessageKey::arg5(
            "",
            Component::text::<&str>,
            Component::text::<i32>,
            Component::text::<f64>,
            Component::text::<bool>,
            uuid_text,
        )
        .is_err());
    }

    #[test]
    fn test_with() {
        let key = MessageKey::key(KEY).unwrap();

        let msg1 = key.with1(Component::text::<&str>);
        assert_eq!(msg1.key(), KEY);
        assert_eq!(
            msg1.apply("a"),
            Component::translatable_with_args(KEY, vec![Component::text("a")])
        );

        let msg2 = key.with2(Component::text::<&str>, Component::text::<i32>);
        assert_eq!(msg2.apply("a", 1).args().len(), 2);

        let msg3 = key.with3(
            Component::text::<&str>,
            Component::text::<i32>,
            Component::text::<f64>,
        );
        assert_eq!(msg3.apply("a", 1, 2.5).args().len(), 3);

        let msg4 = key.with4(
            Component::text::<&str>,
            Component::text::<i32>,
            Component::text::<f64>,
            Component::text::<bool>,
        );
        assert_eq!(msg4.apply("a", 1, 2.5, false).args().len(), 4);

        let msg5 = key.with5(
            Component::text::<&str>,
            Component::text::<i32>,
            Component::text::<f64>,
            Component::text::<bool>,
            uuid_text,
        );
        let applied = msg5.apply("a", 1, 2.5, false, ID);
        assert_eq!(applied.key(), Some(KEY));
        assert_eq!(applied.args()[4], uuid_text(ID));
    }

    #[test]
    fn test_closure_placeholder() {
        let prefix = String::from("#");
        let msg = MessageKey::key("rank")
            .unwrap()
            .with1(move |n: u32| format!("{}{}", prefix, n));
        assert_eq!(msg.apply(3).args()[0], Component::text("#3"));

        // Cloneしたキーはプレースホルダーを共有
        let cloned = msg.clone();
        assert_eq!(cloned.apply(7).args()[0], Component::text("#7"));
        assert!(format!("{:?}", cloned).contains("rank"));
    }
}
