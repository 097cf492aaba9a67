//! テキストコンポーネント
//!
//! 翻訳システムが扱うテキストの木構造。
//! - `Text`: そのまま表示される文字列
//! - `Translatable`: 翻訳キーと引数（描画時にロケールごとのテンプレートへ置換）
//!
//! 各ノードはスタイル（色・装飾）と子ノードを持ち、子は親のスタイルを継承する。

use std::collections::BTreeMap;
use std::fmt;

/// RGBカラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextColor(u32);

impl TextColor {
    pub const BLACK: TextColor = TextColor(0x000000);
    pub const DARK_BLUE: TextColor = TextColor(0x0000aa);
    pub const DARK_GREEN: TextColor = TextColor(0x00aa00);
    pub const DARK_AQUA: TextColor = TextColor(0x00aaaa);
    pub const DARK_RED: TextColor = TextColor(0xaa0000);
    pub const DARK_PURPLE: TextColor = TextColor(0xaa00aa);
    pub const GOLD: TextColor = TextColor(0xffaa00);
    pub const GRAY: TextColor = TextColor(0xaaaaaa);
    pub const DARK_GRAY: TextColor = TextColor(0x555555);
    pub const BLUE: TextColor = TextColor(0x5555ff);
    pub const GREEN: TextColor = TextColor(0x55ff55);
    pub const AQUA: TextColor = TextColor(0x55ffff);
    pub const RED: TextColor = TextColor(0xff5555);
    pub const LIGHT_PURPLE: TextColor = TextColor(0xff55ff);
    pub const YELLOW: TextColor = TextColor(0xffff55);
    pub const WHITE: TextColor = TextColor(0xffffff);

    /// 名前付きカラーの一覧
    const NAMED: [(&'static str, TextColor); 17] = [
        ("black", TextColor::BLACK),
        ("dark_blue", TextColor::DARK_BLUE),
        ("dark_green", TextColor::DARK_GREEN),
        ("dark_aqua", TextColor::DARK_AQUA),
        ("dark_red", TextColor::DARK_RED),
        ("dark_purple", TextColor::DARK_PURPLE),
        ("gold", TextColor::GOLD),
        ("gray", TextColor::GRAY),
        ("grey", TextColor::GRAY),
        ("dark_gray", TextColor::DARK_GRAY),
        ("blue", TextColor::BLUE),
        ("green", TextColor::GREEN),
        ("aqua", TextColor::AQUA),
        ("red", TextColor::RED),
        ("light_purple", TextColor::LIGHT_PURPLE),
        ("yellow", TextColor::YELLOW),
        ("white", TextColor::WHITE),
    ];

    pub const fn from_rgb(rgb: u32) -> Self {
        TextColor(rgb & 0xffffff)
    }

    pub fn rgb(&self) -> u32 {
        self.0
    }

    /// 名前付きカラーを取得（`dark_gray`, `grey` 等）
    pub fn named(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        Self::NAMED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, color)| *color)
    }

    /// `#rrggbb` 形式をパース
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        u32::from_str_radix(hex, 16).ok().map(TextColor)
    }

    /// 名前付きカラーまたは `#rrggbb`
    pub fn parse(s: &str) -> Option<Self> {
        Self::named(s).or_else(|| Self::from_hex(s))
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// テキスト装飾
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Decoration {
    Bold,
    Italic,
    Underlined,
    Strikethrough,
    Obfuscated,
}

impl Decoration {
    /// タグ名から装飾を取得（短縮形を含む）
    pub fn from_tag(name: &str) -> Option<Self> {
        match name {
            "bold" | "b" => Some(Decoration::Bold),
            "italic" | "i" | "em" => Some(Decoration::Italic),
            "underlined" | "u" => Some(Decoration::Underlined),
            "strikethrough" | "st" => Some(Decoration::Strikethrough),
            "obfuscated" | "obf" => Some(Decoration::Obfuscated),
            _ => None,
        }
    }
}

/// スタイル（未指定の項目は親から継承）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    pub color: Option<TextColor>,
    /// 装飾の有効/無効（キーが無い装飾は継承）
    pub decorations: BTreeMap<Decoration, bool>,
}

impl Style {
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.decorations.is_empty()
    }

    pub fn color(mut self, color: TextColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn decoration(mut self, decoration: Decoration, state: bool) -> Self {
        self.decorations.insert(decoration, state);
        self
    }

    /// 装飾の状態（未指定は `None`）
    pub fn has_decoration(&self, decoration: Decoration) -> Option<bool> {
        self.decorations.get(&decoration).copied()
    }
}

/// コンポーネントの内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Translatable { key: String, args: Vec<Component> },
}

/// テキストコンポーネント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    content: Content,
    style: Style,
    children: Vec<Component>,
}

impl Component {
    /// 空のコンポーネント
    pub fn empty() -> Self {
        Self::from_content(Content::Text(String::new()))
    }

    /// テキストコンポーネント（`Display` を実装する値なら何でも）
    pub fn text<T: fmt::Display>(value: T) -> Self {
        Self::from_content(Content::Text(value.to_string()))
    }

    /// 引数なしの翻訳可能コンポーネント
    pub fn translatable(key: impl Into<String>) -> Self {
        Self::translatable_with_args(key, Vec::new())
    }

    /// 引数付きの翻訳可能コンポーネント
    pub fn translatable_with_args(key: impl Into<String>, args: Vec<Component>) -> Self {
        Self::from_content(Content::Translatable {
            key: key.into(),
            args,
        })
    }

    fn from_content(content: Content) -> Self {
        Self {
            content,
            style: Style::default(),
            children: Vec::new(),
        }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn children(&self) -> &[Component] {
        &self.children
    }

    /// 翻訳キー（翻訳可能コンポーネントのみ）
    pub fn key(&self) -> Option<&str> {
        match &self.content {
            Content::Translatable { key, .. } => Some(key),
            Content::Text(_) => None,
        }
    }

    /// 翻訳引数（翻訳可能コンポーネント以外は空）
    pub fn args(&self) -> &[Component] {
        match &self.content {
            Content::Translatable { args, .. } => args,
            Content::Text(_) => &[],
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn color(mut self, color: TextColor) -> Self {
        self.style.color = Some(color);
        self
    }

    pub fn decorate(mut self, decoration: Decoration) -> Self {
        self.style.decorations.insert(decoration, true);
        self
    }

    /// 子コンポーネントを追加
    pub fn append(mut self, child: impl Into<Component>) -> Self {
        self.children.push(child.into());
        self
    }

    pub(crate) fn push_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// 内容・スタイルを保ったまま子と引数を置き換える（描画用）
    pub(crate) fn map_parts<F>(&self, mut f: F) -> Component
    where
        F: FnMut(&Component) -> Component,
    {
        let content = match &self.content {
            Content::Text(text) => Content::Text(text.clone()),
            Content::Translatable { key, args } => Content::Translatable {
                key: key.clone(),
                args: args.iter().map(&mut f).collect(),
            },
        };
        Component {
            content,
            style: self.style.clone(),
            children: self.children.iter().map(&mut f).collect(),
        }
    }

    /// スタイルを除いたプレーンテキストに変換
    ///
    /// 未翻訳の翻訳可能コンポーネントはキーを出力する。
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        self.write_plain(&mut out);
        out
    }

    fn write_plain(&self, out: &mut String) {
        match &self.content {
            Content::Text(text) => out.push_str(text),
            Content::Translatable { key, .. } => out.push_str(key),
        }
        for child in &self.children {
            child.write_plain(out);
        }
    }
}

impl Default for Component {
    fn default() -> Self {
        Component::empty()
    }
}

impl From<&str> for Component {
    fn from(s: &str) -> Self {
        Component::text(s)
    }
}

impl From<String> for Component {
    fn from(s: String) -> Self {
        Component::from_content(Content::Text(s))
    }
}

/// コンポーネントに変換できる型
pub trait ComponentLike {
    fn as_component(&self) -> Component;
}

impl ComponentLike for Component {
    fn as_component(&self) -> Component {
        self.clone()
    }
}
