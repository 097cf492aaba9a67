//! MiniMessage形式のテンプレート
//!
//! 対応するタグ:
//! - `<arg:N>` / `<argument:N>`: N番目の引数
//! - `<red>`, `<#ff5555>`, `<color:red>`: 文字色
//! - `<bold>`, `<b>`, `<!bold>` など: 装飾（`!` で無効化）
//! - `</tag>`: 対応する開きタグを閉じる
//! - `<reset>`: 開いているタグをすべて閉じる
//! - `<newline>`, `<br>`: 改行
//!
//! 解釈できないタグはそのまま文字列として残す。

use crate::component::{Component, Decoration, Style, TextColor};

/// テンプレートを描画
pub fn render(template: &str, args: &[Component]) -> Component {
    Renderer::new(template, args).run()
}

/// 開いているタグ
struct Frame {
    name: String,
    node: Component,
}

/// タグの解釈結果
enum Tag<'a> {
    Open { name: String, style: Style },
    Close(String),
    Reset,
    Newline,
    Insert(&'a Component),
}

struct Renderer<'a> {
    input: Vec<char>,
    pos: usize,
    args: &'a [Component],
    stack: Vec<Frame>,
    text: String,
}

impl<'a> Renderer<'a> {
    fn new(template: &str, args: &'a [Component]) -> Self {
        Renderer {
            input: template.chars().collect(),
            pos: 0,
            args,
            stack: vec![Frame {
                name: String::new(),
                node: Component::empty(),
            }],
            text: String::new(),
        }
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn run(mut self) -> Component {
        while let Some(ch) = self.current() {
            match ch {
                '\\' if matches!(self.peek(1), Some('<') | Some('\\')) => {
                    if let Some(escaped) = self.peek(1) {
                        self.text.push(escaped);
                    }
                    self.pos += 2;
                }
                '<' => self.read_tag(),
                _ => {
                    self.text.push(ch);
                    self.pos += 1;
                }
            }
        }

        self.flush();
        self.close_until(1);
        match self.stack.pop() {
            Some(root) => root.node,
            None => Component::empty(),
        }
    }

    /// `<` の位置からタグを読む
    fn read_tag(&mut self) {
        let start = self.pos + 1;
        let mut end = start;
        while end < self.input.len() && self.input[end] != '>' && self.input[end] != '<' {
            end += 1;
        }

        // 閉じ `>` が無い、または途中で別の `<` が始まる
        if end >= self.input.len() || self.input[end] != '>' {
            self.text.push('<');
            self.pos += 1;
            return;
        }

        let body: String = self.input[start..end].iter().collect();
        self.pos = end + 1;

        match self.parse_tag(&body) {
            Some(tag) => self.apply(tag, &body),
            None => {
                self.text.push('<');
                self.text.push_str(&body);
                self.text.push('>');
            }
        }
    }

    fn parse_tag(&self, body: &str) -> Option<Tag<'a>> {
        if body.is_empty() {
            return None;
        }

        if let Some(name) = body.strip_prefix('/') {
            return (!name.is_empty()).then(|| Tag::Close(tag_name(name)));
        }

        let (name, value) = match body.split_once(':') {
            Some((name, value)) => (name.to_ascii_lowercase(), Some(value)),
            None => (body.to_ascii_lowercase(), None),
        };

        match (name.as_str(), value) {
            ("reset", None) => Some(Tag::Reset),
            ("newline" | "br", None) => Some(Tag::Newline),
            ("arg" | "argument", Some(index)) => {
                let index: usize = index.parse().ok()?;
                self.args.get(index).map(Tag::Insert)
            }
            ("color" | "colour" | "c", Some(color)) => TextColor::parse(color).map(|color| Tag::Open {
                name: name.clone(),
                style: Style::default().color(color),
            }),
            (_, None) => parse_style(&name).map(|style| Tag::Open {
                name: name.clone(),
                style,
            }),
            _ => None,
        }
    }

    fn apply(&mut self, tag: Tag<'a>, body: &str) {
        match tag {
            Tag::Open { name, style } => {
                self.flush();
                self.stack.push(Frame {
                    name,
                    node: Component::empty().with_style(style),
                });
            }
            Tag::Close(name) => {
                // ルートは閉じない
                let found = self.stack.iter().skip(1).rposition(|frame| frame.name == name);
                match found {
                    Some(index) => {
                        self.flush();
                        self.close_until(index + 1);
                    }
                    None => {
                        self.text.push('<');
                        self.text.push_str(body);
                        self.text.push('>');
                    }
                }
            }
            Tag::Reset => {
                self.flush();
                self.close_until(1);
            }
            Tag::Newline => self.text.push('\n'),
            Tag::Insert(arg) => {
                self.flush();
                self.push(arg.clone());
            }
        }
    }

    fn push(&mut self, component: Component) {
        if let Some(top) = self.stack.last_mut() {
            top.node.push_child(component);
        }
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.push(Component::text(text));
        }
    }

    /// スタックの長さが `depth` になるまでタグを閉じる
    fn close_until(&mut self, depth: usize) {
        while self.stack.len() > depth.max(1) {
            if let Some(frame) = self.stack.pop() {
                self.push(frame.node);
            }
        }
    }
}

/// 閉じタグの名前（`</color:red>` は `color` として扱う）
fn tag_name(body: &str) -> String {
    let name = body.split_once(':').map_or(body, |(name, _)| name);
    name.to_ascii_lowercase()
}

/// 引数なしのスタイルタグ
fn parse_style(name: &str) -> Option<Style> {
    if let Some(negated) = name.strip_prefix('!') {
        return Decoration::from_tag(negated).map(|d| Style::default().decoration(d, false));
    }
    if let Some(decoration) = Decoration::from_tag(name) {
        return Some(Style::default().decoration(decoration, true));
    }
    TextColor::parse(name).map(|color| Style::default().color(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let c = render("Hello, world", &[]);
        assert_eq!(c.to_plain_text(), "Hello, world");
    }

    #[test]
    fn test_arguments() {
        let args = [Component::text("Alice"), Component::text(3)];
        let c = render("<arg:0> has <argument:1> items", &args);
        assert_eq!(c.to_plain_text(), "Alice has 3 items");
    }

    #[test]
    fn test_out_of_range_argument_stays_literal() {
        let c = render("value: <arg:2> <arg:x>", &[Component::text("a")]);
        assert_eq!(c.to_plain_text(), "value: <arg:2> <arg:x>");
    }

    #[test]
    fn test_color_and_decoration() {
        let c = render("<red>warn <bold>now</bold></red> done", &[]);
        assert_eq!(c.to_plain_text(), "warn now done");

        let red = &c.children()[0];
        assert_eq!(red.style().color, Some(TextColor::RED));
        assert_eq!(red.children()[0].to_plain_text(), "warn ");

        let bold = &red.children()[1];
        assert_eq!(bold.style().has_decoration(Decoration::Bold), Some(true));
        assert_eq!(bold.to_plain_text(), "now");

        assert_eq!(c.children()[1].to_plain_text(), " done");
    }

    #[test]
    fn test_color_forms() {
        let hex = render("<#00ff00>x", &[]);
        assert_eq!(hex.children()[0].style().color, Some(TextColor::from_rgb(0x00ff00)));

        let named = render("<color:gold>x</color>", &[]);
        assert_eq!(named.children()[0].style().color, Some(TextColor::GOLD));

        let short = render("<c:#123456>x</c>", &[]);
        assert_eq!(short.children()[0].style().color, Some(TextColor::from_rgb(0x123456)));
    }

    #[test]
    fn test_negated_decoration() {
        let c = render("<!italic>x", &[]);
        assert_eq!(
            c.children()[0].style().has_decoration(Decoration::Italic),
            Some(false)
        );
    }

    #[test]
    fn test_close_tag_closes_nested() {
        let c = render("<red><bold>a</red>b", &[]);
        assert_eq!(c.to_plain_text(), "ab");
        // `b` はルート直下
        assert_eq!(c.children().len(), 2);
        assert_eq!(c.children()[1].style(), &Style::default());
    }

    #[test]
    fn test_reset_and_newline() {
        let c = render("<red><bold>a<reset>b<br>c<newline>", &[]);
        assert_eq!(c.to_plain_text(), "ab\nc\n");
        assert_eq!(c.children().len(), 2);
    }

    #[test]
    fn test_unknown_and_unmatched_tags_stay_literal() {
        let c = render("<unknown>x</bold> 1 < 2 <", &[]);
        assert_eq!(c.to_plain_text(), "<unknown>x</bold> 1 < 2 <");
    }

    #[test]
    fn test_escapes() {
        let c = render("\\<red> \\\\ \\n", &[]);
        assert_eq!(c.to_plain_text(), "<red> \\ \\n");
    }
}
