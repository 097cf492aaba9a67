//! `.properties` 形式の読み書き
//!
//! 読み込みはJavaの `Properties#load` と同じ規則:
//! - 行頭の空白（スペース・タブ・改ページ）を無視
//! - `#` / `!` で始まる行はコメント
//! - 奇数個の `\` で終わる行は次の行へ継続（次の行の行頭空白は無視）
//! - キーは最初のエスケープされていない `=` `:` 空白で終わる
//! - エスケープ: `\t` `\n` `\r` `\f` `\uXXXX`、それ以外の `\x` は `x`
//!
//! 書き込みは `KEY=VALUE` 形式でファイル末尾に追記する。

use crate::constants::file::LINE_SEPARATOR;
use crate::error::{MsgDefError, Result};
use crate::MessageMap;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// デフォルトのローダー（[`load_file`]）
pub const DEFAULT_LOADER: fn(&Path) -> Result<MessageMap> = load_file;

/// デフォルトの追記処理（[`append_to_file`]）
pub const DEFAULT_APPENDER: fn(&Path, &MessageMap) -> Result<()> = append_to_file;

/// 論理行（継続行を結合済み、エスケープ未処理）
struct LogicalLine {
    /// 論理行が始まる物理行の番号（1始まり）
    number: usize,
    text: Vec<char>,
}

// ========================================
// 読み込み
// ========================================

/// 文字列からメッセージマップを読み込む
///
/// 同じキーが複数回現れた場合は後の値が優先される（順序は最初の出現位置）。
pub fn load_str(input: &str) -> Result<MessageMap> {
    let mut map = MessageMap::new();
    for line in logical_lines(input) {
        let (key, value) = split_key_value(&line)?;
        map.insert(key, value);
    }
    Ok(map)
}

/// リーダーから読み込む（UTF-8）
///
/// リーダーはこの関数では閉じない（所有権を渡した場合はドロップ時に閉じる）。
pub fn load_reader<R: Read>(mut reader: R) -> Result<MessageMap> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    load_str(&content)
}

/// ファイルから読み込む
///
/// 通常ファイルが存在しない場合は空のマップを返す。
pub fn load_file(path: &Path) -> Result<MessageMap> {
    if !path.is_file() {
        return Ok(MessageMap::new());
    }

    let content = fs::read_to_string(path).map_err(|e| MsgDefError::io(path, e))?;
    load_str(&content)
}

/// 物理行を論理行にまとめる（コメント・空行は除外）
fn logical_lines(input: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut chars = input.chars().peekable();

    let mut buf: Vec<char> = Vec::new();
    let mut line_no = 1;
    let mut start_line = 1;
    let mut skip_whitespace = true;
    let mut appended_line_begin = false;
    let mut continuing = false;
    let mut is_comment = false;
    let mut preceding_backslash = false;

    while let Some(c) = chars.next() {
        if skip_whitespace {
            if matches!(c, ' ' | '\t' | '\x0c') {
                continue;
            }
            if !appended_line_begin && (c == '\r' || c == '\n') {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                line_no += 1;
                continue;
            }
            skip_whitespace = false;
            appended_line_begin = false;
        }

        // コメントは論理行の先頭のみ
        if buf.is_empty() && !continuing {
            start_line = line_no;
            is_comment = c == '#' || c == '!';
        }

        if c != '\n' && c != '\r' {
            buf.push(c);
            preceding_backslash = c == '\\' && !preceding_backslash;
            continue;
        }

        // 改行
        if c == '\r' && chars.peek() == Some(&'\n') {
            chars.next();
        }
        line_no += 1;
        skip_whitespace = true;

        if is_comment || buf.is_empty() {
            is_comment = false;
            continuing = false;
            preceding_backslash = false;
            buf.clear();
            continue;
        }

        if preceding_backslash {
            // 継続行: 末尾の `\` を除いて次の行を結合
            buf.pop();
            appended_line_begin = true;
            continuing = true;
            preceding_backslash = false;
            continue;
        }

        lines.push(LogicalLine {
            number: start_line,
            text: std::mem::take(&mut buf),
        });
        continuing = false;
    }

    if !buf.is_empty() && !is_comment {
        if preceding_backslash {
            buf.pop();
        }
        lines.push(LogicalLine {
            number: start_line,
            text: buf,
        });
    }

    lines
}

/// 論理行をキーと値に分割してエスケープを解除
fn split_key_value(line: &LogicalLine) -> Result<(String, String)> {
    let text = &line.text;
    let limit = text.len();

    let mut key_len = 0;
    let mut value_start = limit;
    let mut has_separator = false;
    let mut preceding_backslash = false;

    while key_len < limit {
        let c = text[key_len];
        if (c == '=' || c == ':') && !preceding_backslash {
            value_start = key_len + 1;
            has_separator = true;
            break;
        } else if is_whitespace(c) && !preceding_backslash {
            value_start = key_len + 1;
            break;
        }
        preceding_backslash = c == '\\' && !preceding_backslash;
        key_len += 1;
    }

    while value_start < limit {
        let c = text[value_start];
        if !is_whitespace(c) {
            if !has_separator && (c == '=' || c == ':') {
                has_separator = true;
            } else {
                break;
            }
        }
        value_start += 1;
    }

    let key = unescape(&text[..key_len], line.number)?;
    let value = unescape(&text[value_start..], line.number)?;
    Ok((key, value))
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// エスケープを解除
fn unescape(chars: &[char], line: usize) -> Result<String> {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }

        // 末尾の単独の `\` は捨てる
        let Some(&next) = chars.get(i) else {
            break;
        };
        i += 1;

        match next {
            'u' => {
                let unit = read_hex4(chars, i, line)?;
                i += 4;

                if (0xD800..0xDC00).contains(&unit) {
                    // サロゲートペア: 続く \uXXXX が下位サロゲートなら結合
                    if chars.get(i) == Some(&'\\') && chars.get(i + 1) == Some(&'u') {
                        let low = read_hex4(chars, i + 2, line)?;
                        if (0xDC00..0xE000).contains(&low) {
                            let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                            out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                            i += 6;
                            continue;
                        }
                    }
                    out.push(char::REPLACEMENT_CHARACTER);
                } else {
                    out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
            }
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'n' => out.push('\n'),
            'f' => out.push('\x0c'),
            other => out.push(other),
        }
    }

    Ok(out)
}

fn read_hex4(chars: &[char], start: usize, line: usize) -> Result<u32> {
    let malformed = || MsgDefError::MalformedProperties {
        line,
        reason: "malformed \\uxxxx encoding",
    };

    let digits = chars.get(start..start + 4).ok_or_else(malformed)?;
    digits.iter().try_fold(0u32, |acc, c| {
        c.to_digit(16).map(|d| (acc << 4) | d).ok_or_else(malformed)
    })
}

// ========================================
// 書き込み
// ========================================

/// メッセージを `KEY=VALUE` 形式でライターへ追記する
///
/// ライターはこの関数では閉じない。
pub fn append_to_writer<W: Write>(writer: &mut W, map: &MessageMap) -> Result<()> {
    let mut line = String::new();
    for (key, value) in map {
        line.clear();
        escape_into(key, true, &mut line);
        line.push('=');
        escape_into(value, false, &mut line);
        line.push_str(LINE_SEPARATOR);
        writer.write_all(line.as_bytes())?;
    }
    Ok(())
}

/// メッセージをファイル末尾へ追記する（ファイルが無ければ作成）
pub fn append_to_file(path: &Path, map: &MessageMap) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| MsgDefError::io(path, e))?;

    let mut writer = BufWriter::new(file);
    append_to_writer(&mut writer, map).map_err(|e| match e {
        MsgDefError::Stream(source) => MsgDefError::io(path, source),
        other => other,
    })?;
    writer.flush().map_err(|e| MsgDefError::io(path, e))
}

/// メッセージを `.properties` 形式の文字列にする
pub fn to_string(map: &MessageMap) -> String {
    let mut out = String::new();
    for (key, value) in map {
        escape_into(key, true, &mut out);
        out.push('=');
        escape_into(value, false, &mut out);
        out.push_str(LINE_SEPARATOR);
    }
    out
}

/// エスケープして追加（キーは空白を常にエスケープ、値は先頭のみ）
fn escape_into(s: &str, escape_space: bool, out: &mut String) {
    for (i, c) in s.chars().enumerate() {
        if ('>'..='~').contains(&c) {
            if c == '\\' {
                out.push_str("\\\\");
            } else {
                out.push(c);
            }
            continue;
        }

        match c {
            ' ' => {
                if i == 0 || escape_space {
                    out.push('\\');
                }
                out.push(' ');
            }
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
}
