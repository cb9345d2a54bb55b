//! XML 流式写入
//!
//! 所有属性值和文本节点统一经过 [`escape`]，调用方不直接拼接标记。

use std::borrow::Cow;
use std::fmt::Write;

/// XML 1.0 允许的字符
pub fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// 第一个 XML 1.0 不允许的字符
pub fn find_invalid_char(input: &str) -> Option<char> {
    input.chars().find(|&ch| !is_xml_char(ch))
}

/// 转义五个保留字符 `< > & " '`，制表符和换行写成字符引用，读回时不被属性值规范化
///
/// 不处理 XML 不允许的字符，调用方先用 [`find_invalid_char`] 检查。
pub fn escape(input: &str) -> Cow<'_, str> {
    if !input.contains(&['<', '>', '&', '"', '\'', '\t', '\n', '\r'][..]) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// 元素写入器，每行一个元素，两空格缩进
pub struct XmlWriter {
    output: String,
    open: Vec<&'static str>,
}

impl XmlWriter {
    /// 以 XML 声明开头的新文档
    pub fn new() -> Self {
        let mut output = String::with_capacity(4096);
        output.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#);
        output.push('\n');
        Self { output, open: Vec::new() }
    }

    /// 开始标签
    pub fn start(&mut self, name: &'static str, attrs: &[(&str, &str)]) -> &mut Self {
        self.open_tag(name, attrs);
        self.output.push_str(">\n");
        self.open.push(name);
        self
    }

    /// 自闭合元素
    pub fn empty(&mut self, name: &'static str, attrs: &[(&str, &str)]) -> &mut Self {
        self.open_tag(name, attrs);
        self.output.push_str("/>\n");
        self
    }

    /// 仅含文本的元素，写在同一行
    pub fn text(&mut self, name: &'static str, attrs: &[(&str, &str)], text: &str) -> &mut Self {
        self.open_tag(name, attrs);
        let _ = writeln!(self.output, ">{}</{name}>", escape(text));
        self
    }

    /// 关闭最近打开的元素
    pub fn end(&mut self) -> &mut Self {
        if let Some(name) = self.open.pop() {
            write_indent(&mut self.output, self.open.len());
            let _ = writeln!(self.output, "</{name}>");
        }
        self
    }

    /// 关闭剩余元素并返回文档
    pub fn build(mut self) -> String {
        while !self.open.is_empty() {
            self.end();
        }
        self.output
    }

    fn open_tag(&mut self, name: &str, attrs: &[(&str, &str)]) {
        write_indent(&mut self.output, self.open.len());
        let _ = write!(self.output, "<{name}");
        for (key, value) in attrs {
            let _ = write!(self.output, " {key}=\"{}\"", escape(value));
        }
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_reserved_chars() {
        assert_eq!(escape("A&B"), "A&amp;B");
        assert_eq!(escape("<a href='x'>\"q\"</a>"), "&lt;a href=&apos;x&apos;&gt;&quot;q&quot;&lt;/a&gt;");
    }

    #[test]
    fn test_escape_whitespace_as_char_refs() {
        assert_eq!(escape("a\tb\nc\rd"), "a&#9;b&#10;c&#13;d");
        assert_eq!(escape("a b"), "a b");
    }

    #[test]
    fn test_find_invalid_char() {
        assert_eq!(find_invalid_char("a\u{1}b"), Some('\u{1}'));
        assert_eq!(find_invalid_char("x\u{FFFE}"), Some('\u{FFFE}'));
        assert_eq!(find_invalid_char("a\tb\n包\u{10000}"), None);
    }

    #[test]
    fn test_escape_plain_text_borrows() {
        assert!(matches!(escape("github.com/a/b"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_already_escaped_is_escaped_again() {
        assert_eq!(escape("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_writer_nests_and_indents() {
        let mut w = XmlWriter::new();
        w.start("a", &[("id", "1")]);
        w.empty("b", &[]);
        w.text("c", &[("k", "v")], "x<y");
        w.end();
        let doc = w.build();
        let body: Vec<_> = doc.lines().skip(1).collect();
        assert_eq!(
            body,
            vec![
                r#"<a id="1">"#,
                "  <b/>",
                r#"  <c k="v">x&lt;y</c>"#,
                "</a>",
            ]
        );
    }

    #[test]
    fn test_build_closes_open_elements() {
        let mut w = XmlWriter::new();
        w.start("a", &[]).start("b", &[]);
        let doc = w.build();
        assert!(doc.ends_with("  </b>\n</a>\n"));
    }

    #[test]
    fn test_attribute_values_escaped() {
        let mut w = XmlWriter::new();
        w.empty("n", &[("id", "a\"b")]);
        assert!(w.build().contains(r#"<n id="a&quot;b"/>"#));
    }
}
