//! 一覧項目テンプレート
//!
//! 構築時に形が決まり、render ごとに解決し直すことはない。属性値は必ずエスケープする。

use crate::domain::record::RecordAttrs;
use crate::ports::outbound::Template;

/// `<li>` の中身として使うマークアップ断片を生成するテンプレート
pub struct ListItemTemplate;

impl ListItemTemplate {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ListItemTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl Template for ListItemTemplate {
    fn render(&self, attrs: &RecordAttrs) -> String {
        format!(
            r#"<div class="view"><span class="correspondent">{}</span><label class="title">{}</label></div>"#,
            escape_html(&attrs.correspondent),
            escape_html(&attrs.title),
        )
    }
}

/// 最低限の HTML エスケープ（テンプレートに流し込む値専用）
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_both_attributes() {
        let markup = ListItemTemplate::new().render(&RecordAttrs {
            correspondent: "Alice".to_string(),
            title: "Invoice".to_string(),
            done: false,
        });
        assert!(markup.contains(r#"<span class="correspondent">Alice</span>"#));
        assert!(markup.contains(r#"<label class="title">Invoice</label>"#));
    }

    #[test]
    fn test_same_attrs_render_identically() {
        let template = ListItemTemplate::new();
        let attrs = RecordAttrs {
            correspondent: "Bob".to_string(),
            title: "Letter".to_string(),
            done: true,
        };
        assert_eq!(template.render(&attrs), template.render(&attrs));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let markup = ListItemTemplate::new().render(&RecordAttrs {
            correspondent: "A & B <Ltd>".to_string(),
            title: r#"say "hi""#.to_string(),
            done: false,
        });
        assert!(markup.contains("A &amp; B &lt;Ltd&gt;"));
        assert!(markup.contains("say &quot;hi&quot;"));
        assert!(!markup.contains("<Ltd>"));
    }

    #[test]
    fn test_escape_html_passthrough() {
        assert_eq!(escape_html("plain text 123"), "plain text 123");
        assert_eq!(escape_html(""), "");
    }
}
