//! MDX building blocks: escaping, front matter, tables, admonitions.

use std::sync::LazyLock;

use regex::Regex;

static RE_BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Escape prose for MDX: HTML-significant characters become entities,
/// markdown punctuation is backslash-escaped.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escape an HTML attribute value.
pub fn escape_attribute(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}

/// Double-quoted YAML scalar.
pub fn yaml_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn link(url: &str, html: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape_attribute(url), html)
}

pub struct FrontMatter<'f> {
    pub title: &'f str,
    pub slug: &'f str,
    pub sidebar_label: Option<&'f str>,
    pub keywords: Vec<String>,
}

impl FrontMatter<'_> {
    pub fn render(&self) -> String {
        let mut lines = vec!["---".to_string()];
        lines.push(format!("title: {}", yaml_string(self.title)));
        lines.push(format!("slug: {}", yaml_string(self.slug)));
        if let Some(label) = self.sidebar_label {
            lines.push(format!("sidebar_label: {}", yaml_string(label)));
        }
        if !self.keywords.is_empty() {
            lines.push("keywords:".to_string());
            for keyword in &self.keywords {
                lines.push(format!("  - {}", yaml_string(keyword)));
            }
        }
        lines.push("custom_edit_url: null".to_string());
        lines.push("---".to_string());
        lines.join("\n")
    }
}

/// Docusaurus admonition around already rendered markdown.
pub fn admonition(kind: &str, title: &str, body: &str) -> String {
    let mut out = format!(":::{}", kind);
    if !title.is_empty() {
        out.push(' ');
        out.push_str(title);
    }
    out.push_str("\n\n");
    out.push_str(body.trim());
    out.push_str("\n\n:::");
    out
}

/// Indent every line after the first, for list item continuations.
pub fn indent_continuation(text: &str, indent: &str) -> String {
    let mut lines = text.lines();
    let mut out = lines.next().unwrap_or("").to_string();
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(indent);
            out.push_str(line);
        }
    }
    out
}

/// Markdown table; cells are already escaped.
pub fn table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("| {} |", header.join(" | ")));
    lines.push(format!("|{}", "---|".repeat(header.len())));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| c.replace('\n', " ")).collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }
    lines.join("\n")
}

/// Join rendered blocks with one blank line, dropping empty ones.
pub fn join_blocks(blocks: &[String]) -> String {
    let joined = blocks
        .iter()
        .map(|b| b.trim_matches('\n'))
        .filter(|b| !b.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    RE_BLANK_RUNS.replace_all(&joined, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mdx_escaping() {
        assert_eq!(escape_text("a < b && {x}"), "a &lt; b &amp;&amp; &#123;x&#125;");
        assert_eq!(escape_text("int *p_"), "int \\*p\\_");
        assert_eq!(escape_text("plain text"), "plain text");
    }

    #[test]
    fn front_matter_layout() {
        let fm = FrontMatter {
            title: "geo::Widget Class Reference",
            slug: "/api/classes/geo/Widget",
            sidebar_label: Some("Widget"),
            keywords: vec!["class".to_string(), "say \"hi\"".to_string()],
        };
        assert_eq!(
            fm.render(),
            "---\n\
             title: \"geo::Widget Class Reference\"\n\
             slug: \"/api/classes/geo/Widget\"\n\
             sidebar_label: \"Widget\"\n\
             keywords:\n  - \"class\"\n  - \"say \\\"hi\\\"\"\n\
             custom_edit_url: null\n\
             ---"
        );
    }

    #[test]
    fn admonition_block() {
        assert_eq!(admonition("note", "Note", "Careful.\n"), ":::note Note\n\nCareful.\n\n:::");
    }

    #[test]
    fn continuation_indent() {
        assert_eq!(indent_continuation("a\nb\n\nc", "  "), "a\n  b\n\n  c");
    }

    #[test]
    fn blocks_are_spaced() {
        let blocks = vec!["one\n".to_string(), String::new(), "\ntwo".to_string()];
        assert_eq!(join_blocks(&blocks), "one\n\ntwo");
    }

    #[test]
    fn table_rows() {
        let t = table(&["Name", "Description"], &[vec!["a".to_string(), "b\nc".to_string()]]);
        assert_eq!(t, "| Name | Description |\n|---|---|\n| a | b c |");
    }
}
