//! Markdown rendering for file-based record bodies

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::helpers::html_escape;

/// Excerpt separator inside a Markdown body
pub const MORE_MARKER: &str = "<!-- more -->";

/// Markdown renderer with syntax highlighting for fenced code
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        // Some(lang) while inside a code block; lang may be empty
        let mut code_block: Option<String> = None;
        let mut code = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_block = Some(match kind {
                        CodeBlockKind::Fenced(lang) => lang.to_string(),
                        CodeBlockKind::Indented => String::new(),
                    });
                    code.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let lang = code_block.take().unwrap_or_default();
                    let lang = (!lang.is_empty()).then_some(lang.as_str());
                    events.push(Event::Html(CowStr::from(self.highlight_code(&code, lang))));
                }
                Event::Text(text) if code_block.is_some() => code.push_str(&text),
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                lang, highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }

    /// Split a Markdown body at the excerpt marker.
    /// Returns (excerpt, body without the marker)
    pub fn split_excerpt(content: &str) -> (Option<String>, String) {
        match content.find(MORE_MARKER) {
            Some(pos) => {
                let excerpt = content[..pos].trim().to_string();
                let rest = content[pos + MORE_MARKER.len()..].trim();
                let full = format!("{}\n\n{}", excerpt, rest);
                (Some(excerpt), full)
            }
            None => (None, content.to_string()),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();
    let gutter: Vec<String> = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect();

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
        lang,
        gutter.join("\n"),
        lines.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("### Outcome:\n\nIt **worked**.").unwrap();
        assert!(html.contains("<h3>Outcome:</h3>"));
        assert!(html.contains("<strong>worked</strong>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("highlight rust"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_render_code_block_with_line_numbers() {
        let renderer = MarkdownRenderer::with_options("base16-ocean.dark", true);
        let html = renderer.render("```\na\nb\n```").unwrap();
        assert!(html.contains(r#"<span class="line-number">2</span>"#));
    }

    #[test]
    fn test_split_excerpt() {
        let content = "Short intro.\n<!-- more -->\nThe rest.";
        let (excerpt, full) = MarkdownRenderer::split_excerpt(content);
        assert_eq!(excerpt.as_deref(), Some("Short intro."));
        assert!(!full.contains(MORE_MARKER));
        assert!(full.contains("The rest."));

        let (excerpt, full) = MarkdownRenderer::split_excerpt("No marker");
        assert!(excerpt.is_none());
        assert_eq!(full, "No marker");
    }
}
