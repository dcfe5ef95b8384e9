//! HTML rendering for notebook-style frontends.
//!
//! Fragments become inline-styled `<span>`s inside a `<pre>` block, so the
//! output needs no stylesheet and can be embedded directly in generated
//! documents.

use friendly_highlight::StyledFragment;

use crate::context::RenderContext;
use crate::render::FragmentRenderer;
use crate::theme::TextStyle;

/// Renders fragments as inline-styled HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn span_style(text_style: &TextStyle) -> String {
        let mut css = format!("color:{}", text_style.color.hex());
        if let Some(background) = text_style.background {
            css.push_str(&format!(";background-color:{}", background.hex()));
        }
        if text_style.bold {
            css.push_str(";font-weight:bold");
        }
        if text_style.italic {
            css.push_str(";font-style:italic");
        }
        css
    }
}

/// Escape text for inclusion in HTML.
#[must_use]
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

impl FragmentRenderer for HtmlRenderer {
    fn render_line(&self, fragments: &[StyledFragment], ctx: &RenderContext) -> String {
        fragments
            .iter()
            .filter(|fragment| !fragment.is_empty())
            .map(|fragment| {
                format!(
                    "<span style=\"{}\">{}</span>",
                    Self::span_style(&ctx.style(fragment.style)),
                    html_escape(&fragment.text)
                )
            })
            .collect()
    }

    fn render_block(&self, lines: &[Vec<StyledFragment>], ctx: &RenderContext) -> String {
        let body = lines
            .iter()
            .map(|fragments| self.render_line(fragments, ctx))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "<pre style=\"background-color:{}\">{}</pre>",
            ctx.theme().background.hex(),
            body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use friendly_highlight::StyleClass;

    #[test]
    fn test_html_escaping() {
        assert_eq!(html_escape("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(html_escape("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn test_span_carries_theme_color() {
        let fragments = vec![StyledFragment::new("boom", StyleClass::Error)];
        let ctx = RenderContext::dark();
        let rendered = HtmlRenderer::new().render_line(&fragments, &ctx);
        let error = ctx.style(StyleClass::Error);
        assert!(rendered.contains(&error.color.hex()));
        assert!(rendered.contains("boom"));
        assert!(rendered.starts_with("<span"));
    }

    #[test]
    fn test_block_is_wrapped_in_pre() {
        let lines = vec![vec![StyledFragment::new("x", StyleClass::Plain)]];
        let ctx = RenderContext::light();
        let rendered = HtmlRenderer::new().render_block(&lines, &ctx);
        assert!(rendered.starts_with("<pre"));
        assert!(rendered.ends_with("</pre>"));
        assert!(rendered.contains(&ctx.theme().background.hex()));
    }

    #[test]
    fn test_source_markup_is_escaped() {
        let fragments = vec![StyledFragment::new("a < b", StyleClass::Plain)];
        let ctx = RenderContext::dark();
        let rendered = HtmlRenderer::new().render_line(&fragments, &ctx);
        assert!(!rendered.contains("a < b"));
        assert!(rendered.contains("a &lt; b"));
    }
}
