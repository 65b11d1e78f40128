//! Markdown rendering for model answers

use pulldown_cmark::{html, Event, Options, Parser};

/// Render model Markdown to HTML.
///
/// Raw HTML in the model output is shown as text, never passed through.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_lists() {
        let out = render_markdown("## Frico\n\n- Montasio\n- potatoes\n");
        assert!(out.contains("<h2>Frico</h2>"));
        assert!(out.contains("<li>Montasio</li>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let out = render_markdown("Serve warm <script>alert(1)</script>");
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_tables_enabled() {
        let out = render_markdown("| Wine | Dish |\n|---|---|\n| Friulano | Frico |\n");
        assert!(out.contains("<table>"));
    }
}
