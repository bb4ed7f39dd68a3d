//! Markdown rendering for spec fields.

use pulldown_cmark::{html, Options, Parser};

/// Class added to tables in implementation notes.
pub const TABLE_CLASS: &str = "table";

/// Render markdown to HTML.
pub fn render_markdown(source: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(source, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

/// Render implementation notes, tagging every table with [`TABLE_CLASS`].
pub fn render_implementation(source: &str) -> String {
    render_markdown(source).replace("<table>", &format!("<table class=\"{}\">", TABLE_CLASS))
}
