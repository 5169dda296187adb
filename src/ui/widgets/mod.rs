pub mod annotation;
pub mod tweet;

use ratatui::{
    style::Style,
    text::{Line, Span},
};

/// Placeholder avatar shown in front of every author line.
pub const AVATAR: &str = "▣ ";

const INDENT: &str = "  ";

/// Wrap `text` to `width` columns, indenting every line to sit under the
/// author name.
pub(crate) fn wrap_indented(text: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    let available = width.saturating_sub(INDENT.len()).max(1);
    textwrap::wrap(text, available)
        .into_iter()
        .map(|chunk| {
            Line::from(vec![
                Span::raw(INDENT),
                Span::styled(chunk.into_owned(), style),
            ])
        })
        .collect()
}

/// Flatten styled lines into plain text, one line per row.
pub fn plain_text(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
