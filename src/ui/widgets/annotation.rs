use super::{wrap_indented, AVATAR};
use crate::ui::view_model::AnnotationPanel;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Annotation View: avatar, annotator name, email, then the comment.
pub fn annotation_lines(panel: &AnnotationPanel<'_>, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(AVATAR, Style::default().fg(Color::DarkGray)),
        Span::styled(
            panel.author.full_name(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(panel.author.email.clone(), Style::default().fg(Color::Cyan)),
    ])];

    lines.extend(wrap_indented(
        panel.comment,
        width,
        Style::default().fg(Color::White),
    ));

    if let Some(date) = panel.publish_date {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(date.to_string(), Style::default().fg(Color::DarkGray)),
        ]));
    }

    lines
}
