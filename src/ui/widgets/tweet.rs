use super::annotation::annotation_lines;
use super::{plain_text, wrap_indented, AVATAR};
use crate::config::DisplayConfig;
use crate::feeds::Tweet;
use crate::ui::view_model::TweetCard;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const ANNOTATION_GUTTER: &str = "  │ ";

/// Tweet View for one card.
///
/// The author line is the configured placeholder identity, not anything
/// from the tweet record. The annotation slot is left out entirely when the
/// card has no annotation.
pub fn tweet_lines(
    card: &TweetCard<'_>,
    display: &DisplayConfig,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(AVATAR, Style::default().fg(Color::DarkGray)),
        Span::styled(
            display.author_name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            display.author_handle.clone(),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    lines.extend(wrap_indented(
        &card.tweet.text,
        width,
        Style::default().fg(Color::White),
    ));

    if let Some(meta) = meta_line(card.tweet) {
        lines.push(meta);
    }

    if let Some(panel) = &card.annotation {
        let inner_width = width.saturating_sub(ANNOTATION_GUTTER.chars().count());
        for line in annotation_lines(panel, inner_width) {
            let mut spans = vec![Span::styled(
                ANNOTATION_GUTTER,
                Style::default().fg(Color::Yellow),
            )];
            spans.extend(line.spans);
            lines.push(Line::from(spans));
        }
    }

    lines
}

fn meta_line(tweet: &Tweet) -> Option<Line<'static>> {
    let mut parts = Vec::new();
    if let Some(created_at) = &tweet.created_at {
        parts.push(created_at.clone());
    }
    if tweet.is_retweet {
        parts.push("retweet".to_string());
    }
    if let Some(count) = tweet.retweet_count {
        parts.push(format!("{} retweets", count));
    }
    if let Some(count) = tweet.favorite_count {
        parts.push(format!("{} likes", count));
    }

    if parts.is_empty() {
        return None;
    }

    Some(Line::from(vec![
        Span::raw("  "),
        Span::styled(parts.join(" · "), Style::default().fg(Color::DarkGray)),
    ]))
}

pub fn tweet_text(card: &TweetCard<'_>, display: &DisplayConfig, width: usize) -> String {
    plain_text(&tweet_lines(card, display, width))
}
