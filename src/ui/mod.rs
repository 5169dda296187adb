pub mod view_model;
pub mod widgets;

use crate::config::DisplayConfig;
use crate::store::AppState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use view_model::{project, TweetCard};
use widgets::tweet::{tweet_lines, tweet_text};

/// App View: the title plus one Tweet View per projected card.
pub struct AppView {
    display: DisplayConfig,
    scroll_state: ListState,
}

impl AppView {
    pub fn new(display: DisplayConfig) -> Self {
        let mut scroll_state = ListState::default();
        scroll_state.select(Some(0));

        Self {
            display,
            scroll_state,
        }
    }

    pub fn cards<'a>(&self, state: &'a AppState) -> Vec<TweetCard<'a>> {
        project(state, self.display.projection)
    }

    pub fn selected(&self) -> Option<usize> {
        self.scroll_state.selected()
    }

    pub fn selected_card<'a>(&self, state: &'a AppState) -> Option<TweetCard<'a>> {
        let idx = self.scroll_state.selected()?;
        self.cards(state).get(idx).copied()
    }

    pub fn scroll_up(&mut self) {
        if let Some(selected) = self.scroll_state.selected() {
            if selected > 0 {
                self.scroll_state.select(Some(selected - 1));
            }
        }
    }

    pub fn scroll_down(&mut self, card_count: usize) {
        if let Some(selected) = self.scroll_state.selected() {
            if selected < card_count.saturating_sub(1) {
                self.scroll_state.select(Some(selected + 1));
            }
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_state.select(Some(0));
    }

    pub fn scroll_to_bottom(&mut self, card_count: usize) {
        self.scroll_state.select(Some(card_count.saturating_sub(1)));
    }

    /// Keep the selection inside the list after a slice was replaced.
    pub fn clamp_selection(&mut self, card_count: usize) {
        if let Some(selected) = self.scroll_state.selected() {
            if selected >= card_count {
                self.scroll_state.select(Some(card_count.saturating_sub(1)));
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        self.render_cards(frame, chunks[0], state);
        self.render_status(frame, chunks[1], state);
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .title(format!(" {} ", self.display.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let cards = self.cards(state);
        if cards.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No tweets yet",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // Borders plus the highlight symbol.
        let width = usize::from(block.inner(area).width).saturating_sub(2);
        let items: Vec<ListItem> = cards
            .iter()
            .map(|card| {
                let mut lines = tweet_lines(card, &self.display, width);
                lines.push(Line::from(""));
                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_symbol("▌ ")
            .highlight_style(Style::default().add_modifier(Modifier::BOLD));

        let mut scroll_state = self.scroll_state.clone();
        frame.render_stateful_widget(list, area, &mut scroll_state);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let status = Line::from(vec![
            Span::styled(
                format!(" {} tweets", state.tweets.len()),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("{} annotations", state.annotations.len()),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                "  j/k scroll | g/G top/bottom | o open | q quit",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), area);
    }

    /// Plain-text rendering of the whole view, used by `--print`.
    pub fn render_text(&self, state: &AppState, width: usize) -> String {
        let mut out = String::new();
        out.push_str(&self.display.title);
        out.push('\n');

        for card in self.cards(state) {
            out.push('\n');
            out.push_str(&tweet_text(&card, &self.display, width));
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::{Annotation, Author, Tweet};
    use crate::ui::view_model::Projection;
    use ratatui::{backend::TestBackend, Terminal};

    fn annotated_state() -> AppState {
        AppState {
            tweets: vec![Tweet::new("1", "first tweet"), Tweet::new("2", "second tweet")],
            annotations: vec![Annotation {
                tweet: Tweet::new("2", "second tweet"),
                author: Author {
                    first_name: "Jane".to_string(),
                    last_name: "Doe".to_string(),
                    email: "jane@x.com".to_string(),
                },
                annotation: "great tweet".to_string(),
                publish_date: None,
            }],
        }
    }

    fn screen(view: &AppView, state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| view.render(frame, state)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn annotations_view() -> AppView {
        AppView::new(DisplayConfig {
            projection: Projection::Annotations,
            ..DisplayConfig::default()
        })
    }

    #[test]
    fn test_empty_annotations_render_no_tweet_views() {
        let view = annotations_view();
        let state = AppState {
            tweets: vec![Tweet::new("1", "never shown")],
            annotations: Vec::new(),
        };

        assert!(view.cards(&state).is_empty());
        let text = screen(&view, &state);
        assert!(text.contains("No tweets yet"));
        assert!(!text.contains("never shown"));
        assert!(!text.contains("Donald J. Trump"));
    }

    #[test]
    fn test_screen_contains_annotation_fields() {
        let view = annotations_view();
        let text = screen(&view, &annotated_state());

        for needle in ["Tweet annotations", "Jane", "Doe", "jane@x.com", "great tweet"] {
            assert!(text.contains(needle), "missing {:?}", needle);
        }
    }

    #[test]
    fn test_joined_screen_shows_unannotated_tweets() {
        let view = AppView::new(DisplayConfig::default());
        let text = screen(&view, &annotated_state());

        assert!(text.contains("first tweet"));
        assert!(text.contains("second tweet"));
        assert!(text.contains("1 annotations"));
        assert!(text.contains("2 tweets"));
    }

    #[test]
    fn test_render_text_lists_every_card() {
        let view = AppView::new(DisplayConfig::default());
        let text = view.render_text(&annotated_state(), 80);

        assert!(text.starts_with("Tweet annotations\n"));
        assert_eq!(text.matches("Donald J. Trump").count(), 2);
        assert_eq!(text.matches("great tweet").count(), 1);
    }

    #[test]
    fn test_scrolling_is_bounded() {
        let mut view = AppView::new(DisplayConfig::default());
        assert_eq!(view.selected(), Some(0));

        view.scroll_up();
        assert_eq!(view.selected(), Some(0));

        view.scroll_down(2);
        view.scroll_down(2);
        assert_eq!(view.selected(), Some(1));

        view.scroll_to_top();
        assert_eq!(view.selected(), Some(0));

        view.scroll_to_bottom(5);
        assert_eq!(view.selected(), Some(4));

        view.clamp_selection(2);
        assert_eq!(view.selected(), Some(1));
    }

    #[test]
    fn test_selected_card() {
        let mut view = AppView::new(DisplayConfig::default());
        let state = annotated_state();

        view.scroll_down(2);
        let card = view.selected_card(&state).unwrap();
        assert_eq!(card.key, "2");
        assert!(view.selected_card(&AppState::default()).is_none());
    }
}
