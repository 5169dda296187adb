use crate::config::DisplayConfig;
use crate::feeds::ResourceFetcher;
use crate::store::{AppState, Store};
use crate::ui::AppView;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Quit,
    Redraw,
    Ignored,
}

pub struct App {
    store: Store,
    view: AppView,
}

impl App {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            store: Store::new(),
            view: AppView::new(display),
        }
    }

    pub async fn run(self, fetcher: Arc<dyn ResourceFetcher>) -> Result<()> {
        chain_panic_hook(reset_terminal);
        let mut terminal = setup_terminal().context("failed to set up terminal")?;
        tracing::info!("tweetnotes started");

        let result = self.event_loop(&mut terminal, fetcher).await;

        restore_terminal(&mut terminal).context("failed to restore terminal")?;
        tracing::info!("tweetnotes stopped");
        result
    }

    async fn event_loop(
        self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        fetcher: Arc<dyn ResourceFetcher>,
    ) -> Result<()> {
        let App {
            mut store,
            mut view,
        } = self;

        let mut changes = store.subscribe();
        // Fire and forget: the view picks up whatever arrives.
        let _detached = store.start(fetcher);

        let mut ticker = tokio::time::interval(TICK);
        let mut dirty = true;

        loop {
            if dirty {
                let state = changes.borrow_and_update().clone();
                view.clamp_selection(view.cards(&state).len());
                terminal.draw(|frame| view.render(frame, &state))?;
                dirty = false;
            }

            tokio::select! {
                _ = store.next_action() => {
                    dirty = changes.has_changed().unwrap_or(true);
                }
                _ = ticker.tick() => {
                    let state = changes.borrow().clone();
                    match drain_input(&mut view, &state)? {
                        KeyOutcome::Quit => break,
                        KeyOutcome::Redraw => dirty = true,
                        KeyOutcome::Ignored => {}
                    }
                }
            }
        }

        Ok(())
    }
}

fn drain_input(view: &mut AppView, state: &AppState) -> Result<KeyOutcome> {
    let mut outcome = KeyOutcome::Ignored;

    while event::poll(Duration::ZERO)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match handle_key(view, state, key) {
                    KeyOutcome::Quit => return Ok(KeyOutcome::Quit),
                    KeyOutcome::Redraw => outcome = KeyOutcome::Redraw,
                    KeyOutcome::Ignored => {}
                }
            }
            Event::Resize(_, _) => outcome = KeyOutcome::Redraw,
            _ => {}
        }
    }

    Ok(outcome)
}

pub fn handle_key(view: &mut AppView, state: &AppState, key: KeyEvent) -> KeyOutcome {
    let card_count = view.cards(state).len();

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyOutcome::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            view.scroll_down(card_count);
            KeyOutcome::Redraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view.scroll_up();
            KeyOutcome::Redraw
        }
        KeyCode::Char('g') | KeyCode::Home => {
            view.scroll_to_top();
            KeyOutcome::Redraw
        }
        KeyCode::Char('G') | KeyCode::End => {
            view.scroll_to_bottom(card_count);
            KeyOutcome::Redraw
        }
        KeyCode::Char('o') | KeyCode::Enter => {
            if let Some(card) = view.selected_card(state) {
                let url = card.tweet.status_url();
                if let Err(error) = open::that(&url) {
                    tracing::warn!(%url, %error, "failed to open tweet in browser");
                }
            }
            KeyOutcome::Ignored
        }
        _ => KeyOutcome::Ignored,
    }
}

/// Fetch both resources, wait for both fetches to settle, and return the
/// plain-text rendering of the resulting state.
pub async fn snapshot(
    fetcher: Arc<dyn ResourceFetcher>,
    display: DisplayConfig,
    width: usize,
) -> Result<String> {
    let mut store = Store::new();
    let handles = store.start(fetcher);

    for result in futures::future::join_all(handles).await {
        result.context("fetch task panicked")?;
    }
    store.process_pending();

    Ok(AppView::new(display).render_text(store.state(), width))
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run `restore` before the previously installed panic hook.
fn chain_panic_hook<F>(restore: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        previous(info);
    }));
}

/// Best-effort terminal reset for the panic path, where no `Terminal` is at hand.
fn reset_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
}
