//! Application state and event loop

use super::input::{Edit, TextInput};
use super::ui;
use anyhow::{Context, Result};
use crossterm::{
    cursor::SetCursorStyle,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use hubcomplete_api::GithubClient;
use hubcomplete_core::{
    Autocomplete, NavKey, Region, SearchResults, Selection, Settings, Viewport, WidgetBounds,
    spawn_worker,
};
use ratatui::{Terminal, backend::CrosstermBackend, widgets::ListState};
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

/// Toast notification state
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
    pub is_error: bool,
}

impl Toast {
    const DURATION: Duration = Duration::from_secs(3);

    pub fn new(message: String) -> Self {
        Self {
            message,
            expires_at: Instant::now() + Self::DURATION,
            is_error: false,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            is_error: true,
            ..Self::new(message)
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Screen regions recorded by the last render, used for mouse hit-testing
#[derive(Debug, Default, Clone, Copy)]
pub struct HitAreas {
    /// Input box, error lines and hint: everything but the list
    pub container: Region,
    pub input: Region,
    pub toggle: Option<Region>,
    /// Whole list block, borders included
    pub list: Option<Region>,
    /// List rows only
    pub rows: Option<Region>,
}

impl HitAreas {
    pub fn bounds(&self) -> WidgetBounds {
        WidgetBounds {
            container: self.container,
            list: self.list,
        }
    }
}

pub struct App {
    pub input: TextInput,
    pub widget: Autocomplete,
    /// Selection + scroll offset handed to the list widget
    pub list_state: ListState,
    /// Scroll window over the suggestion list
    pub viewport: Viewport,
    pub hit: HitAreas,
    pub toast: Option<Toast>,
    /// Set while a search is pending, drives the spinner
    pub loading_since: Option<Instant>,
    /// Last applied search: result count and worker time
    pub last_search: Option<(usize, Duration)>,
    pub api_base_url: String,
    pub should_quit: bool,
    result_rx: Receiver<SearchResults>,
}

impl App {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = GithubClient::from_env().context("Failed to create GitHub client")?;
        let api_base_url = client.api_base_url().to_string();

        let (query_tx, query_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        spawn_worker(client, query_rx, result_tx);

        Ok(Self {
            input: TextInput::new(),
            widget: Autocomplete::new(settings, query_tx),
            list_state: ListState::default(),
            viewport: Viewport::default(),
            hit: HitAreas::default(),
            toast: None,
            loading_since: None,
            last_search: None,
            api_base_url,
            should_quit: false,
            result_rx,
        })
    }

    /// Apply finished searches from the worker (non-blocking)
    fn poll_results(&mut self) {
        while let Ok(results) = self.result_rx.try_recv() {
            let count = results.outcome.results.len();
            let duration = results.duration;
            if self.widget.on_search_completed(results) {
                self.last_search = Some((count, duration));
            }
        }
    }

    fn update_loading(&mut self) {
        if !self.widget.is_loading() {
            self.loading_since = None;
        } else if self.loading_since.is_none() {
            self.loading_since = Some(Instant::now());
        }
    }

    /// Clear expired toast
    fn update_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Scroll the focused suggestion into view if the list asked for it
    pub fn apply_reveal(&mut self) {
        if let Some(index) = self.widget.take_reveal() {
            self.viewport.reveal(index);
        }
    }

    fn open_selection(&mut self, selection: Selection) {
        log::debug!("Opening {}", selection.url);
        self.toast = Some(match open::that(&selection.url) {
            Ok(()) => Toast::new(format!("Opened {}", selection.url)),
            Err(e) => {
                log::warn!("Failed to open {}: {}", selection.url, e);
                Toast::error(format!("Failed to open browser for {}", selection.label))
            }
        });
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let selection = match (code, modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                None
            }
            (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                self.widget.toggle();
                None
            }
            (KeyCode::Up, _) => self.widget.handle_key(NavKey::Up),
            (KeyCode::Down, _) => self.widget.handle_key(NavKey::Down),
            (KeyCode::Enter, _) => self.widget.handle_key(NavKey::Enter),
            (KeyCode::Esc, _) => self.widget.handle_key(NavKey::Escape),
            _ => {
                if self.input.handle_key(code, modifiers) == Edit::Changed {
                    self.widget.handle_input(&self.input.text, Instant::now());
                }
                None
            }
        };

        if let Some(selection) = selection {
            self.open_selection(selection);
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (col, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.widget.on_pointer(col, row, &self.hit.bounds()) {
                    return;
                }
                if self.hit.toggle.is_some_and(|r| r.contains(col, row)) {
                    self.widget.toggle();
                } else if let Some(rows) = self.hit.rows.filter(|r| r.contains(col, row)) {
                    let index = self.viewport.offset + (row - rows.y) as usize;
                    if let Some(selection) = self.widget.click_item(index) {
                        self.open_selection(selection);
                    }
                } else if self.hit.input.contains(col, row) {
                    self.widget.click_input();
                }
            }
            MouseEventKind::ScrollDown if self.over_list(col, row) => {
                self.widget.handle_key(NavKey::Down);
            }
            MouseEventKind::ScrollUp if self.over_list(col, row) => {
                self.widget.handle_key(NavKey::Up);
            }
            _ => {}
        }
    }

    fn over_list(&self, col: u16, row: u16) -> bool {
        self.hit.list.is_some_and(|r| r.contains(col, row))
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key(key.code, key.modifiers)
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }
}

/// Run the TUI application
pub fn run(settings: Settings) -> Result<()> {
    let mut app = App::new(&settings)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetCursorStyle::BlinkingBar
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    app.widget.teardown();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        SetCursorStyle::DefaultUserShape
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // ~60Hz, enough for the spinner
    const FRAME_TIME: Duration = Duration::from_micros(16_667);

    loop {
        let frame_start = Instant::now();

        // Drain pending input first
        let mut events_processed = 0usize;
        while event::poll(Duration::from_millis(0))? && events_processed < 100 {
            app.handle_event(event::read()?);
            events_processed += 1;
            if app.should_quit {
                break;
            }
        }

        if app.should_quit {
            break;
        }

        app.widget.tick(Instant::now());
        app.poll_results();
        app.update_loading();
        app.update_toast();

        terminal.draw(|f| ui::render(f, app))?;

        // Sleep for the rest of the frame, waking early for a due search
        let mut wake = frame_start + FRAME_TIME;
        if let Some(deadline) = app.widget.next_deadline() {
            wake = wake.min(deadline);
        }
        let now = Instant::now();
        if wake > now {
            event::poll(wake - now)?;
        }
    }

    Ok(())
}
