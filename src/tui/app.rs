use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::canvas::CanvasController;
use crate::infer::{InferenceClient, TitleResolution};
use crate::model::config::Config;
use crate::model::event::{EventId, Position, TimelineEvent};
use crate::model::store::{EventPatch, EventStore};
use crate::parse::date::{parse_date, year_start_timestamp};

use super::input;
use super::render;
use super::theme::Theme;

/// How long a transient notice stays on the status row
const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Current keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Keys drive the canvas: zoom, selection ops, quit
    Navigate,
    /// Keys type into the chat input
    Compose,
    /// Keys edit the board title
    Rename,
}

/// One submitted description in the chat scrollback, linked to its event
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub text: String,
    pub event_id: EventId,
}

/// Main application state
pub struct App {
    pub store: EventStore,
    pub controller: CanvasController,
    pub infer: InferenceClient,
    pub config: Config,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    pub board_title: String,
    /// Edit buffer while renaming the board
    pub rename_input: String,
    pub messages: Vec<ChatMessage>,
    /// Lines scrolled up from the bottom of the chat scrollback
    pub chat_scroll: usize,
    pub compose_input: String,
    pub compose_cursor: usize,
    /// Canvas rect from the last render; pointer events resolve against it
    pub canvas_area: Option<Rect>,
    pub chat_area: Option<Rect>,
    /// Transient one-line notice (e.g. a rejected year)
    notice: Option<(String, Instant)>,
    /// Previous pointer-down, for double-click detection
    pub last_click: Option<(Instant, u16, u16)>,
    pub show_help: bool,
}

impl App {
    pub fn new(config: Config, offline: bool) -> Self {
        let theme = Theme::from_config(&config.ui);
        let controller = CanvasController::new(config.canvas.adjacent_offset);
        let infer = InferenceClient::new(config.inference.clone(), offline);
        App {
            store: EventStore::new(),
            controller,
            infer,
            config,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            board_title: "Untitled timeline".to_string(),
            rename_input: String::new(),
            messages: Vec::new(),
            chat_scroll: 0,
            compose_input: String::new(),
            compose_cursor: 0,
            canvas_area: None,
            chat_area: None,
            notice: None,
            last_click: None,
            show_help: false,
        }
    }

    /// The five classic events, for a canvas that isn't empty on first run
    pub fn seed_demo(&mut self) {
        const DEMO: [(&str, &str, &str); 5] = [
            ("2020", "Project Launch", "Initial concept and development began"),
            ("2021", "Beta Release", "First public testing phase"),
            ("2022", "Global Expansion", "Reached 1 million users worldwide"),
            ("2023", "Major Update", "Introduced AI-powered features"),
            ("2024", "Industry Award", "Recognized as market leader"),
        ];
        for (i, (year, title, description)) in DEMO.iter().enumerate() {
            let mut event = TimelineEvent::titled(*title, staggered_position(i));
            event.description = description.to_string();
            event.year = year.to_string();
            event.timestamp = year.parse::<i32>().ok().and_then(year_start_timestamp);
            event.date_confirmed = event.timestamp.is_some();
            let _ = self.store.add(event);
        }
    }

    /// Submit the compose input: synchronously create the provisional event
    /// (the UI never waits on the network), then ask the title service to
    /// fill it in. A description that already names its date is confirmed
    /// on the spot.
    pub fn submit_description(&mut self) {
        let description = self.compose_input.trim().to_string();
        if description.is_empty() {
            return;
        }

        let mut event =
            TimelineEvent::provisional(description.clone(), staggered_position(self.store.len()));
        if let Some(parsed) = parse_date(&description) {
            event.year = parsed.year;
            event.timestamp = Some(parsed.timestamp);
            event.date_confirmed = true;
        }
        let event_id = event.id;

        if self.store.add(event).is_ok() {
            tracing::debug!(%event_id, "event created from description");
            self.messages.push(ChatMessage {
                text: description.clone(),
                event_id,
            });
            self.chat_scroll = 0;
            self.infer.request(event_id, description);
        }
        self.compose_input.clear();
        self.compose_cursor = 0;
    }

    /// Apply a finished inference call to its event, all fields at once.
    /// The event may be gone (deleted mid-flight) — that's a silent no-op.
    /// A resolution without a year never downgrades a date the user has
    /// confirmed in the meantime.
    pub fn apply_resolution(&mut self, resolution: TitleResolution) {
        let mut patch = EventPatch::title(resolution.title);
        if let Some(year) = resolution.year {
            patch.year = Some(year);
            patch.timestamp = Some(resolution.timestamp);
            patch.date_confirmed = Some(true);
        }
        let _ = self.store.update(resolution.event_id, patch);
    }

    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some((message.into(), Instant::now()));
    }

    /// The current notice, if it hasn't expired
    pub fn notice(&self) -> Option<&str> {
        match &self.notice {
            Some((message, at)) if at.elapsed() < NOTICE_TTL => Some(message),
            _ => None,
        }
    }
}

/// Where a freshly submitted event lands: staggered in rows of four so new
/// cards don't pile up on each other.
pub fn staggered_position(index: usize) -> Position {
    let col = (index % 4) as f64;
    let row = (index / 4) as f64;
    Position::new(40.0 + col * 30.0, 8.0 + row * 9.0)
}

/// Run the TUI application
pub fn run(config: Config, offline: bool, demo: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(config, offline);
    if demo {
        app.seed_demo();
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Inference results land between input events, one event each,
        // in whatever order the calls finished
        for resolution in app.infer.poll() {
            app.apply_resolution(resolution);
        }

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => {
                    input::handle_mouse(app, mouse);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
