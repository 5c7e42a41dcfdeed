//! ochat - Terminal chat client
//!
//! Entry point with proper terminal setup and cleanup.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ochat::{
    config::{load_config, OchatConfig},
    core::Result,
    events::{Event, EventBus},
    llm::HttpBackend,
    panels::ChatPanel,
    state::AppState,
    ui::{self, ModelSelector},
};
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Command-line arguments
struct Args {
    /// Endpoint URL override
    endpoint: Option<String>,
}

impl Args {
    /// Parse command-line arguments
    fn parse() -> Self {
        let mut args = std::env::args().skip(1);
        let mut endpoint = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--endpoint" | "-e" => {
                    endpoint = args.next();
                }
                _ if !arg.starts_with('-') => {
                    endpoint = Some(arg);
                }
                _ => {
                    // Ignore unknown flags
                }
            }
        }

        Self { endpoint }
    }
}

/// Application entry point.
///
/// Sets up the terminal in raw mode, runs the application loop, and
/// ensures the terminal is restored to its original state on exit.
fn main() -> Result<()> {
    let args = Args::parse();

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    let result = run_app(&mut term, args);

    // Restore terminal (ALWAYS, even on error)
    terminal::disable_raw_mode()?;
    execute!(term.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    term.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {}", e);
    }

    result
}

/// Main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, args: Args) -> Result<()> {
    // Load configuration
    let cwd = std::env::current_dir().unwrap_or_default();
    let mut config = load_config(&cwd).unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
        OchatConfig::default()
    });
    if let Some(endpoint) = args.endpoint {
        config.chat.endpoint = endpoint;
    }

    // Build the HTTP backend from config
    let mut backend = HttpBackend::new(&config.chat.endpoint, &config.chat.model)
        .with_timeout(Duration::from_secs(config.chat.timeout));
    if let Some(ref token) = config.chat.csrf_token {
        // Unresolved ${VAR} placeholders are not usable tokens
        if !token.is_empty() && !token.starts_with("${") {
            backend = backend.with_csrf_token(Some(token.clone()));
        }
    }
    let backend = Arc::new(backend);

    // Create event bus with bounded channel
    let event_bus = EventBus::new(1024);

    let mut state = AppState::new();
    let mut chat = ChatPanel::new(event_bus.sender(), backend);
    chat.set_send_context(config.chat.send_context);
    chat.set_expand_thinking(config.ui.expand_thinking);
    let mut selector = ModelSelector::new();

    // Spawn input reader thread
    spawn_input_reader(event_bus.sender());

    // Model badge area from the last render, for click detection
    let mut badge_area = ratatui::layout::Rect::default();

    // Main event loop
    loop {
        terminal.draw(|frame| {
            badge_area = ui::render(frame, &state, &mut chat, &mut selector);
        })?;

        // Process events with timeout (50ms for responsive UI)
        if let Some(event) = event_bus.recv_timeout(Duration::from_millis(50)) {
            handle_event(&event, &mut state, &mut chat, &mut selector, &config, badge_area);
        }

        // Drain additional events to prevent lag
        for event in event_bus.drain(50) {
            handle_event(&event, &mut state, &mut chat, &mut selector, &config, badge_area);
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Processes a single application event.
///
/// Handles global keybindings and routes the rest to the chat panel or
/// the model selector modal.
fn handle_event(
    event: &Event,
    state: &mut AppState,
    chat: &mut ChatPanel,
    selector: &mut ModelSelector,
    config: &OchatConfig,
    badge_area: ratatui::layout::Rect,
) {
    match event {
        Event::Key(key) => {
            // Ctrl+Q / Ctrl+C: Quit
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
                && key.modifiers.contains(KeyModifiers::CONTROL)
            {
                state.quit();
                return;
            }

            // Handle model selector modal
            if state.input_mode.is_modal_open("model_selector") {
                match key.code {
                    KeyCode::Esc => {
                        state.input_mode.to_normal();
                    }
                    KeyCode::Up => {
                        selector.up();
                    }
                    KeyCode::Down => {
                        selector.down();
                    }
                    KeyCode::Enter => {
                        if let Some(model) = selector.selected_model() {
                            chat.set_model_label(&model);
                            state.info(format!("Model: {}", model));
                        }
                        state.input_mode.to_normal();
                    }
                    KeyCode::Char(c) => {
                        selector.insert_char(c);
                    }
                    KeyCode::Backspace => {
                        selector.backspace();
                    }
                    _ => {}
                }
                return;
            }

            // Ctrl+M: Open model selector
            if key.code == KeyCode::Char('m') && key.modifiers.contains(KeyModifiers::CONTROL) {
                selector.set_models(config.chat.models.clone(), &chat.current_model());
                state.input_mode.open_modal("model_selector");
                return;
            }

            state.clear_status();
            chat.handle_key(key);
        }

        Event::Mouse(mouse) => {
            // Handle model selector modal mouse events
            if state.input_mode.is_modal_open("model_selector") {
                if let event::MouseEventKind::Down(event::MouseButton::Left) = mouse.kind {
                    if selector.contains(mouse.column, mouse.row) {
                        if selector.handle_click(mouse.column, mouse.row) {
                            if let Some(model) = selector.selected_model() {
                                chat.set_model_label(&model);
                                state.info(format!("Model: {}", model));
                            }
                            state.input_mode.to_normal();
                        }
                    } else {
                        // Click outside modal - close it
                        state.input_mode.to_normal();
                    }
                }
                return;
            }

            // Click on the model badge opens the selector
            if let event::MouseEventKind::Down(event::MouseButton::Left) = mouse.kind {
                let x = mouse.column;
                let y = mouse.row;
                if x >= badge_area.x
                    && x < badge_area.x + badge_area.width
                    && y == badge_area.y
                    && badge_area.width > 0
                {
                    selector.set_models(config.chat.models.clone(), &chat.current_model());
                    state.input_mode.open_modal("model_selector");
                    return;
                }
            }

            chat.handle_mouse(mouse);
        }

        Event::ChatResponse {
            generation,
            response,
        } => {
            chat.handle_response(*generation, response);
        }

        Event::ChatError {
            generation,
            message,
        } => {
            chat.handle_error(*generation, message);
            state.error("Request failed");
        }

        Event::Quit => {
            state.quit();
        }

        // Resize is picked up on the next draw
        Event::Resize(_, _) => {}

        Event::Tick => {}
    }
}

/// Spawns a dedicated thread to read input events (keyboard, mouse, resize).
///
/// Events are sent to the main loop via the provided channel.
/// The thread polls for events with a timeout to allow for clean shutdown.
fn spawn_input_reader(tx: crossbeam_channel::Sender<Event>) {
    std::thread::spawn(move || {
        loop {
            // Poll with timeout to allow thread shutdown
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                match event::read() {
                    Ok(event::Event::Key(key)) => {
                        if tx.send(Event::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(event::Event::Mouse(mouse)) => {
                        if tx.send(Event::Mouse(mouse)).is_err() {
                            break;
                        }
                    }
                    Ok(event::Event::Resize(w, h)) => {
                        if tx.send(Event::Resize(w, h)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
        }
    });
}
