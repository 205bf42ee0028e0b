//! Terminal User Interface Module
//!
//! Interactive front end for the MedInsight literature search.
//! Built with Ratatui for terminal rendering.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  🧬 MedInsight Medical Literature Analysis   ● localhost:8000    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─ Search ────────────────────────────────────────────────┐   │
//! │  │ ▶ Keyword                                               │   │
//! │  │   Articles (1-50)        Last N years (optional)        │   │
//! │  │   [ Search Articles ]                                   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │  ┌─ 5 articles found ──────────────────────────────────────┐   │
//! │  │  [Scrollable article cards with expandable abstracts]    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │  Ready │ [Enter] Search | [Tab] Next | [Ctrl+Q] Quit | [F1]   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{ApiStatus, App, AppEvent, Focus, View};
pub use event::{AppAction, EventHandler};

use crate::config::Config;
use crate::search::MedInsightClient;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Type alias for our terminal backend
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI application
pub async fn run(config: Config) -> anyhow::Result<()> {
    info!(base_url = %config.api.base_url, "Starting TUI mode");

    let client = MedInsightClient::from_config(&config.api)?;
    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms);
    let mut app = App::new(config, Arc::new(client.clone()));

    // Health probe only colors the header dot; searches work regardless
    let tx = app.event_sender();
    tokio::spawn(async move {
        let status = match client.health().await {
            Ok(()) => ApiStatus::Online,
            Err(e) => {
                warn!(error = %e, "Backend health check failed");
                ApiStatus::Offline
            }
        };
        tx.send(AppEvent::HealthChecked(status)).await.ok();
    });

    let mut terminal = init_terminal()?;
    let mut events = EventHandler::new(tick_rate);

    let result = run_app(&mut terminal, &mut app, &mut events).await;

    if let Err(e) = restore_terminal(&mut terminal) {
        error!("Failed to restore terminal: {}", e);
    }

    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    events: &mut EventHandler,
) -> anyhow::Result<()> {
    while !app.should_quit {
        // Update scroll bounds before drawing
        let size = terminal.size()?;
        let viewport = ui::results_viewport(
            ratatui::layout::Rect::new(0, 0, size.width, size.height),
            app,
        );
        app.update_scroll_bounds(viewport.width, viewport.height);

        terminal.draw(|frame| ui::render(frame, app))?;

        // Search results and health status from background tasks
        app.poll_events();

        match events.next().await {
            Some(action) => app.handle_action(action),
            None => break,
        }
    }

    info!("TUI exited normally");
    Ok(())
}
