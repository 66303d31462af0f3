use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use marquee_core::AppConfig;
use marquee_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    load_theme,
    widgets::{MarqueeWidget, StatusBarWidget},
};

pub fn run(config: AppConfig) -> Result<()> {
    // Validate before touching the terminal so errors print normally
    let marquee_config = config.marquee_config().context("invalid [marquee] configuration")?;
    let theme = load_theme(&config.ui.theme);

    let mut app = App::new(marquee_config, theme, Instant::now())?;
    let event_handler = EventHandler::new(
        std::time::Duration::from_millis(config.ui.tick_rate_ms),
        config.ui.frame_interval(),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("marquee"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("Marquee started");
    let result = main_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal even when the loop failed
    app.marquee.on_destroy();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    tracing::info!("Marquee exited");

    result
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        app.tick(Instant::now());

        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: content + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            // Single text row, vertically centered
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Fill(1), Constraint::Length(1), Constraint::Fill(1)])
                .split(main_layout[0]);

            frame.buffer_mut().set_style(
                main_layout[0],
                ratatui::style::Style::default().bg(app.theme.bg),
            );
            MarqueeWidget::render(frame, rows[1], &app.marquee, &app.theme);
            StatusBarWidget::render(
                frame,
                main_layout[1],
                &app.marquee,
                app.status_message.as_deref(),
                &app.theme,
            );
        })?;

        // Frame rate while scrolling, otherwise sleep until the next timer
        let timeout = event_handler.timeout(
            app.marquee.needs_frame(),
            app.until_wakeup(Instant::now()),
        );
        if let Some(event) = event_handler.next(timeout)? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key);
                    app.handle_action(action, Instant::now());
                }
                AppEvent::Resize(w, h) => {
                    tracing::debug!(width = w, height = h, "Terminal resized");
                }
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
