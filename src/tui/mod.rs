//! Terminal rendering of the portfolio page.

pub mod app;
pub mod sections;
pub mod widgets;

use std::{io::stdout, sync::Arc, time::Duration};

use app::{App, AppOptions};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::time::sleep;
use tracing::info;

use crate::{
    content::Portfolio,
    error::Result,
    state::{Delivery, Scheduler},
};

/// Frame period for animations when nothing else happens.
const FRAME: Duration = Duration::from_millis(50);

pub async fn run(
    portfolio: Portfolio,
    options: AppOptions,
    delivery: Arc<dyn Delivery>,
) -> Result<()> {
    enable_raw_mode()?;
    stdout()
        .execute(EnterAlternateScreen)?
        .execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let (scheduler, mut timers) = Scheduler::new();
    let mut app = App::new(portfolio, options, delivery, scheduler);
    let mut event_stream = EventStream::new();
    info!(theme = %options.theme, skip_intro = options.skip_intro, "TUI started");

    while !app.should_exit {
        terminal.draw(|frame| app.render(frame))?;
        app.sync_timers();

        tokio::select! {
            Some(event) = timers.recv() => {
                app.handle_app_event(event);
            }
            Some(Ok(event)) = event_stream.next() => {
                app.handle_event(&event);
            }
            () = sleep(FRAME) => {
                app.on_frame();
            }
        }
    }

    disable_raw_mode()?;
    stdout()
        .execute(DisableMouseCapture)?
        .execute(LeaveAlternateScreen)?;
    info!("TUI stopped");

    Ok(())
}
