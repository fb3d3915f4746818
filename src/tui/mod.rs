// Terminal front end: tick scheduler, panel stack and key handling.

mod format;
mod panels;
mod stack;

pub use format::{history_capacity, list_name, mem_as_string, signed_mem_as_string};
pub use panels::{MAIN_PANELS, MainAreas, PanelRenderer, draw};
pub use stack::{KeyOutcome, PanelStack, View};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::docker_repo::DockerRepo;
use crate::engine::AggregationEngine;
use crate::models::ContainerDetails;

/// Restores the terminal even when the loop bails out early or panics.
struct TerminalCleanup;

impl Drop for TerminalCleanup {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

pub struct App {
    engine: Arc<AggregationEngine>,
    docker: Arc<DockerRepo>,
    stack: PanelStack,
    details: Option<ContainerDetails>,
    render_interval: Duration,
}

impl App {
    pub fn new(
        engine: Arc<AggregationEngine>,
        docker: Arc<DockerRepo>,
        render_interval: Duration,
    ) -> Self {
        Self {
            engine,
            docker,
            stack: PanelStack::new(),
            details: None,
            render_interval,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let _cleanup = TerminalCleanup;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal).await;

        terminal.show_cursor()?;
        result
    }

    async fn run_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        self.engine
            .set_capacity(history_capacity(terminal.size()?.width));
        let mut last_tick: Option<Instant> = None;

        loop {
            if last_tick.is_none_or(|t| t.elapsed() >= self.render_interval) {
                self.tick(terminal).await?;
                last_tick = Some(Instant::now());
            }

            let timeout = last_tick
                .map(|t| self.render_interval.saturating_sub(t.elapsed()))
                .unwrap_or_default();
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let before = self.stack.top().clone();
                        if self.stack.handle_key(key, &self.engine) == KeyOutcome::Quit {
                            break;
                        }
                        if *self.stack.top() != before {
                            self.details = None;
                            last_tick = None;
                        }
                    }
                    Event::Resize(width, _) => {
                        self.engine.set_capacity(history_capacity(width));
                        last_tick = None;
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// One render tick: take a single dashboard snapshot, refresh details if they are
    /// showing, then run every renderer against that snapshot.
    async fn tick<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let snapshot = self.engine.dashboard();

        if let View::Details {
            container_id: Some(id),
            ..
        } = self.stack.top()
        {
            self.details = inspect_within(
                self.render_interval,
                id,
                self.docker.inspect(id),
                self.details.take(),
            )
            .await;
        }

        let view = self.stack.top();
        let details = self.details.as_ref();
        terminal.draw(|f| draw(f, view, &snapshot, details))?;
        Ok(())
    }
}

/// Awaits `inspect` for at most `limit` so a slow daemon cannot stall the render tick.
/// On timeout the previous details stay on screen; a failed inspect clears them.
async fn inspect_within<F>(
    limit: Duration,
    container_id: &str,
    inspect: F,
    previous: Option<ContainerDetails>,
) -> Option<ContainerDetails>
where
    F: Future<Output = Result<ContainerDetails>>,
{
    match tokio::time::timeout(limit, inspect).await {
        Ok(Ok(details)) => Some(details),
        Ok(Err(e)) => {
            tracing::debug!(container_id, error = %e, "inspect failed");
            None
        }
        Err(_) => {
            tracing::debug!(container_id, ?limit, "inspect timed out; keeping last details");
            previous
        }
    }
}
