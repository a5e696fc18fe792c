//! Terminal memory game (default binary).
//!
//! Game loop: drain image worker events, render, poll input until the next
//! tick, advance engine timers by the wall time that passed.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use memory_match::app::App;
use memory_match::clock::TickClock;
use memory_match::core::SessionConfig;
use memory_match::images::{ImageWorker, PixabayClient, SearchConfig};
use memory_match::input::{handle_key_event, should_quit};
use memory_match::logging;
use memory_match::term::{FrameBuffer, ScreenView, TerminalRenderer, Viewport};
use memory_match::types::TICK_MS;

fn main() -> Result<()> {
    logging::init_from_env()?;

    let search = SearchConfig::from_env();
    if search.api_key.is_none() {
        warn!("PIXABAY_API_KEY is not set; every image request will fail");
    }
    let client = PixabayClient::new(search).context("building HTTP client")?;
    let mut worker = ImageWorker::start(client).context("starting image worker")?;
    let mut app = App::new(SessionConfig::from_env());
    info!("starting with {:?}", app.session().config());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app, &mut worker);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App, worker: &mut ImageWorker) -> Result<()> {
    let view = ScreenView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut clock = TickClock::new(TICK_MS, Instant::now());

    loop {
        while let Some(event) = worker.try_recv() {
            app.apply_event(event, now_ms());
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.render_into(&view, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = clock.until_due(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(app.stage(), key) {
                        return Ok(());
                    }
                    if let Some(job) = handle_key_event(app.stage(), key).and_then(|cmd| app.handle(cmd)) {
                        worker.submit(job);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if let Some(elapsed_ms) = clock.due(Instant::now()) {
            app.tick(elapsed_ms);
        }
    }
}

/// Wall clock in milliseconds, used to cache-bust regenerated image URLs.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
