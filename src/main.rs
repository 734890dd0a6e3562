//! Headless tilecast demo.
//!
//! Drives a grid engine on a synthetic 60 fps clock: a scripted pointer
//! sweeps across the grid clicking a few cells, then the auto-selector
//! takes over. Arrivals are reported through the log.
//!
//! Usage: `tilecast [options.toml]`

use std::path::Path;

use glam::Vec2;
use tilecast::engine::GridEngine;
use tilecast::input::{InputEvent, MouseButton};
use tilecast::options::Options;
use tilecast::picking::GridHitTest;
use tilecast::store::GridCoord;
use web_time::{Duration, Instant};

const FRAME: Duration = Duration::from_micros(16_667);
const CELL: f32 = 24.0;
const GAP: f32 = 2.0;
const RUN_SECS: u64 = 30;

fn load_options() -> Options {
    let Some(arg) = std::env::args().nth(1) else {
        return Options::default();
    };
    match Options::load(Path::new(&arg)) {
        Ok(options) => options,
        Err(e) => {
            log::error!("Failed to load options from {arg}: {e}");
            std::process::exit(1);
        }
    }
}

/// Pointer script: (frame, event). Clicks three diagonal cells early on.
fn scripted_events(hit: &GridHitTest, rows: u32, cols: u32) -> Vec<(u64, InputEvent)> {
    let mut events = Vec::new();
    let steps = rows.min(cols).min(3);
    for i in 0..steps {
        let center = hit.cell_center(GridCoord::new(i, i));
        let frame = u64::from(i) * 20 + 1;
        events.push((frame, InputEvent::CursorMoved { x: center.x, y: center.y }));
        events.push((
            frame + 2,
            InputEvent::MouseButton { button: MouseButton::Left, pressed: true },
        ));
        events.push((
            frame + 4,
            InputEvent::MouseButton { button: MouseButton::Left, pressed: false },
        ));
    }
    events.push((u64::from(steps) * 20 + 10, InputEvent::CursorLeft));
    events
}

fn main() {
    env_logger::init();

    let options = load_options();
    let rows = options.grid.rows;
    let cols = options.grid.cols;
    let t0 = Instant::now();

    let mut engine = match GridEngine::with_epoch(options, t0) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    engine.set_on_reached_target(|reached| {
        log::info!(
            "{} at {} reached target{}{}",
            reached.id,
            reached.coord,
            if reached.label.is_empty() { "" } else { ": " },
            reached.label,
        );
    });

    let hit = GridHitTest::new(rows, cols, Vec2::splat(CELL)).with_gap(GAP);
    let script = scripted_events(&hit, rows, cols);
    let mut next_event = script.iter().peekable();

    let frames = RUN_SECS * 60;
    let mut now = t0;
    for frame in 0..frames {
        while let Some((_, event)) = next_event.next_if(|(f, _)| *f == frame) {
            if let Some(id) = engine.handle_input(*event, &hit, now) {
                log::info!("Clicked {id}");
            }
        }
        let _ = engine.tick(now);
        let dirty = engine.take_dirty();
        if !dirty.is_empty() {
            log::trace!("Frame {frame}: upload {dirty:?}");
        }
        now += FRAME;
    }

    engine.shutdown(now);
    log::info!(
        "Demo finished: {} animating, {} queued",
        engine.scheduler().animating_count(),
        engine.scheduler().queue_len()
    );
}
