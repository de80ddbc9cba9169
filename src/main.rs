//! liquidfill demo
//!
//! Drives the animation engine from wall-clock time and renders it as
//! true-color braille in the terminal. `--dump` skips the terminal and
//! writes one JSON frame record per tick to stdout instead, for feeding
//! an out-of-process renderer.

mod term;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    style::ResetColor,
    terminal::{
        self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use serde::Serialize;

use liquidfill::{Frame, LiquidEngine, Phase, PhaseSpec};

use crate::term::{BrailleCanvas, Screen};

struct Args {
    fps: u32,
    dump: bool,
    ticks: u32,
}

fn parse_args() -> Args {
    let mut args = Args { fps: 60, dump: false, ticks: 64 };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--fps" => {
                if let Some(v) = it.next() {
                    args.fps = v.parse().unwrap_or(args.fps);
                }
            }
            "--dump" => args.dump = true,
            "--ticks" => {
                if let Some(v) = it.next() {
                    args.ticks = v.parse().unwrap_or(args.ticks);
                }
            }
            "--help" | "-h" => {
                println!(
                    "liquidfill - liquid pour animation in the terminal\n\n\
                     USAGE:\n  liquidfill [--fps N] [--dump [--ticks N]]\n\n\
                     OPTIONS:\n  \
                     --fps N    target frame rate, 15..240 (default 60)\n  \
                     --dump     write one JSON frame record per tick to stdout\n  \
                     --ticks N  tick count for --dump (default 64)\n\n\
                     KEYS:\n  q/Esc quit | space replay | p pause"
                );
                std::process::exit(0);
            }
            _ => {}
        }
    }
    args.fps = args.fps.clamp(15, 240);
    args.ticks = args.ticks.max(2);
    args
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let args = parse_args();
    if args.dump { dump(&args) } else { run(&args) }
}

/// Feed every started-but-unfinished phase its clamped raw progress for
/// `elapsed_ms` on the shared sequence clock.
fn drive(engine: &mut LiquidEngine, elapsed_ms: u64) {
    for phase in Phase::ALL {
        let spec = phase.spec();
        if elapsed_ms < spec.start_offset {
            break;
        }
        if engine.is_finished(phase) {
            continue;
        }
        let raw = (elapsed_ms - spec.start_offset) as f32 / spec.duration as f32;
        engine.on_tick(phase, raw.min(1.0));
    }
}

#[derive(Serialize)]
struct DumpRecord<'a> {
    elapsed_ms: u64,
    frame: Frame<'a>,
}

/// Replay the whole sequence on a synthetic clock and print frame
/// records as JSON lines.
fn dump(args: &Args) -> Result<()> {
    let total = PhaseSpec::TICKING.end_offset();
    let mut engine = LiquidEngine::new();
    engine.set_size(800.0, 800.0);
    engine.start_pour();

    let mut out = io::stdout().lock();
    for i in 0..args.ticks {
        let elapsed_ms = total * i as u64 / (args.ticks - 1) as u64;
        drive(&mut engine, elapsed_ms);
        if let Some(frame) = engine.frame() {
            serde_json::to_writer(&mut out, &DumpRecord { elapsed_ms, frame })?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let mut out = io::stdout();
    execute!(out, EnterAlternateScreen, cursor::Hide, DisableLineWrap)?;
    terminal::enable_raw_mode()?;
    let res = event_loop(args, &mut out);
    cleanup(&mut out)?;
    res
}

/// Stage size the engine is told about: width capped so the vessel
/// always fits the terminal height, centered by a canvas origin shift.
fn stage(canvas: &mut BrailleCanvas) -> (f32, f32) {
    let width = canvas.width().min(canvas.height() * 3.0);
    let x_off = ((canvas.width() - width) / 2.0) as i32;
    canvas.set_origin(x_off.max(0), 0);
    (width, canvas.height())
}

fn event_loop(args: &Args, out: &mut io::Stdout) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut canvas = BrailleCanvas::new(cols.max(40), rows.max(16));
    let mut screen = Screen::new(cols.max(40), rows.max(16));

    let mut engine = LiquidEngine::new();
    let (w, h) = stage(&mut canvas);
    engine.set_size(w, h);
    engine.start_pour();

    let target = Duration::from_secs_f64(1.0 / args.fps as f64);
    let mut elapsed = Duration::ZERO;
    let mut last = Instant::now();
    let mut paused = false;

    loop {
        let now = Instant::now();
        if !paused {
            elapsed += now - last;
        }
        last = now;

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Resize(c, r) => {
                    canvas.resize(c.max(40), r.max(16));
                    screen.resize(c.max(40), r.max(16));
                    let (w, h) = stage(&mut canvas);
                    engine.set_size(w, h);
                    engine.start_pour();
                    elapsed = Duration::ZERO;
                }
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                    KeyCode::Char(' ') => {
                        engine.start_pour();
                        elapsed = Duration::ZERO;
                    }
                    KeyCode::Char('p') | KeyCode::Char('P') => paused = !paused,
                    _ => {}
                },
                _ => {}
            }
        }

        if !paused {
            drive(&mut engine, elapsed.as_millis() as u64);
        }

        canvas.clear();
        if let Some(frame) = engine.frame() {
            term::render_frame(&mut canvas, &frame);
        }
        screen.compose(&canvas);

        let status = match engine.phase() {
            None => "idle",
            Some(Phase::Filling) => "filling",
            Some(Phase::Bouncing) => "bouncing",
            Some(Phase::Ticking) if engine.is_finished(Phase::Ticking) => "done, space replays",
            Some(Phase::Ticking) => "ticking",
        };
        let hud = format!(
            " liquidfill | {status}{} | space replay | p pause | q quit ",
            if paused { " (paused)" } else { "" }
        );
        screen.draw_text(1, 0, &hud, term::HUD);
        screen.flush(out)?;

        let spent = now.elapsed();
        if spent < target {
            std::thread::sleep(target - spent);
        }
    }
}

fn cleanup(out: &mut io::Stdout) -> Result<()> {
    terminal::disable_raw_mode()?;
    execute!(out, ResetColor, EnableLineWrap, cursor::Show, LeaveAlternateScreen)?;
    Ok(())
}
