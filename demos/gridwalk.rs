//! Terminal pathfinding demo using crossterm.
//!
//! Run: cargo run --bin gridwalk -- --algorithm astar --maze division

use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, ClearType},
};
use gridwalk_core::CellGraph;
use gridwalk_demos::{Scenario, logging, render};
use gridwalk_maze::{MazeConfig, MazeKind};
use gridwalk_paths::{Algorithm, SearchConfig, SearchEngine};

#[derive(Parser)]
#[command(
    name = "gridwalk",
    version,
    about = "Watch grid pathfinding algorithms explore, one step at a time"
)]
struct Args {
    /// Search algorithm (astar, dijkstra, bfs, dfs, greedy, bidirectional, idastar, swarm).
    #[arg(short, long, default_value = "astar")]
    algorithm: Algorithm,
    /// Maze to generate first (random, division, prim, cellular, spiral).
    #[arg(short, long)]
    maze: Option<MazeKind>,
    #[arg(long, default_value_t = 40)]
    width: i32,
    #[arg(long, default_value_t = 30)]
    height: i32,
    /// Maze seed; random when omitted.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Milliseconds between steps.
    #[arg(short, long, default_value_t = 30)]
    delay: u64,
    /// Obstacle density for the random maze.
    #[arg(long, default_value_t = 0.3)]
    density: f64,
    /// Restart budget for IDA*.
    #[arg(long, default_value_t = 256)]
    ida_max_restarts: u32,
    /// Run without animation and print the final grid as text.
    #[arg(long)]
    plain: bool,
    /// List algorithms and mazes, then exit.
    #[arg(long)]
    list: bool,
}

fn main() {
    logging::init();
    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.list {
        list();
        return Ok(());
    }

    let scenario = Scenario {
        width: args.width,
        height: args.height,
        maze: args.maze,
        maze_config: MazeConfig {
            density: args.density,
            ..MazeConfig::default()
        },
        seed: args.seed.unwrap_or_else(rand::random),
    };
    let mut graph = scenario.build()?;
    let (Some(start), Some(goal)) = (graph.start(), graph.goal()) else {
        return Err("endpoints were not placed".into());
    };

    let mut engine = SearchEngine::new(SearchConfig {
        ida_max_restarts: args.ida_max_restarts,
        ..SearchConfig::default()
    });
    engine.start(&mut graph, args.algorithm, start, goal)?;

    if args.plain {
        while !engine.step(&mut graph).terminal {}
        paint_path(&mut graph, &engine);
        print!("{}", render::to_text(&graph));
    } else {
        animate(&mut graph, &mut engine, Duration::from_millis(args.delay))?;
    }
    println!("{}", render::summary(&engine, &graph));
    if args.maze.is_some() {
        println!("maze seed: {}", scenario.seed);
    }
    Ok(())
}

fn list() {
    println!("Algorithms:");
    for a in Algorithm::ALL {
        println!("  {:<14} {a} ({:?})", a.slug(), a.category());
    }
    println!("Mazes:");
    for k in MazeKind::ALL {
        println!("  {:<14} {k}", k.slug());
    }
}

fn paint_path(graph: &mut CellGraph, engine: &SearchEngine) {
    if let Some(path) = engine.reconstruct_path(graph) {
        graph.mark_path(&path);
    }
}

/// Restores the terminal when dropped.
struct Screen;

impl Screen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self)
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Whether a quit key arrived within `timeout`.
fn quit_requested(timeout: Duration) -> io::Result<bool> {
    if !event::poll(timeout)? {
        return Ok(false);
    }
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn animate(graph: &mut CellGraph, engine: &mut SearchEngine, delay: Duration) -> io::Result<()> {
    let _screen = Screen::enter()?;
    let mut stdout = io::stdout();

    loop {
        let r = engine.step(graph);
        if r.terminal {
            break;
        }
        render::draw_grid(&mut stdout, graph)?;
        render::draw_status(&mut stdout, graph, engine)?;
        stdout.flush()?;
        if quit_requested(delay)? {
            engine.cancel(graph);
            return Ok(());
        }
    }

    paint_path(graph, engine);
    render::draw_grid(&mut stdout, graph)?;
    render::draw_status(&mut stdout, graph, engine)?;
    stdout.flush()?;
    while !quit_requested(Duration::from_millis(250))? {}
    Ok(())
}
