//! Drawing a [`CellGraph`] to a terminal.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use gridwalk_core::{Cell, CellGraph, CellStatus, Point};
use gridwalk_paths::{SearchEngine, SearchState};

const COL_EMPTY: Color = Color::Rgb { r: 235, g: 235, b: 235 };
const COL_BLOCK: Color = Color::Rgb { r: 50, g: 50, b: 70 };
const COL_ACTIVE: Color = Color::Rgb { r: 100, g: 200, b: 100 };
const COL_CLOSED: Color = Color::Rgb { r: 200, g: 100, b: 100 };
const COL_TARGET: Color = Color::Rgb { r: 100, g: 100, b: 200 };
const COL_PATH: Color = Color::Rgb { r: 200, g: 100, b: 200 };
const COL_START: Color = Color::Rgb { r: 150, g: 100, b: 200 };
const COL_TEXT: Color = Color::Rgb { r: 220, g: 220, b: 220 };

/// Background colour of a cell. The target flag wins over the status.
pub fn cell_color(cell: &Cell) -> Color {
    if cell.is_target() {
        return COL_TARGET;
    }
    match cell.status() {
        CellStatus::Empty => COL_EMPTY,
        CellStatus::Blocked => COL_BLOCK,
        CellStatus::Start => COL_START,
        CellStatus::Target => COL_TARGET,
        CellStatus::Active => COL_ACTIVE,
        CellStatus::Closed => COL_CLOSED,
        CellStatus::Path => COL_PATH,
    }
}

/// Queue the whole grid, two columns per cell, starting at the top-left
/// corner of the screen. The caller flushes.
pub fn draw_grid(out: &mut impl Write, graph: &CellGraph) -> io::Result<()> {
    for y in 0..graph.height() {
        queue!(out, cursor::MoveTo(0, y as u16))?;
        for x in 0..graph.width() {
            let Some(cell) = graph.cell(Point::new(x, y)) else {
                continue;
            };
            queue!(out, SetBackgroundColor(cell_color(cell)), Print("  "))?;
        }
        queue!(out, ResetColor)?;
    }
    Ok(())
}

/// Queue one status line below the grid.
pub fn draw_status(out: &mut impl Write, graph: &CellGraph, engine: &SearchEngine) -> io::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, graph.height() as u16 + 1),
        SetForegroundColor(COL_TEXT),
        Print(summary(engine, graph)),
        Print("    (q to quit)"),
        ResetColor
    )
}

/// One-line description of the engine's progress.
pub fn summary(engine: &SearchEngine, graph: &CellGraph) -> String {
    let stats = engine.stats();
    let name = engine
        .algorithm()
        .map_or_else(|| "no search".to_string(), |a| a.to_string());
    let state = match engine.state() {
        SearchState::Idle => "idle",
        SearchState::Running => "running",
        SearchState::Succeeded => "path found",
        SearchState::Exhausted => "no path",
    };
    let mut line = format!(
        "{name}: {state}, {} steps, {} cells expanded",
        stats.steps, stats.expanded
    );
    if let Some(path) = engine.reconstruct_path(graph) {
        line.push_str(&format!(
            ", path of {} cells costing {}",
            stats.path_len,
            gridwalk_paths::path_cost(&path)
        ));
    }
    line
}

/// The grid as text, one glyph per cell and one line per row.
pub fn to_text(graph: &CellGraph) -> String {
    let mut out = String::with_capacity(graph.len() + graph.height().max(0) as usize);
    for y in 0..graph.height() {
        for x in 0..graph.width() {
            if let Some(cell) = graph.cell(Point::new(x, y)) {
                out.push(cell.status().glyph());
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::GridConfig;
    use gridwalk_paths::Algorithm;

    #[test]
    fn text_rendering() {
        let mut g = CellGraph::from_config(&GridConfig {
            width: 4,
            height: 2,
            start: Point::new(0, 0),
            goal: Point::new(3, 1),
        })
        .unwrap();
        g.set_status(Point::new(1, 1), CellStatus::Blocked);
        assert_eq!(to_text(&g), "S...\n.#.G\n");
    }

    #[test]
    fn target_colour_wins() {
        let g = CellGraph::from_config(&GridConfig::default()).unwrap();
        let goal = g.cell(Point::new(38, 28)).unwrap();
        assert_eq!(cell_color(goal), COL_TARGET);
        assert_eq!(cell_color(g.cell(Point::ZERO).unwrap()), COL_EMPTY);
    }

    #[test]
    fn summary_mentions_cost() {
        let mut g = CellGraph::new(5, 5);
        let mut e = SearchEngine::default();
        assert_eq!(summary(&e, &g), "no search: idle, 0 steps, 0 cells expanded");
        e.start(&mut g, Algorithm::AStar, Point::ZERO, Point::new(4, 4))
            .unwrap();
        while !e.step(&mut g).terminal {}
        let line = summary(&e, &g);
        assert!(line.starts_with("A* Search: path found"));
        assert!(line.ends_with("costing 56"));
    }

    #[test]
    fn grid_is_queued_row_by_row() {
        let g = CellGraph::new(3, 2);
        let mut buf = Vec::new();
        draw_grid(&mut buf, &g).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.matches("  ").count() >= 6);
    }
}
