//! Elm-architecture Model implementation.

use std::time::{Duration, Instant};

use astarviz_core::{
    Cell, Point, Range,
    app::{Effect, Model},
    grid::Grid,
    messages::{Key, MouseAction, Msg},
    style::{AttrMask, Style},
};
use astarviz_paths::{Board, Role, Searcher};

use crate::colors::{Palette, STATUS_BG, STATUS_FG};
use crate::config::VizConfig;
use crate::error::Result;
use crate::preset::BoardSize;
use crate::reveal::Reveal;

const HELP: &str = "click: start/goal/wall  right: erase  enter: solve  r: reset  1-3: size  q: quit";

/// How many screen cells one board cell covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Footprint {
    /// The same block for every preset.
    Fixed(Point),
    /// `cell_size / unit_px` screen cells per side, so every preset fills
    /// the same window.
    Scaled { unit_px: i32 },
}

impl Footprint {
    pub fn span(self, size: BoardSize) -> Point {
        match self {
            Footprint::Fixed(p) => Point::new(p.x.max(1), p.y.max(1)),
            Footprint::Scaled { unit_px } => {
                let k = (size.cell_size() / unit_px.max(1)).max(1);
                Point::new(k, k)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct VisualizerConfig {
    pub size: BoardSize,
    pub palette: Palette,
    pub footprint: Footprint,
    pub status_bar: bool,
    pub interval: Duration,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            size: BoardSize::default(),
            palette: Palette::default(),
            footprint: Footprint::Fixed(Point::new(2, 1)),
            status_bar: true,
            interval: Duration::from_millis(80),
        }
    }
}

impl VisualizerConfig {
    pub fn from_config(c: &VizConfig, footprint: Footprint) -> Result<Self> {
        Ok(Self {
            size: c.board.size,
            palette: Palette::from_config(&c.colors)?,
            footprint,
            status_bar: c.display.status_bar,
            interval: c.reveal.interval(),
        })
    }
}

/// What a held mouse button does to the cells it is dragged over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paint {
    Walls,
    Erase,
}

/// The visualizer: an editable board, the search engine, and the reveal of
/// the last path found.
pub struct Visualizer {
    board: Board,
    size: BoardSize,
    searcher: Searcher,
    palette: Palette,
    footprint: Footprint,
    status_bar: bool,
    interval: Duration,
    painting: Option<Paint>,
    last_cell: Option<Point>,
    reveal: Option<Reveal>,
    status: String,
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new(VisualizerConfig::default())
    }
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Self {
        let board = Board::new(config.size.rows(), config.size.columns());
        Self {
            searcher: Searcher::new(board.range()),
            board,
            size: config.size,
            palette: config.palette,
            footprint: config.footprint,
            status_bar: config.status_bar,
            interval: config.interval,
            painting: None,
            last_cell: None,
            reveal: None,
            status: String::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_revealing(&self) -> bool {
        self.reveal.is_some()
    }

    /// Screen extent of the board plus status line.
    pub fn screen_size(&self) -> Point {
        let span = self.footprint.span(self.size);
        let origin = self.origin();
        Point::new(
            origin.x + self.board.columns() * span.x,
            origin.y + self.board.rows() * span.y,
        )
    }

    fn origin(&self) -> Point {
        if self.status_bar {
            Point::new(0, 1)
        } else {
            Point::ZERO
        }
    }

    /// Board cell under screen position `pos`, if any.
    fn board_cell(&self, pos: Point) -> Option<Point> {
        let rel = pos - self.origin();
        if rel.x < 0 || rel.y < 0 {
            return None;
        }
        let span = self.footprint.span(self.size);
        let p = Point::new(rel.x / span.x, rel.y / span.y);
        self.board.contains(p).then_some(p)
    }

    // -------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------

    fn handle_key(&mut self, key: Key, time: Instant) -> Option<Effect> {
        match key {
            Key::Enter | Key::Space | Key::Char('s') => self.solve(time),
            Key::Char('r') | Key::Backspace | Key::Delete => {
                self.rebuild(self.size);
                self.status = "board cleared".into();
                None
            }
            Key::Char('1') => self.select_size(BoardSize::Small),
            Key::Char('2') => self.select_size(BoardSize::Medium),
            Key::Char('3') => self.select_size(BoardSize::Large),
            Key::ArrowUp | Key::ArrowRight => self.select_size(self.size.larger()),
            Key::ArrowDown | Key::ArrowLeft => self.select_size(self.size.smaller()),
            Key::Char('q') | Key::Escape => Some(Effect::End),
            _ => None,
        }
    }

    fn handle_mouse(&mut self, action: MouseAction, pos: Point) -> Option<Effect> {
        let cell = self.board_cell(pos);
        match action {
            MouseAction::Main => {
                self.painting = Some(Paint::Walls);
                self.last_cell = cell;
                if let Some(p) = cell {
                    self.place(p);
                }
            }
            MouseAction::Secondary => {
                self.painting = Some(Paint::Erase);
                self.last_cell = cell;
                if let Some(p) = cell {
                    self.board.set_role(p, Role::Empty);
                }
            }
            MouseAction::Move => {
                let (Some(paint), Some(p)) = (self.painting, cell) else {
                    return None;
                };
                if cell != self.last_cell {
                    self.last_cell = cell;
                    self.drag(paint, p);
                }
            }
            MouseAction::Release => {
                self.painting = None;
                self.last_cell = None;
            }
            MouseAction::WheelUp => return self.select_size(self.size.larger()),
            MouseAction::WheelDown => return self.select_size(self.size.smaller()),
        }
        None
    }

    /// A left click: Start first, then Goal, then walls. Start and Goal are
    /// never overwritten by a click.
    fn place(&mut self, p: Point) {
        let current = self.board.at(p);
        if matches!(current, Role::Start | Role::Goal) {
            return;
        }
        if self.board.start().is_none() {
            self.board.set_role(p, Role::Start);
        } else if self.board.goal().is_none() {
            self.board.set_role(p, Role::Goal);
        } else {
            self.board.set_role(p, Role::Wall);
        }
    }

    fn drag(&mut self, paint: Paint, p: Point) {
        match paint {
            Paint::Walls => {
                if !matches!(self.board.at(p), Role::Start | Role::Goal) {
                    self.board.set_role(p, Role::Wall);
                }
            }
            Paint::Erase => self.board.set_role(p, Role::Empty),
        }
    }

    fn solve(&mut self, now: Instant) -> Option<Effect> {
        self.cancel_reveal();
        self.board.clear_role(Role::PathMarker);

        if self.board.start().is_none() || self.board.goal().is_none() {
            log::info!("solve ignored: start and goal must both be placed");
            self.status = "place a start and a goal first".into();
            return None;
        }

        let path = self.searcher.find_path(&self.board);
        let expanded = self.searcher.expanded();
        if path.is_empty() {
            log::info!("no path found, {expanded} nodes expanded");
            self.status = format!("no path ({expanded} expanded)");
            return None;
        }
        log::info!(
            "path of {} cells found, {expanded} nodes expanded",
            path.len()
        );
        self.status = format!("path: {} cells ({expanded} expanded)", path.len());

        let mut reveal = Reveal::new(path, now, self.interval);
        reveal.advance(now, &mut self.board);
        if reveal.is_done() {
            return None;
        }
        let ticker = reveal.ticker();
        self.reveal = Some(reveal);
        Some(ticker)
    }

    fn tick(&mut self, now: Instant) {
        let Some(reveal) = self.reveal.as_mut() else {
            return;
        };
        reveal.advance(now, &mut self.board);
        if reveal.is_done() {
            log::debug!("reveal finished after {} cells", reveal.revealed());
            self.reveal = None;
        }
    }

    fn select_size(&mut self, size: BoardSize) -> Option<Effect> {
        if size != self.size {
            self.rebuild(size);
            self.status = format!("{} board", size.name());
        }
        None
    }

    /// Replace the board with an empty one of `size`.
    fn rebuild(&mut self, size: BoardSize) {
        self.cancel_reveal();
        self.size = size;
        self.board = Board::new(size.rows(), size.columns());
        self.painting = None;
        self.last_cell = None;
        log::info!(
            "new {} board, {}x{}",
            size.name(),
            size.rows(),
            size.columns()
        );
    }

    fn cancel_reveal(&mut self) {
        if let Some(reveal) = self.reveal.take() {
            reveal.cancel();
        }
    }

    // -------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------

    fn draw_board(&self, grid: &mut Grid) {
        let span = self.footprint.span(self.size);
        let origin = self.origin();
        for (p, role) in self.board.iter() {
            let color = self.palette.role_color(role, p.row(), p.col());
            let x0 = origin.x + p.x * span.x;
            let y0 = origin.y + p.y * span.y;
            grid.fill_range(
                Range::new(x0, y0, x0 + span.x, y0 + span.y),
                Cell::filled(color),
            );
        }
    }

    fn draw_status(&self, grid: &mut Grid) {
        let style = Style::default()
            .with_fg(STATUS_FG)
            .with_bg(STATUS_BG)
            .with_attrs(AttrMask::BOLD);
        grid.fill_range(
            Range::new(0, 0, grid.width(), 1),
            Cell::default().with_style(style),
        );

        let mut text = format!(" {} {}x{} | {HELP}", self.size.name(), self.board.rows(), self.board.columns());
        if !self.status.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status);
        }
        let extent = self.screen_size();
        if extent.x > grid.width() || extent.y > grid.height() {
            text.push_str(" | board clipped");
        }
        grid.print(Point::ZERO, &text, style);
    }
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                log::info!(
                    "visualizer started with a {} board",
                    self.size.name()
                );
                None
            }
            Msg::KeyDown { key, time, .. } => self.handle_key(key, time),
            Msg::Mouse { action, pos, .. } => self.handle_mouse(action, pos),
            Msg::Tick { time } => {
                self.tick(time);
                None
            }
            Msg::Screen { width, height, .. } => {
                log::debug!("screen resized to {width}x{height}");
                None
            }
            Msg::Quit => Some(Effect::End),
        }
    }

    fn draw(&self, grid: &mut Grid) {
        grid.fill(Cell::default());
        self.draw_board(grid);
        if self.status_bar {
            self.draw_status(grid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;

    /// Screen position of board cell (`x`, `y`) with the default layout:
    /// 2×1 footprint below a status line.
    fn at(x: i32, y: i32) -> Point {
        Point::new(2 * x, y + 1)
    }

    fn press(v: &mut Visualizer, action: MouseAction, pos: Point) {
        v.update(Msg::mouse(action, pos));
    }

    fn key_at(v: &mut Visualizer, key: Key, time: Instant) -> Option<Effect> {
        v.update(Msg::KeyDown { key, time })
    }

    fn small() -> Visualizer {
        Visualizer::new(VisualizerConfig {
            size: BoardSize::Small,
            ..VisualizerConfig::default()
        })
    }

    #[test]
    fn clicks_place_start_goal_then_walls() {
        let mut v = small();
        press(&mut v, MouseAction::Main, at(1, 1));
        press(&mut v, MouseAction::Main, at(5, 3));
        press(&mut v, MouseAction::Main, at(2, 2));
        assert_eq!(v.board().start(), Some(Point::new(1, 1)));
        assert_eq!(v.board().goal(), Some(Point::new(5, 3)));
        assert_eq!(v.board().at(Point::new(2, 2)), Role::Wall);
    }

    #[test]
    fn clicks_never_overwrite_endpoints() {
        let mut v = small();
        press(&mut v, MouseAction::Main, at(1, 1));
        press(&mut v, MouseAction::Main, at(1, 1));
        assert_eq!(v.board().goal(), None);
        press(&mut v, MouseAction::Main, at(4, 4));
        press(&mut v, MouseAction::Main, at(1, 1));
        press(&mut v, MouseAction::Main, at(4, 4));
        assert_eq!(v.board().start(), Some(Point::new(1, 1)));
        assert_eq!(v.board().goal(), Some(Point::new(4, 4)));
        assert_eq!(v.board().count(Role::Wall), 0);
    }

    #[test]
    fn one_footprint_maps_to_one_cell() {
        let mut v = small();
        press(&mut v, MouseAction::Main, Point::new(7, 3));
        assert_eq!(v.board().start(), Some(Point::new(3, 2)));
    }

    #[test]
    fn positions_off_the_board_are_ignored() {
        let mut v = small();
        press(&mut v, MouseAction::Main, Point::new(4, 0));
        press(&mut v, MouseAction::Main, at(25, 0));
        press(&mut v, MouseAction::Main, at(0, 17));
        assert_eq!(v.board().start(), None);
        assert_eq!(v.board().count(Role::Empty), 17 * 25);
    }

    #[test]
    fn drag_paints_walls_around_endpoints() {
        let mut v = small();
        press(&mut v, MouseAction::Main, at(2, 0));
        press(&mut v, MouseAction::Main, at(9, 9));
        press(&mut v, MouseAction::Main, at(0, 0));
        for x in 1..4 {
            press(&mut v, MouseAction::Move, at(x, 0));
        }
        press(&mut v, MouseAction::Release, at(3, 0));
        press(&mut v, MouseAction::Move, at(5, 0));

        assert_eq!(v.board().at(Point::new(0, 0)), Role::Wall);
        assert_eq!(v.board().at(Point::new(1, 0)), Role::Wall);
        assert_eq!(v.board().at(Point::new(2, 0)), Role::Start);
        assert_eq!(v.board().at(Point::new(3, 0)), Role::Wall);
        assert_eq!(v.board().at(Point::new(5, 0)), Role::Empty);
    }

    #[test]
    fn right_button_erases_and_frees_start() {
        let mut v = small();
        press(&mut v, MouseAction::Main, at(1, 1));
        press(&mut v, MouseAction::Main, at(2, 2));
        press(&mut v, MouseAction::Secondary, at(1, 1));
        assert_eq!(v.board().start(), None);

        press(&mut v, MouseAction::Main, at(6, 6));
        assert_eq!(v.board().start(), Some(Point::new(6, 6)));
        assert_eq!(v.board().goal(), Some(Point::new(2, 2)));

        press(&mut v, MouseAction::Secondary, at(5, 5));
        press(&mut v, MouseAction::Move, at(2, 2));
        assert_eq!(v.board().goal(), None);
    }

    #[test]
    fn solve_without_endpoints_is_ignored() {
        let mut v = small();
        press(&mut v, MouseAction::Main, at(1, 1));
        assert!(key_at(&mut v, Key::Enter, Instant::now()).is_none());
        assert!(!v.is_revealing());
        assert!(v.status().contains("start and a goal"));
    }

    #[test]
    fn solve_reveals_path_over_time() {
        let mut v = small();
        press(&mut v, MouseAction::Main, at(0, 0));
        press(&mut v, MouseAction::Main, at(4, 0));
        let t0 = Instant::now();

        let effect = key_at(&mut v, Key::Char('s'), t0);
        assert!(matches!(effect, Some(Effect::Sub(_))));
        assert!(v.is_revealing());
        assert_eq!(v.board().count(Role::PathMarker), 0);

        v.update(Msg::Tick {
            time: t0 + Duration::from_millis(170),
        });
        assert_eq!(v.board().count(Role::PathMarker), 2);

        v.update(Msg::Tick {
            time: t0 + Duration::from_secs(5),
        });
        assert_eq!(v.board().count(Role::PathMarker), 3);
        assert!(!v.is_revealing());
        assert!(v.status().contains("5 cells"));
    }

    #[test]
    fn new_solve_wipes_old_markers() {
        let mut v = small();
        press(&mut v, MouseAction::Main, at(0, 0));
        press(&mut v, MouseAction::Main, at(0, 4));
        let t0 = Instant::now();
        key_at(&mut v, Key::Enter, t0);
        v.update(Msg::Tick {
            time: t0 + Duration::from_secs(5),
        });
        assert_eq!(v.board().count(Role::PathMarker), 3);

        press(&mut v, MouseAction::Main, at(0, 2));
        key_at(&mut v, Key::Enter, t0);
        assert_eq!(v.board().count(Role::PathMarker), 0);
        v.update(Msg::Tick {
            time: t0 + Duration::from_secs(5),
        });
        assert_eq!(v.board().count(Role::PathMarker), 5);
        assert_eq!(v.board().at(Point::new(0, 2)), Role::Wall);
    }

    #[test]
    fn unreachable_goal_reports_no_path() {
        let mut v = small();
        press(&mut v, MouseAction::Main, at(0, 0));
        press(&mut v, MouseAction::Main, at(5, 5));
        press(&mut v, MouseAction::Main, at(1, 0));
        press(&mut v, MouseAction::Main, at(0, 1));
        assert!(key_at(&mut v, Key::Space, Instant::now()).is_none());
        assert!(v.status().starts_with("no path"));
        assert_eq!(v.board().count(Role::PathMarker), 0);
    }

    #[test]
    fn adjacent_endpoints_reveal_nothing() {
        let mut v = small();
        press(&mut v, MouseAction::Main, at(0, 0));
        press(&mut v, MouseAction::Main, at(1, 0));
        let t0 = Instant::now();
        key_at(&mut v, Key::Enter, t0);
        v.update(Msg::Tick {
            time: t0 + Duration::from_secs(1),
        });
        assert!(!v.is_revealing());
        assert_eq!(v.board().count(Role::PathMarker), 0);
        assert!(v.status().contains("2 cells"));
    }

    #[test]
    fn reset_and_resize_cancel_reveal() {
        let mut v = small();
        press(&mut v, MouseAction::Main, at(0, 0));
        press(&mut v, MouseAction::Main, at(9, 9));
        key_at(&mut v, Key::Enter, Instant::now());
        assert!(v.is_revealing());

        key_at(&mut v, Key::Char('r'), Instant::now());
        assert!(!v.is_revealing());
        assert_eq!(v.board().start(), None);
        assert_eq!(v.size(), BoardSize::Small);

        key_at(&mut v, Key::Char('3'), Instant::now());
        assert_eq!(v.size(), BoardSize::Large);
        assert_eq!((v.board().rows(), v.board().columns()), (68, 100));
    }

    #[test]
    fn wheel_steps_through_presets() {
        let mut v = small();
        press(&mut v, MouseAction::WheelUp, Point::ZERO);
        assert_eq!(v.size(), BoardSize::Medium);
        press(&mut v, MouseAction::WheelUp, Point::ZERO);
        press(&mut v, MouseAction::WheelUp, Point::ZERO);
        assert_eq!(v.size(), BoardSize::Large);
        press(&mut v, MouseAction::WheelDown, Point::ZERO);
        assert_eq!(v.size(), BoardSize::Medium);
        key_at(&mut v, Key::ArrowLeft, Instant::now());
        assert_eq!(v.size(), BoardSize::Small);
    }

    #[test]
    fn quit_keys_end_the_app() {
        let mut v = small();
        assert!(matches!(
            key_at(&mut v, Key::Char('q'), Instant::now()),
            Some(Effect::End)
        ));
        assert!(matches!(
            key_at(&mut v, Key::Escape, Instant::now()),
            Some(Effect::End)
        ));
    }

    #[test]
    fn draw_fills_footprints_and_status() {
        let mut v = small();
        press(&mut v, MouseAction::Main, at(1, 0));
        let mut grid = Grid::new(50, 18);
        v.draw(&mut grid);

        assert_eq!(grid.at(Point::new(2, 1)).style.bg, colors::START);
        assert_eq!(grid.at(Point::new(3, 1)).style.bg, colors::START);
        assert_eq!(grid.at(Point::new(0, 1)).style.bg, colors::EMPTY);
        assert_eq!(grid.at(Point::new(4, 1)).style.bg, colors::EMPTY);
        assert_eq!(grid.at(Point::new(0, 2)).style.bg, colors::EMPTY_ALT);
        assert_eq!(grid.at(Point::new(1, 0)).ch, 's');
        assert_eq!(grid.at(Point::new(49, 0)).style.bg, STATUS_BG);
    }

    #[test]
    fn scaled_footprint_matches_presets() {
        let f = Footprint::Scaled { unit_px: 10 };
        assert_eq!(f.span(BoardSize::Small), Point::new(4, 4));
        assert_eq!(f.span(BoardSize::Medium), Point::new(2, 2));
        assert_eq!(f.span(BoardSize::Large), Point::new(1, 1));

        let v = Visualizer::new(VisualizerConfig {
            footprint: f,
            status_bar: false,
            ..VisualizerConfig::default()
        });
        assert_eq!(v.screen_size(), Point::new(100, 68));
    }
}
