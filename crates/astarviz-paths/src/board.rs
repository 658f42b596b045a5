//! The board: a fixed-size rectangle of cells, each carrying one [`Role`].

use std::fmt;

use astarviz_core::{Point, Range};

/// What a board cell currently is. Exactly one role holds per cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Empty,
    Start,
    Goal,
    Wall,
    /// A cell revealed as part of the last solved path.
    PathMarker,
}

impl Role {
    /// Whether a search may step onto a cell with this role.
    #[inline]
    pub const fn passable(self) -> bool {
        !matches!(self, Role::Wall)
    }
}

/// A `rows × columns` board of [`Role`]s.
///
/// The Start and Goal coordinates are stored alongside the cells and kept in
/// sync by [`set_role`](Board::set_role), which also guarantees there is at
/// most one of each.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    rows: i32,
    columns: i32,
    roles: Vec<Role>,
    start: Option<Point>,
    goal: Option<Point>,
}

impl Board {
    /// Create a board with every cell `Empty`. Negative sizes are clamped to
    /// zero.
    pub fn new(rows: i32, columns: i32) -> Self {
        let rows = rows.max(0);
        let columns = columns.max(0);
        Self {
            rows,
            columns,
            roles: vec![Role::Empty; (rows as usize) * (columns as usize)],
            start: None,
            goal: None,
        }
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// The board rectangle, `x` spanning columns and `y` spanning rows.
    #[inline]
    pub fn range(&self) -> Range {
        Range::with_size(self.columns, self.rows)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.range().contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        self.contains(p)
            .then(|| (p.y as usize) * (self.columns as usize) + (p.x as usize))
    }

    /// Role at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the board.
    #[inline]
    pub fn cell_at(&self, row: i32, col: i32) -> Role {
        self.at(Point::from_row_col(row, col))
    }

    /// Role at `p`.
    ///
    /// # Panics
    ///
    /// Panics if `p` is outside the board. Input mapping should go through
    /// [`get`](Board::get) instead.
    pub fn at(&self, p: Point) -> Role {
        match self.get(p) {
            Some(role) => role,
            None => panic!(
                "board position {p} out of range for {}x{} board",
                self.rows, self.columns
            ),
        }
    }

    /// Role at `p`, or `None` outside the board.
    #[inline]
    pub fn get(&self, p: Point) -> Option<Role> {
        self.index(p).map(|i| self.roles[i])
    }

    /// First position holding `role` in row-major order.
    pub fn find_first(&self, role: Role) -> Option<Point> {
        self.roles
            .iter()
            .position(|&r| r == role)
            .map(|i| self.point(i))
    }

    /// Stored Start position.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Stored Goal position.
    #[inline]
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    /// In-bounds cardinal neighbours of `p`, in the order up, right, down,
    /// left. Roles are not considered.
    pub fn neighbors_of(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_4().into_iter().filter(|&n| self.contains(n))
    }

    /// Assign `role` to the cell at `p`.
    ///
    /// Assigning `Start` or `Goal` moves it: a previous Start (Goal) elsewhere
    /// becomes `Empty`. Overwriting the Start or Goal cell with any other role
    /// clears it.
    ///
    /// # Panics
    ///
    /// Panics if `p` is outside the board.
    pub fn set_role(&mut self, p: Point, role: Role) {
        let Some(i) = self.index(p) else {
            panic!(
                "board position {p} out of range for {}x{} board",
                self.rows, self.columns
            );
        };

        match self.roles[i] {
            Role::Start if role != Role::Start => self.start = None,
            Role::Goal if role != Role::Goal => self.goal = None,
            _ => {}
        }

        match role {
            Role::Start => {
                if let Some(old) = self.start.replace(p).filter(|&old| old != p) {
                    self.clear_at(old);
                }
            }
            Role::Goal => {
                if let Some(old) = self.goal.replace(p).filter(|&old| old != p) {
                    self.clear_at(old);
                }
            }
            _ => {}
        }

        self.roles[i] = role;
    }

    /// Reset every cell holding `role` to `Empty`. Returns how many changed.
    pub fn clear_role(&mut self, role: Role) -> usize {
        if role == Role::Empty {
            return 0;
        }
        match role {
            Role::Start => self.start = None,
            Role::Goal => self.goal = None,
            _ => {}
        }
        let mut n = 0;
        for r in self.roles.iter_mut().filter(|r| **r == role) {
            *r = Role::Empty;
            n += 1;
        }
        n
    }

    /// Number of cells holding `role`.
    pub fn count(&self, role: Role) -> usize {
        self.roles.iter().filter(|&&r| r == role).count()
    }

    /// Row-major iterator over `(Point, Role)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Role)> + '_ {
        self.range().iter().zip(self.roles.iter().copied())
    }

    fn clear_at(&mut self, p: Point) {
        if let Some(i) = self.index(p) {
            self.roles[i] = Role::Empty;
        }
    }

    #[inline]
    fn point(&self, i: usize) -> Point {
        let cols = self.columns as usize;
        Point::new((i % cols) as i32, (i / cols) as i32)
    }
}

impl fmt::Debug for Board {
    /// One line per row: `.` empty, `S` start, `G` goal, `#` wall, `*` path.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{}", self.rows, self.columns)?;
        for y in 0..self.rows {
            for x in 0..self.columns {
                let ch = match self.at(Point::new(x, y)) {
                    Role::Empty => '.',
                    Role::Start => 'S',
                    Role::Goal => 'G',
                    Role::Wall => '#',
                    Role::PathMarker => '*',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct BoardData {
    rows: i32,
    columns: i32,
    roles: Vec<Role>,
}

#[cfg(feature = "serde")]
impl serde::Serialize for Board {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        BoardData {
            rows: self.rows,
            columns: self.columns,
            roles: self.roles.clone(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Board {
    /// Rebuilds through `set_role`, so a serialized board with several
    /// Start or Goal cells keeps only the last one of each.
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = BoardData::deserialize(deserializer)?;
        let cells = (data.rows.max(0) as usize).checked_mul(data.columns.max(0) as usize);
        if cells != Some(data.roles.len()) {
            return Err(serde::de::Error::invalid_length(
                data.roles.len(),
                &"rows * columns roles",
            ));
        }
        let mut board = Board::new(data.rows, data.columns);
        let range = board.range();
        for (p, role) in range.iter().zip(data.roles) {
            board.set_role(p, role);
        }
        Ok(board)
    }
}
