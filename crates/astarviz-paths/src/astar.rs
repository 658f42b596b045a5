use std::collections::BinaryHeap;

use astarviz_core::Point;

use crate::board::Board;
use crate::searcher::{NO_PARENT, NodeRef, Searcher};
use crate::traits::AstarPather;

/// Shortest path from the board's Start to its Goal, both inclusive.
///
/// Returns an empty path when Start or Goal is missing or the Goal cannot
/// be reached. Allocates a fresh [`Searcher`]; reuse one with
/// [`Searcher::find_path`] for repeated queries.
pub fn find_path(board: &Board) -> Vec<Point> {
    Searcher::new(board.range()).find_path(board)
}

impl Searcher {
    /// Shortest path from the board's Start to its Goal, both inclusive, or
    /// an empty path. The searcher is retargeted to the board's size first.
    pub fn find_path(&mut self, board: &Board) -> Vec<Point> {
        let (Some(start), Some(goal)) = (board.start(), board.goal()) else {
            self.expanded = 0;
            return Vec::new();
        };
        if self.rng != board.range() {
            self.set_range(board.range());
        }
        self.astar_path(board, start, goal).unwrap_or_default()
    }

    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// Returns the full path (including both endpoints) or `None` if no path
    /// exists within the current range.
    ///
    /// The open set is a plain binary heap without decrease-key: improving a
    /// node pushes a fresh entry, and entries whose node has since been
    /// closed or re-prioritised are discarded when popped.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        let cur_gen = self.next_generation();

        if start_idx == goal_idx {
            self.expanded = 1;
            return Some(vec![from]);
        }

        let mut seq: u64 = 0;
        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        {
            let h = pather.estimate(from, to);
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.h = h;
            node.f = h;
            node.parent = NO_PARENT;
            node.generation = cur_gen;
            node.closed = false;
            open.push(NodeRef {
                idx: start_idx,
                f: node.f,
                h: node.h,
                seq,
            });
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;
            {
                let node = &self.nodes[ci];
                // Stale entry: already closed, or superseded by a cheaper one.
                if node.closed || node.f != current.f {
                    continue;
                }
            }

            if ci == goal_idx {
                break 'search true;
            }

            self.nodes[ci].closed = true;
            self.expanded += 1;
            let current_g = self.nodes[ci].g;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g + pather.cost(current_point, np);

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if n.closed || tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.closed = false;
                    n.h = pather.estimate(np, to);
                }

                n.g = tentative_g;
                n.f = tentative_g + n.h;
                n.parent = ci;

                seq += 1;
                open.push(NodeRef {
                    idx: ni,
                    f: n.f,
                    h: n.h,
                    seq,
                });
            }
        };

        self.nbuf = nbuf;

        if !found {
            return None;
        }

        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != NO_PARENT {
            path.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Role;
    use crate::distance::manhattan;

    /// Build a board from rows of `.`, `S`, `G`, `#`.
    fn board(rows: &[&str]) -> Board {
        let mut b = Board::new(rows.len() as i32, rows[0].len() as i32);
        for (y, line) in rows.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let role = match ch {
                    'S' => Role::Start,
                    'G' => Role::Goal,
                    '#' => Role::Wall,
                    '*' => Role::PathMarker,
                    _ => continue,
                };
                b.set_role(Point::new(x as i32, y as i32), role);
            }
        }
        b
    }

    fn assert_valid_path(b: &Board, path: &[Point]) {
        assert_eq!(path.first().copied(), b.start());
        assert_eq!(path.last().copied(), b.goal());
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {} is not a step", w[0], w[1]);
        }
        for &p in path {
            assert_ne!(b.at(p), Role::Wall, "path crosses wall at {p}");
        }
    }

    #[test]
    fn open_3x3_corner_to_corner() {
        let b = board(&["S..", "...", "..G"]);
        let path = find_path(&b);
        assert_eq!(path.len(), 5);
        assert_valid_path(&b, &path);
    }

    #[test]
    fn open_board_length_is_manhattan_plus_one() {
        let cases = [
            (Point::new(0, 0), Point::new(9, 6)),
            (Point::new(7, 2), Point::new(1, 5)),
            (Point::new(4, 4), Point::new(4, 0)),
            (Point::new(0, 3), Point::new(9, 3)),
        ];
        for (s, g) in cases {
            let mut b = Board::new(7, 10);
            b.set_role(s, Role::Start);
            b.set_role(g, Role::Goal);
            let path = find_path(&b);
            assert_eq!(path.len() as i32, manhattan(s, g) + 1, "{s} -> {g}");
            assert_valid_path(&b, &path);
        }
    }

    #[test]
    fn start_equals_goal_is_single_cell() {
        let mut s = Searcher::new(astarviz_core::Range::with_size(3, 3));
        let b = Board::new(3, 3);
        let p = Point::new(1, 2);
        assert_eq!(s.astar_path(&b, p, p), Some(vec![p]));
    }

    #[test]
    fn missing_start_or_goal_is_empty() {
        assert!(find_path(&board(&["...", ".G."])).is_empty());
        assert!(find_path(&board(&["S..", "..."])).is_empty());
        assert!(find_path(&Board::new(0, 0)).is_empty());
    }

    #[test]
    fn routes_through_single_gap() {
        let b = board(&["S..", "#.#", "..G"]);
        let path = find_path(&b);
        assert_valid_path(&b, &path);
        assert!(path.contains(&Point::from_row_col(1, 1)));
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn full_wall_row_blocks() {
        let b = board(&["S..", "###", "..G"]);
        assert!(find_path(&b).is_empty());
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let b = board(&[
            "S......", //
            "...###.", //
            "...#G#.", //
            "...###.", //
        ]);
        assert!(find_path(&b).is_empty());
    }

    #[test]
    fn detour_around_wall_is_shortest() {
        let b = board(&[
            ".......", //
            ".#####.", //
            ".S...#G", //
            ".#####.", //
        ]);
        let path = find_path(&b);
        assert_valid_path(&b, &path);
        // Out of the pocket to the left, over the top, down the right side.
        assert_eq!(path.len(), 12);
    }

    #[test]
    fn path_markers_are_passable() {
        let b = board(&["S*G"]);
        assert_eq!(
            find_path(&b),
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]
        );
    }

    #[test]
    fn deterministic_across_runs_and_searchers() {
        let b = board(&[
            "S.....", //
            "..#...", //
            "..#.#.", //
            "....#G", //
        ]);
        let first = find_path(&b);
        assert!(!first.is_empty());
        let mut s = Searcher::new(b.range());
        assert_eq!(s.find_path(&b), first);
        assert_eq!(s.find_path(&b), first);
        assert_eq!(find_path(&b.clone()), first);
    }

    #[test]
    fn searcher_reuse_has_no_stale_state() {
        let mut s = Searcher::new(astarviz_core::Range::with_size(1, 1));

        let blocked = board(&["S.#..", "..#..", "..#.G"]);
        assert!(s.find_path(&blocked).is_empty());

        let open = board(&["S....", ".....", "....G"]);
        let path = s.find_path(&open);
        assert_eq!(path.len(), 7);
        assert_valid_path(&open, &path);

        let small = board(&["SG"]);
        assert_eq!(s.find_path(&small), vec![Point::new(0, 0), Point::new(1, 0)]);
        assert_eq!(s.range(), small.range());
    }

    #[test]
    fn expanded_counts_closed_cells() {
        let mut s = Searcher::new(astarviz_core::Range::with_size(5, 1));
        let b = board(&["S...G"]);
        assert_eq!(s.find_path(&b).len(), 5);
        assert_eq!(s.expanded(), 4);
        assert!(s.find_path(&board(&["....."])).is_empty());
        assert_eq!(s.expanded(), 0);
    }

    #[test]
    fn out_of_range_endpoints_yield_none() {
        let mut s = Searcher::new(astarviz_core::Range::with_size(3, 3));
        let b = Board::new(3, 3);
        assert_eq!(s.astar_path(&b, Point::new(-1, 0), Point::new(1, 1)), None);
        assert_eq!(s.astar_path(&b, Point::new(0, 0), Point::new(3, 3)), None);
    }
}
