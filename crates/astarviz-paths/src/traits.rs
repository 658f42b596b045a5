use astarviz_core::Point;

use crate::board::Board;
use crate::distance::manhattan;

/// Minimal pathfinding interface: neighbour enumeration.
pub trait Pather {
    /// Append the cells reachable in one step from `p` into `buf`. The caller
    /// clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Estimate of the remaining cost from `from` to `to`. Must never
    /// overestimate.
    fn estimate(&self, from: Point, to: Point) -> i32;
}

// A board is a 4-connected uniform-cost graph whose walls are impassable.

impl Pather for Board {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(
            self.neighbors_of(p)
                .filter(|&n| self.get(n).is_some_and(|r| r.passable())),
        );
    }
}

impl WeightedPather for Board {
    #[inline]
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for Board {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Role;

    #[test]
    fn board_neighbors_skip_walls() {
        let mut b = Board::new(3, 3);
        b.set_role(Point::new(1, 0), Role::Wall);
        b.set_role(Point::new(0, 1), Role::Goal);
        let mut buf = Vec::new();
        b.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf, vec![Point::new(2, 1), Point::new(1, 2), Point::new(0, 1)]);
    }

    #[test]
    fn board_cost_and_estimate() {
        let b = Board::new(4, 4);
        assert_eq!(b.cost(Point::new(0, 0), Point::new(1, 0)), 1);
        assert_eq!(b.estimate(Point::new(0, 0), Point::new(3, 2)), 5);
    }
}
