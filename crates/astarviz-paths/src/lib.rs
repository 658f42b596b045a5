//! Board model and A* search for the astarviz grid visualizer.
//!
//! - [`Board`] is a fixed-size rectangle of cells, each holding one
//!   [`Role`]; it tracks the unique Start and Goal positions.
//! - [`find_path`] runs A* from Start to Goal over the 4-connected,
//!   uniform-cost board and returns the cells of a shortest path.
//! - [`Searcher`] owns the search caches so that repeated searches incur no
//!   allocations after warm-up, and never see state from earlier searches.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`WeightedPather`] : [`Pather`] | step cost |
//! | [`AstarPather`] : [`WeightedPather`] | admissible estimate |
//!
//! [`Board`] implements all three (walls impassable, cost 1, Manhattan
//! estimate), and [`Searcher::astar_path`] accepts any [`AstarPather`].

mod astar;
mod board;
mod distance;
mod searcher;
mod traits;

pub use astar::find_path;
pub use board::{Board, Role};
pub use distance::manhattan;
pub use searcher::Searcher;
pub use traits::{AstarPather, Pather, WeightedPather};
