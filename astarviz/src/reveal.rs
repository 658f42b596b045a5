//! Cell-by-cell reveal of a found path.
//!
//! Progress is a function of elapsed time, so a late or duplicated tick only
//! catches the reveal up instead of skewing it.

use std::thread;
use std::time::{Duration, Instant};

use astarviz_core::{
    Point,
    app::{Context, Effect, sub},
    messages::Msg,
};
use astarviz_paths::{Board, Role};

#[derive(Debug)]
pub struct Reveal {
    path: Vec<Point>,
    next: usize,
    started: Instant,
    interval: Duration,
    ctx: Context,
}

impl Reveal {
    pub fn new(path: Vec<Point>, started: Instant, interval: Duration) -> Self {
        Self {
            path,
            next: 0,
            started,
            interval,
            ctx: Context::new(),
        }
    }

    /// Number of path cells handled so far.
    pub fn revealed(&self) -> usize {
        self.next
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.path.len()
    }

    /// Stop the ticker. Further ticks still reach the model but find no
    /// reveal to advance.
    pub fn cancel(&self) {
        self.ctx.cancel();
    }

    /// Mark every path cell that is due at `now`. Only `Empty` cells are
    /// painted, so the Start and Goal keep their colour. Returns whether any
    /// cell was handled.
    pub fn advance(&mut self, now: Instant, board: &mut Board) -> bool {
        let elapsed = now.saturating_duration_since(self.started);
        let steps = (elapsed.as_nanos() / self.interval.as_nanos().max(1)) as usize;
        let due = (steps + 1).min(self.path.len());
        if due <= self.next {
            return false;
        }
        for &p in &self.path[self.next..due] {
            if board.get(p) == Some(Role::Empty) {
                board.set_role(p, Role::PathMarker);
            }
        }
        self.next = due;
        if self.is_done() {
            self.ctx.cancel();
        }
        true
    }

    /// A subscription sending [`Msg::Tick`] every interval until this reveal
    /// or the application is cancelled.
    pub fn ticker(&self) -> Effect {
        let ctx = self.ctx.clone();
        let interval = self.interval;
        sub(move |app_ctx, tx| {
            while !ctx.is_done() && !app_ctx.is_done() {
                thread::sleep(interval);
                if ctx.is_done() || tx.send(Msg::tick()).is_err() {
                    break;
                }
            }
            log::trace!("reveal ticker stopped");
        })
    }
}
