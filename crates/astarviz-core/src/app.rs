//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`AppRunner`], [`App`].
//!
//! A model only mutates itself in [`Model::update`] and renders in
//! [`Model::draw`]. Anything asynchronous (timers in particular) goes through
//! an [`Effect`], whose messages are fed back into `update` by the runner.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::grid::{Frame, Grid, compute_frame};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token backed by an [`AtomicBool`].
///
/// Clones share the same flag.
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
pub enum Effect {
    /// A long-running subscription, run on its own thread. The [`Context`]
    /// it receives is cancelled when the application stops.
    Sub(Box<dyn FnOnce(Context, Sender<Msg>) + Send>),
    /// Signal the application loop to stop.
    End,
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sub(_) => f.write_str("Effect::Sub(..)"),
            Self::End => f.write_str("Effect::End"),
        }
    }
}

/// Convenience constructor for an [`Effect::Sub`].
pub fn sub<F>(f: F) -> Effect
where
    F: FnOnce(Context, Sender<Msg>) + Send + 'static,
{
    Effect::Sub(Box::new(f))
}

// ---------------------------------------------------------------------------
// Model trait
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `grid`.
    fn draw(&self, grid: &mut Grid);
}

// ---------------------------------------------------------------------------
// Driver traits
// ---------------------------------------------------------------------------

/// Back-end driver polled by [`App`] (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Poll for input messages, sending them through `tx`. Should return
    /// within a few milliseconds so queued subscription messages get
    /// processed.
    fn poll_msgs(&mut self, ctx: &Context, tx: Sender<Msg>)
    -> Result<(), Box<dyn std::error::Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up / restore the screen.
    fn close(&mut self);
}

/// Back-end that owns the main-thread event loop (e.g. a native window) and
/// drives an [`AppRunner`] itself.
pub trait EventLoopDriver {
    fn run(self, runner: AppRunner) -> Result<(), Box<dyn std::error::Error>>;
}

// ---------------------------------------------------------------------------
// AppRunner
// ---------------------------------------------------------------------------

/// Owns a model and its screen buffers, and executes effects.
///
/// Drivers feed it messages with [`handle_msg`](AppRunner::handle_msg),
/// call [`pump`](AppRunner::pump) regularly to deliver subscription
/// messages, and fetch diffs with [`draw_frame`](AppRunner::draw_frame).
pub struct AppRunner {
    model: Box<dyn Model>,
    ctx: Context,
    tx: Sender<Msg>,
    rx: Receiver<Msg>,
    prev: Grid,
    curr: Grid,
    dirty: bool,
    quit: bool,
}

impl AppRunner {
    pub fn new(model: Box<dyn Model>, width: i32, height: i32) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            model,
            ctx: Context::new(),
            tx,
            rx,
            prev: Grid::new(width, height),
            curr: Grid::new(width, height),
            dirty: true,
            quit: false,
        }
    }

    /// Send [`Msg::Init`] to the model.
    pub fn init(&mut self) {
        self.handle_msg(Msg::Init);
    }

    /// Whether the model asked to stop (or the runner was closed).
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// A sender that injects messages into this runner's queue.
    pub fn sender(&self) -> Sender<Msg> {
        self.tx.clone()
    }

    /// The application-wide cancellation context.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Current screen size in cells.
    pub fn size(&self) -> (i32, i32) {
        (self.curr.width(), self.curr.height())
    }

    /// Resize the screen buffers. The next frame is a full redraw.
    pub fn resize(&mut self, width: i32, height: i32) {
        if (width, height) == self.size() {
            return;
        }
        self.prev.resize(width, height);
        self.curr.resize(width, height);
        self.prev.fill(crate::cell::Cell::default().with_char('\0'));
        self.dirty = true;
    }

    /// Deliver one message to the model and run the resulting effect.
    pub fn handle_msg(&mut self, msg: Msg) {
        if self.quit {
            return;
        }
        match msg {
            Msg::Screen { width, height, .. } => self.resize(width, height),
            Msg::Quit => {
                self.stop();
                return;
            }
            _ => {}
        }
        if let Some(effect) = self.model.update(msg) {
            self.run_effect(effect);
        }
        self.dirty = true;
    }

    /// Deliver every queued message. Returns whether any was processed.
    pub fn pump(&mut self) -> bool {
        let mut any = false;
        while !self.quit {
            let Ok(msg) = self.rx.try_recv() else {
                break;
            };
            self.handle_msg(msg);
            any = true;
        }
        any
    }

    /// Redraw if anything changed, returning the diff against the last
    /// drawn frame.
    pub fn draw_frame(&mut self) -> Option<Frame> {
        if !self.dirty || self.quit {
            return None;
        }
        self.dirty = false;
        self.model.draw(&mut self.curr);
        let frame = compute_frame(&self.prev, &self.curr);
        self.prev.copy_from(&self.curr);
        if frame.cells.is_empty() { None } else { Some(frame) }
    }

    /// Cancel subscriptions and stop.
    pub fn stop(&mut self) {
        self.quit = true;
        self.ctx.cancel();
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::End => {
                log::debug!("model requested end");
                self.stop();
            }
            Effect::Sub(f) => {
                let ctx = self.ctx.clone();
                let tx = self.tx.clone();
                thread::spawn(move || f(ctx, tx));
            }
        }
    }
}

impl Drop for AppRunner {
    fn drop(&mut self) {
        self.ctx.cancel();
    }
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// Runs a model against a polled [`Driver`].
pub struct App<D: Driver> {
    runner: AppRunner,
    driver: D,
}

impl<D: Driver> App<D> {
    pub fn new<M: Model + 'static>(config: AppConfig<M, D>) -> Self {
        Self {
            runner: AppRunner::new(Box::new(config.model), config.width, config.height),
            driver: config.driver,
        }
    }

    /// Run the Model-View-Update loop until the model returns
    /// [`Effect::End`] or the driver fails.
    ///
    /// Each iteration polls the driver, delivers every queued message
    /// (input and subscription ticks alike), then flushes the frame diff.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;
        self.runner.init();

        let result = self.event_loop();
        self.runner.stop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let tx = self.runner.sender();
        loop {
            if let Some(frame) = self.runner.draw_frame() {
                self.driver.flush(frame)?;
            }
            if self.runner.should_quit() {
                return Ok(());
            }
            self.driver.poll_msgs(self.runner.context(), tx.clone())?;
            self.runner.pump();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::geom::Point;
    use crate::messages::Key;
    use std::time::Duration;

    #[derive(Default)]
    struct Counter {
        events: usize,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::KeyDown { key: Key::Char('q'), .. } => Some(Effect::End),
                Msg::KeyDown { .. } | Msg::Tick { .. } => {
                    self.events += 1;
                    None
                }
                _ => None,
            }
        }

        fn draw(&self, grid: &mut Grid) {
            grid.fill(Cell::default());
            grid.set(
                Point::new(0, 0),
                Cell::default().with_char(char::from(b'0' + self.events as u8)),
            );
        }
    }

    #[test]
    fn first_frame_then_only_diffs() {
        let mut r = AppRunner::new(Box::new(Counter::default()), 3, 1);
        r.init();
        let first = r.draw_frame().expect("initial frame");
        assert_eq!(first.cells.len(), 1);
        r.handle_msg(Msg::key(Key::Char('x')));
        let frame = r.draw_frame().expect("changed frame");
        assert_eq!(frame.cells.len(), 1);
        assert_eq!(frame.cells[0].cell.ch, '1');
        assert!(r.draw_frame().is_none());
    }

    #[test]
    fn sender_messages_wait_for_pump() {
        let mut r = AppRunner::new(Box::new(Counter::default()), 1, 1);
        r.draw_frame();
        r.sender().send(Msg::tick()).unwrap();
        assert!(r.draw_frame().is_none());
        assert!(r.pump());
        assert!(!r.pump());
        let frame = r.draw_frame().expect("tick redraw");
        assert_eq!(frame.cells[0].cell.ch, '1');
    }

    #[test]
    fn end_effect_stops_and_cancels() {
        let mut r = AppRunner::new(Box::new(Counter::default()), 1, 1);
        let ctx = r.context().clone();
        r.handle_msg(Msg::key(Key::Char('q')));
        assert!(r.should_quit());
        assert!(ctx.is_done());
        assert!(r.draw_frame().is_none());
    }

    #[test]
    fn screen_message_resizes_buffers() {
        let mut r = AppRunner::new(Box::new(Counter::default()), 2, 2);
        r.draw_frame();
        r.handle_msg(Msg::Screen {
            width: 4,
            height: 3,
            time: std::time::Instant::now(),
        });
        assert_eq!(r.size(), (4, 3));
        let frame = r.draw_frame().expect("full redraw");
        assert_eq!(frame.cells.len(), 12);
    }

    #[test]
    fn subscription_messages_arrive_through_pump() {
        struct Ticker;
        impl Model for Ticker {
            fn update(&mut self, msg: Msg) -> Option<Effect> {
                match msg {
                    Msg::Init => Some(sub(|_ctx, tx| {
                        tx.send(Msg::tick()).ok();
                    })),
                    Msg::Tick { .. } => Some(Effect::End),
                    _ => None,
                }
            }
            fn draw(&self, _grid: &mut Grid) {}
        }

        let mut r = AppRunner::new(Box::new(Ticker), 1, 1);
        r.init();
        for _ in 0..200 {
            r.pump();
            if r.should_quit() {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert!(r.should_quit());
    }
}
