//! Ticker: Background thread that paces a draw loop.
//!
//! The ticker only says *when*; the caller still calls
//! [`Scene::draw`](crate::scene::Scene::draw) on its own thread. Ticks
//! that the receiver is too slow to take are dropped, never queued.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A pacing signal.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Tick number (monotonically increasing, gaps mean dropped ticks).
    pub frame: u64,
    /// Time since the ticker started.
    pub elapsed: Duration,
}

/// Sends a [`Tick`] every `interval` until shut down or dropped.
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
    tick_rx: Receiver<Tick>,
}

impl Ticker {
    /// Spawn the ticker thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(interval: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);

        let (tick_tx, tick_rx) = bounded(2);

        let handle = thread::Builder::new()
            .name("scenebox-ticker".to_string())
            .spawn(move || run_loop(&tick_tx, &flag, interval))?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
            tick_rx,
        })
    }

    /// Spawn a ticker firing `fps` times per second.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn with_fps(fps: u32) -> io::Result<Self> {
        Self::spawn(Duration::from_secs(1) / fps.max(1))
    }

    /// Tick receiver, for `recv` or `select!`.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// Ask the thread to stop.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Stop the thread and wait for it.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ticker")
            .field("running", &!self.shutdown.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

fn run_loop(tick_tx: &Sender<Tick>, shutdown: &AtomicBool, interval: Duration) {
    let start = Instant::now();
    let mut frame = 0u64;
    let mut next_tick = start + interval;

    while !shutdown.load(Ordering::Relaxed) {
        let now = Instant::now();
        if now < next_tick {
            thread::sleep((next_tick - now).min(Duration::from_millis(1)));
            continue;
        }

        // Full buffer: receiver is behind, drop the tick
        let _ = tick_tx.try_send(Tick {
            frame,
            elapsed: now - start,
        });

        frame += 1;
        next_tick += interval;
        if next_tick < now {
            next_tick = now + interval;
        }
    }
}
