//! Frame module: Timing and pacing around [`Scene::draw`](crate::scene::Scene::draw).

mod ticker;
mod timer;

pub use ticker::{Tick, Ticker};
pub use timer::FrameTimer;
