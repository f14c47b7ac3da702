//! Caption playback drivers
//!
//! Connects a [`Timeline`](crate::timeline::Timeline) to an external playback
//! position and reports what the caption area should show.
//!
//! # Architecture
//!
//! - `clock`: [`TimeSource`] trait plus wall-clock and manually driven sources
//! - `ticker`: Fixed-period tick thread and cancellable stop signals
//! - `driver`: [`PollingDriver`], the poll-and-diff loop (canonical)
//! - `deadline`: [`DeadlineScheduler`], sleep-until-next-event alternative
//! - `sink`: [`Transition`] values and the [`TransitionSink`] seam
//!
//! # Usage
//!
//! ```no_run
//! use std::time::Duration;
//! use subcue::player::{PollingDriver, Ticker, WallClock, CollectingSink};
//! use subcue::timeline::{Caption, Timeline};
//!
//! let timeline = Timeline::build(&[Caption::new(1_000, 4_000, "Hello")]).unwrap();
//! let (ticker, ticks) = Ticker::spawn(Duration::from_millis(100));
//! let mut driver = PollingDriver::new(&timeline, WallClock::starting_at(0)).stop_at_end(true);
//! let mut sink = CollectingSink::new();
//! let summary = driver.run(&ticks, &mut sink).unwrap();
//! ticker.stop();
//! println!("{} transitions", summary.transitions);
//! ```

pub mod clock;
mod deadline;
mod driver;
mod sink;
pub mod ticker;

pub use clock::{ManualClock, TimeSource, WallClock};
pub use deadline::DeadlineScheduler;
pub use driver::{DriverError, ErrorPolicy, PollingDriver, RunSummary, StopReason};
pub use sink::{CollectingSink, Transition, TransitionSink};
pub use ticker::{stop_channel, StopHandle, StopSignal, Tick, Ticker};
