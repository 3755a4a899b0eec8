//! `hr-export` — hot routes in a form track writers can consume.
//!
//! Writing files stays with the application; this crate produces the
//! in-memory [`Track`]s such a writer serializes:
//!
//! | Type            | Role                                                      |
//! |-----------------|-----------------------------------------------------------|
//! | [`TrackBuilder`]  | `HotRoute` → `Track`, deduplicating geometry points     |
//! | [`SignalIndex`]   | R-tree of traffic-signal positions for point markers    |
//! | [`TrackObserver`] | `ScanObserver` that builds tracks while the scan runs   |
//!
//! # Usage
//!
//! ```rust,ignore
//! use hr_export::{SignalIndex, TrackBuilder, TrackObserver};
//! use hr_scan::{FlowScan, ScanConfig};
//!
//! let builder = TrackBuilder::with_signals(SignalIndex::new(signal_positions));
//! let mut obs = TrackObserver::new(builder);
//! FlowScan::new(ScanConfig::new(2, 3)).scan(&graph, &mut obs)?;
//! obs.take_error().map(|e| eprintln!("export error: {e}"));
//! let tracks = obs.into_tracks();
//! ```

pub mod error;
pub mod observer;
pub mod signal;
pub mod track;

#[cfg(test)]
mod tests;

pub use error::{ExportError, ExportResult};
pub use observer::TrackObserver;
pub use signal::{SignalIndex, DEFAULT_TOLERANCE_DEG};
pub use track::{Track, TrackBuilder, TrackPoint, TrackSegment};
