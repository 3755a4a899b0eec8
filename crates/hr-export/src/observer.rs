//! `TrackObserver`: bridges `ScanObserver` to a `TrackBuilder`.

use log::warn;

use hr_graph::RoadGraph;
use hr_scan::{HotRoute, ScanObserver, ScanSummary};

use crate::{ExportError, Track, TrackBuilder};

/// A [`ScanObserver`] that converts every route into a [`Track`] as soon as
/// the clusterer emits it.
///
/// Errors are stored internally because `ScanObserver` methods have no
/// return value.  After the scan returns, check with
/// [`take_error`][Self::take_error].
pub struct TrackObserver {
    builder:    TrackBuilder,
    tracks:     Vec<Track>,
    summary:    Option<ScanSummary>,
    last_error: Option<ExportError>,
}

impl TrackObserver {
    pub fn new(builder: TrackBuilder) -> Self {
        Self {
            builder,
            tracks:     Vec::new(),
            summary:    None,
            last_error: None,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }

    /// Summary of the finished scan, `None` until it ends.
    pub fn summary(&self) -> Option<&ScanSummary> {
        self.summary.as_ref()
    }

    /// Take the stored conversion error (if any) after the scan returns.
    pub fn take_error(&mut self) -> Option<ExportError> {
        self.last_error.take()
    }
}

impl ScanObserver for TrackObserver {
    fn on_route(&mut self, route: &HotRoute, graph: &RoadGraph) {
        match self.builder.build(route, graph) {
            Ok(track) => self.tracks.push(track),
            Err(e) => {
                warn!("[Export] {} skipped: {e}", route.id());
                // Keep only the first error.
                if self.last_error.is_none() {
                    self.last_error = Some(e);
                }
            }
        }
    }

    fn on_scan_end(&mut self, summary: &ScanSummary) {
        self.summary = Some(*summary);
    }
}
