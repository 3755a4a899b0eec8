//! Clustering parameters.

use std::fmt;

use crate::{ScanError, ScanResult};

/// Parameters of one FlowScan run.
///
/// Typically filled in by the application from its own configuration source
/// and handed to [`FlowScan::new`](crate::FlowScan::new).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanConfig {
    /// Size of the eps-neighborhood in directed hops.  Must be ≥ 1.
    pub eps: u32,

    /// Minimum number of shared trajectories for two connections to be
    /// directly density-reachable, and minimum number of such neighbors for
    /// a connection to be core.  Must be ≥ 1.
    pub min_traffic: u32,
}

impl ScanConfig {
    pub fn new(eps: u32, min_traffic: u32) -> Self {
        Self { eps, min_traffic }
    }

    /// Reject parameters the clustering cannot run with.
    pub fn validate(&self) -> ScanResult<()> {
        if self.eps < 1 {
            return Err(ScanError::Config(format!("eps must be >= 1, got {}", self.eps)));
        }
        if self.min_traffic < 1 {
            return Err(ScanError::Config(format!(
                "min_traffic must be >= 1, got {}",
                self.min_traffic
            )));
        }
        Ok(())
    }
}

impl fmt::Display for ScanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "eps={} min_traffic={}", self.eps, self.min_traffic)
    }
}
