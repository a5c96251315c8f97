//! Screen lifecycle.

use std::fmt::{self, Display};

use crate::Error;

/// Where the screen is in its lifecycle.
///
/// ```text
/// Uninitialized <-> Initializing -> MapReady -> AwaitingReport <-> ReportRendered
///                                                     |
///                                                     +-> MapReady (first request failed)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    /// The map SDK is still creating the view.
    Initializing,
    MapReady,
    AwaitingReport,
    ReportRendered,
}

impl Phase {
    /// Whether the screen may move from `self` to `to`.
    #[must_use]
    pub const fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Uninitialized, Self::Initializing)
                | (Self::Initializing, Self::Uninitialized | Self::MapReady)
                | (Self::MapReady | Self::ReportRendered, Self::AwaitingReport)
                | (Self::AwaitingReport, Self::MapReady | Self::ReportRendered)
        )
    }

    /// Move to `to`, rejecting edges the lifecycle does not allow.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] for a disallowed edge.
    pub fn transition(&mut self, to: Self) -> Result<(), Error> {
        if !self.can_transition(to) {
            return Err(Error::InvalidTransition(format!("{self} -> {to}")));
        }
        *self = to;
        Ok(())
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::MapReady => "map_ready",
            Self::AwaitingReport => "awaiting_report",
            Self::ReportRendered => "report_rendered",
        };
        f.write_str(name)
    }
}
