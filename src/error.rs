//! Distance-transform error enum.
use std::collections::TryReserveError;

/// Error raised by the distance-transform engine.
#[derive(Clone, Debug)]
pub enum EdtError {
    /// The input could not be decoded, or is not a single-channel buffer
    /// matching its declared dimensions.
    InputUnreadable(&'static str),
    /// Allocating the diagram or output buffer failed.
    AllocationFailure(TryReserveError),
    /// No suitable compute device/backend was found; the engine fell back to
    /// the host worklist schedule.
    ///
    /// This variant is recovered locally by [`crate::transform::transform`]
    /// and is only ever observed through logging, never returned to a
    /// caller.
    BackendUnavailable(&'static str),
    /// A backend relaxation pass reported a runtime error.
    BackendFailure(String),
    /// Propagation exceeded its safety bound without converging. This
    /// indicates an implementation bug, not bad user input.
    NonConvergence,
    /// A general error occurred.
    General(&'static str),
}

impl std::fmt::Display for EdtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputUnreadable(e) => write!(f, "input unreadable: {e}"),
            Self::AllocationFailure(e) => write!(f, "allocation failure: {e}"),
            Self::BackendUnavailable(e) => write!(f, "backend unavailable: {e}"),
            Self::BackendFailure(e) => write!(f, "backend failure: {e}"),
            Self::NonConvergence => {
                write!(f, "propagation did not converge within its safety bound")
            }
            Self::General(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EdtError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AllocationFailure(e) => e.source(),
            Self::InputUnreadable(_)
            | Self::BackendUnavailable(_)
            | Self::BackendFailure(_)
            | Self::NonConvergence
            | Self::General(_) => None,
        }
    }
}

impl std::convert::From<TryReserveError> for EdtError {
    fn from(error: TryReserveError) -> Self {
        Self::AllocationFailure(error)
    }
}

impl std::convert::From<&'static str> for EdtError {
    fn from(error: &'static str) -> Self {
        Self::General(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_strings() {
        assert_eq!(
            EdtError::InputUnreadable("bad").to_string(),
            "input unreadable: bad"
        );
        assert_eq!(EdtError::BackendFailure("oops".into()).to_string(), "backend failure: oops");
        assert_eq!(
            EdtError::NonConvergence.to_string(),
            "propagation did not converge within its safety bound"
        );
        assert_eq!(EdtError::General("x").to_string(), "x");
    }
}
