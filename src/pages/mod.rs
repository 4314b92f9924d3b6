//! Page controllers.
//!
//! Each page owns a [`FetchState`] and drives it through
//! `Idle → Loading → Success | Failure`. Controllers are the only place
//! service failures are caught: renderers receive a settled state and never
//! see an [`ApiError`](crate::api::ApiError).
//!
//! Results are committed through tickets that carry a generation number.
//! Starting a new fetch, or unmounting, bumps the generation so a response
//! belonging to an older request is dropped instead of overwriting newer
//! state.

pub mod distribution;
pub mod lookup;

pub use distribution::{DistributionKind, DistributionPage, DistributionView};
pub use lookup::{AgentLookup, LOOKUP_ERROR_MESSAGE, LookupPage, LookupTicket};

/// Fetch lifecycle of a page, with an owned payload per state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Success(T),
    Failure(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> FetchState<T> {
    /// Lowercase state name, as exposed in JSON snapshots.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Failure(_) => "failure",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message),
            _ => None,
        }
    }
}
