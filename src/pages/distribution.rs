//! Distribution page: the performance-tier pie and the forecast bar chart.
//!
//! Both distributions are requested concurrently when the page mounts. The
//! page settles once both calls have returned. A failed call is not an
//! error for this page: its chart renders empty (pie) or zeroed (bar), the
//! failure goes to the event log and stderr, and the snapshot lists the
//! degraded half.

use std::fmt;
use std::thread;
use std::time::Instant;

use serde::Serialize;

use super::FetchState;
use crate::api::{ApiError, Distribution, PerformanceApi};
use crate::events::{self, Event, EventLog};
use crate::view_model::{
    BarModel, PieModel, build_performance_pie_model, build_prediction_bar_model,
};

/// Which of the two distribution endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionKind {
    Performance,
    Prediction,
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Performance => write!(f, "performance"),
            Self::Prediction => write!(f, "prediction"),
        }
    }
}

/// Both charts, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionView {
    pub pie: PieModel,
    pub bar: BarModel,
    /// Halves that failed to load and are shown zero-filled.
    pub degraded: Vec<DistributionKind>,
}

impl Default for DistributionView {
    fn default() -> Self {
        Self {
            pie: PieModel::empty(),
            bar: BarModel::zeroed(),
            degraded: Vec::new(),
        }
    }
}

/// Handle for one mount.
#[derive(Debug)]
pub struct MountTicket {
    generation: u64,
    started: Instant,
}

/// JSON view of the page for the web dashboard.
#[derive(Debug, Serialize)]
pub struct DistributionSnapshot<'a> {
    pub state: &'static str,
    pub pie: &'a PieModel,
    pub bar: &'a BarModel,
    pub degraded: &'a [DistributionKind],
}

#[derive(Debug, Default)]
pub struct DistributionPage {
    state: FetchState<DistributionView>,
    generation: u64,
    /// Zero-filled charts rendered while not yet settled.
    placeholder: DistributionView,
    log: EventLog,
}

impl DistributionPage {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &FetchState<DistributionView> {
        &self.state
    }

    /// The charts to draw: the settled view, or empty charts before that.
    pub fn view(&self) -> &DistributionView {
        self.state.success().unwrap_or(&self.placeholder)
    }

    pub fn snapshot(&self) -> DistributionSnapshot<'_> {
        let view = self.view();
        DistributionSnapshot {
            state: self.state.name(),
            pie: &view.pie,
            bar: &view.bar,
            degraded: &view.degraded,
        }
    }

    /// Enter `Loading` if the page has not been mounted yet.
    ///
    /// Returns `None` when a mount is already loading or settled.
    pub fn begin_mount(&mut self) -> Option<MountTicket> {
        if !matches!(self.state, FetchState::Idle) {
            return None;
        }
        self.generation += 1;
        self.state = FetchState::Loading;
        Some(MountTicket {
            generation: self.generation,
            started: Instant::now(),
        })
    }

    /// Build both charts once both calls have settled.
    ///
    /// Returns `false` when the ticket belongs to an unmounted page.
    pub fn settle(
        &mut self,
        ticket: MountTicket,
        performance: Result<Distribution, ApiError>,
        prediction: Result<Distribution, ApiError>,
    ) -> bool {
        if ticket.generation != self.generation {
            return false;
        }

        let mut view = DistributionView::default();

        match performance {
            Ok(dist) => view.pie = build_performance_pie_model(&dist),
            Err(err) => self.degrade(&mut view, DistributionKind::Performance, &err),
        }
        match prediction {
            Ok(dist) => view.bar = build_prediction_bar_model(&dist),
            Err(err) => self.degrade(&mut view, DistributionKind::Prediction, &err),
        }

        self.log.record(Event::DistributionLoaded {
            degraded: view.degraded.iter().map(ToString::to_string).collect(),
            latency_ms: ticket.started.elapsed().as_millis() as u64,
        });

        self.state = FetchState::Success(view);
        true
    }

    fn degrade(&self, view: &mut DistributionView, kind: DistributionKind, err: &ApiError) {
        events::warn(&format!("failed to fetch {kind} distribution: {err}"));
        self.log.record(Event::DistributionFetchFailed {
            distribution: kind.to_string(),
            error: err.to_string(),
        });
        view.degraded.push(kind);
    }

    /// Mount the page: fetch both distributions concurrently and settle.
    ///
    /// A second call on a mounted page is a no-op.
    pub fn mount<A: PerformanceApi + Sync>(&mut self, api: &A) -> &FetchState<DistributionView> {
        if let Some(ticket) = self.begin_mount() {
            let (performance, prediction) = fetch_both(api);
            self.settle(ticket, performance, prediction);
        }
        &self.state
    }

    /// Leave the page; a later `mount` fetches again.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.state = FetchState::Idle;
    }
}

type FetchResult = Result<Distribution, ApiError>;

/// Issue both distribution requests before waiting on either.
fn fetch_both<A: PerformanceApi + Sync>(api: &A) -> (FetchResult, FetchResult) {
    thread::scope(|scope| {
        let performance = scope.spawn(|| api.fetch_performance_distribution());
        let prediction = scope.spawn(|| api.fetch_prediction_distribution());
        (
            performance.join().unwrap_or_else(|_| Err(worker_panicked())),
            prediction.join().unwrap_or_else(|_| Err(worker_panicked())),
        )
    })
}

fn worker_panicked() -> ApiError {
    ApiError::Transport("fetch worker panicked".to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
