/// Page controller scenarios.
///
/// Drives the lookup and distribution pages through an in-memory
/// `PerformanceApi` so every service behavior (success, 404, outage,
/// partial aggregate failure) is deterministic and offline.
use std::collections::HashMap;
use std::sync::Barrier;
use std::sync::atomic::{AtomicUsize, Ordering};

use salesboard::api::{AgentPerformanceResult, ApiError, Distribution, PerformanceApi};
use salesboard::events::{Event, EventLog};
use salesboard::pages::{DistributionKind, DistributionPage, FetchState, LookupPage};

// ---------------------------------------------------------------------------
// Fake service
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FakeService {
    agents: HashMap<String, AgentPerformanceResult>,
    performance: Option<Distribution>,
    prediction: Option<Distribution>,
    /// When set, both distribution calls must be in flight at once to proceed.
    rendezvous: Option<Barrier>,
    calls: AtomicUsize,
}

impl FakeService {
    fn with_agent(mut self, code: &str, prediction: i64, level: &str, recs: &[&str]) -> Self {
        self.agents.insert(
            code.to_string(),
            AgentPerformanceResult {
                agent_code: code.to_string(),
                prediction,
                performance_level: level.to_string(),
                recommendations: recs.iter().map(|r| r.to_string()).collect(),
            },
        );
        self
    }

    fn wait_for_peer(&self) {
        if let Some(barrier) = &self.rendezvous {
            barrier.wait();
        }
    }
}

impl PerformanceApi for FakeService {
    fn fetch_agent_performance(&self, agent_id: &str) -> Result<AgentPerformanceResult, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.agents.get(agent_id).cloned().ok_or(ApiError::NotFound)
    }

    fn fetch_performance_distribution(&self) -> Result<Distribution, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.wait_for_peer();
        self.performance
            .clone()
            .ok_or_else(|| ApiError::Transport("connection refused".to_string()))
    }

    fn fetch_prediction_distribution(&self) -> Result<Distribution, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.wait_for_peer();
        self.prediction.clone().ok_or(ApiError::Status(500))
    }
}

fn dist(pairs: &[(&str, u64)]) -> Distribution {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

// ---------------------------------------------------------------------------
// Lookup page
// ---------------------------------------------------------------------------

#[test]
fn lookup_known_agent_shows_detail_panel() {
    let api = FakeService::default().with_agent("A1", 1, "High", &["Upsell product X"]);
    let mut page = LookupPage::default();

    page.lookup(&api, "A1");

    let detail = page.detail().expect("detail panel");
    assert_eq!(detail.forecast.label, "Sales Expected");
    assert_eq!(detail.tier.star_count, 3);
    assert_eq!(detail.tier.name, "High");
    assert_eq!(detail.recommendations, vec!["Upsell product X"]);
    assert_eq!(page.error(), None);
}

#[test]
fn lookup_unknown_agent_shows_error_only() {
    let api = FakeService::default();
    let mut page = LookupPage::default();

    page.lookup(&api, "ZZZ");

    assert_eq!(page.error(), Some("Agent not found"));
    assert!(page.detail().is_none());
}

#[test]
fn lookup_error_replaces_previous_result() {
    let api = FakeService::default().with_agent("A1", 0, "Low", &[]);
    let mut page = LookupPage::default();

    page.lookup(&api, "A1");
    assert!(page.detail().is_some());

    page.lookup(&api, "missing");
    assert!(page.detail().is_none());
    assert_eq!(page.error(), Some("Agent not found"));
}

#[test]
fn empty_identifier_is_sent_and_fails_like_any_other() {
    let api = FakeService::default();
    let mut page = LookupPage::default();
    page.lookup(&api, "");
    assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    assert_eq!(page.error(), Some("Agent not found"));
}

#[test]
fn repeated_lookup_is_idempotent() {
    let api = FakeService::default().with_agent("A1", 1, "medium", &["Call twice", "Bundle offer"]);
    let mut page = LookupPage::default();

    page.lookup(&api, "A1");
    let first = page.detail().cloned();
    page.lookup(&api, "A1");
    let second = page.detail().cloned();

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn slow_earlier_lookup_cannot_overwrite_later_one() {
    let api = FakeService::default()
        .with_agent("A1", 1, "High", &[])
        .with_agent("B2", 0, "Low", &[]);
    let mut page = LookupPage::default();

    let first = page.submit("A1");
    let second = page.submit("B2");
    let first_outcome = api.fetch_agent_performance(first.agent_id());
    let second_outcome = api.fetch_agent_performance(second.agent_id());

    // Responses arrive out of order.
    assert!(page.resolve(second, second_outcome));
    assert!(!page.resolve(first, first_outcome));

    assert_eq!(page.detail().map(|d| d.agent_code.as_str()), Some("B2"));
}

#[test]
fn lookups_are_logged_with_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let log = EventLog::at(dir.path().join("events.jsonl"));
    let api = FakeService::default().with_agent("A1", 1, "High", &[]);
    let mut page = LookupPage::new(log.clone());

    page.lookup(&api, "A1");
    page.lookup(&api, "ZZZ");

    let outcomes: Vec<String> = log
        .read_all()
        .into_iter()
        .filter_map(|e| match e.event {
            Event::Lookup { outcome, .. } => Some(outcome),
            _ => None,
        })
        .collect();
    assert_eq!(outcomes, vec!["success", "not_found"]);
}

// ---------------------------------------------------------------------------
// Distribution page
// ---------------------------------------------------------------------------

#[test]
fn distribution_renders_both_charts() {
    let api = FakeService {
        performance: Some(dist(&[("High", 3), ("Medium", 1), ("Low", 2)])),
        prediction: Some(dist(&[("0", 5), ("1", 1)])),
        ..FakeService::default()
    };
    let mut page = DistributionPage::default();

    page.mount(&api);

    let view = page.view();
    assert_eq!(view.pie.categories, vec!["High", "Medium", "Low"]);
    assert_eq!(view.pie.counts, vec![3, 1, 2]);
    assert_eq!(view.bar.counts, [5, 1]);
    assert!(view.degraded.is_empty());
}

#[test]
fn failed_prediction_half_is_zero_filled_without_error() {
    let api = FakeService {
        performance: Some(dist(&[("High", 3), ("Medium", 1), ("Low", 2)])),
        prediction: None,
        ..FakeService::default()
    };
    let mut page = DistributionPage::default();

    let state = page.mount(&api);

    assert!(matches!(state, FetchState::Success(_)));
    assert_eq!(state.failure(), None);
    let view = page.view();
    assert_eq!(view.pie.counts, vec![3, 1, 2]);
    assert_eq!(view.bar.counts, [0, 0]);
    assert_eq!(view.degraded, vec![DistributionKind::Prediction]);
}

#[test]
fn failed_performance_half_leaves_pie_empty() {
    let api = FakeService {
        performance: None,
        prediction: Some(dist(&[("1", 5)])),
        ..FakeService::default()
    };
    let mut page = DistributionPage::default();
    page.mount(&api);

    assert!(page.view().pie.categories.is_empty());
    assert_eq!(page.view().bar.counts, [0, 5]);
}

#[test]
fn both_fetches_are_in_flight_together() {
    // Each fake call blocks until the other one arrives, so a sequential
    // implementation would never return.
    let api = FakeService {
        performance: Some(dist(&[("High", 1)])),
        prediction: Some(dist(&[("1", 1)])),
        rendezvous: Some(Barrier::new(2)),
        ..FakeService::default()
    };
    let mut page = DistributionPage::default();
    page.mount(&api);
    assert_eq!(page.state().name(), "success");
}

#[test]
fn mount_fetches_once() {
    let api = FakeService {
        performance: Some(Distribution::new()),
        prediction: Some(Distribution::new()),
        ..FakeService::default()
    };
    let mut page = DistributionPage::default();
    page.mount(&api);
    page.mount(&api);
    assert_eq!(api.calls.load(Ordering::SeqCst), 2);

    page.unmount();
    page.mount(&api);
    assert_eq!(api.calls.load(Ordering::SeqCst), 4);
}

#[test]
fn degraded_fetch_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    let log = EventLog::at(dir.path().join("events.jsonl"));
    let api = FakeService {
        performance: Some(dist(&[("Low", 1)])),
        prediction: None,
        ..FakeService::default()
    };
    let mut page = DistributionPage::new(log.clone());
    page.mount(&api);

    let events: Vec<Event> = log.read_all().into_iter().map(|e| e.event).collect();
    assert!(events.iter().any(|e| matches!(
        e,
        Event::DistributionFetchFailed { distribution, .. } if distribution == "prediction"
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        Event::DistributionLoaded { degraded, .. } if degraded == &vec!["prediction".to_string()]
    )));
}
