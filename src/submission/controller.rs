use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::model::{InputError, RequestSource, RouteRequest, RouteSummary, TripInput};
use crate::service::ServiceError;

/// The only message shown to the user when a request fails.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Identifies one outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Sequence number of the request, starting at 1.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// The network outcome for a previously issued [`Ticket`].
#[derive(Debug)]
pub struct Resolution {
    pub ticket: Ticket,
    pub outcome: Result<RouteSummary, ServiceError>,
}

/// Where the submission lifecycle currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    /// Nothing submitted yet.
    Idle,
    /// A request is in flight. The last successful summary, if any, stays
    /// visible until the new outcome is known.
    Pending { previous: Option<RouteSummary> },
    /// The latest request produced a summary.
    Succeeded(RouteSummary),
    /// The latest submission failed; the message is safe to display.
    Failed(String),
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// What happened to a submit trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum Submit {
    /// A request must be sent for this ticket.
    Issued(Ticket, RouteRequest),
    /// A request is already in flight; nothing was done.
    Ignored,
    /// The form could not be turned into a request; no request was issued.
    Rejected(InputError),
}

/// Snapshot consumed by the display layer.
///
/// When `loading` is false, at most one of `error` and `result` is set, and
/// exactly one is set once any submission has completed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView<'a> {
    pub loading: bool,
    pub error: Option<&'a str>,
    pub result: Option<&'a RouteSummary>,
    /// When the most recent resolution was applied.
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Drives [`SubmissionState`] from submit triggers and network resolutions.
#[derive(Debug)]
pub struct SubmissionController {
    source: RequestSource,
    state: SubmissionState,
    next_ticket: u64,
    outstanding: BTreeSet<Ticket>,
    resolved_at: Option<DateTime<Utc>>,
}

impl SubmissionController {
    /// Creates an idle controller building request bodies from `source`.
    pub fn new(source: RequestSource) -> Self {
        Self {
            source,
            state: SubmissionState::Idle,
            next_ticket: 1,
            outstanding: BTreeSet::new(),
            resolved_at: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Where request bodies come from.
    pub fn source(&self) -> RequestSource {
        self.source
    }

    /// Number of issued requests still waiting for a resolution.
    pub fn in_flight(&self) -> usize {
        self.outstanding.len()
    }

    /// Handles a submit trigger.
    ///
    /// Ignored while a request is pending. Otherwise the request body is
    /// built from `trip` and the state moves to `Pending` before returning.
    pub fn submit(&mut self, trip: &TripInput) -> Submit {
        if self.state.is_pending() {
            debug!("submit ignored: request already in flight");
            return Submit::Ignored;
        }
        match self.source.build(trip) {
            Ok(request) => self.issue(request),
            Err(err) => {
                info!("submit rejected: {err}");
                self.state = SubmissionState::Failed(err.to_string());
                Submit::Rejected(err)
            }
        }
    }

    /// Issues a ticket without consulting the pending guard.
    fn issue(&mut self, request: RouteRequest) -> Submit {
        let previous = match std::mem::replace(&mut self.state, SubmissionState::Idle) {
            SubmissionState::Succeeded(summary) => Some(summary),
            SubmissionState::Pending { previous } => previous,
            SubmissionState::Idle | SubmissionState::Failed(_) => None,
        };
        self.state = SubmissionState::Pending { previous };

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.outstanding.insert(ticket);
        info!(
            "request {} issued: {:?} -> {:?}, mpg {}, tank {}",
            ticket.id(),
            request.start_coords,
            request.end_coords,
            request.mpg,
            request.tank_size
        );
        Submit::Issued(ticket, request)
    }

    /// Applies a network outcome.
    ///
    /// Returns `false` for tickets that were never issued or are already
    /// resolved. While other requests are still outstanding the state stays
    /// `Pending`; the last resolution applied decides the final state.
    pub fn resolve(&mut self, resolution: Resolution) -> bool {
        let Resolution { ticket, outcome } = resolution;
        if !self.outstanding.remove(&ticket) {
            debug!("resolution for unknown request {} dropped", ticket.id());
            return false;
        }
        self.resolved_at = Some(Utc::now());

        let terminal = match outcome {
            Ok(summary) => {
                info!(
                    "request {} succeeded: {} mi, {} stops",
                    ticket.id(),
                    summary.total_distance_miles,
                    summary.stop_count()
                );
                SubmissionState::Succeeded(summary)
            }
            Err(err) => {
                warn!("request {} failed: {err}", ticket.id());
                SubmissionState::Failed(GENERIC_FAILURE.to_string())
            }
        };

        if self.outstanding.is_empty() {
            self.state = terminal;
        } else if let SubmissionState::Succeeded(summary) = terminal {
            self.state = SubmissionState::Pending {
                previous: Some(summary),
            };
        }
        true
    }

    /// The rendering contract for the current state.
    pub fn view(&self) -> RenderView<'_> {
        let (loading, error, result) = match &self.state {
            SubmissionState::Idle => (false, None, None),
            SubmissionState::Pending { previous } => (true, None, previous.as_ref()),
            SubmissionState::Succeeded(summary) => (false, None, Some(summary)),
            SubmissionState::Failed(message) => (false, Some(message.as_str()), None),
        };
        RenderView {
            loading,
            error,
            result,
            resolved_at: self.resolved_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{FuelStop, TripField};

    fn summary(miles: f64, stops: usize) -> RouteSummary {
        RouteSummary {
            total_distance_miles: miles,
            total_gallons_used: 109.9,
            total_fuel_cost: 450.5,
            fuel_stops: (0..stops).map(|i| FuelStop(json!({ "n": i }))).collect(),
        }
    }

    fn server_error() -> ServiceError {
        ServiceError::Status {
            status: 500,
            body: "Traceback: KeyError 'features' at /srv/route_api/views.py".into(),
        }
    }

    fn decode_error() -> ServiceError {
        let err = serde_json::from_value::<RouteSummary>(json!({
            "total_gallons_used": 1.0,
            "total_fuel_cost": 1.0,
            "fuel_stops": []
        }))
        .unwrap_err();
        ServiceError::Decode(err)
    }

    /// A transport failure from posting to a port nothing listens on.
    async fn network_error() -> ServiceError {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = reqwest::Client::new()
            .post(format!("http://{addr}/"))
            .send()
            .await
            .unwrap_err();
        ServiceError::Network(err)
    }

    fn valid_trip() -> TripInput {
        let mut trip = TripInput::default();
        trip.set_field(TripField::Start, "77.5946, 12.9716");
        trip.set_field(TripField::End, "72.8777, 19.076");
        trip
    }

    fn issued(submit: Submit) -> Ticket {
        match submit {
            Submit::Issued(ticket, _) => ticket,
            other => panic!("expected Issued, got {other:?}"),
        }
    }

    fn resolution(ticket: Ticket, outcome: Result<RouteSummary, ServiceError>) -> Resolution {
        Resolution { ticket, outcome }
    }

    mod initial {
        use super::*;

        #[test]
        fn starts_idle_with_empty_view() {
            let controller = SubmissionController::new(RequestSource::Form);
            assert_eq!(controller.state(), &SubmissionState::Idle);
            let view = controller.view();
            assert!(!view.loading);
            assert_eq!(view.error, None);
            assert_eq!(view.result, None);
            assert_eq!(view.resolved_at, None);
        }
    }

    mod submit {
        use super::*;

        #[test]
        fn idle_moves_to_pending_synchronously() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            let ticket = issued(controller.submit(&valid_trip()));
            assert_eq!(ticket.id(), 1);
            assert_eq!(controller.state(), &SubmissionState::Pending { previous: None });
            assert!(controller.view().loading);
            assert_eq!(controller.in_flight(), 1);
        }

        #[test]
        fn issued_request_uses_live_form() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            let mut trip = valid_trip();
            trip.set_field(TripField::Mpg, "22");
            match controller.submit(&trip) {
                Submit::Issued(_, request) => {
                    assert_eq!(request.start_coords, [77.5946, 12.9716]);
                    assert_eq!(request.mpg, 22.0);
                    assert_eq!(request.tank_size, 50.0);
                }
                other => panic!("expected Issued, got {other:?}"),
            }
        }

        #[test]
        fn fixed_source_sends_legacy_body() {
            let mut controller = SubmissionController::new(RequestSource::Fixed);
            match controller.submit(&TripInput::default()) {
                Submit::Issued(_, request) => assert_eq!(request, RouteRequest::fixed()),
                other => panic!("expected Issued, got {other:?}"),
            }
        }

        #[test]
        fn pending_ignores_second_trigger() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            issued(controller.submit(&valid_trip()));
            assert_eq!(controller.submit(&valid_trip()), Submit::Ignored);
            assert_eq!(controller.in_flight(), 1);
        }

        #[test]
        fn failed_moves_to_pending_and_clears_error() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            let ticket = issued(controller.submit(&valid_trip()));
            controller.resolve(resolution(ticket, Err(server_error())));
            assert!(controller.view().error.is_some());

            issued(controller.submit(&valid_trip()));
            let view = controller.view();
            assert!(view.loading);
            assert_eq!(view.error, None);
            assert_eq!(view.result, None);
        }

        #[test]
        fn succeeded_keeps_previous_result_visible_while_pending() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            let ticket = issued(controller.submit(&valid_trip()));
            controller.resolve(resolution(ticket, Ok(summary(100.0, 1))));

            issued(controller.submit(&valid_trip()));
            let view = controller.view();
            assert!(view.loading);
            assert_eq!(view.error, None);
            assert_eq!(view.result, Some(&summary(100.0, 1)));
        }

        #[test]
        fn tickets_increase() {
            let mut controller = SubmissionController::new(RequestSource::Fixed);
            let first = issued(controller.submit(&TripInput::default()));
            controller.resolve(resolution(first, Ok(summary(1.0, 0))));
            let second = issued(controller.submit(&TripInput::default()));
            assert!(second > first);
        }

        #[test]
        fn invalid_input_fails_without_issuing() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            match controller.submit(&TripInput::default()) {
                Submit::Rejected(err) => assert_eq!(err.field(), TripField::Start),
                other => panic!("expected Rejected, got {other:?}"),
            }
            assert_eq!(controller.in_flight(), 0);
            let view = controller.view();
            assert!(!view.loading);
            assert!(view.error.unwrap().contains("Starting Location"));
            assert_eq!(view.result, None);
        }

        #[test]
        fn invalid_input_replaces_previous_result() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            let ticket = issued(controller.submit(&valid_trip()));
            controller.resolve(resolution(ticket, Ok(summary(5.0, 0))));

            let mut trip = valid_trip();
            trip.set_field(TripField::Mpg, "0");
            assert!(matches!(controller.submit(&trip), Submit::Rejected(_)));
            assert_eq!(controller.view().result, None);
            assert!(controller.view().error.is_some());
        }
    }

    mod resolve {
        use super::*;

        #[test]
        fn success_reports_summary() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            let ticket = issued(controller.submit(&valid_trip()));
            assert!(controller.resolve(resolution(ticket, Ok(summary(1649.2, 3)))));

            assert!(matches!(controller.state(), SubmissionState::Succeeded(_)));
            let view = controller.view();
            assert!(!view.loading);
            assert_eq!(view.error, None);
            assert_eq!(view.result.unwrap().stop_count(), 3);
            assert!(view.resolved_at.is_some());
        }

        #[test]
        fn server_error_reports_generic_message() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            let ticket = issued(controller.submit(&valid_trip()));
            controller.resolve(resolution(ticket, Err(server_error())));

            assert_eq!(
                controller.state(),
                &SubmissionState::Failed(GENERIC_FAILURE.to_string())
            );
            let view = controller.view();
            assert!(!view.loading);
            assert_eq!(view.result, None);
            let message = view.error.unwrap();
            assert!(!message.is_empty());
            assert!(!message.contains("500"));
            assert!(!message.contains("Traceback"));
        }

        #[test]
        fn decode_error_reports_same_generic_message() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            let ticket = issued(controller.submit(&valid_trip()));
            controller.resolve(resolution(ticket, Err(decode_error())));
            assert_eq!(controller.view().error, Some(GENERIC_FAILURE));
            assert_eq!(controller.view().result, None);
        }

        #[tokio::test]
        async fn connection_refused_reports_generic_message() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            let ticket = issued(controller.submit(&valid_trip()));
            controller.resolve(resolution(ticket, Err(network_error().await)));

            assert_eq!(
                controller.state(),
                &SubmissionState::Failed(GENERIC_FAILURE.to_string())
            );
            let view = controller.view();
            assert!(!view.loading);
            assert_eq!(view.error, Some(GENERIC_FAILURE));
            assert_eq!(view.result, None);
        }

        #[test]
        fn failure_after_success_hides_old_result() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            let first = issued(controller.submit(&valid_trip()));
            controller.resolve(resolution(first, Ok(summary(10.0, 0))));
            let second = issued(controller.submit(&valid_trip()));
            controller.resolve(resolution(second, Err(server_error())));

            let view = controller.view();
            assert_eq!(view.error, Some(GENERIC_FAILURE));
            assert_eq!(view.result, None);
        }

        #[test]
        fn success_replaces_previous_result_wholesale() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            let first = issued(controller.submit(&valid_trip()));
            controller.resolve(resolution(first, Ok(summary(10.0, 4))));
            let second = issued(controller.submit(&valid_trip()));
            controller.resolve(resolution(second, Ok(summary(20.0, 1))));
            assert_eq!(controller.view().result, Some(&summary(20.0, 1)));
        }

        #[test]
        fn unknown_ticket_is_dropped() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            assert!(!controller.resolve(resolution(Ticket(42), Ok(summary(1.0, 0)))));
            assert_eq!(controller.state(), &SubmissionState::Idle);
        }

        #[test]
        fn duplicate_resolution_is_dropped() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            let ticket = issued(controller.submit(&valid_trip()));
            assert!(controller.resolve(resolution(ticket, Ok(summary(1.0, 0)))));
            assert!(!controller.resolve(resolution(ticket, Err(server_error()))));
            assert!(matches!(controller.state(), SubmissionState::Succeeded(_)));
        }

        #[test]
        fn resubmit_after_failure_can_succeed() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            let first = issued(controller.submit(&valid_trip()));
            controller.resolve(resolution(first, Err(server_error())));
            let second = issued(controller.submit(&valid_trip()));
            controller.resolve(resolution(second, Ok(summary(3.0, 2))));
            let view = controller.view();
            assert_eq!(view.error, None);
            assert_eq!(view.result.unwrap().stop_count(), 2);
        }
    }

    mod properties {
        use super::*;

        #[test]
        fn double_submit_matches_single_submit() {
            let mut once = SubmissionController::new(RequestSource::Form);
            let ticket = issued(once.submit(&valid_trip()));
            once.resolve(resolution(ticket, Ok(summary(1649.2, 3))));

            let mut twice = SubmissionController::new(RequestSource::Form);
            let ticket = issued(twice.submit(&valid_trip()));
            assert_eq!(twice.submit(&valid_trip()), Submit::Ignored);
            twice.resolve(resolution(ticket, Ok(summary(1649.2, 3))));

            assert_eq!(once.state(), twice.state());
        }

        #[test]
        fn later_resolution_wins_when_requests_race() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            let first = issued(controller.submit(&valid_trip()));
            let second = issued(controller.issue(RouteRequest::fixed()));
            assert_eq!(controller.in_flight(), 2);

            // The newer request resolves first, the older one last.
            controller.resolve(resolution(second, Ok(summary(200.0, 2))));
            assert!(controller.view().loading);
            controller.resolve(resolution(first, Ok(summary(100.0, 1))));

            assert_eq!(
                controller.state(),
                &SubmissionState::Succeeded(summary(100.0, 1))
            );
        }

        #[test]
        fn later_failure_wins_over_earlier_success() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            let first = issued(controller.submit(&valid_trip()));
            let second = issued(controller.issue(RouteRequest::fixed()));

            controller.resolve(resolution(first, Ok(summary(100.0, 1))));
            assert_eq!(controller.view().result, Some(&summary(100.0, 1)));
            assert!(controller.view().loading);
            controller.resolve(resolution(second, Err(server_error())));

            let view = controller.view();
            assert!(!view.loading);
            assert_eq!(view.error, Some(GENERIC_FAILURE));
            assert_eq!(view.result, None);
        }

        #[tokio::test]
        async fn view_never_reports_both_error_and_result() {
            let mut controller = SubmissionController::new(RequestSource::Form);
            let outcomes: Vec<Result<RouteSummary, ServiceError>> = vec![
                Ok(summary(1.0, 0)),
                Err(server_error()),
                Err(decode_error()),
                Err(network_error().await),
                Ok(summary(2.0, 1)),
            ];
            for outcome in outcomes {
                let ticket = issued(controller.submit(&valid_trip()));
                let pending = controller.view();
                assert!(pending.loading && pending.error.is_none());
                controller.resolve(resolution(ticket, outcome));
                let view = controller.view();
                assert!(!view.loading);
                assert!(view.error.is_some() ^ view.result.is_some());
            }
        }
    }
}
