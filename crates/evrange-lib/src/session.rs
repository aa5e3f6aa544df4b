//! Caller-side state for repeated estimates.
//!
//! Each trigger runs `Idle -> Requesting -> {Succeeded, Failed}`. Completions
//! are applied in arrival order (last write wins); callers that overlap
//! requests can compare tickets with [`TripSession::is_current`] to discard
//! stale results themselves.

use tracing::debug;

use crate::error::Result;
use crate::estimate::{estimate, TripEstimate, TripQuery};
use crate::output::{DisplayView, ErrorSummary, TripSummary};
use crate::routing::RouteCalculator;

/// State of the most recent estimate request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EstimateState {
    #[default]
    Idle,
    Requesting,
    Succeeded(TripEstimate),
    Failed(ErrorSummary),
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Holds the current estimate state and the last successful result.
#[derive(Debug, Default)]
pub struct TripSession {
    state: EstimateState,
    last_success: Option<TripEstimate>,
    issued: u64,
}

impl TripSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EstimateState {
        &self.state
    }

    /// Last successful estimate. Failures never modify it.
    pub fn last_success(&self) -> Option<&TripEstimate> {
        self.last_success.as_ref()
    }

    /// Enter `Requesting` and hand out a ticket for the new request.
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        self.state = EstimateState::Requesting;
        RequestTicket(self.issued)
    }

    /// Whether `ticket` belongs to the most recently issued request.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Apply the outcome of a request.
    pub fn complete(&mut self, ticket: RequestTicket, result: Result<TripEstimate>) {
        debug!(
            ticket = ticket.0,
            current = self.is_current(ticket),
            ok = result.is_ok(),
            "completing estimate request"
        );
        self.state = match result {
            Ok(trip) => {
                self.last_success = Some(trip);
                EstimateState::Succeeded(trip)
            }
            Err(err) => EstimateState::Failed(ErrorSummary::from(&err)),
        };
    }

    /// Run a full request cycle against `calculator`, leaving the session in
    /// `Succeeded` or `Failed`, and return the same outcome.
    ///
    /// Invalid queries fail without entering `Requesting` and without
    /// contacting the backend.
    pub fn request<C>(
        &mut self,
        calculator: &C,
        query: &TripQuery,
    ) -> std::result::Result<TripEstimate, ErrorSummary>
    where
        C: RouteCalculator + ?Sized,
    {
        if let Err(err) = query.validate() {
            let summary = ErrorSummary::from(&err);
            self.state = EstimateState::Failed(summary.clone());
            return Err(summary);
        }

        let ticket = self.begin();
        let result = estimate(calculator, query);
        let outcome = result.as_ref().copied().map_err(ErrorSummary::from);
        self.complete(ticket, result);
        outcome
    }

    /// Like [`TripSession::request`], returning the resulting state.
    pub fn run<C>(&mut self, calculator: &C, query: &TripQuery) -> &EstimateState
    where
        C: RouteCalculator + ?Sized,
    {
        let _ = self.request(calculator, query);
        &self.state
    }

    /// What a display surface should render right now.
    pub fn view(&self) -> DisplayView {
        match &self.state {
            EstimateState::Idle => DisplayView::Empty,
            EstimateState::Requesting => DisplayView::Pending {
                previous: self.last_success.as_ref().map(TripSummary::from),
            },
            EstimateState::Succeeded(trip) => DisplayView::Trip(TripSummary::from(trip)),
            EstimateState::Failed(summary) => DisplayView::Error(summary.clone()),
        }
    }
}
