//! Drives the conversion state machine and the quote requests it issues.

use std::sync::{Arc, Weak};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::error::ConversionError;
use super::quote::ConversionResult;
use super::service::ConversionService;
use super::state::{ConversionState, Event, reduce};
use super::summary::{Summary, Units, render_summary};

pub type QuoteOutcome = Result<ConversionResult, ConversionError>;

/// A quote request running in the background.
///
/// Dropping the task before passing its outcome to
/// [`ConversionController::complete_conversion`] abandons the request: the
/// controller notices on the next trigger and accepts a new conversion.
pub struct QuoteTask {
    handle: JoinHandle<QuoteOutcome>,
    _live: Arc<()>,
}

impl QuoteTask {
    /// Waits for the quote. Dropping the returned future leaves the request
    /// running, so this can sit in a `select!` loop; do not call it again once
    /// it has produced an outcome.
    pub async fn wait(&mut self) -> QuoteOutcome {
        match (&mut self.handle).await {
            Ok(outcome) => outcome,
            Err(e) => Err(ConversionError::RemoteUnavailable(format!(
                "quote task failed: {e}"
            ))),
        }
    }
}

pub struct ConversionController {
    service: ConversionService,
    units: Units,
    state: ConversionState,
    outstanding: Weak<()>,
}

impl ConversionController {
    pub fn new(service: ConversionService, units: Units) -> Self {
        ConversionController {
            service,
            units,
            state: ConversionState::new(),
            outstanding: Weak::new(),
        }
    }

    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    pub fn units(&self) -> &Units {
        &self.units
    }

    fn dispatch(&mut self, event: Event) {
        self.state = reduce(&self.state, event);
    }

    pub fn edit_fiat(&mut self, text: impl Into<String>) {
        self.dispatch(Event::FiatEdited(text.into()));
    }

    pub fn edit_crypto(&mut self, text: impl Into<String>) {
        self.dispatch(Event::CryptoEdited(text.into()));
    }

    /// Issues a quote request for the driving field and returns the running task.
    ///
    /// Returns `None` when nothing was started: both fields blank, the driving
    /// field failed to parse, or a request is already outstanding.
    pub fn begin_conversion(&mut self) -> Option<QuoteTask> {
        if self.state.is_converting() {
            if self.outstanding.strong_count() > 0 {
                debug!("Conversion already in progress, ignoring request");
                return None;
            }
            debug!("Previous quote task was dropped, releasing trigger");
            self.dispatch(Event::QuoteAbandoned);
        }
        self.dispatch(Event::ConvertRequested);

        if let Some(error) = &self.state.last_error {
            warn!(error = %error, "Conversion not started");
            return None;
        }
        let request = self.state.pending.clone()?;
        debug!(direction = %request.direction, amount = %request.amount, "Starting conversion");

        let service = self.service.clone();
        let handle =
            tokio::spawn(async move { service.convert(request.direction, request.amount).await });
        let live = Arc::new(());
        self.outstanding = Arc::downgrade(&live);
        Some(QuoteTask {
            handle,
            _live: live,
        })
    }

    /// Feeds a finished quote back into the state.
    pub fn complete_conversion(&mut self, outcome: QuoteOutcome) {
        match outcome {
            Ok(result) => self.dispatch(Event::QuoteReceived(result)),
            Err(error) => {
                warn!(error = %error, "Conversion failed");
                self.dispatch(Event::QuoteFailed(error));
            }
        }
    }

    /// Runs one conversion to completion. Failures are recorded in the state,
    /// never returned.
    pub async fn on_convert_requested(&mut self) -> &ConversionState {
        if let Some(mut task) = self.begin_conversion() {
            let outcome = task.wait().await;
            self.complete_conversion(outcome);
        }
        &self.state
    }

    pub fn render_summary(&self) -> Option<Summary> {
        render_summary(&self.state, &self.units)
    }
}
