//! Explicit state machine for the pair of amount fields.
//!
//! [`ConversionState`] is an immutable snapshot; every user action and every
//! quote outcome is an [`Event`] fed through [`reduce`], which returns the next
//! snapshot. Nothing here touches the network or a terminal, so the whole
//! `Empty -> FiatDriven/CryptoDriven -> Converted` cycle is testable on its own.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::error::ConversionError;
use super::quote::{ConversionResult, Direction, format_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Both fields blank.
    #[default]
    Empty,
    /// Fiat holds the latest user input; crypto is blank or stale.
    FiatDriven,
    /// Crypto holds the latest user input; fiat is blank or stale.
    CryptoDriven,
    /// Both fields agree as of the last successful quote.
    Converted,
}

/// A quote request that has been issued and not yet answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub direction: Direction,
    pub amount: Decimal,
    /// Text of the driving field when the request was issued.
    pub source_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversionState {
    pub fiat_text: String,
    pub crypto_text: String,
    pub phase: Phase,
    pub pending: Option<QuoteRequest>,
    pub last_error: Option<ConversionError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    FiatEdited(String),
    CryptoEdited(String),
    ConvertRequested,
    QuoteReceived(ConversionResult),
    QuoteFailed(ConversionError),
    /// The outstanding request will never report back.
    QuoteAbandoned,
}

/// Empty and whitespace-only text both count as "no value".
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Parses field text as a plain non-negative decimal: digits with at most one
/// decimal point. Signs, digit separators and exponents are rejected.
pub fn parse_amount(text: &str) -> Result<Decimal, ConversionError> {
    let trimmed = text.trim();
    if trimmed.starts_with('-') {
        return Err(ConversionError::parse(trimmed, "amount must not be negative"));
    }
    let plain = trimmed.chars().any(|c| c.is_ascii_digit())
        && trimmed.chars().all(|c| c.is_ascii_digit() || c == '.')
        && trimmed.matches('.').count() <= 1;
    if !plain {
        return Err(ConversionError::parse(
            trimmed,
            "expected a plain decimal number",
        ));
    }
    Decimal::from_str(trimmed).map_err(|e| ConversionError::parse(trimmed, e.to_string()))
}

impl ConversionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_converting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn has_input(&self) -> bool {
        !is_blank(&self.fiat_text) || !is_blank(&self.crypto_text)
    }

    fn source_text(&self, direction: Direction) -> &str {
        match direction {
            Direction::FiatToCrypto => &self.fiat_text,
            Direction::CryptoToFiat => &self.crypto_text,
        }
    }

    /// Picks the driving field. Fiat is checked first, so it wins a tie.
    fn driving_field(&self) -> Option<(Direction, &str)> {
        if !is_blank(&self.fiat_text) {
            Some((Direction::FiatToCrypto, self.fiat_text.as_str()))
        } else if !is_blank(&self.crypto_text) {
            Some((Direction::CryptoToFiat, self.crypto_text.as_str()))
        } else {
            None
        }
    }

    fn phase_after_edit(&self, edited: Direction) -> Phase {
        let (edited_blank, other_blank, edited_phase, other_phase) = match edited {
            Direction::FiatToCrypto => (
                is_blank(&self.fiat_text),
                is_blank(&self.crypto_text),
                Phase::FiatDriven,
                Phase::CryptoDriven,
            ),
            Direction::CryptoToFiat => (
                is_blank(&self.crypto_text),
                is_blank(&self.fiat_text),
                Phase::CryptoDriven,
                Phase::FiatDriven,
            ),
        };
        match (edited_blank, other_blank) {
            (false, _) => edited_phase,
            (true, false) => other_phase,
            (true, true) => Phase::Empty,
        }
    }
}

pub fn reduce(state: &ConversionState, event: Event) -> ConversionState {
    let mut next = state.clone();
    match event {
        Event::FiatEdited(text) => {
            next.fiat_text = text;
            next.last_error = None;
            next.phase = next.phase_after_edit(Direction::FiatToCrypto);
        }
        Event::CryptoEdited(text) => {
            next.crypto_text = text;
            next.last_error = None;
            next.phase = next.phase_after_edit(Direction::CryptoToFiat);
        }
        Event::ConvertRequested => {
            // Trigger is disabled while a quote is outstanding.
            if state.is_converting() {
                return next;
            }
            next.last_error = None;
            if let Some((direction, text)) = state.driving_field() {
                match parse_amount(text) {
                    Ok(amount) => {
                        next.pending = Some(QuoteRequest {
                            direction,
                            amount,
                            source_text: text.to_string(),
                        });
                    }
                    Err(e) => next.last_error = Some(e),
                }
            }
        }
        Event::QuoteReceived(result) => {
            let Some(request) = next.pending.take() else {
                return next;
            };
            if next.source_text(request.direction) != request.source_text {
                // Source edited while the quote was in flight.
                return next;
            }
            let text = format_amount(result.target_amount(request.direction));
            match request.direction {
                Direction::FiatToCrypto => next.crypto_text = text,
                Direction::CryptoToFiat => next.fiat_text = text,
            }
            next.last_error = None;
            next.phase = Phase::Converted;
        }
        Event::QuoteAbandoned => {
            next.pending = None;
        }
        Event::QuoteFailed(error) => {
            if next.pending.take().is_some() {
                next.last_error = Some(error);
            }
        }
    }
    next
}
