//! Two-line equivalence summary derived from the current fields.

use serde::{Deserialize, Serialize};

use super::state::{ConversionState, is_blank};

/// Display labels for the two units.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Units {
    pub fiat: String,
    pub crypto: String,
}

impl Default for Units {
    fn default() -> Self {
        Units {
            fiat: "GMD".to_string(),
            crypto: "satoshi".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub fiat_to_crypto: String,
    pub crypto_to_fiat: String,
}

impl Summary {
    pub fn lines(&self) -> [&str; 2] {
        [self.fiat_to_crypto.as_str(), self.crypto_to_fiat.as_str()]
    }
}

fn display_value(text: &str) -> &str {
    if is_blank(text) { "?" } else { text.trim() }
}

/// Projects the current field values; no quote is requested.
pub fn render_summary(state: &ConversionState, units: &Units) -> Option<Summary> {
    if !state.has_input() {
        return None;
    }
    let fiat = display_value(&state.fiat_text);
    let crypto = display_value(&state.crypto_text);
    Some(Summary {
        fiat_to_crypto: format!("{fiat} {} = {crypto} {}", units.fiat, units.crypto),
        crypto_to_fiat: format!("{crypto} {} = {fiat} {}", units.crypto, units.fiat),
    })
}
