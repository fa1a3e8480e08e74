use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::error::ConversionError;
use crate::core::quote::{ConversionResult, Direction, QuoteProvider};

const USER_AGENT: &str = concat!("satoshi-dalasi/", env!("CARGO_PKG_VERSION"));

/// Quote provider speaking the two-field JSON contract over HTTP.
pub struct QuoteApiProvider {
    base_url: String,
}

impl QuoteApiProvider {
    pub fn new(base_url: &str) -> Self {
        QuoteApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, direction: Direction, amount: Decimal) -> String {
        format!("{}/{}?amount={}", self.base_url, direction, amount)
    }

    #[instrument(
        name = "QuoteFetch",
        skip(self),
        fields(direction = %direction, amount = %amount)
    )]
    async fn fetch(
        &self,
        direction: Direction,
        amount: Decimal,
    ) -> Result<ConversionResult, ConversionError> {
        let url = self.endpoint(direction, amount);
        debug!("Requesting quote from {}", url);

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ConversionError::RemoteUnavailable(format!("Client error: {e}")))?;

        let response = client.get(&url).send().await.map_err(|e| {
            ConversionError::RemoteUnavailable(format!("Request error: {e} for URL: {url}"))
        })?;

        if !response.status().is_success() {
            return Err(ConversionError::RemoteUnavailable(format!(
                "HTTP error: {} for URL: {}",
                response.status(),
                url
            )));
        }

        let text = response.text().await.map_err(|e| {
            ConversionError::RemoteUnavailable(format!("Failed to read response body: {e}"))
        })?;
        debug!(response = %text, "Received quote response");

        let data: QuoteResponse = serde_json::from_str(&text).map_err(|e| {
            ConversionError::InvalidQuote(format!("Failed to parse JSON response: {e}"))
        })?;
        data.into_result()
    }
}

/// Amounts are decoded from the JSON number text, so no digits are lost to `f64`.
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(
        rename = "fiatAmount",
        alias = "fiat_amount",
        alias = "dalasi",
        with = "rust_decimal::serde::arbitrary_precision"
    )]
    fiat_amount: Decimal,
    #[serde(
        rename = "cryptoAmount",
        alias = "crypto_amount",
        alias = "satoshi",
        with = "rust_decimal::serde::arbitrary_precision"
    )]
    crypto_amount: Decimal,
}

fn non_negative(field: &str, amount: Decimal) -> Result<Decimal, ConversionError> {
    if amount < Decimal::ZERO {
        return Err(ConversionError::InvalidQuote(format!(
            "{field} is negative: {amount}"
        )));
    }
    Ok(amount)
}

impl QuoteResponse {
    fn into_result(self) -> Result<ConversionResult, ConversionError> {
        Ok(ConversionResult::new(
            non_negative("fiatAmount", self.fiat_amount)?,
            non_negative("cryptoAmount", self.crypto_amount)?,
        ))
    }
}

#[async_trait]
impl QuoteProvider for QuoteApiProvider {
    async fn fiat_to_crypto(&self, amount: Decimal) -> Result<ConversionResult, ConversionError> {
        self.fetch(Direction::FiatToCrypto, amount).await
    }

    async fn crypto_to_fiat(&self, amount: Decimal) -> Result<ConversionResult, ConversionError> {
        self.fetch(Direction::CryptoToFiat, amount).await
    }
}
