//! Thin dispatch layer between the controller and a quote provider.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::error::ConversionError;
use super::quote::{ConversionResult, Direction, QuoteProvider};

#[derive(Clone)]
pub struct ConversionService {
    provider: Arc<dyn QuoteProvider>,
}

impl ConversionService {
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        ConversionService { provider }
    }

    pub async fn fiat_to_crypto(&self, amount: Decimal) -> Result<ConversionResult, ConversionError> {
        self.convert(Direction::FiatToCrypto, amount).await
    }

    pub async fn crypto_to_fiat(&self, amount: Decimal) -> Result<ConversionResult, ConversionError> {
        self.convert(Direction::CryptoToFiat, amount).await
    }

    #[instrument(name = "Convert", skip(self), fields(direction = %direction, amount = %amount))]
    pub async fn convert(
        &self,
        direction: Direction,
        amount: Decimal,
    ) -> Result<ConversionResult, ConversionError> {
        if amount < Decimal::ZERO {
            return Err(ConversionError::parse(
                &amount.to_string(),
                "amount must not be negative",
            ));
        }

        let result = match direction {
            Direction::FiatToCrypto => self.provider.fiat_to_crypto(amount).await?,
            Direction::CryptoToFiat => self.provider.crypto_to_fiat(amount).await?,
        };
        debug!(?result, "Received quote");
        Ok(result)
    }
}
