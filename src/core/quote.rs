//! Quote abstractions and core types

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::fmt::Display;

use super::error::ConversionError;

/// Which way a single conversion request goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    FiatToCrypto,
    CryptoToFiat,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Direction::FiatToCrypto => "fiat-to-crypto",
                Direction::CryptoToFiat => "crypto-to-fiat",
            }
        )
    }
}

/// The same economic value expressed in both units, as quoted for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionResult {
    pub fiat_amount: Decimal,
    pub crypto_amount: Decimal,
}

impl ConversionResult {
    pub fn new(fiat_amount: Decimal, crypto_amount: Decimal) -> Self {
        Self {
            fiat_amount,
            crypto_amount,
        }
    }

    /// The amount on the destination side of `direction`.
    pub fn target_amount(&self, direction: Direction) -> Decimal {
        match direction {
            Direction::FiatToCrypto => self.crypto_amount,
            Direction::CryptoToFiat => self.fiat_amount,
        }
    }
}

/// A remote source of conversion quotes. Each call is one network round trip.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fiat_to_crypto(&self, amount: Decimal) -> Result<ConversionResult, ConversionError>;
    async fn crypto_to_fiat(&self, amount: Decimal) -> Result<ConversionResult, ConversionError>;
}

/// Canonical text form written back into an amount field.
pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::FiatToCrypto.to_string(), "fiat-to-crypto");
        assert_eq!(Direction::CryptoToFiat.to_string(), "crypto-to-fiat");
    }

    #[test]
    fn test_target_amount() {
        let result = ConversionResult::new(dec!(12.5), dec!(500000));
        assert_eq!(result.target_amount(Direction::FiatToCrypto), dec!(500000));
        assert_eq!(result.target_amount(Direction::CryptoToFiat), dec!(12.5));
    }

    #[test]
    fn test_format_amount_is_normalised() {
        assert_eq!(format_amount(dec!(500000.000)), "500000");
        assert_eq!(format_amount(dec!(12.50)), "12.5");
        assert_eq!(format_amount(dec!(0)), "0");
    }
}
