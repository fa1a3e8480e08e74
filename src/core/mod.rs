//! Core conversion logic

pub mod config;
pub mod controller;
pub mod error;
pub mod log;
pub mod quote;
pub mod service;
pub mod state;
pub mod summary;

// Re-export main types for cleaner imports
pub use controller::{ConversionController, QuoteTask};
pub use error::ConversionError;
pub use quote::{ConversionResult, Direction, QuoteProvider};
pub use service::ConversionService;
pub use state::{ConversionState, Event, Phase, reduce};
pub use summary::{Summary, Units};
