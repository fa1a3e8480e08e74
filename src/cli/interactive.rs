//! Line-oriented conversion screen.
//!
//! Quotes are fetched in a background task, so input keeps being read while a
//! request is outstanding. Only one request runs at a time.

use anyhow::{Result, anyhow};
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

use super::ui::{self, StyleType};
use crate::core::controller::QuoteOutcome;
use crate::core::{ConversionController, QuoteTask};

const HELP: &str = "\
Commands:
  fiat [amount]    set the fiat amount (no amount clears it)
  crypto [amount]  set the crypto amount (no amount clears it)
  convert          convert from the filled field (fiat wins if both are set)
  show             show both fields and the summary
  help             show this help
  quit             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fiat(String),
    Crypto(String),
    Convert,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (word, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let rest = rest.trim().to_string();
        match word.to_lowercase().as_str() {
            "fiat" | "f" => Ok(Command::Fiat(rest)),
            "crypto" | "c" => Ok(Command::Crypto(rest)),
            "convert" | "=" if rest.is_empty() => Ok(Command::Convert),
            "show" | "s" if rest.is_empty() => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(anyhow!("Unknown command: {}", s)),
        }
    }
}

enum Step {
    Input(std::io::Result<Option<String>>),
    Finished(QuoteOutcome),
}

async fn wait_for(task: &mut Option<QuoteTask>) -> QuoteOutcome {
    match task {
        Some(task) => task.wait().await,
        None => std::future::pending().await,
    }
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

fn show(controller: &ConversionController) {
    ui::print_state(
        controller.state(),
        controller.units(),
        controller.render_summary().as_ref(),
    );
}

pub async fn run(controller: &mut ConversionController) -> Result<()> {
    println!(
        "{}",
        ui::style_text(
            &format!(
                "{} <-> {} converter",
                controller.units().fiat,
                controller.units().crypto
            ),
            StyleType::Title
        )
    );
    println!("{}", ui::style_text(HELP, StyleType::Subtle));
    run_with_input(controller, BufReader::new(tokio::io::stdin())).await
}

/// Drives the screen from any line source until `quit` or end of input. A
/// request still outstanding at that point is allowed to finish.
pub async fn run_with_input<R>(controller: &mut ConversionController, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut in_flight: Option<QuoteTask> = None;

    prompt()?;
    loop {
        let step = tokio::select! {
            biased;
            outcome = wait_for(&mut in_flight), if in_flight.is_some() => Step::Finished(outcome),
            line = lines.next_line() => Step::Input(line),
        };

        match step {
            Step::Finished(outcome) => {
                in_flight = None;
                controller.complete_conversion(outcome);
                println!();
                show(controller);
            }
            Step::Input(line) => {
                let Some(line) = line? else {
                    debug!("End of input");
                    break;
                };
                if line.trim().is_empty() {
                    prompt()?;
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => apply(controller, command, &mut in_flight),
                    Err(e) => {
                        println!("{}", ui::style_text(&e.to_string(), StyleType::Error));
                        println!("{}", ui::style_text("Type 'help' for commands", StyleType::Subtle));
                    }
                }
            }
        }
        prompt()?;
    }

    if let Some(mut task) = in_flight.take() {
        debug!("Waiting for outstanding conversion");
        let outcome = task.wait().await;
        controller.complete_conversion(outcome);
        println!();
        show(controller);
    }
    Ok(())
}

fn apply(controller: &mut ConversionController, command: Command, in_flight: &mut Option<QuoteTask>) {
    match command {
        Command::Fiat(text) => controller.edit_fiat(text),
        Command::Crypto(text) => controller.edit_crypto(text),
        Command::Convert => {
            if in_flight.is_some() {
                println!(
                    "{}",
                    ui::style_text("A conversion is already in progress", StyleType::Subtle)
                );
                return;
            }
            match controller.begin_conversion() {
                Some(task) => {
                    *in_flight = Some(task);
                    println!("{}", ui::style_text("Converting...", StyleType::Subtle));
                }
                None if controller.state().last_error.is_some() => show(controller),
                None => println!("Nothing to convert. Enter a fiat or crypto amount first."),
            }
        }
        Command::Show => show(controller),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ConversionError;
    use crate::core::quote::{ConversionResult, Direction, QuoteProvider};
    use crate::core::summary::Units;
    use crate::core::{ConversionService, Phase};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Default)]
    struct CountingProvider {
        calls: Mutex<Vec<Direction>>,
        latency: Option<Duration>,
    }

    impl CountingProvider {
        async fn respond(&self, direction: Direction) {
            self.calls.lock().unwrap().push(direction);
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
        }
    }

    #[async_trait]
    impl QuoteProvider for CountingProvider {
        async fn fiat_to_crypto(&self, amount: Decimal) -> Result<ConversionResult, ConversionError> {
            self.respond(Direction::FiatToCrypto).await;
            Ok(ConversionResult::new(amount, amount * dec!(40000)))
        }

        async fn crypto_to_fiat(&self, amount: Decimal) -> Result<ConversionResult, ConversionError> {
            self.respond(Direction::CryptoToFiat).await;
            Ok(ConversionResult::new(amount / dec!(40000), amount))
        }
    }

    fn controller(provider: Arc<CountingProvider>) -> ConversionController {
        ConversionController::new(ConversionService::new(provider), Units::default())
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(
            "fiat 12.5".parse::<Command>().unwrap(),
            Command::Fiat("12.5".to_string())
        );
        assert_eq!(
            "  CRYPTO   250000 ".parse::<Command>().unwrap(),
            Command::Crypto("250000".to_string())
        );
        assert_eq!("fiat".parse::<Command>().unwrap(), Command::Fiat(String::new()));
        assert_eq!("convert".parse::<Command>().unwrap(), Command::Convert);
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
        assert!("convert now".parse::<Command>().is_err());
        assert!("launch".parse::<Command>().is_err());
    }

    #[tokio::test]
    async fn test_session_converts_and_waits_at_end_of_input() {
        let provider = Arc::new(CountingProvider::default());
        let mut controller = controller(provider.clone());

        let input: &[u8] = b"fiat 2\nconvert\n";
        run_with_input(&mut controller, input).await.unwrap();

        assert_eq!(controller.state().crypto_text, "80000");
        assert_eq!(controller.state().phase, Phase::Converted);
        assert_eq!(*provider.calls.lock().unwrap(), vec![Direction::FiatToCrypto]);
    }

    // Paused time only advances once every task is idle, so the quote cannot
    // land before all queued input has been read.
    #[tokio::test(start_paused = true)]
    async fn test_convert_refused_while_quote_outstanding() {
        let provider = Arc::new(CountingProvider {
            latency: Some(Duration::from_secs(60)),
            ..CountingProvider::default()
        });
        let mut controller = controller(provider.clone());

        let input: &[u8] = b"crypto 20000\nconvert\nconvert\nconvert\nquit\n";
        run_with_input(&mut controller, input).await.unwrap();

        assert_eq!(*provider.calls.lock().unwrap(), vec![Direction::CryptoToFiat]);
        assert_eq!(controller.state().fiat_text, "0.5");
        assert_eq!(controller.state().phase, Phase::Converted);
        assert!(!controller.state().is_converting());
    }

    #[tokio::test]
    async fn test_bad_input_keeps_session_alive() {
        let provider = Arc::new(CountingProvider::default());
        let mut controller = controller(provider.clone());

        let input: &[u8] = b"bogus\nfiat abc\nconvert\nfiat 1\nconvert\n";
        run_with_input(&mut controller, input).await.unwrap();

        assert_eq!(controller.state().crypto_text, "40000");
        assert!(controller.state().last_error.is_none());
    }
}
