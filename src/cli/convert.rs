use anyhow::Result;

use super::ui;
use crate::core::ConversionController;

/// One-shot conversion: fill the given fields, convert once, print the result.
pub async fn run(
    controller: &mut ConversionController,
    fiat: Option<&str>,
    crypto: Option<&str>,
) -> Result<()> {
    if let Some(text) = crypto {
        controller.edit_crypto(text);
    }
    // Edited last, but fiat would drive the conversion either way.
    if let Some(text) = fiat {
        controller.edit_fiat(text);
    }

    if !controller.state().has_input() {
        println!("Nothing to convert. Pass --fiat or --crypto with an amount.");
        return Ok(());
    }

    if let Some(mut task) = controller.begin_conversion() {
        let pb = ui::new_spinner("Fetching quote");
        let outcome = task.wait().await;
        pb.finish_and_clear();
        controller.complete_conversion(outcome);
    }

    ui::print_state(
        controller.state(),
        controller.units(),
        controller.render_summary().as_ref(),
    );
    Ok(())
}
