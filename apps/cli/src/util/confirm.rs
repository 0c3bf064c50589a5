use anyhow::{bail, Result};
use dialoguer::Confirm;

/// Asks `prompt` and waits for a yes. `assume_yes` skips the question.
pub fn confirm_or_abort(prompt: &str, assume_yes: bool) -> Result<()> {
	if assume_yes {
		return Ok(());
	}

	let confirmed = Confirm::new()
		.with_prompt(prompt)
		.default(false)
		.interact()?;

	if !confirmed {
		bail!("Aborted");
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn assume_yes_skips_the_prompt() {
		assert!(confirm_or_abort("Clear all sites and history?", true).is_ok());
	}
}
