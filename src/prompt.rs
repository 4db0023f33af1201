//! Interactive portfolio-size prompt.

use std::io::{BufRead, Write};

use crate::allocation::parse_portfolio_value;
use crate::error::{Result, ScreenerError};

/// Ask for the portfolio value until a valid amount is entered.
///
/// Gives up after `max_attempts` invalid answers, or when input ends, with
/// [`ScreenerError::InvalidPortfolioValue`]. Each rejected answer prints a
/// message to `output` before asking again.
pub fn prompt_portfolio_value<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    max_attempts: usize,
) -> Result<f64> {
    let mut last_error = String::from("no input");

    for attempt in 1..=max_attempts {
        write!(output, "Enter the value of your portfolio: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(ScreenerError::InvalidPortfolioValue(
                "input closed before a value was entered".to_string(),
            ));
        }

        match parse_portfolio_value(&line) {
            Ok(value) => return Ok(value),
            Err(e) => {
                last_error = e.to_string();
                if attempt < max_attempts {
                    writeln!(output, "That's not a valid amount ({}). Please try again.", e)?;
                }
            }
        }
    }

    Err(ScreenerError::InvalidPortfolioValue(format!(
        "gave up after {} attempts: {}",
        max_attempts, last_error
    )))
}
