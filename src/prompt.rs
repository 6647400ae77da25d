// SPDX-License-Identifier: AGPL-3.0-only

//! Console input: parsing, validation, and bounded re-prompting.
//!
//! Parsing is split from I/O so every rule is testable without a terminal.
//! [`Prompter`] wraps any `BufRead`/`Write` pair and re-asks on invalid
//! input according to an explicit [`RetryPolicy`].

use std::io::{BufRead, Write};

use crate::error::{PhononError, Result};

/// Why a line of console input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// Not parseable as the expected number type
    InvalidNumberFormat,
    /// Parsed, but zero or negative
    NonPositiveValue,
    /// Neither "y" nor "n"
    InvalidChoice,
}

/// Parse a strictly positive integer (generation count).
///
/// # Errors
/// `InvalidNumberFormat` or `NonPositiveValue`.
pub fn parse_positive_int(line: &str) -> std::result::Result<u32, InputError> {
    let value: i64 = line
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidNumberFormat)?;
    if value <= 0 {
        return Err(InputError::NonPositiveValue);
    }
    u32::try_from(value).map_err(|_| InputError::InvalidNumberFormat)
}

/// Parse a strictly positive, finite float (atom mass).
///
/// # Errors
/// `InvalidNumberFormat` (including NaN and infinities) or `NonPositiveValue`.
pub fn parse_positive_float(line: &str) -> std::result::Result<f64, InputError> {
    let value: f64 = line
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidNumberFormat)?;
    if !value.is_finite() {
        return Err(InputError::InvalidNumberFormat);
    }
    if value <= 0.0 {
        return Err(InputError::NonPositiveValue);
    }
    Ok(value)
}

/// Parse exactly "y" or "n" (surrounding whitespace ignored).
///
/// # Errors
/// `InvalidChoice` for anything else.
pub fn parse_choice(line: &str) -> std::result::Result<bool, InputError> {
    match line.trim() {
        "y" => Ok(true),
        "n" => Ok(false),
        _ => Err(InputError::InvalidChoice),
    }
}

/// The yes/no questions the driver asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Render the mass-ratio / generation sweep
    Plot,
    /// Print the atom chain and mass occurrence ratio
    Print,
}

impl Choice {
    const PROMPTS: [(Self, &'static str); 2] = [
        (
            Self::Plot,
            "Generate plots of increasing mass and generations? Enter y/n",
        ),
        (
            Self::Print,
            "Print mass occurrence ratio and atom chain? Enter y/n",
        ),
    ];

    /// Prompt text for this question.
    #[must_use]
    pub fn prompt(self) -> &'static str {
        Self::PROMPTS
            .iter()
            .find(|(c, _)| *c == self)
            .map_or("Enter y/n", |&(_, text)| text)
    }
}

/// Message shown for each rejection; both number errors share one text per
/// expected type.
const INT_ERROR: &str = "Input must be a positive integer";
const FLOAT_ERROR: &str = "Input must be a positive number";
const CHOICE_ERROR: &str = "Please enter either y/n";

/// How many invalid answers a prompt tolerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// Re-ask until valid input arrives or input closes
    #[default]
    Unbounded,
    /// Give up after this many attempts in total
    Limited(usize),
}

impl RetryPolicy {
    /// Whether attempt number `attempt` (1-based) may be made.
    #[must_use]
    pub const fn allows(self, attempt: usize) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Limited(max) => attempt <= max,
        }
    }
}

/// Line-oriented prompter over any reader/writer pair.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    policy: RetryPolicy,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Wrap `reader`/`writer` with the given retry policy.
    pub const fn new(reader: R, writer: W, policy: RetryPolicy) -> Self {
        Self {
            reader,
            writer,
            policy,
        }
    }

    /// Ask for the generation count.
    ///
    /// # Errors
    /// `RetriesExhausted`, `InputClosed`, or `Io`.
    pub fn generations(&mut self) -> Result<u32> {
        self.ask(
            "Input number of generations as a positive integer",
            INT_ERROR,
            parse_positive_int,
        )
    }

    /// Ask for the mass of the atom species named `label`.
    ///
    /// # Errors
    /// `RetriesExhausted`, `InputClosed`, or `Io`.
    pub fn mass(&mut self, label: &str) -> Result<f64> {
        let prompt = format!("Input mass of atom {label} as a positive number");
        self.ask(&prompt, FLOAT_ERROR, parse_positive_float)
    }

    /// Ask a yes/no question.
    ///
    /// # Errors
    /// `RetriesExhausted`, `InputClosed`, or `Io`.
    pub fn choice(&mut self, choice: Choice) -> Result<bool> {
        self.ask(choice.prompt(), CHOICE_ERROR, parse_choice)
    }

    fn ask<T>(
        &mut self,
        prompt: &str,
        error_message: &str,
        parse: impl Fn(&str) -> std::result::Result<T, InputError>,
    ) -> Result<T> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            if !self.policy.allows(attempt) {
                return Err(PhononError::RetriesExhausted(attempt - 1));
            }

            writeln!(self.writer, "{prompt}")?;
            self.writer.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(PhononError::InputClosed);
            }

            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    log::debug!("rejected input {:?}: {err:?}", line.trim());
                    writeln!(self.writer, "{error_message}")?;
                }
            }
        }
    }

    /// Consume the prompter and return the writer (for inspecting output).
    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str, policy: RetryPolicy) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), policy)
    }

    #[test]
    fn positive_int_rules() {
        assert_eq!(parse_positive_int(" 12\n"), Ok(12));
        assert_eq!(parse_positive_int("0"), Err(InputError::NonPositiveValue));
        assert_eq!(parse_positive_int("-3"), Err(InputError::NonPositiveValue));
        assert_eq!(
            parse_positive_int("1.5"),
            Err(InputError::InvalidNumberFormat)
        );
        assert_eq!(
            parse_positive_int("abc"),
            Err(InputError::InvalidNumberFormat)
        );
    }

    #[test]
    fn positive_float_rules() {
        assert_eq!(parse_positive_float("2.5"), Ok(2.5));
        assert_eq!(parse_positive_float("3"), Ok(3.0));
        assert_eq!(
            parse_positive_float("0.0"),
            Err(InputError::NonPositiveValue)
        );
        assert_eq!(
            parse_positive_float("NaN"),
            Err(InputError::InvalidNumberFormat)
        );
        assert_eq!(
            parse_positive_float("inf"),
            Err(InputError::InvalidNumberFormat)
        );
        assert_eq!(parse_positive_float(""), Err(InputError::InvalidNumberFormat));
    }

    #[test]
    fn choice_rules() {
        assert_eq!(parse_choice("y\n"), Ok(true));
        assert_eq!(parse_choice("n"), Ok(false));
        assert_eq!(parse_choice("Y"), Err(InputError::InvalidChoice));
        assert_eq!(parse_choice("yes"), Err(InputError::InvalidChoice));
    }

    #[test]
    fn choice_prompt_table() {
        assert!(Choice::Plot.prompt().contains("Generate plots"));
        assert!(Choice::Print.prompt().contains("occurrence ratio"));
    }

    #[test]
    fn retry_policy_bounds() {
        assert!(RetryPolicy::Unbounded.allows(1_000_000));
        assert!(RetryPolicy::Limited(2).allows(2));
        assert!(!RetryPolicy::Limited(2).allows(3));
    }

    #[test]
    fn prompter_retries_until_valid() {
        let mut p = prompter("abc\n-1\n7\n", RetryPolicy::Unbounded);
        assert_eq!(p.generations().expect("valid on third try"), 7);
        let out = String::from_utf8(p.into_writer()).expect("utf8");
        assert_eq!(out.matches(INT_ERROR).count(), 2);
    }

    #[test]
    fn prompter_same_message_for_both_number_errors() {
        let mut p = prompter("x\n0\n1.25\n", RetryPolicy::Unbounded);
        assert!((p.mass("A").expect("mass") - 1.25).abs() < 1e-15);
        let out = String::from_utf8(p.into_writer()).expect("utf8");
        assert_eq!(out.matches(FLOAT_ERROR).count(), 2);
        assert!(out.contains("atom A"));
    }

    #[test]
    fn prompter_limited_policy_exhausts() {
        let mut p = prompter("maybe\nperhaps\ny\n", RetryPolicy::Limited(2));
        assert!(matches!(
            p.choice(Choice::Plot),
            Err(PhononError::RetriesExhausted(2))
        ));
    }

    #[test]
    fn prompter_reports_closed_input() {
        let mut p = prompter("", RetryPolicy::Unbounded);
        assert!(matches!(p.generations(), Err(PhononError::InputClosed)));
    }
}
