//! # Input Prompting
//!
//! Typed prompt/re-prompt loops over an input stream.
//!
//! Validity is decided by `marquee_core::validation`; this module only owns
//! the presentation half of the contract - printing the prompt, reading a
//! line, showing the validation message, and asking again. Prompts read from
//! any `BufRead`, so tests drive them with an in-memory cursor instead of
//! the TTY.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, Result};

use marquee_core::validation::{
    validate_contact_number, validate_copy_count, validate_duration, validate_name, validate_pin,
    validate_title,
};
use marquee_core::{Classification, Genre};

/// Prompt loop driver over a line-based input stream.
pub struct Prompter<R> {
    reader: R,
}

impl<R: BufRead> Prompter<R> {
    pub fn new(reader: R) -> Self {
        Prompter { reader }
    }

    /// Prints a prompt and reads one trimmed line.
    ///
    /// ## Errors
    /// Fails only when the input stream is closed - the session cannot
    /// continue without input, so this bubbles up as a fatal error.
    pub fn line(&mut self, prompt: &str) -> Result<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();

        let mut buffer = String::new();
        if self.reader.read_line(&mut buffer)? == 0 {
            bail!("input stream closed");
        }
        Ok(buffer.trim().to_string())
    }

    /// Re-prompts until the line is non-empty.
    pub fn nonempty(&mut self, prompt: &str) -> Result<String> {
        loop {
            let value = self.line(prompt)?;
            if !value.is_empty() {
                return Ok(value);
            }
            println!("Input cannot be empty. Please try again.");
        }
    }

    /// Re-prompts until the line parses as a number.
    pub fn u32(&mut self, prompt: &str) -> Result<u32> {
        loop {
            let value = self.line(prompt)?;
            match value.parse::<u32>() {
                Ok(number) => return Ok(number),
                Err(_) => println!("Invalid input. Please enter a valid number."),
            }
        }
    }

    /// Re-prompts until the number lands in `min..=max`.
    pub fn u32_in(&mut self, prompt: &str, min: u32, max: u32) -> Result<u32> {
        loop {
            let value = self.u32(prompt)?;
            if (min..=max).contains(&value) {
                return Ok(value);
            }
            println!("Input must be between {} and {}.", min, max);
        }
    }

    /// Menu selection in `1..=max`.
    pub fn menu_choice(&mut self, max: u32) -> Result<u32> {
        self.u32_in("Enter option: ", 1, max)
    }

    /// Re-prompts until the line is a valid item title.
    pub fn title(&mut self, prompt: &str) -> Result<String> {
        loop {
            let value = self.line(prompt)?;
            match validate_title(&value) {
                Ok(()) => return Ok(value),
                Err(reason) => println!("{}. Please try again.", reason),
            }
        }
    }

    /// Re-prompts until the line is a valid patron name.
    pub fn name(&mut self, field: &str, prompt: &str) -> Result<String> {
        loop {
            let value = self.line(prompt)?;
            match validate_name(field, &value) {
                Ok(()) => return Ok(value),
                Err(reason) => println!("{}. Please try again.", reason),
            }
        }
    }

    /// Re-prompts until the line is a valid contact number.
    pub fn contact_number(&mut self, prompt: &str) -> Result<String> {
        loop {
            let value = self.line(prompt)?;
            match validate_contact_number(&value) {
                Ok(()) => return Ok(value),
                Err(reason) => println!("{}. Please try again.", reason),
            }
        }
    }

    /// Re-prompts until the line is a four-digit PIN.
    pub fn pin(&mut self, prompt: &str) -> Result<String> {
        loop {
            let value = self.line(prompt)?;
            match validate_pin(&value) {
                Ok(()) => return Ok(value),
                Err(_) => println!("Password must be a four-digit number."),
            }
        }
    }

    /// Re-prompts until a valid running time is entered.
    pub fn duration(&mut self, prompt: &str) -> Result<u32> {
        loop {
            let value = self.u32(prompt)?;
            match validate_duration(value) {
                Ok(()) => return Ok(value),
                Err(reason) => println!("{}.", reason),
            }
        }
    }

    /// Re-prompts until a valid copy count is entered.
    pub fn copy_count(&mut self, prompt: &str) -> Result<u32> {
        loop {
            let value = self.u32(prompt)?;
            match validate_copy_count(value) {
                Ok(()) => return Ok(value),
                Err(reason) => println!("{}.", reason),
            }
        }
    }

    /// Re-prompts until the line parses as a genre.
    pub fn genre(&mut self) -> Result<Genre> {
        let options = Genre::ALL.map(|g| g.name()).join(", ");
        let prompt = format!("Enter genre ({}): ", options);
        self.parse_loop(&prompt)
    }

    /// Re-prompts until the line parses as a classification.
    pub fn classification(&mut self) -> Result<Classification> {
        let options = Classification::ALL.map(|c| c.name()).join(", ");
        let prompt = format!("Enter classification ({}): ", options);
        self.parse_loop(&prompt)
    }

    fn parse_loop<T>(&mut self, prompt: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        loop {
            let value = self.line(prompt)?;
            match value.parse::<T>() {
                Ok(parsed) => return Ok(parsed),
                Err(reason) => println!("{}. Please try again.", reason),
            }
        }
    }
}
