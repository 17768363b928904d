use std::{io, io::Write};

use colored::Colorize;
use ethadapter::{validate_address, UNSET_ADDRESS};
use regex::Regex;

pub fn print_error_message(error_message: &str) {
    println!("{}", error_message.red());
}

pub fn print_warn_message(warn_message: &str) {
    println!("{}", warn_message.yellow());
}

pub fn print_success_message(success_message: &str) {
    println!("{}", success_message.green());
}

fn read_trimmed_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Asks a yes/no question, anything but `y`/`yes` is a no.
pub fn prompt_for_confirmation(question: &str) -> io::Result<bool> {
    let answer = read_trimmed_line(&format!("{} [y/N]: ", question.yellow()))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

/// Asks for the deployed address of `contract`. Accepts a checksummed or lowercase address, or
/// a `${VAR}` placeholder resolved from the environment at build time. Gives up with the unset
/// address after `attempts` invalid answers or an empty one.
pub fn prompt_for_address(contract: &str, attempts: usize) -> io::Result<String> {
    let placeholder = Regex::new(r"^\$\{[A-Za-z_][A-Za-z0-9_]*\}$")
        .map_err(io::Error::other)?;

    for _ in 0..attempts {
        let input = read_trimmed_line(&format!(
            "{} (skip by pressing Enter): ",
            format!("{} address", contract).yellow()
        ))?;

        if input.is_empty() {
            return Ok(UNSET_ADDRESS.to_string());
        }

        if placeholder.is_match(&input) {
            return Ok(input);
        }

        match validate_address(&input) {
            Ok(_) => return Ok(input),
            Err(e) => print_error_message(&format!("{}, please try again.", e)),
        }
    }

    print_warn_message(&format!(
        "No valid address given for {}, using {} for now.",
        contract, UNSET_ADDRESS
    ));
    Ok(UNSET_ADDRESS.to_string())
}
