//! Line prompts for the triage loop.
//!
//! Each `ask_*` function re-prompts until the answer parses and returns
//! `Ok(None)` when the user interrupts (Ctrl+C).

use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use triage_core::validate_class_name;

/// Answer to the class menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassChoice {
    /// Zero-based index into the class list
    Existing(usize),
    New,
}

/// `y`/`yes` or `n`/`no`, any case.
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// A 1-based class number, or `n` for a new class.
pub fn parse_class_choice(input: &str, class_count: usize) -> Result<ClassChoice, String> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("n") {
        return Ok(ClassChoice::New);
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=class_count).contains(&n) => Ok(ClassChoice::Existing(n - 1)),
        Ok(_) => Err("Invalid class number.".to_string()),
        Err(_) => Err("Please enter a valid number or 'n'.".to_string()),
    }
}

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
pub fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn ask_yes_no(theme: &ColorfulTheme, prompt: &str) -> anyhow::Result<Option<bool>> {
    let answer = handle_interrupt(
        Input::<String>::with_theme(theme)
            .with_prompt(prompt)
            .validate_with(|input: &String| -> Result<(), String> {
                parse_yes_no(input)
                    .map(|_| ())
                    .ok_or_else(|| "Please answer with 'y' or 'n'".to_string())
            })
            .interact_text(),
    )?;
    Ok(answer.as_deref().and_then(parse_yes_no))
}

pub fn ask_class_choice(
    theme: &ColorfulTheme,
    class_count: usize,
) -> anyhow::Result<Option<ClassChoice>> {
    let answer = handle_interrupt(
        Input::<String>::with_theme(theme)
            .with_prompt("Choose an existing class (number) or type 'n' for a new class")
            .validate_with(move |input: &String| -> Result<(), String> {
                parse_class_choice(input, class_count).map(|_| ())
            })
            .interact_text(),
    )?;
    Ok(answer.and_then(|a| parse_class_choice(&a, class_count).ok()))
}

/// Ask for a new class name, trimmed and checked as a folder name.
pub fn ask_new_class(theme: &ColorfulTheme) -> anyhow::Result<Option<String>> {
    let answer = handle_interrupt(
        Input::<String>::with_theme(theme)
            .with_prompt("Enter the name of the new class")
            .validate_with(|input: &String| -> Result<(), String> {
                validate_class_name(input.trim()).map_err(|e| e.to_string())
            })
            .interact_text(),
    )?;
    Ok(answer.map(|a| a.trim().to_string()))
}
