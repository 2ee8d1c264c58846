//! Prompt theme and banner for the interactive session.

use console::{style, Style};
use dialoguer::theme::ColorfulTheme;

/// Returns a `ColorfulTheme` with cyan prompts, green answers and red errors.
pub fn triage_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("?".to_string()).for_stderr().cyan(),
        prompt_style: Style::new().for_stderr().bold(),
        prompt_suffix: style("›".to_string()).for_stderr().bright().black(),
        success_prefix: style("✓".to_string()).for_stderr().green(),
        success_suffix: style("·".to_string()).for_stderr().bright().black(),
        error_prefix: style("✗".to_string()).for_stderr().red(),
        error_style: Style::new().for_stderr().red(),
        values_style: Style::new().for_stderr().green(),
        ..ColorfulTheme::default()
    }
}

/// Prints the Triage banner to stderr.
pub fn print_banner() {
    let version_line = format!("Triage v{}", triage_core::VERSION);
    let tagline = "Sort images by nearest class centroid";

    let inner_width = tagline.len() + 4;

    let top = format!("  ╔{:═<width$}╗", "", width = inner_width);
    let mid1 = format!("  ║{:^width$}║", version_line, width = inner_width);
    let mid2 = format!("  ║{:^width$}║", tagline, width = inner_width);
    let bot = format!("  ╚{:═<width$}╝", "", width = inner_width);

    let cyan = Style::new().for_stderr().cyan();

    eprintln!();
    eprintln!("{}", cyan.apply_to(&top));
    eprintln!("{}", cyan.apply_to(&mid1));
    eprintln!("{}", cyan.apply_to(&mid2));
    eprintln!("{}", cyan.apply_to(&bot));
    eprintln!();
}

/// Print a numbered class list, 1-based, optionally with the new-class entry.
pub fn print_classes(classes: &[String], with_new: bool) {
    let dim = Style::new().for_stderr().dim();
    let number = Style::new().for_stderr().cyan();

    eprintln!("  {}", dim.apply_to("-".repeat(30)));
    for (i, class) in classes.iter().enumerate() {
        eprintln!("  {:>3}. {}", number.apply_to(i + 1), class);
    }
    if with_new {
        eprintln!("  {:>3}  {}", number.apply_to("n"), dim.apply_to("New class"));
    }
    eprintln!("  {}", dim.apply_to("-".repeat(30)));
}
