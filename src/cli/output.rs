//! Terminal output for forests and diagnostics
//!
//! Colors follow `colored`'s handling of NO_COLOR and CLICOLOR(_FORCE); the
//! `color = false` setting turns them off as well.

use std::fmt::Display;

use colored::Colorize;

/// `error:` prefixed message on stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// `warning:` prefixed message on stderr
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "warning".yellow(), msg);
}

/// Label of a tree root
pub fn root(label: &str) {
    println!("{}", label.cyan().bold());
}

/// Label of a node below the root, indented by its level
pub fn nested(level: usize, label: &str) {
    println!("{}{}", "  ".repeat(level), label);
}

/// Plain data line
pub fn line(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
