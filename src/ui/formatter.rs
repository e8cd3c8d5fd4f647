//! Formatting functions for UI output.
//!
//! This module contains display logic separated from user interaction. The
//! `format_*` helpers are pure and tested; the `display_*` functions print.

use console::Style;

use crate::boundary::BoundaryWarning;
use crate::resolver::VersionTag;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", Style::new().red().apply_to("ERROR:"), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", Style::new().green().apply_to("✓"), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", Style::new().yellow().apply_to("→"), message);
}

/// One line per tag: `name  short-id (timestamp by tagger)`
pub fn format_tag_line(tag: &VersionTag) -> String {
    format!(
        "{}   {} ({} by {})",
        tag.tag.name,
        tag.tag.short_id(),
        tag.tag.tagged_at.format(DATE_FORMAT),
        tag.tag.tagger_name
    )
}

/// Header above the recent tag list; `shown` is the number of lines that follow
pub fn format_recent_header(shown: usize) -> String {
    match shown {
        0 => "No tags with matching pattern".to_string(),
        1 => "Last tag with matching pattern:".to_string(),
        n => format!("Last {} tags with matching pattern:", n),
    }
}

/// Display the most recent matching tags.
///
/// # Arguments
/// * `tags` - Matching tags, most recent first
/// * `count` - How many to show; zero shows nothing
pub fn display_recent_tags(tags: &[VersionTag], count: usize) {
    if count == 0 {
        return;
    }

    let shown = count.min(tags.len());
    println!(
        "\n{}",
        Style::new().bold().apply_to(format_recent_header(shown))
    );
    for tag in tags.iter().take(count) {
        println!("  {}", format_tag_line(tag));
    }
}

/// Display the proposed tag (or initial tag when nothing matched yet).
///
/// # Arguments
/// * `old_tag` - Most recent matching tag, if any
/// * `new_tag` - Name of the tag about to be created
pub fn display_proposed_tag(old_tag: Option<&str>, new_tag: &str) {
    let bold = Style::new().bold();
    match old_tag {
        Some(old) => {
            println!("\n{}", bold.apply_to("Proposed Tag Change:"));
            println!("  From: {}", Style::new().red().apply_to(old));
            println!("  To:   {}", Style::new().green().apply_to(new_tag));
        }
        None => {
            println!("\n{}", bold.apply_to("Initial Tag:"));
            println!("  New tag: {}", Style::new().green().apply_to(new_tag));
        }
    }
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!(
        "{} {}",
        Style::new().yellow().apply_to("⚠ WARNING:"),
        warning
    );
}

/// The git command that pushes a tag by hand
pub fn format_manual_push(tag: &str, remote: &str) -> String {
    format!("git push {} {}", remote, tag)
}

/// Display manual push instruction for a tag.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    println!(
        "\n{} To push this tag later, run:\n  {}",
        Style::new().yellow().apply_to("→"),
        Style::new().cyan().apply_to(format_manual_push(tag, remote))
    );
}
