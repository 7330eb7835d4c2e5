//! CLI output formatting for every subcommand.
//!
//! # Output Format
//!
//! ## Palette
//!
//! ```text
//! sunset.jpg
//!     001 #f26b1d  41.2%
//!     002 #2a1b3d  30.0%
//!     Dominant: #f26b1d
//!     Average: #a3552b
//!     Vibrant: #f26b1d
//!     Dark vibrant: #2a1b3d
//!     Light vibrant: -
//!     Grayscale: no
//!     Monochromatic: no
//! ```
//!
//! ## Hash, quality
//!
//! ```text
//! 8f0e1c3c3e1e0f07  dhash  sunset.jpg
//!  87  sunset.jpg
//! ```
//!
//! ## Compare
//!
//! ```text
//! a.jpg ↔ b.jpg
//!     Distance: 3 / 64
//!     Similarity: 0.953
//!     Similar: yes (threshold 0.900)
//! ```
//!
//! ## Duplicates
//!
//! ```text
//! 001 a.jpg
//!     a-copy.jpg
//!     a-resized.jpg
//!
//! 1 group, 2 duplicates
//! ```
//!
//! # Architecture
//!
//! Each subcommand has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::color::Color;
use crate::hash::{DuplicateGroup, HASH_BITS, PerceptualHash, SimilarityResult};
use crate::palette::ColorAnalysis;
use crate::quality::QualityScore;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn optional_hex(color: Option<&Color>) -> &str {
    color.map(Color::hex).unwrap_or("-")
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Palette
// ============================================================================

/// Format a color analysis: ranked colors first, then derived colors and flags.
pub fn format_palette(label: &str, analysis: &ColorAnalysis) -> Vec<String> {
    let palette = &analysis.palette;
    let mut lines = vec![label.to_string()];

    for (i, color) in palette.colors.iter().enumerate() {
        let share = color
            .percentage()
            .map(|p| format!("{:>5.1}%", p))
            .unwrap_or_default();
        lines.push(format!(
            "{}{} {}  {}",
            indent(1),
            format_index(i + 1),
            color.hex(),
            share
        ));
    }

    let details = [
        ("Dominant", optional_hex(palette.dominant_color.as_ref())),
        ("Average", optional_hex(palette.average_color.as_ref())),
        ("Vibrant", optional_hex(analysis.vibrant.as_ref())),
        ("Dark vibrant", optional_hex(analysis.dark_vibrant.as_ref())),
        ("Light vibrant", optional_hex(analysis.light_vibrant.as_ref())),
        ("Grayscale", yes_no(analysis.is_grayscale)),
        ("Monochromatic", yes_no(analysis.is_monochromatic)),
    ];
    for (name, value) in details {
        lines.push(format!("{}{}: {}", indent(1), name, value));
    }
    lines
}

pub fn print_palette(label: &str, analysis: &ColorAnalysis) {
    print_lines(format_palette(label, analysis));
}

// ============================================================================
// Hash and quality
// ============================================================================

/// One line per image: `hash  algorithm  label`.
pub fn format_hash(label: &str, hash: &PerceptualHash) -> String {
    format!("{}  {}  {}", hash.hash, hash.algorithm, label)
}

pub fn print_hash(label: &str, hash: &PerceptualHash) {
    println!("{}", format_hash(label, hash));
}

/// One line per image, score right-aligned so columns line up.
pub fn format_quality(label: &str, score: QualityScore) -> String {
    format!("{:>3}  {}", score.value(), label)
}

pub fn print_quality(label: &str, score: QualityScore) {
    println!("{}", format_quality(label, score));
}

// ============================================================================
// Compare
// ============================================================================

pub fn format_comparison(
    left: &str,
    right: &str,
    result: &SimilarityResult,
    threshold: f64,
) -> Vec<String> {
    vec![
        format!("{} \u{2194} {}", left, right),
        format!("{}Distance: {} / {}", indent(1), result.distance, HASH_BITS),
        format!("{}Similarity: {:.3}", indent(1), result.similarity),
        format!(
            "{}Similar: {} (threshold {:.3})",
            indent(1),
            yes_no(result.similarity >= threshold),
            threshold
        ),
    ]
}

pub fn print_comparison(left: &str, right: &str, result: &SimilarityResult, threshold: f64) {
    print_lines(format_comparison(left, right, result, threshold));
}

// ============================================================================
// Duplicates
// ============================================================================

/// Format duplicate groups, resolving indices to `labels`.
///
/// Groups are numbered in order; each lists the original first and its
/// duplicates indented below. A summary line closes the output.
pub fn format_duplicates(labels: &[String], groups: &[DuplicateGroup]) -> Vec<String> {
    let label = |i: usize| labels.get(i).map(String::as_str).unwrap_or("?");
    let mut lines = Vec::new();
    let mut total = 0;

    for (n, group) in groups.iter().enumerate() {
        lines.push(format!("{} {}", format_index(n + 1), label(group.index)));
        for &dup in &group.duplicates {
            lines.push(format!("{}{}", indent(1), label(dup)));
        }
        total += group.duplicates.len();
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    let plural = |n: usize, word: &str| {
        if n == 1 {
            format!("{} {}", n, word)
        } else {
            format!("{} {}s", n, word)
        }
    };
    lines.push(format!(
        "{}, {}",
        plural(groups.len(), "group"),
        plural(total, "duplicate")
    ));
    lines
}

pub fn print_duplicates(labels: &[String], groups: &[DuplicateGroup]) {
    print_lines(format_duplicates(labels, groups));
}
