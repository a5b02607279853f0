//! Terminal colorization for the model listing
//!
//! Applies ANSI escape codes to listing elements using crossterm:
//! - Classifier keywords: Cyan
//! - Stereotypes (`<<...>>`): Magenta
//! - Tags (`$name`): Green
//! - Relationship keywords and arrows: Yellow

use crossterm::style::{Color, Stylize};

const KIND_KEYWORDS: &[&str] = &[
    "class",
    "interface",
    "enum",
    "annotation",
    "abstract",
    "entity",
    "circle",
    "diamond",
    "protocol",
    "struct",
];

/// Colorize the text model listing with ANSI escape codes
pub fn colorize_output(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 2);
    for line in input.lines() {
        result.push_str(&colorize_line(line));
        result.push('\n');
    }
    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }
    result
}

// A stereotype may contain spaces, so its span is painted as a whole before
// the rest of the line is tokenized.
fn colorize_line(line: &str) -> String {
    match (line.find("<<"), line.rfind(">>")) {
        (Some(open), Some(close)) if open < close => {
            let stereotype = &line[open..close + 2];
            format!(
                "{}{}{}",
                colorize_words(&line[..open]),
                stereotype.with(Color::Magenta),
                colorize_words(&line[close + 2..])
            )
        }
        _ => colorize_words(line),
    }
}

fn colorize_words(segment: &str) -> String {
    let mut out = String::new();
    let mut token = String::new();
    for c in segment.chars() {
        if c.is_whitespace() {
            if !token.is_empty() {
                out.push_str(&paint_token(&token));
                token.clear();
            }
            out.push(c);
        } else {
            token.push(c);
        }
    }
    if !token.is_empty() {
        out.push_str(&paint_token(&token));
    }
    out
}

fn paint_token(token: &str) -> String {
    if KIND_KEYWORDS.contains(&token) {
        format!("{}", token.with(Color::Cyan))
    } else if token.starts_with('$') {
        format!("{}", token.with(Color::Green))
    } else if token == "->" || token == "extends" || token == "implements" {
        format!("{}", token.with(Color::Yellow))
    } else {
        token.to_string()
    }
}
