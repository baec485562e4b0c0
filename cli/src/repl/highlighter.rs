use std::borrow::Cow;

use owo_colors::OwoColorize;

/// Colors brackets and digits; command lines are shown in blue.
pub fn highlight_line(line: &str) -> Cow<'_, str> {
    if line.starts_with('.') {
        return Cow::Owned(line.blue().bold().to_string());
    }
    if !has_highlights(line) {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len() * 2);
    for ch in line.chars() {
        if is_bracket(ch) {
            out.push_str(&ch.magenta().bold().to_string());
        } else if ch.is_ascii_digit() {
            out.push_str(&ch.yellow().to_string());
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

pub fn has_highlights(line: &str) -> bool {
    line.starts_with('.') || line.contains(|c: char| c.is_ascii_digit() || is_bracket(c))
}

fn is_bracket(ch: char) -> bool {
    matches!(ch, '(' | ')' | '[' | ']')
}

pub fn highlight_prompt(prompt: &str) -> Cow<'_, str> {
    if prompt == "> " {
        return Cow::Owned(format!("{} ", ">".bright_green().bold()));
    }
    Cow::Borrowed(prompt)
}

pub fn highlight_hint(hint: &str) -> Cow<'_, str> {
    Cow::Owned(hint.bright_black().to_string())
}
