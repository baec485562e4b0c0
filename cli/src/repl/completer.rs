use matlex::lexer::identifiers::Role;
use rustyline::completion::Pair;

const COMMANDS: [&str; 6] = [".var", ".func", ".names", ".clear", ".help", ".exit"];

/// Completes REPL commands at the start of a line and registered names
/// elsewhere. Functions complete with their opening parenthesis.
pub fn complete_line(line: &str, pos: usize, names: &[(String, Role)]) -> (usize, Vec<Pair>) {
    let safe_pos = pos.min(line.len());
    let prefix = &line[..safe_pos];

    if prefix.starts_with('.') && !prefix.contains(char::is_whitespace) {
        let commands = COMMANDS
            .iter()
            .filter(|c| c.starts_with(prefix))
            .map(|c| pair(c, c.to_string()))
            .collect();
        return (0, commands);
    }

    let start = word_start(prefix);
    let needle = &prefix[start..];
    let candidates = names
        .iter()
        .filter(|(name, _)| name.starts_with(needle))
        .map(|(name, role)| match role {
            Role::Function => pair(name, format!("{name}(")),
            Role::Variable => pair(name, name.clone()),
        })
        .collect();

    (start, candidates)
}

fn pair(display: &str, replacement: String) -> Pair {
    Pair {
        display: display.to_string(),
        replacement,
    }
}

pub fn word_start(prefix: &str) -> usize {
    prefix
        .char_indices()
        .rev()
        .find(|(_, ch)| !ch.is_ascii_alphanumeric())
        .map_or(0, |(idx, ch)| idx + ch.len_utf8())
}
