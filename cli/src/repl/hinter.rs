use matlex::lexer::identifiers::Role;

use super::completer::word_start;

/// Suggests the rest of the only registered name matching the word under
/// the cursor.
pub fn hint_for(line: &str, pos: usize, names: &[(String, Role)]) -> Option<String> {
    if pos < line.len() || line.starts_with('.') {
        return None;
    }
    let needle = &line[word_start(line)..];
    if needle.is_empty() {
        return None;
    }

    let mut matches = names
        .iter()
        .filter(|(name, _)| name.len() > needle.len() && name.starts_with(needle));
    let (name, role) = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    let rest = &name[needle.len()..];
    Some(match role {
        Role::Function => format!("{rest}("),
        Role::Variable => rest.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_prefix_is_hinted() {
        let names = vec![
            ("cos".to_string(), Role::Function),
            ("cot".to_string(), Role::Function),
            ("sin".to_string(), Role::Function),
        ];
        assert_eq!(hint_for("1+s", 3, &names), Some("in(".to_string()));
        assert_eq!(hint_for("1+co", 4, &names), None);
        assert_eq!(hint_for("1+", 2, &names), None);
    }
}
