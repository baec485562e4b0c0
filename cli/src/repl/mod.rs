mod completer;
mod helper;
mod highlighter;
mod hinter;

use matlex::lexer::identifiers::Role;
use matlex::{Engine, Token, TokenKind};
use owo_colors::OwoColorize;
use rustyline::error::ReadlineError;
use rustyline::{Config, EditMode, Editor};

use self::helper::ReplHelper;

/// A REPL command line, i.e. one starting with `.`.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Var(&'a str),
    Func(&'a str),
    Names,
    Clear,
    Help,
    Exit,
}

/// `None` for lines that are expressions.
fn parse_command(line: &str) -> Option<Result<Command<'_>, String>> {
    if !line.starts_with('.') {
        return None;
    }
    let mut parts = line.split_whitespace();
    let head = parts.next()?;
    let arg = parts.next();
    let command = match (head, arg) {
        (".var", Some(name)) => Ok(Command::Var(name)),
        (".func", Some(name)) => Ok(Command::Func(name)),
        (".var" | ".func", None) => Err(format!("usage: {head} NAME")),
        (".names", _) => Ok(Command::Names),
        (".clear", _) => Ok(Command::Clear),
        (".help", _) => Ok(Command::Help),
        (".exit", _) => Ok(Command::Exit),
        _ => Err(format!("unknown command '{head}', try .help")),
    };
    Some(command)
}

/// Names registered from the command line survive `.clear`; names added in
/// the session do not.
struct Session {
    base: Engine,
    engine: Engine,
}

impl Session {
    fn new(engine: Engine) -> Self {
        Self {
            base: engine.clone(),
            engine,
        }
    }

    fn register(&mut self, name: &str, role: Role) -> Result<(), matlex::errors::RegistryError> {
        let engine = self.engine.clone();
        self.engine = match role {
            Role::Variable => engine.with_variable(name)?,
            Role::Function => engine.with_function(name)?,
        };
        Ok(())
    }

    fn names(&self) -> Vec<(String, Role)> {
        self.engine
            .registry()
            .entries()
            .into_iter()
            .map(|(name, role)| (name.to_string(), role))
            .collect()
    }

    /// Tokens up to the terminal one, and the scan error if there was one.
    fn tokenize(&self, line: &str) -> (Vec<Token>, Option<matlex::errors::ScanError>) {
        let lexer = self.engine.lexer("<repl>", line);
        let mut scanner = lexer.scanner();
        let tokens = scanner
            .by_ref()
            .filter(|t| !t.is_terminal())
            .collect();
        (tokens, scanner.take_error())
    }
}

pub fn run(engine: Engine) -> Result<(), ReadlineError> {
    let config = Config::builder()
        .history_ignore_dups(true)?
        .completion_type(rustyline::CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut rl: Editor<ReplHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    let mut session = Session::new(engine);
    rl.set_helper(Some(ReplHelper::new(session.names())));

    println!(
        "{} {}",
        "matlex".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
    println!("{}", "Type .help for REPL commands".bright_black());

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match parse_command(trimmed) {
                    Some(Ok(Command::Exit)) => break,
                    Some(Ok(command)) => {
                        handle_command(command, &mut session);
                        if let Some(helper) = rl.helper_mut() {
                            helper.set_names(session.names());
                        }
                    }
                    Some(Err(message)) => eprintln!("{} {message}", "error:".red().bold()),
                    None => print_tokens(&session, trimmed),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "bye".bright_black());
                break;
            }
            Err(err) => {
                eprintln!("{} {err}", "repl error:".red().bold());
                break;
            }
        }
    }

    Ok(())
}

fn handle_command(command: Command<'_>, session: &mut Session) {
    match command {
        Command::Var(name) => register(session, name, Role::Variable),
        Command::Func(name) => register(session, name, Role::Function),
        Command::Names => {
            let names = session.names();
            if names.is_empty() {
                println!("{}", "no names registered".bright_black());
            }
            for (name, role) in names {
                println!("  {:<12} {}", name.bright_white(), role.bright_black());
            }
        }
        Command::Clear => {
            session.engine = session.base.clone();
            println!("{}", "session names cleared".green());
        }
        Command::Help => {
            println!("{}", ".var NAME            register a variable".bright_blue());
            println!("{}", ".func NAME           register a function".bright_blue());
            println!("{}", ".names               list registered names".bright_blue());
            println!("{}", ".clear               forget session names".bright_blue());
            println!("{}", ".help                show commands".bright_blue());
            println!("{}", ".exit                exit REPL".bright_blue());
        }
        Command::Exit => {}
    }
}

fn register(session: &mut Session, name: &str, role: Role) {
    match session.register(name, role) {
        Ok(()) => println!("{} {}", role.to_string().green(), name.bright_white()),
        Err(err) => eprintln!("{} {err}", "error:".red().bold()),
    }
}

fn print_tokens(session: &Session, line: &str) {
    let (tokens, error) = session.tokenize(line);
    for token in tokens.iter().filter(|t| t.kind != TokenKind::Text) {
        println!("  {:<14} {}", token.kind.name().bright_black(), token.text);
    }
    let skipped = tokens.iter().filter(|t| t.kind == TokenKind::Text).count();
    if skipped > 0 {
        println!("{}", format!("  ({skipped} text skipped)").bright_black());
    }
    if let Some(err) = error {
        let report = miette::Report::new(err).with_source_code(line.to_string());
        eprintln!("{report:?}");
    }
}

/// Whether `source` still has an open `(` or `[`.
pub fn needs_more_input(source: &str) -> bool {
    let mut parens = 0i32;
    let mut brackets = 0i32;
    for ch in source.chars() {
        match ch {
            '(' => parens += 1,
            ')' => parens -= 1,
            '[' => brackets += 1,
            ']' => brackets -= 1,
            _ => {}
        }
    }
    parens > 0 || brackets > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse() {
        assert_eq!(parse_command(".var X"), Some(Ok(Command::Var("X"))));
        assert_eq!(parse_command(".func sin"), Some(Ok(Command::Func("sin"))));
        assert_eq!(parse_command(".names"), Some(Ok(Command::Names)));
        assert_eq!(parse_command(".exit"), Some(Ok(Command::Exit)));
        assert!(matches!(parse_command(".var"), Some(Err(_))));
        assert!(matches!(parse_command(".bogus"), Some(Err(_))));
        assert_eq!(parse_command("X(1)"), None);
    }

    #[test]
    fn session_names_and_clear() {
        let base = Engine::new().with_variable("X").unwrap();
        let mut session = Session::new(base);
        session.register("sin", Role::Function).unwrap();
        assert!(session.register("X", Role::Function).is_err());
        assert_eq!(session.names().len(), 2);

        let (tokens, error) = session.tokenize("sin(X)");
        assert!(error.is_none());
        assert_eq!(tokens[0].kind, TokenKind::Function);

        handle_command(Command::Clear, &mut session);
        assert_eq!(session.names(), vec![("X".to_string(), Role::Variable)]);
        let (_, error) = session.tokenize("sin(X)");
        assert!(error.is_some());
    }

    #[test]
    fn open_brackets_need_more_input() {
        assert!(needs_more_input("sin(X(1)"));
        assert!(needs_more_input("[1;2"));
        assert!(!needs_more_input("[1;2]"));
        assert!(!needs_more_input("X(1))"));
    }
}
