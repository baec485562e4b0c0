use matlex::lexer::Lexer;
use matlex::lexer::options::LexerOptions;
use matlex::lexer::stream::ScanOutcome;
use matlex::{Token, TokenKind};

fn matrix_lexer() -> Lexer {
    let mut lexer = Lexer::new(
        "matrix",
        "[X(7);X(8);(U(1)*sin(U(2))*(cos(X(4))*sin(X(6))-cos(X(6))))/4]",
    );
    lexer.register_variable("X").unwrap();
    lexer.register_variable("U").unwrap();
    lexer.register_function("sin").unwrap();
    lexer.register_function("cos").unwrap();
    lexer
}

#[test]
fn spawned_scan_matches_pull_scan() {
    let lexer = matrix_lexer();
    let pulled: Vec<Token> = lexer.scanner().collect();

    let mut stream = lexer.spawn();
    let pushed: Vec<Token> = stream.by_ref().collect();

    assert_eq!(pushed, pulled);
    assert_eq!(pushed.last().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(stream.join(), ScanOutcome::Completed);
}

#[test]
fn spawned_scan_reports_failure() {
    let lexer = Lexer::new("bad", "1+nope");
    let mut stream = lexer.spawn();
    let kinds: Vec<_> = stream.by_ref().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Number, TokenKind::Operator, TokenKind::Error]
    );
    assert_eq!(stream.join(), ScanOutcome::Failed);
}

#[test]
fn abandoning_the_stream_stops_the_producer() {
    let input = "1+".repeat(500);
    let lexer = Lexer::new("long", input).with_options(LexerOptions::new().with_channel_capacity(2));
    let mut stream = lexer.spawn();
    assert_eq!(stream.blocking_recv().map(|t| t.kind), Some(TokenKind::Number));
    assert_eq!(stream.join(), ScanOutcome::Cancelled);
}

#[test]
fn tokens_can_be_awaited() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime should build");
    let lexer = matrix_lexer();
    let expected: Vec<Token> = lexer.scanner().collect();

    let received = runtime.block_on(async move {
        let mut stream = lexer.spawn();
        let mut received = Vec::new();
        while let Some(token) = stream.recv().await {
            received.push(token);
        }
        received
    });
    assert_eq!(received, expected);
}
