use std::panic;
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc;

use super::Lexer;
use super::token::{Token, TokenKind};

/// How a spawned scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Delivered every token through `Eof`.
    Completed,
    /// Delivered an `Error` token and stopped.
    Failed,
    /// The consumer went away before the terminal token was delivered.
    Cancelled,
}

/// Receiving end of a scan running on its own thread.
///
/// Tokens arrive in input order. Dropping the stream cancels the producer,
/// which notices on its next send and exits.
pub struct TokenStream {
    receiver: mpsc::Receiver<Token>,
    producer: JoinHandle<ScanOutcome>,
}

pub(super) fn spawn(lexer: Lexer) -> TokenStream {
    let (sender, receiver) = mpsc::channel(lexer.options().channel_capacity());
    let producer = thread::spawn(move || produce(&lexer, &sender));
    TokenStream { receiver, producer }
}

fn produce(lexer: &Lexer, sender: &mpsc::Sender<Token>) -> ScanOutcome {
    let mut outcome = ScanOutcome::Completed;
    for token in lexer.scanner() {
        if token.kind == TokenKind::Error {
            outcome = ScanOutcome::Failed;
        }
        if sender.blocking_send(token).is_err() {
            tracing::warn!(source = %lexer.name(), "token stream dropped before the scan finished");
            return ScanOutcome::Cancelled;
        }
    }
    tracing::debug!(source = %lexer.name(), ?outcome, "scan finished");
    outcome
}

impl TokenStream {
    /// Waits for the next token. Must not be called from async code.
    pub fn blocking_recv(&mut self) -> Option<Token> {
        self.receiver.blocking_recv()
    }

    pub async fn recv(&mut self) -> Option<Token> {
        self.receiver.recv().await
    }

    /// Stops listening and waits for the producer to exit.
    pub fn join(self) -> ScanOutcome {
        let TokenStream {
            mut receiver,
            producer,
        } = self;
        receiver.close();
        drop(receiver);
        match producer.join() {
            Ok(outcome) => outcome,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.blocking_recv()
    }
}
