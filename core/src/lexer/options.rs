use serde::Serialize;

/// Smallest channel capacity a spawned scan runs with.
pub const MIN_CHANNEL_CAPACITY: usize = 2;

/// What the scanner does with characters it has no rule for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum UnknownCharPolicy {
    /// Collect them into a plain-text token.
    #[default]
    Accumulate,
    /// Stop with an `UnknownCharacter` error.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexerOptions {
    channel_capacity: usize,
    unknown_chars: UnknownCharPolicy,
    skip_whitespace: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            channel_capacity: MIN_CHANNEL_CAPACITY,
            unknown_chars: UnknownCharPolicy::default(),
            skip_whitespace: true,
        }
    }
}

impl LexerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capacity of the bounded channel used by [`super::Lexer::spawn`].
    /// Values below 2 are raised to 2.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(MIN_CHANNEL_CAPACITY);
        self
    }

    pub fn with_unknown_chars(mut self, policy: UnknownCharPolicy) -> Self {
        self.unknown_chars = policy;
        self
    }

    /// When set, space, tab, CR and LF are discarded instead of becoming
    /// part of a plain-text token.
    pub fn with_skip_whitespace(mut self, skip: bool) -> Self {
        self.skip_whitespace = skip;
        self
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    pub fn unknown_chars(&self) -> UnknownCharPolicy {
        self.unknown_chars
    }

    pub fn skip_whitespace(&self) -> bool {
        self.skip_whitespace
    }
}
