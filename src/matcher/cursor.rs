use std::sync::Arc;

/// Read position over the characters of a command string.
///
/// The characters live in a shared immutable buffer, so `clone()` only
/// copies an offset and bumps a reference count. Backtracking is done by
/// keeping a clone and restoring it; there is no undo log.
#[derive(Debug, Clone)]
pub struct Cursor {
    buffer: Arc<[char]>,
    offset: usize,
    consumed: usize,
    token_index: usize,
}

impl Cursor {
    pub fn new(input: &str) -> Self {
        Self {
            buffer: input.chars().collect(),
            offset: 0,
            consumed: 0,
            token_index: 0,
        }
    }

    /// Tag the cursor with the index of the grammar node it is handed to.
    pub fn with_token_index(mut self, token_index: usize) -> Self {
        self.token_index = token_index;
        self
    }

    /// Index of the grammar node this cursor was handed to, for building
    /// [`super::ParseError`]s inside resolvers.
    pub fn token_index(&self) -> usize {
        self.token_index
    }

    /// Number of characters consumed since the cursor was created.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    pub fn remaining(&self) -> &[char] {
        &self.buffer[self.offset..]
    }

    pub fn rest(&self) -> String {
        self.remaining().iter().collect()
    }

    pub fn peek(&self, offset: usize) -> Option<char> {
        self.remaining().get(offset).copied()
    }

    /// Remove and return the character at `offset`, shifting later
    /// characters left. Out-of-range offsets are a no-op.
    pub fn consume(&mut self, offset: usize) -> Option<char> {
        let ch = self.peek(offset)?;
        if offset == 0 {
            self.offset += 1;
        } else {
            let rest = self.remaining();
            self.buffer = rest[..offset]
                .iter()
                .chain(&rest[offset + 1..])
                .copied()
                .collect();
            self.offset = 0;
        }
        self.consumed += 1;
        Some(ch)
    }

    /// The next `n` characters without consuming them (fewer near the end).
    pub fn next_n(&self, n: usize) -> &[char] {
        let rest = self.remaining();
        &rest[..n.min(rest.len())]
    }

    pub fn consume_n(&mut self, n: usize) -> String {
        let taken: String = self.next_n(n).iter().collect();
        let count = n.min(self.remaining().len());
        self.offset += count;
        self.consumed += count;
        taken
    }

    pub fn consume_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> String {
        let count = self
            .remaining()
            .iter()
            .take_while(|&&c| predicate(c))
            .count();
        self.consume_n(count)
    }

    /// Whether the input at the cursor equals `candidate`, ignoring case.
    pub fn matches_ignore_case(&self, candidate: &str) -> bool {
        let lowered = candidate.to_lowercase();
        self.matches_lowered(candidate.chars().count(), &lowered)
    }

    /// Compare the next `len` characters against an already lowercased string.
    pub(crate) fn matches_lowered(&self, len: usize, lowered: &str) -> bool {
        let window: String = self.next_n(len).iter().collect();
        window.to_lowercase() == lowered
    }
}
