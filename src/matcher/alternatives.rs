use super::Cursor;

/// Pick the longest alternative matching the input at `cursor`, ignoring
/// case. Equal lengths resolve to the earliest alternative.
pub(crate) fn longest_match<'a>(cursor: &Cursor, values: &'a [String]) -> Option<&'a str> {
    let mut best: Option<(&str, usize)> = None;
    for value in values {
        if !cursor.matches_ignore_case(value) {
            continue;
        }
        let len = value.chars().count();
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((value.as_str(), len));
        }
    }
    best.map(|(value, _)| value)
}

/// Alternatives prepared for repeated matching: lowercased, sorted by
/// descending length so the first hit is the longest one.
#[derive(Debug, Clone)]
pub(crate) struct Alternatives {
    candidates: Vec<Candidate>,
    expected: String,
}

#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub value: String,
    pub len: usize,
    lowered: String,
}

impl Alternatives {
    pub fn new(values: &[String]) -> Self {
        let mut candidates: Vec<Candidate> = values
            .iter()
            .map(|value| Candidate {
                value: value.clone(),
                len: value.chars().count(),
                lowered: value.to_lowercase(),
            })
            .collect();
        // stable: equal lengths keep declaration order
        candidates.sort_by(|a, b| b.len.cmp(&a.len));
        Self {
            candidates,
            expected: values.join(" or "),
        }
    }

    pub fn first_match(&self, cursor: &Cursor) -> Option<&Candidate> {
        self.candidates
            .iter()
            .find(|c| cursor.matches_lowered(c.len, &c.lowered))
    }

    /// The alternatives in declaration order joined with " or ".
    pub fn expected(&self) -> &str {
        &self.expected
    }
}
