//! Trailing-token severity classification of health-check lines.

/// Recognized status words at the end of a health-check line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusToken {
    Ok,
    Warning,
    Error,
    Degraded,
    None,
}

const TOKENS: &[(&str, StatusToken)] = &[
    ("ok", StatusToken::Ok),
    ("warning", StatusToken::Warning),
    ("error", StatusToken::Error),
    ("degraded", StatusToken::Degraded),
    ("none", StatusToken::None),
];

/// Case-insensitive suffix match. Unrecognized endings such as `Pending` yield `None`
/// and do not take part in the verdict.
pub fn classify_line(line: &str) -> Option<StatusToken> {
    let lower = line.to_lowercase();
    TOKENS
        .iter()
        .find(|(word, _)| lower.ends_with(word))
        .map(|(_, token)| *token)
}

/// Per-bucket line counts for one report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeverityCounts {
    pub ok: usize,
    pub warning: usize,
    pub error: usize,
    pub none: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, line: &str) {
        match classify_line(line) {
            Some(StatusToken::Ok) => self.ok += 1,
            Some(StatusToken::Warning) => self.warning += 1,
            Some(StatusToken::Error) | Some(StatusToken::Degraded) => self.error += 1,
            Some(StatusToken::None) => self.none += 1,
            None => {}
        }
    }

    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = Self::default();
        for line in lines {
            counts.record(line);
        }
        counts
    }
}
