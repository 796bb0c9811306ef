use crate::classify::SeverityCounts;
use crate::parsing::strip_ansi;
use crate::types::Severity;

/// Lines containing this mark the log-file footer of a health-check run.
const LOG_FOOTER_MARKER: &str = "Output to";

/// Ordered health-check lines for one invocation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HealthReport {
    lines: Vec<String>,
}

impl HealthReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_response(raw: &str) -> Self {
        let mut report = Self::new();
        report.push_response(raw);
        report
    }

    /// Append the lines of another health-check response, keeping request order.
    pub fn push_response(&mut self, raw: &str) {
        self.lines.extend(strip_ansi(raw).lines().map(str::to_string));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines worth showing to an operator.
    pub fn display_lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .map(String::as_str)
            .filter(|line| !line.is_empty() && !line.contains(LOG_FOOTER_MARKER))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalStatus {
    Error,
    Warning,
    Ok,
    NoIoAborts,
    Unknown,
}

impl FinalStatus {
    pub fn severity(self) -> Severity {
        match self {
            FinalStatus::Error => Severity::Error,
            FinalStatus::Warning => Severity::Warning,
            FinalStatus::Ok | FinalStatus::NoIoAborts => Severity::Ok,
            FinalStatus::Unknown => Severity::Unknown,
        }
    }

    pub fn label(self) -> Option<&'static str> {
        match self {
            FinalStatus::Error => Some("Error"),
            FinalStatus::Warning => Some("Warning"),
            FinalStatus::Ok => Some("Ok"),
            FinalStatus::NoIoAborts => Some("No IO aborts"),
            FinalStatus::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextVerdict {
    pub status: FinalStatus,
    pub counts: SeverityCounts,
}

impl TextVerdict {
    pub fn exit_code(&self) -> i32 {
        self.status.severity().exit_code()
    }

    pub fn label(&self) -> Option<&'static str> {
        self.status.label()
    }

    /// Summary line followed by the operator-facing report lines. Empty when no signal was found.
    pub fn render(&self, report: &HealthReport, timestamp: &str) -> Vec<String> {
        let Some(label) = self.label() else {
            return Vec::new();
        };
        let mut out = vec![format!("{} - Final status: {}", timestamp, label)];
        out.extend(report.display_lines().map(str::to_string));
        out
    }
}

/// Classify every line, then pick the verdict by fixed precedence: error, warning, ok,
/// a single `none` line, otherwise unknown. Counts only decide emptiness, never rank.
pub fn evaluate(report: &HealthReport) -> TextVerdict {
    let counts = SeverityCounts::from_lines(report.lines().iter().map(String::as_str));
    let status = if counts.error > 0 {
        FinalStatus::Error
    } else if counts.warning > 0 {
        FinalStatus::Warning
    } else if counts.ok > 0 {
        FinalStatus::Ok
    } else if counts.none == 1 {
        FinalStatus::NoIoAborts
    } else {
        FinalStatus::Unknown
    };
    TextVerdict { status, counts }
}
