use crate::health::{HealthReport, StructuredVerdict, TextVerdict};

/// What one invocation prints to stdout, and the exit code that goes with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub lines: Vec<String>,
    pub exit_code: i32,
}

impl ProbeReport {
    /// Performance data always exits 0.
    pub fn perf_data(line: String) -> Self {
        Self {
            lines: vec![line],
            exit_code: 0,
        }
    }

    pub fn from_text_verdict(verdict: &TextVerdict, report: &HealthReport, timestamp: &str) -> Self {
        Self {
            lines: verdict.render(report, timestamp),
            exit_code: verdict.exit_code(),
        }
    }

    pub fn from_structured_verdict(verdict: StructuredVerdict) -> Self {
        let exit_code = verdict.exit_code();
        Self {
            lines: verdict.lines,
            exit_code,
        }
    }

    /// Print every line to stdout.
    pub fn emit(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }
}
