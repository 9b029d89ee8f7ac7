/// Phase of the pipeline that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticPhase {
    Lexer,
    Parser,
    Translation,
    Definitions,
    Configuration,
}

/// Severity of a behavior diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

/// 1-indexed line/column inside a behavior string or definitions file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Structured diagnostic suitable for batch reports and tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorDiagnostic {
    pub phase: DiagnosticPhase,
    pub level: DiagnosticLevel,
    pub code: &'static str,
    pub message: String,
    pub position: Option<SourcePosition>,
}

impl BehaviorDiagnostic {
    pub fn new(
        phase: DiagnosticPhase,
        level: DiagnosticLevel,
        code: &'static str,
        message: impl Into<String>,
        position: Option<SourcePosition>,
    ) -> Self {
        Self {
            phase,
            level,
            code,
            message: message.into(),
            position,
        }
    }

    pub fn error(
        phase: DiagnosticPhase,
        code: &'static str,
        message: impl Into<String>,
        position: Option<SourcePosition>,
    ) -> Self {
        Self::new(phase, DiagnosticLevel::Error, code, message, position)
    }

    pub fn format_human(&self) -> String {
        let location = self
            .position
            .map(|pos| format!("{}:{}", pos.line, pos.column))
            .unwrap_or_else(|| "<unknown>".to_string());
        format!(
            "{level:?} {code}: {message} @ {location}",
            level = self.level,
            code = self.code,
            message = self.message,
            location = location
        )
    }
}
