use rowan::TextRange;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// When two diagnostics overlap, the higher-priority one suppresses the
/// lower-priority one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Unclosed constructs swallow everything after them
    UnterminatedDefinition,
    UnclosedIf,
    UnclosedDo,

    // User omitted something required
    ExpectedDefName,
    ExpectedStackComment,

    // User wrote something that doesn't belong
    NestedDefinition,
    UnmatchedTerminator,
    StrayStackComment,
    UnexpectedToken,
    IntegerOverflow,

    // Valid syntax, invalid semantics
    DuplicateDefinition,
    UndefinedReference,

    // Static checks
    BranchEffectMismatch,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::BranchEffectMismatch => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Uses enum discriminant ordering: lower position = higher priority.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    /// Unclosed constructs. Suppressed by root-cause errors at the same position.
    pub fn is_structural_error(&self) -> bool {
        matches!(
            self,
            Self::UnterminatedDefinition | Self::UnclosedIf | Self::UnclosedDo
        )
    }

    pub fn is_root_cause_error(&self) -> bool {
        matches!(self, Self::ExpectedDefName | Self::ExpectedStackComment)
    }

    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::ExpectedStackComment => Some("e.g., `: square ( n -- n*n ) dup * ;`"),
            Self::NestedDefinition => Some("definitions are only allowed at the top level"),
            Self::IntegerOverflow => Some("literals must fit in a signed 32-bit cell"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnterminatedDefinition => "missing `;`",
            Self::UnclosedIf => "missing `then`",
            Self::UnclosedDo => "missing `loop`",

            Self::ExpectedDefName => "expected definition name",
            Self::ExpectedStackComment => "expected stack comment",

            Self::NestedDefinition => "definitions cannot be nested",
            Self::UnmatchedTerminator => "terminator without opener",
            Self::StrayStackComment => "stack comment outside definition header",
            Self::UnexpectedToken => "unexpected token",
            Self::IntegerOverflow => "integer literal out of range",

            Self::DuplicateDefinition => "duplicate definition",
            Self::UndefinedReference => "undefined reference",

            Self::BranchEffectMismatch => "branches leave different stack depths",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::DuplicateDefinition => "`{}` is already defined".to_string(),
            Self::UndefinedReference => "`{}` is not defined".to_string(),
            Self::UnmatchedTerminator => "{}".to_string(),
            Self::IntegerOverflow => "integer literal `{}` does not fit in 32 bits".to_string(),

            Self::UnterminatedDefinition | Self::UnclosedIf | Self::UnclosedDo => {
                format!("{}; {{}}", self.fallback_message())
            }

            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            message: message.into(),
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
