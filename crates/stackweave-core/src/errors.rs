use thiserror::Error;

/// Result type alias using StackError
pub type Result<T> = std::result::Result<T, StackError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on without
/// parsing messages. All kinds describe deterministic, input-derived faults:
/// none of them is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Template
    MalformedTemplate,
    RecursiveParameter,

    // Composition
    OrderingConflict,
    DuplicateAddon,
    UnknownAddon,

    // Configuration
    InvalidPlan,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedTemplate => "ERR_MALFORMED_TEMPLATE",
            ExErrorKind::RecursiveParameter => "ERR_RECURSIVE_PARAMETER",
            ExErrorKind::OrderingConflict => "ERR_ORDERING_CONFLICT",
            ExErrorKind::DuplicateAddon => "ERR_DUPLICATE_ADDON",
            ExErrorKind::UnknownAddon => "ERR_UNKNOWN_ADDON",
            ExErrorKind::InvalidPlan => "ERR_INVALID_PLAN",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever context the caller needs to fix
/// the input: the offending marker, or the addon names involved.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    marker: Option<String>,
    addon: Option<String>,
    message: String,
    related: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            marker: None,
            addon: None,
            message: String::new(),
            related: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add marker context
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    /// Add addon context
    pub fn with_addon(mut self, addon: impl Into<String>) -> Self {
        self.addon = Some(addon.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add related addon names (the members of an ordering cycle)
    pub fn with_related(mut self, names: Vec<String>) -> Self {
        self.related = Some(names);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    pub fn addon(&self) -> Option<&str> {
        self.addon.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn related(&self) -> Option<&[String]> {
        self.related.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(marker) = &self.marker {
            write!(f, " (marker: {})", marker)?;
        }
        if let Some(addon) = &self.addon {
            write!(f, " (addon: {})", addon)?;
        }
        if let Some(related) = &self.related {
            write!(f, " (addons: {})", related.join(" -> "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for stackweave operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StackError {
    // ===== Template Errors =====
    /// A start token has no matching end token after it
    #[error("Malformed template: marker '{marker}' has unmatched token '{token}'")]
    MalformedTemplate { marker: String, token: String },

    /// A parameter value contains a placeholder for a bound key
    #[error("Recursive parameter: value of '{key}' contains a bound placeholder")]
    RecursiveParameter { key: String },

    // ===== Composition Errors =====
    /// Ordering hints form a cycle
    #[error("Ordering conflict: addons form a cycle: {}", addons.join(" -> "))]
    OrderingConflict { addons: Vec<String> },

    /// Two units share a name
    #[error("Duplicate addon: {name}")]
    DuplicateAddon { name: String },

    /// An ordering hint names an addon that is not in the unit set
    #[error("Addon {addon} is ordered relative to unknown addon {missing}")]
    UnknownAddon { addon: String, missing: String },

    // ===== Configuration Errors =====
    /// Plan file failed to parse or validate
    #[error("Invalid plan: {reason}")]
    InvalidPlan { reason: String },

    // ===== Generic Errors =====
    /// Reading or writing a file failed
    #[error("Cannot access {path}: {message}")]
    Io { path: String, message: String },

    /// Serialization error (JSON/YAML encoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<StackError> for ExError {
    fn from(err: StackError) -> Self {
        match err {
            StackError::MalformedTemplate { marker, token } => {
                ExError::new(ExErrorKind::MalformedTemplate)
                    .with_op("render")
                    .with_marker(marker)
                    .with_message(format!("Unmatched token '{}'", token))
            }

            StackError::RecursiveParameter { key } => {
                ExError::new(ExErrorKind::RecursiveParameter)
                    .with_op("render")
                    .with_message(format!("Value of '{}' would change on a second pass", key))
            }

            StackError::OrderingConflict { addons } => {
                ExError::new(ExErrorKind::OrderingConflict)
                    .with_op("compose")
                    .with_message("Ordering hints form a cycle")
                    .with_related(addons)
            }

            StackError::DuplicateAddon { name } => ExError::new(ExErrorKind::DuplicateAddon)
                .with_op("compose")
                .with_addon(name)
                .with_message("Addon name is not unique"),

            StackError::UnknownAddon { addon, missing } => {
                ExError::new(ExErrorKind::UnknownAddon)
                    .with_op("compose")
                    .with_addon(addon)
                    .with_message(format!("Ordering hint references unknown addon {}", missing))
            }

            StackError::InvalidPlan { reason } => ExError::new(ExErrorKind::InvalidPlan)
                .with_op("parse_plan")
                .with_message(reason),

            StackError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_message(format!("{}: {}", path, message)),

            StackError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for StackError {
    fn from(err: serde_json::Error) -> Self {
        StackError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for StackError {
    fn from(err: serde_yaml::Error) -> Self {
        StackError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::MalformedTemplate, "ERR_MALFORMED_TEMPLATE"),
            (ExErrorKind::OrderingConflict, "ERR_ORDERING_CONFLICT"),
            (ExErrorKind::DuplicateAddon, "ERR_DUPLICATE_ADDON"),
            (ExErrorKind::UnknownAddon, "ERR_UNKNOWN_ADDON"),
            (ExErrorKind::InvalidPlan, "ERR_INVALID_PLAN"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_ex_error_related_none_by_default() {
        let err = ExError::new(ExErrorKind::OrderingConflict);
        assert!(err.related().is_none());
    }

    #[test]
    fn test_ordering_conflict_display_lists_cycle() {
        let err = StackError::OrderingConflict {
            addons: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(
            err.to_string(),
            "Ordering conflict: addons form a cycle: a -> b -> a"
        );
    }
}
