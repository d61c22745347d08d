//! Default implementation of the task request validator.

use crate::task::{
    domain::TaskRequest,
    ports::{TaskRequestValidator, TaskValidationConfig, ValidationResult},
    validation::rules,
};

/// Default task request validator.
///
/// Rules run in field order and the first violation is returned. The title
/// is trimmed before it is handed back.
///
/// # Examples
///
/// ```
/// use tasktrack::task::domain::TaskRequest;
/// use tasktrack::task::ports::TaskRequestValidator;
/// use tasktrack::task::validation::DefaultTaskValidator;
///
/// let validator = DefaultTaskValidator::new();
/// let validated = validator
///     .validate(TaskRequest::new("  Buy milk "))
///     .expect("valid request");
/// assert_eq!(validated.title(), "Buy milk");
/// assert!(validator.validate(TaskRequest::new("   ")).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefaultTaskValidator {
    config: TaskValidationConfig,
}

impl DefaultTaskValidator {
    /// Creates a new validator with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new validator with custom limits.
    #[must_use]
    pub const fn with_config(config: TaskValidationConfig) -> Self {
        Self { config }
    }

    /// Returns the current validation limits.
    #[must_use]
    pub const fn config(&self) -> &TaskValidationConfig {
        &self.config
    }
}

impl TaskRequestValidator for DefaultTaskValidator {
    fn validate(&self, request: TaskRequest) -> ValidationResult<TaskRequest> {
        rules::validate_title_present(request.title())?;
        let (title, description) = request.into_parts();
        let trimmed_title = title.trim();
        rules::validate_title_length(trimmed_title, &self.config)?;
        rules::validate_description_length(description.as_deref(), &self.config)?;

        let normalized = TaskRequest::new(trimmed_title);
        Ok(match description {
            Some(text) => normalized.with_description(text),
            None => normalized,
        })
    }
}
