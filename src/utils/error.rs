use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopicsError {
    #[error("Mount point not found: no element matches '{selector}'")]
    MountPointNotFound { selector: String },

    #[error("Action element not found: no element matches '{selector}'")]
    ActionElementNotFound { selector: String },

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Node {id} does not belong to this document")]
    InvalidNode { id: usize },

    #[error("Cannot append node {child} to node {parent}: {reason}")]
    HierarchyError {
        parent: usize,
        child: usize,
        reason: String,
    },

    #[error("Course not found: {slug}")]
    CourseNotFound { slug: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Page,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TopicsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TopicsError::MountPointNotFound { .. }
            | TopicsError::ActionElementNotFound { .. }
            | TopicsError::InvalidSelector { .. }
            | TopicsError::InvalidNode { .. }
            | TopicsError::HierarchyError { .. } => ErrorCategory::Page,
            TopicsError::CourseNotFound { .. }
            | TopicsError::ConfigValidationError { .. }
            | TopicsError::InvalidConfigValueError { .. }
            | TopicsError::MissingConfigError { .. } => ErrorCategory::Configuration,
            TopicsError::IoError(_) | TopicsError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TopicsError::CourseNotFound { .. } => ErrorSeverity::Medium,
            TopicsError::MountPointNotFound { .. }
            | TopicsError::ActionElementNotFound { .. }
            | TopicsError::InvalidSelector { .. }
            | TopicsError::ConfigValidationError { .. }
            | TopicsError::InvalidConfigValueError { .. }
            | TopicsError::MissingConfigError { .. } => ErrorSeverity::High,
            TopicsError::InvalidNode { .. }
            | TopicsError::HierarchyError { .. }
            | TopicsError::IoError(_)
            | TopicsError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            TopicsError::MountPointNotFound { selector } => {
                format!("The page has no topics container ({})", selector)
            }
            TopicsError::ActionElementNotFound { selector } => {
                format!("The page has no call-to-action button ({})", selector)
            }
            TopicsError::CourseNotFound { slug } => {
                format!("No course named '{}' in the catalog", slug)
            }
            TopicsError::IoError(e) => format!("File operation failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Page => {
                "Check the course layout selectors against the page skeleton"
            }
            ErrorCategory::Configuration => {
                "Fix the catalog file (run with --list to see available courses)"
            }
            ErrorCategory::System => "Check that the output directory is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, TopicsError>;
