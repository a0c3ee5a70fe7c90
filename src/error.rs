//! Error types for pipeline assembly and port access

use thiserror::Error;

/// Errors raised while wiring or reading task ports
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("job '{job}' expects input of type {expected}, but the wired port holds {found}")]
    TypeMismatch {
        job: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("job '{job}' was wired to an empty port")]
    EmptyInput { job: String },
    #[error("port holds {found}, read as {expected}")]
    VaryingTypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("port is empty")]
    EmptyVarying,
    #[error("a job named '{0}' already exists in the pipeline")]
    DuplicateJobName(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TaskError::EmptyVarying;
        assert_eq!(err.to_string(), "port is empty");

        let err = TaskError::TypeMismatch {
            job: "cull".to_string(),
            expected: "u32",
            found: "f32",
        };
        assert_eq!(
            err.to_string(),
            "job 'cull' expects input of type u32, but the wired port holds f32"
        );
    }
}
