use std::process::ExitCode;

/// Errors that cause grue to exit with a specific code.
#[derive(Debug, thiserror::Error)]
pub enum ExitError {
    #[error("config error: {0}")]
    Config(String),

    #[error("history store {path}: {message}")]
    Store { path: String, message: String },

    #[error("{0}")]
    Other(String),
}

impl ExitError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) => ExitCode::from(2),
            Self::Store { .. } => ExitCode::from(3),
            Self::Other(_) => ExitCode::from(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(err: &ExitError) -> String {
        format!("{:?}", err.exit_code())
    }

    #[test]
    fn exit_codes_are_distinct() {
        let expected = |n: u8| format!("{:?}", ExitCode::from(n));
        assert_eq!(code(&ExitError::Config("x".into())), expected(2));
        assert_eq!(
            code(&ExitError::Store {
                path: "/tmp/x".into(),
                message: "bad".into()
            }),
            expected(3)
        );
        assert_eq!(code(&ExitError::Other("x".into())), expected(1));
    }

    #[test]
    fn store_error_message_names_path() {
        let err = ExitError::Store {
            path: "/home/me/.grue.json".into(),
            message: "corrupt".into(),
        };
        assert_eq!(err.to_string(), "history store /home/me/.grue.json: corrupt");
    }
}
