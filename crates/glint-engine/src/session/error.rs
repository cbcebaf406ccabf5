use std::fmt;

/// Fatal session startup error.
///
/// Both variants are startup-only and terminal for the session: the caller is
/// expected to report the error and abort, not retry.
#[derive(Debug, Clone)]
pub enum SessionError {
    /// The platform window could not be created.
    WindowCreation { message: String },

    /// The GPU context (surface, adapter, or device) could not be created.
    ContextCreation { message: String },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::WindowCreation { message } => {
                write!(f, "window creation failed: {message}")
            }
            SessionError::ContextCreation { message } => {
                write!(f, "GPU context creation failed: {message}")
            }
        }
    }
}

impl std::error::Error for SessionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failing_phase() {
        let e = SessionError::WindowCreation { message: "denied".into() };
        assert!(e.to_string().contains("window creation"));

        let e = SessionError::ContextCreation { message: "no adapter".into() };
        assert!(e.to_string().contains("context creation"));
        assert!(e.to_string().contains("no adapter"));
    }
}
