//! Exit codes for the ilab CLI.
//!
//! Exit codes communicate run outcome without requiring output parsing.

/// Exit codes for provisioning runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Run completed; warnings may still be present on the report.
    Success = 0,

    /// Unusable operator-side state: no active project, missing CLI tools,
    /// or a fatal error before or during provisioning.
    ConfigError = 1,

    /// The function deployment retry budget was exhausted.
    DeployExhausted = 2,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Success)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&ilab_common::Error> for ExitCode {
    fn from(err: &ilab_common::Error) -> Self {
        match err {
            ilab_common::Error::DeployExhausted { .. } => ExitCode::DeployExhausted,
            _ => ExitCode::ConfigError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ilab_common::Error;

    #[test]
    fn deploy_exhaustion_maps_to_two() {
        let err = Error::DeployExhausted { attempts: 6 };
        assert_eq!(ExitCode::from(&err), ExitCode::DeployExhausted);
        assert_eq!(ExitCode::from(&err).as_i32(), 2);
    }

    #[test]
    fn config_errors_map_to_one() {
        let err = Error::Config("no active project".to_string());
        assert_eq!(ExitCode::from(&err).as_i32(), 1);
        assert!(!ExitCode::from(&err).is_success());
    }
}
