//! Error formatting and exit codes for CLI output

/// Format an error for user display, adding the first cause when it says
/// something the top-level message does not
#[must_use]
pub fn format_error(err: &anyhow::Error) -> String {
    let msg = err.to_string();
    match err.source().map(ToString::to_string) {
        Some(source) if !source.is_empty() && !msg.contains(&source) => {
            format!("{msg}\nCause: {source}")
        }
        _ => msg,
    }
}

/// Exit code for an error
///
/// # Exit Codes
/// * 1 - Invalid parameters, configuration or input files
/// * 2 - Artifact IO failure, or an error without a core category
/// * 3 - Entity or artifact not found
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<seating_core::Error>()
        .map_or(2, seating_core::Error::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_core_errors_keep_their_code() {
        let err = anyhow::Error::new(seating_core::Error::not_found("T99"));
        assert_eq!(exit_code(&err), 3);

        let wrapped: anyhow::Result<()> =
            Err(seating_core::Error::configuration("bad")).context("while generating");
        assert!(wrapped.as_ref().is_err_and(|e| exit_code(e) == 1));
    }

    #[test]
    fn test_other_errors_are_system_errors() {
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 2);
    }

    #[test]
    fn test_format_includes_new_cause() {
        let err =
            anyhow::Error::new(seating_core::Error::io("disk full")).context("writing layout");
        assert_eq!(format_error(&err), "writing layout\nCause: IO error: disk full");
    }
}
