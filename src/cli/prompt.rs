//! Image name and confirmation prompts

use crate::image::reference::{normalize_image_name, validate_image_name};
use crate::{DimgError, Result};
use inquire::error::CustomUserError;
use inquire::validator::Validation;
use inquire::{Confirm, InquireError, Text};
use std::io;
use tracing::debug;

/// Map a prompt failure; Ctrl-C and Esc both abort the prompt
pub(crate) fn prompt_error(err: InquireError) -> DimgError {
    match err {
        InquireError::OperationInterrupted | InquireError::OperationCanceled => DimgError::Cancelled,
        InquireError::IO(e) => DimgError::Io(e),
        other => DimgError::Io(io::Error::new(io::ErrorKind::Other, other.to_string())),
    }
}

/// Validator for the name prompt; runs on empty input too
pub(crate) fn check_image_name(input: &str) -> std::result::Result<Validation, CustomUserError> {
    match validate_image_name(input) {
        Ok(()) => Ok(Validation::Valid),
        Err(e) => Ok(Validation::Invalid(e.to_string().into())),
    }
}

/// Ask for an image name until one validates, then normalize it
pub fn image_name() -> Result<String> {
    let input = Text::new("Image Name")
        .with_validator(check_image_name)
        .prompt()
        .map_err(prompt_error)?;

    normalize_image_name(&input)
}

/// Yes/no question defaulting to yes.
///
/// Declining and cancelling both answer `false`.
pub fn confirm(label: &str) -> bool {
    match Confirm::new(label).with_default(true).prompt() {
        Ok(answer) => answer,
        Err(e) => {
            debug!(error = %e, "confirmation aborted");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inquire::validator::ErrorMessage;

    #[test]
    fn test_interrupt_is_cancelled() {
        assert!(matches!(
            prompt_error(InquireError::OperationInterrupted),
            DimgError::Cancelled
        ));
        assert!(matches!(
            prompt_error(InquireError::OperationCanceled),
            DimgError::Cancelled
        ));
    }

    #[test]
    fn test_other_terminal_errors_are_io() {
        let err = prompt_error(InquireError::IO(io::Error::from(io::ErrorKind::BrokenPipe)));
        assert!(matches!(err, DimgError::Io(_)));

        assert!(matches!(prompt_error(InquireError::NotTTY), DimgError::Io(_)));
    }

    #[test]
    fn test_empty_name_shows_reason() {
        match check_image_name("").unwrap() {
            Validation::Invalid(message) => {
                assert_eq!(
                    message,
                    ErrorMessage::Custom("Please input Image Name".to_string())
                )
            }
            Validation::Valid => panic!("empty name accepted"),
        }
    }

    #[test]
    fn test_spaced_name_shows_reason() {
        match check_image_name("red is").unwrap() {
            Validation::Invalid(message) => {
                assert_eq!(
                    message,
                    ErrorMessage::Custom("Image Name must not have spaces".to_string())
                )
            }
            Validation::Valid => panic!("spaced name accepted"),
        }
    }

    #[test]
    fn test_valid_name_passes() {
        assert!(matches!(check_image_name("redis").unwrap(), Validation::Valid));
    }
}
