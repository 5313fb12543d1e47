//! Docker Hub image references

use crate::{DimgError, Result};
use std::fmt;

/// Namespace Docker Hub uses for official single-segment images
pub const DEFAULT_NAMESPACE: &str = "library";

/// A repository plus the tag picked for it, printed as `name:tag`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Namespaced repository (e.g., "library/redis", "nginx/ingress")
    pub repository: String,
    /// Tag (e.g., "7.2", "latest")
    pub tag: String,
}

impl ImageReference {
    pub fn new(repository: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            tag: tag.into(),
        }
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}

/// Check a raw image name as typed by the user
pub fn validate_image_name(input: &str) -> Result<()> {
    if input.is_empty() {
        return Err(DimgError::Validation("Please input Image Name".to_string()));
    }
    if input.chars().any(char::is_whitespace) {
        return Err(DimgError::Validation(
            "Image Name must not have spaces".to_string(),
        ));
    }
    Ok(())
}

/// Validate a raw image name and put it in the default namespace when it has none
pub fn normalize_image_name(input: &str) -> Result<String> {
    validate_image_name(input)?;

    if input.contains('/') {
        Ok(input.to_string())
    } else {
        Ok(format!("{}/{}", DEFAULT_NAMESPACE, input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_name() {
        let err = normalize_image_name("").unwrap_err();
        assert!(matches!(err, DimgError::Validation(_)));
        assert_eq!(err.to_string(), "Please input Image Name");
    }

    #[test]
    fn test_rejects_names_with_whitespace() {
        for input in ["red is", " redis", "redis ", "library/ redis", "redis\t"] {
            assert!(
                matches!(normalize_image_name(input), Err(DimgError::Validation(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_single_segment_gets_library_namespace() {
        for input in ["redis", "alpine", "nginx", "a"] {
            assert_eq!(
                normalize_image_name(input).unwrap(),
                format!("library/{input}")
            );
        }
    }

    #[test]
    fn test_namespaced_name_is_unchanged() {
        for input in ["nginx/ingress", "library/redis", "bitnami/postgresql", "a/b/c"] {
            assert_eq!(normalize_image_name(input).unwrap(), input);
        }
    }

    #[test]
    fn test_reference_display() {
        let reference = ImageReference::new("library/redis", "7.2");
        assert_eq!(reference.to_string(), "library/redis:7.2");
    }
}
