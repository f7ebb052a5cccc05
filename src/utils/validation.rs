// file: src/utils/validation.rs
// description: configuration value validation helpers
// reference: input validation patterns

use crate::error::{Result, ServerError};

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_port(port: u16) -> Result<()> {
        if port == 0 {
            return Err(ServerError::Validation("Port cannot be 0".to_string()));
        }
        Ok(())
    }

    pub fn validate_not_empty(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ServerError::Validation(format!("{} is empty", field)));
        }
        Ok(())
    }

    /// Strips a leading slash so the path can be joined as URL segments.
    pub fn sanitize_repo_path(path: &str) -> &str {
        path.strip_prefix('/').unwrap_or(path)
    }
}
