//! Folder name rules.

use crate::error::CoreError;

/// Normalise a folder name typed by the user.
///
/// Surrounding whitespace is dropped; a name that is empty afterwards is
/// rejected. Names are not required to be unique.
pub fn validate_folder_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::Validation(
            "Folder name must not be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}
