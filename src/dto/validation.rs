//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that a player name is not blank and holds no control characters.
///
/// Length limits are enforced by the `length` validator on the field itself.
///
/// # Examples
///
/// ```ignore
/// validate_player_name("Ada")      // Ok
/// validate_player_name("   ")      // Err - blank
/// validate_player_name("Ada\n")    // Err - control character
/// ```
pub fn validate_player_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("player_name_blank");
        err.message = Some("Player name must not be blank".into());
        return Err(err);
    }

    if name.chars().any(char::is_control) {
        let mut err = ValidationError::new("player_name_format");
        err.message = Some("Player name must not contain control characters".into());
        return Err(err);
    }

    Ok(())
}
