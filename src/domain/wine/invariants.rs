use super::entity::Wine;
use crate::domain::{DomainError, DomainResult};

/// Validates all Wine invariants
pub fn validate_wine(wine: &Wine) -> DomainResult<()> {
    validate_name(&wine.name)?;
    validate_photo_filename(wine.photo_filename.as_deref())?;
    Ok(())
}

/// Name cannot be empty
fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Wine name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// A photo reference is a bare file name inside the photo store
fn validate_photo_filename(filename: Option<&str>) -> DomainResult<()> {
    if let Some(name) = filename {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(DomainError::InvariantViolation(format!(
                "Invalid photo filename: {}",
                name
            )));
        }
    }
    Ok(())
}

/// Invariants that must hold true for the Wine domain:
///
/// 1. Identity (UUID) is unique and immutable
/// 2. Name cannot be empty; producer may be
/// 3. Created timestamp never changes
/// 4. A Wine exclusively owns its Tastings
/// 5. A Wine may exist without tastings or a photo

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wine::WineFields;

    #[test]
    fn test_valid_wine() {
        let wine = Wine::new(WineFields::named("Grande Cuvée"));
        assert!(validate_wine(&wine).is_ok());
    }

    #[test]
    fn test_empty_name_fails() {
        let wine = Wine::new(WineFields::named("   "));
        assert!(validate_wine(&wine).is_err());
    }

    #[test]
    fn test_empty_producer_is_fine() {
        let wine = Wine::new(WineFields {
            name: "House Red".to_string(),
            producer: String::new(),
            ..WineFields::default()
        });
        assert!(validate_wine(&wine).is_ok());
    }

    #[test]
    fn test_photo_path_traversal_fails() {
        let mut wine = Wine::new(WineFields::named("A"));
        wine.photo_filename = Some("../etc/passwd".to_string());
        assert!(validate_wine(&wine).is_err());
    }
}
