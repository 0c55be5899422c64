use crate::utils::error::{PricingError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Plan ids become file names, so only a conservative character set is accepted.
pub fn validate_plan_id(field_name: &str, plan_id: &str) -> Result<()> {
    validate_non_empty_string(field_name, plan_id)?;

    if !plan_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: plan_id.to_string(),
            reason: "Only ASCII letters, digits, '-' and '_' are allowed".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| PricingError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_plan_id() {
        assert!(validate_plan_id("plan.id", "gold-stylist_2").is_ok());
        assert!(validate_plan_id("plan.id", "").is_err());
        assert!(validate_plan_id("plan.id", "../etc/passwd").is_err());
        assert!(validate_plan_id("plan.id", "gold plan").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("pricing.rounding_target", 9u8, 0, 9).is_ok());
        assert!(validate_range("pricing.rounding_target", 10u8, 0, 9).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("output.format", "json", &["human", "json"]).is_ok());
        assert!(validate_one_of("output.format", "csv", &["human", "json"]).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(5);
        let missing: Option<i32> = None;
        assert_eq!(*validate_required_field("x", &present).unwrap(), 5);
        assert!(matches!(
            validate_required_field("pricing.base_price", &missing),
            Err(PricingError::MissingConfigError { .. })
        ));
    }
}
