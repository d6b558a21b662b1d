//! Configuration validation

use super::error::ConfigResult;

/// Trait for validatable configuration sections
pub trait Validatable {
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Section name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

/// Check `value` against `min..=max`; `key` is the dotted YAML path
pub(crate) fn check_range<T>(key: &str, value: T, min: T, max: T, hint: &str) -> ConfigResult<()>
where
    T: PartialOrd + ToString,
{
    if value < min || value > max {
        return Err(super::ConfigError::out_of_range(key, value, min, max, hint));
    }
    Ok(())
}
