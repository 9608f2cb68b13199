use crate::domain::error::DomainError;

/// Longest name npm accepts for a package.
pub const MAX_NAME_LEN: usize = 214;

/// Names npm refuses outright.
const RESERVED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

/// Centralized domain validation.
///
/// Field-level rules live here; cross-field rules live on the entity that
/// owns the fields (`ProjectConfig::validate`).
pub struct DomainValidator;

impl DomainValidator {
    /// A project name doubles as the root directory name and as the package
    /// name of every generated manifest, so it must satisfy both.
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(invalid("name is longer than 214 characters"));
        }
        if RESERVED_NAMES.contains(&name) {
            return Err(invalid("name is reserved"));
        }

        let starts_ok = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        if !starts_ok {
            return Err(invalid("name must start with a lowercase letter or digit"));
        }
        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || "-_.".contains(*c)))
        {
            return Err(invalid(&format!("character '{bad}' is not allowed")));
        }

        Ok(())
    }

    /// Parse a user-supplied port string.
    pub fn parse_port(raw: &str) -> Result<u16, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidPort {
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        let value: u32 = raw
            .trim()
            .parse()
            .map_err(|_| invalid("not a whole number"))?;
        let port = u16::try_from(value).map_err(|_| invalid("must be at most 65535"))?;
        Self::validate_port(port)?;
        Ok(port)
    }

    pub fn validate_port(port: u16) -> Result<(), DomainError> {
        if port == 0 {
            return Err(DomainError::InvalidPort {
                value: port.to_string(),
                reason: "must be between 1 and 65535".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_names() {
        for name in ["demo-api", "demo-web", "my_shop", "store2", "a", "v1.2"] {
            assert!(DomainValidator::validate_project_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_bad_names() {
        for name in ["", "My-App", "-leading", ".hidden", "has space", "a/b", "node_modules"] {
            assert!(
                DomainValidator::validate_project_name(name).is_err(),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_overlong_names() {
        let name = "a".repeat(MAX_NAME_LEN + 1);
        assert!(DomainValidator::validate_project_name(&name).is_err());
        assert!(DomainValidator::validate_project_name(&name[..MAX_NAME_LEN]).is_ok());
    }

    #[test]
    fn parses_ports_in_range() {
        assert_eq!(DomainValidator::parse_port("4000").unwrap(), 4000);
        assert_eq!(DomainValidator::parse_port(" 1 ").unwrap(), 1);
        assert_eq!(DomainValidator::parse_port("65535").unwrap(), 65535);
    }

    #[test]
    fn rejects_out_of_range_ports() {
        for raw in ["0", "65536", "-1", "http", ""] {
            assert!(
                matches!(
                    DomainValidator::parse_port(raw),
                    Err(DomainError::InvalidPort { .. })
                ),
                "{raw:?}"
            );
        }
    }
}
