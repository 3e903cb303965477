use serde_json::Value;

use crate::error::InputValidationError;
use crate::models::PackageRecord;

/// Parse a JSON payload of the form
/// `{"packages": [{"package": "...", "version": "...", "license": ["..."]}]}`.
///
/// Only the first declared license of each package is kept.
pub fn parse_payload(json: &str) -> Result<Vec<PackageRecord>, InputValidationError> {
    let value: Value = serde_json::from_str(json)?;
    records_from_value(&value)
}

fn records_from_value(value: &Value) -> Result<Vec<PackageRecord>, InputValidationError> {
    let packages = value
        .get("packages")
        .and_then(Value::as_array)
        .ok_or(InputValidationError::MissingPackages)?;

    if packages.is_empty() {
        return Err(InputValidationError::NoPackages);
    }

    packages
        .iter()
        .enumerate()
        .map(|(index, pkg)| parse_record(index, pkg))
        .collect()
}

fn parse_record(index: usize, pkg: &Value) -> Result<PackageRecord, InputValidationError> {
    let field = |name: &'static str| {
        pkg.get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(InputValidationError::MissingField { index, field: name })
    };

    let package = field("package")?;
    let version = field("version")?;

    let licenses = pkg
        .get("license")
        .and_then(Value::as_array)
        .ok_or(InputValidationError::MissingField {
            index,
            field: "license",
        })?;
    let license = match licenses.first() {
        None => return Err(InputValidationError::EmptyLicenseList { index }),
        Some(first) => first
            .as_str()
            .map(str::to_string)
            .ok_or(InputValidationError::MissingField {
                index,
                field: "license",
            })?,
    };

    Ok(PackageRecord {
        package,
        version,
        license,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payload_keeps_first_license() {
        let content = r#"{
            "packages": [
                {"package": "serde", "version": "1.0.150", "license": ["MIT", "APACHE"]},
                {"package": "readline", "version": "8.2", "license": ["GPL V3+"]}
            ]
        }"#;

        let records = parse_payload(content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].package, "serde");
        assert_eq!(records[0].license, "MIT");
        assert_eq!(records[1].version, "8.2");
        assert_eq!(records[1].license, "GPL V3+");
    }

    #[test]
    fn test_missing_packages() {
        assert!(matches!(
            parse_payload(r#"{"deps": []}"#),
            Err(InputValidationError::MissingPackages)
        ));
    }

    #[test]
    fn test_empty_packages() {
        assert!(matches!(
            parse_payload(r#"{"packages": []}"#),
            Err(InputValidationError::NoPackages)
        ));
    }

    #[test]
    fn test_missing_version_names_record() {
        let content = r#"{"packages": [
            {"package": "a", "version": "1", "license": ["MIT"]},
            {"package": "b", "license": ["MIT"]}
        ]}"#;
        assert!(matches!(
            parse_payload(content),
            Err(InputValidationError::MissingField { index: 1, field: "version" })
        ));
    }

    #[test]
    fn test_license_must_be_non_empty_list() {
        let empty = r#"{"packages": [{"package": "a", "version": "1", "license": []}]}"#;
        assert!(matches!(
            parse_payload(empty),
            Err(InputValidationError::EmptyLicenseList { index: 0 })
        ));

        let scalar = r#"{"packages": [{"package": "a", "version": "1", "license": "MIT"}]}"#;
        assert!(matches!(
            parse_payload(scalar),
            Err(InputValidationError::MissingField { index: 0, field: "license" })
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_payload("{not json"),
            Err(InputValidationError::Json(_))
        ));
    }
}
