use serde::{Deserialize, Serialize};

/// How strongly a license restricts downstream redistribution.
///
/// Variants are declared from least to most restrictive, so the derived
/// `Ord` follows restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PermissionTier {
    Permissive,
    WeaklyProtective,
    StronglyProtective,
    NetworkProtective,
}

impl PermissionTier {
    /// Tiers in fallback priority order, least restrictive first.
    pub const PRIORITY: [PermissionTier; 4] = [
        PermissionTier::Permissive,
        PermissionTier::WeaklyProtective,
        PermissionTier::StronglyProtective,
        PermissionTier::NetworkProtective,
    ];
}

impl std::fmt::Display for PermissionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionTier::Permissive => write!(f, "Permissive"),
            PermissionTier::WeaklyProtective => write!(f, "Weakly Protective"),
            PermissionTier::StronglyProtective => write!(f, "Strongly Protective"),
            PermissionTier::NetworkProtective => write!(f, "Network Protective"),
        }
    }
}

/// One package of the stack, reduced to its first declared license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub package: String,
    pub version: String,
    pub license: String,
}

impl PackageRecord {
    /// `package-version`, the key used in conflict reports.
    pub fn package_version(&self) -> String {
        format!("{}-{}", self.package, self.version)
    }
}

/// A package whose license takes part in a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictRecord {
    pub package_version: String,
    pub license: String,
}

/// Outcome of scoring a stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    /// Chosen stack license, empty when none could be resolved.
    pub stack_license: String,
    pub conflict_records: Vec<ConflictRecord>,
    /// Reserved; always empty.
    pub outlier_license: String,
}

impl ScoringResult {
    pub fn is_resolved(&self) -> bool {
        !self.stack_license.is_empty()
    }
}

/// Where a single input license can be upgraded to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReachabilityEntry {
    pub license: String,
    pub tier: PermissionTier,
    /// Reachable identities, the license itself first.
    pub reachable: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_order_follows_restriction() {
        assert!(PermissionTier::Permissive < PermissionTier::WeaklyProtective);
        assert!(PermissionTier::StronglyProtective < PermissionTier::NetworkProtective);
        let mut sorted = PermissionTier::PRIORITY.to_vec();
        sorted.sort();
        assert_eq!(sorted, PermissionTier::PRIORITY.to_vec());
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = ScoringResult {
            stack_license: String::new(),
            conflict_records: vec![ConflictRecord {
                package_version: "left-pad-1.0".to_string(),
                license: "GPL V2".to_string(),
            }],
            outlier_license: String::new(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["stackLicense"], "");
        assert_eq!(json["outlierLicense"], "");
        assert_eq!(json["conflictRecords"][0]["packageVersion"], "left-pad-1.0");
        assert_eq!(json["conflictRecords"][0]["license"], "GPL V2");
    }

    #[test]
    fn test_package_version_key() {
        let record = PackageRecord {
            package: "serde".to_string(),
            version: "1.0.150".to_string(),
            license: "MIT".to_string(),
        };
        assert_eq!(record.package_version(), "serde-1.0.150");
    }
}
