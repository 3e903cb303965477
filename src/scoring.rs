//! Entry point for callers: validate package records, resolve a stack
//! license and shape the [`ScoringResult`].

use tracing::{debug, info, warn};

use crate::config::ResolutionConfig;
use crate::error::{GraphError, InputValidationError, ScoringError};
use crate::ingest::parse_payload;
use crate::license::conflict::ConflictDetector;
use crate::license::graph::LicenseGraph;
use crate::license::reachability::reachable_set;
use crate::license::resolver::CompatibilityResolver;
use crate::license::ruleset::{RuleSet, RuleSetProvider};
use crate::models::{ConflictRecord, PackageRecord, ReachabilityEntry, ScoringResult};

/// Stateless apart from the immutable rule set and options: every call builds
/// its own graph, so one service can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct ScoringService {
    rules: RuleSet,
    options: ResolutionConfig,
}

impl ScoringService {
    /// Validate `rules` once by building a graph from it.
    pub fn new(rules: RuleSet, options: ResolutionConfig) -> Result<Self, GraphError> {
        LicenseGraph::from_rule_set(&rules)?;
        Ok(Self { rules, options })
    }

    pub fn from_provider(
        provider: &dyn RuleSetProvider,
        options: ResolutionConfig,
    ) -> Result<Self, GraphError> {
        Self::new(provider.rule_set().clone(), options)
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rules
    }

    /// Score a raw JSON payload.
    pub fn score_json(&self, payload: &str) -> Result<ScoringResult, ScoringError> {
        let records = parse_payload(payload)?;
        self.score(&records)
    }

    /// Resolve the stack license for `records`.
    ///
    /// Unrecognized licenses are not an error: they yield an empty result and
    /// a warning naming them.
    pub fn score(&self, records: &[PackageRecord]) -> Result<ScoringResult, ScoringError> {
        if records.is_empty() {
            return Err(InputValidationError::NoPackages.into());
        }
        let inputs: Vec<&str> = records.iter().map(|r| r.license.as_str()).collect();

        let unknown = self.rules.unrecognized(inputs.iter().copied());
        if !unknown.is_empty() {
            warn!(
                licenses = ?unknown,
                "unrecognized licenses in payload, skipping resolution"
            );
            return Ok(ScoringResult::default());
        }

        let graph = LicenseGraph::from_rule_set(&self.rules)?;
        let resolver = CompatibilityResolver::new(&graph, self.options.tie_break);

        if let Some(node) = resolver.resolve(&inputs) {
            info!(stack_license = node.id(), packages = records.len(), "stack license resolved");
            return Ok(ScoringResult {
                stack_license: node.id().to_string(),
                ..ScoringResult::default()
            });
        }

        let conflicts = ConflictDetector::new(&resolver, self.options.conflicts).conflicts(&inputs);
        debug!(conflicts = ?conflicts, "no common destination");

        let conflict_records: Vec<ConflictRecord> = records
            .iter()
            .filter(|r| conflicts.contains(&r.license))
            .map(|r| ConflictRecord {
                package_version: r.package_version(),
                license: r.license.clone(),
            })
            .collect();

        info!(
            conflicting_packages = conflict_records.len(),
            "no stack license satisfies every package"
        );

        Ok(ScoringResult {
            conflict_records,
            ..ScoringResult::default()
        })
    }

    /// Tier and reachable set of each distinct recognized license in
    /// `records`, in first-seen order.
    pub fn explain(&self, records: &[PackageRecord]) -> Result<Vec<ReachabilityEntry>, ScoringError> {
        let graph = LicenseGraph::from_rule_set(&self.rules)?;
        let mut entries: Vec<ReachabilityEntry> = Vec::new();

        for record in records {
            if entries.iter().any(|e| e.license == record.license) {
                continue;
            }
            let Some(node) = graph.get_node(&record.license) else {
                continue;
            };
            entries.push(ReachabilityEntry {
                license: node.id().to_string(),
                tier: node.tier(),
                reachable: reachable_set(&graph, node)
                    .into_iter()
                    .map(|n| n.id().to_string())
                    .collect(),
            });
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license::conflict::ConflictMode;
    use crate::license::ruleset::StaticRuleSet;
    use crate::models::PermissionTier;

    fn record(package: &str, version: &str, license: &str) -> PackageRecord {
        PackageRecord {
            package: package.to_string(),
            version: version.to_string(),
            license: license.to_string(),
        }
    }

    fn service() -> ScoringService {
        ScoringService::new(RuleSet::standard(), ResolutionConfig::default()).unwrap()
    }

    #[test]
    fn test_compatible_stack() {
        let result = service()
            .score(&[record("a", "1.0", "MIT"), record("b", "2.0", "BSD")])
            .unwrap();
        assert_eq!(result.stack_license, "BSD");
        assert!(result.conflict_records.is_empty());
        assert_eq!(result.outlier_license, "");
    }

    #[test]
    fn test_incompatible_stack_reports_both_packages() {
        let result = service()
            .score(&[record("kernel", "5.4", "GPL V2"), record("httpd", "2.4", "APACHE")])
            .unwrap();
        assert_eq!(result.stack_license, "");
        assert_eq!(
            result.conflict_records,
            vec![
                ConflictRecord {
                    package_version: "kernel-5.4".to_string(),
                    license: "GPL V2".to_string(),
                },
                ConflictRecord {
                    package_version: "httpd-2.4".to_string(),
                    license: "APACHE".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_unrecognized_license_soft_degrades() {
        let result = service()
            .score(&[record("a", "1", "MIT"), record("b", "1", "WTFPL")])
            .unwrap();
        assert_eq!(result, ScoringResult::default());
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_unrecognized_licenses_are_logged_once_sorted() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let records = [
            record("a", "1", "MIT"),
            record("b", "1", "WTFPL"),
            record("c", "1", "Zlib"),
            record("d", "1", "WTFPL"),
        ];
        let result = tracing::subscriber::with_default(subscriber, || service().score(&records))
            .unwrap();
        assert_eq!(result, ScoringResult::default());

        let output = log.contents();
        let line = output
            .lines()
            .find(|l| l.contains("unrecognized licenses"))
            .expect("warning emitted");
        assert!(line.contains("WARN"));
        assert!(line.contains(r#"["WTFPL", "Zlib"]"#));
        assert_eq!(output.matches("WTFPL").count(), 1);
        assert_eq!(output.matches("Zlib").count(), 1);
        assert!(!output.contains("MIT"));
    }

    #[test]
    fn test_whole_set_conflicts_cover_every_package() {
        let records = [
            record("a", "1", "MIT"),
            record("b", "1", "GPL V2"),
            record("c", "1", "APACHE"),
            record("d", "1", "MIT"),
        ];
        let result = service().score(&records).unwrap();
        let packages: Vec<&str> = result
            .conflict_records
            .iter()
            .map(|r| r.package_version.as_str())
            .collect();
        assert_eq!(packages, vec!["a-1", "b-1", "c-1", "d-1"]);
    }

    #[test]
    fn test_pairwise_conflicts_skip_compatible_packages() {
        let options = ResolutionConfig {
            conflicts: ConflictMode::Pairwise,
            ..ResolutionConfig::default()
        };
        let service = ScoringService::new(RuleSet::standard(), options).unwrap();
        let records = [
            record("a", "1", "MIT"),
            record("b", "1", "GPL V2"),
            record("c", "1", "APACHE"),
        ];
        let result = service.score(&records).unwrap();
        let licenses: Vec<&str> = result.conflict_records.iter().map(|r| r.license.as_str()).collect();
        assert_eq!(licenses, vec!["GPL V2", "APACHE"]);
    }

    #[test]
    fn test_score_is_idempotent() {
        let service = service();
        let records = [record("a", "1", "APACHE"), record("b", "1", "LGPL V2.1+")];
        let first = service.score(&records).unwrap();
        let second = service.score(&records).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.stack_license, "LGPL V3+");
    }

    #[test]
    fn test_empty_records_rejected() {
        assert!(matches!(
            service().score(&[]),
            Err(ScoringError::Input(InputValidationError::NoPackages))
        ));
    }

    #[test]
    fn test_score_json_rejects_malformed_records() {
        let err = service()
            .score_json(r#"{"packages": [{"version": "1", "license": ["MIT"]}]}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ScoringError::Input(InputValidationError::MissingField { index: 0, field: "package" })
        ));
    }

    #[test]
    fn test_malformed_rule_set_rejected_at_construction() {
        let rules = RuleSet::new(
            vec![
                ("MIT".to_string(), PermissionTier::Permissive),
                ("MIT".to_string(), PermissionTier::Permissive),
            ],
            Vec::new(),
        );
        assert!(matches!(
            ScoringService::new(rules, ResolutionConfig::default()),
            Err(GraphError::DuplicateNode(id)) if id == "MIT"
        ));
    }

    #[test]
    fn test_from_static_provider() {
        let service =
            ScoringService::from_provider(&StaticRuleSet::new(), ResolutionConfig::default()).unwrap();
        assert_eq!(service.rule_set().licenses().len(), 12);
    }

    #[test]
    fn test_explain_lists_distinct_known_licenses() {
        let records = [
            record("a", "1", "APACHE"),
            record("b", "1", "APACHE"),
            record("c", "1", "WTFPL"),
            record("d", "1", "GPL V2"),
        ];
        let entries = service().explain(&records).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].license, "APACHE");
        assert_eq!(entries[0].tier, PermissionTier::Permissive);
        assert_eq!(
            entries[0].reachable,
            vec!["APACHE", "LGPL V3+", "GPL V3+", "AGPL V3+"]
        );
        assert_eq!(entries[1].reachable, vec!["GPL V2"]);
    }
}
