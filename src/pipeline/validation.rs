//! Validation engine for request settings.
//!
//! The validator runs all registered [`ValidationRule`]s against a
//! [`RequestSettings`] and collects every diagnostic into a
//! [`ValidationReport`]. It never short-circuits on the first problem, so
//! callers see all of them at once.
//!
//! Unrecognized values are warnings and fall back to defaults. Errors only
//! arise in strict mode (unknown fields) or for values that cannot be
//! interpreted at all (a non-finite `mmrLambda`).
//!
//! # Quick start
//!
//! ```rust,ignore
//! use rapid_digest::pipeline::settings::RequestSettings;
//! use rapid_digest::pipeline::validation::SettingsValidator;
//!
//! let settings = RequestSettings::from_json(json)?;
//! match SettingsValidator::with_defaults().resolve(&settings) {
//!     Ok(resolved) => { /* resolved.config, resolved.report.warnings() */ }
//!     Err(report) => { for err in report.errors() { eprintln!("{err}"); } }
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::warn;

use super::settings::{RequestSettings, SummaryMode};
use crate::types::{Domain, SpeedMode, SummarizerConfig};

// ─── Error code ─────────────────────────────────────────────────────────────

/// Stable machine-readable category of a settings problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A field the schema does not know
    UnknownField,
    /// A known field with a value outside its enumeration
    UnrecognizedValue,
    /// A numeric value outside its allowed range
    OutOfRange,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownField => "unknown_field",
            Self::UnrecognizedValue => "unrecognized_value",
            Self::OutOfRange => "out_of_range",
        }
    }
}

// ─── Issue ──────────────────────────────────────────────────────────────────

/// A settings problem with its JSON pointer path and an optional hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsIssue {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl SettingsIssue {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for SettingsIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.as_str(), self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub issue: SettingsIssue,
}

impl ValidationDiagnostic {
    pub fn error(issue: SettingsIssue) -> Self {
        Self {
            severity: Severity::Error,
            issue,
        }
    }

    pub fn warning(issue: SettingsIssue) -> Self {
        Self {
            severity: Severity::Warning,
            issue,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &SettingsIssue> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.issue)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &SettingsIssue> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.issue)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects [`RequestSettings`] and returns
/// zero or more diagnostics.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"speed_mode"`).
    fn name(&self) -> &str;

    fn validate(&self, settings: &RequestSettings) -> Vec<ValidationDiagnostic>;
}

// ─── Resolved settings ──────────────────────────────────────────────────────

/// Settings after validation and fallback resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub config: SummarizerConfig,
    pub summary_mode: SummaryMode,
    /// Warnings produced while resolving
    pub report: ValidationReport,
}

// ─── Validator ──────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s and resolves settings into a
/// [`SummarizerConfig`].
pub struct SettingsValidator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl SettingsValidator {
    /// Create an empty validator with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a validator pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(SpeedModeRule));
        validator.add_rule(Box::new(DomainRule));
        validator.add_rule(Box::new(SummaryModeRule));
        validator.add_rule(Box::new(LambdaRule));
        validator.add_rule(Box::new(UnknownFieldsRule));
        validator
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Run all rules against `settings` and return the collected report.
    pub fn validate(&self, settings: &RequestSettings) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(settings));
        }
        report
    }

    /// Validate, then resolve every field, falling back to defaults for
    /// anything unrecognized. Returns the report as the error when it
    /// contains errors.
    pub fn resolve(
        &self,
        settings: &RequestSettings,
    ) -> std::result::Result<ResolvedSettings, ValidationReport> {
        let report = self.validate(settings);
        if report.has_errors() {
            return Err(report);
        }
        for issue in report.warnings() {
            warn!(path = %issue.path, "{}", issue.message);
        }

        let speed_mode = settings
            .speed_mode
            .as_deref()
            .and_then(SpeedMode::try_parse)
            .unwrap_or_default();
        let domain = settings
            .domain
            .as_deref()
            .and_then(Domain::try_parse)
            .unwrap_or_default();
        let summary_mode = settings
            .summary_mode
            .as_deref()
            .and_then(SummaryMode::try_parse)
            .unwrap_or_default();

        let mut config = SummarizerConfig::new()
            .with_speed_mode(speed_mode)
            .with_domain(domain)
            .with_abstractive(settings.use_abstractive.unwrap_or(false));
        if let Some(lambda) = settings.mmr_lambda {
            config = config.with_mmr_lambda(lambda);
        }

        Ok(ResolvedSettings {
            config,
            summary_mode,
            report,
        })
    }
}

impl Default for SettingsValidator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

/// Warn on a value that does not parse, naming the fallback.
fn unrecognized(
    path: &str,
    value: &str,
    fallback: &str,
    accepted: &str,
) -> ValidationDiagnostic {
    ValidationDiagnostic::warning(
        SettingsIssue::new(
            ErrorCode::UnrecognizedValue,
            path,
            format!("unrecognized value \"{value}\"; using \"{fallback}\""),
        )
        .with_hint(format!("Use one of: {accepted}")),
    )
}

// ─── 1. speedMode ───────────────────────────────────────────────────────────

struct SpeedModeRule;

impl ValidationRule for SpeedModeRule {
    fn name(&self) -> &str {
        "speed_mode"
    }

    fn validate(&self, settings: &RequestSettings) -> Vec<ValidationDiagnostic> {
        match settings.speed_mode.as_deref() {
            Some(value) if SpeedMode::try_parse(value).is_none() => vec![unrecognized(
                "/speedMode",
                value,
                SpeedMode::default().as_str(),
                "fast, balanced, thorough",
            )],
            _ => vec![],
        }
    }
}

// ─── 2. domain ──────────────────────────────────────────────────────────────

struct DomainRule;

impl ValidationRule for DomainRule {
    fn name(&self) -> &str {
        "domain"
    }

    fn validate(&self, settings: &RequestSettings) -> Vec<ValidationDiagnostic> {
        match settings.domain.as_deref() {
            Some(value) if Domain::try_parse(value).is_none() => vec![unrecognized(
                "/domain",
                value,
                Domain::default().as_str(),
                "general, academic, legal, journalistic",
            )],
            _ => vec![],
        }
    }
}

// ─── 3. summaryMode ─────────────────────────────────────────────────────────

struct SummaryModeRule;

impl ValidationRule for SummaryModeRule {
    fn name(&self) -> &str {
        "summary_mode"
    }

    fn validate(&self, settings: &RequestSettings) -> Vec<ValidationDiagnostic> {
        match settings.summary_mode.as_deref() {
            Some(value) if SummaryMode::try_parse(value).is_none() => vec![unrecognized(
                "/summaryMode",
                value,
                SummaryMode::default().as_str(),
                "separate, merged",
            )],
            _ => vec![],
        }
    }
}

// ─── 4. mmrLambda within [0, 1] ─────────────────────────────────────────────

struct LambdaRule;

impl ValidationRule for LambdaRule {
    fn name(&self) -> &str {
        "mmr_lambda"
    }

    fn validate(&self, settings: &RequestSettings) -> Vec<ValidationDiagnostic> {
        match settings.mmr_lambda {
            Some(lambda) if !lambda.is_finite() => vec![ValidationDiagnostic::error(
                SettingsIssue::new(ErrorCode::OutOfRange, "/mmrLambda", "mmrLambda must be finite"),
            )],
            Some(lambda) if !(0.0..=1.0).contains(&lambda) => vec![ValidationDiagnostic::warning(
                SettingsIssue::new(
                    ErrorCode::OutOfRange,
                    "/mmrLambda",
                    format!("mmrLambda {lambda} is outside [0, 1]; clamping"),
                )
                .with_hint("0 favours diversity, 1 favours relevance"),
            )],
            _ => vec![],
        }
    }
}

// ─── 5. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    fn check_unknowns(
        unknowns: &HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<&String> = unknowns.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                let diag_fn = if strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    SettingsIssue::new(
                        ErrorCode::UnknownField,
                        format!("/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, settings: &RequestSettings) -> Vec<ValidationDiagnostic> {
        Self::check_unknowns(&settings.unknown_fields, settings.strict)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(json: &str) -> RequestSettings {
        RequestSettings::from_json(json).unwrap()
    }

    fn validator() -> SettingsValidator {
        SettingsValidator::with_defaults()
    }

    #[test]
    fn test_empty_settings_resolve_to_defaults() {
        let resolved = validator().resolve(&settings("{}")).unwrap();
        assert_eq!(resolved.config, SummarizerConfig::default());
        assert_eq!(resolved.summary_mode, SummaryMode::Separate);
        assert!(resolved.report.is_empty());
    }

    #[test]
    fn test_full_settings_resolve() {
        let resolved = validator()
            .resolve(&settings(
                r#"{ "speedMode": "fast", "domain": "news", "useAbstractive": true,
                     "summaryMode": "merged", "mmrLambda": 0.8 }"#,
            ))
            .unwrap();
        assert_eq!(resolved.config.speed_mode, SpeedMode::Fast);
        assert_eq!(resolved.config.domain, Domain::Journalistic);
        assert!(resolved.config.use_abstractive);
        assert_eq!(resolved.config.mmr_lambda, 0.8);
        assert_eq!(resolved.summary_mode, SummaryMode::Merged);
    }

    #[test]
    fn test_unrecognized_values_warn_and_fall_back() {
        let resolved = validator()
            .resolve(&settings(r#"{ "speedMode": "turbo", "domain": "medical" }"#))
            .unwrap();
        assert_eq!(resolved.config.speed_mode, SpeedMode::Balanced);
        assert_eq!(resolved.config.domain, Domain::General);

        let paths: Vec<&str> = resolved.report.warnings().map(|w| w.path.as_str()).collect();
        assert_eq!(paths, vec!["/speedMode", "/domain"]);
        assert!(resolved
            .report
            .warnings()
            .all(|w| w.code == ErrorCode::UnrecognizedValue));
    }

    #[test]
    fn test_lambda_out_of_range_is_clamped() {
        let resolved = validator().resolve(&settings(r#"{ "mmrLambda": 1.5 }"#)).unwrap();
        assert_eq!(resolved.config.mmr_lambda, 1.0);
        assert_eq!(resolved.report.len(), 1);
    }

    #[test]
    fn test_non_finite_lambda_is_error() {
        let mut input = RequestSettings::default();
        input.mmr_lambda = Some(f64::NAN);
        let report = validator().resolve(&input).unwrap_err();
        assert!(report.has_errors());
        assert_eq!(report.errors().next().unwrap().code, ErrorCode::OutOfRange);
    }

    #[test]
    fn test_unknown_field_lenient_is_warning() {
        let report = validator().validate(&settings(r#"{ "fileName": "a.pdf" }"#));
        assert!(report.is_valid());
        assert_eq!(report.warnings().next().unwrap().path, "/fileName");
    }

    #[test]
    fn test_unknown_field_strict_is_error() {
        let report = validator()
            .resolve(&settings(r#"{ "strict": true, "bogus": 1, "another": 2 }"#))
            .unwrap_err();
        let paths: Vec<&str> = report.errors().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/another", "/bogus"]);
    }

    #[test]
    fn test_issue_display() {
        let issue = SettingsIssue::new(ErrorCode::UnknownField, "/x", "unrecognized field \"x\"")
            .with_hint("remove it");
        assert_eq!(
            issue.to_string(),
            "[unknown_field] /x: unrecognized field \"x\" (hint: remove it)"
        );
    }

    #[test]
    fn test_report_serializes_flat() {
        let report = validator().validate(&settings(r#"{ "speedMode": "turbo" }"#));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["diagnostics"][0]["severity"], "warning");
        assert_eq!(value["diagnostics"][0]["code"], "unrecognized_value");
        assert_eq!(value["diagnostics"][0]["path"], "/speedMode");
    }
}
