//! Validation engine for recorded at-bats.
//!
//! Runs every registered rule against an [`AtBatValidationData`] and collects
//! all violations into one [`ValidationResult`]. Violations are data, never
//! errors: `is_valid == false` is a normal, user-facing answer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::bases::BaserunnerState;
use crate::core::result::BattingResult;
use crate::core::rules::{
    BaseAdvancementRule, HitTypeRule, MaxOutsRule, NoRunnerPassingRule, RbiRule,
};

/// Category of a rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationType {
    RunnerOrderViolation,
    RunnerPassingViolation,
    IncorrectRbiCount,
    ExcessiveOuts,
    InvalidBaseAdvancement,
    InvalidHitType,
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViolationType::RunnerOrderViolation => "RUNNER_ORDER_VIOLATION",
            ViolationType::RunnerPassingViolation => "RUNNER_PASSING_VIOLATION",
            ViolationType::IncorrectRbiCount => "INCORRECT_RBI_COUNT",
            ViolationType::ExcessiveOuts => "EXCESSIVE_OUTS",
            ViolationType::InvalidBaseAdvancement => "INVALID_BASE_ADVANCEMENT",
            ViolationType::InvalidHitType => "INVALID_HIT_TYPE",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    #[serde(rename = "type")]
    pub kind: ViolationType,
    pub message: String,
}

impl RuleViolation {
    pub fn new(kind: ViolationType, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Aggregated verdict for one at-bat. `is_valid` iff `violations` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<RuleViolation>,
}

impl ValidationResult {
    pub fn from_violations(violations: Vec<RuleViolation>) -> Self {
        Self {
            is_valid: violations.is_empty(),
            violations,
        }
    }

    pub fn has(&self, kind: ViolationType) -> bool {
        self.violations.iter().any(|violation| violation.kind == kind)
    }
}

/// One confirmed at-bat, as handed to the engine.
///
/// `batting_result` is the raw code so an unknown code can be reported as a
/// violation instead of failing deserialization. Counts are signed so
/// malformed (negative) input is representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtBatValidationData {
    pub before_state: BaserunnerState,
    pub after_state: BaserunnerState,
    pub batting_result: String,
    pub batter_id: String,
    pub rbis: i32,
    pub outs: i32,
    #[serde(default)]
    pub runs_scored: Vec<String>,
}

impl AtBatValidationData {
    /// Parsed result code, `None` when outside the closed set.
    pub fn result(&self) -> Option<BattingResult> {
        BattingResult::from_code(&self.batting_result)
    }
}

/// A single invariant check over a recorded at-bat.
pub trait ValidationRule: Send + Sync {
    /// Stable rule name, used in logs and reports.
    fn name(&self) -> &'static str;

    /// All violations of this rule (empty when satisfied).
    fn check(&self, data: &AtBatValidationData) -> Vec<RuleViolation>;
}

/// Ordered set of rules run against every at-bat.
#[derive(Default)]
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Engine with no rules registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with the critical rule battery registered.
    pub fn with_critical_rules() -> Self {
        let mut engine = Self::new();
        register_with_engine(&mut engine);
        engine
    }

    pub fn register(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Run every rule; violations are collected in rule order, never short-circuited.
    pub fn validate_at_bat(&self, data: &AtBatValidationData) -> ValidationResult {
        let violations = self
            .rules
            .iter()
            .flat_map(|rule| rule.check(data))
            .collect();
        ValidationResult::from_violations(violations)
    }
}

impl fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}

/// The critical rule battery, in evaluation order.
pub fn create_all_critical_rules() -> Vec<Box<dyn ValidationRule>> {
    vec![
        Box::new(NoRunnerPassingRule),
        Box::new(RbiRule),
        Box::new(MaxOutsRule),
        Box::new(BaseAdvancementRule),
        Box::new(HitTypeRule),
    ]
}

/// Register the critical rules with `engine`.
pub fn register_with_engine(engine: &mut ValidationEngine) {
    for rule in create_all_critical_rules() {
        engine.register(rule);
    }
}

/// Validate `data` against the critical rules.
pub fn validate_at_bat(data: &AtBatValidationData) -> ValidationResult {
    ValidationEngine::with_critical_rules().validate_at_bat(data)
}
