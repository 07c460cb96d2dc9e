use crate::api::{Options, Statistics};
use log::debug;
use serde::{Serialize, Serializer};
use std::fmt::Display;

/// Modeling suggestion derived from [`Statistics`]. Serializes as its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    NoProcesses,
    /// Number of processes in the file.
    SplitProcesses(usize),
    AddErrorHandling,
    UseGateways,
    SimplifyComplexGateways,
    ConnectSequenceFlows,
    AddLanes,
    /// Complexity score of the document.
    HighComplexity(usize),
    VerySimple,
    UseTimerEvents,
    UseMessageFlows,
    UseMessageEvents,
    ModelData,
    ExtractSubprocesses,
    /// Returned alone when no other rule applies.
    WellStructured,
}

impl Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Suggestion::NoProcesses => write!(
                f,
                "No processes found in the BPMN file. Ensure the file contains valid BPMN process definitions."
            ),
            Suggestion::SplitProcesses(count) => write!(
                f,
                "Multiple processes ({count}) detected. Consider splitting into separate files for better maintainability."
            ),
            Suggestion::AddErrorHandling => write!(
                f,
                "Consider adding error handling with error boundary events or error end events to improve process robustness."
            ),
            Suggestion::UseGateways => write!(
                f,
                "Consider using gateways to model decision points and parallel execution for better process clarity."
            ),
            Suggestion::SimplifyComplexGateways => write!(
                f,
                "Complex gateways detected. Consider simplifying by using exclusive or inclusive gateways where possible."
            ),
            Suggestion::ConnectSequenceFlows => write!(
                f,
                "No sequence flows found. Ensure tasks are properly connected with sequence flows."
            ),
            Suggestion::AddLanes => write!(
                f,
                "Consider adding lanes to organize activities by roles or organizational units for better clarity."
            ),
            Suggestion::HighComplexity(score) => write!(
                f,
                "High complexity score ({score}). Consider breaking down the process into smaller subprocesses."
            ),
            Suggestion::VerySimple => write!(
                f,
                "Very simple process. Ensure all necessary business logic is captured."
            ),
            Suggestion::UseTimerEvents => write!(
                f,
                "Consider using timer events for time-based processes (e.g., deadlines, delays)."
            ),
            Suggestion::UseMessageFlows => write!(
                f,
                "For multi-process scenarios, consider using message flows for inter-process communication."
            ),
            Suggestion::UseMessageEvents => write!(
                f,
                "For multi-process scenarios, consider using message events for inter-process communication."
            ),
            Suggestion::ModelData => write!(
                f,
                "No data objects or data stores found. Consider modeling data flow for better process documentation."
            ),
            Suggestion::ExtractSubprocesses => write!(
                f,
                "Consider extracting complex sections into subprocesses to improve readability and reusability."
            ),
            Suggestion::WellStructured => write!(
                f,
                "No specific suggestions. The BPMN file appears well-structured."
            ),
        }
    }
}

impl Serialize for Suggestion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleSet {
    Standard,
    Legacy,
}

struct Rule {
    rule_set: RuleSet,
    check: fn(&Statistics) -> Option<Suggestion>,
}

impl Rule {
    const fn standard(check: fn(&Statistics) -> Option<Suggestion>) -> Self {
        Self {
            rule_set: RuleSet::Standard,
            check,
        }
    }

    const fn legacy(check: fn(&Statistics) -> Option<Suggestion>) -> Self {
        Self {
            rule_set: RuleSet::Legacy,
            check,
        }
    }

    fn enabled(&self, options: &Options) -> bool {
        self.rule_set == RuleSet::Standard || options.uses_legacy_rules()
    }
}

// Evaluation order is output order.
const RULES: [Rule; 12] = [
    Rule::standard(no_processes),
    Rule::legacy(split_processes),
    Rule::legacy(missing_error_handling),
    Rule::standard(gateway_usage),
    Rule::standard(unconnected_tasks),
    Rule::standard(missing_lanes),
    Rule::standard(complexity),
    Rule::legacy(missing_timer_events),
    Rule::standard(message_flows),
    Rule::legacy(missing_message_events),
    Rule::standard(missing_data),
    Rule::standard(missing_subprocesses),
];

/// Evaluate every enabled rule in order. Never empty.
pub fn generate_suggestions(stats: &Statistics, options: &Options) -> Vec<Suggestion> {
    let mut suggestions: Vec<_> = RULES
        .iter()
        .filter(|rule| rule.enabled(options))
        .filter_map(|rule| (rule.check)(stats))
        .collect();

    if suggestions.is_empty() {
        suggestions.push(Suggestion::WellStructured);
    }
    debug!(
        "SUGGESTIONS {}",
        suggestions
            .iter()
            .map(|s| format!("{s:?}"))
            .collect::<Vec<_>>()
            .join(", ")
    );
    suggestions
}

fn no_processes(stats: &Statistics) -> Option<Suggestion> {
    (stats.total_processes == 0).then_some(Suggestion::NoProcesses)
}

fn split_processes(stats: &Statistics) -> Option<Suggestion> {
    (stats.total_processes > 1).then_some(Suggestion::SplitProcesses(stats.total_processes))
}

fn missing_error_handling(stats: &Statistics) -> Option<Suggestion> {
    (!stats.has_error_handling && stats.total_tasks > 0).then_some(Suggestion::AddErrorHandling)
}

fn gateway_usage(stats: &Statistics) -> Option<Suggestion> {
    if stats.total_gateways == 0 && stats.total_tasks > 3 {
        Some(Suggestion::UseGateways)
    } else if stats.gateway_types.count("complex") > 0 {
        Some(Suggestion::SimplifyComplexGateways)
    } else {
        None
    }
}

fn unconnected_tasks(stats: &Statistics) -> Option<Suggestion> {
    (stats.flow_types.count("sequence") == 0 && stats.total_tasks > 0)
        .then_some(Suggestion::ConnectSequenceFlows)
}

fn missing_lanes(stats: &Statistics) -> Option<Suggestion> {
    (stats.total_lanes == 0 && stats.total_tasks > 5).then_some(Suggestion::AddLanes)
}

fn complexity(stats: &Statistics) -> Option<Suggestion> {
    match stats.complexity_score {
        score if score > 100 => Some(Suggestion::HighComplexity(score)),
        score if score < 10 => Some(Suggestion::VerySimple),
        _ => None,
    }
}

fn missing_timer_events(stats: &Statistics) -> Option<Suggestion> {
    (!stats.has_timer_events && stats.total_events > 0).then_some(Suggestion::UseTimerEvents)
}

fn message_flows(stats: &Statistics) -> Option<Suggestion> {
    (stats.flow_types.count("message") > 0 && stats.total_processes > 1)
        .then_some(Suggestion::UseMessageFlows)
}

fn missing_message_events(stats: &Statistics) -> Option<Suggestion> {
    (!stats.has_message_events && stats.total_processes > 1)
        .then_some(Suggestion::UseMessageEvents)
}

fn missing_data(stats: &Statistics) -> Option<Suggestion> {
    (stats.total_data_objects == 0 && stats.total_data_stores == 0 && stats.total_tasks > 0)
        .then_some(Suggestion::ModelData)
}

fn missing_subprocesses(stats: &Statistics) -> Option<Suggestion> {
    (stats.total_subprocesses == 0 && stats.complexity_score > 50)
        .then_some(Suggestion::ExtractSubprocesses)
}
