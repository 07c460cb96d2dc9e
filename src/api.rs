use crate::analysis::suggestion::Suggestion;
use serde::{Serialize, Serializer, ser::SerializeMap};

/// Label to count mapping that keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breakdown {
    entries: Vec<(&'static str, usize)>,
}

impl Breakdown {
    pub(crate) fn insert(&mut self, label: &'static str, count: usize) {
        match self.entries.iter_mut().find(|(key, _)| *key == label) {
            Some((_, value)) => *value = count,
            None => self.entries.push((label, count)),
        }
    }

    /// Count for `label`, `None` if the label is not present.
    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find_map(|(key, value)| (*key == label).then_some(*value))
    }

    /// Count for `label`, zero if the label is not present.
    pub fn count(&self, label: &str) -> usize {
        self.get(label).unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, value)| value).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<const N: usize> From<[(&'static str, usize); N]> for Breakdown {
    fn from(entries: [(&'static str, usize); N]) -> Self {
        let mut breakdown = Breakdown::default();
        for (label, count) in entries {
            breakdown.insert(label, count);
        }
        breakdown
    }
}

impl Serialize for Breakdown {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, count) in &self.entries {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

/// Element census of a BPMN document.
///
/// Every `*_types` breakdown sums to its `total_*` field. Task counts are per
/// XML tag, so `total_tasks` is the sum of `task_types` and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_processes: usize,
    pub total_tasks: usize,
    /// Only task kinds present in the document.
    pub task_types: Breakdown,
    pub total_gateways: usize,
    /// Always contains `exclusive`, `inclusive`, `parallel`, `eventBased` and `complex`.
    pub gateway_types: Breakdown,
    pub total_events: usize,
    /// Always contains `start`, `intermediate`, `end` and `boundary`.
    pub event_types: Breakdown,
    pub total_flows: usize,
    /// `sequence` and `message`, plus `dataAssociation` when enabled.
    pub flow_types: Breakdown,
    /// Lanes that are direct children of a lane set.
    pub total_lanes: usize,
    pub total_subprocesses: usize,
    pub total_data_objects: usize,
    pub total_data_stores: usize,
    pub has_error_handling: bool,
    pub has_compensation: bool,
    /// Extension field, serialized with every option set.
    pub has_timer_events: bool,
    /// Extension field, serialized with every option set.
    pub has_message_events: bool,
    pub complexity_score: usize,
}

/// Result of analyzing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub stats: Statistics,
    /// Never empty.
    pub suggestions: Vec<Suggestion>,
}

impl Analysis {
    /// Suggestion texts in rule order.
    pub fn messages(&self) -> Vec<String> {
        self.suggestions.iter().map(ToString::to_string).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Analysis options. The defaults produce the canonical statistics and rule set.
/// ```
/// use bpmn_analyzer::Options;
///
/// let options = Options::new().data_associations(true).legacy_rules(true);
/// assert!(options.includes_data_associations());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    data_associations: bool,
    legacy_rules: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `dataInputAssociation` and `dataOutputAssociation` as a `dataAssociation` flow.
    pub fn data_associations(mut self, enabled: bool) -> Self {
        self.data_associations = enabled;
        self
    }

    /// Also evaluate the multi-process, error handling, timer and message event rules.
    pub fn legacy_rules(mut self, enabled: bool) -> Self {
        self.legacy_rules = enabled;
        self
    }

    pub fn includes_data_associations(&self) -> bool {
        self.data_associations
    }

    pub fn uses_legacy_rules(&self) -> bool {
        self.legacy_rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_keeps_insertion_order() -> Result<(), Box<dyn std::error::Error>> {
        let breakdown = Breakdown::from([("start", 1), ("intermediate", 0), ("end", 2)]);
        assert_eq!(
            serde_json::to_string(&breakdown)?,
            r#"{"start":1,"intermediate":0,"end":2}"#
        );
        assert_eq!(breakdown.total(), 3);
        assert_eq!(breakdown.get("intermediate"), Some(0));
        assert_eq!(breakdown.get("boundary"), None);
        assert_eq!(breakdown.count("boundary"), 0);
        Ok(())
    }

    #[test]
    fn breakdown_insert_replaces() {
        let mut breakdown = Breakdown::default();
        breakdown.insert("task", 1);
        breakdown.insert("task", 3);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown.count("task"), 3);
    }

    #[test]
    fn statistics_field_names() -> Result<(), Box<dyn std::error::Error>> {
        let value = serde_json::to_value(Statistics::default())?;
        for key in [
            "total_processes",
            "total_lanes",
            "total_tasks",
            "task_types",
            "total_gateways",
            "gateway_types",
            "total_events",
            "event_types",
            "total_flows",
            "flow_types",
            "total_subprocesses",
            "total_data_objects",
            "total_data_stores",
            "has_error_handling",
            "has_compensation",
            "complexity_score",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert!(value["task_types"].is_object());
        Ok(())
    }

    #[test]
    fn options_default_off() {
        let options = Options::default();
        assert!(!options.includes_data_associations());
        assert!(!options.uses_legacy_rules());
        assert!(Options::new().legacy_rules(true).uses_legacy_rules());
    }
}
