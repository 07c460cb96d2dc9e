use std::fmt::Display;

/// BPMN 2.0 model namespace. Every element the analyzer counts lives here.
pub const BPMN_MODEL_NS: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";

/// BPMN 2.0 diagram interchange namespace.
pub const BPMN_DI_NS: &str = "http://www.omg.org/spec/BPMN/20100524/DI";

/// Prefix to namespace table used for queries. Only `bpmn` is queried by the extractor.
pub const NAMESPACES: [(&str, &str); 2] = [("bpmn", BPMN_MODEL_NS), ("bpmndi", BPMN_DI_NS)];

pub(crate) const DEFINITIONS: &str = "definitions";
pub(crate) const PROCESS: &str = "process";
pub(crate) const LANE_SET: &str = "laneSet";
pub(crate) const LANE: &str = "lane";
pub(crate) const SUB_PROCESS: &str = "subProcess";
pub(crate) const DATA_OBJECT: &str = "dataObject";
pub(crate) const DATA_STORE_REFERENCE: &str = "dataStoreReference";

/// Namespace an element was resolved to while reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Model,
    Di,
    /// Any other namespace, or no namespace at all.
    Foreign,
}

impl From<&[u8]> for Namespace {
    fn from(uri: &[u8]) -> Self {
        match uri {
            uri if uri == BPMN_MODEL_NS.as_bytes() => Namespace::Model,
            uri if uri == BPMN_DI_NS.as_bytes() => Namespace::Di,
            _ => Namespace::Foreign,
        }
    }
}

/// Task family. Every kind is a distinct XML tag and is counted on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    UserTask,
    ServiceTask,
    ScriptTask,
    ManualTask,
    BusinessRuleTask,
    SendTask,
    ReceiveTask,
    CallActivity,
    Task,
}

impl TaskKind {
    /// Iteration order is the key order of `task_types`.
    pub const ALL: [TaskKind; 9] = [
        TaskKind::UserTask,
        TaskKind::ServiceTask,
        TaskKind::ScriptTask,
        TaskKind::ManualTask,
        TaskKind::BusinessRuleTask,
        TaskKind::SendTask,
        TaskKind::ReceiveTask,
        TaskKind::CallActivity,
        TaskKind::Task,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            TaskKind::UserTask => "userTask",
            TaskKind::ServiceTask => "serviceTask",
            TaskKind::ScriptTask => "scriptTask",
            TaskKind::ManualTask => "manualTask",
            TaskKind::BusinessRuleTask => "businessRuleTask",
            TaskKind::SendTask => "sendTask",
            TaskKind::ReceiveTask => "receiveTask",
            TaskKind::CallActivity => "callActivity",
            TaskKind::Task => "task",
        }
    }

    // Task labels are the tag names.
    pub fn label(&self) -> &'static str {
        self.tag()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayKind {
    Exclusive,
    Inclusive,
    Parallel,
    EventBased,
    Complex,
}

impl GatewayKind {
    pub const ALL: [GatewayKind; 5] = [
        GatewayKind::Exclusive,
        GatewayKind::Inclusive,
        GatewayKind::Parallel,
        GatewayKind::EventBased,
        GatewayKind::Complex,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            GatewayKind::Exclusive => "exclusiveGateway",
            GatewayKind::Inclusive => "inclusiveGateway",
            GatewayKind::Parallel => "parallelGateway",
            GatewayKind::EventBased => "eventBasedGateway",
            GatewayKind::Complex => "complexGateway",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GatewayKind::Exclusive => "exclusive",
            GatewayKind::Inclusive => "inclusive",
            GatewayKind::Parallel => "parallel",
            GatewayKind::EventBased => "eventBased",
            GatewayKind::Complex => "complex",
        }
    }
}

/// Event buckets. Intermediate catch and throw events share one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventBucket {
    Start,
    Intermediate,
    End,
    Boundary,
}

impl EventBucket {
    pub const ALL: [EventBucket; 4] = [
        EventBucket::Start,
        EventBucket::Intermediate,
        EventBucket::End,
        EventBucket::Boundary,
    ];

    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            EventBucket::Start => &["startEvent"],
            EventBucket::Intermediate => &["intermediateCatchEvent", "intermediateThrowEvent"],
            EventBucket::End => &["endEvent"],
            EventBucket::Boundary => &["boundaryEvent"],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventBucket::Start => "start",
            EventBucket::Intermediate => "intermediate",
            EventBucket::End => "end",
            EventBucket::Boundary => "boundary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    Sequence,
    Message,
    /// Only counted when enabled in [`Options`](crate::Options).
    DataAssociation,
}

impl FlowKind {
    pub const ALL: [FlowKind; 3] = [
        FlowKind::Sequence,
        FlowKind::Message,
        FlowKind::DataAssociation,
    ];

    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            FlowKind::Sequence => &["sequenceFlow"],
            FlowKind::Message => &["messageFlow"],
            FlowKind::DataAssociation => &["dataInputAssociation", "dataOutputAssociation"],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FlowKind::Sequence => "sequence",
            FlowKind::Message => "message",
            FlowKind::DataAssociation => "dataAssociation",
        }
    }
}

/// Event definitions checked for existence only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventDefinition {
    Error,
    Compensate,
    Timer,
    Message,
}

impl EventDefinition {
    pub fn tag(&self) -> &'static str {
        match self {
            EventDefinition::Error => "errorEventDefinition",
            EventDefinition::Compensate => "compensateEventDefinition",
            EventDefinition::Timer => "timerEventDefinition",
            EventDefinition::Message => "messageEventDefinition",
        }
    }
}

macro_rules! display_label {
    ($($kind:ty),*) => {$(
        impl Display for $kind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.label())
            }
        }
    )*};
}

display_label!(TaskKind, GatewayKind, EventBucket, FlowKind);

impl Display for EventDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_namespace_uri() {
        assert_eq!(Namespace::from(BPMN_MODEL_NS.as_bytes()), Namespace::Model);
        assert_eq!(Namespace::from(BPMN_DI_NS.as_bytes()), Namespace::Di);
        assert_eq!(
            Namespace::from(b"http://www.omg.org/spec/DD/20100524/DC".as_slice()),
            Namespace::Foreign
        );
    }

    #[test]
    fn namespace_table() {
        assert_eq!(NAMESPACES[0], ("bpmn", BPMN_MODEL_NS));
        assert_eq!(NAMESPACES[1], ("bpmndi", BPMN_DI_NS));
    }

    #[test]
    fn generic_task_comes_last() {
        assert_eq!(TaskKind::ALL.last(), Some(&TaskKind::Task));
        assert_eq!(TaskKind::CallActivity.to_string(), "callActivity");
    }

    #[test]
    fn gateway_labels() {
        let labels: Vec<_> = GatewayKind::ALL.iter().map(GatewayKind::label).collect();
        assert_eq!(
            labels,
            ["exclusive", "inclusive", "parallel", "eventBased", "complex"]
        );
    }
}
