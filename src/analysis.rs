pub mod suggestion;

use crate::{
    api::{Analysis, Breakdown, Options, Statistics},
    bpmn::{
        DATA_OBJECT, DATA_STORE_REFERENCE, EventBucket, EventDefinition, FlowKind, GatewayKind,
        LANE, LANE_SET, PROCESS, SUB_PROCESS, TaskKind,
    },
    document::{Document, parse_and_validate},
    error::{Error, Result},
};
use log::{debug, trace, warn};
use suggestion::generate_suggestions;

/// Analyze a validated document with default options.
/// ```
/// use bpmn_analyzer::{Document, analyze};
///
/// static BPMN_DATA: &str = include_str!("../demos/simple.bpmn");
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let document: Document = BPMN_DATA.parse()?;
///     let analysis = analyze(&document);
///     println!("{}", analysis.to_json_pretty()?);
///     Ok(())
/// }
/// ```
pub fn analyze(document: &Document) -> Analysis {
    analyze_with(document, &Options::default())
}

/// Analyze a validated document. Never fails, missing elements count as zero.
pub fn analyze_with(document: &Document, options: &Options) -> Analysis {
    let stats = extract_statistics(document, options);
    let suggestions = generate_suggestions(&stats, options);
    debug!(
        "ANALYZED complexity: {}, suggestions: {}",
        stats.complexity_score,
        suggestions.len()
    );
    Analysis { stats, suggestions }
}

/// Parse, validate and analyze `text`. Empty or whitespace only input is rejected before parsing.
pub fn analyze_str(text: &str, options: &Options) -> Result<Analysis> {
    if text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    let document = parse_and_validate(text)?;
    Ok(analyze_with(&document, options))
}

/// Analyze many documents. Results are in input order.
///
/// Runs on the rayon thread pool with the `parallel` feature.
pub fn analyze_all<S>(texts: &[S], options: &Options) -> Vec<Result<Analysis>>
where
    S: AsRef<str> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        texts
            .par_iter()
            .map(|text| analyze_str(text.as_ref(), options))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        texts
            .iter()
            .map(|text| analyze_str(text.as_ref(), options))
            .collect()
    }
}

/// Count every element category. Each category is an independent query over
/// the whole document, so nested and sibling processes are aggregated.
pub fn extract_statistics(document: &Document, options: &Options) -> Statistics {
    let total_processes = document.count(PROCESS);
    if total_processes == 0 {
        warn!("No process element found");
    }

    let mut task_types = Breakdown::default();
    for kind in TaskKind::ALL {
        let count = document.count(kind.tag());
        trace!("{kind}: {count}");
        if count > 0 {
            task_types.insert(kind.label(), count);
        }
    }

    let mut gateway_types = Breakdown::default();
    for kind in GatewayKind::ALL {
        let count = document.count(kind.tag());
        trace!("{kind}: {count}");
        gateway_types.insert(kind.label(), count);
    }

    let mut event_types = Breakdown::default();
    for bucket in EventBucket::ALL {
        let count = document.count_any(bucket.tags());
        trace!("{bucket}: {count}");
        event_types.insert(bucket.label(), count);
    }

    let mut flow_types = Breakdown::default();
    for kind in FlowKind::ALL {
        if kind == FlowKind::DataAssociation && !options.includes_data_associations() {
            continue;
        }
        let count = document.count_any(kind.tags());
        trace!("{kind}: {count}");
        flow_types.insert(kind.label(), count);
    }

    let mut stats = Statistics {
        total_processes,
        total_tasks: task_types.total(),
        task_types,
        total_gateways: gateway_types.total(),
        gateway_types,
        total_events: event_types.total(),
        event_types,
        total_flows: flow_types.total(),
        flow_types,
        total_lanes: document.count_children(LANE_SET, LANE),
        total_subprocesses: document.count(SUB_PROCESS),
        total_data_objects: document.count(DATA_OBJECT),
        total_data_stores: document.count(DATA_STORE_REFERENCE),
        has_error_handling: document.contains(EventDefinition::Error.tag()),
        has_compensation: document.contains(EventDefinition::Compensate.tag()),
        has_timer_events: document.contains(EventDefinition::Timer.tag()),
        has_message_events: document.contains(EventDefinition::Message.tag()),
        complexity_score: 0,
    };
    stats.complexity_score = complexity_score(&stats);
    stats
}

/// Weighted element count.
///
/// `tasks + 2*gateways + events + 5*subprocesses + floor(flows*0.5) + 2*lanes`
pub fn complexity_score(stats: &Statistics) -> usize {
    // Flows are the only fractional term, so truncating the sum equals halving them here.
    stats.total_tasks
        + stats.total_gateways * 2
        + stats.total_events
        + stats.total_subprocesses * 5
        + stats.total_flows / 2
        + stats.total_lanes * 2
}

#[cfg(test)]
mod tests {
    use super::*;

    static SIMPLE: &str = include_str!("../demos/simple.bpmn");
    static COMPLEX: &str = include_str!("../demos/complex.bpmn");
    static LANES: &str = include_str!("../demos/lanes.bpmn");

    fn stats(text: &str) -> Result<Statistics, Box<dyn std::error::Error>> {
        Ok(extract_statistics(&text.parse::<Document>()?, &Options::default()))
    }

    #[test]
    fn simple_process() -> Result<(), Box<dyn std::error::Error>> {
        let stats = stats(SIMPLE)?;
        assert_eq!(stats.total_processes, 1);
        assert_eq!(stats.total_tasks, 1);
        assert_eq!(stats.task_types, Breakdown::from([("task", 1)]));
        assert_eq!(stats.total_events, 2);
        assert_eq!(stats.total_gateways, 0);
        assert_eq!(stats.total_flows, 2);
        assert_eq!(stats.complexity_score, 4);
        assert!(!stats.has_error_handling);
        Ok(())
    }

    #[test]
    fn complex_process() -> Result<(), Box<dyn std::error::Error>> {
        let stats = stats(COMPLEX)?;
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.total_gateways, 2);
        assert_eq!(stats.total_subprocesses, 1);
        assert!(stats.has_error_handling);
        assert_eq!(
            stats.gateway_types,
            Breakdown::from([
                ("exclusive", 1),
                ("inclusive", 0),
                ("parallel", 1),
                ("eventBased", 0),
                ("complex", 0),
            ])
        );
        // 3 + 2*2 + 2 + 5 + 8/2
        assert_eq!(stats.complexity_score, 18);
        Ok(())
    }

    #[test]
    fn lanes() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(stats(LANES)?.total_lanes, 2);
        Ok(())
    }

    #[test]
    fn empty_labels_are_present() -> Result<(), Box<dyn std::error::Error>> {
        let stats = stats(
            r#"<definitions xmlns="http://www.omg.org/spec/BPMN/20100524/MODEL"/>"#,
        )?;
        assert!(stats.task_types.is_empty());
        assert_eq!(stats.gateway_types.len(), 5);
        assert_eq!(stats.event_types.len(), 4);
        assert_eq!(
            stats.flow_types,
            Breakdown::from([("sequence", 0), ("message", 0)])
        );
        assert_eq!(stats.complexity_score, 0);
        Ok(())
    }

    #[test]
    fn task_kinds_are_counted_per_tag() -> Result<(), Box<dyn std::error::Error>> {
        let stats = stats(
            r#"<definitions xmlns="http://www.omg.org/spec/BPMN/20100524/MODEL">
                <process id="p">
                    <task id="a"/>
                    <userTask id="b"/>
                    <userTask id="c"/>
                    <callActivity id="d"/>
                    <subProcess id="s"><serviceTask id="e"/></subProcess>
                </process>
            </definitions>"#,
        )?;
        assert_eq!(
            stats.task_types,
            Breakdown::from([
                ("userTask", 2),
                ("serviceTask", 1),
                ("callActivity", 1),
                ("task", 1),
            ])
        );
        assert_eq!(stats.total_tasks, 5);
        Ok(())
    }

    #[test]
    fn intermediate_events_share_a_bucket() -> Result<(), Box<dyn std::error::Error>> {
        let stats = stats(
            r#"<definitions xmlns="http://www.omg.org/spec/BPMN/20100524/MODEL">
                <process id="p">
                    <intermediateCatchEvent id="a"><timerEventDefinition/></intermediateCatchEvent>
                    <intermediateThrowEvent id="b"><compensateEventDefinition/></intermediateThrowEvent>
                    <boundaryEvent id="c"><errorEventDefinition/></boundaryEvent>
                </process>
            </definitions>"#,
        )?;
        assert_eq!(stats.event_types.count("intermediate"), 2);
        assert_eq!(stats.event_types.count("boundary"), 1);
        assert_eq!(stats.total_events, 3);
        assert!(stats.has_error_handling);
        assert!(stats.has_compensation);
        assert!(stats.has_timer_events);
        assert!(!stats.has_message_events);
        Ok(())
    }

    #[test]
    fn data_associations_only_when_enabled() -> Result<(), Box<dyn std::error::Error>> {
        let document: Document = r#"<definitions xmlns="http://www.omg.org/spec/BPMN/20100524/MODEL">
            <process id="p">
                <task id="t">
                    <dataInputAssociation id="i"/>
                    <dataOutputAssociation id="o"/>
                </task>
                <sequenceFlow id="f"/>
            </process>
        </definitions>"#
            .parse()?;

        let plain = extract_statistics(&document, &Options::default());
        assert_eq!(plain.total_flows, 1);
        assert_eq!(plain.flow_types.get("dataAssociation"), None);

        let extended = extract_statistics(&document, &Options::new().data_associations(true));
        assert_eq!(extended.total_flows, 3);
        assert_eq!(extended.flow_types.count("dataAssociation"), 2);
        Ok(())
    }

    #[test]
    fn flow_term_truncates() {
        let stats = Statistics {
            total_flows: 3,
            total_tasks: 1,
            ..Default::default()
        };
        assert_eq!(complexity_score(&stats), 2);
    }

    #[test]
    fn analysis_is_repeatable() -> Result<(), Box<dyn std::error::Error>> {
        let document: Document = COMPLEX.parse()?;
        assert_eq!(analyze(&document), analyze(&document));
        Ok(())
    }

    #[test]
    fn empty_text_is_rejected_before_parsing() {
        assert_eq!(
            analyze_str("  \n", &Options::default()).err(),
            Some(Error::EmptyInput)
        );
    }

    #[test]
    fn batch_keeps_order() {
        let results = analyze_all(&[SIMPLE, "<invalid/>", COMPLEX], &Options::default());
        assert_eq!(results.len(), 3);
        assert!(matches!(&results[0], Ok(a) if a.stats.total_tasks == 1));
        assert_eq!(results[1].as_ref().err(), Some(&Error::NotBpmn));
        assert!(matches!(&results[2], Ok(a) if a.stats.total_tasks == 3));
    }
}
