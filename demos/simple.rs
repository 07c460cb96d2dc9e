use bpmn_analyzer::{Document, Options, analyze_with};

extern crate pretty_env_logger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    // Read and validate the BPMN file
    let document: Document = std::fs::read_to_string("demos/collaboration.bpmn")?.parse()?;

    // Count elements and evaluate the suggestion rules
    let analysis = analyze_with(&document, &Options::new().data_associations(true));

    // Print the result.
    println!("Processes: {}", analysis.stats.total_processes);
    println!("Tasks: {}", analysis.stats.total_tasks);
    for (kind, count) in analysis.stats.task_types.iter() {
        println!("  {kind}: {count}");
    }
    println!("Complexity score: {}", analysis.stats.complexity_score);
    for (index, suggestion) in analysis.suggestions.iter().enumerate() {
        println!("{}. {suggestion}", index + 1);
    }
    println!("{}", analysis.to_json_pretty()?);
    Ok(())
}
