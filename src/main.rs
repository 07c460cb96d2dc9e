use bpmn_analyzer::{EXIT_INTERNAL_ERROR, Input, Options, Report, SERVICE_NAME, report};
use clap::Parser;
use log::error;
use std::{
    io::Read,
    path::{Path, PathBuf},
    process::ExitCode,
};

extern crate pretty_env_logger;

const STDIN: &str = "-";

#[derive(Parser, Debug)]
#[command(name = "bpmn-analyzer")]
#[command(about = format!("{SERVICE_NAME} - statistics and suggestions for BPMN 2.0 XML"))]
#[command(version)]
struct Args {
    /// BPMN files to analyze. Reads standard input when empty or `-`
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Pretty print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Count data input and output associations as flows
    #[arg(long)]
    data_associations: bool,

    /// Also apply the multi-process, error handling, timer and message event rules
    #[arg(long)]
    legacy_rules: bool,
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(report) => {
            for message in &report.errors {
                eprintln!("{message}");
            }
            if let Some(output) = &report.output {
                println!("{output}");
            }
            ExitCode::from(report.code)
        }
        Err(err) => {
            error!("{err}");
            eprintln!("Internal error: {err}");
            ExitCode::from(EXIT_INTERNAL_ERROR)
        }
    }
}

fn run(args: &Args) -> Result<Report, Box<dyn std::error::Error>> {
    let options = Options::new()
        .data_associations(args.data_associations)
        .legacy_rules(args.legacy_rules);
    let inputs = read_inputs(&args.files)?;
    Ok(report(&inputs, &options, args.pretty)?)
}

fn read_inputs(files: &[PathBuf]) -> Result<Vec<Input>, std::io::Error> {
    if files.is_empty() {
        return Ok(vec![read_stdin()?]);
    }
    files
        .iter()
        .map(|path| {
            if path == Path::new(STDIN) {
                read_stdin()
            } else {
                Ok(Input::from_bytes(path.display().to_string(), std::fs::read(path)?))
            }
        })
        .collect()
}

fn read_stdin() -> Result<Input, std::io::Error> {
    let mut bytes = Vec::new();
    std::io::stdin().read_to_end(&mut bytes)?;
    Ok(Input::from_bytes(STDIN, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpmn_analyzer::{EXIT_CLIENT_ERROR, EXIT_SUCCESS};

    fn args(files: &[&Path]) -> Args {
        Args::parse_from(std::iter::once(Path::new("bpmn-analyzer")).chain(files.iter().copied()))
    }

    #[test]
    fn missing_file_is_internal_failure() {
        assert!(run(&args(&[Path::new("demos/does-not-exist.bpmn")])).is_err());
    }

    #[test]
    fn reads_files_from_disk() -> Result<(), Box<dyn std::error::Error>> {
        let report = run(&args(&[Path::new("demos/simple.bpmn")]))?;
        assert_eq!(report.code, EXIT_SUCCESS);
        assert!(report.output.is_some());
        Ok(())
    }

    #[test]
    fn non_utf8_file_is_client_error() -> Result<(), Box<dyn std::error::Error>> {
        let path = std::env::temp_dir().join(format!("bpmn-analyzer-{}.bpmn", std::process::id()));
        std::fs::write(&path, b"<definitions name=\"caf\xe9\"/>")?;
        let report = run(&args(&[path.as_path()]));
        std::fs::remove_file(&path)?;

        let report = report?;
        assert_eq!(report.code, EXIT_CLIENT_ERROR);
        assert_eq!(report.output, None);
        assert_eq!(report.errors.len(), 1);
        Ok(())
    }
}
