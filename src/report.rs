use crate::{
    analysis::{analyze_all, analyze_str},
    api::Options,
    error::{Error, Result},
};
use log::{error, info};
use serde_json::{Value, json};

/// Exit code for a successful run.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code for I/O and serialization failures.
pub const EXIT_INTERNAL_ERROR: u8 = 1;
/// Exit code when an input is empty, malformed or not BPMN.
pub const EXIT_CLIENT_ERROR: u8 = 2;

const NOT_UTF8: &str = "input is not valid UTF-8";

/// One named document handed to [`report`].
#[derive(Debug, Clone)]
pub struct Input {
    pub name: String,
    pub text: Result<String>,
}

impl Input {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Ok(text.into()),
        }
    }

    /// Raw bytes that are not UTF-8 are malformed input, not an I/O failure.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let text = String::from_utf8(bytes).map_err(|err| Error::MalformedInput {
            message: NOT_UTF8.into(),
            position: err.utf8_error().valid_up_to() as u64,
        });
        Self {
            name: name.into(),
            text,
        }
    }
}

/// What a run writes and how it exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub code: u8,
    /// JSON for standard output.
    pub output: Option<String>,
    /// Client errors for standard error.
    pub errors: Vec<String>,
}

/// Analyze `inputs` the way the command line tool does.
///
/// A single input yields the analysis object, or no output and an error
/// message. Several inputs yield an array of `{"file", "result"}` and
/// `{"file", "error"}` objects in input order. Any client error sets
/// [`EXIT_CLIENT_ERROR`].
pub fn report(inputs: &[Input], options: &Options, pretty: bool) -> serde_json::Result<Report> {
    if let [input] = inputs {
        info!("Analyzing {}", input.name);
        let result = match &input.text {
            Ok(text) => analyze_str(text, options),
            Err(err) => Err(err.clone()),
        };
        return match result {
            Ok(analysis) => Ok(Report {
                code: EXIT_SUCCESS,
                output: Some(to_json(&analysis, pretty)?),
                errors: Vec::new(),
            }),
            Err(err) => {
                error!("{}: {err}", input.name);
                Ok(Report {
                    code: EXIT_CLIENT_ERROR,
                    output: None,
                    errors: vec![err.to_string()],
                })
            }
        };
    }

    let texts: Vec<&str> = inputs
        .iter()
        .map(|input| input.text.as_deref().unwrap_or_default())
        .collect();
    let mut errors = Vec::new();
    let mut entries = Vec::with_capacity(inputs.len());
    for (input, result) in inputs.iter().zip(analyze_all(&texts, options)) {
        let result = match &input.text {
            Ok(_) => result,
            Err(err) => Err(err.clone()),
        };
        entries.push(match result {
            Ok(analysis) => json!({ "file": input.name, "result": analysis }),
            Err(err) => {
                error!("{}: {err}", input.name);
                errors.push(format!("{}: {err}", input.name));
                json!({ "file": input.name, "error": err.to_string() })
            }
        });
    }

    Ok(Report {
        code: if errors.is_empty() {
            EXIT_SUCCESS
        } else {
            EXIT_CLIENT_ERROR
        },
        output: Some(to_json(&Value::Array(entries), pretty)?),
        errors,
    })
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
