use super::{Pid, TaskDef};
use crate::SimError;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Parse whitespace-separated `pid arrival burst` triples into task
/// definitions, in input order.
///
/// Line breaks carry no meaning: a triple may share a line with others or
/// span several lines. Reading stops after `max_tasks` tasks; any further
/// tokens are ignored.
pub fn parse_tasks(input: &str, max_tasks: usize) -> Result<Vec<TaskDef>, SimError> {
    let mut tokens = input
        .lines()
        .enumerate()
        .flat_map(|(index, line)| line.split_whitespace().map(move |t| (index + 1, t)));

    let mut defs = Vec::new();
    let mut seen: HashSet<Pid> = HashSet::new();

    while let Some((line_no, first)) = tokens.next() {
        if defs.len() >= max_tasks {
            warn!(
                "Input truncated at {} tasks; ignoring line {} onwards",
                max_tasks, line_no
            );
            break;
        }

        let pid = parse_field(first, line_no)?;
        let arrival = next_field(&mut tokens, line_no)?;
        let burst = next_field(&mut tokens, line_no)?;

        if arrival < 0 {
            return Err(SimError::MalformedInput(format!(
                "line {}: arrival must be non-negative, got {}",
                line_no, arrival
            )));
        }
        if burst <= 0 {
            return Err(SimError::MalformedInput(format!(
                "line {}: burst must be positive, got {}",
                line_no, burst
            )));
        }
        if !seen.insert(pid) {
            return Err(SimError::MalformedInput(format!(
                "line {}: duplicate pid {}",
                line_no, pid
            )));
        }

        defs.push(TaskDef::new(pid, arrival as u64, burst as u64));
    }

    if defs.is_empty() {
        return Err(SimError::MalformedInput("no tasks found".to_string()));
    }

    debug!("Parsed {} task(s)", defs.len());
    Ok(defs)
}

/// Read and parse a task file
pub fn load_tasks(path: impl AsRef<Path>, max_tasks: usize) -> Result<Vec<TaskDef>, SimError> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_tasks(&contents, max_tasks)
}

// `start_line` is where the triple began, reported when input runs out.
fn next_field<'a, I>(tokens: &mut I, start_line: usize) -> Result<i64, SimError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    match tokens.next() {
        Some((line_no, field)) => parse_field(field, line_no),
        None => Err(SimError::MalformedInput(format!(
            "line {}: incomplete `pid arrival burst` triple at end of input",
            start_line
        ))),
    }
}

fn parse_field(field: &str, line_no: usize) -> Result<i64, SimError> {
    field.parse::<i64>().map_err(|_| {
        SimError::MalformedInput(format!("line {}: `{}` is not an integer", line_no, field))
    })
}
