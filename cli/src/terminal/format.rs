use std::time::Duration;

use colored::*;
use vmtask_common::task::TaskOutcome;

use crate::terminal::colors;

type Detail = (String, ColoredString);

pub fn outcome_to_details(outcome: &TaskOutcome) -> Vec<Detail> {
    let mut details: Vec<Detail> = Vec::with_capacity(3);
    match &outcome.result {
        Ok(detail) => {
            details.push(("Status".to_string(), "passed".color(colors::PASSED).bold()));
            details.push(("Detail".to_string(), detail.color(colors::TEXT_DEFAULT)));
        }
        Err(e) => {
            details.push(("Status".to_string(), "failed".color(colors::FAILED).bold()));
            details.push(("Error".to_string(), e.to_string().color(colors::FAILED)));
        }
    }
    details.push(("Time".to_string(), seconds(outcome.elapsed).color(colors::TIME)));
    details
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}
