use std::time::Duration;

use colored::*;
use tracing::{Instrument, info_span};

use crate::terminal::{colors, format, print, spinner};
use crate::vprint;
use vmtask_common::{
    config::Config,
    task::{TaskKind, TaskReport, TaskRequest},
};
use vmtask_core::{platform, tasks::TaskService};

pub async fn run(request: TaskRequest, cfg: &Config) -> anyhow::Result<TaskReport> {
    let service = TaskService::new(platform::native(cfg)?);

    if cfg.quiet == 0 {
        print::print_status(format!("Platform: {}", service.platform_name()));
        print::print_status(format!("Target path: {}", request.target_path.display()));
        print::print_status(format!("Target ip: {}", request.ip));
        print::print_status(format!("Test batch: {}", request.batch_file.display()));
    }

    print::header("running host tasks", cfg.quiet);

    let span = info_span!("tasks", indicatif.pb_show = true);
    let mut idx: usize = 0;
    let report: TaskReport = {
        let span_ref = span.clone();
        service
            .run_tasks(&request, move |kind| {
                spinner::report_task(&span_ref, kind, idx, TaskKind::ALL.len());
                idx += 1;
            })
            .instrument(span)
            .await
    };

    tasks_end(&report, cfg);
    Ok(report)
}

fn tasks_end(report: &TaskReport, cfg: &Config) {
    if cfg.quiet == 1 {
        vprint!();
    }

    print::header("task report", cfg.quiet);
    if cfg.quiet < 2 {
        print_outcomes(report);
    }
    print_summary(report, cfg);
}

fn print_outcomes(report: &TaskReport) {
    for (idx, outcome) in report.outcomes.iter().enumerate() {
        print::tree_head(idx, outcome.kind.label());
        print::as_tree_one_level(format::outcome_to_details(outcome));
        if idx + 1 != report.outcomes.len() {
            vprint!();
        }
    }
}

fn print_summary(report: &TaskReport, cfg: &Config) {
    let output: String = summary_line(report.passed(), report.outcomes.len(), report.total_time);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
            print::end_of_program();
        }
        _ => print::print(&output),
    }
}

fn summary_line(passed: usize, total: usize, total_time: Duration) -> String {
    let counter: ColoredString = if passed == total {
        format!("{passed}/{total} tasks passed").bold().color(colors::PASSED)
    } else {
        format!("{passed}/{total} tasks passed").bold().color(colors::FAILED)
    };
    let total_time: ColoredString = format::seconds(total_time).bold().color(colors::TIME);
    format!("{}", format!("Tasks Complete: {counter} in {total_time}").color(colors::TEXT_DEFAULT))
}
