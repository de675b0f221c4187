use colored::*;
use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use vmtask_common::task::TaskKind;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub fn style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS)
}

/// Shows which task is running on the span's spinner.
pub fn report_task(span: &Span, kind: TaskKind, idx: usize, total: usize) {
    let counter: String = format!("[{}/{}]", idx + 1, total);
    span.pb_set_message(&format!(
        "{} Running {}...",
        counter.bright_black(),
        kind.label().bold()
    ));
}
