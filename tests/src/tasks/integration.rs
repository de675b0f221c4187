#![cfg(test)]
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

use vmtask_common::config::Config;
use vmtask_common::error::TaskError;
use vmtask_common::task::{TaskKind, TaskReport, TaskRequest};
use vmtask_core::network::resolver::{PtrResolver, ReverseLookup};
use vmtask_core::{platform, tasks::TaskService};

use crate::utils;

fn config() -> Config {
    Config {
        dns_timeout: Duration::from_millis(500),
        http_timeout: Duration::from_secs(2),
        ping_timeout: Duration::from_secs(2),
        use_proxy: false,
        ..Config::default()
    }
}

async fn run(request: &TaskRequest, cfg: &Config) -> TaskReport {
    let service = TaskService::new(platform::native(cfg).unwrap());
    service.run_tasks(request, |_| {}).await
}

/// Mirrors the failing invocation: a missing directory, an address without
/// a PTR answer and a batch file that does not exist.
#[tokio::test]
async fn missing_inputs_fail_every_local_task() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config {
        dns_server: Some(IpAddr::V4(Ipv4Addr::LOCALHOST)),
        ..config()
    };
    let request = TaskRequest {
        target_path: dir.path().join("home2").join("flopezlira"),
        ip: IpAddr::V4(Ipv4Addr::new(125, 88, 88, 99)),
        batch_file: dir.path().join("test2.bat"),
    };

    let report = run(&request, &cfg).await;

    assert!(!report.success());
    assert_eq!(report.outcomes.len(), TaskKind::ALL.len());

    let create = report.outcome(TaskKind::CreateTextFile).unwrap();
    assert!(matches!(create.result, Err(TaskError::PathNotFound(_))));

    let batch = report.outcome(TaskKind::RunTestBatch).unwrap();
    assert!(matches!(batch.result, Err(TaskError::BatchNotFound(_))));
}

#[tokio::test]
async fn unanswered_reverse_lookup_fails_request_and_get() {
    let dns = utils::silent_server().await;
    let dir = tempfile::tempdir().unwrap();
    let request = TaskRequest {
        target_path: dir.path().to_path_buf(),
        ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
        batch_file: dir.path().join("missing.sh"),
    };

    let toolkit = platform::Toolkit::from_config(&config()).unwrap();
    let resolver = ReverseLookup::Server(PtrResolver::new(dns, Duration::from_millis(300)));
    let platform = platform::UnixPlatform::new(platform::Toolkit { resolver, ..toolkit });
    let report = TaskService::new(Box::new(platform)).run_tasks(&request, |_| {}).await;

    let outcome = report.outcome(TaskKind::RequestAndGet).unwrap();
    assert!(matches!(outcome.result, Err(TaskError::Resolve { .. })));
    assert!(report.outcome(TaskKind::CreateTextFile).unwrap().is_success());
}

#[cfg(unix)]
#[tokio::test]
async fn local_tasks_succeed_with_valid_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let batch: PathBuf = dir.path().join("test.sh");
    std::fs::write(&batch, "echo checks passed\n").unwrap();

    let request = TaskRequest {
        target_path: dir.path().to_path_buf(),
        ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
        batch_file: batch,
    };

    let report = run(&request, &config()).await;

    assert!(report.outcome(TaskKind::CreateTextFile).unwrap().is_success());
    assert!(report.outcome(TaskKind::RunTestBatch).unwrap().is_success());
    let hello = std::fs::read_to_string(dir.path().join("Hello.txt")).unwrap();
    assert_eq!(hello, "Hello");
}

#[tokio::test]
async fn request_and_get_resolves_then_fetches() {
    let dns = utils::ptr_server("localhost").await;
    let http_port = utils::http_server("HTTP/1.1 503 Service Unavailable").await;
    let dir = tempfile::tempdir().unwrap();

    let cfg = Config {
        http_port,
        ..config()
    };
    let toolkit = platform::Toolkit::from_config(&cfg).unwrap();
    let resolver = ReverseLookup::Server(PtrResolver::new(dns, cfg.dns_timeout));
    let platform = platform::UnixPlatform::new(platform::Toolkit { resolver, ..toolkit });

    let request = TaskRequest {
        target_path: dir.path().to_path_buf(),
        ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
        batch_file: dir.path().join("missing.sh"),
    };
    let report = TaskService::new(Box::new(platform)).run_tasks(&request, |_| {}).await;

    let outcome = report.outcome(TaskKind::RequestAndGet).unwrap();
    assert_eq!(
        outcome.result.as_deref().ok(),
        Some(format!("http://localhost:{http_port} answered 503").as_str())
    );
}

/// No `--dns-server`: 127.0.0.1 goes through the OS resolver and the hosts file.
#[tokio::test]
async fn request_and_get_uses_os_resolver_by_default() {
    let http_port = utils::http_server("HTTP/1.1 200 OK").await;
    let cfg = Config {
        http_port,
        dns_timeout: Duration::from_secs(3),
        ..config()
    };
    let toolkit = platform::Toolkit::from_config(&cfg).unwrap();
    assert!(matches!(toolkit.resolver, ReverseLookup::System { .. }));

    let answer = toolkit
        .request_and_get(IpAddr::V4(Ipv4Addr::LOCALHOST))
        .await
        .unwrap();
    assert!(answer.hostname.starts_with("localhost"), "got {}", answer.hostname);
    assert_eq!(answer.status, 200);
}

/// Needs a `ping` binary and ICMP permissions.
#[tokio::test]
#[ignore]
async fn loopback_answers_ping() {
    let dir = tempfile::tempdir().unwrap();
    let request = TaskRequest {
        target_path: dir.path().to_path_buf(),
        ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
        batch_file: dir.path().join("missing.sh"),
    };

    let report = run(&request, &config()).await;
    assert!(report.outcome(TaskKind::Ping).unwrap().is_success());
}
