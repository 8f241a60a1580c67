//! End-to-end benchmark runs against the simulated fetcher

use clap::Parser;
use std::sync::Arc;
use tempfile::TempDir;
use user_load_bench::bench::{BatchRange, BenchConfig, BenchmarkDriver};
use user_load_bench::chart::{render_all, ChartRenderer, CsvRenderer, PlotlyJsonRenderer};
use user_load_bench::cli::{Cli, Commands};
use user_load_bench::fetcher::simulated::SimulatedFetcher;
use user_load_bench::loader::Strategy;

#[tokio::test]
async fn test_run_command_writes_chart_and_samples() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().to_str().unwrap();
    let cli = Cli::try_parse_from([
        "user-load-bench",
        "--simulate-latency-ms",
        "1",
        "run",
        "--end",
        "12",
        "--quiet",
        "--output-dir",
        output_dir,
    ])
    .unwrap();

    let Commands::Run(args) = cli.command() else {
        panic!("expected run command");
    };
    let report = args.execute(&cli).await.unwrap();

    assert_eq!(report.blocking.batch_sizes(), vec![1, 6, 11]);
    assert_eq!(report.non_blocking.batch_sizes(), vec![1, 6, 11]);
    assert_eq!(report.base_url, "simulated://users");

    let chart = std::fs::read_to_string(temp_dir.path().join("bench_chart.json")).unwrap();
    let chart: serde_json::Value = serde_json::from_str(&chart).unwrap();
    assert_eq!(chart["data"][0]["name"], "Blocking IO Times");
    assert_eq!(chart["data"][1]["name"], "Non-Blocking IO Times");

    let samples = std::fs::read_to_string(temp_dir.path().join("bench_samples.csv")).unwrap();
    // header + 3 samples per series
    assert_eq!(samples.lines().count(), 7);
}

#[tokio::test]
async fn test_no_chart_writes_no_files() {
    let temp_dir = TempDir::new().unwrap();
    let cli = Cli::try_parse_from([
        "user-load-bench",
        "--simulate-latency-ms",
        "0",
        "run",
        "--end",
        "3",
        "--step",
        "1",
        "--no-chart",
        "--quiet",
        "--output-dir",
        temp_dir.path().to_str().unwrap(),
    ])
    .unwrap();

    let Commands::Run(args) = cli.command() else {
        panic!("expected run command");
    };
    args.execute(&cli).await.unwrap();

    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_failing_fetches_still_produce_samples() {
    let fetcher = Arc::new(
        SimulatedFetcher::instant()
            .failing_on_call(1)
            .failing_on_call(5),
    );
    let config = BenchConfig::default().with_batches(BatchRange::new(1, 16, 5).unwrap());

    let report = BenchmarkDriver::new(fetcher, config)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.blocking.batch_sizes(), vec![1, 6, 11]);
    assert_eq!(report.non_blocking.batch_sizes(), vec![1, 6, 11]);
    assert!(report
        .blocking
        .samples()
        .iter()
        .all(|s| s.elapsed_secs >= 0.0));
}

#[tokio::test]
async fn test_report_renders_with_both_file_renderers() {
    let temp_dir = TempDir::new().unwrap();
    let fetcher = Arc::new(SimulatedFetcher::instant());
    let config = BenchConfig::default().with_batches(BatchRange::new(1, 7, 5).unwrap());
    let report = BenchmarkDriver::new(fetcher, config)
        .unwrap()
        .run()
        .await
        .unwrap();

    let renderers: Vec<Box<dyn ChartRenderer>> = vec![
        Box::new(PlotlyJsonRenderer::in_dir(temp_dir.path())),
        Box::new(CsvRenderer::in_dir(temp_dir.path())),
    ];
    render_all(&renderers, &report.series()).unwrap();

    assert!(temp_dir.path().join("bench_chart.json").exists());
    assert!(temp_dir.path().join("bench_samples.csv").exists());
    assert_eq!(report.series()[0].strategy(), Strategy::Blocking);
}
