use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vplex_health_probe::classify::SeverityCounts;
use vplex_health_probe::health::{evaluate, HealthReport};
use vplex_health_probe::parsing::format_value;

const CONFIGURATION_REPORT: &str = "Configuration (CONF):\n\
    Checking VPlexCli connectivity to directors........ OK\n\
    Checking Directors Commission...................... OK\n\
    Checking Directors Communication Status............ OK\n\
    Checking Directors Operation Status................ OK\n\
    Checking Inter-director management connectivity.... OK\n\
    Checking ports status.............................. \x1b[31mError\x1b[0m\n\
    Checking Call Home Status.......................... Error\n\
    Checking Connectivity.............................. OK\n\
    Checking Meta Data Backup.......................... Warning\n\
    Checking Meta Data Slot Usage...................... OK\n\
    \n\
    Output to /var/log/VPlex/cli/health_check_full_scan.log\n";

fn classification_benchmark(c: &mut Criterion) {
    let report = HealthReport::from_response(CONFIGURATION_REPORT);

    c.bench_function("severity_counts", |b| {
        b.iter(|| black_box(SeverityCounts::from_lines(report.lines().iter().map(String::as_str))))
    });

    c.bench_function("evaluate_health_check", |b| {
        b.iter(|| black_box(evaluate(&HealthReport::from_response(black_box(CONFIGURATION_REPORT)))))
    });
}

fn format_benchmark(c: &mut Criterion) {
    let values = vec![10.0, 12.34, 0.00001, 2048.0, 1.23456, 987654.321];

    c.bench_function("format_value", |b| {
        b.iter(|| {
            for value in &values {
                black_box(format_value(black_box(*value)));
            }
        })
    });
}

criterion_group!(benches, classification_benchmark, format_benchmark);
criterion_main!(benches);
