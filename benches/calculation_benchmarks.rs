//! Performance benchmarks for the payroll engine.
//!
//! Covers the pure derivation on growing snapshots and the full report
//! endpoint through the router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{derive_payroll, summarize_payroll};
use payroll_engine::models::{PayrollExtras, Role, TimeLog, User};
use payroll_engine::store::{MemoryStore, Store};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Builds `user_count` users with `days` logs each, alternating split and
/// continuous days, plus extras for every other user.
fn create_snapshot(user_count: usize, days: u32) -> (Vec<User>, Vec<TimeLog>, Vec<PayrollExtras>) {
    let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let mut users = Vec::with_capacity(user_count);
    let mut logs = Vec::with_capacity(user_count * days as usize);
    let mut extras = Vec::new();

    for i in 0..user_count {
        let id = format!("emp_{:04}", i);
        users.push(User {
            id: id.clone(),
            name: format!("Employee {}", i),
            email: format!("emp{}@example.com", i),
            password: None,
            pin: format!("{:04}", i + 1),
            birthday: None,
            role: Role::User,
            hourly_rate: Decimal::new(10000 + i as i64, 2),
            overtime_rate: Decimal::new(15000, 2),
            created_at: Utc::now(),
        });

        for d in 0..days {
            let date = start + Duration::days(d as i64);
            let base = Utc.from_utc_datetime(&date.and_hms_opt(9, 0, 0).unwrap());
            let mut log = TimeLog::open(id.clone(), date);
            log.morning.clock_in = Some(base);
            if d % 2 == 0 {
                log.morning.clock_out = Some(base + Duration::hours(3));
                log.afternoon.clock_in = Some(base + Duration::hours(4));
            }
            log.afternoon.clock_out = Some(base + Duration::hours(8));
            if d % 3 == 0 {
                log.overtime.clock_in = Some(base + Duration::hours(9));
                log.overtime.clock_out = Some(base + Duration::minutes(9 * 60 + 90));
            }
            logs.push(log);
        }

        if i % 2 == 0 {
            extras.push(PayrollExtras {
                incentives: Decimal::new(500, 0),
                cash_advance: Decimal::new(200, 0),
                ..PayrollExtras::empty(id)
            });
        }
    }

    (users, logs, extras)
}

/// Benchmark: derivation plus summary for a growing workforce.
fn bench_derive_payroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_payroll");

    for user_count in [1, 10, 100, 1000].iter() {
        let (users, logs, extras) = create_snapshot(*user_count, 14);

        group.throughput(Throughput::Elements(logs.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("users", user_count),
            user_count,
            |b, _| {
                b.iter(|| {
                    let derivation = derive_payroll(
                        black_box(&users),
                        black_box(&logs),
                        black_box(&extras),
                    );
                    black_box(summarize_payroll(&derivation.entries))
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: report endpoint over a populated in-memory store.
fn bench_report_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let store = Arc::new(MemoryStore::new());
    let (users, logs, extras) = create_snapshot(100, 14);
    for user in users {
        store.upsert_user(user).unwrap();
    }
    for log in logs {
        store.upsert_log(log).unwrap();
    }
    for row in extras {
        store.upsert_extras(row).unwrap();
    }
    let router = create_router(AppState::new(store));

    c.bench_function("report_endpoint_100_users", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .uri("/api/payroll/report")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(benches, bench_derive_payroll, bench_report_endpoint);
criterion_main!(benches);
