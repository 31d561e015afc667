//! Dispatch Performance Benchmarks
//!
//! Measures the cost of priority-ordered attach and of synchronous fan-out
//! through `Publisher::push_update` as the subscriber count grows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use observer_registry::{HistoryObserver, ObserverHandle, Publisher, PublisherConfig};

const SUBSCRIBER_COUNTS: [usize; 4] = [1, 16, 128, 1024];

/// Counting observers with a spread of priorities, including ties
fn create_observers(count: usize) -> Vec<(i32, ObserverHandle<u32, u64>)> {
    (0..count)
        .map(|i| {
            let priority = ((i * 7919) % 64) as i32 - 32;
            let mut total = 0u64;
            let handle = ObserverHandle::from_fn(move |_: &u32, value: &u64| {
                total = total.wrapping_add(*value);
            });
            (priority, handle)
        })
        .collect()
}

fn bench_attach(c: &mut Criterion) {
    let mut group = c.benchmark_group("attach");

    for count in SUBSCRIBER_COUNTS {
        let observers = create_observers(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &observers, |b, observers| {
            b.iter(|| {
                let mut publisher = Publisher::new();
                publisher.add_event(0u32);
                for (priority, handle) in observers {
                    publisher.attach_one(handle, *priority, &0);
                }
                black_box(publisher.subscriber_count(&0))
            });
        });
    }

    group.finish();
}

fn bench_push_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_update");

    for count in SUBSCRIBER_COUNTS {
        let observers = create_observers(count);
        let mut publisher = Publisher::new();
        publisher.add_event(0u32);
        for (priority, handle) in &observers {
            publisher.attach_one(handle, *priority, &0);
        }

        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            let mut value = 0u64;
            b.iter(|| {
                value += 1;
                black_box(publisher.push_update(&0, &value))
            });
        });
    }

    group.finish();
}

fn bench_history_recording(c: &mut Criterion) {
    let mut group = c.benchmark_group("history_recording");

    for history_length in [1usize, 16, 256] {
        let config = PublisherConfig::default().with_history_length(history_length);
        let handle: ObserverHandle<u32, u64> =
            ObserverHandle::new(HistoryObserver::from_config(&config));
        let mut publisher = Publisher::with_config(config);
        publisher.add_event(0);
        publisher.attach_one(&handle, 0, &0);

        group.bench_function(BenchmarkId::from_parameter(history_length), |b| {
            let mut value = 0u64;
            b.iter(|| {
                value += 1;
                black_box(publisher.push_update(&0, &value))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_attach, bench_push_update, bench_history_recording);
criterion_main!(benches);
