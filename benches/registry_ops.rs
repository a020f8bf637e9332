use criterion::{black_box, criterion_group, criterion_main, Criterion};
use testbench::{format_bytes, TearDownStrategy, TestBench};

fn bench_add_get(c: &mut Criterion) {
    c.bench_function("add_get_help_values", |b| {
        b.iter(|| {
            let mut bench = TestBench::new();
            for i in 0..64 {
                bench.add_help_value(format!("key-{i}"), i, false).unwrap();
            }
            for i in 0..64 {
                black_box(bench.help_value(&format!("key-{i}")).unwrap());
            }
        })
    });
}

fn bench_tear_down(c: &mut Criterion) {
    for (label, strategy) in [
        ("tear_down_clear", TearDownStrategy::Clear),
        ("tear_down_release", TearDownStrategy::Release),
    ] {
        c.bench_function(label, |b| {
            b.iter(|| {
                let mut bench = TestBench::new();
                bench.set_tear_down_strategy(strategy);
                for i in 0..64 {
                    bench.add_help_value(format!("key-{i}"), i, false).unwrap();
                }
                bench.tear_down();
                black_box(&bench);
            })
        });
    }
}

fn bench_format_bytes(c: &mut Criterion) {
    let sizes = [0i64, 512, 1024, 1536, 1_048_576, -73_400_320, 1_099_511_627_776];
    c.bench_function("format_bytes", |b| {
        b.iter(|| {
            for size in sizes {
                black_box(format_bytes(black_box(size)));
            }
        })
    });
}

criterion_group!(benches, bench_add_get, bench_tear_down, bench_format_bytes);
criterion_main!(benches);
