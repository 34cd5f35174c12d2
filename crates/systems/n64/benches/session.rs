use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use vibe_core::clock::VirtualClock;
use vibe_core::console::MemoryConsole;
use vibe_core::System;
use vibe_n64::{Session, SessionConfig};

fn new_session(max_frames: u32) -> Session<StdRng> {
    let config = SessionConfig {
        max_frames,
        ..SessionConfig::default()
    };
    Session::new("bench.z64", None, StdRng::seed_from_u64(64))
        .and_then(|s| s.with_config(config))
        .map(|s| {
            s.with_console(Box::new(MemoryConsole::new()))
                .with_clock(Box::new(VirtualClock::new()))
        })
        .expect("bench session")
}

fn bench_full_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_run");
    for frames in [60u32, 600] {
        group.bench_with_input(BenchmarkId::from_parameter(frames), &frames, |b, &frames| {
            b.iter(|| {
                let mut sess = new_session(frames);
                black_box(sess.run().expect("run"))
            });
        });
    }
    group.finish();
}

fn bench_step_frame(c: &mut Criterion) {
    c.bench_function("step_frame", |b| {
        let mut sess = new_session(u32::MAX);
        sess.load_rom().expect("load");
        b.iter(|| black_box(sess.step_frame().expect("frame")));
    });
}

criterion_group!(benches, bench_full_session, bench_step_frame);
criterion_main!(benches);
