use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use vibe_core::clock::VirtualClock;
use vibe_core::console::MemoryConsole;
use vibe_core::System;
use vibe_n64::Session;

fn main() {
    let seed = env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(64);

    let console = MemoryConsole::new();
    let mut sess = Session::new("super_vibe_64.z64", None, StdRng::seed_from_u64(seed))
        .unwrap()
        .with_console(Box::new(console.clone()))
        .with_clock(Box::new(VirtualClock::new()));

    let summary = sess.run().unwrap();
    println!(
        "Headless session (seed {}): {} frames, {} lines of output",
        seed,
        summary.frames,
        console.lines().len()
    );
    println!(
        "Debug state: {}",
        serde_json::to_string_pretty(&sess.debug_state()).unwrap()
    );
}
