//! Walk through a short mine: dig, staff, retreat, and replay.
//!
//! Run with: `RUST_LOG=magnum_sal=debug cargo run -p magnum-sal --example shaft_walkthrough`

use magnum_sal::prelude::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut game = MagnumSal::new();
    for y in 0..3 {
        game.add_chamber(0, y);
    }
    game.add_chamber(1, 2);

    for (x, y) in [(0, 0), (0, 1), (0, 2), (1, 2)] {
        game.place_miner(x, y)?;
    }

    // Refused: (0, 1) links the entrance to the rest of the shaft.
    match game.remove_miner(0, 1) {
        Ok(_) => println!("unexpectedly removed the middle miner"),
        Err(err) => println!("refused: {err}"),
    }

    game.remove_miner(1, 2)?;

    let layout = game.layout();
    println!("chambers: {}", layout.chambers.len());
    for (at, count) in layout.live_miners() {
        println!("  {at}: {count} miner(s)");
    }

    let record = SessionRecord::capture(&game);
    let mut restored = MagnumSal::new();
    let result = replay(&mut restored, &record)?;
    println!(
        "replayed {} events, completed: {}, hash matches: {}",
        result.events_replayed, result.completed, result.hash_matches
    );

    Ok(())
}
