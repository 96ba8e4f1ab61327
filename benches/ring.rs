//! Ring construction and relinking at large roster sizes.
//!
//! The game never sees more than a few dozen players; this exists to show
//! both operations stay linear well past that.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use manhunt::ring;
use manhunt::{GameRng, PlayerIdentity, Roster};

fn roster_of(n: usize) -> Roster {
    let mut roster = Roster::new();
    for i in 0..n {
        roster
            .register(PlayerIdentity::new(format!("player#{i}")), format!("Player {i}"))
            .unwrap();
    }
    roster
}

fn bench_build(c: &mut Criterion) {
    let mut rng = GameRng::new(42);
    let base = roster_of(1000);

    c.bench_function("ring_build_1000", |b| {
        b.iter_batched(
            || base.clone(),
            |mut roster| ring::build(&mut roster, &mut rng).unwrap(),
            BatchSize::SmallInput,
        );
    });
}

fn bench_relink(c: &mut Criterion) {
    let mut ready = roster_of(1000);
    ring::build(&mut ready, &mut GameRng::new(42)).unwrap();
    let victim = PlayerIdentity::new("player#500");

    c.bench_function("relink_on_elimination_1000", |b| {
        b.iter_batched(
            || ready.clone(),
            |mut roster| {
                roster.get_mut(&victim).unwrap().mark_dead();
                ring::relink_on_elimination(&mut roster, &victim)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_build, bench_relink);
criterion_main!(benches);
