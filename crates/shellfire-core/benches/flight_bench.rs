use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use glam::Vec2;
use shellfire_core::clock::ManualClock;
use shellfire_core::entity::{Hitbox, PlayerId, PlayerSpawn};
use shellfire_core::{hash_match_state, Engine, EngineConfig, FlightTick, WeaponId};

fn duel() -> Engine {
    let mut engine =
        Engine::with_clock(EngineConfig::default(), ManualClock::new()).expect("valid config");
    engine.initialize_terrain(1920, 1080.0).expect("valid dimensions");
    let hitbox = Hitbox::from_size(30.0, 20.0);
    engine
        .add_player(
            PlayerId::new(1),
            PlayerSpawn::new(Vec2::new(200.0, 600.0), 60.0, 70.0, hitbox),
        )
        .expect("fresh id");
    engine
        .add_player(
            PlayerId::new(2),
            PlayerSpawn::new(Vec2::new(1700.0, 600.0), 120.0, 70.0, hitbox),
        )
        .expect("fresh id");
    for _ in 0..200 {
        engine.tick_all_player_physics();
    }
    engine
}

fn bench_full_flight(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_flight");
    for weapon in WeaponId::ALL {
        group.bench_function(weapon.as_str(), |b| {
            b.iter_batched(
                || {
                    let mut engine = duel();
                    engine.switch_weapon(PlayerId::new(1), weapon);
                    engine
                },
                |mut engine| {
                    engine.shoot(PlayerId::new(1));
                    let mut ticks = 0u32;
                    while engine.tick_projectile_physics() != FlightTick::Idle {
                        ticks += 1;
                    }
                    black_box(ticks)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_player_physics(c: &mut Criterion) {
    let mut engine = duel();

    c.bench_function("tick_all_player_physics", |b| {
        b.iter(|| engine.tick_all_player_physics());
    });
}

fn bench_state_hash(c: &mut Criterion) {
    let engine = duel();

    c.bench_function("hash_match_state", |b| {
        b.iter(|| hash_match_state(black_box(engine.state())));
    });
}

criterion_group!(benches, bench_full_flight, bench_player_physics, bench_state_hash);
criterion_main!(benches);
