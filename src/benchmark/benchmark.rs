use std::time::Instant;
use crate::simulation::engine::Simulation;
use crate::simulation::collision::{Collision, CollisionConfig, CollisionInput, MAX_DIGITS, MIN_DIGITS};
use crate::simulation::gravity_field::{FieldConfig, FieldRequest, GravityField, SpawnAxis};

/// Cost of one sub-stepped collision frame for every digit count
/// Also prints how many contacts were counted once the blocks settle
pub fn bench_collision() {
    let frames_cap = 20_000; // stop even if the blocks never settle

    for digits in MIN_DIGITS..=MAX_DIGITS {
        let config = CollisionConfig {
            mass_digits: digits,
            ..CollisionConfig::default()
        };
        let input = CollisionInput { mass_digits: digits };
        let mut sim = Collision::new(&config);

        // Warm up
        sim.tick(1.0, &input);

        let t0 = Instant::now();
        let mut frames = 1;
        while !sim.is_settled() && frames < frames_cap {
            sim.tick(1.0, &input);
            frames += 1;
        }
        let per_frame = t0.elapsed().as_secs_f64() * 1000.0 / frames as f64;

        println!(
            "digits = {digits}, sub-steps = {:6}, frame = {:8.4} ms, frames = {:6}, collisions = {}",
            sim.sub_steps(),
            per_frame,
            frames,
            sim.collisions()
        );
    }
}

/// Cost of one photon tick for growing numbers of spawned rows
pub fn bench_gravity_field() {
    let rows = [1, 4, 16, 64, 256];
    let steps = 100; // ticks per measurement

    for n in rows {
        let mut field = GravityField::new(&FieldConfig::default());

        // Half the rows along y, half along z
        let requests: Vec<FieldRequest> = (0..n)
            .map(|i| FieldRequest::SpawnRow(if i % 2 == 0 { SpawnAxis::Y } else { SpawnAxis::Z }))
            .collect();
        field.tick(0.2, &requests);

        let t0 = Instant::now();
        for _ in 0..steps {
            field.tick(0.2, &[]);
        }
        let per_tick = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("photons = {:6}, tick = {:8.4} ms", field.photon_count(), per_tick);
    }
}
