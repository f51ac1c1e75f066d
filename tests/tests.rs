use std::f64::consts::FRAC_PI_2;
use std::path::PathBuf;

use approx::assert_relative_eq;

use kinesim::simulation::collision::MIN_DIGITS;
use kinesim::simulation::forces::{elastic_exchange, HookeSpring};
use kinesim::simulation::gravity_field::MAX_ROW_PHOTONS;
use kinesim::simulation::params::{MIN_LENGTH, MIN_MASS, MIN_STIFFNESS};
use kinesim::simulation::pendulum::{angular_accelerations, resolve_positions};
use kinesim::simulation::scenario::ControlScript;
use kinesim::configuration::config::ControlSegment;
use kinesim::{
    clamp_length, mass_for_digits, Anchor, Block, ChainConfig, ChainControls, Collision, CollisionConfig,
    CollisionInput, ConfigError, Controls, DoublePendulum, FieldConfig, FieldRequest, GravityField, MassiveBody,
    NVec3, PendulumConfig, PendulumControls, PendulumNode, Photon, Scenario, ScenarioConfig, SpawnAxis, Spring,
    SpringChain, SpringParticle, Simulation, Trail, Vehicle, VehicleConfig,
};

const NO_REQUESTS: &[FieldRequest] = &[];

/// Tick a simulation `n` times with the same input
fn run<S: Simulation>(sim: &mut S, n: usize, dt: f64, input: &S::Input) {
    for _ in 0..n {
        sim.tick(dt, input);
    }
}

/// Field with the body moved to the origin, everything else default
fn field_at_origin() -> GravityField {
    GravityField::new(&FieldConfig {
        body_position: NVec3::zeros(),
        ..FieldConfig::default()
    })
}

/// Collision demo with the given digit count, ticked until no contact is possible
fn settle_collision(digits: u32, frame_cap: usize) -> Collision {
    let config = CollisionConfig {
        mass_digits: digits,
        ..CollisionConfig::default()
    };
    let input = CollisionInput { mass_digits: digits };
    let mut sim = Collision::new(&config);

    let mut frames = 0;
    while !sim.is_settled() && frames < frame_cap {
        sim.tick(1.0, &input);
        frames += 1;
    }
    sim
}

/// Parse a YAML scenario from a string
fn scenario_from_str(yaml: &str) -> Result<Scenario, ConfigError> {
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).expect("test yaml must parse");
    Scenario::build_scenario(cfg)
}

// ==================================================================================
// Vector and trail tests
// ==================================================================================

#[test]
fn clamp_length_preserves_direction() {
    let v = NVec3::new(3.0, 4.0, 0.0);

    let shorter = clamp_length(&v, 0.0, 2.5);
    assert_relative_eq!(shorter.norm(), 2.5, epsilon = 1e-12);
    assert_relative_eq!(shorter.x / shorter.y, 0.75, epsilon = 1e-12);

    let longer = clamp_length(&v, 10.0, 20.0);
    assert_relative_eq!(longer.norm(), 10.0, epsilon = 1e-12);

    let same = clamp_length(&v, 1.0, 9.0);
    assert_eq!(same, v);
}

#[test]
fn clamp_length_keeps_zero_vector() {
    let zero = clamp_length(&NVec3::zeros(), 5.0, 5.0);
    assert_eq!(zero, NVec3::zeros());
}

#[test]
fn trail_evicts_oldest_beyond_capacity() {
    let mut trail = Trail::new(3);
    for i in 0..5 {
        trail.push(NVec3::new(i as f64, 0.0, 0.0));
    }

    assert_eq!(trail.len(), 3);
    let xs: Vec<f64> = trail.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    assert_eq!(trail.latest().map(|p| p.x), Some(4.0));
}

#[test]
fn trail_capacity_is_at_least_one() {
    let mut trail = Trail::new(0);
    trail.push(NVec3::zeros());
    trail.push(NVec3::new(1.0, 0.0, 0.0));
    assert_eq!(trail.capacity(), 1);
    assert_eq!(trail.len(), 1);
}

// ==================================================================================
// Vehicle tests
// ==================================================================================

#[test]
fn vehicle_coasts_to_exact_rest() {
    let config = VehicleConfig::default();
    let mut car = Vehicle::new(&config);
    car.velocity = NVec3::new(0.0, 0.0, -config.max_speed);

    let bound = (config.max_speed / config.friction).ceil() as usize;
    run(&mut car, bound, 1.0, &Controls::default());
    assert_eq!(car.speed(), 0.0, "still moving after {bound} ticks");

    // and it stays there
    let resting = car.position;
    run(&mut car, 100, 1.0, &Controls::default());
    assert_eq!(car.speed(), 0.0);
    assert_eq!(car.position, resting);
}

#[test]
fn vehicle_coasts_to_rest_at_any_frame_length() {
    let config = VehicleConfig::default();
    let bound = (config.max_speed / config.friction).ceil() as usize;

    for dt in [1.0, 0.5, 0.2, 0.1] {
        let mut car = Vehicle::new(&config);
        car.velocity = NVec3::new(0.0, 0.0, -config.max_speed);

        run(&mut car, bound, dt, &Controls::default());
        assert_eq!(car.speed(), 0.0, "dt = {dt}: still moving after {bound} ticks");

        run(&mut car, 100, dt, &Controls::default());
        assert_eq!(car.speed(), 0.0, "dt = {dt}: moving again");
    }
}

#[test]
fn frame_length_only_scales_the_drift() {
    let config = VehicleConfig::default();
    let forward = Controls { forward: true, left: true, ..Controls::default() };
    let mut full = Vehicle::new(&config);
    let mut short = Vehicle::new(&config);

    run(&mut full, 20, 1.0, &forward);
    run(&mut short, 20, 0.1, &forward);

    assert_eq!(full.velocity, short.velocity);
    assert_eq!(full.heading, short.heading);
    assert!((short.position - config.start).norm() < (full.position - config.start).norm());
}

#[test]
fn vehicle_forward_travels_along_negative_z() {
    let config = VehicleConfig::default();
    let mut car = Vehicle::new(&config);
    let forward = Controls { forward: true, ..Controls::default() };

    run(&mut car, 10, 1.0, &forward);

    assert!(car.position.z < config.start.z, "car did not move forward");
    assert_eq!(car.position.x, config.start.x);
    assert_eq!(car.heading, 0.0);
}

#[test]
fn vehicle_speed_stays_within_bounds() {
    let config = VehicleConfig::default();
    let mut car = Vehicle::new(&config);
    let held = Controls { forward: true, left: true, ..Controls::default() };

    for _ in 0..1000 {
        car.tick(1.0, &held);
        assert!(car.speed() <= config.max_speed + 1e-9);
    }
}

#[test]
fn vehicle_does_not_steer_at_rest() {
    let mut car = Vehicle::new(&VehicleConfig::default());
    let left = Controls { left: true, ..Controls::default() };

    run(&mut car, 50, 1.0, &left);
    assert_eq!(car.heading, 0.0);
}

#[test]
fn vehicle_steering_sense_flips_in_reverse() {
    let left_forward = Controls { forward: true, left: true, ..Controls::default() };
    let left_reverse = Controls { reverse: true, left: true, ..Controls::default() };

    let mut car = Vehicle::new(&VehicleConfig::default());
    car.tick(1.0, &left_forward);
    assert!(car.heading > 0.0, "left while driving forward should increase the heading");

    let mut car = Vehicle::new(&VehicleConfig::default());
    car.tick(1.0, &left_reverse);
    assert!(car.heading < 0.0, "left while reversing should decrease the heading");
}

#[test]
fn vehicle_reset_returns_to_start() {
    let config = VehicleConfig::default();
    let mut car = Vehicle::new(&config);
    run(&mut car, 30, 1.0, &Controls { forward: true, right: true, ..Controls::default() });

    car.reset(&config);
    assert_eq!(car.position, config.start);
    assert_eq!(car.velocity, NVec3::zeros());
    assert_eq!(car.heading, 0.0);
}

// ==================================================================================
// Gravity field tests
// ==================================================================================

#[test]
fn horizon_radius_follows_mass() {
    let mut body = MassiveBody::new(NVec3::zeros(), 6500.0, 5.0, 30.0);
    assert_relative_eq!(body.radius(), 2.0 * 5.0 * 6500.0 / 900.0, epsilon = 1e-12);

    body.set_mass(13000.0);
    assert_relative_eq!(body.radius(), 2.0 * 5.0 * 13000.0 / 900.0, epsilon = 1e-12);

    body.set_c(60.0);
    assert_relative_eq!(body.radius(), 2.0 * 5.0 * 13000.0 / 3600.0, epsilon = 1e-12);
}

#[test]
fn photon_speed_stays_c_every_tick() {
    let mut field = GravityField::new(&FieldConfig::default());
    let c = field.body.c();
    field.tick(0.2, &[FieldRequest::SpawnRow(SpawnAxis::Y), FieldRequest::SpawnRow(SpawnAxis::Z)]);

    for _ in 0..500 {
        field.tick(0.2, &[]);
        for p in field.photons() {
            assert_relative_eq!(p.speed(), c, max_relative = 1e-9);
        }
    }
}

#[test]
fn pull_at_zero_distance_stays_finite() {
    let body = MassiveBody::new(NVec3::zeros(), 6500.0, 5.0, 30.0);

    // exactly on the body: no direction, velocity untouched
    let mut on_top = Photon::new(NVec3::zeros(), 30.0, 10);
    body.pull(&mut on_top);
    assert_eq!(on_top.velocity, NVec3::new(-30.0, 0.0, 0.0));

    // almost on the body: the distance floor keeps the kick finite
    let mut close = Photon::new(NVec3::new(1e-12, 1e-12, 0.0), 30.0, 10);
    body.pull(&mut close);
    assert!(close.velocity.iter().all(|x| x.is_finite()));
    assert_relative_eq!(close.speed(), 30.0, max_relative = 1e-9);
}

#[test]
fn spawn_rows_are_evenly_spaced() {
    let mut field = GravityField::new(&FieldConfig::default());
    field.tick(0.0, &[FieldRequest::SpawnRow(SpawnAxis::Y), FieldRequest::SpawnRow(SpawnAxis::Z)]);

    // offsets 0, 30, ... below 600 - radius (about 527.8)
    let end = 600.0 - field.body.radius();
    assert_eq!(field.along_y.len(), 18);
    assert_eq!(field.along_z.len(), 18);

    assert_eq!(field.along_y[1].position, NVec3::new(400.0, 30.0, 0.0));
    assert_relative_eq!(field.along_z[0].position.z, -end, epsilon = 1e-12);
    assert_relative_eq!(field.along_z[1].position.z, 30.0 - end, epsilon = 1e-12);
}

#[test]
fn oversized_row_is_capped() {
    let mut field = GravityField::new(&FieldConfig {
        span: 1.0e15,
        spacing: 1.0e-9, // floored to the minimum length
        trail_capacity: 1,
        ..FieldConfig::default()
    });
    field.tick(0.0, &[FieldRequest::SpawnRow(SpawnAxis::Y)]);

    assert_eq!(field.along_y.len(), MAX_ROW_PHOTONS);
    assert_eq!(field.along_y[1].position.y, MIN_LENGTH);
}

#[test]
fn clear_request_removes_every_photon() {
    let mut field = GravityField::new(&FieldConfig::default());
    field.tick(0.2, &[FieldRequest::SpawnRow(SpawnAxis::Y), FieldRequest::SpawnAt(NVec3::new(0.0, 300.0, 0.0))]);
    assert_eq!(field.photon_count(), 19);

    field.tick(0.2, &[FieldRequest::Clear]);
    assert_eq!(field.photon_count(), 0);
}

#[test]
fn photon_trail_is_bounded() {
    let mut field = GravityField::new(&FieldConfig::default());
    field.tick(0.2, &[FieldRequest::SpawnAt(NVec3::new(400.0, 300.0, 0.0))]);
    run(&mut field, 500, 0.2, NO_REQUESTS);

    let photon = &field.single[0];
    assert_eq!(photon.trail.len(), 200);
}

#[test]
fn photon_on_axis_keeps_speed_and_moves() {
    let mut field = field_at_origin();
    let c = field.body.c();
    let start = NVec3::new(400.0, 0.0, 0.0);
    field.tick(0.2, &[FieldRequest::SpawnAt(start)]);

    for _ in 0..1000 {
        field.tick(0.2, &[]);
        assert_relative_eq!(field.single[0].speed(), c, max_relative = 1e-9);
    }

    let moved = (field.single[0].position - start).norm();
    assert!(moved > 0.0, "photon never moved");
}

#[test]
fn photon_off_axis_is_deflected_and_passes() {
    let mut field = field_at_origin();
    let c = field.body.c();
    let start = NVec3::new(400.0, 600.0, 0.0);
    field.tick(0.2, &[FieldRequest::SpawnAt(start)]);

    let initial_distance = start.norm();
    let mut closest = initial_distance;
    let mut passed = false;

    for _ in 0..1000 {
        field.tick(0.2, &[]);
        let p = &field.single[0];
        assert_relative_eq!(p.speed(), c, max_relative = 1e-9);
        closest = closest.min(p.position.norm());
        passed |= p.position.x < 0.0;
    }

    let p = &field.single[0];
    assert!(closest < initial_distance, "photon never approached the body");
    assert!(passed, "photon never got past the body");
    assert!(p.velocity.y < 0.0, "photon was not bent toward the body");
    assert!((p.position - start).norm() > 0.0);
}

#[test]
fn field_reset_drops_photons() {
    let config = FieldConfig::default();
    let mut field = GravityField::new(&config);
    field.tick(0.2, &[FieldRequest::SpawnRow(SpawnAxis::Z)]);
    field.body.set_mass(1.0);

    field.reset(&config);
    assert_eq!(field.photon_count(), 0);
    assert_eq!(field.body.mass(), config.mass);
}

// ==================================================================================
// Collision tests
// ==================================================================================

#[test]
fn collide_is_inclusive_of_touching() {
    let a = Block::new(0.0, 0.0, 1.0, 50.0);

    assert!(!Block::new(60.0, 0.0, 1.0, 50.0).collide(&a));
    assert!(Block::new(50.0, 0.0, 1.0, 50.0).collide(&a));
    assert!(Block::new(49.0, 0.0, 1.0, 50.0).collide(&a));
    assert!(Block::new(-49.0, 0.0, 1.0, 50.0).collide(&a));
}

#[test]
fn elastic_exchange_conserves_momentum_and_energy() {
    let (m_a, v_a, m_b, v_b) = (1.0, 0.0, 100.0, -1.0);
    let (va, vb) = elastic_exchange(m_a, v_a, m_b, v_b);

    assert_relative_eq!(m_a * va + m_b * vb, m_a * v_a + m_b * v_b, epsilon = 1e-12);
    assert_relative_eq!(
        0.5 * m_a * va * va + 0.5 * m_b * vb * vb,
        0.5 * m_a * v_a * v_a + 0.5 * m_b * v_b * v_b,
        epsilon = 1e-12
    );
}

#[test]
fn block_collision_conserves_momentum() {
    let config = CollisionConfig {
        wall: -1.0e9, // out of reach
        mass_digits: 2,
        ..CollisionConfig::default()
    };
    let mut sim = Collision::new(&config);
    let before = sim.momentum();

    run(&mut sim, 200, 1.0, &CollisionInput { mass_digits: 2 });

    assert!(sim.collisions() >= 1, "blocks never met");
    assert_relative_eq!(sim.momentum(), before, epsilon = 1e-9);
}

#[test]
fn separated_blocks_only_collide_once_they_overlap() {
    let config = CollisionConfig {
        wall: -1.0e9,
        mass_digits: 1,
        sub_steps: 1,
        ..CollisionConfig::default()
    };
    let mut sim = Collision::new(&config);
    let h = 1.0e-3;

    for _ in 0..200_000 {
        let gap = (sim.heavy.position - sim.heavy.half_width) - (sim.light.position + sim.light.half_width);
        let count = sim.collisions();
        sim.step(h);
        if sim.collisions() > count {
            assert!(gap <= 0.0, "contact registered while the gap was {gap}");
            return;
        }
        assert!(gap > 0.0);
    }
    panic!("blocks never collided");
}

#[test]
fn collision_count_spells_pi() {
    assert_eq!(settle_collision(1, 5_000).collisions(), 3);
    assert_eq!(settle_collision(2, 5_000).collisions(), 31);
}

#[test]
fn mass_digits_input_sets_heavy_mass() {
    let mut sim = Collision::new(&CollisionConfig::default());
    sim.tick(1.0, &CollisionInput { mass_digits: 3 });
    assert_eq!(sim.heavy_mass(), 10_000.0);

    assert_eq!(mass_for_digits(0), mass_for_digits(MIN_DIGITS));
    assert_eq!(mass_for_digits(1), 1.0);
    assert_eq!(mass_for_digits(99), 1.0e12);
}

#[test]
fn collision_reset_restores_declared_state() {
    let config = CollisionConfig::default();
    let mut sim = Collision::new(&config);
    run(&mut sim, 300, 1.0, &CollisionInput { mass_digits: 2 });
    assert!(sim.collisions() > 0);

    sim.reset(&config);

    assert_eq!(sim.collisions(), 0);
    assert_eq!(sim.light.position, config.light.position);
    assert_eq!(sim.light.velocity, config.light.velocity);
    assert_eq!(sim.heavy.position, config.heavy.position);
    assert_eq!(sim.heavy.velocity, config.heavy.velocity);
    assert_eq!(sim.light.position, sim.light.reset_position);
    assert_eq!(sim.heavy.velocity, sim.heavy.reset_velocity);
}

// ==================================================================================
// Double pendulum tests
// ==================================================================================

#[test]
fn pendulum_positions_derive_from_anchor() {
    let config = PendulumConfig::default();
    let p = DoublePendulum::new(&config);

    let inner = p.inner();
    let outer = p.outer();
    assert_relative_eq!(inner.position.x, config.pivot.x + 100.0, epsilon = 1e-9);
    assert_relative_eq!(inner.position.y, config.pivot.y, epsilon = 1e-9);
    assert_relative_eq!(outer.position.x, inner.position.x + 100.0, epsilon = 1e-9);
    assert_relative_eq!(outer.position.y, inner.position.y, epsilon = 1e-9);
}

#[test]
fn anchors_resolve_down_a_chain() {
    let mut nodes = vec![
        PendulumNode::new(10.0, 0.0, 1.0, Anchor::Fixed(NVec3::new(0.0, 100.0, 0.0))),
        PendulumNode::new(20.0, 0.0, 1.0, Anchor::Node(0)),
        PendulumNode::new(30.0, 0.0, 1.0, Anchor::Node(1)),
    ];
    resolve_positions(&mut nodes);

    let ys: Vec<f64> = nodes.iter().map(|n| n.position.y).collect();
    assert_eq!(ys, vec![90.0, 70.0, 40.0]);
}

#[test]
fn hanging_pendulum_has_no_acceleration() {
    let config = PendulumConfig {
        start_angle: 0.0,
        ..PendulumConfig::default()
    };
    let p = DoublePendulum::new(&config);
    let (a0, a1) = angular_accelerations(p.inner(), p.outer(), p.gravity);

    assert_relative_eq!(a0, 0.0, epsilon = 1e-15);
    assert_relative_eq!(a1, 0.0, epsilon = 1e-15);
}

#[test]
fn both_accelerations_use_the_prior_state() {
    let config = PendulumConfig::default();
    let mut p = DoublePendulum::new(&config);

    // horizontal start: den = 2 m0, numerator = -g (2 m0 + m1) + m1 g
    let (a0, a1) = angular_accelerations(p.inner(), p.outer(), p.gravity);
    assert_relative_eq!(a0, -0.05, epsilon = 1e-12);
    assert_relative_eq!(a1, 0.0, epsilon = 1e-15);

    p.tick(1.0, &PendulumControls::from(&config));

    // inner: a0 / m0; outer still sees the old, aligned inner angle
    assert_relative_eq!(p.inner().angular_velocity, -0.005, epsilon = 1e-12);
    assert_eq!(p.outer().angular_velocity, 0.0);
}

#[test]
fn mirrored_start_gives_mirrored_motion() {
    let theta = 0.7;
    let right = PendulumConfig { start_angle: theta, ..PendulumConfig::default() };
    let left = PendulumConfig { start_angle: -theta, ..PendulumConfig::default() };
    let mut a = DoublePendulum::new(&right);
    let mut b = DoublePendulum::new(&left);
    let pivot_x = right.pivot.x;

    for tick in 0..=200 {
        for (na, nb) in a.nodes.iter().zip(b.nodes.iter()) {
            assert_relative_eq!(na.position.x - pivot_x, -(nb.position.x - pivot_x), epsilon = 1e-9);
            assert_relative_eq!(na.position.y, nb.position.y, epsilon = 1e-9);
        }
        if tick < 200 {
            a.tick(1.0, &PendulumControls::from(&right));
            b.tick(1.0, &PendulumControls::from(&left));
        }
    }
}

#[test]
fn pendulum_reset_restores_start() {
    let config = PendulumConfig::default();
    let mut p = DoublePendulum::new(&config);
    run(&mut p, 1000, 1.0, &PendulumControls::from(&config));
    assert!(p.outer().angular_velocity != 0.0);

    p.reset(&config);

    for node in &p.nodes {
        assert_eq!(node.angle, FRAC_PI_2);
        assert_eq!(node.angular_velocity, 0.0);
        assert_eq!(node.angular_acceleration, 0.0);
    }
    assert!(p.trail.is_empty());
}

#[test]
fn pendulum_floors_bad_controls() {
    let config = PendulumConfig::default();
    let mut p = DoublePendulum::new(&config);
    let bad = PendulumControls {
        lengths: [0.0, f64::NAN],
        masses: [-3.0, 0.0],
        gravity: 5.0,
    };

    p.tick(1.0, &bad);

    assert_eq!(p.inner().length, MIN_LENGTH);
    assert_eq!(p.outer().length, MIN_LENGTH);
    assert_eq!(p.outer().mass, MIN_MASS);
    for node in &p.nodes {
        assert!(node.angle.is_finite());
        assert!(node.position.iter().all(|x| x.is_finite()));
    }
}

#[test]
fn pendulum_trail_follows_outer_node() {
    let config = PendulumConfig::default();
    let mut p = DoublePendulum::new(&config);
    run(&mut p, 500, 1.0, &PendulumControls::from(&config));

    assert_eq!(p.trail.len(), config.trail_capacity);
    assert_eq!(p.trail.latest(), Some(&p.outer().position));
}

// ==================================================================================
// Spring chain tests
// ==================================================================================

#[test]
fn spring_at_rest_length_exerts_no_force() {
    let law = HookeSpring { k: 0.01, rest_length: 5.0 };
    let f = law.force(&NVec3::new(3.0, 4.0, 0.0), &NVec3::zeros());
    assert_eq!(f.norm(), 0.0);
}

#[test]
fn stretched_spring_pulls_toward_trailing_end() {
    let law = HookeSpring { k: 0.01, rest_length: 5.0 };
    let f = law.force(&NVec3::new(10.0, 0.0, 0.0), &NVec3::zeros());
    assert_relative_eq!(f.x, -0.05, epsilon = 1e-15);

    let compressed = law.force(&NVec3::new(2.0, 0.0, 0.0), &NVec3::zeros());
    assert!(compressed.x > 0.0);
}

#[test]
fn spring_update_moves_only_the_leading_endpoint() {
    let mut particles = vec![
        SpringParticle::new(NVec3::zeros(), 1.0, -0.1),
        SpringParticle::new(NVec3::new(20.0, 0.0, 0.0), 1.0, -0.1),
    ];
    let spring = Spring {
        leading: 1,
        trailing: 0,
        law: HookeSpring { k: 0.01, rest_length: 5.0 },
    };

    spring.update(&mut particles, 0.9, 1.0);

    assert_eq!(particles[0].position, NVec3::zeros());
    assert_eq!(particles[0].velocity, NVec3::zeros());
    assert!(particles[1].position.x < 20.0);
    assert!(particles[1].position.y < 0.0);
}

#[test]
fn first_particle_only_moves_when_dragged() {
    let config = ChainConfig::default();
    let mut chain = SpringChain::new(&config);
    let drag = ChainControls { gravity: -0.1, anchor_x: 30.0 };

    run(&mut chain, 200, 1.0, &drag);

    let anchor = &chain.particles[0];
    assert_eq!(anchor.position, NVec3::new(30.0, config.top, 0.0));
    assert_eq!(anchor.velocity, NVec3::zeros());
}

#[test]
fn gravity_pulls_the_tail_down() {
    let config = ChainConfig::default();
    let mut heavy = SpringChain::new(&config);
    let mut weightless = SpringChain::new(&ChainConfig { gravity: 0.0, ..config.clone() });

    run(&mut heavy, 50, 1.0, &ChainControls { gravity: -0.1, anchor_x: 0.0 });
    run(&mut weightless, 50, 1.0, &ChainControls { gravity: 0.0, anchor_x: 0.0 });

    let (Some(a), Some(b)) = (heavy.tail(), weightless.tail()) else {
        panic!("chain has no particles");
    };
    assert!(a.position.y < b.position.y);
}

#[test]
fn degenerate_chains_tick_safely() {
    for count in [0, 1] {
        let mut chain = SpringChain::new(&ChainConfig { count, ..ChainConfig::default() });
        run(&mut chain, 10, 1.0, &ChainControls { gravity: -0.1, anchor_x: 5.0 });
        assert_eq!(chain.particles.len(), count);
        assert!(chain.springs.is_empty());
    }

    let floppy = SpringChain::new(&ChainConfig { k: -1.0, ..ChainConfig::default() });
    assert_eq!(floppy.springs[0].law.k, MIN_STIFFNESS);
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn bundled_scenarios_build_and_run() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    let names = ["vehicle", "gravity_field", "collision", "pendulum", "spring_chain"];

    for name in names {
        let text = std::fs::read_to_string(dir.join(format!("{name}.yaml"))).expect("scenario file");
        let mut scenario = scenario_from_str(&text).expect("scenario builds");
        assert_eq!(scenario.name(), name);

        scenario.run(5, |_| {});
        assert_eq!(scenario.frame(), 5);
        assert!(!scenario.summary().is_empty());
    }
}

#[test]
fn malformed_vector_is_rejected() {
    let yaml = "demo:\n  kind: vehicle\n  start: [1.0, 2.0]\n";
    let err = scenario_from_str(yaml).unwrap_err();
    assert_eq!(err, ConfigError::VectorLength { field: "start", expected: 3, got: 2 });
}

#[test]
fn digits_out_of_range_are_rejected() {
    let yaml = "demo:\n  kind: collision\n  mass_digits: 9\n";
    let err = scenario_from_str(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::DigitsOutOfRange { got: 9, .. }));
}

#[test]
fn non_positive_dt_is_rejected() {
    let yaml = "engine:\n  dt: 0.0\ndemo:\n  kind: pendulum\n";
    let err = scenario_from_str(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::NonPositive { field: "engine.dt", .. }));
}

#[test]
fn control_script_plays_segments_in_order() {
    let script = ControlScript::new(&[
        ControlSegment { frames: 2, forward: true, ..ControlSegment::default() },
        ControlSegment { frames: 1, left: true, ..ControlSegment::default() },
    ]);

    assert_eq!(script.len(), 3);
    assert!(script.controls_at(0).forward);
    assert!(script.controls_at(1).forward);
    assert!(script.controls_at(2).left);
    assert_eq!(script.controls_at(3), Controls::default());
}

#[test]
fn control_script_survives_huge_segments() {
    let script = ControlScript::new(&[
        ControlSegment { frames: usize::MAX, forward: true, ..ControlSegment::default() },
        ControlSegment { frames: usize::MAX, left: true, ..ControlSegment::default() },
    ]);

    assert_eq!(script.len(), usize::MAX);
    assert!(script.controls_at(0).forward);
    assert!(script.controls_at(usize::MAX - 1).forward);
    assert_eq!(script.controls_at(usize::MAX), Controls::default());
}

#[test]
fn missing_engine_block_uses_defaults() {
    let scenario = scenario_from_str("demo:\n  kind: pendulum\n").expect("scenario builds");

    assert_eq!(scenario.engine.dt, 1.0);
    assert_eq!(scenario.engine.frames, 600);
    assert_eq!(scenario.engine.report_every, 60);
}

#[test]
fn collision_scenario_stops_when_settled() {
    let yaml = "engine:\n  frames: 5000\ndemo:\n  kind: collision\n  mass_digits: 1\n";
    let mut scenario = scenario_from_str(yaml).expect("scenario builds");

    scenario.run(5000, |_| {});

    assert!(scenario.is_finished());
    assert!(scenario.frame() < 5000);
}

#[test]
fn scenario_reset_rewinds() {
    let yaml = "demo:\n  kind: gravity_field\n  spawn:\n    rows: [y]\n";
    let mut scenario = scenario_from_str(yaml).expect("scenario builds");
    scenario.run(10, |_| {});

    scenario.reset();
    assert_eq!(scenario.frame(), 0);

    // spawn requests fire again on the rewound first frame
    scenario.step();
    match &scenario.demo {
        kinesim::Demo::GravityField { sim, .. } => assert_eq!(sim.along_y.len(), 18),
        _ => panic!("wrong demo"),
    }
}
