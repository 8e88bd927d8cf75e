use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::body::{BodyId, Color};
use crate::collisions::CollisionOutcome;
use crate::config::{CollisionMode, DetectorKind, SimulationConfig};
use crate::error::SimulationError;
use crate::simulation::Simulation;

/// No gravity, so only collisions change velocities
fn weightless(dt: f64) -> Simulation {
    Simulation::new(
        SimulationConfig::default()
            .with_gravitational_constant(0.0)
            .with_time_step(dt),
    )
    .unwrap()
}

fn add(sim: &mut Simulation, mass: f64, position: [f64; 3], velocity: [f64; 3]) -> BodyId {
    sim.add_body(
        Point3::from(position),
        Vector3::from(velocity),
        mass,
        Color::WHITE,
    )
    .unwrap()
}

#[test]
fn test_new_rejects_invalid_config() {
    let bad = [
        SimulationConfig::default().with_time_step(0.0),
        SimulationConfig::default().with_time_step(f64::NAN),
        SimulationConfig::default().with_density(-1.0),
        SimulationConfig::default().with_gravitational_constant(f64::INFINITY),
        SimulationConfig::default().with_gravity_scale(-2.0),
        SimulationConfig::default().with_softening(-0.1),
    ];

    for config in bad {
        assert!(matches!(
            Simulation::new(config),
            Err(SimulationError::InvalidConfig { .. })
        ));
    }
}

#[test]
fn test_invalid_config_names_field() {
    let err = SimulationConfig::default()
        .with_density(0.0)
        .validate()
        .unwrap_err();

    assert_eq!(
        err,
        SimulationError::InvalidConfig {
            field: "density",
            value: 0.0
        }
    );
}

#[test]
fn test_add_body_rejects_invalid_mass() {
    let mut sim = weightless(1.0);

    for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let result = sim.add_body(Point3::origin(), Vector3::zeros(), mass, Color::WHITE);
        assert!(matches!(result, Err(SimulationError::InvalidMass(_))));
    }
    assert_eq!(sim.body_count(), 0);
}

#[test]
fn test_add_body_rejects_non_finite_vectors() {
    let mut sim = weightless(1.0);

    let result = sim.add_body(
        Point3::new(f64::NAN, 0.0, 0.0),
        Vector3::zeros(),
        1.0,
        Color::WHITE,
    );
    assert_eq!(
        result,
        Err(SimulationError::NonFiniteVector { field: "position" })
    );

    let result = sim.add_body(
        Point3::origin(),
        Vector3::new(0.0, f64::NEG_INFINITY, 0.0),
        1.0,
        Color::WHITE,
    );
    assert_eq!(
        result,
        Err(SimulationError::NonFiniteVector { field: "velocity" })
    );

    assert_eq!(sim.body_count(), 0);
}

#[test]
fn test_add_body_assigns_sequential_ids() {
    let mut sim = weightless(1.0);

    let a = add(&mut sim, 1.0, [0.0; 3], [0.0; 3]);
    let b = add(&mut sim, 1.0, [10.0, 0.0, 0.0], [0.0; 3]);

    assert_eq!(a, BodyId(0));
    assert_eq!(b, BodyId(1));
    assert_eq!(sim.body_count(), 2);
}

#[test]
fn test_remove_previous_body_on_empty() {
    let mut sim = weightless(1.0);

    assert!(sim.remove_previous_body().is_none());
    assert_eq!(sim.body_count(), 0);
}

#[test]
fn test_remove_then_add_restores_positions() {
    let mut sim = weightless(1.0);
    add(&mut sim, 1.0, [0.0; 3], [0.0; 3]);
    add(&mut sim, 2.0, [10.0, 0.0, 0.0], [0.0; 3]);
    let before = sim.body_positions();

    let removed = sim.remove_previous_body().unwrap();
    assert_eq!(sim.body_count(), 1);
    assert_eq!(removed.mass, 2.0);

    add(&mut sim, 2.0, [10.0, 0.0, 0.0], [0.0; 3]);
    assert_eq!(sim.body_positions(), before);
}

#[test]
fn test_single_body_moves_in_straight_line() {
    let config = SimulationConfig::visual().with_time_step(0.5);
    let mut sim = Simulation::new(config).unwrap();
    add(&mut sim, 1.0e6, [1.0, 2.0, 3.0], [2.0, -4.0, 8.0]);

    let time = sim.run(4);

    assert_eq!(time, 2.0);
    assert_eq!(sim.time(), 2.0);
    assert_eq!(sim.body_positions(), vec![Point3::new(5.0, -6.0, 19.0)]);
}

#[test]
fn test_step_report_without_collision() {
    let mut sim = weightless(0.25);
    add(&mut sim, 1.0, [0.0; 3], [0.0; 3]);
    add(&mut sim, 1.0, [10.0, 0.0, 0.0], [0.0; 3]);

    let report = sim.step();

    assert_eq!(report.time, 0.25);
    assert!(report.collision.is_none());
}

#[test]
fn test_two_bodies_attract_symmetrically() {
    let config = SimulationConfig::default()
        .with_gravitational_constant(1.0)
        .with_time_step(0.01);
    let mut sim = Simulation::new(config).unwrap();
    add(&mut sim, 1.0, [-5.0, 0.0, 0.0], [0.0; 3]);
    add(&mut sim, 1.0, [5.0, 0.0, 0.0], [0.0; 3]);

    sim.step();

    let bodies = sim.bodies();
    assert!(bodies[0].velocity.x > 0.0);
    assert!(bodies[1].velocity.x < 0.0);
    assert_relative_eq!(bodies[0].velocity.x, -bodies[1].velocity.x);
    assert_relative_eq!(sim.total_momentum(), Vector3::zeros());
}

#[test]
fn test_inelastic_merges_one_pair_per_step() {
    let mut sim = weightless(1.0);
    let a = add(&mut sim, 1.0, [0.0, 0.0, 0.0], [0.0; 3]);
    let b = add(&mut sim, 1.0, [0.5, 0.0, 0.0], [0.0; 3]);
    let c = add(&mut sim, 1.0, [1.0, 0.0, 0.0], [0.0; 3]);

    let report = sim.step();
    assert_eq!(
        report.collision,
        Some(CollisionOutcome::Merged {
            survivor: a,
            absorbed: b
        })
    );
    assert_eq!(sim.body_count(), 2);
    assert_eq!(sim.bodies()[0].mass, 2.0);
    assert_eq!(sim.bodies()[0].position, Point3::new(0.25, 0.0, 0.0));

    let report = sim.step();
    assert_eq!(
        report.collision,
        Some(CollisionOutcome::Merged {
            survivor: a,
            absorbed: c
        })
    );
    assert_eq!(sim.body_count(), 1);
    assert_eq!(sim.bodies()[0].mass, 3.0);
}

#[test]
fn test_elastic_bounces_one_pair_per_step() {
    let mut sim = weightless(0.01);
    sim.set_elastic_collision_mode(true);
    let a = add(&mut sim, 1.0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
    let b = add(&mut sim, 1.0, [0.5, 0.0, 0.0], [0.0; 3]);
    add(&mut sim, 1.0, [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]);

    let report = sim.step();

    assert_eq!(
        report.collision,
        Some(CollisionOutcome::Bounced {
            first: a,
            second: b
        })
    );
    let bodies = sim.bodies();
    assert_relative_eq!(bodies[0].velocity, Vector3::zeros(), epsilon = 1e-12);
    assert_relative_eq!(
        bodies[1].velocity,
        Vector3::new(1.0, 0.0, 0.0),
        epsilon = 1e-12
    );
    // Overlaps both others, but waits for a later step
    assert_eq!(bodies[2].velocity, Vector3::new(-1.0, 0.0, 0.0));
}

#[test]
fn test_merge_conserves_momentum() {
    let mut sim = weightless(0.1);
    add(&mut sim, 1.0, [0.0, 0.0, 0.0], [1.0, 2.0, 0.0]);
    add(&mut sim, 4.0, [1.0, 0.0, 0.0], [-1.0, 0.0, 3.0]);
    let momentum = sim.total_momentum();

    sim.step();

    assert_eq!(sim.body_count(), 1);
    assert_relative_eq!(sim.total_momentum(), momentum, epsilon = 1e-12);
    assert_relative_eq!(sim.bodies()[0].mass, 5.0);
}

#[test]
fn test_elastic_bounce_conserves_momentum_and_energy() {
    let mut sim = weightless(0.1);
    sim.set_elastic_collision_mode(true);
    add(&mut sim, 1.0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
    add(&mut sim, 1.0, [1.5, 0.0, 0.0], [-1.0, 0.0, 0.0]);
    let momentum = sim.total_momentum();
    let energy = sim.kinetic_energy();

    let report = sim.step();

    assert!(matches!(
        report.collision,
        Some(CollisionOutcome::Bounced { .. })
    ));
    assert_eq!(sim.body_count(), 2);
    assert_relative_eq!(sim.total_momentum(), momentum, epsilon = 1e-12);
    assert_relative_eq!(sim.kinetic_energy(), energy, epsilon = 1e-12);
    // Equal masses head-on: velocities swap
    assert_relative_eq!(
        sim.bodies()[0].velocity,
        Vector3::new(-1.0, 0.0, 0.0),
        epsilon = 1e-12
    );
}

#[test]
fn test_elastic_coincident_bodies_are_skipped() {
    let mut sim = weightless(1.0);
    sim.set_elastic_collision_mode(true);
    let a = add(&mut sim, 1.0, [3.0, 3.0, 3.0], [0.0; 3]);
    let b = add(&mut sim, 2.0, [3.0, 3.0, 3.0], [0.0; 3]);

    let report = sim.step();

    assert_eq!(
        report.collision,
        Some(CollisionOutcome::Skipped {
            first: a,
            second: b
        })
    );
    assert_eq!(sim.body_count(), 2);
    assert!(sim.bodies().iter().all(|b| b.velocity == Vector3::zeros()));
}

#[test]
fn test_collision_mode_toggle() {
    let mut sim = weightless(1.0);
    assert_eq!(sim.collision_mode(), CollisionMode::Inelastic);

    sim.set_elastic_collision_mode(true);
    assert_eq!(sim.collision_mode(), CollisionMode::Elastic);

    sim.set_elastic_collision_mode(false);
    assert_eq!(sim.collision_mode(), CollisionMode::Inelastic);
}

#[test]
fn test_collision_mode_from_config() {
    let config = SimulationConfig::default().with_collision_mode(CollisionMode::Elastic);
    let sim = Simulation::new(config.clone()).unwrap();

    assert_eq!(sim.collision_mode(), CollisionMode::Elastic);
    assert_eq!(sim.config(), &config);
}

#[test]
fn test_tree_detector_matches_direct_over_many_steps() {
    let mut rng = ChaChaRng::seed_from_u64(7);
    let base = SimulationConfig::default()
        .with_gravitational_constant(0.5)
        .with_time_step(0.05)
        .with_softening(0.1);

    let mut direct = Simulation::new(base.clone().with_detector(DetectorKind::Direct)).unwrap();
    let mut tree = Simulation::new(base.with_detector(DetectorKind::Tree)).unwrap();

    for _ in 0..60 {
        let position = Point3::new(
            rng.random_range(-30.0..30.0),
            rng.random_range(-30.0..30.0),
            rng.random_range(-30.0..30.0),
        );
        let velocity = Vector3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        let mass = rng.random_range(0.5..4.0);
        direct
            .add_body(position, velocity, mass, Color::WHITE)
            .unwrap();
        tree.add_body(position, velocity, mass, Color::WHITE).unwrap();
    }

    for _ in 0..100 {
        assert_eq!(direct.step(), tree.step());
    }
    assert_eq!(direct.body_positions(), tree.body_positions());
}

#[test]
fn test_energy_diagnostics() {
    let config = SimulationConfig::default().with_gravitational_constant(2.0);
    let mut sim = Simulation::new(config).unwrap();
    add(&mut sim, 1.0, [0.0; 3], [3.0, 0.0, 0.0]);
    add(&mut sim, 2.0, [4.0, 0.0, 0.0], [0.0; 3]);

    // U = -G m1 m2 / r = -2 * 1 * 2 / 4
    assert_relative_eq!(sim.potential_energy(), -1.0);
    assert_relative_eq!(sim.kinetic_energy(), 4.5);
    assert_relative_eq!(sim.total_energy(), 3.5);
}

#[test]
fn test_snapshot_serializes_camel_case() {
    let mut sim = weightless(1.0);
    add(&mut sim, 8.0, [1.0, 2.0, 3.0], [0.0, 1.0, 0.0]);

    let snapshot = sim.snapshot();
    assert_eq!(snapshot.bodies.len(), 1);
    assert_relative_eq!(snapshot.bodies[0].radius, 2.0, epsilon = 1e-12);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["collisionMode"], "inelastic");
    assert_eq!(json["bodies"][0]["id"], 0);
    assert_eq!(json["bodies"][0]["position"][2], 3.0);
    assert_eq!(json["bodies"][0]["velocity"][1], 1.0);
    assert!(json.get("totalEnergy").is_some());
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: SimulationConfig =
        serde_json::from_str(r#"{ "time_step": 0.5, "collision_mode": "elastic" }"#).unwrap();

    assert_eq!(config.time_step, 0.5);
    assert_eq!(config.collision_mode, CollisionMode::Elastic);
    assert_eq!(config.density, 1.0);
    assert_eq!(config.detector, DetectorKind::Direct);
    assert_eq!(config.gravitational_constant, crate::config::G_SI);
}
