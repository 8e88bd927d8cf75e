//! Collision detection and resolution example
//!
//! Drops a ring of bodies toward a central mass and reports every collision
//! as it is resolved, first with merging and then with bouncing.
//!
//! Run with: cargo run --package nbody --example collision_demo

use nalgebra::{Point3, Vector3};
use nbody::collisions::CollisionOutcome;
use nbody::{CollisionMode, DetectorKind, Simulation, SimulationConfig, SimulationError};
use nbody::{Color, StepReport};

fn build(mode: CollisionMode) -> Result<Simulation, SimulationError> {
    let config = SimulationConfig::visual()
        .with_time_step(0.005)
        .with_softening(1.0)
        .with_collision_mode(mode)
        .with_detector(DetectorKind::Tree);
    let mut sim = Simulation::new(config)?;

    sim.add_body(
        Point3::origin(),
        Vector3::zeros(),
        500.0,
        Color::from_rgb8(255, 200, 80),
    )?;

    for i in 0..12 {
        let angle = i as f64 * std::f64::consts::TAU / 12.0;
        let r = 40.0 + (i % 3) as f64 * 5.0;
        let position = Point3::new(r * angle.cos(), r * angle.sin(), (i % 2) as f64 * 2.0);

        // A little tangential speed so the infall is not perfectly radial
        let velocity = Vector3::new(-angle.sin(), angle.cos(), 0.0) * 3.0;
        let color = Color::from_rgb8((i * 20) as u8, 120, 255 - (i * 20) as u8);
        sim.add_body(position, velocity, 2.0 + i as f64 * 0.5, color)?;
    }

    Ok(sim)
}

fn report(step: usize, report: &StepReport, sim: &Simulation) {
    match report.collision {
        Some(CollisionOutcome::Merged { survivor, absorbed }) => println!(
            "  step {:5}  t={:.3}  body {} absorbed body {} ({} left)",
            step,
            report.time,
            survivor.0,
            absorbed.0,
            sim.body_count()
        ),
        Some(CollisionOutcome::Bounced { first, second }) => println!(
            "  step {:5}  t={:.3}  bodies {} and {} bounced",
            step, report.time, first.0, second.0
        ),
        Some(CollisionOutcome::Skipped { first, second }) => println!(
            "  step {:5}  t={:.3}  bodies {} and {} coincide, skipped",
            step, report.time, first.0, second.0
        ),
        None => {}
    }
}

fn run(mode: CollisionMode, n_steps: usize) -> Result<(), SimulationError> {
    let mut sim = build(mode)?;

    let initial_mass: f64 = sim.bodies().iter().map(|b| b.mass).sum();
    let initial_momentum = sim.total_momentum();

    println!("\n{:?} collisions, {} bodies", mode, sim.body_count());
    println!("{}", "-".repeat(60));

    for step in 0..n_steps {
        let step_report = sim.step();
        report(step, &step_report, &sim);
    }

    let final_mass: f64 = sim.bodies().iter().map(|b| b.mass).sum();
    println!("\n  Bodies remaining: {}", sim.body_count());
    println!("  Mass error: {:.2e}", (final_mass - initial_mass).abs());
    println!(
        "  Momentum error: {:.2e}",
        (sim.total_momentum() - initial_momentum).magnitude()
    );

    Ok(())
}

fn main() -> Result<(), SimulationError> {
    println!("N-body Collision Demo\n");
    println!("{}", "=".repeat(60));

    run(CollisionMode::Inelastic, 4000)?;
    run(CollisionMode::Elastic, 4000)?;

    println!("\n{}", "=".repeat(60));
    Ok(())
}
