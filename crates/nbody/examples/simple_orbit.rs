//! Simple orbital integration example
//!
//! A light body on a circular orbit around a heavy one, using the visual
//! gravity scale. Prints the energy drift of the semi-implicit Euler
//! integrator once per orbit.
//!
//! Run with: cargo run --package nbody --example simple_orbit

use nalgebra::{Point3, Vector3};
use nbody::{Color, Simulation, SimulationConfig, SimulationError};

fn main() -> Result<(), SimulationError> {
    println!("N-body Integrator Test: Single Body Orbit\n");
    println!("{}", "=".repeat(60));

    let central_mass = 1000.0;
    let orbiter_mass = 1.0;
    let r = 100.0;

    let base = SimulationConfig::visual();
    let g = base.effective_g();
    let v_circular = (g * (central_mass + orbiter_mass) / r).sqrt();
    let orbital_period = 2.0 * std::f64::consts::PI * r / v_circular;
    let steps_per_orbit = 1000;

    let config = base.with_time_step(orbital_period / steps_per_orbit as f64);
    let mut sim = Simulation::new(config)?;

    // Zero total momentum so the pair orbits a fixed center of mass
    let recoil = -v_circular * orbiter_mass / central_mass;
    sim.add_body(
        Point3::origin(),
        Vector3::new(0.0, recoil, 0.0),
        central_mass,
        Color::from_rgb8(255, 220, 120),
    )?;
    sim.add_body(
        Point3::new(r, 0.0, 0.0),
        Vector3::new(0.0, v_circular, 0.0),
        orbiter_mass,
        Color::from_rgb8(80, 140, 255),
    )?;

    println!("\nInitial conditions:");
    println!("  G (scaled): {:.4}", g);
    println!("  Orbital radius: {:.1}", r);
    println!("  Circular velocity: {:.4}", v_circular);
    println!("  Period: {:.4} ({} steps/orbit)", orbital_period, steps_per_orbit);

    let initial_energy = sim.total_energy();
    println!("  Total energy: {:.6e}", initial_energy);

    let n_orbits = 10;
    println!("\nIntegrating...");
    for orbit in 1..=n_orbits {
        sim.run(steps_per_orbit);

        let separation = (sim.bodies()[1].position - sim.bodies()[0].position).magnitude();
        let energy_error = ((sim.total_energy() - initial_energy) / initial_energy).abs();
        println!(
            "Orbit {}: separation={:.4}, ΔE={:.2e}, p={:.2e}",
            orbit,
            separation,
            energy_error,
            sim.total_momentum().magnitude()
        );
    }

    println!("\n{}", "=".repeat(60));
    println!("Final time: {:.4}", sim.time());
    println!("Bodies remaining: {}", sim.body_count());

    Ok(())
}
