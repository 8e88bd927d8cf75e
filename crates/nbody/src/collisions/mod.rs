//! Collision detection and resolution for N-body systems
//!
//! Detection finds at most one contact per call; resolution either bounces
//! the pair elastically or merges it.

pub mod detection;
pub mod resolution;


pub use detection::{CollisionDetector, Contact, DirectDetector, TreeDetector};
pub use resolution::{CollisionOutcome, elastic_velocities, merge_bodies, resolve_contact};
