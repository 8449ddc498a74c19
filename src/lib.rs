//! A 2D molecule sandbox: atoms joined by spring bonds that form and break
//! with distance, vertex angles derived from the bond graph, and a Bevy host
//! that drives it from window input.

pub mod angles;
pub mod bond;
pub mod bonding;
pub mod components;
pub mod config;
pub mod cursor;
pub mod elements;
pub mod error;
pub mod interaction;
pub mod render;
pub mod resources;
pub mod sandbox;
pub mod setup;
pub mod simulation;
pub mod ui;
pub mod vector;
pub mod visualization;

pub use crate::angles::AtomsAngle;
pub use crate::bond::{Bond, BondKind};
pub use crate::bonding::{BondChanges, BondToggle, IgnoreReason};
pub use crate::components::{Atom, AtomId, AtomProperties};
pub use crate::config::{KeyBindings, SandboxConfig};
pub use crate::error::{Result, SandboxError};
pub use crate::interaction::{CursorAffordance, InputEvent};
pub use crate::resources::{Settings, TimeMode, World};
pub use crate::sandbox::Simulation;
pub use crate::simulation::FrameClock;
pub use crate::vector::{Vector2, VectorExt};
