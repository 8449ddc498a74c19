use crate::elements::{Element, ElementTable};
use crate::vector::Vector2;
use bevy::prelude::*;
use rand::Rng;
use std::fmt;

const DEFAULT_ATOM_SIZE: f32 = 25.0;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Stable identity of an atom for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(String);

impl AtomId {
    /// Millisecond timestamp in base 36 followed by five random base-36 characters.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut id = to_base36(timestamp_millis());
        for _ in 0..5 {
            id.push(BASE36[rng.random_range(0..BASE36.len())] as char);
        }
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AtomId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.iter().rev().map(|&b| b as char).collect()
}

#[cfg(not(target_arch = "wasm32"))]
fn timestamp_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

// std's SystemTime is unavailable in the browser; the random suffix alone
// keeps ids apart and the simulation rejects duplicates on insert.
#[cfg(target_arch = "wasm32")]
fn timestamp_millis() -> u64 {
    0
}

/// A naturally occurring variant of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Isotope {
    pub mass_number: u32,
    /// Relative abundance in `[0, 1]`.
    pub abundance: f32,
    pub protons: u32,
    pub neutrons: u32,
    pub electrons: u32,
}

/// Chemical metadata. Drives color and labels only, never physics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomProperties {
    pub atomic_number: Option<u32>,
    pub atomic_mass: Option<f32>,
    pub symbol: Option<String>,
    pub electron_configuration: Option<String>,
    pub atomic_radius: Option<f32>,
    pub electronegativity: Option<f32>,
    pub ionization_energy: Option<f32>,
    pub electron_affinity: Option<f32>,
    pub oxidation_state: Option<i32>,
    pub protons: Option<u32>,
    pub neutrons: Option<u32>,
    pub electrons: Option<u32>,
    pub isotope: Option<Isotope>,
}

impl From<&Element> for AtomProperties {
    fn from(element: &Element) -> Self {
        Self {
            atomic_number: Some(element.number),
            atomic_mass: Some(element.weight),
            symbol: Some(element.symbol.clone()),
            ..default()
        }
    }
}

/// Optional overrides for [`Atom::from_config`].
#[derive(Debug, Clone, Default)]
pub struct AtomConfig {
    pub pos: Vector2,
    pub vel: Vector2,
    pub size: Option<f32>,
    pub friction: Option<f32>,
    pub properties: AtomProperties,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub id: AtomId,
    pub pos: Vector2,
    /// Velocity, and between recomputations the net bond force of the last tick.
    pub vel: Vector2,
    /// Base radius in world units.
    pub size: f32,
    pub friction: f32,
    pub properties: AtomProperties,
}

/// Presentation hints derived from an atom's properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomStyle {
    pub color: Color,
    pub atomic_number_size: f32,
    pub symbol_font_size: f32,
    pub atomic_mass_size: f32,
}

impl Atom {
    pub fn new(id: AtomId, pos: Vector2) -> Self {
        Self::from_config(
            id,
            AtomConfig {
                pos,
                ..default()
            },
        )
    }

    /// Base size grows with atomic mass as `mass^1.2 / 10`; a missing mass counts as 1.
    pub fn from_config(id: AtomId, config: AtomConfig) -> Self {
        let base = config
            .size
            .filter(|s| *s > 0.0)
            .unwrap_or(DEFAULT_ATOM_SIZE);
        let mass = config.properties.atomic_mass.unwrap_or(1.0);
        Self {
            id,
            pos: config.pos,
            vel: config.vel,
            size: base + mass.max(0.0).powf(1.2) / 10.0,
            friction: config.friction.unwrap_or(1.0),
            properties: config.properties,
        }
    }

    pub fn from_element(id: AtomId, pos: Vector2, element: &Element) -> Self {
        Self::from_config(
            id,
            AtomConfig {
                pos,
                properties: element.into(),
                ..default()
            },
        )
    }

    /// A fresh atom of a uniformly chosen element. `None` for an empty table.
    pub fn generate_random<R: Rng + ?Sized>(
        pos: Vector2,
        rng: &mut R,
        table: &ElementTable,
    ) -> Option<Self> {
        let id = AtomId::generate(rng);
        let element = table.random(rng)?;
        Some(Self::from_element(id, pos, element))
    }

    /// Whether `point` lies within the atom's base radius.
    pub fn contains(&self, point: Vector2) -> bool {
        self.pos.distance(point) <= self.size
    }

    /// Drawn radius: swells slightly with speed, capped at 20% over `size`.
    pub fn animated_size(&self) -> f32 {
        self.size * (1.0 + self.vel.length().min(self.size * 2.0) / (self.size * 10.0))
    }

    /// Fill color keyed on atomic number, spread around the hue wheel by the golden angle.
    pub fn fill_color(&self) -> Color {
        let number = self.properties.atomic_number.unwrap_or(0) as f32;
        Color::hsl((number * 137.508).rem_euclid(360.0), 0.5, 0.5)
    }

    pub fn style(&self) -> AtomStyle {
        let mut style = AtomStyle {
            color: Color::srgb_u8(0x00, 0x95, 0xDD),
            atomic_number_size: 10.0,
            symbol_font_size: 24.0,
            atomic_mass_size: 8.0,
        };
        let props = &self.properties;
        if let Some(en) = props.electronegativity {
            style.color = if en <= 1.0 {
                Color::srgb_u8(0x74, 0xD7, 0x7F)
            } else if en <= 2.0 {
                Color::srgb_u8(0xFF, 0xF1, 0x76)
            } else {
                Color::srgb_u8(0xFF, 0x70, 0x43)
            };
        }
        if let Some(number) = props.atomic_number {
            style.atomic_number_size = (number as f32 / 10.0).clamp(8.0, 20.0);
        }
        if let Some(mass) = props.atomic_mass {
            style.atomic_mass_size = (mass / 40.0).clamp(6.0, 14.0);
        }
        if let Some(symbol) = &props.symbol {
            style.symbol_font_size =
                (style.symbol_font_size + symbol.chars().count() as f32 * 2.0).clamp(16.0, 32.0);
        }
        style
    }
}
