use crate::error::{Result, SandboxError};
use rand::Rng;
use serde::Deserialize;

const ELEMENTS_JSON: &str = include_str!("../assets/elements.json");

/// One row of the periodic table.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub symbol: String,
    pub number: u32,
    pub weight: f32,
}

/// Read-only periodic table used when spawning random atoms.
#[derive(Debug, Clone)]
pub struct ElementTable {
    elements: Vec<Element>,
}

impl ElementTable {
    /// The table bundled with the crate (Hydrogen through Krypton).
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(ELEMENTS_JSON)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let elements: Vec<Element> =
            serde_json::from_str(json).map_err(SandboxError::ElementTable)?;
        Ok(Self { elements })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn by_symbol(&self, symbol: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.symbol == symbol)
    }

    /// Uniformly random element, or `None` for an empty table.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Element> {
        if self.elements.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.elements.len());
        self.elements.get(index)
    }
}
