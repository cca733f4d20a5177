//! Terminal output: formatting helpers and the render surface

pub mod console;
pub mod surface;
