//! Page behaviors wired on load

pub mod regions;
pub mod rut;
