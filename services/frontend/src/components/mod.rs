//! Auto-loadable island components

pub mod example_card;

pub use example_card::register_defaults;
