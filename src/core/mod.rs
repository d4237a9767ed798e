pub mod icons;
pub mod registry;
pub mod terminal;
