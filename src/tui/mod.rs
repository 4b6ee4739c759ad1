pub mod cards;
pub mod footer;
pub mod header;
pub mod palette;
pub mod render;
pub mod spinner;
