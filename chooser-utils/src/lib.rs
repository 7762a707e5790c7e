/// Page math, action tags and the keyboard layout engine.
pub mod pagination;
