//! Key binding documentation used by the footer.

pub mod keymap;
