//! Library half of the `groupboard` binary, split out so the rendering and
//! navigation code can be exercised from integration tests.

pub mod commands;
pub mod interactive;
pub mod pins;
pub mod render;
