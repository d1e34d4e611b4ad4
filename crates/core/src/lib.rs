//! Stack navigation with slide transitions and an interactive back-swipe, for
//! a retained view tree.

#[macro_use]
pub mod geom;

pub mod color;
pub mod context;
pub mod error;
pub mod framebuffer;
pub mod gesture;
pub mod helpers;
pub mod logging;
pub mod settings;
pub mod transition;
pub mod view;
