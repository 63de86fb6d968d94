//! Domain models for the Fashion Advisor client

mod analysis;
mod failure;
mod state;
mod view;

pub use analysis::*;
pub use failure::*;
pub use state::*;
pub use view::*;
