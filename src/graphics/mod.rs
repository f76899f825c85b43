mod renderer;
mod layout;

pub use renderer::*;
pub use layout::*;
