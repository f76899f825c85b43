pub mod selection;
pub mod state;

pub use selection::Selection;
pub use state::FontEditor;
