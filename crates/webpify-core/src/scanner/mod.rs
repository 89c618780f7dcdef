pub mod filter;
pub mod walk;

pub use filter::ExtensionFilter;
pub use walk::{open_root, FileWalker};
