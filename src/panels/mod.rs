mod canvas;
mod sidebar;
mod toolbar;

pub use canvas::canvas;
pub use sidebar::sidebar;
pub use toolbar::toolbar;
