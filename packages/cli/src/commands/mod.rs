pub mod init;
pub mod nav;
pub mod new;
pub mod presets;
pub mod render;
pub mod validate;

pub use init::{init, InitArgs};
pub use nav::{nav, NavArgs};
pub use new::{new_page, NewArgs};
pub use presets::{presets, PresetsArgs};
pub use render::{render, RenderArgs};
pub use validate::{validate, ValidateArgs};
