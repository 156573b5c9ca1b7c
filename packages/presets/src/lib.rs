//! Named prop bundles for catalog components.
//!
//! A preset targets one component type. Applying it overlays its props on a
//! node of that type. Global presets ship with the system and are shared by
//! every tenant; tenant presets are created and owned by a single parish.
//!
//! ```
//! use parchment_presets::{apply_preset, PresetLibrary};
//! use parchment_schema::Node;
//!
//! let library = PresetLibrary::builtin();
//! let preset = library.list_presets("ButtonLink", "st-anne")[0];
//! let node = Node::leaf("b", "ButtonLink").with_prop("label", "Bulletin");
//! let styled = apply_preset(&node, preset).unwrap();
//! assert_eq!(styled.props["label"], "Bulletin");
//! ```

mod builtin;
mod error;
mod library;
mod preset;

pub use builtin::builtin_presets;
pub use error::PresetError;
pub use library::PresetLibrary;
pub use preset::{apply_preset, Preset, PresetScope};
