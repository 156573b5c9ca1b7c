pub mod catalog;
pub mod evaluator;
pub mod fields;
pub mod registry;
pub mod validator;
pub mod vdom;

pub use catalog::register_builtins;
pub use evaluator::{render, Evaluator, RenderMode, RenderOptions, NODE_ID_ATTR};
pub use fields::{FieldDescriptor, FieldKind, SelectOption};
pub use registry::{ComponentDefinition, RegistryError, Registry, RenderFn, Resolution};
pub use validator::{validate_document, ValidationLevel, ValidationWarning, Validator};
pub use vdom::{Diagnostic, VNode, VirtualDomDocument};
