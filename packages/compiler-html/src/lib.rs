//! HTML output for rendered pages.
//!
//! Takes the virtual DOM produced by `parchment-evaluator` and writes it out as
//! an HTML string, either as a body fragment or as a complete page.

mod compiler;

pub use compiler::{
    compile_to_html, CompileError, CompileOptions, MAX_NESTING, MISSING_COMPONENT_CLASS,
};
