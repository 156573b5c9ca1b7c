use parchment_evaluator::{VNode, VirtualDomDocument};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Class given to the placeholder emitted for nodes that failed to render
pub const MISSING_COMPONENT_CLASS: &str = "pc-missing-component";

/// Deepest element nesting the compiler will write
pub const MAX_NESTING: usize = 384;

/// Errors that can occur during HTML compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Invalid tag name: {0:?}")]
    InvalidTagName(String),

    #[error("Invalid attribute name {name:?} on <{tag}>")]
    InvalidAttributeName { tag: String, name: String },

    #[error("Invalid style property {0:?}")]
    InvalidStyleProperty(String),

    #[error("Elements nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

/// Options for HTML compilation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Wrap the output in a doctype, head and body
    pub full_page: bool,
    /// `<title>` of the full page
    pub title: Option<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            full_page: false,
            title: None,
        }
    }
}

impl CompileOptions {
    pub fn page(title: impl Into<String>) -> Self {
        Self {
            full_page: true,
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Default::default()
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        self.end_line();
    }

    fn end_line(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a rendered page to HTML
#[instrument(skip_all, fields(full_page = options.full_page))]
pub fn compile_to_html(
    document: &VirtualDomDocument,
    options: CompileOptions,
) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);

    if ctx.options.full_page {
        ctx.add_line("<!DOCTYPE html>");
        ctx.add_line("<html>");
        ctx.indent();
        compile_head(&mut ctx);
        ctx.add_line("<body>");
        ctx.indent();
        compile_node(&document.root, 0, &mut ctx)?;
        ctx.dedent();
        ctx.add_line("</body>");
        ctx.dedent();
        ctx.add_line("</html>");
    } else {
        compile_node(&document.root, 0, &mut ctx)?;
    }

    let html = ctx.get_output();
    debug!(bytes = html.len(), "Compiled HTML");
    Ok(html)
}

fn compile_head(ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    if let Some(title) = ctx.options.title.clone() {
        ctx.add_line(&format!("<title>{}</title>", escape_html(&title)));
    }

    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_node(node: &VNode, depth: usize, ctx: &mut Context) -> Result<(), CompileError> {
    if depth > MAX_NESTING {
        return Err(CompileError::NestingTooDeep { limit: MAX_NESTING });
    }

    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            ..
        } => compile_tag(tag, attributes, styles, children, depth, ctx),

        VNode::Text { content } => {
            ctx.add_line(&escape_html(content));
            Ok(())
        }

        VNode::Comment { content } => {
            ctx.add_line(&format!("<!-- {} -->", content.replace("--", "- -")));
            Ok(())
        }

        VNode::Error { message, .. } => {
            ctx.add_line(&format!(
                "<div class=\"{}\">{}</div>",
                MISSING_COMPONENT_CLASS,
                escape_html(message)
            ));
            Ok(())
        }
    }
}

fn compile_tag(
    name: &str,
    attributes: &std::collections::BTreeMap<String, String>,
    styles: &std::collections::BTreeMap<String, String>,
    children: &[VNode],
    depth: usize,
    ctx: &mut Context,
) -> Result<(), CompileError> {
    if !is_valid_name(name) {
        return Err(CompileError::InvalidTagName(name.to_string()));
    }

    let mut open = format!("<{}", name);

    for (attr_name, value) in attributes {
        if !is_valid_name(attr_name) {
            return Err(CompileError::InvalidAttributeName {
                tag: name.to_string(),
                name: attr_name.clone(),
            });
        }
        open.push_str(&format!(" {}=\"{}\"", attr_name, escape_html(value)));
    }

    if !styles.is_empty() {
        let mut declarations = Vec::with_capacity(styles.len());
        for (property, value) in styles {
            if !is_valid_name(property) {
                return Err(CompileError::InvalidStyleProperty(property.clone()));
            }
            declarations.push(format!("{}: {}", property, value));
        }
        open.push_str(&format!(" style=\"{}\"", escape_html(&declarations.join("; "))));
    }

    if is_void_element(name) {
        // Void elements never have content; anything attached is dropped.
        open.push('>');
        ctx.add_line(&open);
        return Ok(());
    }

    open.push('>');

    if children.is_empty() {
        ctx.add_line(&format!("{}</{}>", open, name));
        return Ok(());
    }

    // Text-only content stays on the tag's line.
    if !has_element_children(children) {
        let mut line = open;
        for child in children {
            if let VNode::Text { content } = child {
                line.push_str(&escape_html(content));
            }
        }
        line.push_str(&format!("</{}>", name));
        ctx.add_line(&line);
        return Ok(());
    }

    ctx.add_line(&open);
    ctx.indent();
    for child in children {
        compile_node(child, depth + 1, ctx)?;
    }
    ctx.dedent();
    ctx.add_line(&format!("</{}>", name));

    Ok(())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Tag, attribute and CSS property names: ASCII letters, digits, `-`, `_`, `:`
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}

fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| !matches!(child, VNode::Text { .. }))
}
