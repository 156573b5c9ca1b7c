//! Built-in parish component catalog.
//!
//! Every component renders to plain elements with `pc-` class names; theming is
//! left to the site stylesheet. Dynamic content (events, schedules pulled from
//! the admin side) renders as a hydration placeholder carrying its settings as
//! `data-` attributes.
//!
//! Link and image props are user text that ends up in `href`, `src` and CSS
//! `url()`. Only relative URLs and the schemes in [`SAFE_SCHEMES`] get through;
//! anything else is dropped from the output.

use crate::fields::FieldDescriptor;
use crate::registry::{ComponentDefinition, Registry, RegistryError};
use crate::vdom::VNode;
use parchment_schema::Props;
use serde_json::{json, Value};

fn str_prop<'a>(props: &'a Props, key: &str) -> &'a str {
    props.get(key).and_then(Value::as_str).unwrap_or("")
}

fn num_prop(props: &Props, key: &str) -> Option<f64> {
    props.get(key).and_then(Value::as_f64)
}

fn bool_prop(props: &Props, key: &str) -> bool {
    props.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// URL schemes allowed in rendered links and images
pub const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// The URL if it is relative or uses a safe scheme
fn safe_url(value: &str) -> Option<&str> {
    let url = value.trim();
    if url.is_empty() {
        return None;
    }

    let Some(colon) = url.find(':') else {
        return Some(url);
    };
    let scheme = &url[..colon];
    // A ':' after the path, query or fragment starts is not a scheme separator
    if scheme.contains(['/', '?', '#']) {
        return Some(url);
    }

    // Browsers skip tabs and newlines inside a scheme ("java\tscript:")
    let scheme: String = scheme
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    SAFE_SCHEMES.contains(&scheme.as_str()).then_some(url)
}

/// `href` from a prop, left off entirely when the URL is unsafe
fn with_href(node: VNode, props: &Props, key: &str) -> VNode {
    match safe_url(str_prop(props, key)) {
        Some(url) => node.with_attr("href", url),
        None => node,
    }
}

/// CSS `url("...")` with every character that could end the token percent-encoded
fn css_url(value: &str) -> Option<String> {
    let url = safe_url(value)?;
    let mut encoded = String::with_capacity(url.len());
    for c in url.chars() {
        if matches!(c, '"' | '\'' | '(' | ')' | '\\') || c.is_whitespace() || c.is_control() {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        } else {
            encoded.push(c);
        }
    }
    Some(format!("url(\"{}\")", encoded))
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

/// Apply `background` / `padding` props shared by the layout components
fn with_box_styles(mut node: VNode, props: &Props) -> VNode {
    let background = str_prop(props, "background");
    if !background.is_empty() {
        node = node.with_style("background", background);
    }
    if let Some(padding) = num_prop(props, "padding") {
        node = node.with_style("padding", px(padding));
    }
    node
}

fn container() -> ComponentDefinition {
    ComponentDefinition::new("Container", |props, children| {
        with_box_styles(VNode::element("div").with_attr("class", "pc-page"), props)
            .with_children(children)
    })
    .with_display_name("Page")
    .canvas()
    .with_field(FieldDescriptor::text("background", "Background"))
    .with_field(FieldDescriptor::number("padding", "Padding"))
}

fn section() -> ComponentDefinition {
    ComponentDefinition::new("Section", |props, children| {
        with_box_styles(
            VNode::element("section").with_attr("class", "pc-section"),
            props,
        )
        .with_children(children)
    })
    .canvas()
    .with_field(FieldDescriptor::text("background", "Background"))
    .with_field(FieldDescriptor::number("padding", "Padding"))
    .with_default("padding", 24)
}

fn columns() -> ComponentDefinition {
    ComponentDefinition::new("Columns", |props, children| {
        let count = children.len().max(1);
        let gap = num_prop(props, "gap").unwrap_or(16.0);
        VNode::element("div")
            .with_attr("class", "pc-columns")
            .with_style("display", "grid")
            .with_style("grid-template-columns", format!("repeat({}, 1fr)", count))
            .with_style("gap", px(gap))
            .with_children(children)
    })
    .canvas()
    .with_field(FieldDescriptor::number("gap", "Gap"))
    .with_default("gap", 16)
}

fn hero_section() -> ComponentDefinition {
    ComponentDefinition::new("HeroSection", |props, _| {
        let mut hero = VNode::element("section")
            .with_attr("class", "pc-hero")
            .with_style("text-align", match str_prop(props, "align") {
                "" => "center",
                align => align,
            });
        let color = str_prop(props, "color");
        if !color.is_empty() {
            hero = hero.with_style("color", color);
        }
        if let Some(image) = css_url(str_prop(props, "backgroundImage")) {
            hero = hero.with_style("background-image", image);
        }

        hero = hero.with_child(VNode::element("h1").with_child(VNode::text(str_prop(props, "title"))));
        let subtitle = str_prop(props, "subtitle");
        if !subtitle.is_empty() {
            hero = hero.with_child(VNode::element("p").with_child(VNode::text(subtitle)));
        }
        let cta = str_prop(props, "ctaLabel");
        if !cta.is_empty() {
            let button = VNode::element("a").with_attr("class", "pc-button");
            hero = hero.with_child(
                with_href(button, props, "ctaHref").with_child(VNode::text(cta)),
            );
        }
        hero
    })
    .with_display_name("Hero")
    .with_field(FieldDescriptor::text("title", "Title"))
    .with_field(FieldDescriptor::textarea("subtitle", "Subtitle"))
    .with_field(FieldDescriptor::text("backgroundImage", "Background image URL"))
    .with_field(FieldDescriptor::text("color", "Text color"))
    .with_field(FieldDescriptor::select(
        "align",
        "Alignment",
        &[("Left", "left"), ("Center", "center"), ("Right", "right")],
    ))
    .with_field(FieldDescriptor::text("ctaLabel", "Button label"))
    .with_field(FieldDescriptor::text("ctaHref", "Button link"))
    .with_default("title", "Welcome to our parish")
    .with_default("align", "center")
}

fn heading() -> ComponentDefinition {
    ComponentDefinition::new("Heading", |props, _| {
        let tag = match str_prop(props, "level") {
            level @ ("h1" | "h2" | "h3" | "h4") => level,
            _ => "h2",
        };
        VNode::element(tag)
            .with_attr("class", "pc-heading")
            .with_child(VNode::text(str_prop(props, "text")))
    })
    .with_field(FieldDescriptor::text("text", "Text"))
    .with_field(FieldDescriptor::select(
        "level",
        "Level",
        &[("Title", "h1"), ("Heading", "h2"), ("Subheading", "h3"), ("Small", "h4")],
    ))
    .with_default("text", "Heading")
    .with_default("level", "h2")
}

fn text_block() -> ComponentDefinition {
    ComponentDefinition::new("TextBlock", |props, _| {
        let paragraphs = str_prop(props, "text")
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| VNode::element("p").with_child(VNode::text(p)))
            .collect();
        VNode::element("div")
            .with_attr("class", "pc-text")
            .with_children(paragraphs)
    })
    .with_display_name("Text")
    .with_field(FieldDescriptor::textarea("text", "Text"))
    .with_default("text", "")
}

fn image_block() -> ComponentDefinition {
    ComponentDefinition::new("ImageBlock", |props, _| {
        let mut img = VNode::element("img").with_attr("alt", str_prop(props, "alt"));
        if let Some(src) = safe_url(str_prop(props, "src")) {
            img = img.with_attr("src", src);
        }
        if let Some(width) = num_prop(props, "width") {
            img = img.with_style("width", px(width));
        }
        VNode::element("figure")
            .with_attr("class", "pc-image")
            .with_child(img)
    })
    .with_display_name("Image")
    .with_field(FieldDescriptor::text("src", "Image URL"))
    .with_field(FieldDescriptor::text("alt", "Description"))
    .with_field(FieldDescriptor::number("width", "Width"))
}

fn button_link() -> ComponentDefinition {
    ComponentDefinition::new("ButtonLink", |props, _| {
        let variant = match str_prop(props, "variant") {
            "secondary" => "secondary",
            _ => "primary",
        };
        let button =
            VNode::element("a").with_attr("class", format!("pc-button pc-button-{}", variant));
        with_href(button, props, "href").with_child(VNode::text(str_prop(props, "label")))
    })
    .with_display_name("Button")
    .with_field(FieldDescriptor::text("label", "Label"))
    .with_field(FieldDescriptor::text("href", "Link"))
    .with_field(FieldDescriptor::select(
        "variant",
        "Style",
        &[("Primary", "primary"), ("Secondary", "secondary")],
    ))
    .with_default("label", "Learn more")
    .with_default("variant", "primary")
}

fn mass_schedule() -> ComponentDefinition {
    ComponentDefinition::new("MassSchedule", |props, _| {
        let rows: Vec<VNode> = props
            .get("entries")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| {
                        let cell = |key: &str| {
                            VNode::element("td").with_child(VNode::text(
                                entry.get(key).and_then(Value::as_str).unwrap_or(""),
                            ))
                        };
                        VNode::element("tr")
                            .with_child(cell("day"))
                            .with_child(cell("time"))
                            .with_child(cell("language"))
                    })
                    .collect()
            })
            .unwrap_or_default();

        VNode::element("div")
            .with_attr("class", "pc-mass-schedule")
            .with_child(VNode::element("h3").with_child(VNode::text(str_prop(props, "title"))))
            .with_child(VNode::element("table").with_children(rows))
    })
    .with_display_name("Mass schedule")
    .with_field(FieldDescriptor::text("title", "Title"))
    .with_field(FieldDescriptor::array(
        "entries",
        "Mass times",
        vec![
            FieldDescriptor::select(
                "day",
                "Day",
                &[
                    ("Sunday", "Sunday"),
                    ("Monday", "Monday"),
                    ("Tuesday", "Tuesday"),
                    ("Wednesday", "Wednesday"),
                    ("Thursday", "Thursday"),
                    ("Friday", "Friday"),
                    ("Saturday", "Saturday"),
                ],
            ),
            FieldDescriptor::text("time", "Time"),
            FieldDescriptor::text("language", "Language"),
        ],
    ))
    .with_default("title", "Mass times")
    .with_default("entries", json!([]))
}

fn event_list() -> ComponentDefinition {
    ComponentDefinition::new("EventList", |props, _| {
        let limit = num_prop(props, "limit").unwrap_or(5.0);
        VNode::element("div")
            .with_attr("class", "pc-event-list")
            .with_attr("data-limit", format!("{}", limit))
            .with_attr("data-show-past", bool_prop(props, "showPast").to_string())
            .with_child(VNode::element("h3").with_child(VNode::text(str_prop(props, "title"))))
    })
    .with_display_name("Upcoming events")
    .with_field(FieldDescriptor::text("title", "Title"))
    .with_field(FieldDescriptor::number("limit", "Number of events"))
    .with_field(FieldDescriptor::checkbox("showPast", "Include past events"))
    .with_default("title", "Upcoming events")
    .with_default("limit", 5)
    .with_default("showPast", false)
}

fn donation_callout() -> ComponentDefinition {
    ComponentDefinition::new("DonationCallout", |props, _| {
        VNode::element("aside")
            .with_attr("class", "pc-donation")
            .with_child(VNode::element("h3").with_child(VNode::text(str_prop(props, "title"))))
            .with_child(VNode::element("p").with_child(VNode::text(str_prop(props, "message"))))
            .with_child(
                with_href(VNode::element("a").with_attr("class", "pc-button"), props, "href")
                    .with_child(VNode::text(str_prop(props, "buttonLabel"))),
            )
    })
    .with_display_name("Donation")
    .with_field(FieldDescriptor::text("title", "Title"))
    .with_field(FieldDescriptor::textarea("message", "Message"))
    .with_field(FieldDescriptor::text("buttonLabel", "Button label"))
    .with_field(FieldDescriptor::text("href", "Donation link"))
    .with_default("title", "Support your parish")
    .with_default("buttonLabel", "Give")
}

fn spacer() -> ComponentDefinition {
    ComponentDefinition::new("Spacer", |props, _| {
        VNode::element("div")
            .with_attr("class", "pc-spacer")
            .with_style("height", px(num_prop(props, "height").unwrap_or(32.0)))
    })
    .with_field(FieldDescriptor::number("height", "Height"))
    .with_default("height", 32)
}

/// Register every built-in component
pub fn register_builtins(registry: &mut Registry) -> Result<(), RegistryError> {
    for definition in [
        container(),
        section(),
        columns(),
        hero_section(),
        heading(),
        text_block(),
        image_block(),
        button_link(),
        mass_schedule(),
        event_list(),
        donation_callout(),
        spacer(),
    ] {
        registry.register(definition.type_name.clone(), definition)?;
    }
    Ok(())
}

impl Registry {
    /// Registry preloaded with the parish catalog
    pub fn with_builtins() -> Self {
        let mut registry = Registry::new();
        // Names in the catalog are distinct, so this cannot collide on a fresh registry.
        if let Err(e) = register_builtins(&mut registry) {
            tracing::error!(error = %e, "Built-in catalog failed to register");
        }
        registry
    }
}
