//! Global presets shipped with the catalog.

use crate::preset::Preset;
use parchment_schema::Props;
use serde_json::{json, Value};

fn props(value: Value) -> Props {
    match value {
        Value::Object(map) => map,
        _ => Props::new(),
    }
}

pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset::global(
            "global-hero-welcome",
            "Welcome Banner",
            "HeroSection",
            props(json!({
                "title": "Welcome to our parish",
                "subtitle": "All are welcome at the table",
                "align": "center",
                "color": "#ffffff",
                "ctaLabel": "Plan a visit",
            })),
        ),
        Preset::global(
            "global-hero-feast",
            "Feast Day",
            "HeroSection",
            props(json!({
                "align": "left",
                "color": "#fdf6e3",
                "ctaLabel": "See the schedule",
            })),
        ),
        Preset::global(
            "global-text-welcome",
            "Welcome Message",
            "TextBlock",
            props(json!({
                "text": "Whether you are new to the area or returning to the faith, we are glad you found us.\n\nStop by the parish office after any Mass to say hello.",
            })),
        ),
        Preset::global(
            "global-button-primary",
            "Primary Button",
            "ButtonLink",
            props(json!({ "variant": "primary" })),
        ),
        Preset::global(
            "global-button-secondary",
            "Secondary Button",
            "ButtonLink",
            props(json!({ "variant": "secondary" })),
        ),
        Preset::global(
            "global-donation-offertory",
            "Online Offertory",
            "DonationCallout",
            props(json!({
                "title": "Support your parish",
                "message": "Your weekly offering sustains our ministries.",
                "buttonLabel": "Give online",
            })),
        ),
    ]
}
