use parchment_presets::{apply_preset, Preset, PresetError, PresetLibrary};
use parchment_schema::{Node, Props};
use serde_json::{json, Value};

fn props(value: Value) -> Props {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_overlay_law_for_every_builtin() {
    let library = PresetLibrary::builtin();
    for preset in library.globals() {
        let node = Node::leaf("n", &preset.component_type)
            .with_props(props(json!({ "title": "Old" })))
            .with_prop("untouched", "keep me");

        let applied = apply_preset(&node, preset).unwrap();

        for (key, value) in &preset.props {
            assert_eq!(&applied.props[key], value, "preset key {} not applied", key);
        }
        for (key, value) in &node.props {
            if !preset.props.contains_key(key) {
                assert_eq!(&applied.props[key], value, "key {} changed", key);
            }
        }
        assert_eq!(applied.id, node.id);
        assert_eq!(applied.children_ids, node.children_ids);
    }
}

#[test]
fn test_hero_scenario() {
    let node = Node::leaf("hero", "HeroSection")
        .with_prop("title", "X")
        .with_prop("color", "#000");
    let preset = Preset::global("p", "White text", "HeroSection", props(json!({ "color": "#FFF" })));

    let applied = apply_preset(&node, &preset).unwrap();
    assert_eq!(Value::Object(applied.props), json!({ "title": "X", "color": "#FFF" }));
}

#[test]
fn test_mismatched_preset_leaves_node_alone() {
    let library = PresetLibrary::builtin();
    let hero = library.list_presets("HeroSection", "st-anne")[0].clone();
    let node = Node::leaf("t", "TextBlock").with_prop("text", "Hello");

    let result = apply_preset(&node, &hero);
    assert!(matches!(result, Err(PresetError::TypeMismatch { .. })));
    assert_eq!(node.props["text"], json!("Hello"));
}

#[test]
fn test_saved_preset_round_trips_through_json() {
    let mut library = PresetLibrary::new();
    let saved = library
        .save_preset(
            "MassSchedule",
            "st-anne",
            "Weekend",
            props(json!({ "entries": [{ "day": "Sunday", "time": "9:00" }] })),
        )
        .unwrap();

    let json = serde_json::to_string(&saved).unwrap();
    let back: Preset = serde_json::from_str(&json).unwrap();
    assert_eq!(back, saved);
}
