use grid_actions::action::{ActionCatalog, ActionDef, IconRef};
use grid_actions::protocol::{ClickMessage, RenderState};
use grid_actions::renderer::ActionRenderer;

fn load_fixture_state() -> RenderState {
    let json = include_str!("fixtures/render_state.json");
    serde_json::from_str(json).expect("valid render_state.json fixture")
}

#[test]
fn render_state_fixture_decodes_in_order() {
    let state = load_fixture_state();
    assert_eq!(state.len(), 3);
    assert_eq!(state.actions[0].key.as_str(), "1");
    assert_eq!(state.actions[0].description.as_deref(), Some("user"));
    assert!(state.actions[0].style_tags.is_empty());
    assert_eq!(state.actions[1].style_tags, ["danger", "compact"]);
    assert_eq!(state.actions[2].description, None);
}

#[test]
fn render_state_survives_a_push_round_trip() {
    let state = load_fixture_state();
    let json = serde_json::to_string(&state).expect("serializable state");
    let back: RenderState = serde_json::from_str(&json).expect("decodable state");
    assert_eq!(back, state);
}

#[test]
fn built_render_state_matches_the_wire_shape() {
    let renderer: ActionRenderer<String> = ActionRenderer::new(ActionCatalog::new(vec![
        ActionDef::described(IconRef::new("user"), "user"),
        ActionDef::described(IconRef::new("gear"), "settings")
            .with_style("danger")
            .with_style("compact"),
        ActionDef::new(IconRef::new("plain")),
    ]));

    let value = serde_json::to_value(renderer.render_state()).expect("serializable state");
    let expected: serde_json::Value =
        serde_json::from_str(include_str!("fixtures/render_state.json"))
            .expect("valid render_state.json fixture");
    assert_eq!(value, expected);
}

#[test]
fn click_message_wire_shape_is_three_fields() {
    let msg: ClickMessage = serde_json::from_value(serde_json::json!({
        "row_ordinal": 4,
        "action_key": "2",
        "pointer": {
            "x": 120,
            "y": 38,
            "button": "left",
            "modifiers": { "ctrl": true }
        }
    }))
    .expect("valid click message JSON");

    assert_eq!(msg.row_ordinal, 4);
    assert_eq!(msg.action_key.as_str(), "2");
    assert_eq!(msg.pointer.x, 120);
    assert!(msg.pointer.modifiers.ctrl);
    assert!(!msg.pointer.modifiers.shift);

    let back: ClickMessage =
        serde_json::from_str(&serde_json::to_string(&msg).expect("serializable message"))
            .expect("decodable message");
    assert_eq!(back, msg);
}
