//! Tests for the editor event surface, host options and catalog.
mod common;
use datalayer::editor::{SELECTED_SERVICE_MAX_Y, SELECTED_SERVICE_X};
use datalayer::geometry::Viewport;
use datalayer::prelude::*;

struct FakeClipboard(std::result::Result<String, ClipboardError>);

impl Clipboard for FakeClipboard {
    fn read_text(&mut self) -> std::result::Result<String, ClipboardError> {
        self.0.clone()
    }
}

fn editor() -> Editor {
    Editor::with_default_layout(EditorOptions::default(), ServiceCatalog::builtin()).unwrap()
}

const CONFIG: &str = r#"{
    "flows": [{
        "name": "Stripe -> Slack",
        "source": { "type": "COMMON-STRIPE", "configuration": { "identifier": "stripe" } },
        "destination": { "type": "COMMON-SLACK", "configuration": { "identifier": "slack" } }
    }]
}"#;

#[test]
fn test_options_from_host_json() {
    let options =
        EditorOptions::from_json(r#"{"locked": true, "hideMinimap": true, "locale": "fr"}"#)
            .unwrap();
    assert!(options.locked);
    assert!(options.hide_minimap);
    assert!(!options.hide_controls);
    assert_eq!(options.locale, "fr");

    let defaults = EditorOptions::from_json("{}").unwrap();
    assert_eq!(defaults, EditorOptions::default());
    assert_eq!(defaults.locale, "en");
}

#[test]
fn test_builtin_catalog() {
    let catalog = ServiceCatalog::builtin();
    assert_eq!(catalog.groups.len(), 7);
    let http = catalog.find("HTTP/S").unwrap();
    assert_eq!(http.configuration.service_type, ServiceType::GenericHttp);
    assert_eq!(
        http.configuration.parameters.get("hostPort"),
        Some(&ParameterValue::Integer(443))
    );
    assert!(catalog.find("Hubspot").is_some());
    assert!(catalog.find("Nope").is_none());
}

#[test]
fn test_catalog_from_host_json() {
    let catalog = ServiceCatalog::from_json(
        r#"[{
            "label": "Mine",
            "options": [{
                "label": "Billing",
                "status": "SUCCESS",
                "configuration": { "type": "INTERNAL-BILLING", "identifier": "Billing" }
            }]
        }]"#,
    )
    .unwrap();
    let option = catalog.find("Billing").unwrap();
    assert_eq!(option.status, Some(Status::Success));
    assert_eq!(option.configuration.service_type.as_str(), "INTERNAL-BILLING");
}

#[test]
fn test_select_service_places_node() {
    let mut editor = editor();
    let before = editor.graph().nodes().len();
    let id = editor.select_service_by_label("Stripe").unwrap();

    assert_eq!(editor.graph().nodes().len(), before + 1);
    let node = editor.graph().node(&id).unwrap();
    assert_eq!(node.position.x, SELECTED_SERVICE_X);
    assert!((0.0..SELECTED_SERVICE_MAX_Y).contains(&node.position.y));
    let data = node.as_service().unwrap();
    assert_eq!(data.label.as_deref(), Some("Stripe"));
    assert_eq!(data.configuration.service_type, ServiceType::CommonStripe);
}

#[test]
fn test_canvas_events() {
    let mut editor = Editor::new(EditorOptions::default(), ServiceCatalog::builtin());
    assert!(editor.apply_preset(LayoutPreset::Empty).is_applied());
    let flow = editor.graph().flows()[0].clone();
    let source = editor.select_service_by_label("Hubspot").unwrap();

    let outcome = editor.handle(CanvasEvent::EdgeProposed {
        source: source.clone(),
        target: flow.modelize.clone(),
    });
    assert!(outcome.is_applied());

    let outcome = editor.handle(CanvasEvent::EdgeProposed {
        source: source.clone(),
        target: flow.egress.clone(),
    });
    assert!(matches!(
        outcome,
        EditOutcome::Rejected(EditError::Graph(GraphError::Connection(
            Rejection::IllegalTarget { .. }
        )))
    ));
    // Rejections are silent.
    assert!(editor.notices().is_empty());

    let edge_id = editor.graph().edges()[0].id.clone();
    assert!(
        editor
            .handle(CanvasEvent::EdgeDeleted { edge_id })
            .is_applied()
    );
    assert!(editor.graph().edges().is_empty());

    assert!(
        editor
            .handle(CanvasEvent::NodeDeleted {
                node_id: flow.egress.clone()
            })
            .is_applied()
    );
    assert!(editor.graph().flows().is_empty());
}

#[test]
fn test_fixed_nodes_do_not_move() {
    let mut editor = editor();
    let warehouse = editor.graph().datalayer().unwrap().warehouse.clone();
    let outcome = editor.handle(CanvasEvent::NodeMoved {
        node_id: warehouse,
        position: Position::new(0.0, 0.0),
    });
    assert_eq!(outcome, EditOutcome::Ignored);
}

#[test]
fn test_locked_editor_ignores_edits() {
    let mut editor = editor();
    editor.set_locked(true);
    let before = editor.graph().to_layout();

    let flow = editor.graph().flows()[0].clone();
    assert_eq!(
        editor.handle(CanvasEvent::NodeDeleted {
            node_id: flow.container.clone()
        }),
        EditOutcome::Ignored
    );
    assert_eq!(editor.add_flow(), EditOutcome::Ignored);
    assert_eq!(editor.remove_flow(&flow.modelize), EditOutcome::Ignored);
    assert_eq!(
        editor.import_text(CONFIG, ConfigFormat::Json),
        EditOutcome::Ignored
    );
    assert!(editor.select_service_by_label("Stripe").is_none());
    assert_eq!(editor.graph().to_layout(), before);

    // Exporting is still allowed.
    assert!(editor.export_text(ConfigFormat::Json).is_ok());
}

#[test]
fn test_import_replaces_graph() {
    let mut editor = editor();
    assert!(
        editor
            .import_text(CONFIG, ConfigFormat::Json)
            .is_applied()
    );
    assert_eq!(editor.graph().flows().len(), 1);

    let notices = editor.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Info);
    assert!(editor.notices().is_empty());

    let exported = editor.export_text(ConfigFormat::Json).unwrap();
    assert!(exported.contains("\"name\": \"Stripe -> Slack\""));
}

#[test]
fn test_failed_import_keeps_graph() {
    let mut editor = editor();
    let before = editor.graph().to_layout();

    let outcome = editor.import_text("{ nope", ConfigFormat::Json);
    assert!(matches!(
        outcome,
        EditOutcome::Rejected(EditError::Import(ImportError::Parse { .. }))
    ));
    assert_eq!(editor.graph().to_layout(), before);
    assert_eq!(editor.notices().len(), 1);
    assert_eq!(editor.notices()[0].level, NoticeLevel::Error);
}

#[test]
fn test_clipboard_import() {
    let mut editor = editor();

    let mut broken = FakeClipboard(Err(ClipboardError("permission denied".to_string())));
    let outcome = editor.import_from_clipboard(&mut broken, ConfigFormat::Json);
    assert!(matches!(
        outcome,
        EditOutcome::Rejected(EditError::Clipboard(_))
    ));
    assert_eq!(editor.take_notices()[0].level, NoticeLevel::Warning);
    assert_eq!(editor.graph().flows().len(), 2);

    let mut clipboard = FakeClipboard(Ok(CONFIG.to_string()));
    assert!(
        editor
            .import_from_clipboard(&mut clipboard, ConfigFormat::Json)
            .is_applied()
    );
    assert_eq!(editor.graph().flows().len(), 1);
}

#[test]
fn test_status_menu() {
    let mut editor = editor();
    let source = editor
        .graph()
        .nodes()
        .iter()
        .find(|n| n.as_service().is_some_and(|s| s.label.as_deref() == Some("Database")))
        .unwrap()
        .id
        .clone();
    let flow = editor.graph().flows()[1].clone();

    assert!(
        editor
            .set_service_status(&source, Status::ErrorServicePull)
            .is_applied()
    );
    assert_eq!(
        editor.graph().status_of(&flow.egress),
        Status::ErrorServicePull
    );
}

#[test]
fn test_viewport_fit() {
    let mut editor = editor();
    assert_eq!(editor.fit_view(), None);

    let outcome = editor.handle(CanvasEvent::ViewportResized(Viewport {
        width: 1200.0,
        height: 800.0,
    }));
    assert!(outcome.is_applied());
    let transform = editor.transform();
    assert!(transform.zoom >= 0.5 && transform.zoom <= 2.0);
    assert_eq!(editor.fit_view(), Some(transform));
}
