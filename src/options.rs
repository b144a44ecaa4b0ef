use serde::{Deserialize, Serialize};

/// Embedding parameters passed by the host page.
///
/// These gate canvas affordances only. `locked` is the one option the core
/// acts on: a locked editor ignores every editing event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorOptions {
    pub locked: bool,
    pub hide_minimap: bool,
    pub hide_controls: bool,
    pub locale: String,
    pub tutorial: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            locked: false,
            hide_minimap: false,
            hide_controls: false,
            locale: "en".to_string(),
            tutorial: false,
        }
    }
}

impl EditorOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn locked() -> Self {
        Self {
            locked: true,
            ..Self::default()
        }
    }
}
