// Shared state structs to avoid circular dependencies.
// These are used by main.rs and can be tested independently.

use std::sync::{Arc, Mutex};
use serde::{Deserialize, Serialize};

use crate::modules::drag::DragGesture;
use crate::modules::pages::PageStrip;

/// Snapshot of the page strip sent to the frontend on every change.
/// This is the only state the rendering layer ever sees.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PagesPayload {
    pub pages: Vec<String>,
    pub active_idx: usize,
    pub renaming_idx: Option<usize>,
}

impl From<&PageStrip> for PagesPayload {
    fn from(strip: &PageStrip) -> Self {
        Self {
            pages: strip.pages().to_vec(),
            active_idx: strip.active_idx(),
            renaming_idx: strip.renaming_idx(),
        }
    }
}

pub struct AppState {
    pub strip: Arc<Mutex<PageStrip>>,
    pub drag: Arc<Mutex<DragGesture>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            strip: Arc::new(Mutex::new(PageStrip::default())),
            drag: Arc::new(Mutex::new(DragGesture::default())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_uses_camel_case_keys() {
        let payload = PagesPayload::from(&PageStrip::default());
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["pages"][0], "Info");
        assert_eq!(json["activeIdx"], 0);
        assert!(json["renamingIdx"].is_null());
    }
}
