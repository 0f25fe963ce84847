use tauri::{AppHandle, Emitter, Manager, State};
use tauri::menu::{MenuBuilder, MenuItemBuilder, PredefinedMenuItem, SubmenuBuilder};

use pagestrip_lib::modules::pages::MAX_LABEL_LEN;
use pagestrip_lib::state::{AppState, PagesPayload};

/// Full strip snapshot; the frontend repaints from this on every change.
const PAGES_EVENT: &str = "update-pages";

/// Carries the index of a freshly inserted duplicate. The frontend answers
/// with `enter_rename_mode` on its next frame, after the new tab painted.
const DUPLICATED_EVENT: &str = "page-duplicated";

fn snapshot(state: &AppState) -> Result<PagesPayload, String> {
    let strip = state.strip.lock().map_err(|e| e.to_string())?;
    Ok(PagesPayload::from(&*strip))
}

fn broadcast_pages(app: &AppHandle, state: &AppState) -> Result<(), String> {
    let payload = snapshot(state)?;
    app.emit(PAGES_EVENT, payload).map_err(|e| e.to_string())
}

// Indices arrive over IPC from the webview; a stale index is a boundary
// condition here, not a backend bug.
fn check_index(idx: usize, len: usize) -> Result<(), String> {
    if idx < len {
        Ok(())
    } else {
        Err(format!("page index {} out of range (len {})", idx, len))
    }
}

#[tauri::command]
fn get_pages(state: State<AppState>) -> Result<PagesPayload, String> {
    snapshot(&state)
}

#[tauri::command]
fn add_page(app: AppHandle, state: State<AppState>) -> Result<(), String> {
    {
        let mut strip = state.strip.lock().map_err(|e| e.to_string())?;
        let label = strip.default_label();
        log::info!("[Pages] Appending '{}'", label);
        strip.append(label);
    }
    broadcast_pages(&app, &state)
}

/// Insert a page in the gap before `index` (the hover "+" between tabs).
#[tauri::command]
fn add_page_at(app: AppHandle, state: State<AppState>, index: usize) -> Result<(), String> {
    {
        let mut strip = state.strip.lock().map_err(|e| e.to_string())?;
        if index > strip.len() {
            return Err(format!(
                "insert index {} out of range (len {})",
                index,
                strip.len()
            ));
        }
        let label = strip.default_label();
        log::info!("[Pages] Inserting '{}' at {}", label, index);
        strip.insert_at(index, label);
    }
    broadcast_pages(&app, &state)
}

#[tauri::command]
fn select_page(app: AppHandle, state: State<AppState>, index: usize) -> Result<(), String> {
    {
        let mut strip = state.strip.lock().map_err(|e| e.to_string())?;
        check_index(index, strip.len())?;
        strip.select(index);
    }
    broadcast_pages(&app, &state)
}

#[tauri::command]
fn start_rename(app: AppHandle, state: State<AppState>, index: usize) -> Result<(), String> {
    {
        let mut strip = state.strip.lock().map_err(|e| e.to_string())?;
        check_index(index, strip.len())?;
        strip.begin_rename(index);
    }
    broadcast_pages(&app, &state)
}

#[tauri::command]
fn cancel_rename(app: AppHandle, state: State<AppState>) -> Result<(), String> {
    {
        let mut strip = state.strip.lock().map_err(|e| e.to_string())?;
        strip.cancel_rename();
    }
    broadcast_pages(&app, &state)
}

#[tauri::command]
fn rename_page(
    app: AppHandle,
    state: State<AppState>,
    index: usize,
    name: String,
) -> Result<(), String> {
    // The inline edit field caps input at MAX_LABEL_LEN; enforce the same
    // bound here so the backend never stores what the UI could not produce.
    let name: String = name.chars().take(MAX_LABEL_LEN).collect();
    {
        let mut strip = state.strip.lock().map_err(|e| e.to_string())?;
        check_index(index, strip.len())?;
        log::info!("[Pages] Renaming page {} to '{}'", index, name.trim());
        strip.rename(index, &name);
    }
    broadcast_pages(&app, &state)
}

/// Phase one of duplication: insert the copy and hand the new index back.
/// The caller schedules `enter_rename_mode` on its next frame so the new
/// tab exists on screen before focus moves into its rename input.
#[tauri::command]
fn duplicate_page(app: AppHandle, state: State<AppState>, index: usize) -> Result<usize, String> {
    let new_idx = {
        let mut strip = state.strip.lock().map_err(|e| e.to_string())?;
        check_index(index, strip.len())?;
        let new_idx = strip.duplicate_at(index);
        log::info!(
            "[Pages] Duplicated page {} -> {} ('{}')",
            index,
            new_idx,
            strip.pages()[new_idx]
        );
        new_idx
    };
    broadcast_pages(&app, &state)?;
    Ok(new_idx)
}

/// Phase two of duplication: select the page and open its rename input.
#[tauri::command]
fn enter_rename_mode(app: AppHandle, state: State<AppState>, index: usize) -> Result<(), String> {
    {
        let mut strip = state.strip.lock().map_err(|e| e.to_string())?;
        check_index(index, strip.len())?;
        strip.enter_rename_mode(index);
    }
    broadcast_pages(&app, &state)
}

#[tauri::command]
fn delete_page(app: AppHandle, state: State<AppState>, index: usize) -> Result<(), String> {
    {
        let mut strip = state.strip.lock().map_err(|e| e.to_string())?;
        check_index(index, strip.len())?;
        log::info!("[Pages] Deleting page {} ('{}')", index, strip.pages()[index]);
        strip.delete_at(index);
    }
    broadcast_pages(&app, &state)
}

#[tauri::command]
fn set_first_page(app: AppHandle, state: State<AppState>, index: usize) -> Result<(), String> {
    {
        let mut strip = state.strip.lock().map_err(|e| e.to_string())?;
        check_index(index, strip.len())?;
        strip.move_to_front(index);
    }
    broadcast_pages(&app, &state)
}

#[tauri::command]
fn drag_start(state: State<AppState>, index: usize) -> Result<(), String> {
    let len = state.strip.lock().map_err(|e| e.to_string())?.len();
    check_index(index, len)?;
    let mut drag = state.drag.lock().map_err(|e| e.to_string())?;
    drag.start(index);
    Ok(())
}

#[tauri::command]
fn drag_enter(state: State<AppState>, index: usize) -> Result<(), String> {
    let len = state.strip.lock().map_err(|e| e.to_string())?.len();
    check_index(index, len)?;
    let mut drag = state.drag.lock().map_err(|e| e.to_string())?;
    drag.enter(index);
    Ok(())
}

#[tauri::command]
fn drag_end(app: AppHandle, state: State<AppState>) -> Result<(), String> {
    let gesture = {
        let mut drag = state.drag.lock().map_err(|e| e.to_string())?;
        drag.finish()
    };

    let (from, to) = match gesture {
        Some(pair) => pair,
        None => {
            log::info!("[Drag] Gesture ended without a reorder");
            return Ok(());
        }
    };

    {
        let mut strip = state.strip.lock().map_err(|e| e.to_string())?;
        // The gesture indices were captured against the list as it was when
        // the drag ran; drop a stale pair instead of panicking.
        if from >= strip.len() || to >= strip.len() {
            log::warn!(
                "[Drag] Stale gesture {} -> {} dropped (len {})",
                from,
                to,
                strip.len()
            );
            return Ok(());
        }
        log::info!("[Drag] Reordering {} -> {}", from, to);
        strip.reorder(from, to);
    }
    broadcast_pages(&app, &state)
}

// Native menu actions all target the active page.
fn handle_menu_action(app: &AppHandle, id: &str) -> Result<(), String> {
    let state = app.state::<AppState>();
    match id {
        "new_page" => {
            {
                let mut strip = state.strip.lock().map_err(|e| e.to_string())?;
                let label = strip.default_label();
                log::info!("[Menu] Appending '{}'", label);
                strip.append(label);
            }
            broadcast_pages(app, &state)
        }
        "duplicate_page" => {
            let new_idx = {
                let mut strip = state.strip.lock().map_err(|e| e.to_string())?;
                if strip.is_empty() {
                    log::warn!("[Menu] No page to duplicate");
                    return Ok(());
                }
                let active = strip.active_idx();
                strip.duplicate_at(active)
            };
            broadcast_pages(app, &state)?;
            // The frontend finishes the two-phase flow from here.
            app.emit(DUPLICATED_EVENT, new_idx).map_err(|e| e.to_string())
        }
        "rename_page" => {
            {
                let mut strip = state.strip.lock().map_err(|e| e.to_string())?;
                if strip.is_empty() {
                    log::warn!("[Menu] No page to rename");
                    return Ok(());
                }
                let active = strip.active_idx();
                strip.begin_rename(active);
            }
            broadcast_pages(app, &state)
        }
        "delete_page" => {
            {
                let mut strip = state.strip.lock().map_err(|e| e.to_string())?;
                if strip.is_empty() {
                    log::warn!("[Menu] No page to delete");
                    return Ok(());
                }
                let active = strip.active_idx();
                strip.delete_at(active);
            }
            broadcast_pages(app, &state)
        }
        _ => Ok(()),
    }
}

fn main() {
    tauri::Builder::default()
        .manage(AppState::new())
        .setup(move |app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            let handle = app.handle().clone();

            // --- Build Native Menu ---
            let strip_menu = SubmenuBuilder::new(app, "Page Strip")
                .item(&PredefinedMenuItem::about(app, Some("About Page Strip"), None)?)
                .separator()
                .item(&PredefinedMenuItem::quit(app, Some("Quit Page Strip"))?)
                .build()?;

            let page_menu = SubmenuBuilder::new(app, "Page")
                .item(&MenuItemBuilder::with_id("new_page", "New Page").accelerator("CmdOrCtrl+N").build(app)?)
                .item(&MenuItemBuilder::with_id("duplicate_page", "Duplicate Page").accelerator("CmdOrCtrl+D").build(app)?)
                .item(&MenuItemBuilder::with_id("rename_page", "Rename Page").accelerator("F2").build(app)?)
                .separator()
                .item(&MenuItemBuilder::with_id("delete_page", "Delete Page").accelerator("CmdOrCtrl+W").build(app)?)
                .build()?;

            let menu = MenuBuilder::new(app)
                .items(&[&strip_menu, &page_menu])
                .build()?;

            app.set_menu(menu)?;

            // Handle menu events
            let handle_for_menu = handle.clone();
            app.on_menu_event(move |_app_handle, event| {
                let id = event.id().0.as_str();
                if let Err(e) = handle_menu_action(&handle_for_menu, id) {
                    log::warn!("[Menu] Action '{}' failed: {}", id, e);
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            get_pages,
            add_page,
            add_page_at,
            select_page,
            start_rename,
            cancel_rename,
            rename_page,
            duplicate_page,
            enter_rename_mode,
            delete_page,
            set_first_page,
            drag_start,
            drag_enter,
            drag_end
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
