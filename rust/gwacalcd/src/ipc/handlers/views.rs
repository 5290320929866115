use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use crate::seed;
use crate::view;
use serde_json::json;

fn handle_view_table(state: &mut AppState, req: &Request) -> serde_json::Value {
    let mut result = json!(view::table_view(&state.roster));
    if let Some(rows) = seed::initial_display(state.config.seed, &state.roster) {
        result["seeded"] = json!(view::rows_view(state.roster.revision(), &rows));
    }
    ok(&req.id, result)
}

fn handle_view_text(state: &mut AppState, req: &Request) -> serde_json::Value {
    let table = view::table_view(&state.roster);
    ok(
        &req.id,
        json!({
            "revision": table.revision,
            "text": view::render_text(&table),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "view.table" => Some(handle_view_table(state, req)),
        "view.text" => Some(handle_view_text(state, req)),
        _ => None,
    }
}
