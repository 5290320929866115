use crate::ipc::error::ok;
use crate::ipc::helpers::{param_index, parse_field, raw_value, snapshot_json, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::roster::{summarize_subjects, RawValue, Roster, SubjectField};
use crate::seed;
use serde_json::json;

/// Swaps in the new snapshot; the old one is dropped whole.
fn commit(state: &mut AppState, method: &str, next: Roster) {
    tracing::debug!(
        method,
        revision = next.revision(),
        subjects = next.len(),
        "roster replaced"
    );
    state.roster = next;
}

fn handle_roster_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let mut result = snapshot_json(&state.roster);
    if let Some(rows) = seed::initial_display(state.config.seed, &state.roster) {
        result["seeded"] = json!({
            "subjects": rows,
            "summary": summarize_subjects(&rows),
        });
    }
    ok(&req.id, result)
}

fn handle_roster_reset(state: &mut AppState, req: &Request) -> serde_json::Value {
    let next = state.roster.replace_all(state.config.seed.subjects());
    commit(state, "roster.reset", next);
    ok(&req.id, snapshot_json(&state.roster))
}

fn handle_summary_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!(state.roster.summary()))
}

fn handle_subjects_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let next = state.roster.add_subject();
    commit(state, "subjects.add", next);
    let mut result = snapshot_json(&state.roster);
    result["index"] = json!(state.roster.len() - 1);
    ok(&req.id, result)
}

fn subjects_update(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let index = param_index(req)?;
    let field = match req.params.get("field").and_then(|v| v.as_str()) {
        Some(name) => parse_field(name)?,
        None => return Err(HandlerErr::bad_params("missing params.field")),
    };
    let Some(value) = req.params.get("value") else {
        return Err(HandlerErr::bad_params("missing params.value"));
    };
    let value = raw_value(value)?;
    tracing::debug!(index, field = field.as_str(), "field edit");

    let next = state.roster.edit_field(index, field, value)?;
    commit(state, "subjects.update", next);
    Ok(snapshot_json(&state.roster))
}

fn subjects_update_row(
    state: &mut AppState,
    req: &Request,
) -> Result<serde_json::Value, HandlerErr> {
    let index = param_index(req)?;
    let Some(fields) = req.params.get("fields").and_then(|v| v.as_object()) else {
        return Err(HandlerErr::bad_params("params.fields must be an object"));
    };

    let mut edits: Vec<(SubjectField, RawValue<'_>)> = Vec::with_capacity(fields.len());
    for (name, v) in fields {
        edits.push((parse_field(name)?, raw_value(v)?));
    }

    let next = state.roster.edit_row(index, &edits)?;
    commit(state, "subjects.updateRow", next);
    Ok(snapshot_json(&state.roster))
}

fn subjects_delete(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let index = param_index(req)?;
    let next = state.roster.delete_subject(index)?;
    commit(state, "subjects.delete", next);
    Ok(snapshot_json(&state.roster))
}

fn respond(
    req: &Request,
    res: Result<serde_json::Value, HandlerErr>,
) -> serde_json::Value {
    match res {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "roster.get" => Some(handle_roster_get(state, req)),
        "roster.reset" => Some(handle_roster_reset(state, req)),
        "summary.get" => Some(handle_summary_get(state, req)),
        "subjects.add" => Some(handle_subjects_add(state, req)),
        "subjects.update" => Some(respond(req, subjects_update(state, req))),
        "subjects.updateRow" => Some(respond(req, subjects_update_row(state, req))),
        "subjects.delete" => Some(respond(req, subjects_delete(state, req))),
        _ => None,
    }
}
