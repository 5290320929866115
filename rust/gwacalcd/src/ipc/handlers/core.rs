use crate::calc::{FALLBACK_GRADE, GRADE_BANDS};
use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use crate::seed;
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "startedAt": state.started_at.to_rfc3339(),
            "seed": state.config.seed.as_str(),
            "subjectCount": state.roster.len(),
            "revision": state.roster.revision(),
        }),
    )
}

fn handle_grade_bands(req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "bands": GRADE_BANDS,
            "fallbackGrade": FALLBACK_GRADE,
        }),
    )
}

fn handle_seed_audit(req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({ "discrepancies": seed::audit(&seed::SAMPLE) }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "grades.bands" => Some(handle_grade_bands(req)),
        "seed.audit" => Some(handle_seed_audit(req)),
        _ => None,
    }
}
