use crate::ipc::error::err;
use crate::ipc::types::Request;
use crate::roster::{RawValue, Roster, RosterError, SubjectField};
use serde_json::{json, Value};

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<Value>,
}

impl HandlerErr {
    pub fn bad_params(message: impl Into<String>) -> Self {
        Self {
            code: "bad_params",
            message: message.into(),
            details: None,
        }
    }

    pub fn response(self, id: &str) -> Value {
        err(id, self.code, self.message, self.details)
    }
}

impl From<RosterError> for HandlerErr {
    fn from(e: RosterError) -> Self {
        Self {
            code: e.code,
            message: e.message,
            details: e.details,
        }
    }
}

pub fn param_index(req: &Request) -> Result<usize, HandlerErr> {
    let Some(v) = req.params.get("index") else {
        return Err(HandlerErr::bad_params("missing params.index"));
    };
    v.as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| HandlerErr {
            code: "bad_params",
            message: "params.index must be a non-negative integer".to_string(),
            details: Some(json!({ "index": v })),
        })
}

pub fn parse_field(name: &str) -> Result<SubjectField, HandlerErr> {
    SubjectField::parse(name).ok_or_else(|| HandlerErr {
        code: "bad_params",
        message: "field must be one of: subjectName, units, midterms, finals".to_string(),
        details: Some(json!({ "field": name })),
    })
}

/// Strings go through numeric coercion, numbers are taken as-is, null reads as "".
pub fn raw_value(v: &Value) -> Result<RawValue<'_>, HandlerErr> {
    match v {
        Value::String(s) => Ok(RawValue::Text(s)),
        Value::Null => Ok(RawValue::Text("")),
        Value::Number(n) => Ok(RawValue::Number(n.as_f64().unwrap_or(0.0))),
        other => Err(HandlerErr {
            code: "bad_params",
            message: "value must be a string, number, or null".to_string(),
            details: Some(json!({ "value": other })),
        }),
    }
}

pub fn snapshot_json(roster: &Roster) -> Value {
    json!({
        "revision": roster.revision(),
        "subjects": roster.subjects(),
        "summary": roster.summary(),
    })
}
