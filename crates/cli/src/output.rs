use promptmap_archive::{encode, ArchiveFormat, Entry};
use promptmap_mapper::MapOutcome;
use serde_json::{json, Value};

/// Render mapping outcomes in the requested output format.
///
/// Error outcomes stay distinguishable from model answers: jsonl carries
/// an `error` key instead of `content`, the keyed and array formats nest
/// an `{"error": ...}` object where a content string would be. The
/// XML-family formats have no error shape, so descriptions are emitted
/// inline as `ERROR: ...` content.
pub fn render_outcomes(
    outcomes: &[MapOutcome],
    format: ArchiveFormat,
    include_input: bool,
) -> String {
    match format {
        ArchiveFormat::Jsonl => {
            let mut out = String::new();
            for outcome in outcomes {
                let mut object = serde_json::Map::new();
                object.insert("path".into(), Value::String(outcome.path.clone()));
                match &outcome.result {
                    Ok(content) => {
                        object.insert("content".into(), Value::String(content.clone()));
                    }
                    Err(e) => {
                        object.insert("error".into(), Value::String(e.to_string()));
                    }
                }
                if include_input {
                    object.insert("input".into(), Value::String(outcome.input.clone()));
                }
                out.push_str(&Value::Object(object).to_string());
                out.push('\n');
            }
            out
        }
        ArchiveFormat::Json => {
            let mut object = serde_json::Map::new();
            for outcome in outcomes {
                let value = match &outcome.result {
                    Ok(content) => Value::String(content.clone()),
                    Err(e) => json!({ "error": e.to_string() }),
                };
                object.insert(outcome.path.clone(), value);
            }
            Value::Object(object).to_string()
        }
        ArchiveFormat::JsonArr => {
            let values: Vec<Value> = outcomes
                .iter()
                .map(|outcome| match &outcome.result {
                    Ok(content) => Value::String(content.clone()),
                    Err(e) => json!({ "error": e.to_string() }),
                })
                .collect();
            Value::Array(values).to_string()
        }
        ArchiveFormat::Xml | ArchiveFormat::Xmlish => {
            let entries: Vec<Entry> = outcomes
                .iter()
                .map(|outcome| {
                    let content = match &outcome.result {
                        Ok(content) => content.clone(),
                        Err(e) => format!("ERROR: {e}"),
                    };
                    Entry::new(outcome.path.clone(), content)
                })
                .collect();
            encode(&entries, format)
        }
    }
}
