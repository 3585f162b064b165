use serde_json::Value;

use crate::entry::Entry;
use crate::error::{ArchiveError, Result};
use crate::format::ArchiveFormat;

/// Encode entries into one serialized archive stream.
///
/// Encoding never fails: content is opaque text and every format can
/// represent it (for `xmlish`, by writing it verbatim). An empty entry
/// list produces a valid empty archive in every format.
pub fn encode(entries: &[Entry], format: ArchiveFormat) -> String {
    match format {
        ArchiveFormat::Jsonl => {
            let mut out = String::new();
            for entry in entries {
                out.push_str(&jsonl_line(&entry.path, &entry.content));
                out.push('\n');
            }
            out
        }
        ArchiveFormat::Json => {
            let mut map = serde_json::Map::new();
            for entry in entries {
                // Duplicate paths collapse to the last entry, matching the
                // last-copy-wins rule used everywhere else.
                map.insert(entry.path.clone(), Value::String(entry.content.clone()));
            }
            Value::Object(map).to_string()
        }
        ArchiveFormat::JsonArr => {
            let contents: Vec<Value> = entries
                .iter()
                .map(|e| Value::String(e.content.clone()))
                .collect();
            Value::Array(contents).to_string()
        }
        ArchiveFormat::Xml | ArchiveFormat::Xmlish => {
            let mut out = String::new();
            for entry in entries {
                let tag = sanitize_tag(&entry.path);
                out.push('<');
                out.push_str(&tag);
                out.push_str(">\n");
                if format == ArchiveFormat::Xml {
                    out.push_str(&escape_xml(&entry.content));
                } else {
                    out.push_str(&entry.content);
                }
                out.push_str("\n</");
                out.push_str(&tag);
                out.push_str(">\n");
            }
            out
        }
    }
}

/// Decode an archive stream back into entries.
///
/// Malformed input for the declared format is fatal for the whole call:
/// no partial entry list is produced. Entirely empty input decodes to an
/// empty archive for every format.
pub fn decode(input: &str, format: ArchiveFormat) -> Result<Vec<Entry>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    match format {
        ArchiveFormat::Jsonl => decode_jsonl(trimmed),
        ArchiveFormat::Json => decode_json(trimmed),
        ArchiveFormat::JsonArr => decode_jsonarr(trimmed),
        ArchiveFormat::Xml | ArchiveFormat::Xmlish => decode_xmlish(trimmed, format),
    }
}

fn decode_jsonl(input: &str) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for line in input.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let entry: Entry = serde_json::from_str(line)
            .map_err(|e| ArchiveError::decode(ArchiveFormat::Jsonl, e.to_string(), line))?;
        entries.push(entry);
    }
    Ok(entries)
}

fn decode_json(input: &str) -> Result<Vec<Entry>> {
    let map: serde_json::Map<String, Value> = serde_json::from_str(input)
        .map_err(|e| ArchiveError::decode(ArchiveFormat::Json, e.to_string(), input))?;

    let mut entries = Vec::with_capacity(map.len());
    for (path, value) in map {
        let Value::String(content) = value else {
            return Err(ArchiveError::decode(
                ArchiveFormat::Json,
                format!("value for key '{path}' is not a string"),
                &value.to_string(),
            ));
        };
        entries.push(Entry::new(path, content));
    }
    Ok(entries)
}

fn decode_jsonarr(input: &str) -> Result<Vec<Entry>> {
    let contents: Vec<String> = serde_json::from_str(input)
        .map_err(|e| ArchiveError::decode(ArchiveFormat::JsonArr, e.to_string(), input))?;

    Ok(contents
        .into_iter()
        .enumerate()
        .map(|(i, content)| Entry::new(format!("item_{i}"), content))
        .collect())
}

/// Scanner for the XML-family formats.
///
/// Rust's `regex` crate has no backreferences, so matching `<tag>...</tag>`
/// pairs is done by hand: find an opening tag, then search for its literal
/// closing sequence. Text between elements is skipped. For `xml` a missing
/// closing tag is a decode error; for `xmlish` the unmatched opener is
/// skipped, since that format makes no parseability promise in the first
/// place.
fn decode_xmlish(input: &str, format: ArchiveFormat) -> Result<Vec<Entry>> {
    let unescape = format == ArchiveFormat::Xml;
    let mut entries = Vec::new();
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let Some(tag_end) = after.find('>') else {
            break;
        };
        let tag = &after[..tag_end];
        if tag.is_empty() || tag.starts_with('/') || tag.contains('<') {
            rest = after;
            continue;
        }

        let body_and_rest = &after[tag_end + 1..];
        let closing = format!("</{tag}>");
        let Some(close_at) = body_and_rest.find(&closing) else {
            if format == ArchiveFormat::Xml {
                return Err(ArchiveError::decode(
                    format,
                    format!("missing closing tag </{tag}>"),
                    tag,
                ));
            }
            rest = after;
            continue;
        };

        // Strip only the single newline the encoder frames the body with.
        let mut body = &body_and_rest[..close_at];
        body = body.strip_prefix('\n').unwrap_or(body);
        body = body.strip_suffix('\n').unwrap_or(body);

        let content = if unescape {
            unescape_xml(body)
        } else {
            body.to_string()
        };
        entries.push(Entry::new(tag.replace('_', "."), content));

        rest = &body_and_rest[close_at + closing.len()..];
    }

    Ok(entries)
}

/// Serialize one jsonl line with a stable `path`, `content` key order.
fn jsonl_line(path: &str, content: &str) -> String {
    format!(
        r#"{{"path":{},"content":{}}}"#,
        Value::String(path.to_string()),
        Value::String(content.to_string()),
    )
}

/// Reduce a path to a well-formed element name. Anything outside
/// `[A-Za-z0-9_-]` becomes `_`; decode maps `_` back to `.`, which makes
/// the tag transform lossy for paths with other special characters.
fn sanitize_tag(path: &str) -> String {
    path.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn escape_xml(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

fn unescape_xml(content: &str) -> String {
    content
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
