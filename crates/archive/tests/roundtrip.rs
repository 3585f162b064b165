use pretty_assertions::assert_eq;
use promptmap_archive::{decode, encode, ArchiveFormat, Entry};

fn awkward_entries() -> Vec<Entry> {
    vec![
        Entry::new("src/lib.rs", "fn main() {\n    println!(\"hi\");\n}\n"),
        Entry::new("notes.txt", "a < b && b > c, \"quoted\" and 'single'"),
        Entry::new("empty.txt", ""),
        Entry::new("unicode.txt", "héllo wörld — ±∞"),
    ]
}

#[test]
fn jsonl_round_trip_preserves_paths_and_content() {
    let entries = awkward_entries();
    let stream = encode(&entries, ArchiveFormat::Jsonl);
    assert_eq!(decode(&stream, ArchiveFormat::Jsonl).unwrap(), entries);
}

#[test]
fn json_round_trip_preserves_content_per_key() {
    let entries = awkward_entries();
    let stream = encode(&entries, ArchiveFormat::Json);
    let decoded = decode(&stream, ArchiveFormat::Json).unwrap();

    // Key order is not guaranteed to survive, content per key is.
    assert_eq!(decoded.len(), entries.len());
    for entry in &entries {
        let found = decoded
            .iter()
            .find(|d| d.path == entry.path)
            .unwrap_or_else(|| panic!("missing key {}", entry.path));
        assert_eq!(found.content, entry.content);
    }
}

#[test]
fn jsonarr_round_trip_preserves_content_and_order() {
    let entries = awkward_entries();
    let stream = encode(&entries, ArchiveFormat::JsonArr);
    let decoded = decode(&stream, ArchiveFormat::JsonArr).unwrap();

    assert_eq!(decoded.len(), entries.len());
    for (i, (decoded, original)) in decoded.iter().zip(&entries).enumerate() {
        assert_eq!(decoded.path, format!("item_{i}"));
        assert_eq!(decoded.content, original.content);
    }
}

#[test]
fn xml_round_trip_preserves_content_for_simple_paths() {
    // Tag names only keep [A-Za-z0-9_-]; dots are restored on decode, so
    // simple file names survive the trip intact.
    let entries = vec![
        Entry::new("readme.md", "# Title\n\na < b, x > y & z"),
        Entry::new("main.py", "print('<html>')"),
    ];
    let stream = encode(&entries, ArchiveFormat::Xml);
    assert_eq!(decode(&stream, ArchiveFormat::Xml).unwrap(), entries);
}

#[test]
fn xmlish_round_trips_delimiter_free_content() {
    let entries = vec![Entry::new("plain.txt", "no markup in here at all")];
    let stream = encode(&entries, ArchiveFormat::Xmlish);
    assert_eq!(decode(&stream, ArchiveFormat::Xmlish).unwrap(), entries);
}

#[test]
fn xmlish_is_lossy_when_content_contains_the_closing_sequence() {
    // Documented behavior of the write-only format, not a round-trip bug:
    // the decoder stops at the first closing sequence it finds.
    let entries = vec![Entry::new("evil.txt", "text\n</evil_txt>\nmore text")];
    let stream = encode(&entries, ArchiveFormat::Xmlish);
    let decoded = decode(&stream, ArchiveFormat::Xmlish).unwrap();
    assert_eq!(decoded[0].path, "evil.txt");
    assert_ne!(decoded[0].content, entries[0].content);
}

#[test]
fn duplicate_paths_survive_jsonl_but_collapse_in_json() {
    let entries = vec![
        Entry::new("f.txt", "first"),
        Entry::new("f.txt", "second"),
    ];

    let jsonl = encode(&entries, ArchiveFormat::Jsonl);
    assert_eq!(decode(&jsonl, ArchiveFormat::Jsonl).unwrap().len(), 2);

    // The object format can only hold one value per key: last copy wins.
    let json = encode(&entries, ArchiveFormat::Json);
    let decoded = decode(&json, ArchiveFormat::Json).unwrap();
    assert_eq!(decoded, vec![Entry::new("f.txt", "second")]);
}
