//! Extract command implementation.

use guidediary_codec::{decode, Entry, Trailer};
use guidediary_core::EntryDump;
use std::path::Path;
use tracing::info;

/// Runs the extract command.
pub fn run(
    path: &Path,
    read_trailer: Option<Trailer>,
    sorted: bool,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let entries = read_entries(path, read_trailer, sorted)?;
    info!("Found {} entries in {:?}", entries.len(), path);

    match format {
        "json" => {
            println!("{}", render_json(&entries)?);
        }
        _ => {
            print_text_output(&entries);
        }
    }

    Ok(())
}

fn read_entries(
    path: &Path,
    read_trailer: Option<Trailer>,
    sorted: bool,
) -> Result<Vec<Entry>, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(path)?;
    let trailer = read_trailer.unwrap_or_else(|| Trailer::detect(bytes.len()));
    if trailer == Trailer::Truncated && read_trailer.is_none() {
        info!("{:?} is missing 2 bytes at the end", path);
    }
    let mut entries = decode(&bytes, trailer)?;
    if sorted {
        entries.sort_by_key(Entry::timestamp);
    }
    Ok(entries)
}

fn render_json(entries: &[Entry]) -> serde_json::Result<String> {
    let dump: Vec<EntryDump> = entries.iter().map(EntryDump::from).collect();
    serde_json::to_string_pretty(&dump)
}

fn print_text_output(entries: &[Entry]) {
    for entry in entries {
        println!("{}", entry.as_text());
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidediary_testkit::prelude::*;

    #[test]
    fn sorted_extract() {
        let dir = DiaryDir::new();
        let path = dir.write_diary(
            "in.gcal",
            &[entry(2014, 2, 14, 20, "Dinner"), entry(2014, 1, 1, 0, "New year")],
            Trailer::Complete,
        );
        let entries = read_entries(&path, None, true).unwrap();
        assert_eq!(entries[0].trimmed_text(), "New year");

        let unsorted = read_entries(&path, None, false).unwrap();
        assert_eq!(unsorted[0].trimmed_text(), "Dinner");
    }

    #[test]
    fn json_dump_fields() {
        let json = render_json(&[entry(2014, 2, 14, 20, " Dinner ")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["date"], "2014-02-14T20:00:00");
        assert_eq!(value[0]["text"], "Dinner");
        assert!(value[0]["raw"].as_str().unwrap().starts_with("2044696e6e6572"));
    }
}
