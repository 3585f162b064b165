use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context as AnyhowContext, Result};
use promptmap_archive::{decode, encode, normalize, ArchiveFormat, Entry, PathPolicy};

use crate::ArchiveArgs;

pub fn run(args: ArchiveArgs) -> Result<()> {
    let format: ArchiveFormat = args.format.parse()?;
    let policy = PathPolicy::new(args.basename, args.basedir.clone());

    if args.extract {
        let stream = read_archive(&args.files)?;
        extract(&stream, format, &policy)
    } else {
        create(&args.files, format, &policy)
    }
}

/// Read files, normalize their paths, and write one archive to stdout.
///
/// Rejected paths and unreadable files degrade to warnings; the archive
/// is still produced from the accepted entries, and an empty accepted set
/// yields a valid empty archive.
fn create(files: &[PathBuf], format: ArchiveFormat, policy: &PathPolicy) -> Result<()> {
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for file in files {
        let raw = file.to_string_lossy();
        let path = match normalize(&raw, policy) {
            Ok(path) => path,
            Err(e) => {
                log::warn!("Skipping: {e}");
                skipped += 1;
                continue;
            }
        };

        match fs::read_to_string(file) {
            Ok(content) => entries.push(Entry::new(path, content)),
            Err(e) => {
                log::warn!("Could not read {}: {e}", file.display());
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} of {} files", files.len());
    }

    write_stream(&encode(&entries, format))
}

/// Decode an archive and write each entry to disk.
///
/// With `--basename`, colliding filenames resolve last-in-order wins
/// because entries are written sequentially.
fn extract(stream: &str, format: ArchiveFormat, policy: &PathPolicy) -> Result<()> {
    let entries = decode(stream, format).context("Failed to decode archive")?;

    for entry in &entries {
        let target = target_path(&entry.path, policy);
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
        }
        fs::write(&target, &entry.content)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        log::info!("Extracted: {}", target.display());
    }

    log::info!("Extracted {} entries", entries.len());
    Ok(())
}

fn target_path(entry_path: &str, policy: &PathPolicy) -> PathBuf {
    if policy.basename {
        return match Path::new(entry_path).file_name() {
            Some(name) => PathBuf::from(name),
            None => PathBuf::from(entry_path),
        };
    }
    match &policy.basedir {
        Some(basedir) => Path::new(basedir).join(entry_path),
        None => PathBuf::from(entry_path),
    }
}

fn read_archive(files: &[PathBuf]) -> Result<String> {
    match files.first() {
        Some(file) => {
            fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read archive from stdin")?;
            Ok(buf)
        }
    }
}

fn write_stream(stream: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(stream.as_bytes())?;
    if !stream.is_empty() && !stream.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    Ok(())
}
