use std::fs;
use std::io::{self, Read, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as AnyhowContext, Result};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressDrawTarget};
use promptmap_archive::{decode, ArchiveFormat};
use promptmap_mapper::{
    expand, items_from_entries, map_items, LlmClient, LlmOptions, MapOptions, Transform,
};

use crate::{output, MapArgs};

pub async fn run(args: MapArgs) -> Result<()> {
    let (iformat, oformat) = resolve_formats(&args)?;
    if args.content && oformat != ArchiveFormat::Jsonl {
        anyhow::bail!("Cannot use --content with {oformat} output format");
    }
    if let Some(0) = args.branches {
        anyhow::bail!("--branches must be at least 1");
    }

    let stream = read_input(&args.input)?;
    let mut entries = decode(&stream, iformat).context("Failed to decode input")?;
    if let Some(branches) = args.branches {
        entries = expand(entries, branches);
    }

    let items = items_from_entries(entries, &args.prompt);
    let total = items.len();
    log::info!("Mapping {total} items with concurrency {}", args.concurrency);

    let client = LlmClient::from_env(LlmOptions {
        model: args.model.clone(),
        temperature: args.temperature,
        max_tokens: args.tokens,
    })?;

    // Progress goes to stderr; indicatif hides itself when stderr is not a
    // terminal, so piped runs stay clean.
    let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
    let transform: Arc<dyn Transform> = Arc::new(ProgressTransform {
        inner: Arc::new(client),
        bar: bar.clone(),
    });

    let options = MapOptions {
        concurrency: args.concurrency.max(1),
        timeout: Duration::from_secs(args.timeout),
    };
    let outcomes = map_items(items, transform, &options).await;
    bar.finish_and_clear();

    let failures = outcomes.iter().filter(|o| !o.is_success()).count();
    if failures > 0 {
        log::warn!("{failures} of {total} items failed; error outcomes are in the output");
    }

    let rendered = output::render_outcomes(&outcomes, oformat, args.content);
    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => io::stdout().lock().write_all(rendered.as_bytes())?,
    }
    Ok(())
}

/// `--format` sets both directions; either way the XML family is
/// archive-only and rejected here before any processing starts.
fn resolve_formats(args: &MapArgs) -> Result<(ArchiveFormat, ArchiveFormat)> {
    let (iformat, oformat) = match &args.format {
        Some(both) => (both.clone(), both.clone()),
        None => (args.iformat.clone(), args.oformat.clone()),
    };

    let iformat: ArchiveFormat = iformat.parse()?;
    let oformat: ArchiveFormat = oformat.parse()?;
    for format in [iformat, oformat] {
        if !format.is_map_format() {
            anyhow::bail!("Format {format} is not supported for map; use jsonl, json or jsonarr");
        }
    }
    Ok((iformat, oformat))
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read input from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))
}

/// Ticks the progress bar as each transform finishes, whatever the order.
struct ProgressTransform {
    inner: Arc<dyn Transform>,
    bar: ProgressBar,
}

#[async_trait]
impl Transform for ProgressTransform {
    async fn apply(&self, path: &str, prompt: &str) -> promptmap_mapper::Result<String> {
        let result = self.inner.apply(path, prompt).await;
        self.bar.inc(1);
        result
    }
}
