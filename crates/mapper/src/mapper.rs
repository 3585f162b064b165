use std::sync::Arc;
use std::time::Duration;

use promptmap_archive::Entry;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::TransformError;
use crate::template;
use crate::transform::Transform;

/// The unit the concurrent mapper operates on.
///
/// `index` is the item's 0-based position in the input sequence. It is
/// assigned once at ingestion and is the sole ordering key for output
/// assembly; completion order never influences it.
#[derive(Debug, Clone)]
pub struct MapItem {
    pub index: usize,
    pub path: String,
    pub content: String,
    pub prompt: String,
}

/// Exactly one outcome exists per item: success content or an error
/// descriptor, plus the original input for `--content` rendering.
#[derive(Debug)]
pub struct MapOutcome {
    pub index: usize,
    pub path: String,
    pub result: Result<String, TransformError>,
    pub input: String,
}

impl MapOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone)]
pub struct MapOptions {
    /// Maximum transforms in flight simultaneously
    pub concurrency: usize,
    /// Per-item deadline; elapsing becomes an ordinary error outcome
    pub timeout: Duration,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            concurrency: 16,
            timeout: Duration::from_secs(120),
        }
    }
}

/// Turn decoded entries into map items: assign sequence indices and
/// render each prompt from the template.
pub fn items_from_entries(entries: Vec<Entry>, prompt_template: &str) -> Vec<MapItem> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| MapItem {
            index,
            prompt: template::render(prompt_template, &entry.content),
            path: entry.path,
            content: entry.content,
        })
        .collect()
}

/// Apply `transform` to every item with at most `options.concurrency`
/// invocations in flight, returning outcomes ordered by input index.
///
/// Item failures are isolated: one failing (or timing out, or panicking)
/// transform produces an error outcome for its own index and nothing
/// else. The call returns only once every index has a recorded outcome.
pub async fn map_items(
    items: Vec<MapItem>,
    transform: Arc<dyn Transform>,
    options: &MapOptions,
) -> Vec<MapOutcome> {
    let total = items.len();
    // Kept aside so a worker that dies without reporting still yields an
    // outcome for its slot.
    let meta: Vec<(String, String)> = items
        .iter()
        .map(|item| (item.path.clone(), item.content.clone()))
        .collect();

    let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
    let timeout = options.timeout;
    let mut workers = JoinSet::new();

    for item in items {
        let transform = Arc::clone(&transform);
        let semaphore = Arc::clone(&semaphore);
        workers.spawn(async move {
            // The semaphore is never closed; acquire failures are not expected.
            let _permit = semaphore
                .acquire_owned()
                .await
                .unwrap_or_else(|_| unreachable!("mapper semaphore closed"));

            let result =
                match tokio::time::timeout(timeout, transform.apply(&item.path, &item.prompt))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(TransformError::Timeout(timeout)),
                };
            (item, result)
        });
    }

    let mut slots: Vec<Option<MapOutcome>> = Vec::with_capacity(total);
    slots.resize_with(total, || None);

    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok((item, result)) => {
                if let Err(e) = &result {
                    log::warn!("Transform failed for {}: {e}", item.path);
                }
                if let Some(slot) = slots.get_mut(item.index) {
                    *slot = Some(MapOutcome {
                        index: item.index,
                        path: item.path,
                        result,
                        input: item.content,
                    });
                }
            }
            Err(e) => log::warn!("Worker task did not complete: {e}"),
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.unwrap_or_else(|| {
                let (path, input) = meta[index].clone();
                MapOutcome {
                    index,
                    path,
                    result: Err(TransformError::Other("worker task aborted".into())),
                    input,
                }
            })
        })
        .collect()
}
