use std::future::Future;
use tracing::debug;

/// Fetches pages 1, 2, ... in order until `target` items are collected, an
/// empty page signals the source has nothing left, or `ceil(target / page_size)`
/// pages have been requested. Short pages do not end the collection. The first
/// error aborts the whole collection.
pub async fn collect_paginated<T, E, F, Fut>(
    target: usize,
    page_size: usize,
    mut fetch_page: F,
) -> Result<Vec<T>, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    if target == 0 || page_size == 0 {
        return Ok(Vec::new());
    }

    let last_page = u32::try_from(target.div_ceil(page_size)).unwrap_or(u32::MAX);
    // Grows page by page, `target` is operator input and may be huge
    let mut collected = Vec::with_capacity(target.min(page_size));

    for page in 1..=last_page {
        let items = fetch_page(page).await?;
        let exhausted = items.is_empty();

        let remaining = target - collected.len();
        collected.extend(items.into_iter().take(remaining));

        debug!(page, collected = collected.len(), target, "Page collected");

        if collected.len() >= target || exhausted {
            break;
        }
    }

    Ok(collected)
}
