//! Offset/limit describe loop

use std::future::Future;

use crate::error::ProviderResult;

/// Default page size for describe calls.
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// One page of a describe call.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Server-reported total, when the action reports one.
    pub total: Option<i64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: Option<i64>) -> Self {
        Self { items, total }
    }
}

/// Fetch every page and return all items in server order.
///
/// `fetch(offset, limit)` is called with increasing offsets until a page comes back
/// empty or the running offset reaches the reported total. An empty page before the
/// total is reached ends the loop without error.
pub async fn paginate<T, F, Fut>(limit: i64, mut fetch: F) -> ProviderResult<Vec<T>>
where
    F: FnMut(i64, i64) -> Fut,
    Fut: Future<Output = ProviderResult<Page<T>>>,
{
    let limit = limit.max(1);
    let mut offset = 0_i64;
    let mut all = Vec::new();

    loop {
        let page = fetch(offset, limit).await?;
        if page.items.is_empty() {
            break;
        }
        #[allow(clippy::cast_possible_wrap)]
        let fetched = page.items.len() as i64;
        all.extend(page.items);
        offset += fetched;
        if page.total.is_some_and(|total| offset >= total) {
            break;
        }
    }

    Ok(all)
}
