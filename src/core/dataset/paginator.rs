use crate::core::dataset::Dataset;
use crate::core::socrata::QueryClient;
use crate::domain::error::DataSfResult;
use crate::domain::record::{Page, QueryParams};
use tracing::debug;

/// Forward-only, lazy sequence of pages for one query.
///
/// Each call to [`Paginator::next_page`] issues exactly one request. The
/// sequence ends after a throttled page, a page shorter than the page size,
/// an error, or once the next offset would overflow a `u64`. Dropping the
/// paginator early fetches nothing further.
pub struct Paginator<'a> {
    dataset: &'a dyn Dataset,
    client: &'a dyn QueryClient,
    params: QueryParams,
    done: bool,
}

impl<'a> Paginator<'a> {
    /// Start paginating from `params.page_offset`
    pub fn new(dataset: &'a dyn Dataset, client: &'a dyn QueryClient, params: QueryParams) -> Self {
        let done = params.page_size == 0;
        Self {
            dataset,
            client,
            params,
            done,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Fetch the next page, or `None` once the sequence is exhausted
    pub async fn next_page(&mut self) -> DataSfResult<Option<Page>> {
        if self.done {
            return Ok(None);
        }

        let query = self.dataset.build_query(&self.params);
        debug!("Query: {}", query);

        let records = match self.client.query(&query).await {
            Ok(records) => records,
            Err(e) => {
                self.done = true;
                return Err(e);
            }
        };

        let page = Page {
            offset: self.params.page_offset,
            records,
        };
        let next_offset = self
            .params
            .page_offset
            .checked_add(u64::from(self.params.page_size));

        match next_offset {
            Some(offset) if !page.is_last(self.params.page_size) => {
                self.params.page_offset = offset;
            }
            _ => {
                debug!(
                    "Last page reached at offset {} ({} records)",
                    page.offset,
                    page.len()
                );
                self.done = true;
            }
        }

        Ok(Some(page))
    }
}
