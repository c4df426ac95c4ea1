use crate::cli::output::PageRenderer;
use crate::core::dataset::{Dataset, Paginator};
use crate::core::socrata::QueryClient;
use crate::domain::error::DataSfResult;
use crate::domain::record::QueryParams;
use crossterm::style::Stylize;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

/// Answer given at the prompt between pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Continue,
    Abort,
}

impl Confirmation {
    /// `q` aborts, anything else continues
    pub fn from_input(line: &str) -> Self {
        if line.trim() == "q" {
            Self::Abort
        } else {
            Self::Continue
        }
    }
}

/// What happened during one interactive run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintSummary {
    pub pages: usize,
    pub records: usize,
    pub aborted: bool,
    pub throttled: bool,
}

/// Prints pages one at a time and waits for confirmation between them
pub struct InteractivePrinter<R, W> {
    input: R,
    output: W,
    renderer: PageRenderer,
}

impl<R, W> InteractivePrinter<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, output: W, renderer: PageRenderer) -> Self {
        Self {
            input,
            output,
            renderer,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print the header, then every page until the results end or the user quits
    pub async fn run(
        &mut self,
        dataset: &dyn Dataset,
        client: &dyn QueryClient,
        params: QueryParams,
    ) -> DataSfResult<PrintSummary> {
        let mut summary = PrintSummary::default();

        if let Some(header) = self.renderer.header(dataset)? {
            writeln!(self.output, "{}", header)?;
        }

        let mut pager = Paginator::new(dataset, client, params);
        while let Some(page) = pager.next_page().await? {
            summary.throttled |= page.is_throttled();

            // A throttled page has nothing to print but is still confirmed.
            if let Some(text) = self.renderer.render(dataset, &page)? {
                writeln!(self.output, "{}", text)?;
                summary.pages += 1;
                summary.records += page.len();
            }

            if self.confirm().await? == Confirmation::Abort {
                summary.aborted = true;
                break;
            }
        }

        debug!(
            "Printed {} pages ({} records), aborted: {}",
            summary.pages, summary.records, summary.aborted
        );
        Ok(summary)
    }

    /// Prompt and block for one line; end of input aborts
    async fn confirm(&mut self) -> DataSfResult<Confirmation> {
        write!(
            self.output,
            "Please hit {} to continue, {} to abort.",
            "enter".green(),
            "q + enter".red()
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            writeln!(self.output)?;
            return Ok(Confirmation::Abort);
        }
        Ok(Confirmation::from_input(&line))
    }
}
