use std::io::IsTerminal;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::debounce::Debouncer;
use crate::error::PagebuilderError;
use crate::toolkit::Toolkit;

use super::output::{print_error, print_search_result, OutputMode};

/// Default quiet period for `browse`, in milliseconds.
pub const DEFAULT_BROWSE_DELAY_MS: u64 = 300;

/// Run the search command.
pub async fn run_search(
    toolkit: &Toolkit,
    query: &str,
    mode: OutputMode,
) -> Result<(), PagebuilderError> {
    let is_tty = std::io::stdout().is_terminal();
    let search_mode = toolkit.photos().mode()?;
    tracing::debug!("Searching '{query}' in {search_mode} mode");
    let result = toolkit.photos().search_photos(query).await?;
    print_search_result(&result, mode, is_tty);
    Ok(())
}

/// Run the browse command: one query per stdin line, searching only once
/// typing pauses for `delay`.
pub async fn run_browse(toolkit: &Toolkit, delay: Duration) -> Result<(), PagebuilderError> {
    if std::io::stdin().is_terminal() {
        eprintln!("Type a query per line, Ctrl-D to quit.");
    }
    let is_tty = std::io::stdout().is_terminal();
    let queries = debounced_queries(BufReader::new(tokio::io::stdin()), delay);
    consume_queries(queries, |query| async move {
        match toolkit.photos().search_photos(&query).await {
            Ok(result) => {
                if is_tty {
                    println!("\n== {query} ==");
                }
                print_search_result(&result, OutputMode::Pretty, is_tty);
            }
            // one failed search does not end the session
            Err(e) => print_error(&e, false),
        }
    })
    .await;
    Ok(())
}

/// Feed non-empty trimmed lines of `input` through a [`Debouncer`] and
/// deliver the surviving queries on the returned channel. The channel closes
/// once input ends and the trailing query has been delivered.
pub fn debounced_queries<R>(input: R, delay: Duration) -> mpsc::UnboundedReceiver<String>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let debouncer = Debouncer::new(delay, move |query: String| {
            let _ = tx.send(query);
        });
        let mut lines = input.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let query = line.trim();
                    if !query.is_empty() {
                        debouncer.call(query.to_string());
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Failed to read query: {e}");
                    break;
                }
            }
        }
        // let the trailing call fire before the sender goes away
        tokio::time::sleep(delay + Duration::from_millis(10)).await;
    });
    rx
}

async fn consume_queries<F, Fut>(mut queries: mpsc::UnboundedReceiver<String>, mut handle: F)
where
    F: FnMut(String) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    while let Some(query) = queries.recv().await {
        handle(query).await;
    }
}
