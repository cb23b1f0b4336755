//! Background search worker thread

use crate::aggregate::{self, SearchOutcome};
use crate::scheduler::SearchRequest;
use hubcomplete_api::SearchBackend;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Outcome of one aggregation cycle, tagged with the request it answers
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub request_id: u64,
    pub query: String,
    pub outcome: SearchOutcome,
    pub duration: Duration,
}

/// Spawn the search worker thread.
///
/// Requests queued while a search is running are coalesced: only the latest
/// one is executed, the others never reach the network. The thread exits
/// once the request channel is closed or nobody listens for results.
pub fn spawn_worker<B>(
    backend: B,
    query_rx: Receiver<SearchRequest>,
    result_tx: Sender<SearchResults>,
) -> JoinHandle<()>
where
    B: SearchBackend + Send + Sync + 'static,
{
    thread::spawn(move || {
        while let Ok(mut request) = query_rx.recv() {
            // Drain pending requests, keep only the latest
            while let Ok(next) = query_rx.try_recv() {
                log::debug!("Skipping superseded search {:?}", request.query);
                request = next;
            }

            let start = Instant::now();
            let outcome = aggregate::search(&backend, &request.query);
            let duration = start.elapsed();
            log::debug!(
                "Search {} {:?}: {} results, {} errors in {:?}",
                request.id,
                request.query,
                outcome.results.len(),
                outcome.errors.len(),
                duration
            );

            let results = SearchResults {
                request_id: request.id,
                query: request.query,
                outcome,
                duration,
            };
            if result_tx.send(results).is_err() {
                break;
            }
        }
    })
}
