//! Background image worker.
//!
//! Bridges the sync game loop with async image searches: jobs go in through
//! [`ImageWorker::submit`], events come back through [`ImageWorker::try_recv`].

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::acquire::{acquire_pairs, fetch_candidate};
use crate::client::ImageSearch;
use crate::core::{AcquireRequest, RegenerateRequest};
use crate::types::{AcquisitionReport, FetchOutcome, PairId, RequestTicket};

/// Work for the image service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageJob {
    Acquire {
        ticket: RequestTicket,
        words: Vec<String>,
    },
    Regenerate {
        ticket: RequestTicket,
        pair_id: PairId,
        word: String,
    },
}

impl From<AcquireRequest> for ImageJob {
    fn from(req: AcquireRequest) -> Self {
        ImageJob::Acquire {
            ticket: req.ticket,
            words: req.words,
        }
    }
}

impl From<RegenerateRequest> for ImageJob {
    fn from(req: RegenerateRequest) -> Self {
        ImageJob::Regenerate {
            ticket: req.ticket,
            pair_id: req.pair_id,
            word: req.word,
        }
    }
}

/// Event delivered to the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    Progress {
        ticket: RequestTicket,
        done: usize,
        total: usize,
    },
    Acquired {
        ticket: RequestTicket,
        report: AcquisitionReport,
    },
    Regenerated {
        ticket: RequestTicket,
        pair_id: PairId,
        outcome: FetchOutcome,
    },
}

/// Running worker instance.
pub struct ImageWorker {
    rt: Runtime,
    job_tx: mpsc::UnboundedSender<ImageJob>,
    event_rx: mpsc::UnboundedReceiver<WorkerEvent>,
}

impl ImageWorker {
    pub fn start<S>(search: S) -> std::io::Result<Self>
    where
        S: ImageSearch + Send + Sync + 'static,
    {
        let (job_tx, mut job_rx) = mpsc::unbounded_channel::<ImageJob>();
        let (event_tx, event_rx) = mpsc::unbounded_channel::<WorkerEvent>();
        let search = Arc::new(search);

        let rt = Runtime::new()?;
        rt.spawn(async move {
            while let Some(job) = job_rx.recv().await {
                let search = Arc::clone(&search);
                let events = event_tx.clone();
                tokio::spawn(async move {
                    run_job(search.as_ref(), job, &events).await;
                });
            }
        });

        Ok(Self {
            rt,
            job_tx,
            event_rx,
        })
    }

    pub fn submit(&self, job: impl Into<ImageJob>) {
        if self.job_tx.send(job.into()).is_err() {
            error!("image worker stopped; job dropped");
        }
    }

    pub fn try_recv(&mut self) -> Option<WorkerEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Block until the next event or `timeout`.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<WorkerEvent> {
        let event_rx = &mut self.event_rx;
        self.rt
            .block_on(async { tokio::time::timeout(timeout, event_rx.recv()).await })
            .ok()
            .flatten()
    }
}

async fn run_job<S: ImageSearch>(
    search: &S,
    job: ImageJob,
    events: &mpsc::UnboundedSender<WorkerEvent>,
) {
    match job {
        ImageJob::Acquire { ticket, words } => {
            debug!("job {:?}: acquire {} words", ticket, words.len());
            let report = acquire_pairs(search, &words, |done, total| {
                let _ = events.send(WorkerEvent::Progress {
                    ticket,
                    done,
                    total,
                });
            })
            .await;
            let _ = events.send(WorkerEvent::Acquired { ticket, report });
        }
        ImageJob::Regenerate {
            ticket,
            pair_id,
            word,
        } => {
            debug!("job {:?}: regenerate pair {}", ticket, pair_id);
            let outcome = fetch_candidate(search, &word).await;
            let _ = events.send(WorkerEvent::Regenerated {
                ticket,
                pair_id,
                outcome,
            });
        }
    }
}
