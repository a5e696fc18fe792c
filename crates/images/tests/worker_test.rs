use std::time::Duration;

use memory_match_images::types::{FetchOutcome, ImageCandidate, RequestTicket};
use memory_match_images::{ImageJob, ImageSearch, ImageWorker, SearchError, WorkerEvent};

struct FakeSearch;

impl ImageSearch for FakeSearch {
    async fn search(&self, query: &str) -> Result<Vec<ImageCandidate>, SearchError> {
        if query == "nothing" {
            return Ok(Vec::new());
        }
        Ok(vec![ImageCandidate {
            id: 1,
            image_url: format!("https://cdn/{}.jpg", query),
            ..ImageCandidate::default()
        }])
    }
}

fn collect_until_done(worker: &mut ImageWorker, done: impl Fn(&WorkerEvent) -> bool) -> Vec<WorkerEvent> {
    let mut events = Vec::new();
    while let Some(event) = worker.recv_timeout(Duration::from_secs(5)) {
        let finished = done(&event);
        events.push(event);
        if finished {
            break;
        }
    }
    events
}

#[test]
fn test_acquire_job_reports_progress_then_result() {
    let mut worker = ImageWorker::start(FakeSearch).unwrap();
    worker.submit(ImageJob::Acquire {
        ticket: RequestTicket(7),
        words: vec!["cat".to_string(), "nothing".to_string(), "owl".to_string()],
    });

    let events = collect_until_done(&mut worker, |e| matches!(e, WorkerEvent::Acquired { .. }));
    let progress: Vec<(usize, usize)> = events
        .iter()
        .filter_map(|e| match e {
            WorkerEvent::Progress { done, total, .. } => Some((*done, *total)),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![(1, 3), (2, 3), (3, 3)]);

    match events.last() {
        Some(WorkerEvent::Acquired { ticket, report }) => {
            assert_eq!(*ticket, RequestTicket(7));
            assert_eq!(report.pairs.len(), 2);
            assert_eq!(report.pairs[1].word, "owl");
            assert_eq!(report.dropped[0].word, "nothing");
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[test]
fn test_regenerate_job() {
    let mut worker = ImageWorker::start(FakeSearch).unwrap();
    worker.submit(ImageJob::Regenerate {
        ticket: RequestTicket(3),
        pair_id: 2,
        word: "fox".to_string(),
    });

    let event = worker.recv_timeout(Duration::from_secs(5)).unwrap();
    match event {
        WorkerEvent::Regenerated {
            ticket,
            pair_id,
            outcome: FetchOutcome::Found(candidate),
        } => {
            assert_eq!(ticket, RequestTicket(3));
            assert_eq!(pair_id, 2);
            assert_eq!(candidate.image_url, "https://cdn/fox.jpg");
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[test]
fn test_try_recv_empty_without_jobs() {
    let mut worker = ImageWorker::start(FakeSearch).unwrap();
    assert!(worker.try_recv().is_none());
}
