use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use stablewatch::engine::WorkQueue;
use stablewatch::errors::StablewatchError;
use stablewatch::types::QueueItem;
use stablewatch_test_utils::with_timeout;

fn file(i: usize) -> QueueItem {
    QueueItem::File(PathBuf::from(format!("file-{i}")))
}

async fn join_completes(q: &WorkQueue) -> bool {
    tokio::time::timeout(Duration::from_millis(20), q.join())
        .await
        .is_ok()
}

#[tokio::test]
async fn get_waits_for_a_concurrent_put() {
    let q = Arc::new(WorkQueue::new());

    let consumer = {
        let q = Arc::clone(&q);
        tokio::spawn(async move { q.get().await })
    };

    tokio::time::sleep(Duration::from_millis(20)).await;
    q.put(file(1));

    let item = with_timeout(consumer).await.unwrap();
    assert_eq!(item, file(1));
}

#[tokio::test]
async fn join_wakes_when_last_item_is_done() {
    let q = Arc::new(WorkQueue::new());
    q.put(file(1));
    q.put(QueueItem::Sentinel);

    let joiner = {
        let q = Arc::clone(&q);
        tokio::spawn(async move { q.join().await })
    };

    let _ = q.get().await;
    q.mark_done().unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!joiner.is_finished());

    let _ = q.get().await;
    q.mark_done().unwrap();
    with_timeout(joiner).await.unwrap().unwrap();
}

#[test]
fn mark_done_without_put_is_rejected() {
    let q = WorkQueue::new();
    q.put(file(1));
    q.mark_done().unwrap();
    assert!(matches!(q.mark_done(), Err(StablewatchError::Queue(_))));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Interleave puts and (get + mark_done) pairs; join must complete iff
    // every put item has been marked done. Items must come out in put order.
    #[test]
    fn join_completes_iff_all_items_done(ops in proptest::collection::vec(any::<bool>(), 0..40)) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();

        rt.block_on(async {
            let q = WorkQueue::new();
            let mut put = 0usize;
            let mut done = 0usize;

            for is_put in ops {
                if is_put {
                    q.put(file(put));
                    put += 1;
                } else if done < put {
                    let item = q.get().await;
                    prop_assert_eq!(item, file(done));
                    q.mark_done().unwrap();
                    done += 1;
                }
                prop_assert_eq!(q.unfinished(), put - done);
            }
            prop_assert_eq!(join_completes(&q).await, put == done);

            // Finishing the rest always lets join through.
            while done < put {
                let _ = q.get().await;
                q.mark_done().unwrap();
                done += 1;
            }
            prop_assert!(join_completes(&q).await);
            Ok::<(), TestCaseError>(())
        })?;
    }
}
