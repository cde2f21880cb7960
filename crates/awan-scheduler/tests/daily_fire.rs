//! End-to-end scheduler scenario: one configured slot, a manual clock
//! stepped through minutes and days, counting collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;

use awan_scheduler::{
    Clock, Producer, Publisher, RetryExecutor, RetryPolicy, ScheduleTable, SchedulerLoop, WallTime,
};

#[derive(Clone)]
struct ManualClock(Arc<Mutex<WallTime>>);

impl ManualClock {
    fn at(hour: u32, minute: u32, date: NaiveDate) -> Self {
        Self(Arc::new(Mutex::new(WallTime::new(hour, minute, date))))
    }

    fn set(&self, hour: u32, minute: u32, date: NaiveDate) {
        *self.0.lock().unwrap() = WallTime::new(hour, minute, date);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> WallTime {
        *self.0.lock().unwrap()
    }
}

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, n).unwrap()
}

/// The morning-post scenario: schedule {"pagi": "08:00"}, the producer
/// renders a Jakarta morning message, the publisher accepts. The slot
/// fires exactly once at 08:00 and a re-poll in the same minute is a
/// no-op.
#[tokio::test(start_paused = true)]
async fn morning_slot_fires_once_per_day() {
    let clock = ManualClock::at(7, 59, day(1));
    let schedule = ScheduleTable::parse([("pagi", "08:00")]).unwrap();
    let mut scheduler = SchedulerLoop::new(clock.clone(), schedule, RetryExecutor::default());

    let producer: Producer = Box::new(|| {
        Box::pin(async { Ok("Pagi ini di Jakarta cuaca cerah, sekitar 25°C.".to_string()) })
    });

    let posts: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&posts);
    let publisher: Publisher = Box::new(move |text| {
        let sink = Arc::clone(&sink);
        Box::pin(async move {
            sink.lock().unwrap().push(text);
            Ok(true)
        })
    });

    // 07:59 is not a match
    scheduler.tick(&producer, &publisher).await;
    assert!(posts.lock().unwrap().is_empty());

    // 08:00 fires and publishes the rendered morning message
    clock.set(8, 0, day(1));
    scheduler.tick(&producer, &publisher).await;
    {
        let posts = posts.lock().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0], "Pagi ini di Jakarta cuaca cerah, sekitar 25°C.");
    }
    assert!(scheduler.tracker().has_run_today("pagi", day(1)));

    // A second poll still at 08:00 on day 1 produces no further publish
    scheduler.tick(&producer, &publisher).await;
    assert_eq!(posts.lock().unwrap().len(), 1);

    // 08:01 is past the target, still nothing
    clock.set(8, 1, day(1));
    scheduler.tick(&producer, &publisher).await;
    assert_eq!(posts.lock().unwrap().len(), 1);

    // The next morning fires again with no explicit reset
    clock.set(8, 0, day(2));
    scheduler.tick(&producer, &publisher).await;
    assert_eq!(posts.lock().unwrap().len(), 2);
}

/// Fetch fails twice, then the cycle completes: exactly one publish, and
/// the day is marked only after the publish succeeded.
#[tokio::test(start_paused = true)]
async fn transient_fetch_failures_retry_until_published() {
    let clock = ManualClock::at(8, 0, day(1));
    let schedule = ScheduleTable::parse([("pagi", "08:00")]).unwrap();
    let executor = RetryExecutor::new(RetryPolicy {
        pause: Duration::from_secs(30),
        max_attempts: None,
    });
    let mut scheduler = SchedulerLoop::new(clock, schedule, executor);

    let produce_calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&produce_calls);
    let producer: Producer = Box::new(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if n < 2 {
                Err("fetch failed".to_string())
            } else {
                Ok("Pagi ini di Jakarta cuaca cerah, sekitar 25°C.".to_string())
            }
        })
    });

    let published = Arc::new(AtomicUsize::new(0));
    let publish_counter = Arc::clone(&published);
    let publisher: Publisher = Box::new(move |_text| {
        let publish_counter = Arc::clone(&publish_counter);
        Box::pin(async move {
            publish_counter.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        })
    });

    scheduler.tick(&producer, &publisher).await;

    assert_eq!(produce_calls.load(Ordering::SeqCst), 3);
    assert_eq!(published.load(Ordering::SeqCst), 1);
    assert!(scheduler.tracker().has_run_today("pagi", day(1)));
}

/// Two slots share a target minute: both fire in table order within the
/// same tick, each marked independently.
#[tokio::test(start_paused = true)]
async fn coinciding_slots_fire_in_table_order() {
    let clock = ManualClock::at(12, 0, day(1));
    let schedule = ScheduleTable::parse([("siang", "12:00"), ("dzuhur", "12:00")]).unwrap();
    let mut scheduler = SchedulerLoop::new(clock, schedule, RetryExecutor::default());

    let order: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let producer: Producer =
        Box::new(|| Box::pin(async { Ok("Siang hari di Jakarta".to_string()) }));
    let sink = Arc::clone(&order);
    let publisher: Publisher = Box::new(move |text| {
        let sink = Arc::clone(&sink);
        Box::pin(async move {
            sink.lock().unwrap().push(text);
            Ok(true)
        })
    });

    scheduler.tick(&producer, &publisher).await;

    assert_eq!(order.lock().unwrap().len(), 2);
    assert!(scheduler.tracker().has_run_today("siang", day(1)));
    assert!(scheduler.tracker().has_run_today("dzuhur", day(1)));
}
