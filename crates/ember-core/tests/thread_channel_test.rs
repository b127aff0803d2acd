// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use ember_core::{Module, ModuleRegistry, ThreadEvent, ThreadModule, Variant};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_jobs_channel_scenario() {
    // --- 1. ARRANGE ---
    // The runtime root registers the thread module during init.
    let mut registry = ModuleRegistry::new();
    registry
        .register(Arc::new(ThreadModule::new()))
        .expect("first registration succeeds");

    let module = registry.get("thread").expect("module was registered");
    let threads = module
        .as_any()
        .downcast_ref::<ThreadModule>()
        .expect("concrete type behind the name");

    let jobs = threads.channel("jobs");

    // --- 2. ACT ---
    // Task A pushes 1, 2, 3; task B demands three times.
    let mut producer = threads
        .new_thread("task-a", {
            let jobs = threads.channel("jobs");
            move || {
                for i in 1..=3 {
                    jobs.push(Variant::from(i));
                }
            }
        })
        .expect("valid producer");
    producer.start().expect("producer starts");

    // --- 3. ASSERT ---
    for expected in 1..=3 {
        let value = jobs.demand(Some(Duration::from_secs(2)));
        assert_eq!(
            value,
            Some(Variant::from(expected)),
            "messages arrive in push order"
        );
    }

    let start = Instant::now();
    let fourth = jobs.demand(Some(Duration::from_millis(100)));
    assert_eq!(fourth, None, "a fourth demand must time out");
    assert!(
        start.elapsed() >= Duration::from_millis(100),
        "timeout must not fire early"
    );

    producer.wait().expect("producer finishes cleanly");
}

#[test]
fn test_duplicate_module_registration_fails() {
    let mut registry = ModuleRegistry::new();
    registry
        .register(Arc::new(ThreadModule::new()))
        .expect("first registration succeeds");

    assert!(
        registry.register(Arc::new(ThreadModule::new())).is_err(),
        "one name, one module"
    );
    assert!(registry.get("missing").is_none());
}

#[test]
fn test_many_workers_share_one_named_channel() {
    let threads = ThreadModule::new();
    let producers = 4;
    let per_producer = 100;

    let mut workers: Vec<_> = (0..producers)
        .map(|p| {
            threads
                .new_thread(format!("producer-{p}"), {
                    let results = threads.channel("fanin");
                    move || {
                        for i in 0..per_producer {
                            results.push(Variant::from(f64::from(p * per_producer + i)));
                        }
                    }
                })
                .expect("valid worker")
        })
        .collect();

    for worker in &mut workers {
        worker.start().expect("worker starts");
    }

    let results = threads.channel("fanin");
    let mut seen = Vec::new();
    for _ in 0..producers * per_producer {
        let value = results
            .demand(Some(Duration::from_secs(5)))
            .expect("every pushed job arrives");
        seen.push(value.as_number().expect("only numbers pushed") as i32);
    }

    assert_eq!(results.pop(), None, "nothing left after full drain");
    seen.sort_unstable();
    let expected: Vec<i32> = (0..producers * per_producer).collect();
    assert_eq!(seen, expected, "no job lost or duplicated");

    for worker in &mut workers {
        worker.wait().expect("worker finishes cleanly");
    }
}

#[test]
fn test_demand_blocks_until_push() {
    let threads = ThreadModule::new();
    let channel = threads.new_channel();

    let consumer = {
        let channel = Arc::clone(&channel);
        thread::spawn(move || channel.demand(None))
    };

    // Give the consumer time to block; the queue stays empty meanwhile.
    thread::sleep(Duration::from_millis(50));
    assert_eq!(channel.count(), 0);

    channel.push(Variant::from("wake up"));
    let value = consumer.join().expect("consumer should finish");
    assert_eq!(value, Some(Variant::from("wake up")));
}

#[test]
fn test_supply_handshake_between_workers() {
    let threads = ThreadModule::new();
    let handoff = threads.channel("handoff");

    let mut courier = threads
        .new_thread("courier", {
            let handoff = threads.channel("handoff");
            move || {
                let delivered = handoff.supply(Variant::from("package"), None);
                assert!(delivered, "supply returns once the package is taken");
            }
        })
        .expect("valid worker");
    courier.start().expect("courier starts");

    let value = handoff.demand(Some(Duration::from_secs(2)));
    assert_eq!(value, Some(Variant::from("package")));
    courier.wait().expect("courier finishes cleanly");
}

#[test]
fn test_lifecycle_events_arrive_in_order() {
    let threads = ThreadModule::new();

    let mut worker = threads
        .new_thread("observed", || {})
        .expect("valid worker");
    worker.start().expect("worker starts");
    worker.wait().expect("worker finishes");

    let events = threads.events().drain();
    assert_eq!(
        events,
        vec![
            ThreadEvent::Started {
                name: "observed".to_owned()
            },
            ThreadEvent::Finished {
                name: "observed".to_owned()
            },
        ],
        "started must precede finished"
    );
}
