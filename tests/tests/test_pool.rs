// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use spool::{EngineFactory, Error, FactoryConfig, PoolStrategy};

fn factory_with(strategy: PoolStrategy) -> EngineFactory {
    EngineFactory::new(FactoryConfig {
        strategy,
        strict: false,
    })
}

#[test]
fn test_capped_pool_never_exceeds_cap() {
    const CAP: usize = 2;
    const WORKERS: usize = 8;
    const CYCLES: usize = 25;

    let factory = Arc::new(factory_with(PoolStrategy::pooled(Some(CAP))));
    let mut handles = vec![];
    for worker in 0..WORKERS {
        let factory = Arc::clone(&factory);
        handles.push(thread::spawn(move || {
            for cycle in 0..CYCLES {
                let mut engine = factory.acquire().unwrap();
                let value = (worker * CYCLES + cycle) as i64;
                let bytes = engine.encode(&value).unwrap();
                let back: i64 = engine.decode(&bytes).unwrap();
                assert_eq!(back, value);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
    // engines are never destroyed under the pooled strategy, so the live
    // count is the peak that ever existed
    assert!(factory.pool().live_instances() <= CAP);
    assert!(factory.pool().live_instances() >= 1);
}

#[test]
fn test_exhausted_pool_times_out() {
    let factory = factory_with(PoolStrategy::Pooled {
        max_instances: Some(1),
        block_on_exhaustion: true,
        acquire_timeout: Some(Duration::from_millis(50)),
    });

    let _held = factory.acquire().unwrap();
    let err = factory.acquire().unwrap_err();
    assert!(matches!(err, Error::PoolExhausted(_)));
}

#[test]
fn test_exhausted_pool_fails_fast_when_not_blocking() {
    let factory = factory_with(PoolStrategy::Pooled {
        max_instances: Some(1),
        block_on_exhaustion: false,
        acquire_timeout: None,
    });

    let held = factory.acquire().unwrap();
    let err = factory.acquire().unwrap_err();
    assert!(matches!(err, Error::PoolExhausted(_)));

    // releasing makes the instance available again
    held.release();
    let _again = factory.acquire().unwrap();
}

#[test]
fn test_blocked_acquire_wakes_on_release() {
    let factory = Arc::new(factory_with(PoolStrategy::pooled(Some(1))));
    let held = factory.acquire().unwrap();

    let waiter = {
        let factory = Arc::clone(&factory);
        thread::spawn(move || {
            let mut engine = factory.acquire().unwrap();
            let bytes = engine.encode(&7i64).unwrap();
            engine.decode::<i64>(&bytes).unwrap()
        })
    };

    thread::sleep(Duration::from_millis(20));
    drop(held);
    assert_eq!(waiter.join().unwrap(), 7);
}

#[test]
fn test_acquire_after_close_fails() {
    let factory = factory_with(PoolStrategy::default());
    {
        let mut engine = factory.acquire().unwrap();
        let bytes = engine.encode(&1i64).unwrap();
        let _: i64 = engine.decode(&bytes).unwrap();
    }
    factory.close();
    let err = factory.acquire().unwrap_err();
    assert!(matches!(err, Error::PoolClosed(_)));
}

#[test]
fn test_close_races_with_inflight_release() {
    let factory = factory_with(PoolStrategy::default());
    let engine = factory.acquire().unwrap();
    factory.close();
    // the in-flight guard returns its engine to a closed pool; the engine
    // is freed, not recycled
    drop(engine);
    assert_eq!(factory.pool().live_instances(), 0);
    assert!(matches!(
        factory.acquire().unwrap_err(),
        Error::PoolClosed(_)
    ));
}

#[test]
fn test_per_call_discards_on_release() {
    let factory = factory_with(PoolStrategy::PerCall);
    {
        let _a = factory.acquire().unwrap();
        let _b = factory.acquire().unwrap();
        assert_eq!(factory.pool().live_instances(), 2);
    }
    assert_eq!(factory.pool().live_instances(), 0);
}

#[test]
fn test_singleton_keeps_one_instance() {
    let factory = Arc::new(factory_with(PoolStrategy::Singleton));
    for _ in 0..5 {
        let mut engine = factory.acquire().unwrap();
        let bytes = engine.encode(&3i64).unwrap();
        let _: i64 = engine.decode(&bytes).unwrap();
    }
    assert_eq!(factory.pool().live_instances(), 1);

    // a concurrent acquire waits for the single instance instead of
    // building a second one
    let held = factory.acquire().unwrap();
    let waiter = {
        let factory = Arc::clone(&factory);
        thread::spawn(move || {
            factory.acquire().unwrap();
            factory.pool().live_instances()
        })
    };
    thread::sleep(Duration::from_millis(20));
    drop(held);
    assert_eq!(waiter.join().unwrap(), 1);
}

#[test]
fn test_guard_explicit_release_allows_reacquire() {
    let factory = factory_with(PoolStrategy::pooled(Some(1)));
    let guard = factory.acquire().unwrap();
    guard.release();
    let _again = factory.acquire().unwrap();
}
