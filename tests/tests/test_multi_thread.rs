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

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use spool::{EngineFactory, FactoryConfig, PoolStrategy};

#[test]
fn test_concurrent_encode_decode_through_pool() {
    let factory = Arc::new(EngineFactory::default());
    let src: HashSet<i64> = [41, 42, 43, 45, 46, 47].into_iter().collect();

    // serialize
    let mut handles = vec![];
    for item in &src {
        let factory = Arc::clone(&factory);
        let item = *item;
        handles.push(thread::spawn(move || {
            let mut engine = factory.acquire().unwrap();
            engine.encode(&item).unwrap()
        }));
    }
    let mut serialized = vec![];
    for handle in handles {
        serialized.push(handle.join().unwrap());
    }

    // deserialize
    let mut handles = vec![];
    for bytes in serialized {
        let factory = Arc::clone(&factory);
        handles.push(thread::spawn(move || {
            let mut engine = factory.acquire().unwrap();
            engine.decode::<i64>(&bytes).unwrap()
        }));
    }
    let mut dest = HashSet::new();
    for handle in handles {
        dest.insert(handle.join().unwrap());
    }

    assert_eq!(dest, src);
}

#[test]
fn test_concurrent_use_under_small_cap() {
    let factory = Arc::new(EngineFactory::new(FactoryConfig {
        strategy: PoolStrategy::pooled(Some(2)),
        strict: false,
    }));
    factory.register::<Vec<String>>().unwrap();

    let mut handles = vec![];
    for worker in 0..6 {
        let factory = Arc::clone(&factory);
        handles.push(thread::spawn(move || {
            for cycle in 0..20 {
                let value = vec![format!("{}:{}", worker, cycle)];
                let mut engine = factory.acquire().unwrap();
                let bytes = engine.encode(&value).unwrap();
                let back: Vec<String> = engine.decode(&bytes).unwrap();
                assert_eq!(back, value);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
    assert!(factory.pool().live_instances() <= 2);
}
