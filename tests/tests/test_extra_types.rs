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

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use spool::{
    Codec, EngineFactory, Error, ExtraTypes, Reader, TypeDescriptor, Writer,
};

#[derive(Debug, PartialEq, Clone)]
struct Ticket {
    id: u64,
}

impl Codec for Ticket {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error> {
        self.id.encode_data(writer)
    }

    fn decode_data(reader: &mut Reader) -> Result<Self, Error> {
        Ok(Ticket {
            id: u64::decode_data(reader)?,
        })
    }
}

struct SideRegistry {
    reads: AtomicUsize,
}

impl ExtraTypes for SideRegistry {
    fn extra_types(&self) -> Vec<TypeDescriptor> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        vec![TypeDescriptor::of::<Ticket>()]
    }
}

#[test]
fn test_provider_types_merge_after_caller_types() {
    let factory = EngineFactory::default();
    factory.register::<Vec<i64>>().unwrap();
    factory
        .set_extra_types(Arc::new(SideRegistry {
            reads: AtomicUsize::new(0),
        }))
        .unwrap();

    let mut engine = factory.acquire().unwrap();
    let caller_id = engine.wire_id::<Vec<i64>>().unwrap();
    let extra_id = engine.wire_id::<Ticket>().unwrap();
    assert_eq!(extra_id, caller_id + 1);

    let ticket = Ticket { id: 77 };
    let bytes = engine.encode(&ticket).unwrap();
    let back: Ticket = engine.decode(&bytes).unwrap();
    assert_eq!(back, ticket);
}

#[test]
fn test_provider_is_read_once_at_first_build() {
    let provider = Arc::new(SideRegistry {
        reads: AtomicUsize::new(0),
    });
    let factory = EngineFactory::default();
    factory.set_extra_types(provider.clone()).unwrap();

    assert_eq!(provider.reads.load(Ordering::SeqCst), 0);
    let first = factory.acquire().unwrap();
    let second = factory.acquire().unwrap();
    drop(first);
    drop(second);
    let _third = factory.acquire().unwrap();
    assert_eq!(provider.reads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_provider_swap_gated_after_first_build() {
    let factory = EngineFactory::default();
    let _engine = factory.acquire().unwrap();
    let err = factory
        .set_extra_types(Arc::new(SideRegistry {
            reads: AtomicUsize::new(0),
        }))
        .unwrap_err();
    assert!(matches!(err, Error::RegistrationAfterUse(_)));
}
