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

use std::any::TypeId;
use std::collections::HashMap;

use chrono::{DateTime, Local, NaiveDate, Utc};
use spool::CodecTable;
use uuid::Uuid;

#[test]
fn test_exact_resolution() {
    let table = CodecTable::standard();
    assert!(table.resolve(TypeId::of::<Uuid>()).is_some());
    assert!(table.resolve(TypeId::of::<NaiveDate>()).is_some());
    assert!(table.resolve(TypeId::of::<HashMap<String, String>>()).is_some());
    // not in the fixed table: resolved by registration or fallback
    assert!(table.resolve(TypeId::of::<HashMap<i64, i64>>()).is_none());
}

#[test]
fn test_family_resolution_is_exact_first() {
    let table = CodecTable::standard();
    // DateTime<Utc> has an exact entry; the family only catches members
    // without one
    assert!(table.resolve(TypeId::of::<DateTime<Utc>>()).is_some());
    assert!(table.resolve(TypeId::of::<DateTime<Local>>()).is_none());

    let family = table
        .resolve_family(TypeId::of::<DateTime<Local>>())
        .unwrap();
    assert_eq!(family.name(), "date-time");
    assert_eq!(family.canonical(), TypeId::of::<DateTime<Utc>>());

    // the family list is small on purpose: unrelated types never match
    assert!(table.resolve_family(TypeId::of::<Uuid>()).is_none());
}

#[test]
fn test_table_is_one_instance_per_process() {
    let a = CodecTable::standard() as *const CodecTable;
    let b = CodecTable::standard() as *const CodecTable;
    assert_eq!(a, b);
}
