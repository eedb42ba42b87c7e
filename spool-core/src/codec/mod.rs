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

//! Codec contract and the fixed codec table.
//!
//! A [`Codec`] turns one value of one concrete type into bytes and back.
//! The [`CodecTable`] is the process-wide table binding well-known standard
//! types to their dedicated codecs, plus the ordered family list used for
//! default-codec resolution when a type has no exact entry.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

use crate::buffer::{Reader, Writer};
use crate::error::Error;
use crate::registry::TypeDescriptor;

mod containers;
mod datetime;
mod misc;
mod primitives;

pub(crate) use datetime::write_any_datetime;
pub(crate) use primitives::primordial_descriptors;

/// Encode/decode contract for one concrete type.
///
/// Implementations must be payload-only: the engine writes the message
/// header and type identifier, the codec writes nothing but the value.
pub trait Codec: Sized + 'static {
    fn encode_data(&self, writer: &mut Writer) -> Result<(), Error>;

    fn decode_data(reader: &mut Reader) -> Result<Self, Error>;

    /// Payload size hint used to pre-size the write buffer.
    fn reserved_space() -> usize {
        0
    }
}

pub type WriteFn = fn(&dyn Any, &mut Writer) -> Result<(), Error>;
pub type ReadFn = fn(&mut Reader) -> Result<Box<dyn Any>, Error>;

/// Monomorphization-erased codec: a pair of `fn` pointers dispatching a
/// [`Codec`] impl over `&dyn Any`. This is what binding tables store so the
/// dynamic encode/decode path needs no generics.
#[derive(Clone, Copy, Debug)]
pub struct Harness {
    write_fn: WriteFn,
    read_fn: ReadFn,
}

impl Harness {
    pub fn of<T: Codec>() -> Harness {
        Harness {
            write_fn: write_erased::<T>,
            read_fn: read_erased::<T>,
        }
    }

    pub fn new(write_fn: WriteFn, read_fn: ReadFn) -> Harness {
        Harness { write_fn, read_fn }
    }

    #[inline(always)]
    pub fn write(&self, value: &dyn Any, writer: &mut Writer) -> Result<(), Error> {
        (self.write_fn)(value, writer)
    }

    #[inline(always)]
    pub fn read(&self, reader: &mut Reader) -> Result<Box<dyn Any>, Error> {
        (self.read_fn)(reader)
    }
}

fn write_erased<T: Codec>(value: &dyn Any, writer: &mut Writer) -> Result<(), Error> {
    let concrete = value.downcast_ref::<T>().ok_or_else(|| {
        Error::invalid_data(format!(
            "value is not a {}",
            std::any::type_name::<T>()
        ))
    })?;
    concrete.encode_data(writer)
}

fn read_erased<T: Codec>(reader: &mut Reader) -> Result<Box<dyn Any>, Error> {
    Ok(Box::new(T::decode_data(reader)?))
}

/// One hierarchy family for default-codec resolution: a small, fixed member
/// list sharing a single normalized payload, bound to a canonical type.
///
/// Kept deliberately short and explicit; broad silent matching is a
/// correctness hazard.
pub struct FamilyEntry {
    name: &'static str,
    members: Vec<TypeId>,
    canonical: TypeId,
    harness: Harness,
}

impl FamilyEntry {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn contains(&self, rust_id: TypeId) -> bool {
        self.members.contains(&rust_id)
    }

    pub fn canonical(&self) -> TypeId {
        self.canonical
    }

    pub(crate) fn harness(&self) -> Harness {
        self.harness
    }

    pub(crate) fn members(&self) -> &[TypeId] {
        &self.members
    }
}

/// The fixed table mapping well-known standard types to dedicated codecs.
///
/// Built once per process. Entry order is part of the wire contract: the
/// engine builder assigns sequential wire ids by walking `entries()` in
/// order, so reordering entries changes every engine's id assignment.
///
/// Resolution for a type: exact entry first, then the family list in
/// declaration order (date/time family before anything else), then the
/// caller's registrations or the named fallback.
pub struct CodecTable {
    entries: Vec<TypeDescriptor>,
    index: HashMap<TypeId, usize>,
    families: Vec<FamilyEntry>,
}

impl CodecTable {
    /// The process-wide standard table.
    pub fn standard() -> &'static CodecTable {
        static TABLE: OnceLock<CodecTable> = OnceLock::new();
        TABLE.get_or_init(CodecTable::build_standard)
    }

    pub fn entries(&self) -> &[TypeDescriptor] {
        &self.entries
    }

    pub fn families(&self) -> &[FamilyEntry] {
        &self.families
    }

    /// Exact-match lookup.
    pub fn resolve(&self, rust_id: TypeId) -> Option<&TypeDescriptor> {
        self.index.get(&rust_id).map(|idx| &self.entries[*idx])
    }

    /// Ordered family scan, used only when [`CodecTable::resolve`] misses.
    pub fn resolve_family(&self, rust_id: TypeId) -> Option<&FamilyEntry> {
        self.families.iter().find(|f| f.contains(rust_id))
    }

    fn build_standard() -> CodecTable {
        let mut entries: Vec<TypeDescriptor> = Vec::new();

        // calendar/date
        entries.push(TypeDescriptor::of::<NaiveDate>());
        entries.push(TypeDescriptor::of::<NaiveDateTime>());
        entries.push(TypeDescriptor::of::<DateTime<Utc>>());

        // numeric / regex / bit-set / URI / UUID
        entries.push(TypeDescriptor::of::<bigdecimal::BigDecimal>());
        entries.push(TypeDescriptor::of::<num_bigint::BigInt>());
        entries.push(TypeDescriptor::of::<regex::Regex>());
        entries.push(TypeDescriptor::of::<bit_set::BitSet>());
        entries.push(TypeDescriptor::of::<url::Url>());
        entries.push(TypeDescriptor::of::<uuid::Uuid>());

        // common concrete containers and arrays; not wire-critical, only
        // pre-registered so frequent payloads get compact ids
        entries.push(TypeDescriptor::of::<HashMap<String, String>>());
        entries.push(TypeDescriptor::of::<HashMap<String, i64>>());
        entries.push(TypeDescriptor::of::<Vec<String>>());
        entries.push(TypeDescriptor::of::<std::collections::LinkedList<String>>());
        entries.push(TypeDescriptor::of::<std::collections::HashSet<String>>());
        entries.push(TypeDescriptor::of::<std::collections::HashSet<i64>>());
        entries.push(TypeDescriptor::of::<std::collections::BTreeSet<String>>());
        entries.push(TypeDescriptor::of::<std::collections::BTreeMap<String, String>>());
        entries.push(TypeDescriptor::of::<std::collections::VecDeque<String>>());
        entries.push(TypeDescriptor::of::<Vec<u8>>());
        entries.push(TypeDescriptor::of::<Vec<bool>>());
        entries.push(TypeDescriptor::of::<Vec<i32>>());
        entries.push(TypeDescriptor::of::<Vec<i64>>());
        entries.push(TypeDescriptor::of::<Vec<f32>>());
        entries.push(TypeDescriptor::of::<Vec<f64>>());

        let index = entries
            .iter()
            .enumerate()
            .map(|(idx, desc)| (desc.rust_id(), idx))
            .collect();

        // Every member codec writes the shared epoch-microseconds payload,
        // so routing a member onto the canonical wire id stays decodable.
        let families = vec![FamilyEntry {
            name: "date-time",
            members: vec![
                TypeId::of::<DateTime<Utc>>(),
                TypeId::of::<DateTime<Local>>(),
                TypeId::of::<NaiveDateTime>(),
            ],
            canonical: TypeId::of::<DateTime<Utc>>(),
            harness: Harness::new(write_any_datetime, read_erased::<DateTime<Utc>>),
        }];

        CodecTable {
            entries,
            index,
            families,
        }
    }
}
