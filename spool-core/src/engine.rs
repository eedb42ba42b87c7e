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

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::buffer::{Reader, Writer};
use crate::codec::{Codec, Harness};
use crate::ensure;
use crate::error::Error;
use crate::types::{header_flags::IS_LITTLE_ENDIAN_FLAG, HEADER_SIZE, MAGIC_NUMBER, NAMED_TYPE_ID};

/// One resolved type: its wire id, wire name, and codec harness.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Binding {
    pub(crate) wire_id: u32,
    pub(crate) type_name: &'static str,
    pub(crate) harness: Harness,
}

/// A hierarchy family bound into one engine: member types routed onto the
/// canonical member's wire id.
pub(crate) struct FamilyBinding {
    pub(crate) name: &'static str,
    pub(crate) members: Vec<TypeId>,
    pub(crate) wire_id: u32,
    pub(crate) harness: Harness,
}

/// One serialization engine instance.
///
/// An engine is configured exactly once at construction with the full
/// codec-table plus registration snapshot and a strict flag; it is never
/// mutated afterwards. Engines built from the same factory share identical
/// bindings and are wire-compatible.
///
/// An engine is **not** internally synchronized: it owns reusable scratch
/// state and must never be used by two callers concurrently. The pool
/// enforces exclusive use through [`crate::pool::EngineGuard`].
pub struct Engine {
    by_type: HashMap<TypeId, Binding>,
    by_id: HashMap<u32, Binding>,
    by_name: HashMap<&'static str, Binding>,
    families: Vec<FamilyBinding>,
    strict: bool,
    writer: Writer,
}

impl Engine {
    pub(crate) fn new(
        by_type: HashMap<TypeId, Binding>,
        by_id: HashMap<u32, Binding>,
        by_name: HashMap<&'static str, Binding>,
        families: Vec<FamilyBinding>,
        strict: bool,
    ) -> Engine {
        Engine {
            by_type,
            by_id,
            by_name,
            families,
            strict,
            writer: Writer::default(),
        }
    }

    /// Whether this engine rejects types with no registration and no
    /// codec-table match.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Number of types bound to wire ids in this engine.
    pub fn binding_count(&self) -> usize {
        self.by_type.len()
    }

    /// The wire id this engine would use for `T`, through an exact binding
    /// or a family match. `None` means `T` would take the named fallback
    /// (or fail, in strict mode).
    pub fn wire_id<T: Codec>(&self) -> Option<u32> {
        self.resolve_static(TypeId::of::<T>())
    }

    fn resolve_static(&self, rust_id: TypeId) -> Option<u32> {
        if let Some(binding) = self.by_type.get(&rust_id) {
            return Some(binding.wire_id);
        }
        self.families
            .iter()
            .find(|f| f.members.contains(&rust_id))
            .map(|f| f.wire_id)
    }

    fn write_head(&mut self) {
        self.writer.write_u16(MAGIC_NUMBER);
        self.writer.write_u8(IS_LITTLE_ENDIAN_FLAG);
    }

    fn read_head(reader: &mut Reader) -> Result<(), Error> {
        let magic = reader.read_u16()?;
        ensure!(
            magic == MAGIC_NUMBER,
            Error::invalid_data(format!(
                "message must start with magic number {:#06X}, found {:#06X}; \
                 the data is foreign or corrupt",
                MAGIC_NUMBER, magic
            ))
        );
        let flags = reader.read_u8()?;
        ensure!(
            flags & IS_LITTLE_ENDIAN_FLAG != 0,
            Error::invalid_data("big-endian payloads are not supported")
        );
        Ok(())
    }

    /// Encodes one value into a self-describing message.
    pub fn encode<T: Codec>(&mut self, value: &T) -> Result<Vec<u8>, Error> {
        self.writer.reset();
        self.writer.reserve(HEADER_SIZE + T::reserved_space());
        self.write_head();
        match self.resolve_static(TypeId::of::<T>()) {
            Some(wire_id) => self.writer.write_varuint32(wire_id),
            None => {
                if self.strict {
                    return Err(Error::unknown_type(format!(
                        "type {} is not registered and this engine requires registration",
                        std::any::type_name::<T>()
                    )));
                }
                // named fallback: id 0 plus the type name
                self.writer.write_varuint32(NAMED_TYPE_ID);
                self.writer.write_str(std::any::type_name::<T>());
            }
        }
        value.encode_data(&mut self.writer)?;
        Ok(self.writer.dump())
    }

    /// Decodes one message into the expected type.
    pub fn decode<T: Codec>(&mut self, bytes: &[u8]) -> Result<T, Error> {
        let mut reader = Reader::new(bytes);
        Self::read_head(&mut reader)?;
        let wire_id = reader.read_varuint32()?;
        if wire_id == NAMED_TYPE_ID {
            ensure!(
                !self.strict,
                Error::unknown_type(
                    "named payload rejected: this engine requires registration"
                )
            );
            let name = reader.read_str()?;
            ensure!(
                name == std::any::type_name::<T>(),
                Error::invalid_data(format!(
                    "named payload carries {}, expected {}",
                    name,
                    std::any::type_name::<T>()
                ))
            );
        } else {
            let expected = self.resolve_static(TypeId::of::<T>()).ok_or_else(|| {
                Error::unknown_type(format!(
                    "type {} has no binding in this engine",
                    std::any::type_name::<T>()
                ))
            })?;
            ensure!(
                expected == wire_id,
                Error::type_mismatch(expected, wire_id)
            );
        }
        let value = T::decode_data(&mut reader)?;
        ensure!(
            reader.remaining() == 0,
            Error::invalid_data(format!(
                "{} unread bytes after decode",
                reader.remaining()
            ))
        );
        Ok(value)
    }

    /// Dynamic encode over `&dyn Any`, dispatching through the binding
    /// tables by the value's concrete type.
    ///
    /// Unlike [`Engine::encode`], an unknown type fails in both modes:
    /// without a monomorphized codec there is nothing to resolve ad hoc.
    pub fn encode_any(&mut self, value: &dyn Any) -> Result<Vec<u8>, Error> {
        let rust_id = value.type_id();
        let resolved = match self.by_type.get(&rust_id) {
            Some(binding) => Some((binding.wire_id, binding.harness)),
            None => self
                .families
                .iter()
                .find(|f| f.members.contains(&rust_id))
                .map(|f| (f.wire_id, f.harness)),
        };
        let (wire_id, harness) = resolved.ok_or_else(|| {
            Error::unknown_type(
                "dynamic value has no codec binding; register its type before traffic starts",
            )
        })?;
        self.writer.reset();
        self.writer.reserve(HEADER_SIZE);
        self.write_head();
        self.writer.write_varuint32(wire_id);
        harness.write(value, &mut self.writer)?;
        Ok(self.writer.dump())
    }

    /// Dynamic decode over the binding tables: the wire id (or name)
    /// selects the codec and the result is returned type-erased.
    pub fn decode_any(&mut self, bytes: &[u8]) -> Result<Box<dyn Any>, Error> {
        let mut reader = Reader::new(bytes);
        Self::read_head(&mut reader)?;
        let wire_id = reader.read_varuint32()?;
        let harness = if wire_id == NAMED_TYPE_ID {
            ensure!(
                !self.strict,
                Error::unknown_type(
                    "named payload rejected: this engine requires registration"
                )
            );
            let name = reader.read_str()?;
            self.by_name
                .get(name.as_str())
                .map(|b| b.harness)
                .ok_or_else(|| {
                    Error::unknown_type(format!("no codec registered under name {}", name))
                })?
        } else {
            self.by_id.get(&wire_id).map(|b| b.harness).ok_or_else(|| {
                Error::unknown_type(format!("no codec registered for wire id {}", wire_id))
            })?
        };
        let value = harness.read(&mut reader)?;
        ensure!(
            reader.remaining() == 0,
            Error::invalid_data(format!(
                "{} unread bytes after decode",
                reader.remaining()
            ))
        );
        Ok(value)
    }

    /// Wire name of the binding behind `wire_id`, for diagnostics.
    pub fn type_name_of(&self, wire_id: u32) -> Option<&'static str> {
        self.by_id.get(&wire_id).map(|b| b.type_name)
    }
}
