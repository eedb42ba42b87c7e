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
use std::sync::{Arc, Mutex, OnceLock};

use crate::codec::{Codec, Harness};
use crate::error::Error;

/// Identity and codec hook of one registered type.
///
/// Identity is the Rust [`TypeId`]; the type name is the wire name used by
/// the permissive named fallback.
#[derive(Clone, Copy, Debug)]
pub struct TypeDescriptor {
    rust_id: TypeId,
    type_name: &'static str,
    harness: Harness,
}

impl TypeDescriptor {
    pub fn of<T: Codec>() -> TypeDescriptor {
        TypeDescriptor {
            rust_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            harness: Harness::of::<T>(),
        }
    }

    #[inline(always)]
    pub fn rust_id(&self) -> TypeId {
        self.rust_id
    }

    #[inline(always)]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline(always)]
    pub(crate) fn harness(&self) -> Harness {
        self.harness
    }
}

/// Insertion-ordered, duplicate-free set of caller-registered types.
///
/// Only supposed to be populated at startup time, before any engine is
/// built. Registration order determines wire type ids, so it is part of
/// the wire contract between peers built from the same registrations.
///
/// The registry freezes at first engine build: later `register` calls fail
/// with [`Error::RegistrationAfterUse`], and every engine is built from the
/// single frozen snapshot. Registration is mutex-guarded and safe to call
/// concurrently with itself; racing registration against the very first
/// acquire has no defined winner (callers must register before traffic
/// starts).
pub struct TypeRegistry {
    entries: Mutex<Vec<TypeDescriptor>>,
    frozen: OnceLock<Arc<[TypeDescriptor]>>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        TypeRegistry::new()
    }
}

impl TypeRegistry {
    pub fn new() -> TypeRegistry {
        TypeRegistry {
            entries: Mutex::new(Vec::new()),
            frozen: OnceLock::new(),
        }
    }

    /// Appends a type. Idempotent: re-registering a known type neither
    /// grows the set nor fails.
    pub fn register<T: Codec>(&self) -> Result<(), Error> {
        self.register_descriptor(TypeDescriptor::of::<T>())
    }

    pub fn register_descriptor(&self, descriptor: TypeDescriptor) -> Result<(), Error> {
        if self.is_frozen() {
            return Err(Error::registration_after_use(format!(
                "can't register {} after an engine instance was built",
                descriptor.type_name()
            )));
        }
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if entries.iter().all(|e| e.rust_id() != descriptor.rust_id()) {
            log::debug!("registered type {}", descriptor.type_name());
            entries.push(descriptor);
        }
        Ok(())
    }

    /// One-shot snapshot, taken at first engine build. Every later call
    /// returns the same shared slice; the registration gate flips here.
    pub fn freeze(&self) -> Arc<[TypeDescriptor]> {
        self.frozen
            .get_or_init(|| {
                let entries = self
                    .entries
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                log::debug!("type registry frozen with {} caller types", entries.len());
                Arc::from(entries.as_slice())
            })
            .clone()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.get().is_some()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Secondary registry collaborator: an independently populated source of
/// additional known types, read exactly once at first engine build and
/// merged in after caller registrations. Lets unrelated subsystems
/// contribute types without going through the factory API.
pub trait ExtraTypes: Send + Sync {
    fn extra_types(&self) -> Vec<TypeDescriptor>;
}

/// Default provider contributing nothing.
pub struct NoExtraTypes;

impl ExtraTypes for NoExtraTypes {
    fn extra_types(&self) -> Vec<TypeDescriptor> {
        Vec::new()
    }
}
