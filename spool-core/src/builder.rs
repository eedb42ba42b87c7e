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

use std::collections::HashMap;

use crate::codec::{primordial_descriptors, CodecTable};
use crate::engine::{Binding, Engine, FamilyBinding};
use crate::registry::TypeDescriptor;
use crate::types::FIRST_WIRE_ID;

/// Builds engine instances from a frozen registration snapshot.
///
/// Construction is deterministic: wire ids are assigned sequentially over
/// the sources in a fixed order: primordial scalars, codec-table entries
/// in table order, caller registrations in insertion order, provider
/// extras. Two builds from the same inputs produce engines with identical
/// effective type-to-codec mappings and identical numeric ids, which is
/// what makes pooled instances wire-compatible.
pub struct EngineBuilder {
    table: &'static CodecTable,
    strict: bool,
}

impl EngineBuilder {
    pub fn new(table: &'static CodecTable, strict: bool) -> EngineBuilder {
        EngineBuilder { table, strict }
    }

    pub fn build(&self, registered: &[TypeDescriptor], extras: &[TypeDescriptor]) -> Engine {
        let mut by_type = HashMap::new();
        let mut by_id = HashMap::new();
        let mut by_name = HashMap::new();
        let mut next_id = FIRST_WIRE_ID;

        let primordial = primordial_descriptors();
        let sources = primordial
            .iter()
            .chain(self.table.entries())
            .chain(registered)
            .chain(extras);
        for descriptor in sources {
            // first occurrence wins; duplicates across stages keep their
            // original (lowest) id
            if by_type.contains_key(&descriptor.rust_id()) {
                continue;
            }
            let binding = Binding {
                wire_id: next_id,
                type_name: descriptor.type_name(),
                harness: descriptor.harness(),
            };
            by_type.insert(descriptor.rust_id(), binding);
            by_id.insert(binding.wire_id, binding);
            by_name.insert(binding.type_name, binding);
            next_id += 1;
        }

        let mut families = Vec::new();
        for family in self.table.families() {
            if let Some(canonical) = by_type.get(&family.canonical()) {
                let bound = FamilyBinding {
                    name: family.name(),
                    members: family.members().to_vec(),
                    wire_id: canonical.wire_id,
                    harness: family.harness(),
                };
                log::debug!("bound family {} to wire id {}", bound.name, bound.wire_id);
                families.push(bound);
            }
        }

        log::debug!(
            "built engine with {} bindings (strict={})",
            by_type.len(),
            self.strict
        );
        Engine::new(by_type, by_id, by_name, families, self.strict)
    }
}
