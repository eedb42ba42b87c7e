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

//! # Spool Core
//!
//! Core implementation of the spool pooled-serialization factory: a
//! component that produces ready-to-use binary serialization engines for
//! an RPC transport, where every engine shares one frozen set of known
//! types and engines are pooled rather than rebuilt per call.
//!
//! ## Architecture
//!
//! - **`factory`**: process entry point (registration gate, strategy
//!   choice, acquire/close)
//! - **`pool`**: engine lifecycle under concurrent demand, scoped guards
//! - **`builder`**: deterministic engine construction and wire-id
//!   assignment
//! - **`engine`**: one configured encode/decode instance
//! - **`registry`**: append-only, freeze-once set of caller types plus
//!   the extra-types provider seam
//! - **`codec`**: the codec contract and the fixed standard-type table
//! - **`buffer`**: little-endian Writer/Reader primitives
//! - **`error`**: error taxonomy shared by every operation
//!
//! ## Lifecycle
//!
//! Types are registered during single-threaded startup. The first acquire
//! freezes the registration set, fixing the wire type-identifier
//! assignment, and builds the first engine. From then on registration
//! fails, every engine built by the factory is wire-compatible with every
//! other, and the pool recycles instances until `close`.
//!
//! ```rust
//! use spool_core::config::FactoryConfig;
//! use spool_core::factory::EngineFactory;
//! use spool_core::pool::PoolStrategy;
//!
//! # fn main() -> Result<(), spool_core::error::Error> {
//! let factory = EngineFactory::new(FactoryConfig {
//!     strategy: PoolStrategy::pooled(Some(8)),
//!     strict: false,
//! });
//! factory.register::<Vec<String>>()?;
//!
//! let mut engine = factory.acquire()?;
//! let bytes = engine.encode(&vec!["a".to_string()])?;
//! let back: Vec<String> = engine.decode(&bytes)?;
//! assert_eq!(back, vec!["a".to_string()]);
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod builder;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod factory;
pub mod pool;
pub mod registry;
pub mod types;
