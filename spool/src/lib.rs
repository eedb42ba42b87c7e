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

//! # Spool
//!
//! Spool produces pooled binary-serialization engines for RPC transports.
//! Every engine of one factory shares an identical frozen set of known
//! types, so their compact wire type-identifiers agree, and instances are
//! reused across requests instead of rebuilt per call.
//!
//! ## Lifecycle
//!
//! 1. Build a factory with an explicit pooling strategy.
//! 2. Register the domain types during startup.
//! 3. Acquire an engine per request; the guard returns it to the pool.
//! 4. Close the factory at shutdown.
//!
//! ```rust
//! use spool::{EngineFactory, FactoryConfig, PoolStrategy};
//!
//! # fn main() -> Result<(), spool::Error> {
//! let factory = EngineFactory::new(FactoryConfig {
//!     strategy: PoolStrategy::pooled(Some(4)),
//!     strict: false,
//! });
//! factory.register::<Vec<i64>>()?;
//!
//! let mut engine = factory.acquire()?;
//! let bytes = engine.encode(&vec![1i64, 2, 3])?;
//! let back: Vec<i64> = engine.decode(&bytes)?;
//! assert_eq!(back, vec![1, 2, 3]);
//!
//! factory.close();
//! # Ok(())
//! # }
//! ```
//!
//! ## Strict mode
//!
//! A strict factory refuses to encode or decode any type that was not
//! registered before the first acquire; a permissive factory (the
//! default) falls back to name-tagged encoding for unregistered types.
//!
//! ## Thread safety
//!
//! Engines themselves are not internally synchronized. The pool is the
//! synchronization layer: each acquired [`EngineGuard`] is exclusive, and
//! independent engines run in parallel.

pub use spool_core::buffer::{Reader, Writer};
pub use spool_core::codec::{Codec, CodecTable, Harness};
pub use spool_core::config::FactoryConfig;
pub use spool_core::engine::Engine;
pub use spool_core::error::Error;
pub use spool_core::factory::EngineFactory;
pub use spool_core::pool::{EngineGuard, EnginePool, PoolStrategy};
pub use spool_core::register_types;
pub use spool_core::registry::{ExtraTypes, NoExtraTypes, TypeDescriptor, TypeRegistry};
