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

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use crate::builder::EngineBuilder;
use crate::codec::{Codec, CodecTable};
use crate::config::FactoryConfig;
use crate::error::Error;
use crate::pool::{EngineGuard, EnginePool};
use crate::registry::{ExtraTypes, NoExtraTypes, TypeDescriptor, TypeRegistry};

/// Registration snapshot and settings captured exactly once, at the first
/// engine build. Every engine of the factory is built from this, which is
/// what keeps pooled instances wire-compatible with each other.
struct BuildInputs {
    snapshot: Arc<[TypeDescriptor]>,
    extras: Vec<TypeDescriptor>,
    strict: bool,
}

struct FactoryShared {
    registry: TypeRegistry,
    strict: AtomicBool,
    provider: Mutex<Arc<dyn ExtraTypes>>,
    inputs: OnceLock<BuildInputs>,
}

/// The process entry point producing ready-to-use serialization engines.
///
/// Domain types are registered during single-threaded startup; the first
/// acquire freezes the registration set and builds the first engine; from
/// then on the pool hands engines out and takes them back for the life of
/// the process.
///
/// # Examples
///
/// ```rust
/// use spool_core::config::FactoryConfig;
/// use spool_core::factory::EngineFactory;
///
/// # fn main() -> Result<(), spool_core::error::Error> {
/// let factory = EngineFactory::new(FactoryConfig::default());
/// factory.register::<Vec<u32>>()?;
///
/// let mut engine = factory.acquire()?;
/// let bytes = engine.encode(&vec![1u32, 2, 3])?;
/// let values: Vec<u32> = engine.decode(&bytes)?;
/// assert_eq!(values, vec![1, 2, 3]);
/// # Ok(())
/// # }
/// ```
pub struct EngineFactory {
    shared: Arc<FactoryShared>,
    pool: EnginePool,
}

impl Default for EngineFactory {
    fn default() -> Self {
        EngineFactory::new(FactoryConfig::default())
    }
}

impl EngineFactory {
    /// Creates a factory with an explicit pooling strategy and strict
    /// flag. No engine is built until the first acquire.
    pub fn new(config: FactoryConfig) -> EngineFactory {
        let shared = Arc::new(FactoryShared {
            registry: TypeRegistry::new(),
            strict: AtomicBool::new(config.strict),
            provider: Mutex::new(Arc::new(NoExtraTypes)),
            inputs: OnceLock::new(),
        });
        let build_shared = Arc::clone(&shared);
        let pool = EnginePool::new(
            config.strategy,
            Box::new(move || {
                let inputs = build_shared.inputs.get_or_init(|| {
                    let snapshot = build_shared.registry.freeze();
                    let provider = build_shared
                        .provider
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .clone();
                    let extras = provider.extra_types();
                    let strict = build_shared.strict.load(Ordering::Acquire);
                    log::debug!(
                        "captured build inputs: {} caller types, {} extras, strict={}",
                        snapshot.len(),
                        extras.len(),
                        strict
                    );
                    BuildInputs {
                        snapshot,
                        extras,
                        strict,
                    }
                });
                EngineBuilder::new(CodecTable::standard(), inputs.strict)
                    .build(&inputs.snapshot, &inputs.extras)
            }),
        );
        EngineFactory { shared, pool }
    }

    /// Registers a domain type. Startup-time only: fails with
    /// [`Error::RegistrationAfterUse`] once any engine has been built.
    /// Idempotent for already-registered types.
    pub fn register<T: Codec>(&self) -> Result<(), Error> {
        self.shared.registry.register::<T>()
    }

    /// Registers a pre-built descriptor; same gate and idempotence as
    /// [`EngineFactory::register`].
    pub fn register_descriptor(&self, descriptor: TypeDescriptor) -> Result<(), Error> {
        self.shared.registry.register_descriptor(descriptor)
    }

    /// Switches strict (registration-required) mode. Like registration,
    /// only valid before the first engine is built.
    pub fn set_strict(&self, strict: bool) -> Result<(), Error> {
        if self.shared.inputs.get().is_some() {
            return Err(Error::registration_after_use(
                "can't change strict mode after an engine instance was built",
            ));
        }
        self.shared.strict.store(strict, Ordering::Release);
        Ok(())
    }

    /// Injects the secondary provider of additional known types. Its
    /// contribution is read exactly once, at the first engine build, and
    /// merged after caller registrations.
    pub fn set_extra_types(&self, provider: Arc<dyn ExtraTypes>) -> Result<(), Error> {
        if self.shared.inputs.get().is_some() {
            return Err(Error::registration_after_use(
                "can't swap the extra-types provider after an engine instance was built",
            ));
        }
        *self
            .shared
            .provider
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = provider;
        Ok(())
    }

    /// Acquires exclusive use of one engine; the guard releases it on
    /// every exit path.
    pub fn acquire(&self) -> Result<EngineGuard<'_>, Error> {
        self.pool.acquire()
    }

    /// Shuts the pool down; all later acquires fail with
    /// [`Error::PoolClosed`].
    pub fn close(&self) {
        self.pool.close();
    }

    pub fn is_strict(&self) -> bool {
        match self.shared.inputs.get() {
            Some(inputs) => inputs.strict,
            None => self.shared.strict.load(Ordering::Acquire),
        }
    }

    /// Number of caller-registered types.
    pub fn registered_types(&self) -> usize {
        self.shared.registry.len()
    }

    /// The pool, for lifecycle introspection.
    pub fn pool(&self) -> &EnginePool {
        &self.pool
    }

    /// Installs `factory` as the process-wide default. Fails by handing
    /// the factory back if one is already installed.
    pub fn install_global(factory: EngineFactory) -> Result<(), EngineFactory> {
        global_factory().set(factory)
    }

    /// The process-wide default factory, if one was installed.
    pub fn global() -> Option<&'static EngineFactory> {
        global_factory().get()
    }
}

fn global_factory() -> &'static OnceLock<EngineFactory> {
    static GLOBAL: OnceLock<EngineFactory> = OnceLock::new();
    &GLOBAL
}

/// Registers several types on a factory in one call, stopping at the
/// first error.
///
/// ```rust
/// use spool_core::factory::EngineFactory;
/// use spool_core::register_types;
///
/// # fn main() -> Result<(), spool_core::error::Error> {
/// let factory = EngineFactory::default();
/// register_types!(factory, Vec<i64>, Option<String>, (u32, String))?;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! register_types {
    ($factory:expr, $($ty:ty),+ $(,)?) => {{
        let factory = &$factory;
        (|| -> ::std::result::Result<(), $crate::error::Error> {
            $( factory.register::<$ty>()?; )+
            Ok(())
        })()
    }};
}
