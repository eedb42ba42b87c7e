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

//! Engine pooling. Engines are expensive to construct and not internally
//! synchronized, so the pool serializes access per instance while letting
//! independent instances run in parallel.

use std::ops::{Deref, DerefMut};
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::engine::Engine;
use crate::error::Error;

/// Pooling strategy, chosen explicitly at factory construction time.
#[derive(Clone, Debug)]
pub enum PoolStrategy {
    /// Reusable instances: an idle engine is handed out when available, a
    /// new one is built while under the cap, and an exhausted capped pool
    /// either blocks (with an optional timeout, after which acquire fails
    /// with [`Error::PoolExhausted`]) or fails fast when
    /// `block_on_exhaustion` is off.
    Pooled {
        /// `None` means unbounded; the pool grows on demand.
        max_instances: Option<usize>,
        block_on_exhaustion: bool,
        acquire_timeout: Option<Duration>,
    },
    /// Exactly one engine shared by all callers. Engines are not
    /// internally synchronized, so the guard serializes access: a second
    /// concurrent acquire blocks until the first guard is dropped.
    Singleton,
    /// A fresh engine per acquire, dropped on release. Highest cost,
    /// simplest correctness.
    PerCall,
}

impl Default for PoolStrategy {
    fn default() -> Self {
        PoolStrategy::Pooled {
            max_instances: None,
            block_on_exhaustion: true,
            acquire_timeout: None,
        }
    }
}

impl PoolStrategy {
    /// Blocking pooled strategy with the given cap and no timeout.
    pub fn pooled(max_instances: Option<usize>) -> PoolStrategy {
        PoolStrategy::Pooled {
            max_instances,
            block_on_exhaustion: true,
            acquire_timeout: None,
        }
    }
}

pub(crate) type EngineConstructor = Box<dyn Fn() -> Engine + Send + Sync>;

struct PoolState {
    idle: Vec<Engine>,
    /// Engines in existence: idle plus handed out.
    live: usize,
    closed: bool,
}

/// Owns every engine instance of one factory. Hands one out on acquire,
/// takes it back when the [`EngineGuard`] drops.
pub struct EnginePool {
    state: Mutex<PoolState>,
    available: Condvar,
    strategy: PoolStrategy,
    construct: EngineConstructor,
}

impl EnginePool {
    pub(crate) fn new(strategy: PoolStrategy, construct: EngineConstructor) -> EnginePool {
        EnginePool {
            state: Mutex::new(PoolState {
                idle: Vec::new(),
                live: 0,
                closed: false,
            }),
            available: Condvar::new(),
            strategy,
            construct,
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, PoolState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Acquires exclusive use of one engine. The guard returns the engine
    /// to the pool on every exit path.
    pub fn acquire(&self) -> Result<EngineGuard<'_>, Error> {
        match self.strategy {
            PoolStrategy::PerCall => {
                {
                    let mut state = self.lock_state();
                    if state.closed {
                        return Err(Error::pool_closed("engine pool is closed"));
                    }
                    state.live += 1;
                }
                // build outside the lock; construction is the expensive part
                let engine = (self.construct)();
                Ok(self.guard(engine))
            }
            PoolStrategy::Singleton => self.acquire_pooled(Some(1), true, None),
            PoolStrategy::Pooled {
                max_instances,
                block_on_exhaustion,
                acquire_timeout,
            } => self.acquire_pooled(max_instances, block_on_exhaustion, acquire_timeout),
        }
    }

    fn acquire_pooled(
        &self,
        cap: Option<usize>,
        block: bool,
        timeout: Option<Duration>,
    ) -> Result<EngineGuard<'_>, Error> {
        let deadline = timeout.map(|t| Instant::now() + t);
        let mut state = self.lock_state();
        loop {
            if state.closed {
                return Err(Error::pool_closed("engine pool is closed"));
            }
            if let Some(engine) = state.idle.pop() {
                return Ok(self.guard(engine));
            }
            if cap.map_or(true, |c| state.live < c) {
                state.live += 1;
                drop(state);
                let engine = (self.construct)();
                return Ok(self.guard(engine));
            }
            if !block {
                return Err(Error::pool_exhausted(format!(
                    "all {} engine instances are in use",
                    cap.unwrap_or(0)
                )));
            }
            state = match deadline {
                None => self
                    .available
                    .wait(state)
                    .unwrap_or_else(|poisoned| poisoned.into_inner()),
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(Error::pool_exhausted(
                            "timed out waiting for an idle engine instance",
                        ));
                    }
                    self.available
                        .wait_timeout(state, deadline - now)
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .0
                }
            };
        }
    }

    fn guard(&self, engine: Engine) -> EngineGuard<'_> {
        EngineGuard {
            pool: self,
            engine: Some(engine),
        }
    }

    fn release_engine(&self, engine: Engine) {
        let mut state = self.lock_state();
        if state.closed || matches!(self.strategy, PoolStrategy::PerCall) {
            state.live -= 1;
            return;
        }
        state.idle.push(engine);
        drop(state);
        self.available.notify_one();
    }

    /// Frees all idle engines and fails every later (and currently
    /// blocked) acquire with [`Error::PoolClosed`]. Safe to race with
    /// in-flight guard drops: their engines are freed on return.
    pub fn close(&self) {
        let mut state = self.lock_state();
        if state.closed {
            return;
        }
        state.closed = true;
        state.live -= state.idle.len();
        state.idle.clear();
        drop(state);
        self.available.notify_all();
        log::debug!("engine pool closed");
    }

    pub fn is_closed(&self) -> bool {
        self.lock_state().closed
    }

    /// Engines currently in existence (idle plus handed out). Under
    /// `Pooled { max_instances: Some(c), .. }` this never exceeds `c`.
    pub fn live_instances(&self) -> usize {
        self.lock_state().live
    }
}

/// Scoped, consumable-once handle to an acquired engine.
///
/// Dropping the guard releases the engine back to its pool, so release
/// happens exactly once per acquire on every exit path; double release and
/// releasing a foreign instance are unrepresentable.
pub struct EngineGuard<'a> {
    pool: &'a EnginePool,
    engine: Option<Engine>,
}

impl EngineGuard<'_> {
    /// Explicit early release; equivalent to dropping the guard.
    pub fn release(self) {}
}

impl std::fmt::Debug for EngineGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineGuard")
            .field("released", &self.engine.is_none())
            .finish()
    }
}

impl Deref for EngineGuard<'_> {
    type Target = Engine;

    fn deref(&self) -> &Engine {
        self.engine.as_ref().expect("engine already released")
    }
}

impl DerefMut for EngineGuard<'_> {
    fn deref_mut(&mut self) -> &mut Engine {
        self.engine.as_mut().expect("engine already released")
    }
}

impl Drop for EngineGuard<'_> {
    fn drop(&mut self) {
        if let Some(engine) = self.engine.take() {
            self.pool.release_engine(engine);
        }
    }
}
