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

use crate::pool::PoolStrategy;

/// Construction-time configuration for an [`crate::factory::EngineFactory`].
///
/// The pooling strategy is an explicit value here rather than a
/// compiled-in choice, so it can be swapped and tested without rebuilding.
#[derive(Clone, Debug)]
pub struct FactoryConfig {
    /// How engine instances are pooled and handed out.
    pub strategy: PoolStrategy,
    /// Whether engines require every encoded/decoded type to be
    /// registered. The default is `false` (permissive): unregistered
    /// types fall back to name-tagged encoding instead of failing.
    pub strict: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        FactoryConfig {
            strategy: PoolStrategy::default(),
            strict: false,
        }
    }
}

impl FactoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn is_strict(&self) -> bool {
        self.strict
    }
}
