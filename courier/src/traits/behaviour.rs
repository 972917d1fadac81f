/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */
use async_trait::async_trait;

use crate::agent::BehaviourContext;
use crate::common::Result;

/// A unit of agent logic run on its own task.
///
/// The runtime calls `setup` once, then `action` once or repeatedly depending
/// on the [`BehaviourKind`](crate::agent::BehaviourKind) it was added with,
/// then `dispose` once the behaviour is done. By the time `dispose` runs the
/// behaviour's cancellation token has fired, so it must not wait on the
/// mailbox.
///
/// Returning [`CourierError::Cancelled`](crate::common::CourierError::Cancelled)
/// (typically by propagating it from
/// [`BehaviourContext::receive`]) ends the behaviour.
#[async_trait]
pub trait Behaviour: Send + 'static {
    /// Runs once before the first `action`.
    async fn setup(&mut self, _ctx: &BehaviourContext) -> Result<()> {
        Ok(())
    }

    /// The behaviour's body.
    async fn action(&mut self, ctx: &BehaviourContext) -> Result<()>;

    /// Runs once after the behaviour is done, however it ended.
    async fn dispose(&mut self, _ctx: &BehaviourContext) -> Result<()> {
        Ok(())
    }
}
