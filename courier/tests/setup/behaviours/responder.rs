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
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use courier::prelude::*;

/// Answers every REQUEST with an INFORM until stopped.
pub struct Responder {
    pub handled: Arc<AtomicUsize>,
    pub disposed: Arc<AtomicUsize>,
}

#[async_trait]
impl Behaviour for Responder {
    async fn action(&mut self, ctx: &BehaviourContext) -> Result<()> {
        let request = ctx.receive(&MessageFilter::of(Performative::Request)).await?;
        let reply = Message::new(
            ctx.id().clone(),
            request.sender().clone(),
            Performative::Inform,
            format!("answer to {}", request.content()),
        );
        ctx.send(reply).await?;
        self.handled.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn dispose(&mut self, _ctx: &BehaviourContext) -> Result<()> {
        self.disposed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
