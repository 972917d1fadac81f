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
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use courier::prelude::*;

/// Sends one REQUEST to `target` and records the content of the INFORM it gets back.
pub struct Requester {
    pub target: AgentId,
    pub question: String,
    pub answer: Arc<Mutex<Option<String>>>,
}

#[async_trait]
impl Behaviour for Requester {
    async fn action(&mut self, ctx: &BehaviourContext) -> Result<()> {
        ctx.send(Message::new(
            ctx.id().clone(),
            self.target.clone(),
            Performative::Request,
            self.question.as_str(),
        ))
        .await?;

        let filter = MessageFilter::from_sender(self.target.clone()).performative(Performative::Inform);
        let reply = ctx.receive(&filter).await?;
        debug!("{} got {}", ctx.id(), reply.content());
        *self.answer.lock() = Some(reply.content().to_string());
        Ok(())
    }
}
