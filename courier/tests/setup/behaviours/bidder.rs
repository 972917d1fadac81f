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

use courier::prelude::*;

use crate::setup::payloads::Bid;

/// Answers a call for proposals with a fixed bid, then waits to hear if it won.
///
/// Losers never hear back and stay blocked until their agent is destroyed.
pub struct Bidder {
    pub amount: u32,
    pub outcome: Arc<Mutex<Option<String>>>,
}

#[async_trait]
impl Behaviour for Bidder {
    async fn action(&mut self, ctx: &BehaviourContext) -> Result<()> {
        let auctioneers = AgentId::category_of("Auctioneer");
        let call = ctx
            .receive(&MessageFilter::from_sender(auctioneers.clone()).performative(Performative::CallForProposal))
            .await?;

        let proposal = Message::builder()
            .sender(ctx.id())
            .receiver(call.sender().clone())
            .performative(Performative::Proposal)
            .content(format!("{} for {}", self.amount, call.content()))
            .payload(Bid {
                bidder: ctx.id().name().to_string(),
                amount: self.amount,
            })
            .build()?;
        ctx.send(proposal).await?;

        let verdict = ctx
            .receive(&MessageFilter::from_sender(auctioneers).performative(Performative::Inform))
            .await?;
        *self.outcome.lock() = Some(verdict.content().to_string());
        Ok(())
    }
}
