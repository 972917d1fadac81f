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
use tracing::info;

use courier::prelude::*;

use crate::setup::payloads::Bid;

/// Calls for proposals from every `Cliente`, collects `expected` bids and
/// tells the highest bidder it won.
pub struct Auctioneer {
    pub expected: usize,
    pub winner: Arc<Mutex<Option<Bid>>>,
}

#[async_trait]
impl Behaviour for Auctioneer {
    async fn action(&mut self, ctx: &BehaviourContext) -> Result<()> {
        ctx.send(Message::new(
            ctx.id().clone(),
            AgentId::category_of("Cliente"),
            Performative::CallForProposal,
            "lot 1",
        ))
        .await?;

        let proposals = MessageFilter::from_sender(AgentId::category_of("Cliente"))
            .performative(Performative::Proposal);
        let mut best: Option<(Bid, AgentId)> = None;
        for _ in 0..self.expected {
            let proposal = ctx.receive(&proposals).await?;
            let Some(bid) = proposal.payload_as::<Bid>().cloned() else {
                continue;
            };
            if best.as_ref().map_or(true, |(current, _)| bid.amount > current.amount) {
                best = Some((bid, proposal.sender().clone()));
            }
        }

        if let Some((bid, bidder)) = best {
            info!("{} wins with {}", bidder, bid.amount);
            ctx.send(Message::new(ctx.id().clone(), bidder, Performative::Inform, "won"))
                .await?;
            *self.winner.lock() = Some(bid);
        }
        Ok(())
    }
}
