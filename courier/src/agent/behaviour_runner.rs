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

use tracing::{error, instrument, trace};

use crate::agent::{BehaviourContext, BehaviourKind};
use crate::common::Result;
use crate::traits::Behaviour;

/// Drives one behaviour from `setup` to `dispose` on the current task.
///
/// The behaviour is always left in the `Done` state and `dispose` always runs,
/// whatever `setup` or `action` returned.
#[instrument(skip_all, fields(agent = %ctx.id(), behaviour = ctx.name()))]
pub(crate) async fn run_behaviour(mut behaviour: Box<dyn Behaviour>, ctx: BehaviourContext) {
    ctx.agent()
        .notify(&format!("START behaviour {} of {}", ctx.name(), ctx.id()));

    let outcome = match behaviour.setup(&ctx).await {
        Ok(()) => drive(behaviour.as_mut(), &ctx).await,
        Err(err) => {
            error!("setup failed: {}", err);
            Err(err)
        }
    };

    // Stopped from outside (or by itself) before the outcome was produced.
    let stopped = ctx.is_done();
    ctx.done();

    match outcome {
        Ok(()) => trace!("finished"),
        Err(err) if err.is_cancelled() && stopped => trace!("stopped while waiting"),
        Err(err) => error!("ended with error: {}", err),
    }

    if let Err(err) = behaviour.dispose(&ctx).await {
        error!("dispose failed: {}", err);
    }

    ctx.agent()
        .notify(&format!("STOP behaviour {} of {}", ctx.name(), ctx.id()));
}

async fn drive(behaviour: &mut dyn Behaviour, ctx: &BehaviourContext) -> Result<()> {
    match ctx.kind() {
        BehaviourKind::RunOnce => behaviour.action(ctx).await,
        BehaviourKind::RunUntilDone => {
            while !ctx.is_done() {
                match behaviour.action(ctx).await {
                    Ok(()) => {}
                    Err(err) if err.is_cancelled() => return Err(err),
                    Err(err) => error!("action failed, continuing: {}", err),
                }
            }
            Ok(())
        }
    }
}
