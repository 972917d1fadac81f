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

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use courier::prelude::*;
use courier_test::prelude::*;

mod setup;

fn inform(sender: &str, content: &str) -> Message {
    Message::new(
        PersonalId::new(sender, "Cliente"),
        PersonalId::new("Y", "Auctioneer"),
        Performative::Inform,
        content,
    )
}

/// Readers waiting on different senders each get their own message, however
/// the writes are interleaved.
#[courier_test]
async fn each_waiter_rechecks_its_own_filter() -> anyhow::Result<()> {
    let mailbox = Arc::new(Mailbox::with_capacity(PersonalId::new("Y", "Auctioneer"), 10)?);
    let cancel = CancellationToken::new();

    let readers: Vec<_> = ["A", "B", "C"]
        .into_iter()
        .map(|name| {
            let mailbox = Arc::clone(&mailbox);
            let cancel = cancel.clone();
            let filter = MessageFilter::from_sender(PersonalId::new(name, "Cliente"));
            tokio::spawn(async move { mailbox.read_blocking(&filter, &cancel).await })
        })
        .collect();

    tokio::time::sleep(Duration::from_millis(20)).await;
    for name in ["C", "A", "B"] {
        mailbox.write(inform(name, name))?;
    }

    let results = tokio::time::timeout(Duration::from_secs(2), futures::future::join_all(readers)).await?;
    let mut contents = Vec::new();
    for joined in results {
        contents.push(joined??.content().to_string());
    }
    assert_eq!(contents, vec!["A", "B", "C"]);
    assert!(mailbox.is_empty());
    Ok(())
}

/// Competing readers with the same filter split the messages between them
/// without loss or duplication.
#[courier_test]
async fn competing_readers_share_messages() -> anyhow::Result<()> {
    let mailbox = Arc::new(Mailbox::with_capacity(PersonalId::new("Y", "Auctioneer"), 4)?);
    let cancel = CancellationToken::new();
    let filter = MessageFilter::of(Performative::Inform);

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let mailbox = Arc::clone(&mailbox);
            let cancel = cancel.clone();
            let filter = filter.clone();
            tokio::spawn(async move { mailbox.read_blocking(&filter, &cancel).await })
        })
        .collect();

    for i in 0..4 {
        mailbox.write(inform("A", &i.to_string()))?;
    }

    let mut seen = Vec::new();
    for reader in readers {
        let message = tokio::time::timeout(Duration::from_secs(2), reader).await???;
        seen.push(message.content().to_string());
    }
    seen.sort();
    assert_eq!(seen, vec!["0", "1", "2", "3"]);
    Ok(())
}

/// Writes never wait: a full mailbox rejects at once and accepts again once a
/// reader makes room.
#[courier_test]
async fn full_mailbox_rejects_until_read() -> anyhow::Result<()> {
    let mailbox = Mailbox::with_capacity(PersonalId::new("Y", "Auctioneer"), 2)?;
    mailbox.write(inform("A", "1"))?;
    mailbox.write(inform("B", "2"))?;

    let err = mailbox.write(inform("C", "3")).unwrap_err();
    assert_eq!(err.to_string(), "mailbox of (Y, Auctioneer) is full (2 messages)");

    let taken = mailbox
        .read_blocking(&MessageFilter::from_sender(AgentId::category_of("Cliente")), &CancellationToken::new())
        .await?;
    assert_eq!(taken.content(), "1");
    mailbox.write(inform("C", "3"))?;
    assert!(mailbox.is_full());
    Ok(())
}
