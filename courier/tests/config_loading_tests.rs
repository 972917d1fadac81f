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

use std::fs;

use courier::prelude::*;
use courier_test::prelude::*;

#[courier_test]
async fn full_file_overrides_every_default() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[directory]
host = "10.0.0.7"
port = 2099
name = "auction.house"

[limits]
mailbox_capacity = 32

[timeouts]
agent_shutdown_timeout_ms = 250
"#,
    )?;

    let config = CourierConfig::load_from(&path);
    assert_eq!(
        config.directory_address(),
        "courier://10.0.0.7:2099/auction.house".parse::<DirectoryAddress>()?
    );
    assert_eq!(config.limits.mailbox_capacity, 32);
    assert_eq!(config.agent_shutdown_timeout().as_millis(), 250);

    let agent = Agent::with_config(PersonalId::new("X", "Cliente"), config)?;
    assert_eq!(agent.mailbox().capacity(), 32);
    Ok(())
}

#[courier_test]
async fn zero_capacity_in_file_is_rejected_by_agents() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    fs::write(&path, "[limits]\nmailbox_capacity = 0\n")?;

    let config = CourierConfig::load_from(&path);
    assert!(matches!(
        Agent::with_config(PersonalId::new("X", "Cliente"), config),
        Err(CourierError::InvalidArgument(_))
    ));
    Ok(())
}
