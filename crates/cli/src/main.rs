use anyhow::Context;

use productopts_infra::ListenerConfig;

fn main() -> anyhow::Result<()> {
    productopts_observability::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: productopts-replay <scenario.json>")?;
    let raw = std::fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;
    let scenario: productopts_cli::Scenario =
        serde_json::from_str(&raw).with_context(|| format!("failed to parse {path}"))?;

    let report = productopts_cli::replay(&scenario, ListenerConfig::from_env())?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
