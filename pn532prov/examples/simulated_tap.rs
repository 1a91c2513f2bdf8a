//! Provision against the byte-level PN532 simulator: one phone tap carrying
//! `ssid?password`, printed the way the device would log it.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -p pn532prov --example simulated_tap -- MyNetwork Sup3rSecret

use anyhow::{bail, Context};
use pn532prov::prelude::*;
use pn532prov::test_support::{self, SharedTransport};

/// Prints instead of joining a real network.
struct PrintJoin;

impl NetworkJoin for PrintJoin {
    fn connect(&mut self, credentials: &Credentials) -> Result<()> {
        println!("joining {} ({} byte passphrase)", credentials.ssid(), credentials.password().len());
        Ok(())
    }
}

struct PrintCloud;

impl CloudRunner for PrintCloud {
    fn run(&mut self, state: &ProvisioningState) -> Result<()> {
        println!("cloud runner started, wifi connected: {}", state.is_connected());
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let ssid = args.next().unwrap_or_else(|| "MyNetwork".into());
    let password = args.next().unwrap_or_else(|| "Sup3rSecret".into());
    let text = format!("{}?{}", ssid, password);

    let shared = SharedTransport::new(test_support::seeded_mock());
    test_support::queue_tap(&shared, text.as_bytes());

    let device = DeviceBuilder::new()
        .with_transport(Box::new(shared.clone()))
        .build()
        .context("PN532 did not initialize")?;
    if let Some(fw) = device.firmware() {
        println!("found {}", fw);
    }

    let store = MemoryStore::new();
    let config = ProvisioningConfig::immediate().with_stop_after_join(true);
    let mut provisioner =
        Provisioner::with_config(device, PrintJoin, store.clone(), PrintCloud, config);

    let report = provisioner.poll_once().context("tap failed")?;
    for step in &report.steps {
        match &step.result {
            Ok(data) => println!("{:<28} ok   {}", step.step.to_string(), bytes_to_hex_spaced(data)),
            Err(e) => println!("{:<28} FAIL {}", step.step.to_string(), e),
        }
    }

    match report.outcome {
        CycleOutcome::Joined(creds) => println!("provisioned {:?}", creds),
        other => bail!("tap did not provision: {:?}", other),
    }
    println!(
        "store: flag={} ssid={:?}",
        store.is_provisioned(),
        store.credentials().map(|c| c.ssid().to_string())
    );
    println!("simulated time: {} ms", shared.elapsed_ms());
    Ok(())
}
