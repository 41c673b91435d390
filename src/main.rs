use anyhow::Context;
use clap::Parser;
use registration_signer::{cli::Cli, eth::Signature, logger::setup_logger};

fn run(cli: Cli) -> anyhow::Result<Signature> {
    let request = cli.into_request().context("invalid input")?;
    let signature = request.sign().context("failed to sign registration payload")?;
    Ok(signature)
}

fn main() -> anyhow::Result<()> {
    setup_logger();

    let signature = run(Cli::parse())?;
    println!("Signature:");
    println!("{signature}");
    Ok(())
}
