use std::sync::Arc;

use mote_monitor::{
    cli, logging, Gateway, ReceptionLogger, Sender, SenderConfig, Source, TestMessage,
};

static PROGRAM: &str = "sender";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let source = match cli::parse_args(std::env::args().skip(1)) {
        Ok(source) => source,
        Err(_) => {
            eprintln!("{}", cli::usage(PROGRAM));
            std::process::exit(1);
        }
    };
    logging::init_logging();

    let source = match source {
        Some(locator) => locator.parse::<Source>()?,
        None => Source::local(),
    };
    let config = SenderConfig::default().with_source(source);

    let gateway = Gateway::connect(&config.source)?;
    gateway.register_listener::<TestMessage>(Arc::new(ReceptionLogger::new()));
    let _delivery = gateway.start()?;

    let sent = Sender::new(&config)
        .run(&gateway, &mut std::io::stdout())
        .await?;
    log::info!("Sent {} packets", sent);
    Ok(())
}
