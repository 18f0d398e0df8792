use std::sync::Arc;

use mote_monitor::{
    cli, logging, Gateway, MonitorConfig, MonitorContext, Scheduler, Source, StateListener,
    StateMessage,
};

static PROGRAM: &str = "mote_monitor";

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
    let config = MonitorConfig::default().with_source(source);

    let gateway = Gateway::connect(&config.source)?;
    let context = MonitorContext::new();
    let listener = StateListener::new(context.clone());
    gateway.register_listener::<StateMessage>(Arc::new(listener));
    let _delivery = gateway.start()?;

    log::info!(
        "Ready to read, reporting every {}s",
        config.report_period.as_secs()
    );
    let scheduler = Scheduler::new(context, config.aggregator, config.report_period);
    tokio::select! {
        res = scheduler.run(std::io::stdout()) => res?,
        res = tokio::signal::ctrl_c() => {
            res?;
            log::info!("Interrupted");
        }
    }
    Ok(())
}
