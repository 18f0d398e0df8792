use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mote_monitor::{
    Aggregator, Gateway, MessageListener, MonitorConfig, MonitorContext, Scheduler,
    StateListener, StateMessage, WatchedMote,
};
use tokio::io::AsyncWriteExt;
use tokio::time::sleep;

#[derive(Clone, Default)]
struct Console(Arc<Mutex<Vec<u8>>>);

impl Console {
    fn take(&self) -> String {
        String::from_utf8(std::mem::take(&mut *self.0.lock().unwrap())).unwrap()
    }
}

impl Write for Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn reports_window_then_starts_empty() {
    let (client, mut mote) = tokio::io::duplex(1024);
    let gateway = Gateway::from_stream(client);
    let context = MonitorContext::new();
    gateway.register_listener::<StateMessage>(Arc::new(StateListener::new(context.clone())));
    let _delivery = gateway.start().unwrap();

    let config = MonitorConfig::default();
    let console = Console::default();
    let scheduler = Scheduler::new(context.clone(), config.aggregator, config.report_period);
    tokio::spawn(scheduler.run(console.clone()));

    mote.write_all(b"OK 0 147 0 1\r\n").await.unwrap();
    sleep(Duration::from_secs(5)).await;
    mote.write_all(b"OK 0 147 1 1\r\n").await.unwrap();
    sleep(Duration::from_secs(5)).await;
    // an unrelated packet type and an "off" transition must not count
    mote.write_all(b"OK 0 137 0 0\r\nOK 0 147 0 0\r\n").await.unwrap();
    sleep(Duration::from_secs(2)).await;
    mote.write_all(b"OK 0 147 0 1\r\n").await.unwrap();

    sleep(Duration::from_secs(49)).await;
    assert_eq!(
        console.take(),
        "[0] Mote 0 turned on\n\
         [5] Mote 1 turned on\n\
         [10] Mote 0 turned off\n\
         [12] Mote 0 turned on\n\
         Red mote went above its threshold 2 times.\n\
         Green mote went above its threshold 1 times.\n"
    );
    assert!(context.log.is_empty());

    mote.write_all(b"OK 0 147 1 0\r\n").await.unwrap();
    sleep(Duration::from_secs(60)).await;
    assert_eq!(
        console.take(),
        "[61] Mote 1 turned off\n\
         Red mote went above its threshold 0 times.\n\
         Green mote went above its threshold 0 times.\n"
    );
}

#[tokio::test(start_paused = true)]
async fn custom_watch_list_and_period() {
    let config = MonitorConfig::default()
        .with_report_period(Duration::from_secs(10))
        .with_aggregator(Aggregator::new(
            WatchedMote::new(7, "Door"),
            WatchedMote::new(8, "Window"),
        ));
    let context = MonitorContext::new();
    let listener = StateListener::new(context.clone());
    let console = Console::default();
    let scheduler = Scheduler::new(context, config.aggregator, config.report_period);
    tokio::spawn(scheduler.run(console.clone()));

    sleep(Duration::from_secs(3)).await;
    listener.message_received(0, StateMessage { id: 7, state: 1 });
    listener.message_received(0, StateMessage { id: 8, state: 0 });
    listener.message_received(0, StateMessage { id: 0, state: 1 });

    sleep(Duration::from_secs(8)).await;
    assert_eq!(
        console.take(),
        "[3] Mote 7 turned on\n\
         [3] Mote 8 turned off\n\
         [3] Mote 0 turned on\n\
         Door went above its threshold 1 times.\n\
         Window went above its threshold 0 times.\n"
    );
}
