use std::io::Write;

use env_logger::{Builder, Env};

/// Diagnostics go to stderr as `[LEVEL target] message`; `RUST_LOG` overrides
/// the default `info` filter.
pub fn init_logging() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
