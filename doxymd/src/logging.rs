//! Diagnostics on stderr through `tracing`.
//!
//! `--debug` wins over `--verbose`; without either flag `RUST_LOG` is
//! honoured and the default only shows warnings and errors.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives for the given flags, `None` meaning "ask `RUST_LOG`".
fn directives(verbose: bool, debug: bool) -> Option<&'static str> {
    if debug {
        Some("doxymd=debug,doxygen_xml=debug")
    } else if verbose {
        Some("doxymd=info,doxygen_xml=info")
    } else {
        None
    }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, debug: bool) {
    let filter = match directives(verbose, debug) {
        Some(d) => EnvFilter::new(d),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
