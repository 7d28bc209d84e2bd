use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; later calls are no-ops when a subscriber is
/// already installed (tests install their own).
pub fn init(level: Level) {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("global tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init(Level::INFO);
        init(Level::DEBUG);
    }
}
