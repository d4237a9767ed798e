use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Structured logging for the server process. The CLI paths print with
/// `terminal` helpers instead and never call this.
pub fn init() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
