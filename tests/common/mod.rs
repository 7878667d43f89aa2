pub mod mocks;

/// Opt-in test logging: call at the top of a test and run with
/// `RUST_LOG=agentry=debug` to see the crate's tracing output.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
