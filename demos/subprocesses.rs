use std::time::Duration;

use service_supervisor::{CancellationToken, Subprocess, SupervisorBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    // Build the supervisor with one healthy and one crashing command
    let supervisor = SupervisorBuilder::new()
        .with_service(Subprocess::new(
            "clock",
            ["sh", "-c", "while true; do date; sleep 1; done"],
        ))
        .with_service(Subprocess::new(
            "crasher",
            ["sh", "-c", "echo crashing in 2s; sleep 2; exit 3"],
        ))
        .build();

    let handle = supervisor.run(CancellationToken::new());

    // Stop everything on Ctrl-C, or after 20 seconds
    tokio::select! {
        _ = tokio::signal::ctrl_c() => println!("Ctrl-C received, shutting down..."),
        _ = tokio::time::sleep(Duration::from_secs(20)) => println!("Time is up, shutting down..."),
    }
    handle.shutdown();

    match handle.wait().await {
        Ok(()) => println!("All services stopped."),
        Err(err) => println!("Stopped with: {err}"),
    }
}
