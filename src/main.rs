// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

/// The entry point of the application.
/// Runs the shell, reporting a failed startup on stderr.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = wup_web_lib::run().await {
        eprintln!("Failed to run application: {}", e);
        return Err(e.into());
    }
    Ok(())
}
