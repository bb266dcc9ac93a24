//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting TaskUp");

    let config = taskup_app::AppConfig::load();
    if let Err(e) = pollster::block_on(taskup_app::App::run(config)) {
        log::error!("TaskUp exited with an error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
