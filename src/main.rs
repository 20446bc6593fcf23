#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[cfg(windows)]
fn run() -> anyhow::Result<()> {
    use windows::Win32::UI::WindowsAndMessaging::PostQuitMessage;
    use wintray::{run_message_loop, Tray};

    const MENU_ID_OPEN: u32 = 1;
    const MENU_ID_EXIT: u32 = 2;

    let icon_path = std::env::args().nth(1).unwrap_or_else(|| "app.ico".into());

    let mut tray = Tray::new(&icon_path, "wintray demo", |id| match id {
        MENU_ID_OPEN => tracing::info!("Open selected"),
        // Destroying the window on drop would also end the loop; posting the
        // quit message directly lets teardown run on the way out of `run`.
        MENU_ID_EXIT => unsafe { PostQuitMessage(0) },
        _ => tracing::debug!("Unhandled menu item {id}"),
    })?;

    tray.add_menu_item(MENU_ID_OPEN, "Open")?;
    tray.add_menu_item(MENU_ID_EXIT, "Exit")?;

    run_message_loop();

    Ok(())
}

#[cfg(not(windows))]
fn run() -> anyhow::Result<()> {
    anyhow::bail!("wintray only supports the Windows notification area")
}

#[cfg(windows)]
fn error_dialog<T: std::fmt::Display>(error: T) {
    rfd::MessageDialog::new()
        .set_title("wintray")
        .set_description(error.to_string())
        .set_level(rfd::MessageLevel::Error)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_env("WINTRAY_LOG").unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::DEBUG.into())
            .from_env_lossy()
    });

    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .with_env_filter(env_filter)
        .finish();

    // In release builds the console is detached, so logs go to a file.
    #[cfg(not(debug_assertions))]
    let (file_log_layer, _f_guard) = {
        use anyhow::Context;

        let logs_dir = dirs::data_dir()
            .context("Failed to get $data_dir path")?
            .join("wintray")
            .join("logs");

        let appender = tracing_appender::rolling::daily(&logs_dir, "wintray.log");
        let (non_blocking, _guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::Layer::default()
            // disable ansi coloring in log file
            .with_ansi(false)
            .with_writer(non_blocking);

        (layer, _guard)
    };

    #[cfg(not(debug_assertions))]
    use tracing_subscriber::layer::SubscriberExt;
    #[cfg(not(debug_assertions))]
    let subscriber = subscriber.with(file_log_layer);

    tracing::subscriber::set_global_default(subscriber)?;

    #[cfg(windows)]
    std::panic::set_hook(Box::new(|info| {
        error_dialog(info);
        tracing::error!("{info}");
    }));

    if let Err(e) = run() {
        #[cfg(windows)]
        error_dialog(&e);
        tracing::error!("{e}");
        std::process::exit(1);
    }

    Ok(())
}
