//! keybinder: global hotkey text macros
//!
//! Press a bound hotkey and the saved text is typed into the focused window.
//! Macros are managed from the console; run `help` for the command list.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::WindowId;

use keybinder_lib::app::{KeybinderApp, StartupReport};
use keybinder_lib::commands::{Command, CommandError, Reply};
use keybinder_lib::hotkey::GlobalHotkeyBackend;
use keybinder_lib::input::KeyboardSimulator;
use keybinder_lib::state::{paths, ConfigManager, MacroStore};
use keybinder_lib::utils::error::AppError;
use keybinder_lib::utils::logging::init_logging;
use keybinder_lib::utils::single_instance::InstanceLock;

/// Events sent to the event loop from other threads
#[derive(Debug)]
enum AppEvent {
    /// A line read from the console
    Command(String),
    /// The console input was closed
    InputClosed,
}

// ── Application handler for winit event loop ────────────────────────────────

struct Shell {
    app: KeybinderApp,
}

impl Shell {
    fn handle_line(&mut self, event_loop: &ActiveEventLoop, line: &str) {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => {
                prompt();
                return;
            }
            Err(e) => {
                report_error(&AppError::from(e));
                prompt();
                return;
            }
        };

        match command.apply(&mut self.app) {
            Ok(Reply::Quit) => {
                tracing::info!("Quit requested");
                event_loop.exit();
                return;
            }
            Ok(Reply::Message(message)) => println!("{}", message),
            Err(e) => report_error(&e),
        }
        prompt();
    }
}

impl ApplicationHandler<AppEvent> for Shell {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        // No windows, the console is the UI
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        _event: WindowEvent,
    ) {
        // No windows
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::Command(line) => self.handle_line(event_loop, &line),
            AppEvent::InputClosed => {
                // Hotkeys keep working without a console
                tracing::info!("Console input closed, hotkeys stay active");
            }
        }
    }
}

// ── Entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging();

    let store_path = paths::store_path();
    let settings_path = paths::settings_path_for(&store_path);
    let config = ConfigManager::load_or_default(&settings_path);

    let _instance_lock = match InstanceLock::acquire(config.instance.lock_port) {
        Ok(lock) => lock,
        Err(e) => {
            report_error(&AppError::from(e));
            return Ok(());
        }
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("keybinder-worker")
        .build()
        .context("Failed to create tokio runtime")?;

    // Build winit event loop (must be on main thread for macOS)
    let event_loop = EventLoop::<AppEvent>::with_user_event()
        .build()
        .context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let backend = GlobalHotkeyBackend::new().context("Failed to initialize global hotkeys")?;

    tracing::info!(path = %store_path.display(), "Using macro file");
    let store = MacroStore::new(store_path).with_legacy_path(paths::legacy_store_path());

    let mut app = keybinder_lib::build_app(
        Box::new(backend),
        KeyboardSimulator::factory(),
        &config,
        store,
        runtime.handle().clone(),
    )
    .with_settings_file(settings_path, config.clone());

    let report = app.startup();
    print_startup(&app, &report);

    spawn_console_reader(event_loop.create_proxy()).context("Failed to start console reader")?;

    let mut shell = Shell { app };
    prompt();
    event_loop.run_app(&mut shell)?;

    // Remove hooks before the runtime goes away
    drop(shell);
    runtime.shutdown_timeout(Duration::from_secs(2));

    tracing::info!("Keybinder stopped");
    Ok(())
}

fn spawn_console_reader(proxy: EventLoopProxy<AppEvent>) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("keybinder-console".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if proxy.send_event(AppEvent::Command(line)).is_err() {
                            // Event loop has exited
                            return;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read console input");
                        break;
                    }
                }
            }
            let _ = proxy.send_event(AppEvent::InputClosed);
        })
}

fn print_startup(app: &KeybinderApp, report: &StartupReport) {
    println!("TEXT MACRO KEYBINDER");
    println!("Macro file: {}", app.store().path().display());

    if let Some(warning) = &report.warning {
        println!("Warning: {}", warning);
    }
    if report.migrated {
        match &report.persist_error {
            None => println!("✨ Migrated macros to {}", app.store().path().display()),
            Some(e) => println!("Warning: failed to save migrated macros: {}", e),
        }
    }
    for (key, e) in &report.failed {
        println!("Hotkey '{}' is not active: {}", key, e);
    }

    println!("{}", app.status_line());
    println!("Type 'help' for commands.");
}

fn report_error(err: &AppError) {
    tracing::debug!(code = ?err.code(), error = %err, "Command failed");
    println!("{}", err.user_message());
    if let Some(hint) = err.recovery_hint() {
        println!("{}", hint);
    }
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}
