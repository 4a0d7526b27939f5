mod common;

use std::fs;
use std::path::Path;

use common::{wait_idle, MockBackend, RecordingInjector};
use keybinder_lib::app::{KeybinderApp, MacroDraft, PauseChange};
use keybinder_lib::build_app;
use keybinder_lib::commands::{Command, Reply};
use keybinder_lib::state::{AppConfig, ConfigManager, MacroRecord, MacroStore};
use keybinder_lib::typing::{SettingsSource, TypingConfig};
use keybinder_lib::utils::error::{AppError, ErrorCode};
use tempfile::{tempdir, TempDir};

struct Fixture {
    app: KeybinderApp,
    backend: MockBackend,
    injector: RecordingInjector,
    dir: TempDir,
}

impl Fixture {
    fn store_path(&self) -> std::path::PathBuf {
        self.dir.path().join("keybinds.json")
    }

    fn stored(&self) -> serde_json::Value {
        read_json(&self.store_path())
    }
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn fixture_with(dir: TempDir, legacy: Option<std::path::PathBuf>) -> Fixture {
    let backend = MockBackend::new();
    let injector = RecordingInjector::new();

    let mut config = AppConfig::default();
    config.typing = TypingConfig::immediate();

    let store = MacroStore::new(dir.path().join("keybinds.json")).with_legacy_path(legacy);
    let app = build_app(
        backend.boxed(),
        injector.factory(),
        &config,
        store,
        tokio::runtime::Handle::current(),
    )
    .with_settings_file(dir.path().join("settings.json"), config.clone());

    Fixture {
        app,
        backend,
        injector,
        dir,
    }
}

fn fixture() -> Fixture {
    fixture_with(tempdir().unwrap(), None)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_startup_binds_stored_macros() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("keybinds.json"),
        r#"{"binds":{"numpad 1":{"label":"A","text":"alpha"},"F2":"beta"},"auto_enter":true}"#,
    )
    .unwrap();

    let mut fx = fixture_with(dir, None);
    let report = fx.app.startup();

    assert_eq!(report.loaded, 2);
    assert!(report.failed.is_empty());
    assert!(!report.migrated);
    assert!(fx.app.settings().auto_enter());
    assert_eq!(fx.backend.installed(), vec!["F2", "num 1"]);
    assert_eq!(fx.app.status_line(), "▶ Playing • 2 macros loaded");

    assert!(fx.backend.trigger("F2"));
    assert!(wait_idle(fx.app.registry().engine()).await);
    assert_eq!(fx.injector.typed(), "beta");
    assert_eq!(fx.injector.enter_count(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_startup_migrates_legacy_file() {
    let dir = tempdir().unwrap();
    let legacy = dir.path().join("legacy").join("keybinds.json");
    fs::create_dir_all(legacy.parent().unwrap()).unwrap();
    fs::write(&legacy, r#"{"binds":{"F1":"from legacy"}}"#).unwrap();

    let mut fx = fixture_with(dir, Some(legacy));
    let report = fx.app.startup();

    assert!(report.migrated);
    assert!(report.persist_error.is_none());
    assert_eq!(fx.stored()["binds"]["F1"]["label"], "Macro F1");
    assert_eq!(fx.stored()["binds"]["F1"]["text"], "from legacy");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_startup_with_corrupted_file_reports_warning() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("keybinds.json"), "{{{").unwrap();

    let mut fx = fixture_with(dir, None);
    let report = fx.app.startup();

    assert!(report.warning.is_some());
    assert_eq!(report.loaded, 0);
    assert!(!fx.app.settings().auto_enter());
    assert_eq!(fx.app.status_line(), "▶ Playing • 0 macros loaded");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_save_requires_all_fields() {
    let mut fx = fixture();

    for (draft, field) in [
        (MacroDraft::new("F1", "  ", "text"), "label"),
        (MacroDraft::new("", "Name", "text"), "hotkey"),
        (MacroDraft::new("F1", "Name", "\n  "), "text"),
    ] {
        let err = fx.app.save_macro(draft).unwrap_err();
        assert!(matches!(err, AppError::MissingField(f) if f == field));
        assert_eq!(err.code(), ErrorCode::MacroFieldMissing);
    }

    assert!(fx.app.macros().is_empty());
    assert!(!fx.store_path().exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_save_persists_and_installs() {
    let mut fx = fixture();

    let report = fx
        .app
        .save_macro(MacroDraft::new(" F1 ", "Greeting", "hello\n"))
        .unwrap();

    assert!(report.is_active());
    assert_eq!(report.key, "F1");
    assert_eq!(fx.app.get("F1"), Some(&MacroRecord::new("Greeting", "hello")));
    assert_eq!(fx.backend.installed(), vec!["F1"]);
    assert_eq!(fx.stored()["binds"]["F1"]["text"], "hello");
    assert_eq!(fx.app.status_line(), "▶ Playing • 1 macro loaded");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_save_with_failed_hotkey_still_saved() {
    let mut fx = fixture();
    fx.backend.reject("F1");

    let report = fx.app.save_macro(MacroDraft::new("F1", "Greeting", "hello")).unwrap();

    assert!(!report.is_active());
    assert!(!report.kept_previous);
    assert!(fx.app.get("F1").is_some());
    assert_eq!(fx.stored()["binds"]["F1"]["label"], "Greeting");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_edit_with_new_key_moves_macro() {
    let mut fx = fixture();
    fx.app.save_macro(MacroDraft::new("F1", "A", "alpha")).unwrap();

    let report = fx
        .app
        .save_macro(MacroDraft::new("F2", "A2", "alpha 2").editing("F1"))
        .unwrap();

    assert!(report.is_active());
    assert!(fx.app.get("F1").is_none());
    assert_eq!(fx.app.get("F2"), Some(&MacroRecord::new("A2", "alpha 2")));
    assert_eq!(fx.backend.installed(), vec!["F2"]);
    assert!(fx.stored()["binds"].get("F1").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_edit_with_rejected_key_keeps_previous() {
    let mut fx = fixture();
    fx.app.save_macro(MacroDraft::new("F1", "A", "alpha")).unwrap();
    fx.backend.reject("F2");

    let report = fx
        .app
        .save_macro(MacroDraft::new("F2", "A2", "alpha 2").editing("F1"))
        .unwrap();

    assert!(!report.is_active());
    assert!(report.kept_previous);
    assert_eq!(report.key, "F1");
    assert_eq!(fx.app.get("F1"), Some(&MacroRecord::new("A", "alpha")));
    assert!(fx.app.get("F2").is_none());
    assert_eq!(fx.backend.installed(), vec!["F1"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_macro() {
    let mut fx = fixture();
    fx.app.save_macro(MacroDraft::new("F1", "A", "alpha")).unwrap();

    let err = fx.app.delete_macro("F9").unwrap_err();
    assert_eq!(err.code(), ErrorCode::MacroNotFound);

    let removed = fx.app.delete_macro("F1").unwrap();
    assert_eq!(removed.label, "A");
    assert!(fx.backend.installed().is_empty());
    assert_eq!(fx.stored()["binds"], serde_json::json!({}));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_toggle_pause_updates_status() {
    let mut fx = fixture();
    fx.app.save_macro(MacroDraft::new("F1", "A", "alpha")).unwrap();
    fx.app.save_macro(MacroDraft::new("F2", "B", "beta")).unwrap();

    assert!(matches!(fx.app.toggle_pause(), PauseChange::Paused));
    assert_eq!(fx.app.status_line(), "⏸ Paused • 2 macros loaded");
    assert!(fx.backend.installed().is_empty());

    match fx.app.toggle_pause() {
        PauseChange::Resumed(report) => assert_eq!(report.installed, 2),
        PauseChange::Paused => panic!("expected resume"),
    }
    assert_eq!(fx.app.status_line(), "▶ Playing • 2 macros loaded");
    assert_eq!(fx.backend.installed(), vec!["F1", "F2"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_auto_enter_is_persisted() {
    let mut fx = fixture();
    fx.app.save_macro(MacroDraft::new("F1", "A", "alpha")).unwrap();

    fx.app.set_auto_enter(true).unwrap();

    assert!(fx.app.settings().auto_enter());
    assert_eq!(fx.stored()["auto_enter"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_speed_is_persisted() {
    let mut fx = fixture();
    let path = fx.dir.path().join("settings.json");

    let apply = |app: &mut KeybinderApp, line: &str| line.parse::<Command>().unwrap().apply(app);
    apply(&mut fx.app, "speed 0.25").unwrap();

    assert_eq!(fx.app.settings().per_char_delay(), Some(0.25));
    let saved = ConfigManager::load(&path).unwrap();
    assert_eq!(saved.typing.per_char_delay_secs, 0.25);
    assert_eq!(saved.typing.initial_delay_secs, 0.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pipe_hotkey_from_console() {
    let mut fx = fixture();

    let apply = |app: &mut KeybinderApp, line: &str| line.parse::<Command>().unwrap().apply(app);
    apply(&mut fx.app, r"save \| | Pipe | a\|b").unwrap();

    let record = fx.app.get("|").unwrap();
    assert_eq!(record.label, "Pipe");
    assert_eq!(record.text, "a|b");
    assert_eq!(fx.backend.installed(), vec!["|"]);

    let Reply::Message(keys) = apply(&mut fx.app, "keys").unwrap() else {
        panic!("expected a message");
    };
    assert!(keys.contains("|*"));
    assert!(keys.contains(" F1 "));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_console_commands() {
    let mut fx = fixture();

    let apply = |app: &mut KeybinderApp, line: &str| line.parse::<Command>().unwrap().apply(app);

    let reply = apply(&mut fx.app, r"save F1 | Two lines | first\nsecond").unwrap();
    assert!(matches!(reply, Reply::Message(ref m) if m.contains("Two lines")));
    assert_eq!(fx.app.get("F1").unwrap().text, "first\nsecond");

    let reply = apply(&mut fx.app, "list").unwrap();
    assert_eq!(reply, Reply::Message("  [F1] Two lines".to_string()));

    apply(&mut fx.app, "move F1 F3").unwrap();
    assert!(fx.app.get("F3").is_some());

    apply(&mut fx.app, "speed 0").unwrap();
    assert_eq!(fx.app.settings().per_char_delay(), Some(0.0));

    apply(&mut fx.app, "pause").unwrap();
    assert!(fx.app.is_paused());
    apply(&mut fx.app, "resume").unwrap();
    assert!(!fx.app.is_paused());

    let err = apply(&mut fx.app, "delete F1").unwrap_err();
    assert_eq!(err.code(), ErrorCode::MacroNotFound);

    assert_eq!(apply(&mut fx.app, "quit").unwrap(), Reply::Quit);
}
