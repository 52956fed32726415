//! Directory source through the dispatcher.

use reacto::{
    DispatcherConfig, Emoji, LoadReport, MessageRef, UserId,
    hooks::HOOK_HANDLER_NAME,
    sources::{ActionCatalog, DirectorySource},
    testing::LogRecord,
};
use std::fs;

mod common;
use common::{event, harness_with};

fn catalog() -> ActionCatalog<MessageRef> {
    ActionCatalog::new()
        .register("star", |_: &MessageRef, e: &Emoji, _: &UserId| e.as_str() == "⭐")
        .register("thumbs", |_: &MessageRef, e: &Emoji, _: &UserId| e.as_str() == "👍")
}

#[tokio::test]
async fn test_loads_manifests_from_configured_location() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("10-star.toml"), "name = \"star-board\"\naction = \"star\"\n").unwrap();
    fs::write(dir.path().join("20-thumbs.toml"), "name = \"votes\"\naction = \"thumbs\"\n").unwrap();
    fs::write(dir.path().join("30-broken.toml"), "name = 7\naction = \"star\"\n").unwrap();

    let h = harness_with(DispatcherConfig::default().with_plugin_location(dir.path()));
    let source = DirectorySource::new(catalog());
    let report = h.dispatcher.load(&source).await;

    assert_eq!(
        report,
        LoadReport {
            loaded: 2,
            rejected: 1,
            source_failed: false
        }
    );
    assert_eq!(
        h.dispatcher.handlers(),
        vec!["star-board", "votes", HOOK_HANDLER_NAME]
    );

    let failures = h.log.load_failures();
    assert_eq!(failures.len(), 1);
    assert!(matches!(
        &failures[0],
        LogRecord::HandlerLoadFailed { origin, .. } if origin.ends_with("30-broken.toml")
    ));

    assert!(h.dispatcher.dispatch(&event("👍")));
    assert_eq!(h.statistics.count("votes"), 1);
}

#[tokio::test]
async fn test_reload_picks_up_edited_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("plugin.toml");
    fs::write(&manifest, "name = \"reacts\"\naction = \"star\"\n").unwrap();

    let h = harness_with(DispatcherConfig::default().with_plugin_location(dir.path()));
    let source = DirectorySource::new(catalog());
    h.dispatcher.load(&source).await;
    assert!(h.dispatcher.dispatch(&event("⭐")));
    assert!(!h.dispatcher.dispatch(&event("👍")));

    fs::write(&manifest, "name = \"reacts\"\naction = \"thumbs\"\n").unwrap();
    h.dispatcher.load(&source).await;
    assert!(!h.dispatcher.dispatch(&event("⭐")));
    assert!(h.dispatcher.dispatch(&event("👍")));
}

#[tokio::test]
async fn test_missing_directory_keeps_hook_responder() {
    let dir = tempfile::tempdir().unwrap();
    let h = harness_with(DispatcherConfig::default().with_plugin_location(dir.path().join("absent")));
    let report = h.dispatcher.load(&DirectorySource::new(catalog())).await;

    assert!(report.source_failed);
    assert_eq!(h.dispatcher.handlers(), vec![HOOK_HANDLER_NAME]);

    let io_error = fs::read_dir(dir.path().join("absent")).unwrap_err().to_string();
    let failures = h.log.load_failures();
    assert_eq!(failures.len(), 1);
    assert!(matches!(
        &failures[0],
        LogRecord::LoadFailed { cause, .. } if cause.contains(&io_error)
    ));
}

#[tokio::test]
async fn test_unparsable_manifest_logs_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.toml"), "name = [unterminated").unwrap();
    fs::write(dir.path().join("fine.toml"), "name = \"stars\"\naction = \"star\"\n").unwrap();
    let parse_error = "name = [unterminated"
        .parse::<toml::Table>()
        .unwrap_err()
        .to_string();

    let h = harness_with(DispatcherConfig::default().with_plugin_location(dir.path()));
    let report = h.dispatcher.load(&DirectorySource::new(catalog())).await;
    assert_eq!(report.loaded, 1);
    assert_eq!(report.rejected, 1);

    let failures = h.log.load_failures();
    assert_eq!(failures.len(), 1);
    let LogRecord::HandlerLoadFailed { origin, cause, .. } = &failures[0] else {
        unreachable!()
    };
    assert!(origin.ends_with("broken.toml"));
    assert!(
        cause.contains(&parse_error),
        "cause {cause:?} does not carry the parse error"
    );
}
