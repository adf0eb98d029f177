#![allow(clippy::unwrap_used, clippy::expect_used)]

use memobot::Responder;
use memobot::config::{BotConfig, StorageConfig};
use memobot::memory::{FactKey, FactStore, Facts, JsonFactSink};
use std::path::Path;

fn cfg_for(root: &Path) -> BotConfig {
    BotConfig {
        storage: StorageConfig {
            data_dir: root.to_path_buf(),
            ..StorageConfig::default()
        },
        ..BotConfig::default()
    }
}

#[test]
fn facts_survive_a_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = cfg_for(dir.path());

    {
        let mut bot = Responder::from_config(&config);
        bot.respond("My name is Ada");
        bot.respond("I live in London");
    }

    let mut bot = Responder::from_config(&config);
    assert_eq!(bot.respond("what is my name"), "🧠 Your name is Ada.");
    assert_eq!(bot.respond("where do I live"), "🧠 You live in London.");
    // The transcript is not persisted.
    assert_eq!(bot.transcript().len(), 4);
}

#[test]
fn forget_is_written_through() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = cfg_for(dir.path());

    let mut bot = Responder::from_config(&config);
    bot.respond("I work at Acme");
    bot.respond("forget company");

    let raw = std::fs::read_to_string(config.storage.facts_path()).expect("read facts");
    let stored: Facts = serde_json::from_str(&raw).expect("parse facts");
    assert_eq!(stored.company, None);
}

#[test]
fn captured_value_keeps_original_casing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = cfg_for(dir.path());

    let mut bot = Responder::from_config(&config);
    bot.respond("I like McDonald's Fries");

    let store = FactStore::load(Box::new(JsonFactSink::new(config.storage.facts_path())));
    assert_eq!(store.get(FactKey::Preference), Some("McDonald's Fries"));
}

#[test]
fn corrupt_fact_file_starts_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = cfg_for(dir.path());
    std::fs::write(config.storage.facts_path(), "{ not json").expect("write");

    let mut bot = Responder::from_config(&config);
    assert_eq!(bot.respond("what is my name"), "❓ I don't know your name yet.");

    bot.respond("My name is Grace");
    let reloaded = Responder::from_config(&config);
    assert_eq!(reloaded.facts().get(FactKey::Name), Some("Grace"));
}

#[test]
fn config_file_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let mut config = cfg_for(dir.path());
    config.transcript.max_entries = 4;
    config.replies.signature = String::new();
    config.save_to_file(&path).expect("save");

    let loaded = BotConfig::load_or_default(Some(&path)).expect("load");
    assert_eq!(loaded.transcript.max_entries, 4);
    assert_eq!(loaded.storage.data_dir, dir.path());

    let mut bot = Responder::from_config(&loaded);
    assert_eq!(bot.respond("zzz"), "You said: \"zzz\"");
}
