#![allow(clippy::unwrap_used, clippy::expect_used)]

use memobot::config::{BotConfig, StorageConfig};
use memobot::faq::FaqCatalog;
use memobot::memory::MemoryFactSink;
use memobot::responder::MEMORY_HEADER;
use memobot::{Responder, SharedResponder};
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

fn ephemeral_bot(root: &Path) -> Responder {
    FaqCatalog::builtin()
        .save(&root.join("faq.json"))
        .expect("write faq");
    Responder::from_config_with_sink(&cfg_for(root), Box::new(MemoryFactSink::new()))
}

#[test]
fn conversation_covers_every_fact_field() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut bot = ephemeral_bot(dir.path());

    assert_eq!(
        bot.respond("My name is Alice"),
        "👌 Nice to meet you, Alice! I'll remember your name."
    );
    bot.respond("I work at Acme Corp");
    bot.respond("I live in Lisbon");
    bot.respond("I like green tea");

    assert_eq!(bot.respond("What is my name?"), "🧠 Your name is Alice.");
    assert_eq!(bot.respond("What company do I work for?"), "🧠 You work at Acme Corp.");
    assert_eq!(bot.respond("Where do I live?"), "🧠 You live in Lisbon.");
    assert_eq!(bot.respond("What do I like?"), "🧠 You like green tea.");

    bot.respond("forget my city");
    assert_eq!(bot.respond("where do i live"), "❓ I don't know where you live yet.");
    assert_eq!(bot.respond("What is my name"), "🧠 Your name is Alice.");
}

#[test]
fn redeclaring_overwrites_previous_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut bot = ephemeral_bot(dir.path());

    bot.respond("My name is Alice");
    bot.respond("My name is Bob");
    assert_eq!(bot.respond("what is my name"), "🧠 Your name is Bob.");
}

#[test]
fn memory_shows_only_the_last_ten_turns() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut bot = ephemeral_bot(dir.path());

    for i in 0..7 {
        bot.respond(&format!("I like snack {i}"));
    }
    let reply = bot.respond("memory");
    let lines: Vec<&str> = reply.lines().collect();

    assert_eq!(lines[0], MEMORY_HEADER);
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[1], "user: I like snack 2");
    assert_eq!(
        lines[10],
        "bot: ⭐ Nice! I'll remember that you like snack 6."
    );
    assert_eq!(bot.transcript().len(), 10);
}

#[test]
fn faq_answers_take_precedence_and_tolerate_typos() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut bot = ephemeral_bot(dir.path());
    let catalog = FaqCatalog::builtin();

    assert_eq!(bot.respond("Delivery?"), catalog.answer("delivery").unwrap());
    assert_eq!(bot.respond("catlog"), catalog.answer("catalog").unwrap());
    assert_eq!(bot.respond("delivey"), catalog.answer("delivery").unwrap());
}

#[test]
fn missing_faq_file_disables_faq_without_failing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = cfg_for(dir.path());
    let mut bot = Responder::from_config_with_sink(&config, Box::new(MemoryFactSink::new()));

    assert!(bot.faq().catalog().is_empty());
    assert!(bot.respond("price").starts_with("You said: \"price\""));
}

#[test]
fn configured_typos_extend_the_builtin_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    FaqCatalog::from_entries([("opening hours", "9 to 5")])
        .save(&dir.path().join("faq.json"))
        .expect("write faq");
    let mut config = cfg_for(dir.path());
    config
        .faq
        .typos
        .insert("When Open".to_owned(), "Opening Hours".to_owned());
    let mut bot = Responder::from_config_with_sink(&config, Box::new(MemoryFactSink::new()));

    assert_eq!(bot.respond("when open?"), "9 to 5");
    assert_eq!(bot.respond("openin hour"), "9 to 5");
}

#[test]
fn shared_responder_keeps_one_conversation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let shared = SharedResponder::new(ephemeral_bot(dir.path()));
    let other = shared.clone();

    shared.respond("I work at Initech");
    assert_eq!(other.respond("what company"), "🧠 You work at Initech.");
    assert_eq!(shared.with(|bot| bot.transcript().len()), 4);
}
