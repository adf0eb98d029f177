//! Message → reply resolution.
//!
//! A [`Responder`] owns all conversational state (FAQ matcher, fact store,
//! transcript) and turns one raw message into one reply:
//!
//! 1. normalize the message;
//! 2. try the FAQ matcher;
//! 3. otherwise run the ordered intent rules, reading or writing facts;
//! 4. otherwise echo the message back;
//! 5. append the user and bot turns to the transcript.
//!
//! [`SharedResponder`] wraps it for transports that serve requests
//! concurrently.

use crate::config::BotConfig;
use crate::faq::{FaqCatalog, FaqMatcher, TypoTable};
use crate::intent::{self, Intent};
use crate::memory::{FactKey, FactSink, FactStore, JsonFactSink, Role, Transcript};
use crate::text::normalize;
use std::sync::{Arc, Mutex, PoisonError};

/// Header line of the memory dump reply.
pub const MEMORY_HEADER: &str = "🧠 Here is what I remember so far:";

const HELP_INTRO: &str = "ℹ️ You can introduce yourself (\"My name is...\"), company (\"I work at...\"), \
city (\"I live in...\"), or preference (\"I like...\").\n\
Ask \"What is my name?\" to check what I know, say \"forget my name\" to erase it, \
or type \"memory\" to see our recent chat.";

/// Single-conversation responder.
#[derive(Debug)]
pub struct Responder {
    faq: FaqMatcher,
    facts: FactStore,
    transcript: Transcript,
    signature: String,
}

impl Responder {
    #[must_use]
    pub fn new(faq: FaqMatcher, facts: FactStore, transcript: Transcript) -> Self {
        Self {
            faq,
            facts,
            transcript,
            signature: String::new(),
        }
    }

    /// Line appended to the fallback echo reply.
    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    /// Build a responder from configuration, persisting facts to the
    /// configured JSON file.
    #[must_use]
    pub fn from_config(config: &BotConfig) -> Self {
        let sink = JsonFactSink::new(config.storage.facts_path());
        Self::from_config_with_sink(config, Box::new(sink))
    }

    /// Build a responder from configuration with an explicit fact sink.
    #[must_use]
    pub fn from_config_with_sink(config: &BotConfig, sink: Box<dyn FactSink>) -> Self {
        let catalog = FaqCatalog::load(&config.storage.faq_path());
        let mut typos = TypoTable::builtin();
        typos.extend(&config.faq.typos);
        let faq = FaqMatcher::new(catalog, typos).with_max_distance(config.faq.max_distance);

        Self::new(
            faq,
            FactStore::load(sink),
            Transcript::new(config.transcript.max_entries),
        )
        .with_signature(config.replies.signature.clone())
    }

    /// Resolve one raw message to a reply and record the exchange.
    pub fn respond(&mut self, raw: &str) -> String {
        let normalized = normalize(raw);
        self.respond_normalized(raw, &normalized)
    }

    /// [`Responder::respond`] with normalization already done by the caller.
    pub(crate) fn respond_normalized(&mut self, raw: &str, normalized: &str) -> String {
        let reply = self.resolve(raw, normalized);
        self.transcript.push(Role::User, raw);
        self.transcript.push(Role::Bot, reply.clone());
        reply
    }

    #[must_use]
    pub fn facts(&self) -> &FactStore {
        &self.facts
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    #[must_use]
    pub fn faq(&self) -> &FaqMatcher {
        &self.faq
    }

    fn resolve(&mut self, raw: &str, normalized: &str) -> String {
        if let Some(hit) = self.faq.resolve(normalized) {
            tracing::debug!(key = hit.key, via = ?hit.via, distance = hit.distance, "faq match");
            return hit.answer.to_owned();
        }

        match intent::classify(normalized) {
            Some(intent) => {
                tracing::debug!(?intent, "intent match");
                self.handle(intent, raw, normalized)
            }
            None => {
                tracing::debug!("no intent matched, echoing");
                self.fallback(raw)
            }
        }
    }

    fn handle(&mut self, intent: Intent, raw: &str, normalized: &str) -> String {
        match intent {
            Intent::Declare(key) => self.declare(key, raw, normalized),
            Intent::Query(key) => intent::field(key).query_reply(self.facts.get(key)),
            Intent::Forget(key) => {
                self.persist(key, |facts| facts.clear(key));
                intent::field(key).forgotten.to_owned()
            }
            Intent::Help => self.help(),
            Intent::Memory => format!("{MEMORY_HEADER}\n{}", self.transcript.render()),
        }
    }

    fn declare(&mut self, key: FactKey, raw: &str, normalized: &str) -> String {
        let field = intent::field(key);
        let value = intent::capture_value(raw, normalized, field.declare_prefix);
        if normalize(&value).is_empty() {
            return field.incomplete.to_owned();
        }
        let reply = field.stored_reply(&value);
        self.persist(key, |facts| facts.set(key, value));
        reply
    }

    /// Apply a fact mutation. Persistence failures are logged; the in-memory
    /// value stands and the user still gets the acknowledgement.
    fn persist(&mut self, key: FactKey, op: impl FnOnce(&mut FactStore) -> crate::Result<()>) {
        if let Err(e) = op(&mut self.facts) {
            tracing::warn!(fact = %key, "fact updated in memory but not persisted: {e}");
        }
    }

    fn help(&self) -> String {
        let catalog = self.faq.catalog();
        if catalog.is_empty() {
            return HELP_INTRO.to_owned();
        }
        let topics = catalog
            .keys()
            .map(|k| format!("\"{k}\""))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{HELP_INTRO}\nYou can also type {topics} to get quick info.")
    }

    fn fallback(&self, raw: &str) -> String {
        if self.signature.is_empty() {
            format!("You said: \"{raw}\"")
        } else {
            format!("You said: \"{raw}\"\n\n{}", self.signature)
        }
    }
}

/// A [`Responder`] behind one mutex.
///
/// The lock covers the whole state-mutation sequence of a request (FAQ and
/// intent resolution, fact write-through, transcript append). Normalization
/// is pure and runs before the lock is taken.
#[derive(Debug, Clone)]
pub struct SharedResponder {
    inner: Arc<Mutex<Responder>>,
}

impl SharedResponder {
    #[must_use]
    pub fn new(responder: Responder) -> Self {
        Self {
            inner: Arc::new(Mutex::new(responder)),
        }
    }

    pub fn respond(&self, raw: &str) -> String {
        let normalized = normalize(raw);
        // A panic mid-request leaves every field individually valid.
        let mut responder = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        responder.respond_normalized(raw, &normalized)
    }

    /// Run `f` with read access to the responder.
    pub fn with<R>(&self, f: impl FnOnce(&Responder) -> R) -> R {
        let responder = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&responder)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::memory::{Facts, MemoryFactSink};

    fn responder_with(catalog: FaqCatalog, sink: MemoryFactSink) -> Responder {
        Responder::new(
            FaqMatcher::new(catalog, TypoTable::builtin()),
            FactStore::load(Box::new(sink)),
            Transcript::default(),
        )
        .with_signature("sig")
    }

    fn responder() -> Responder {
        responder_with(FaqCatalog::builtin(), MemoryFactSink::new())
    }

    #[test]
    fn fact_lifecycle() {
        let mut bot = responder();
        assert!(bot.respond("My name is Alice").contains("Alice"));
        assert!(bot.respond("What is my name?").contains("Alice"));
        assert_eq!(bot.respond("forget my name"), "🧹 I've forgotten your name.");
        assert_eq!(bot.respond("What is my name"), "❓ I don't know your name yet.");
    }

    #[test]
    fn declare_writes_through_to_sink() {
        let sink = MemoryFactSink::new();
        let mut bot = responder_with(FaqCatalog::builtin(), sink.clone());
        bot.respond("I live in São Paulo");
        assert_eq!(
            sink.saved().and_then(|f| f.city),
            Some("São Paulo".to_owned())
        );
    }

    #[test]
    fn loads_previously_persisted_facts() {
        let sink = MemoryFactSink::with_facts(Facts {
            preference: Some("sushi".to_owned()),
            ..Facts::default()
        });
        let mut bot = responder_with(FaqCatalog::builtin(), sink);
        assert_eq!(bot.respond("what do I like"), "🧠 You like sushi.");
    }

    #[test]
    fn empty_declare_is_not_stored() {
        let sink = MemoryFactSink::new();
        let mut bot = responder_with(FaqCatalog::builtin(), sink.clone());
        assert_eq!(
            bot.respond("I work at!"),
            "❓ Tell me where you work after \"I work at\"."
        );
        assert!(sink.saved().is_none());
        assert_eq!(bot.facts().get(FactKey::Company), None);
    }

    #[test]
    fn faq_is_checked_before_intents() {
        let catalog = FaqCatalog::from_entries([("help", "FAQ help answer")]);
        let mut bot = responder_with(catalog, MemoryFactSink::new());
        assert_eq!(bot.respond("Help?"), "FAQ help answer");
    }

    #[test]
    fn fuzzy_and_typo_faq() {
        let mut bot = responder();
        let price = FaqCatalog::builtin().answer("price").unwrap().to_owned();
        assert_eq!(bot.respond("Pirce?"), price);
        assert_eq!(bot.respond("prics"), price);
    }

    #[test]
    fn fallback_echoes_raw_text() {
        let mut bot = responder();
        assert_eq!(bot.respond("Good Morning!"), "You said: \"Good Morning!\"\n\nsig");
        assert_eq!(bot.respond("   "), "You said: \"   \"\n\nsig");
    }

    #[test]
    fn fallback_without_signature() {
        let mut bot = responder().with_signature("");
        assert_eq!(bot.respond("zzz"), "You said: \"zzz\"");
    }

    #[test]
    fn help_lists_faq_topics() {
        let mut bot = responder();
        let reply = bot.respond("help");
        assert!(reply.starts_with("ℹ️"));
        assert!(reply.contains("\"catalog\", \"delivery\", \"price\""));

        let mut bare = responder_with(FaqCatalog::default(), MemoryFactSink::new());
        assert!(!bare.respond("help").contains("quick info"));
    }

    #[test]
    fn memory_renders_prior_exchanges_only() {
        let mut bot = responder();
        assert_eq!(bot.respond("memory"), format!("{MEMORY_HEADER}\n(empty)"));
        let reply = bot.respond("memory");
        assert!(reply.contains("user: memory"));
        assert_eq!(bot.transcript().len(), 4);
    }

    #[test]
    fn identical_normalized_inputs_resolve_identically() {
        let mut a = responder();
        let mut b = responder();
        assert_eq!(a.respond("WHERE do I live?!"), b.respond("where do i live"));
        assert_eq!(a.respond("Delivery。"), b.respond("delivery"));
    }

    #[test]
    fn shared_responder_serializes_requests() {
        let shared = SharedResponder::new(responder());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                std::thread::spawn(move || shared.respond(&format!("I like item {i}")))
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread");
        }
        shared.with(|bot| {
            assert_eq!(bot.transcript().len(), 10);
            let roles: Vec<Role> = bot.transcript().entries().map(|t| t.role).collect();
            for pair in roles.chunks(2) {
                assert_eq!(pair, [Role::User, Role::Bot]);
            }
            assert!(bot.facts().get(FactKey::Preference).is_some());
        });
    }
}
