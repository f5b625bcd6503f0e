// ABOUTME: Conversation turns, the keyed delegation context and the AgentReply returned by dispatch.
// ABOUTME: Context entries are keyed by output key so concurrent children merge order-independently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use hiremenator_core::schema::{NOT_AVAILABLE, ParsedOutput};
use hiremenator_core::search::SearchResult;

/// A request from the model to run one of the agent's children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildCall {
    /// Tool name: an agent name or the search tool name.
    pub name: String,
    /// Free-text request for an agent, or the query for search.
    pub input: String,
}

impl ChildCall {
    pub fn new(name: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
        }
    }
}

/// What a child produced, fed back to the calling model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildResult {
    pub name: String,
    pub output: String,
}

/// One entry of an agent's conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "snake_case")]
pub enum Turn {
    User(String),
    Model(String),
    Calls(Vec<ChildCall>),
    Results(Vec<ChildResult>),
}

/// Output of one child, stored under that child's output key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
    /// Name of the agent or tool that produced the entry.
    pub source: String,
    pub text: String,
    /// Raw search hits, for entries produced by the search tool.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<SearchResult>,
    /// False when the child failed and `text` explains what is missing.
    pub available: bool,
}

impl ContextEntry {
    pub fn text(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
            results: Vec::new(),
            available: true,
        }
    }

    pub fn search(source: impl Into<String>, text: impl Into<String>, results: Vec<SearchResult>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
            results,
            available: true,
        }
    }

    /// An entry standing in for a child that could not deliver.
    pub fn unavailable(source: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self {
            source: source.into(),
            text: format!("{NOT_AVAILABLE}: {reason}"),
            results: Vec::new(),
            available: false,
        }
    }
}

/// Shared results visible to an agent and its parent, keyed by output key.
///
/// A `BTreeMap` keeps serialization and iteration independent of the order
/// in which concurrent children finished.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DelegationContext {
    entries: BTreeMap<String, ContextEntry>,
}

impl DelegationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an entry, replacing any earlier one under the same key.
    pub fn insert(&mut self, key: impl Into<String>, entry: ContextEntry) {
        self.entries.insert(key.into(), entry);
    }

    /// Add an entry, combining it with any existing entry under the same key.
    ///
    /// Texts are joined, search results appended, and the combined entry is
    /// only available if both parts were.
    pub fn absorb(&mut self, key: impl Into<String>, entry: ContextEntry) {
        match self.entries.entry(key.into()) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(entry);
            }
            std::collections::btree_map::Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                existing.text = format!("{}\n\n{}", existing.text, entry.text);
                existing.results.extend(entry.results);
                existing.available &= entry.available;
            }
        }
    }

    /// Every search result held by any entry, in key order.
    pub fn all_results(&self) -> Vec<SearchResult> {
        self.entries
            .values()
            .flat_map(|e| e.results.iter().cloned())
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&ContextEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Output keys of entries that could not be produced.
    pub fn unavailable_keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, e)| !e.available)
            .map(|(k, _)| k.clone())
            .collect()
    }
}

/// The final answer of one agent run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentReply {
    pub agent: String,
    pub output_key: String,
    pub text: String,
    /// Everything the agent's subtree produced, keyed by output key.
    pub context: DelegationContext,
    /// Output keys whose data could not be retrieved.
    pub incomplete: Vec<String>,
    /// Schema fields, when output validation is switched on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedOutput>,
}
