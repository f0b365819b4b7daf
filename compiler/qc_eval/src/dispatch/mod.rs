//! Keyword dispatch.
//!
//! [`KeywordTrie`] is a character trie keyed by instruction keyword.
//! [`DispatchTable`] wraps a trie of [`Handler`]s and is built once per
//! interpreter; there is no process-wide table.

use std::collections::BTreeMap;

use crate::handlers::{self, Handler};

struct TrieNode<T> {
    children: BTreeMap<char, TrieNode<T>>,
    value: Option<T>,
}

impl<T> TrieNode<T> {
    fn new() -> Self {
        TrieNode {
            children: BTreeMap::new(),
            value: None,
        }
    }

    fn collect_keys(&self, prefix: &mut String, out: &mut Vec<String>) {
        if self.value.is_some() {
            out.push(prefix.clone());
        }
        for (ch, child) in &self.children {
            prefix.push(*ch);
            child.collect_keys(prefix, out);
            prefix.pop();
        }
    }

    /// Remove `key[..]` below this node, pruning branches left empty.
    fn remove(&mut self, mut chars: std::str::Chars<'_>) -> Option<T> {
        match chars.next() {
            None => self.value.take(),
            Some(ch) => {
                let child = self.children.get_mut(&ch)?;
                let removed = child.remove(chars);
                if child.value.is_none() && child.children.is_empty() {
                    self.children.remove(&ch);
                }
                removed
            }
        }
    }
}

/// Character trie mapping keywords to values.
pub struct KeywordTrie<T> {
    root: TrieNode<T>,
    len: usize,
}

impl<T> KeywordTrie<T> {
    pub fn new() -> Self {
        KeywordTrie {
            root: TrieNode::new(),
            len: 0,
        }
    }

    /// Insert `key`, returning the value it replaced.
    pub fn insert(&mut self, key: &str, value: T) -> Option<T> {
        let mut node = &mut self.root;
        for ch in key.chars() {
            node = node.children.entry(ch).or_insert_with(TrieNode::new);
        }
        let previous = node.value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Exact-match lookup.
    pub fn retrieve(&self, key: &str) -> Option<&T> {
        self.node(key)?.value.as_ref()
    }

    /// Whether `key` is present as a whole key (not just a prefix).
    pub fn contains(&self, key: &str) -> bool {
        self.retrieve(key).is_some()
    }

    /// All keys starting with `prefix`, in lexicographic order.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut keys = Vec::new();
        if let Some(node) = self.node(prefix) {
            let mut buffer = prefix.to_string();
            node.collect_keys(&mut buffer, &mut keys);
        }
        keys
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let removed = self.root.remove(key.chars());
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn node(&self, key: &str) -> Option<&TrieNode<T>> {
        let mut node = &self.root;
        for ch in key.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }
}

impl<T> Default for KeywordTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Keyword → handler table consulted once per executed instruction.
pub struct DispatchTable {
    handlers: KeywordTrie<Handler>,
}

impl DispatchTable {
    /// A table with no handlers.
    pub fn empty() -> Self {
        DispatchTable {
            handlers: KeywordTrie::new(),
        }
    }

    /// A table with every built-in keyword registered.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        handlers::register_builtins(&mut table);
        table
    }

    /// Register `handler` for `keyword`, replacing any existing handler.
    pub fn insert(&mut self, keyword: &str, handler: Handler) {
        self.handlers.insert(keyword, handler);
    }

    #[inline]
    pub fn retrieve(&self, keyword: &str) -> Option<Handler> {
        self.handlers.retrieve(keyword).copied()
    }

    #[inline]
    pub fn contains(&self, keyword: &str) -> bool {
        self.handlers.contains(keyword)
    }

    /// All registered keywords.
    pub fn keywords(&self) -> Vec<String> {
        self.handlers.keys_with_prefix("")
    }

    /// Registered keywords that `keyword` may have been meant as.
    ///
    /// Case is ignored. Otherwise the longest prefix of `keyword` shared
    /// with at least one registered keyword picks the candidates.
    pub fn suggestions(&self, keyword: &str) -> Vec<String> {
        let upper = keyword.to_uppercase();
        if upper != keyword && self.contains(&upper) {
            return vec![upper];
        }
        let mut end = upper.len();
        while end > 0 {
            let candidates = self.handlers.keys_with_prefix(&upper[..end]);
            if !candidates.is_empty() {
                return candidates;
            }
            end = upper[..end].char_indices().last().map_or(0, |(i, _)| i);
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests;
