use std::collections::BTreeMap;
use tracing::trace;

/// A node of the path trie; leaves carry a token count.
#[derive(Debug, Default)]
pub struct TrieNode {
    pub children: BTreeMap<String, TrieNode>,
    pub token_count: Option<usize>,
}

impl TrieNode {
    pub fn total_tokens(&self) -> usize {
        self.token_count.unwrap_or(0)
            + self
                .children
                .values()
                .map(TrieNode::total_tokens)
                .sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Groups `/`-separated names into a tree.
#[derive(Debug, Default)]
pub struct Trie {
    root: TrieNode,
}

impl Trie {
    pub fn new() -> Self {
        Trie::default()
    }

    pub fn insert(&mut self, path: &str, token_count: usize) {
        let mut node = &mut self.root;
        for component in path.split('/').filter(|c| !c.is_empty()) {
            node = node.children.entry(component.to_owned()).or_default();
        }
        if node.token_count.is_some() {
            trace!("Overwriting token count for {}", path);
        }
        node.token_count = Some(token_count);
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }
}
