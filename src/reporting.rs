use crate::aggregate::AggregateDocument;
use crate::errors::GhClipError;
use crate::trie::{Trie, TrieNode};
use std::io::Write;
use tiktoken_rs::get_bpe_from_model;
use tracing::debug;

/// Token count of each aggregated block, header included.
pub fn count_tokens(
    document: &AggregateDocument,
    model: &str,
) -> Result<Vec<(String, usize)>, GhClipError> {
    debug!("Counting tokens with the {} encoding", model);
    let bpe = get_bpe_from_model(model).map_err(|e| GhClipError::TokenizerError(e.to_string()))?;
    Ok(document
        .entries()
        .iter()
        .map(|entry| {
            let tokens = bpe.encode_ordinary(&entry.render()).len();
            (entry.qualified_name.clone(), tokens)
        })
        .collect())
}

pub fn write_stats<W: Write>(out: &mut W, counts: &[(String, usize)]) -> Result<(), GhClipError> {
    let mut trie = Trie::new();
    for (name, tokens) in counts {
        trie.insert(name, *tokens);
    }
    writeln!(out, "Overall ({} tokens)", trie.root().total_tokens())?;
    write_tree(out, trie.root(), "")?;
    Ok(())
}

fn write_tree<W: Write>(out: &mut W, node: &TrieNode, prefix: &str) -> Result<(), GhClipError> {
    let count = node.children.len();
    for (i, (name, child)) in node.children.iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "┗━━" } else { "┣━━" };
        if child.is_leaf() {
            writeln!(
                out,
                "{}{} {} {} ({} tokens)",
                prefix,
                connector,
                file_icon(name),
                name,
                child.total_tokens()
            )?;
        } else {
            writeln!(
                out,
                "{}{} 📂 {} ({} tokens)",
                prefix,
                connector,
                name,
                child.total_tokens()
            )?;
            let child_prefix = format!("{}{}    ", prefix, if is_last { " " } else { "┃" });
            write_tree(out, child, &child_prefix)?;
        }
    }
    Ok(())
}

pub fn file_icon(name: &str) -> &'static str {
    match name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("py" | "pyi") => "🐍",
        Some("rs") => "🦀",
        Some("js" | "jsx") => "🟨",
        Some("ts" | "tsx") => "🔷",
        Some("html" | "htm") => "🌐",
        Some("css" | "scss" | "sass") => "🎨",
        Some("go") => "🐹",
        Some("json") => "🔖",
        Some("yaml" | "yml") => "🗂️",
        Some("toml" | "ini" | "conf") => "⚙️",
        Some("md" | "markdown") => "📝",
        Some("sh" | "bash" | "zsh") => "🐚",
        Some("lock") => "🔒",
        _ => "📄",
    }
}
