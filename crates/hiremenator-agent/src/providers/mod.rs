// ABOUTME: Provider module aggregating generative backend adapters.
// ABOUTME: Each sub-module implements Backend for a specific model API.

pub mod gemini;

pub use gemini::GeminiBackend;

use crate::context::DelegationContext;

/// Longest slice of a context entry repeated back to the model.
const MAX_CONTEXT_ENTRY_LEN: usize = 2000;

/// Render gathered context as a block appended to the system instruction.
/// Shared across providers so every adapter shows the model the same view.
pub fn context_block(context: &DelegationContext) -> Option<String> {
    if context.is_empty() {
        return None;
    }

    let mut out = String::from("[Shared context]\n");
    for (key, entry) in context.iter() {
        let text = truncate(&entry.text, MAX_CONTEXT_ENTRY_LEN);
        out.push_str(&format!("- {} (from {}): {}\n", key, entry.source, text));
    }
    Some(out)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextEntry;

    #[test]
    fn empty_context_has_no_block() {
        assert!(context_block(&DelegationContext::new()).is_none());
    }

    #[test]
    fn block_lists_entries_by_key() {
        let mut ctx = DelegationContext::new();
        ctx.insert("googlecvdata", ContextEntry::text("googlecv", "enriched bullets"));
        ctx.insert("cvdata", ContextEntry::unavailable("cv_agent", "backend unavailable"));

        let block = context_block(&ctx).unwrap();
        assert!(block.starts_with("[Shared context]"));
        assert!(block.contains("- cvdata (from cv_agent): Not Available: backend unavailable"));
        assert!(block.contains("- googlecvdata (from googlecv): enriched bullets"));
    }

    #[test]
    fn long_entries_are_truncated() {
        let long = "é".repeat(MAX_CONTEXT_ENTRY_LEN + 10);
        let cut = truncate(&long, MAX_CONTEXT_ENTRY_LEN);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), MAX_CONTEXT_ENTRY_LEN + 3);
    }
}
