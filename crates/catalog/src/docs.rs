// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! `{% docs name %}...{% enddocs %}` blocks and `{{ doc('name') }}` expansion

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static DOCS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{%-?\s*docs\s+([\w-]+)\s*-?%\}(.*?)\{%-?\s*enddocs\s*-?%\}")
        .expect("valid docs block regex")
});

static DOC_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*doc\(\s*['"]([\w-]+)['"]\s*\)\s*\}\}"#).expect("valid doc call regex")
});

/// Docs block name → trimmed content
#[derive(Debug, Clone, Default)]
pub(crate) struct DocsBlocks {
    blocks: HashMap<String, String>,
}

impl DocsBlocks {
    /// Add every block found in `text`; later blocks replace earlier ones
    pub(crate) fn collect(&mut self, text: &str) {
        for caps in DOCS_BLOCK.captures_iter(text) {
            self.blocks
                .insert(caps[1].to_string(), caps[2].trim().to_string());
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Substitute `{{ doc('name') }}` calls; unknown names are left as written
    pub(crate) fn expand(&self, description: &str) -> String {
        DOC_CALL
            .replace_all(description, |caps: &Captures<'_>| {
                self.blocks
                    .get(&caps[1])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_multiple_blocks() {
        let mut docs = DocsBlocks::default();
        docs.collect(
            "{% docs orders %}\nOne row per order.\n{% enddocs %}\n\n{%- docs order_status -%}\nStatus\n{%- enddocs %}",
        );
        assert_eq!(docs.len(), 2);
        assert_eq!(docs.expand("{{ doc('orders') }}"), "One row per order.");
        assert_eq!(docs.expand("{{doc(\"order_status\")}}"), "Status");
    }

    #[test]
    fn test_expand_keeps_surrounding_text_and_unknown_calls() {
        let mut docs = DocsBlocks::default();
        docs.collect("{% docs a %}alpha{% enddocs %}");
        assert_eq!(
            docs.expand("see {{ doc('a') }} and {{ doc('b') }}"),
            "see alpha and {{ doc('b') }}"
        );
        assert_eq!(docs.expand("plain"), "plain");
    }
}
