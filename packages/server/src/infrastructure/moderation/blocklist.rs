//! Offline classifier backed by a fixed list of terms.

use async_trait::async_trait;

use crate::domain::{ModerationDecision, ModerationError, ModerationGate};

/// Rejects any text containing one of the configured terms (case-insensitive).
#[derive(Debug, Clone, Default)]
pub struct BlocklistModerationGate {
    terms: Vec<String>,
}

impl BlocklistModerationGate {
    /// Blank terms are ignored.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|term| term.as_ref().trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

#[async_trait]
impl ModerationGate for BlocklistModerationGate {
    async fn classify(&self, text: &str) -> Result<ModerationDecision, ModerationError> {
        let text = text.to_lowercase();
        if self.terms.iter().any(|term| text.contains(term.as_str())) {
            Ok(ModerationDecision::Rejected)
        } else {
            Ok(ModerationDecision::Approved)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_blocklist_rejects_listed_term_case_insensitive() {
        // テスト項目: 禁止語を含むテキストは大文字小文字を問わず Rejected
        // given (前提条件):
        let gate = BlocklistModerationGate::new(["bad word"]);

        // when (操作):
        let decision = gate.classify("this has a BAD WORD in it").await;

        // then (期待する結果):
        assert_eq!(decision, Ok(ModerationDecision::Rejected));
    }

    #[tokio::test]
    async fn test_blocklist_approves_clean_text() {
        // テスト項目: 禁止語を含まないテキストは Approved
        // given (前提条件):
        let gate = BlocklistModerationGate::new(["bad word"]);

        // when (操作):
        let decision = gate.classify("hello").await;

        // then (期待する結果):
        assert_eq!(decision, Ok(ModerationDecision::Approved));
    }

    #[test]
    fn test_blank_terms_are_ignored() {
        // テスト項目: 空白のみの語は無視される
        // when (操作):
        let gate = BlocklistModerationGate::new(["", "  ", " Spam "]);

        // then (期待する結果):
        assert_eq!(gate.terms(), &["spam".to_string()]);
    }
}
