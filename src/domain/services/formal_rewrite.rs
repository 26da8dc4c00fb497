use crate::domain::Question;

/// Instruction placed ahead of every user query.
pub const FORMAL_REWRITE_INSTRUCTION: &str = "\
Rewrite the following casual text into a professional, grammatically correct version. \
Preserve the original meaning, use business vocabulary and correct the punctuation. \
Respond with only the rewritten text and no explanations.";

const ORIGINAL_LABEL: &str = "Original: ";

/// Builds the prompt sent to the model for a formal rewrite.
pub struct FormalRewritePrompt;

impl FormalRewritePrompt {
    pub fn render(question: &Question) -> String {
        format!(
            "{FORMAL_REWRITE_INSTRUCTION}\n\n{ORIGINAL_LABEL}{}",
            question.trimmed_query()
        )
    }

    /// Recover the user text from a rendered prompt.
    pub fn original_text(prompt: &str) -> Option<&str> {
        prompt
            .split_once(ORIGINAL_LABEL)
            .map(|(_, original)| original)
    }
}
