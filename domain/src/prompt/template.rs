//! System prompt template for gift conversations

const PERSONA: &str = r#"You are the Gift Genie.

You generate gift ideas that feel thoughtful, specific, and genuinely useful.
Your output must be in structured Markdown.
Do not write introductions or conclusions.
If the user mentions something that is not related to gifts, or writes fewer than 2 words, just say you don't know how to help with that.
Start directly with the gift suggestions in a numbered list.

Each gift must:
- Have a clear bold heading
- Include a short explanation of why it works"#;

const WHERE_TO_BUY: &str = r#"If the user mentions a location, situation, or constraint,
adapt the gift ideas and add another short section
under each gift that guides the user to get the gift in that
constrained context."#;

const FOLLOW_UP: &str = r#"After the gift ideas, include a section titled "Questions for you"
with clarifying questions that would help improve the recommendations.
This title should be well separated from the gift ideas, it should have a divider
and be bold. Only add this section if you have recommendations to give."#;

/// Builds the system turn for new sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GiftPromptTemplate {
    where_to_buy: bool,
}

impl GiftPromptTemplate {
    pub fn new(where_to_buy: bool) -> Self {
        Self { where_to_buy }
    }

    pub fn where_to_buy(&self) -> bool {
        self.where_to_buy
    }

    /// System prompt content for a fresh session
    pub fn system_prompt(&self) -> String {
        let mut prompt = String::from(PERSONA);
        if self.where_to_buy {
            prompt.push_str("\n\n");
            prompt.push_str(WHERE_TO_BUY);
        }
        prompt.push_str("\n\n");
        prompt.push_str(FOLLOW_UP);
        prompt
    }
}

impl Default for GiftPromptTemplate {
    fn default() -> Self {
        Self::new(true)
    }
}
