//! The fixed system instruction sent with every assessment request.

use crate::Message;

/// Evaluation rubric used when no config file overrides it.
pub const DEFAULT_RUBRIC: &str = "\
You are an expert evaluator specializing in assessing the literacy level of user-submitted text.
Use the following criteria for your evaluation:

1. Grammar and Syntax:
- Assess correctness and complexity of sentence structures.
- If the text is nearly error-free or accurate, assign a suitably high score.

2. Spelling and Mechanics:
- Evaluate spelling, punctuation, and capitalization.
- Minor or infrequent errors should not drastically reduce the score.

3. Vocabulary Usage:
- Examine the range and appropriateness of vocabulary.
- Avoid penalizing advanced or sophisticated word choice if it is accurate and contextually suitable.

4. Cohesion and Coherence:
- Check whether the text flows logically and remains easy to understand at a functional level.
- Infrequent awkward transitions should not lower the score excessively if overall coherence is maintained.

5. Organization and Structure:
- Determine if the text includes a clear introduction, body, and conclusion (when relevant).
- Consider how well the text serves its functional or communicative purpose.

6. Content Relevance and Clarity:
- Assess whether the content effectively conveys its intended message.
- Avoid penalizing concise or precise writing if it meets the communicative goal.

After analyzing the text against each criterion, provide:
- A concise, constructive comment on each of the six criteria (in bullet points or short paragraphs).
- An overall literacy rating (0 to 10) based on the following guidelines:
  * 0 indicates illiteracy.
  * 1-4 indicates very limited or poor literacy, requiring significant improvement.
  * 5-6 indicates basic functional literacy with areas still needing work.
  * 7-8 indicates generally proficient literacy with only minor improvements needed.
  * 9 indicates highly proficient literacy with minimal issues.
  * 10 indicates functional literacy at or near perfection for everyday needs.

When in doubt, especially if the text is well-structured, precise, and exhibits minimal errors, \
err on the side of a higher rating. Provide short, constructive suggestions for improvement where applicable.";

/// Prefix placed before the user's answer in the user message.
pub const USER_TEXT_PREFIX: &str = "User's text: ";

/// Build the two-message conversation for one assessment.
///
/// The answer is embedded as-is; callers decide whether it is acceptable.
pub fn build_messages(rubric: &str, answer: &str) -> Vec<Message> {
    vec![
        Message::system(rubric),
        Message::user(format!("{USER_TEXT_PREFIX}{answer}")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MessageRole;

    #[test]
    fn rubric_names_all_six_criteria() {
        for criterion in [
            "Grammar and Syntax",
            "Spelling and Mechanics",
            "Vocabulary Usage",
            "Cohesion and Coherence",
            "Organization and Structure",
            "Content Relevance and Clarity",
        ] {
            assert!(DEFAULT_RUBRIC.contains(criterion), "missing {criterion}");
        }
        assert!(DEFAULT_RUBRIC.contains("(0 to 10)"));
    }

    #[test]
    fn messages_are_system_then_user() {
        let msgs = build_messages(DEFAULT_RUBRIC, "I like books.");
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].role, MessageRole::System);
        assert_eq!(msgs[0].content, DEFAULT_RUBRIC);
        assert_eq!(msgs[1].role, MessageRole::User);
        assert_eq!(msgs[1].content, "User's text: I like books.");
    }

    #[test]
    fn answer_is_not_rewritten() {
        let msgs = build_messages("r", "  spaced\nout  ");
        assert_eq!(msgs[1].content, "User's text:   spaced\nout  ");
    }
}
