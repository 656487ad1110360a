use mathgen_core::model::Difficulty;

pub const PROBLEM_TEMPERATURE: f32 = 0.7;
pub const FEEDBACK_TEMPERATURE: f32 = 0.8;
pub const FEEDBACK_MAX_TOKENS: u32 = 150;

fn tier_guideline(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => {
            "EASY - Simple calculations, 2-3 steps, numbers under 1000. Topics: basic operations, \
             simple fractions, basic decimals, simple percentages (10%, 25%, 50%)."
        }
        Difficulty::Medium => {
            "MEDIUM - Standard Primary 5, 3-4 steps, moderate numbers. Topics: mixed operations, \
             fractions, decimals, percentage, area, volume."
        }
        Difficulty::Hard => {
            "HARD - Advanced Primary 5, 4-6 steps, large numbers. Topics: complex fractions, \
             multi-step percentage, rate, composite figures, multi-angle problems."
        }
    }
}

/// Prompt asking for one word problem as a strict JSON object.
///
/// `seed` is embedded so repeated requests are not served identical problems.
#[must_use]
pub fn problem_prompt(difficulty: Difficulty, seed: u64) -> String {
    let tier = difficulty.as_str().to_ascii_uppercase();
    let guideline = tier_guideline(difficulty);
    format!(
        r#"You are writing a math word problem for Primary 5 students in Singapore (ages 10-11), following the Singapore Mathematics Syllabus.

DIFFICULTY: {tier}
{guideline}

Requirements:
- A realistic, engaging word problem set in a real-world context.
- Exactly one clear numerical answer.
- Use Singapore context where it fits (SGD for money, local places, and so on).

Respond ONLY with a single valid JSON object and nothing before or after it:
{{
    "problem_text": "The word problem",
    "final_answer": 0,
    "hint": "A hint that guides without giving the solution away",
    "steps": ["Step 1 explanation", "Step 2 explanation", "Step 3 explanation"]
}}

Rules:
- final_answer is a bare number (for example 45, 12.5 or 250) with no units or words.
- The hint is encouraging and age-appropriate.
- steps are clear, ordered instructions that solve the problem.

The problem must be unique. Random seed: {seed}"#
    )
}

/// Prompt asking for one sentence of encouraging feedback on a wrong answer.
#[must_use]
pub fn feedback_prompt(problem_text: &str, correct_answer: f64, user_answer: f64) -> String {
    format!(
        "A Primary 5 student in Singapore answered this math problem incorrectly.\n\n\
         Problem: {problem_text}\n\
         Correct answer: {correct_answer}\n\
         Student's answer: {user_answer}\n\n\
         Give brief (one sentence), encouraging feedback with a gentle hint, suitable for a \
         10-11 year old.\n\n\
         Return only the feedback text, with no JSON or extra formatting."
    )
}
