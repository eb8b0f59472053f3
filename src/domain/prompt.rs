//! Prompt composition. Turns (comment, tone) into a plain-text instruction for the model.

use crate::domain::Tone;

/// System-level persona sent with every generation request.
pub const SYSTEM_PERSONA: &str = "You are a compassionate spiritual guide who responds to \
comments with empathy, wisdom, and grace. Your responses should be authentic, humble, and \
grounded in spiritual truth.";

/// Style rules shared by every tone.
const BASE_INSTRUCTIONS: &str = "\
Your response should be:
- Authentic and personal, not generic or robotic
- Spiritually grounded but not preachy
- Compassionate and understanding
- Humble and gracious
- 2-3 sentences maximum
- Written in a conversational, warm tone

Avoid:
- Sales language or promotional content
- Being overly formal or religious jargon
- Dismissing or minimizing feelings
- Giving unsolicited advice unless clearly requested
- Generic phrases like \"Thank you for sharing\"";

/// Opening line and bullets of the tone-specific block. The style bullet is appended.
fn tone_template(tone: Tone) -> (&'static str, &'static [&'static str]) {
    match tone {
        Tone::Empathetic => (
            "The user seems to be experiencing difficulty or struggle. Your reply should:",
            &[
                "Acknowledge their feelings without trying to fix everything",
                "Offer gentle spiritual encouragement",
                "Show that you understand their situation",
            ],
        ),
        Tone::Biblical => (
            "The user appears to be seeking understanding or has questions. Your reply should:",
            &[
                "Offer spiritual wisdom or insight",
                "Reference spiritual principles naturally (without forcing Bible verses)",
                "Be thoughtful and grounded in faith",
            ],
        ),
        Tone::Inviting => (
            "Your reply should encourage continued conversation and reflection. It should:",
            &[
                "Ask a gentle follow-up question or invite further sharing",
                "Be welcoming and open",
                "Create space for dialogue",
            ],
        ),
        Tone::Humble => (
            "The user seems positive or grateful. Your reply should:",
            &[
                "Deflect praise appropriately to God or the community",
                "Express gratitude",
                "Be modest about any role you might have played",
            ],
        ),
        Tone::Witty => (
            "Your reply should bring some lightness while maintaining spiritual depth. It should:",
            &[
                "Include gentle, faith-filled humor if appropriate",
                "Be joyful and uplifting",
                "Maintain respect and sensitivity",
            ],
        ),
    }
}

/// Tone-specific instruction block, including the profile's style line.
pub fn tone_block(tone: Tone) -> String {
    let (lead, bullets) = tone_template(tone);
    let mut block = String::from(lead);
    for bullet in bullets {
        block.push_str("\n- ");
        block.push_str(bullet);
    }
    block.push_str("\n- Be ");
    block.push_str(tone.profile().style);
    block
}

/// Build the full instruction for a comment in the given tone.
pub fn compose(comment: &str, tone: Tone) -> String {
    let profile = tone.profile();
    let prompt = format!(
        "A user has left this comment: \"{comment}\"\n\n\
         {block}\n\n\
         {BASE_INSTRUCTIONS}\n\n\
         Generate a reply that is {description} and focuses on {focus}.\n\n\
         Reply:",
        block = tone_block(tone),
        description = profile.description,
        focus = profile.focus,
    );
    prompt.trim().to_string()
}

/// Like [`compose`], but takes a tone name; unknown names compose as `inviting`.
pub fn compose_named(comment: &str, tone: &str) -> String {
    compose(comment, Tone::from_name_or_fallback(tone))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_quoted_comment() {
        let comment = "I'm having a hard time with forgiveness.";
        let prompt = compose(comment, Tone::Empathetic);
        assert!(prompt.contains(&format!("\"{comment}\"")));
        assert!(prompt.starts_with("A user has left this comment:"));
    }

    #[test]
    fn test_empathetic_block_and_profile() {
        let prompt = compose("anything", Tone::Empathetic);
        assert!(prompt.contains("experiencing difficulty or struggle"));
        assert!(prompt.contains("- Be gentle, understanding, validating feelings"));
        assert!(prompt.contains(
            "Generate a reply that is Compassionate and acknowledges the emotion behind the comment \
             and focuses on emotional support and spiritual comfort."
        ));
    }

    #[test]
    fn test_each_tone_has_distinct_block() {
        let blocks: Vec<String> = Tone::ALL.into_iter().map(tone_block).collect();
        for (i, a) in blocks.iter().enumerate() {
            for b in blocks.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_base_instructions_present_for_all_tones() {
        for tone in Tone::ALL {
            let prompt = compose("hi", tone);
            assert!(prompt.contains("2-3 sentences maximum"));
            assert!(prompt.contains("Generic phrases like \"Thank you for sharing\""));
            assert!(prompt.contains(&tone_block(tone)));
        }
    }

    #[test]
    fn test_unknown_tone_matches_inviting() {
        assert_eq!(
            compose_named("Nice post.", "not-a-real-tone"),
            compose("Nice post.", Tone::Inviting)
        );
        assert_eq!(
            compose_named("Nice post.", "WITTY"),
            compose("Nice post.", Tone::Witty)
        );
    }

    #[test]
    fn test_output_is_trimmed_and_ends_with_cue() {
        let prompt = compose("  padded  ", Tone::Humble);
        assert_eq!(prompt, prompt.trim());
        assert!(prompt.ends_with("Reply:"));
        // The comment itself is kept verbatim, padding included.
        assert!(prompt.contains("\"  padded  \""));
    }
}
