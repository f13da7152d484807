// src/tips.rs
//! Guidance text attached to every report.

use rand::seq::IndexedRandom;
use rand::Rng;

pub const FAKE_RISK_TIP: &str = "Verify information using the 'SIFT' method: Stop, Investigate the source, Find better coverage, Trace claims to the original context.";
pub const BIAS_TIP: &str = "Examine if the content fairly represents different viewpoints or oversimplifies complex issues. Look for balanced reporting.";
pub const EMOTION_TIP: &str = "Identify emotionally charged words. Question if the emotion is justified by evidence or used to cloud judgment.";
pub const VIRAL_TIP: &str = "Be skeptical of posts urging immediate sharing. Verify content before amplifying it, especially if it seems designed to go viral.";
pub const REGIONAL_TRIGGERS_TIP: &str =
    "Local expressions can be used to make fake news seem more authentic and relatable.";
pub const CLICKBAIT_TIP: &str = "Clickbait headlines often exaggerate or omit crucial details. Compare headlines with article content critically.";

/// (risk-factor substring, tip) in priority order.
const CONTEXTUAL_TIPS: &[(&str, &str)] = &[
    ("fake", FAKE_RISK_TIP),
    ("bias", BIAS_TIP),
    ("emotion", EMOTION_TIP),
    ("viral", VIRAL_TIP),
    ("trigger", REGIONAL_TRIGGERS_TIP),
    ("clickbait", CLICKBAIT_TIP),
];

pub const DID_YOU_KNOW_TIPS: [&str; 20] = [
    "Verify information before sharing. Check multiple reputable sources to confirm a story's accuracy.",
    "Be wary of headlines designed to provoke strong emotions. They might prioritize clicks over facts.",
    "Look for bylines and author credentials. Anonymous sources can be a red flag for misinformation.",
    "Check the publication date. Old news can be re-shared out of context to mislead.",
    "Examine the 'About Us' page of a source to understand its mission, ownership, and potential biases.",
    "Distinguish between news reporting, opinion pieces, and sponsored content. Each has a different purpose.",
    "Cross-reference claims with fact-checking websites like Snopes, PolitiFact, or Africa Check.",
    "Be skeptical of content that claims to have 'secret' or 'exclusive' information without evidence.",
    "Consider the images and videos used. Are they original, or are they altered or taken from unrelated events?",
    "Understand that all sources can have some level of bias. Seek diverse perspectives to get a fuller picture.",
    "Pay attention to the language used. Loaded words, stereotypes, and generalizations can indicate bias.",
    "If a story sounds too good or too outrageous to be true, it often is. Investigate further.",
    "Support responsible journalism. Reliable news gathering requires resources and ethical standards.",
    "Media literacy is a key skill in the digital age. Continuously question and evaluate the information you consume.",
    "Look for corrections and clarifications. Reputable news organizations admit and fix their mistakes.",
    "Beware of echo chambers and filter bubbles. Actively seek out viewpoints that challenge your own.",
    "Check if statistical claims are backed by clear data sources and methodologies.",
    "Recognize that headlines don't always tell the full story. Read the article thoroughly.",
    "Be cautious with user-generated content (comments, social media posts) as it's often unverified.",
    "Understand the difference between correlation and causation when interpreting data or events.",
];

/// Curated tip for the highest-priority matching risk factor, if any.
pub fn contextual_tip<S: AsRef<str>>(risk_factors: &[S]) -> Option<&'static str> {
    CONTEXTUAL_TIPS.iter().find_map(|(key, tip)| {
        risk_factors
            .iter()
            .any(|r| r.as_ref().contains(*key))
            .then_some(*tip)
    })
}

/// Contextual tip, or a random educational tip drawn from `rng`.
pub fn select_tip<S: AsRef<str>, R: Rng + ?Sized>(risk_factors: &[S], rng: &mut R) -> &'static str {
    contextual_tip(risk_factors).unwrap_or_else(|| {
        DID_YOU_KNOW_TIPS
            .choose(rng)
            .copied()
            .unwrap_or(DID_YOU_KNOW_TIPS[0])
    })
}
