//! English marker lexicon

use super::{LanguageData, StaticRule};
use crate::MarkerCategory::*;

pub(crate) static ENGLISH: LanguageData = LanguageData {
    code: "en",
    aliases: &["eng", "english"],
    version: "1.2.0",
    rules: RULES,
    evidence_terms: &[
        "clinical trial*",
        "randomized controlled",
        "randomised controlled",
        "evidence based",
        "placebo controlled",
        "double blind*",
        "meta analys*",
        "metaanalys*",
        "systematic review*",
        "peer reviewed",
    ],
    amplifiers: &[
        "absolutely",
        "completely",
        "totally",
        "exclusively",
        "incredibly",
        "amazingly",
        "astonishingly",
        "phenomenally",
    ],
};

static RULES: &[StaticRule] = &[
    // Miracle claims
    StaticRule {
        id: "en-miracle-cure",
        category: MiracleCure,
        patterns: &[
            "miracle cure*",
            "miracle drug*",
            "miracle pill*",
            "wonder drug*",
            "magic* formula*",
            "magic bullet*",
        ],
        weight: 1.5,
    },
    StaticRule {
        id: "en-miracle-breakthrough",
        category: MiracleCure,
        patterns: &[
            "revolutionary breakthrough*",
            "revolutionary cure*",
            "breakthrough discover*",
            "miraculous*",
        ],
        weight: 1.0,
    },
    // Universal remedies
    StaticRule {
        id: "en-universal-cures-all",
        category: UniversalRemedy,
        patterns: &[
            "cures everything",
            "cures all",
            "cure all",
            "cures any disease*",
            "every disease",
        ],
        weight: 1.5,
    },
    StaticRule {
        id: "en-universal-panacea",
        category: UniversalRemedy,
        patterns: &["panacea*", "universal remedy", "universal cure"],
        weight: 1.2,
    },
    // Absolute guarantees
    StaticRule {
        id: "en-certainty-guarantee",
        category: AbsoluteCertainty,
        patterns: &[
            "100% guarantee*",
            "guaranteed result*",
            "guaranteed cure*",
            "guaranteed to work",
        ],
        weight: 1.5,
    },
    StaticRule {
        id: "en-certainty-complete-cure",
        category: AbsoluteCertainty,
        patterns: &[
            "complete cure*",
            "permanent cure*",
            "forever cure*",
            "cure* permanently",
        ],
        weight: 1.2,
    },
    StaticRule {
        id: "en-certainty-totally-safe",
        category: AbsoluteCertainty,
        patterns: &["no side effects", "100% safe", "100% effective"],
        weight: 1.0,
    },
    // Suppressed truth
    StaticRule {
        id: "en-suppressed-doctors",
        category: SuppressedTruth,
        patterns: &[
            r"re:\b(doctors|physicians|big pharma|pharma companies) (don't|do not|won't|doesn't|does not) want you to know\b",
            r"re:\bdoctors (are )?hid(e|ing)\b",
            "hidden by doctors",
            "they don't want you to know",
        ],
        weight: 1.5,
    },
    StaticRule {
        id: "en-suppressed-pharma",
        category: SuppressedTruth,
        patterns: &["big pharma", "pharma conspirac*", "suppressed cure*"],
        weight: 1.2,
    },
    StaticRule {
        id: "en-suppressed-secret-knowledge",
        category: SuppressedTruth,
        patterns: &[
            "not recognized by",
            "ancient wisdom",
            "ancient secret*",
            "secret formula*",
        ],
        weight: 0.8,
    },
    // Pseudo-scientific jargon
    StaticRule {
        id: "en-jargon-energy",
        category: PseudoJargon,
        patterns: &[
            "energy field*",
            "energy balance",
            "quantum energy",
            "quantum healing",
            "cosmic energy",
            "biofield*",
            "vibrational*",
        ],
        weight: 1.0,
    },
    StaticRule {
        id: "en-jargon-detox",
        category: PseudoJargon,
        patterns: &["detox*", "cleanse*", "flush* toxins", "remov* toxins"],
        weight: 0.8,
    },
    // Natural as a guarantee
    StaticRule {
        id: "en-natural",
        category: NaturalFallacy,
        patterns: &[
            "100% natural",
            "all natural",
            "purely natural",
            "chemical free",
            "no chemicals",
        ],
        weight: 1.0,
    },
    // Urgency and pressure
    StaticRule {
        id: "en-urgency-fast-results",
        category: UrgencyPressure,
        patterns: &[
            r"re:\bin \d+ days\b",
            "instant result*",
            "immediate effect*",
            "overnight cure*",
            "works overnight",
        ],
        weight: 1.0,
    },
    StaticRule {
        id: "en-urgency-pressure",
        category: UrgencyPressure,
        patterns: &[
            "save your life",
            "don't miss",
            "last hope",
            "only way",
            "doctors shocked",
            "limited time",
            "act now",
            "order now",
        ],
        weight: 1.0,
    },
    // Mass testimonials
    StaticRule {
        id: "en-anecdotal",
        category: Anecdotal,
        patterns: &[
            "thousands satisfied",
            "thousands of satisfied",
            "millions of people",
            "all patients satisfied",
            "real testimonials",
            "worked for me",
        ],
        weight: 1.0,
    },
];
