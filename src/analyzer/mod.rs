//! Analyzer module - pseudoscience marker analysis engine

pub mod engine;
pub mod matcher;
pub mod normalize;
pub mod scoring;
pub mod signals;

pub use engine::{AggregateStats, AnalysisEngine, AnalyzedDocument, EngineOptions};
pub use matcher::{find_hits, find_terms};
pub use normalize::NormalizedText;
pub use scoring::{ScoreCalculator, Scoring, CATEGORY_CAP};
pub use signals::{detect_script_language, text_stats};
