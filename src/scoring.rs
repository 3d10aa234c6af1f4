//! Deterministic trait scoring.
//!
//! Each answer is matched against the options of the question at the same
//! position. A matching, non-neutral option adds one vote to its letter; an
//! answer that matches nothing is ignored. Every axis is then resolved by
//! majority, falling back to the fixed tie-break letters (I, N, F, P) when
//! the counts are equal. Empty input therefore scores `INFP`.

use crate::error::ScoringError;
use crate::mbti::{Axis, MbtiType, Trait};
use crate::questions::QuestionCatalog;
use std::fmt;
use tracing::debug;

/// Vote counts for the eight trait letters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraitScores {
    counts: [u32; 8],
    matched: usize,
}

impl TraitScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `letter`. Always 0 for the neutral tag.
    pub fn get(&self, letter: Trait) -> u32 {
        letter.slot().map_or(0, |slot| self.counts[slot])
    }

    /// Number of answers that matched an option, neutral ones included.
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// Record one matched option.
    pub fn record(&mut self, tag: Trait) {
        self.matched += 1;
        if let Some(slot) = tag.slot() {
            self.counts[slot] += 1;
        }
    }

    /// Winning letter on `axis`; ties go to the axis default.
    pub fn resolve_axis(&self, axis: Axis) -> Trait {
        let (first, second) = axis.poles();
        match self.get(first).cmp(&self.get(second)) {
            std::cmp::Ordering::Greater => first,
            std::cmp::Ordering::Less => second,
            std::cmp::Ordering::Equal => axis.tie_break(),
        }
    }

    /// Resolve all four axes into a type.
    pub fn resolve(&self) -> MbtiType {
        MbtiType::from_poles(Axis::ALL.map(|axis| {
            let (_, second) = axis.poles();
            self.resolve_axis(axis) == second
        }))
    }
}

impl fmt::Display for TraitScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Trait::LETTERS
            .iter()
            .map(|&letter| format!("{}={}", letter, self.get(letter)))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// Tally the votes of `answers` against `catalog`.
///
/// Answers beyond the end of the catalog and answers matching no option
/// contribute nothing.
pub fn tally<S: AsRef<str>>(catalog: &QuestionCatalog, answers: &[S]) -> TraitScores {
    let mut scores = TraitScores::new();
    for (question, answer) in catalog.questions().iter().zip(answers) {
        if let Some(option) = question.find_option(answer.as_ref()) {
            scores.record(option.tag);
        }
    }
    scores
}

/// Outcome of a successful scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCard {
    pub mbti: MbtiType,
    pub scores: TraitScores,
}

/// Primary prediction path.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraitScorer {
    min_matched_answers: usize,
}

impl TraitScorer {
    /// Scorer that never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require at least `count` matched answers before trusting the scores.
    pub fn with_min_matched_answers(mut self, count: usize) -> Self {
        self.min_matched_answers = count;
        self
    }

    pub fn min_matched_answers(&self) -> usize {
        self.min_matched_answers
    }

    pub fn score<S: AsRef<str>>(
        &self,
        catalog: &QuestionCatalog,
        answers: &[S],
    ) -> Result<ScoreCard, ScoringError> {
        let scores = tally(catalog, answers);
        if scores.matched() < self.min_matched_answers {
            return Err(ScoringError::InsufficientAnswers {
                matched: scores.matched(),
                required: self.min_matched_answers,
            });
        }

        let mbti = scores.resolve();
        debug!(scores = %scores, mbti = %mbti, "trait scores resolved");
        Ok(ScoreCard { mbti, scores })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ANSWERS: [&str; 10] = [
        "I go out or call friends — I need people.",
        "Plan everything carefully before starting.",
        "Logic, facts, and objective data.",
        "Solving problems and optimizing systems.",
        "Focus on the facts and what actually happened.",
        "Take the lead and share your ideas freely.",
        "I finish early and like crossing things off my list.",
        "I see the world as it is — concrete and observable.",
        "Address the issue directly and look for resolution.",
        "Feel energized being around new people.",
    ];

    fn catalog() -> QuestionCatalog {
        QuestionCatalog::builtin().unwrap()
    }

    fn score(answers: &[&str]) -> MbtiType {
        TraitScorer::new().score(&catalog(), answers).unwrap().mbti
    }

    #[test]
    fn test_empty_answers_score_infp() {
        assert_eq!(score(&[]).to_string(), "INFP");
    }

    #[test]
    fn test_single_extravert_answer() {
        assert_eq!(score(&["I go out or call friends — I need people."]).to_string(), "ENFP");
    }

    #[test]
    fn test_sample_answers_score_estj() {
        let card = TraitScorer::new().score(&catalog(), &SAMPLE_ANSWERS).unwrap();
        assert_eq!(card.mbti.to_string(), "ESTJ");
        assert_eq!(card.scores.get(Trait::E), 3);
        assert_eq!(card.scores.get(Trait::T), 3);
        assert_eq!(card.scores.get(Trait::S), 2);
        assert_eq!(card.scores.get(Trait::J), 2);
        assert_eq!(card.scores.matched(), 10);
    }

    #[test]
    fn test_neutral_answers_score_nothing() {
        let neutral = [
            "It depends on my mood that week.",
            "A bit of both, depending on the project.",
            "Whatever feels most practical at the moment.",
        ];
        let card = TraitScorer::new().score(&catalog(), &neutral).unwrap();
        assert_eq!(card.mbti.to_string(), "INFP");
        assert_eq!(card.scores.matched(), 3);
        for letter in Trait::LETTERS {
            assert_eq!(card.scores.get(letter), 0);
        }
    }

    #[test]
    fn test_unmatched_answers_are_ignored() {
        let with_noise = tally(
            &catalog(),
            &["not an option", "Plan everything carefully before starting.", ""],
        );
        let clean = tally(&catalog(), &["", "Plan everything carefully before starting."]);
        assert_eq!(with_noise.get(Trait::J), 1);
        for letter in Trait::LETTERS {
            assert_eq!(with_noise.get(letter), clean.get(letter));
        }
        assert_eq!(with_noise.matched(), 1);
    }

    #[test]
    fn test_answers_are_positional() {
        // Valid option text, but for question 2 rather than question 1.
        let shifted = ["Plan everything carefully before starting."];
        let scores = tally(&catalog(), &shifted);
        assert_eq!(scores.matched(), 0);
        assert_eq!(score(&shifted).to_string(), "INFP");
    }

    #[test]
    fn test_extra_answers_beyond_catalog_are_ignored() {
        let mut answers: Vec<&str> = SAMPLE_ANSWERS.to_vec();
        answers.push("I go out or call friends — I need people.");
        answers.push("anything");
        assert_eq!(score(&answers).to_string(), "ESTJ");
    }

    #[test]
    fn test_strict_majority_wins_each_axis() {
        let answers = [
            "I stay in with a book, a game, or my own thoughts.",
            "Dive in and figure it out as I go.",
            "Logic, facts, and objective data.",
            "Solving problems and optimizing systems.",
            "Focus on the facts and what actually happened.",
            "Take the lead and share your ideas freely.",
            "I work best under last-minute pressure.",
            "I see patterns, possibilities, and what could be.",
            "Focus on their feelings and try to restore harmony.",
            "Stick with the one or two people you already know.",
        ];
        // I=2 E=1, S=1 N=1 (tie -> N), T=2 F=1, P=2 J=0
        assert_eq!(score(&answers).to_string(), "INTP");
    }

    #[test]
    fn test_ties_use_axis_defaults() {
        let mut scores = TraitScores::new();
        scores.record(Trait::E);
        scores.record(Trait::I);
        scores.record(Trait::S);
        scores.record(Trait::N);
        scores.record(Trait::T);
        scores.record(Trait::F);
        scores.record(Trait::J);
        scores.record(Trait::P);
        assert_eq!(scores.resolve().to_string(), "INFP");

        scores.record(Trait::E);
        scores.record(Trait::S);
        scores.record(Trait::T);
        scores.record(Trait::J);
        assert_eq!(scores.resolve().to_string(), "ESTJ");
    }

    #[test]
    fn test_scoring_is_repeatable() {
        let first = score(&[]);
        for _ in 0..10 {
            assert_eq!(score(&[]), first);
        }
    }

    #[test]
    fn test_threshold_fails_below_minimum() {
        let scorer = TraitScorer::new().with_min_matched_answers(3);
        let err = scorer
            .score(&catalog(), &["I go out or call friends — I need people.", "nope"])
            .unwrap_err();
        assert_eq!(err, ScoringError::InsufficientAnswers { matched: 1, required: 3 });

        let card = scorer.score(&catalog(), &SAMPLE_ANSWERS[..3]).unwrap();
        assert_eq!(card.scores.matched(), 3);
    }

    #[test]
    fn test_display_lists_all_letters() {
        let scores = tally(&catalog(), &SAMPLE_ANSWERS);
        assert_eq!(scores.to_string(), "E=3 I=0 S=2 N=0 T=3 F=0 J=2 P=0");
    }
}
