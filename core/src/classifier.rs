//! Segment classifier — (R, F, M) score triple to one named segment.
//!
//! RULE: The rule table is evaluated top to bottom and the first match wins.
//! Rules overlap on purpose; reordering them changes the output for every
//! triple matched by more than one rule. The final rule matches everything,
//! so classification is total.

use crate::{
    error::{SegError, SegResult},
    scorer::RfmScore,
    types::{CustomerId, Score},
};
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Segments ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    #[serde(rename = "Champions")]
    Champions,
    #[serde(rename = "Loyal Customers")]
    LoyalCustomers,
    #[serde(rename = "Potential Loyalists")]
    PotentialLoyalists,
    #[serde(rename = "New Customers")]
    NewCustomers,
    #[serde(rename = "Promising")]
    Promising,
    #[serde(rename = "Hibernating")]
    Hibernating,
    #[serde(rename = "Lost Customers")]
    LostCustomers,
    #[serde(rename = "At Risk")]
    AtRisk,
    #[serde(rename = "Can't Lose Them")]
    CantLoseThem,
    #[serde(rename = "Best Customers")]
    BestCustomers,
    #[serde(rename = "Other Segment")]
    OtherSegment,
}

impl Segment {
    /// Every label, in order of first appearance in the rule table.
    pub const ALL: [Segment; 11] = [
        Segment::Champions,
        Segment::LoyalCustomers,
        Segment::PotentialLoyalists,
        Segment::NewCustomers,
        Segment::Promising,
        Segment::Hibernating,
        Segment::LostCustomers,
        Segment::AtRisk,
        Segment::CantLoseThem,
        Segment::BestCustomers,
        Segment::OtherSegment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Segment::Champions          => "Champions",
            Segment::LoyalCustomers     => "Loyal Customers",
            Segment::PotentialLoyalists => "Potential Loyalists",
            Segment::NewCustomers       => "New Customers",
            Segment::Promising          => "Promising",
            Segment::Hibernating        => "Hibernating",
            Segment::LostCustomers      => "Lost Customers",
            Segment::AtRisk             => "At Risk",
            Segment::CantLoseThem       => "Can't Lose Them",
            Segment::BestCustomers      => "Best Customers",
            Segment::OtherSegment       => "Other Segment",
        }
    }

    /// Position in [`Segment::ALL`]; used to order reports deterministically.
    pub fn rank(self) -> usize {
        Segment::ALL.iter().position(|s| *s == self).unwrap_or(Segment::ALL.len())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Score triple ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreTriple {
    pub r: Score,
    pub f: Score,
    pub m: Score,
}

impl ScoreTriple {
    pub fn new(r: Score, f: Score, m: Score) -> SegResult<Self> {
        for score in [r, f, m] {
            if !(1..=5).contains(&score) {
                return Err(SegError::ScoreOutOfRange { score });
            }
        }
        Ok(Self { r, f, m })
    }

    /// Concatenated form, e.g. "545".
    pub fn score_string(&self) -> String {
        format!("{}{}{}", self.r, self.f, self.m)
    }
}

// ── Rule table ───────────────────────────────────────────────────────────────

/// Inclusive bound on one score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRange {
    pub min: Score,
    pub max: Score,
}

impl ScoreRange {
    pub const ANY: ScoreRange = ScoreRange { min: 1, max: 5 };

    pub const fn exactly(score: Score) -> Self {
        Self { min: score, max: score }
    }

    pub const fn at_least(score: Score) -> Self {
        Self { min: score, max: 5 }
    }

    pub const fn at_most(score: Score) -> Self {
        Self { min: 1, max: score }
    }

    pub fn contains(&self, score: Score) -> bool {
        self.min <= score && score <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRule {
    /// 1-based position in the table.
    pub order:   u8,
    pub r:       ScoreRange,
    pub f:       ScoreRange,
    pub m:       ScoreRange,
    pub segment: Segment,
}

impl SegmentRule {
    pub fn matches(&self, t: ScoreTriple) -> bool {
        self.r.contains(t.r) && self.f.contains(t.f) && self.m.contains(t.m)
    }

    pub fn is_catch_all(&self) -> bool {
        self.r == ScoreRange::ANY && self.f == ScoreRange::ANY && self.m == ScoreRange::ANY
    }
}

const fn rule(order: u8, r: ScoreRange, f: ScoreRange, m: ScoreRange, segment: Segment) -> SegmentRule {
    SegmentRule { order, r, f, m, segment }
}

use self::ScoreRange as S;

pub static SEGMENT_RULES: [SegmentRule; 13] = [
    rule(1,  S::exactly(5),  S::exactly(5),  S::exactly(5),  Segment::Champions),
    rule(2,  S::exactly(5),  S::exactly(5),  S::ANY,         Segment::LoyalCustomers),
    rule(3,  S::exactly(5),  S::exactly(4),  S::ANY,         Segment::LoyalCustomers),
    rule(4,  S::exactly(4),  S::exactly(5),  S::ANY,         Segment::LoyalCustomers),
    rule(5,  S::at_least(4), S::at_least(4), S::at_least(4), Segment::PotentialLoyalists),
    rule(6,  S::exactly(5),  S::at_least(3), S::ANY,         Segment::NewCustomers),
    rule(7,  S::at_least(4), S::ANY,         S::at_least(4), Segment::Promising),
    rule(8,  S::at_least(3), S::at_most(2),  S::at_most(2),  Segment::Hibernating),
    rule(9,  S::at_most(2),  S::at_most(2),  S::at_most(2),  Segment::LostCustomers),
    rule(10, S::at_most(2),  S::at_least(3), S::ANY,         Segment::AtRisk),
    rule(11, S::at_most(2),  S::ANY,         S::at_least(3), Segment::CantLoseThem),
    rule(12, S::ANY,         S::exactly(5),  S::exactly(5),  Segment::BestCustomers),
    rule(13, S::ANY,         S::ANY,         S::ANY,         Segment::OtherSegment),
];

/// The first rule in table order that matches `t`.
pub fn matching_rule(t: ScoreTriple) -> &'static SegmentRule {
    let catch_all = &SEGMENT_RULES[SEGMENT_RULES.len() - 1];
    SEGMENT_RULES.iter().find(|r| r.matches(t)).unwrap_or(catch_all)
}

pub fn classify(t: ScoreTriple) -> Segment {
    matching_rule(t).segment
}

// ── Customer segments ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSegment {
    pub customer_id:  CustomerId,
    pub recency_days: u64,
    pub frequency:    u64,
    pub monetary:     f64,
    pub r_score:      Score,
    pub f_score:      Score,
    pub m_score:      Score,
    pub score_string: String,
    pub segment:      Segment,
    /// Order of the rule that fired.
    pub matched_rule: u8,
}

/// Label every scored customer. Output keeps the input order.
pub fn classify_population(scores: Vec<RfmScore>) -> SegResult<Vec<CustomerSegment>> {
    scores
        .into_iter()
        .map(|s| {
            let triple = ScoreTriple::new(s.r_score, s.f_score, s.m_score)?;
            let fired = matching_rule(triple);
            Ok(CustomerSegment {
                customer_id:  s.customer_id,
                recency_days: s.recency_days,
                frequency:    s.frequency,
                monetary:     s.monetary,
                r_score:      s.r_score,
                f_score:      s.f_score,
                m_score:      s.m_score,
                score_string: triple.score_string(),
                segment:      fired.segment,
                matched_rule: fired.order,
            })
        })
        .collect()
}
