use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// One row of the grade-band table: averages at or above `min_average`
/// map to `grade` unless a higher band matched first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeBand {
    pub min_average: f64,
    pub grade: f64,
}

/// Descending thresholds; first match wins.
pub const GRADE_BANDS: [GradeBand; 6] = [
    GradeBand { min_average: 98.0, grade: 1.0 },
    GradeBand { min_average: 95.0, grade: 1.25 },
    GradeBand { min_average: 92.0, grade: 1.5 },
    GradeBand { min_average: 89.0, grade: 1.75 },
    GradeBand { min_average: 85.0, grade: 2.0 },
    GradeBand { min_average: 83.0, grade: 2.25 },
];

pub const FALLBACK_GRADE: f64 = 2.5;

/// 2-decimal round-off of the exact binary value, ties away from zero.
/// 44.995 is stored as 44.99499.. and rounds down to 44.99.
///
/// Non-finite input rounds to 0 so derived fields are always finite.
pub fn round_off_2_decimals(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    // Out of Decimal range (~7.9e28); already far past cent precision.
    let Some(exact) = Decimal::from_f64_retain(x) else {
        return x;
    };
    // Back through text so the result is the f64 nearest the rounded decimal.
    exact
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_string()
        .parse::<f64>()
        .unwrap_or(0.0)
}

/// Total over every real input. NaN and negatives fall through to the fallback band.
pub fn grade_for_average(average: f64) -> f64 {
    GRADE_BANDS
        .iter()
        .find(|band| average >= band.min_average)
        .map(|band| band.grade)
        .unwrap_or(FALLBACK_GRADE)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derived {
    pub average: f64,
    pub grade: f64,
    pub weight: f64,
}

/// Grade is looked up on the rounded average, so an unrounded mean of
/// 97.996 bands as 98.00.
pub fn derive(units: f64, midterms: f64, finals: f64) -> Derived {
    let average = round_off_2_decimals((midterms + finals) / 2.0);
    let grade = grade_for_average(average);
    let weight = round_off_2_decimals(units * grade);
    Derived {
        average,
        grade,
        weight,
    }
}

/// Inputs to the aggregate pass; one per roster row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedGrade {
    pub units: f64,
    pub grade: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_units: f64,
    pub total_weight: f64,
    pub gwa: f64,
    pub subject_count: usize,
}

pub fn summarize<I>(rows: I) -> Summary
where
    I: IntoIterator<Item = WeightedGrade>,
{
    let mut total_units = 0.0;
    let mut total_weight = 0.0;
    let mut weighted_grades = 0.0;
    let mut subject_count = 0usize;

    for r in rows {
        subject_count += 1;
        total_units += r.units;
        total_weight += r.weight;
        weighted_grades += r.units * r.grade;
    }

    // Zero units means nothing to weigh; report 0 rather than dividing.
    let gwa = if total_units != 0.0 {
        round_off_2_decimals(weighted_grades / total_units)
    } else {
        0.0
    };

    Summary {
        total_units,
        total_weight: round_off_2_decimals(total_weight),
        gwa,
        subject_count,
    }
}
