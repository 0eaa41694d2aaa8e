use crate::engine::type_chart::TypeChart;
use crate::errors::{EngineError, EngineResult, MissingSide};
use schema::{
    AdvantageList, CanonicalRecord, ComparisonResult, Scores, Stat, StatMatchup, StatsComparison,
    TypeAdvantage, Winner,
};

/// Points for winning one of the six base stats.
const STAT_WIN_POINTS: i64 = 1;
/// Points per super-effective finding, taken from the opponent as well.
const SUPER_EFFECTIVE_POINTS: i64 = 2;
/// Points per immunity finding, taken from the opponent as well.
const IMMUNITY_POINTS: i64 = 3;

/// Compare two records that the caller may have failed to look up.
pub fn compare(
    first: Option<&CanonicalRecord>,
    second: Option<&CanonicalRecord>,
    chart: &TypeChart,
) -> EngineResult<ComparisonResult> {
    match (first, second) {
        (Some(first), Some(second)) => Ok(compare_records(first, second, chart)),
        (None, Some(_)) => Err(EngineError::RecordMissing(MissingSide::First)),
        (Some(_), None) => Err(EngineError::RecordMissing(MissingSide::Second)),
        (None, None) => Err(EngineError::RecordMissing(MissingSide::Both)),
    }
}

/// Head-to-head analysis of two canonical records.
///
/// Deterministic: type lists are walked in their stored order, so the same
/// inputs always produce the same statements in the same order.
pub fn compare_records(
    first: &CanonicalRecord,
    second: &CanonicalRecord,
    chart: &TypeChart,
) -> ComparisonResult {
    let stats_comparison = compare_stats(first, second);
    let type_advantage = analyze_types(first, second, chart);
    let scores = score(&stats_comparison, &type_advantage);

    ComparisonResult {
        pokemon1: first.clone(),
        pokemon2: second.clone(),
        stats_comparison,
        type_advantage,
        overall_winner: pick_winner(scores.pokemon1, scores.pokemon2, first.id, second.id),
        scores,
    }
}

fn pick_winner<T: Ord>(value1: T, value2: T, id1: i64, id2: i64) -> Winner {
    match value1.cmp(&value2) {
        std::cmp::Ordering::Greater => Winner::Record(id1),
        std::cmp::Ordering::Less => Winner::Record(id2),
        std::cmp::Ordering::Equal => Winner::Tie,
    }
}

fn compare_stats(first: &CanonicalRecord, second: &CanonicalRecord) -> StatsComparison {
    let row = |value1: u64, value2: u64| StatMatchup {
        pokemon1: value1,
        pokemon2: value2,
        winner: pick_winner(value1, value2, first.id, second.id),
    };
    let stat_row = |stat: Stat| {
        row(
            u64::from(first.stats.get(stat)),
            u64::from(second.stats.get(stat)),
        )
    };

    StatsComparison {
        hp: stat_row(Stat::Hp),
        attack: stat_row(Stat::Attack),
        defense: stat_row(Stat::Defense),
        special_attack: stat_row(Stat::SpecialAttack),
        special_defense: stat_row(Stat::SpecialDefense),
        speed: stat_row(Stat::Speed),
        total: row(first.stats.total(), second.stats.total()),
    }
}

/// Walk `defender`'s types against `attacker`'s, crediting every finding
/// to `attacker_list`.
///
/// The chart is consulted from the defender's side only: the result is not
/// assumed symmetric, so each direction gets its own pass.
fn credit_matchups(
    defender: &CanonicalRecord,
    attacker: &CanonicalRecord,
    chart: &TypeChart,
    attacker_list: &mut AdvantageList,
) {
    for defending in &defender.types {
        let profile = chart.effectiveness_of(defending);
        for attacking in &attacker.types {
            if profile.is_weak_to(attacking) {
                attacker_list.effective.push(format!(
                    "{} is super effective against {}",
                    attacking, defending
                ));
            }
            if profile.resists(attacking) {
                attacker_list.ineffective.push(format!(
                    "{} is not very effective against {}",
                    attacking, defending
                ));
            }
            // Recorded on the attacker's side, like the other two findings.
            if profile.is_immune_to(attacking) {
                attacker_list
                    .immune
                    .push(format!("{} is immune to {}", defending, attacking));
            }
        }
    }
}

fn analyze_types(
    first: &CanonicalRecord,
    second: &CanonicalRecord,
    chart: &TypeChart,
) -> TypeAdvantage {
    let mut advantage = TypeAdvantage::default();
    let TypeAdvantage { pokemon1, pokemon2 } = &mut advantage;
    credit_matchups(first, second, chart, pokemon2);
    credit_matchups(second, first, chart, pokemon1);
    advantage
}

/// Net type-advantage delta for the side owning `own`. The opponent's
/// delta is always the exact negation.
pub fn type_delta(own: &AdvantageList, opponent: &AdvantageList) -> i64 {
    let count = |list: &Vec<String>| list.len() as i64;
    SUPER_EFFECTIVE_POINTS * (count(&own.effective) - count(&opponent.effective))
        + IMMUNITY_POINTS * (count(&own.immune) - count(&opponent.immune))
}

fn score(stats: &StatsComparison, advantage: &TypeAdvantage) -> Scores {
    let mut scores = Scores::default();

    // Only the six base stats score; the total row is informational.
    for stat in Stat::all() {
        let row = stats.row(stat);
        match row.pokemon1.cmp(&row.pokemon2) {
            std::cmp::Ordering::Greater => scores.pokemon1 += STAT_WIN_POINTS,
            std::cmp::Ordering::Less => scores.pokemon2 += STAT_WIN_POINTS,
            std::cmp::Ordering::Equal => {}
        }
    }

    scores.pokemon1 += type_delta(&advantage.pokemon1, &advantage.pokemon2);
    scores.pokemon2 += type_delta(&advantage.pokemon2, &advantage.pokemon1);
    scores
}
