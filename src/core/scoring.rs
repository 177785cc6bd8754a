use crate::models::{ComparablePerson, MatchThresholds, PairScore, ScoringWeights};

/// Which name channel a candidate pair matched on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameMatch {
    Primary,
    Alias,
    None,
}

/// Score one candidate pair across all signals.
///
/// Name equality is the admission gate: with no name or alias overlap the
/// pair scores 0 and nothing else is evaluated. This keeps the cross
/// product tractable and avoids false positives built purely on place or
/// caste coincidence. Every other signal is independent, purely additive,
/// and skipped (never penalized) when either side lacks the data.
pub fn score_pair(
    a: &ComparablePerson,
    b: &ComparablePerson,
    weights: &ScoringWeights,
    thresholds: &MatchThresholds,
) -> PairScore {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    match name_gate(a, b) {
        NameMatch::Primary => {
            score += weights.name;
            reasons.push(format!("Name match on '{}'", a.name));
        }
        NameMatch::Alias => {
            // Alias matches are noisier than primary-name matches, so the
            // gate still opens but awards fewer points.
            score += weights.alias;
            reasons.push("Alias name match".to_string());
        }
        NameMatch::None => return PairScore::default(),
    }

    if let (Some(year_a), Some(year_b)) = (a.birth_year, b.birth_year) {
        let delta = (year_a - year_b).abs();
        if delta == 0 {
            score += weights.birth_year_exact;
            reasons.push(format!("Birth year match ({})", year_a));
        } else if delta <= thresholds.birth_year_tolerance {
            score += weights.birth_year_close;
            reasons.push(format!("Birth year within range ({} vs {})", year_a, year_b));
        }
    }

    if fields_match(&a.birth_place, &b.birth_place) {
        score += weights.birth_place;
        reasons.push("Same birth place".to_string());
    }
    if fields_match(&a.current_place, &b.current_place) {
        score += weights.current_place;
        reasons.push("Same current place".to_string());
    }

    if fields_match(&a.religion, &b.religion) {
        score += weights.religion;
        reasons.push("Same religion".to_string());
    }
    if fields_match(&a.caste, &b.caste) {
        score += weights.caste;
        reasons.push("Same caste".to_string());
    }

    // Deceased status is frequently unknown across independently-entered
    // trees, so agreement earns a small bonus and disagreement costs nothing.
    if a.is_deceased == b.is_deceased {
        score += weights.deceased;
        reasons.push("Deceased status agreement".to_string());
    }

    PairScore { score, reasons }
}

/// Exact-token name gate across primary and alias channels.
/// Primary-to-primary equality outranks any alias channel.
fn name_gate(a: &ComparablePerson, b: &ComparablePerson) -> NameMatch {
    if !a.name.is_empty() && a.name == b.name {
        return NameMatch::Primary;
    }

    let a_channels = [Some(a.name.as_str()).filter(|n| !n.is_empty()), a.alias_name.as_deref()];
    let b_channels = [Some(b.name.as_str()).filter(|n| !n.is_empty()), b.alias_name.as_deref()];

    for a_name in a_channels.iter().flatten() {
        for b_name in b_channels.iter().flatten() {
            if a_name == b_name {
                return NameMatch::Alias;
            }
        }
    }

    NameMatch::None
}

fn fields_match(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x == y)
}
