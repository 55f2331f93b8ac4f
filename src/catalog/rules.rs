use super::CourseTier;

/// How a tier depends on the tiers above it.
///
/// `constrained_by` tiers gate what may be selected: a selected entry must be
/// linked to the selected parent (unless it is cross-cutting for that tier) and
/// is cleared when the parent changes underneath it. `narrowed_by` tiers only
/// filter the options shown and never reject or clear a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierRule {
    pub tier: CourseTier,
    pub constrained_by: &'static [CourseTier],
    pub narrowed_by: &'static [CourseTier],
}

pub const RULES: [TierRule; 8] = [
    TierRule {
        tier: CourseTier::Degree,
        constrained_by: &[],
        narrowed_by: &[],
    },
    // Degree does not gate the program choice, it only filters the listing.
    TierRule {
        tier: CourseTier::Program,
        constrained_by: &[],
        narrowed_by: &[CourseTier::Degree],
    },
    TierRule {
        tier: CourseTier::Major,
        constrained_by: &[CourseTier::Program],
        narrowed_by: &[],
    },
    TierRule {
        tier: CourseTier::Minor,
        constrained_by: &[CourseTier::Program, CourseTier::Major],
        narrowed_by: &[],
    },
    TierRule {
        tier: CourseTier::Mdc,
        constrained_by: &[CourseTier::Program, CourseTier::Major],
        narrowed_by: &[],
    },
    TierRule {
        tier: CourseTier::Vac,
        constrained_by: &[CourseTier::Program],
        narrowed_by: &[],
    },
    TierRule {
        tier: CourseTier::Aec,
        constrained_by: &[CourseTier::Program],
        narrowed_by: &[],
    },
    TierRule {
        tier: CourseTier::Aoc,
        constrained_by: &[CourseTier::Program],
        narrowed_by: &[],
    },
];

#[must_use]
pub const fn rule(tier: CourseTier) -> &'static TierRule {
    &RULES[tier.index()]
}

/// Tiers that can be linked as parents of `tier`, constraining or narrowing.
pub fn parent_tiers(tier: CourseTier) -> impl Iterator<Item = CourseTier> {
    let rule = rule(tier);
    rule.constrained_by
        .iter()
        .chain(rule.narrowed_by.iter())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_are_indexed_by_tier() {
        for tier in CourseTier::ALL {
            assert_eq!(rule(tier).tier, tier);
        }
    }

    #[test]
    fn parents_always_precede_their_children() {
        for tier in CourseTier::ALL {
            for parent in parent_tiers(tier) {
                assert!(parent < tier, "{parent} must come before {tier}");
            }
        }
    }

    #[test]
    fn program_roots_the_constraint_chain() {
        assert!(rule(CourseTier::Program).constrained_by.is_empty());
        for tier in &CourseTier::ALL[2..] {
            assert!(rule(*tier).constrained_by.contains(&CourseTier::Program));
        }
    }
}
