//! Property-based tests for the inference engine
//!
//! Properties covered:
//! 1. CDF symmetry of the reference distributions
//! 2. Two-sided p-value relation to the lower tail
//! 3. p-values stay inside [0, 1]
//! 4. Single-mean intervals bracket the sample mean
//! 5. Sample sizes grow as the margin shrinks or confidence rises
//! 6. Validator warns exactly when a threshold is violated

use dsstats::inference::{
    p_value, single_mean_sample_size, single_proportion_sample_size, Alternative,
    CategoryCounts, ConditionCheck, Distribution, Inference, InferenceConfig, RecordingObserver,
    SummaryStatistics,
};
use proptest::prelude::*;

fn distribution() -> impl Strategy<Value = Distribution> {
    prop_oneof![
        Just(Distribution::Normal),
        (0.5f64..200.0).prop_map(|df| Distribution::StudentT { df }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_less_tail_symmetry(stat in -8.0f64..8.0, dist in distribution()) {
        // Property: P(X <= s) + P(X <= -s) = 1 for a symmetric distribution
        let left = p_value(stat, dist, Alternative::Less).unwrap();
        let mirrored = p_value(-stat, dist, Alternative::Less).unwrap();
        prop_assert!((left + mirrored - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prop_two_sided_is_doubled_smaller_tail(stat in -8.0f64..8.0, dist in distribution()) {
        let two_sided = p_value(stat, dist, Alternative::TwoSided).unwrap();
        let tail = p_value(-stat.abs(), dist, Alternative::Less).unwrap();
        prop_assert!((two_sided - (2.0 * tail).min(1.0)).abs() < 1e-12);
    }

    #[test]
    fn prop_p_values_are_probabilities(stat in -50.0f64..50.0, dist in distribution()) {
        for alternative in [Alternative::Less, Alternative::Greater, Alternative::TwoSided] {
            let p = p_value(stat, dist, alternative).unwrap();
            prop_assert!((0.0..=1.0).contains(&p), "p = {} for {:?}", p, alternative);
        }
    }

    #[test]
    fn prop_greater_complements_less(stat in -8.0f64..8.0, dist in distribution()) {
        let less = p_value(stat, dist, Alternative::Less).unwrap();
        let greater = p_value(stat, dist, Alternative::Greater).unwrap();
        prop_assert!((less + greater - 1.0).abs() < 1e-12);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_mean_interval_brackets_mean(
        count in 2usize..500,
        mean in -1000.0f64..1000.0,
        std_dev in 0.0f64..100.0,
        confidence in 0.01f64..0.999,
    ) {
        let observer = RecordingObserver::new();
        let engine = Inference::with_observer(InferenceConfig::default(), &observer).unwrap();
        let summary = SummaryStatistics::new(count, mean, std_dev).unwrap();

        let ci = engine.single_mean_interval(&summary, confidence).unwrap();
        prop_assert!(ci.lower <= mean && mean <= ci.upper, "{} not in {}", mean, ci);

        // Warns iff n < 30
        prop_assert_eq!(observer.len(), usize::from(count < 30));
    }

    #[test]
    fn prop_proportion_sample_size_monotone_in_margin(
        p_tilde in 0.0f64..=1.0,
        margin in 0.005f64..0.5,
        shrink in 0.1f64..1.0,
        confidence in 0.5f64..0.999,
    ) {
        let wide = single_proportion_sample_size(p_tilde, margin, confidence).unwrap();
        let narrow = single_proportion_sample_size(p_tilde, margin * shrink, confidence).unwrap();
        prop_assert!(narrow >= wide);
    }

    #[test]
    fn prop_mean_sample_size_monotone_in_confidence(
        sigma in 0.0f64..50.0,
        margin in 0.01f64..10.0,
        low in 0.5f64..0.9,
        bump in 0.0f64..0.09,
    ) {
        let lower = single_mean_sample_size(sigma, margin, low).unwrap();
        let higher = single_mean_sample_size(sigma, margin, low + bump).unwrap();
        prop_assert!(higher >= lower);
    }

    #[test]
    fn prop_single_mean_warning_iff_below_30(n in 1u32..100) {
        let warned = ConditionCheck::SingleMean { n: n as f64 }.evaluate().is_some();
        prop_assert_eq!(warned, n < 30);
    }

    #[test]
    fn prop_single_proportion_warning_iff_short(n in 1u32..500, successes_ratio in 0.0f64..=1.0) {
        let n = n as f64;
        let p = successes_ratio;
        let warned = ConditionCheck::SingleProportion { n, p }.evaluate().is_some();
        prop_assert_eq!(warned, n * p < 10.0 || n * (1.0 - p) < 10.0);
    }

    #[test]
    fn prop_two_proportions_statistic_antisymmetric(
        a in 1u64..200,
        b in 1u64..200,
        c in 0u64..200,
    ) {
        // Swapping the compared categories flips the sign of z
        let engine = Inference::with_observer(
            InferenceConfig::default(),
            RecordingObserver::new(),
        ).unwrap();
        let counts = CategoryCounts::from_pairs([("a", a), ("b", b), ("c", c)]);

        let ab = engine.two_proportions_test(&counts, ("a", "b"), Alternative::TwoSided).unwrap();
        let ba = engine.two_proportions_test(&counts, ("b", "a"), Alternative::TwoSided).unwrap();
        prop_assert!((ab.statistic + ba.statistic).abs() < 1e-9);
        prop_assert!((ab.p_value - ba.p_value).abs() < 1e-12);
    }
}
