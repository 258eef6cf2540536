//! EV engine integration tests.

use bjev::{
    Action, Advisor, DealerOutcome, GameRules, Query, Recommendation, SurrenderOption,
    calculate_all_action_evs,
};

const TOLERANCE: f64 = 1e-9;

fn chart_rules() -> GameRules {
    GameRules::default()
        .with_decks(6)
        .with_dealer_hits_soft_17(true)
        .with_double_after_split(true)
        .with_surrender(SurrenderOption::Late)
}

fn advise(total: u8, usable_aces: u8, upcard: u8) -> Recommendation {
    let query = Query::new(total, usable_aces, upcard).unwrap();
    calculate_all_action_evs(&query, &chart_rules())
}

fn bits(advice: &Recommendation) -> Vec<(Action, u64)> {
    advice
        .ranked()
        .iter()
        .map(|entry| (entry.action, entry.ev.to_bits()))
        .collect()
}

#[test]
fn dealer_distribution_conserves_probability() {
    let mut advisor = Advisor::new();
    for hits_soft_17 in [true, false] {
        let rules = GameRules::default().with_dealer_hits_soft_17(hits_soft_17);
        for upcard in 2..=11 {
            let dist = advisor.dealer_distribution(upcard, &rules);
            let sum: f64 = DealerOutcome::ALL
                .iter()
                .map(|&outcome| dist.probability(outcome))
                .sum();
            assert!((sum - 1.0).abs() < TOLERANCE, "upcard {upcard}: {sum}");
        }
    }
}

#[test]
fn hard_16_stands_against_6() {
    assert_eq!(advise(16, 0, 6).best().action, Action::Stand);
}

#[test]
fn hard_11_doubles_against_6() {
    let advice = advise(11, 0, 6);
    let double = advice.ev(Action::Double).unwrap();
    assert_eq!(advice.best().action, Action::Double);
    assert!(double > advice.ev(Action::Hit).unwrap());
    assert!(double > advice.ev(Action::Stand).unwrap());
}

#[test]
fn aces_split_against_6() {
    let query = Query::new(12, 1, 6).unwrap().with_pair(1).unwrap();
    let advice = calculate_all_action_evs(&query, &chart_rules());
    assert_eq!(advice.best().action, Action::Split);
}

#[test]
fn familiar_chart_cells() {
    // Hard 12 hits against 2, stands against 4
    assert_eq!(advise(12, 0, 2).best().action, Action::Hit);
    assert_eq!(advise(12, 0, 4).best().action, Action::Stand);
    // Soft 18 stands against 7
    assert_eq!(advise(18, 1, 7).best().action, Action::Stand);
    // Hard 16 against an ace surrenders under H17
    assert_eq!(advise(16, 0, 11).best().action, Action::Surrender);
    // Hard 20 never hits
    for upcard in 2..=11 {
        assert_eq!(advise(20, 0, upcard).best().action, Action::Stand);
    }
}

#[test]
fn soft_21_stand_is_not_a_natural() {
    let rules = chart_rules();
    let mut advisor = Advisor::new();
    for upcard in 2..=11 {
        let dist = advisor.dealer_distribution(upcard, &rules);
        let below_21: f64 = [
            DealerOutcome::Seventeen,
            DealerOutcome::Eighteen,
            DealerOutcome::Nineteen,
            DealerOutcome::Twenty,
        ]
        .iter()
        .map(|&outcome| dist.probability(outcome))
        .sum();
        // Any dealer 21, natural or drawn, pushes
        let expected = below_21 + dist.bust();

        let query = Query::new(21, 1, upcard).unwrap();
        let stand = advisor
            .calculate_all_action_evs(&query, &rules)
            .ev(Action::Stand)
            .unwrap();
        assert!((stand - expected).abs() < TOLERANCE, "upcard {upcard}");
    }
}

#[test]
fn split_aces_without_das_never_beat_free_play() {
    let free = chart_rules().with_double_after_split(true);
    let restricted = chart_rules().with_double_after_split(false);
    let query = |upcard| Query::new(12, 1, upcard).unwrap().with_pair(1).unwrap();

    for upcard in 2..=11 {
        let free_ev = calculate_all_action_evs(&query(upcard), &free)
            .ev(Action::Split)
            .unwrap();
        let restricted_ev = calculate_all_action_evs(&query(upcard), &restricted)
            .ev(Action::Split)
            .unwrap();
        assert!(restricted_ev <= free_ev, "upcard {upcard}");
    }
}

#[test]
fn doubling_after_split_raises_fives_not_tens() {
    let with_das = chart_rules().with_double_after_split(true);
    let without_das = chart_rules().with_double_after_split(false);
    let split = |rank, rules: &GameRules| {
        let query = Query::new(10, 0, 6).unwrap().with_pair(rank).unwrap();
        calculate_all_action_evs(&query, rules).ev(Action::Split).unwrap()
    };

    // 5 + 6 makes 11, which doubles against a 6
    assert!(split(5, &with_das) > split(5, &without_das) + 0.1);
    // Ten-card hands of 12..=21 never prefer doubling
    assert!((split(10, &with_das) - split(10, &without_das)).abs() < TOLERANCE);
}

#[test]
fn repeated_queries_are_bit_identical() {
    let mut advisor = Advisor::new();
    let rules = chart_rules();
    let query = Query::new(15, 0, 10).unwrap().with_pair(13).unwrap();

    let first = advisor.calculate_all_action_evs(&query, &rules);
    let _ = advisor.calculate_all_action_evs(&Query::new(9, 0, 3).unwrap(), &rules);
    let _ = advisor.calculate_all_action_evs(
        &Query::new(15, 0, 10).unwrap(),
        &rules.clone().with_dealer_hits_soft_17(false),
    );
    let second = advisor.calculate_all_action_evs(&query, &rules);

    assert_eq!(bits(&first), bits(&second));
    assert_eq!(bits(&first), bits(&calculate_all_action_evs(&query, &rules)));
}

#[test]
fn evs_stay_within_stake_bounds() {
    let rules = chart_rules();
    for upcard in 2..=11 {
        for total in 4..=21 {
            for entry in advise(total, 0, upcard).ranked() {
                assert!((-2.0..=2.0).contains(&entry.ev), "{total} v {upcard}: {entry:?}");
            }
        }
        for rank in 1..=10 {
            let query = Query::new(4, 0, upcard).unwrap().with_pair(rank).unwrap();
            let split = calculate_all_action_evs(&query, &rules)
                .ev(Action::Split)
                .unwrap();
            assert!((-4.0..=4.0).contains(&split));
        }
    }
}

#[test]
fn hit_never_worse_than_double_on_low_hard_totals_against_ace() {
    // Doubling risks two units against the strongest upcard
    let advice = advise(5, 0, 11);
    assert!(advice.ev(Action::Hit).unwrap() > advice.ev(Action::Double).unwrap());
}
