use bjev::{
    Action, ActionEv, Advisor, DealerDist, DealerOutcome, GameRules, Query, Recommendation,
    SurrenderOption,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmAdvisor {
    advisor: Advisor,
    rules: GameRules,
}

#[wasm_bindgen]
impl WasmAdvisor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            advisor: Advisor::new(),
            rules: GameRules::default(),
        }
    }

    pub fn set_rules(
        &mut self,
        decks: u8,
        dealer_hits_soft_17: bool,
        double_after_split: bool,
        surrender: &str,
        blackjack_pays: f64,
    ) -> Result<(), JsValue> {
        let rules = GameRules::default()
            .with_decks(decks)
            .with_dealer_hits_soft_17(dealer_hits_soft_17)
            .with_double_after_split(double_after_split)
            .with_surrender(SurrenderOption::parse(surrender))
            .with_blackjack_pays(blackjack_pays);
        rules.validate().map_err(js_err)?;
        self.rules = rules;
        Ok(())
    }

    /// Ranks every action; `pair_rank` of 0 means the hand is not a pair.
    pub fn advise(
        &mut self,
        player_total: u8,
        usable_aces: u8,
        pair_rank: u8,
        dealer_upcard: u8,
        true_count: f64,
    ) -> Result<JsValue, JsValue> {
        let mut query = Query::new(player_total, usable_aces, dealer_upcard)
            .map_err(js_err)?
            .with_true_count(true_count);
        if pair_rank != 0 {
            query = query.with_pair(pair_rank).map_err(js_err)?;
        }

        let advice = self.advisor.calculate_all_action_evs(&query, &self.rules);
        to_js_value(&JsAdvice::from(&advice))
    }

    /// Picks from `legal` action symbols ("S", "H", "D", "R", "P").
    pub fn best_legal(
        &mut self,
        player_total: u8,
        usable_aces: u8,
        pair_rank: u8,
        dealer_upcard: u8,
        legal: &str,
    ) -> Result<Option<String>, JsValue> {
        let mut query = Query::new(player_total, usable_aces, dealer_upcard).map_err(js_err)?;
        if pair_rank != 0 {
            query = query.with_pair(pair_rank).map_err(js_err)?;
        }

        let legal: Vec<Action> = Action::ALL
            .into_iter()
            .filter(|action| legal.contains(action.symbol()))
            .collect();
        let advice = self.advisor.calculate_all_action_evs(&query, &self.rules);
        Ok(advice
            .best_legal(&legal)
            .map(|action| action.symbol().to_string()))
    }

    pub fn dealer_distribution(&mut self, dealer_upcard: u8) -> Result<JsValue, JsValue> {
        if !(2..=11).contains(&dealer_upcard) {
            return Err(js_err(bjev::QueryError::InvalidUpcard(dealer_upcard)));
        }
        let dist = self.advisor.dealer_distribution(dealer_upcard, &self.rules);
        to_js_value(&JsDealerDist::from(&dist))
    }
}

impl Default for WasmAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsActionEv {
    action: &'static str,
    symbol: &'static str,
    ev: f64,
}

impl From<&ActionEv> for JsActionEv {
    fn from(entry: &ActionEv) -> Self {
        Self {
            action: action_to_str(entry.action),
            symbol: entry.action.symbol(),
            ev: entry.ev,
        }
    }
}

#[derive(Serialize)]
struct JsAdvice {
    best: JsActionEv,
    ranked: Vec<JsActionEv>,
}

impl From<&Recommendation> for JsAdvice {
    fn from(advice: &Recommendation) -> Self {
        Self {
            best: JsActionEv::from(&advice.best()),
            ranked: advice.ranked().iter().map(JsActionEv::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct JsOutcome {
    outcome: &'static str,
    probability: f64,
}

#[derive(Serialize)]
struct JsDealerDist {
    outcomes: Vec<JsOutcome>,
}

impl From<&DealerDist> for JsDealerDist {
    fn from(dist: &DealerDist) -> Self {
        Self {
            outcomes: dist
                .iter()
                .map(|(outcome, probability)| JsOutcome {
                    outcome: outcome_to_str(outcome),
                    probability,
                })
                .collect(),
        }
    }
}

fn action_to_str(action: Action) -> &'static str {
    match action {
        Action::Stand => "Stand",
        Action::Hit => "Hit",
        Action::Double => "Double",
        Action::Surrender => "Surrender",
        Action::Split => "Split",
    }
}

fn outcome_to_str(outcome: DealerOutcome) -> &'static str {
    match outcome {
        DealerOutcome::Seventeen => "17",
        DealerOutcome::Eighteen => "18",
        DealerOutcome::Nineteen => "19",
        DealerOutcome::Twenty => "20",
        DealerOutcome::TwentyOne => "21",
        DealerOutcome::Bust => "Bust",
        DealerOutcome::Blackjack => "Blackjack",
    }
}

fn js_err<E: core::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
