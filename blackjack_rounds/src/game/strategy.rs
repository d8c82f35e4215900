use blackjack_cards::{is_soft, min_score, score, Card, CARDS_PER_DECK};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt::Display;

pub mod prelude {
    pub use super::{
        BasicStrategy, BettingStrategy, CountingStrategy, DealerStrategy, DecisionStrategy, HiLo,
        MarginBettingStrategy, Move, PlayerStrategy, SimpleDecisionStrategy, Strategy, TableState,
        TieredBettingStrategy, WongHalves, DEFAULT_MIN_BET, KO,
    };
}

/// The table minimum used when nothing else is configured.
pub const DEFAULT_MIN_BET: u32 = 100;

/// The four ways a hand can be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Hit,
    Stand,
    Double,
    Split,
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Move::Hit => "hit",
            Move::Stand => "stand",
            Move::Double => "double down",
            Move::Split => "split",
        };
        write!(f, "{}", s)
    }
}

/// The contract every participant at the table implements.
///
/// `bet` is called once at the start of each round, `shuffled` is true when the shoe was just replaced.
/// `play` is called at every decision point with a copy of the acting hand and the dealer's face up card.
/// `results` is called once the round has been settled, with the final cards of every player hand and of the dealer.
pub trait Strategy {
    fn bet(&mut self, shuffled: bool) -> u32;
    fn play(&mut self, hand: &[Card], dealers_up_card: Card) -> Move;
    fn results(&mut self, hands: &[Vec<Card>], dealer: &[Card]);
    /// A short description of the strategy used when reporting results.
    fn label(&self) -> String {
        String::from("strategy")
    }
}

impl<S: Strategy + ?Sized> Strategy for &mut S {
    fn bet(&mut self, shuffled: bool) -> u32 {
        (**self).bet(shuffled)
    }

    fn play(&mut self, hand: &[Card], dealers_up_card: Card) -> Move {
        (**self).play(hand, dealers_up_card)
    }

    fn results(&mut self, hands: &[Vec<Card>], dealer: &[Card]) {
        (**self).results(hands, dealer)
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn bet(&mut self, shuffled: bool) -> u32 {
        (**self).bet(shuffled)
    }

    fn play(&mut self, hand: &[Card], dealers_up_card: Card) -> Move {
        (**self).play(hand, dealers_up_card)
    }

    fn results(&mut self, hands: &[Vec<Card>], dealer: &[Card]) {
        (**self).results(hands, dealer)
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

/// The house policy. Hits on 16 or less and on a soft 17, stands otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct DealerStrategy;

impl Strategy for DealerStrategy {
    /// The dealer never wagers, the table minimum is returned so the value is always valid.
    fn bet(&mut self, _shuffled: bool) -> u32 {
        DEFAULT_MIN_BET
    }

    fn play(&mut self, hand: &[Card], _dealers_up_card: Card) -> Move {
        let dealer_score = score(hand);
        if dealer_score <= 16 || (dealer_score == 17 && is_soft(hand)) {
            Move::Hit
        } else {
            Move::Stand
        }
    }

    fn results(&mut self, _hands: &[Vec<Card>], _dealer: &[Card]) {}

    fn label(&self) -> String {
        String::from("dealer")
    }
}

/// Struct for encapsulating all the information a `DecisionStrategy` needs to choose a move.
pub struct TableState<'a> {
    pub hand: &'a [Card],
    pub hand_score: u32,
    pub soft: bool,
    pub running_count: f32,
    pub true_count: f32,
    pub dealers_up_card: Card,
}

impl<'a> TableState<'a> {
    pub fn new(
        hand: &'a [Card],
        running_count: f32,
        true_count: f32,
        dealers_up_card: Card,
    ) -> TableState<'a> {
        TableState {
            hand,
            hand_score: score(hand),
            soft: is_soft(hand),
            running_count,
            true_count,
            dealers_up_card,
        }
    }

    /// Returns true if the hand is two cards of the same rank.
    pub fn is_pair(&self) -> bool {
        self.hand.len() == 2 && self.hand[0].rank == self.hand[1].rank
    }
}

/// Trait for a specific card counting system. The count is fed every card that becomes visible at the end of a round.
pub trait CountingStrategy {
    fn update(&mut self, card: &Card);
    fn reset(&mut self);
    fn running_count(&self) -> f32;
    fn true_count(&self) -> f32;
    fn name(&self) -> &'static str;
}

/// Trait for choosing a move given the state of the table.
pub trait DecisionStrategy {
    fn decide_option(&self, state: &TableState<'_>) -> Move;
    fn name(&self) -> &'static str;
}

/// Trait for sizing a bet from the current count.
pub trait BettingStrategy {
    fn bet(&self, running_count: f32, true_count: f32) -> u32;
    fn name(&self) -> &'static str;
}

lazy_static! {
    static ref HI_LO_TAGS: HashMap<u8, i32> = {
        let mut tags = HashMap::new();
        for i in 2..=6 {
            tags.insert(i, 1);
        }
        for i in 7..=9 {
            tags.insert(i, 0);
        }
        tags.insert(1, -1);
        tags.insert(10, -1);
        tags
    };
    static ref WONG_HALVES_TAGS: HashMap<u8, f32> = {
        let mut tags = HashMap::new();
        tags.insert(1, -1.0);
        tags.insert(10, -1.0);
        tags.insert(2, 0.5);
        tags.insert(7, 0.5);
        tags.insert(3, 1.0);
        tags.insert(4, 1.0);
        tags.insert(6, 1.0);
        tags.insert(5, 1.5);
        tags.insert(8, 0.0);
        tags.insert(9, -0.5);
        tags
    };
    static ref KO_TAGS: HashMap<u8, i32> = {
        let mut tags = HashMap::new();
        for i in 2..=7 {
            tags.insert(i, 1);
        }
        tags.insert(8, 0);
        tags.insert(9, 0);
        tags.insert(1, -1);
        tags.insert(10, -1);
        tags
    };
}

/// Whole decks left in the shoe after `cards_counted` cards have been seen, rounded down and never less than one.
fn estimated_decks_remaining(num_decks: u32, cards_counted: u32) -> u32 {
    let unseen = (num_decks * CARDS_PER_DECK as u32).saturating_sub(cards_counted);
    u32::max(unseen / CARDS_PER_DECK as u32, 1)
}

/// The Hi-Lo count: low cards add one, tens and aces subtract one.
#[derive(Debug, Clone)]
pub struct HiLo {
    running_count: i32,
    num_decks: u32,
    total_cards_counted: u32,
}

impl HiLo {
    /// Associated method for building a new HiLo counting object
    pub fn new(num_decks: u32) -> Self {
        HiLo {
            running_count: 0,
            num_decks,
            total_cards_counted: 0,
        }
    }

    pub fn total_cards_counted(&self) -> u32 {
        self.total_cards_counted
    }
}

impl CountingStrategy for HiLo {
    fn update(&mut self, card: &Card) {
        self.running_count += HI_LO_TAGS[&card.val()];
        self.total_cards_counted += 1;
    }

    fn reset(&mut self) {
        self.running_count = 0;
        self.total_cards_counted = 0;
    }

    fn running_count(&self) -> f32 {
        self.running_count as f32
    }

    /// Integer division truncating toward zero, so the tiered bets see whole numbers.
    fn true_count(&self) -> f32 {
        let decks = estimated_decks_remaining(self.num_decks, self.total_cards_counted);
        (self.running_count / decks as i32) as f32
    }

    fn name(&self) -> &'static str {
        "HiLo"
    }
}

impl Display for HiLo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = "total cards counted:".len() + 1;
        write!(
            f,
            "{:<width$}{}\n{:<width$}{}\n{:<width$}{:.2}",
            "running count:",
            self.running_count,
            "total cards counted:",
            self.total_cards_counted,
            "true count:",
            self.true_count(),
        )
    }
}

/// The Wong Halves count, a balanced count with half point tags.
#[derive(Debug, Clone)]
pub struct WongHalves {
    running_count: f32,
    num_decks: u32,
    total_cards_counted: u32,
}

impl WongHalves {
    pub fn new(num_decks: u32) -> Self {
        WongHalves {
            running_count: 0.0,
            num_decks,
            total_cards_counted: 0,
        }
    }
}

impl CountingStrategy for WongHalves {
    fn update(&mut self, card: &Card) {
        self.running_count += WONG_HALVES_TAGS[&card.val()];
        self.total_cards_counted += 1;
    }

    fn reset(&mut self) {
        self.running_count = 0.0;
        self.total_cards_counted = 0;
    }

    fn running_count(&self) -> f32 {
        self.running_count
    }

    fn true_count(&self) -> f32 {
        self.running_count / estimated_decks_remaining(self.num_decks, self.total_cards_counted) as f32
    }

    fn name(&self) -> &'static str {
        "Wong Halves"
    }
}

/// The Knockout count. It is unbalanced so the running count is used directly as the true count,
/// and it starts from `4 - 4 * num_decks` rather than zero.
#[derive(Debug, Clone)]
pub struct KO {
    running_count: i32,
    num_decks: u32,
}

impl KO {
    pub fn new(num_decks: u32) -> Self {
        KO {
            running_count: 4 - 4 * (num_decks as i32),
            num_decks,
        }
    }
}

impl CountingStrategy for KO {
    fn update(&mut self, card: &Card) {
        self.running_count += KO_TAGS[&card.val()];
    }

    fn reset(&mut self) {
        self.running_count = 4 - 4 * (self.num_decks as i32);
    }

    fn running_count(&self) -> f32 {
        self.running_count as f32
    }

    fn true_count(&self) -> f32 {
        self.running_count as f32
    }

    fn name(&self) -> &'static str {
        "KO"
    }
}

/// Bets the minimum until the true count reaches a tier, then jumps straight to that tier's bet.
#[derive(Debug, Clone)]
pub struct TieredBettingStrategy {
    min_bet: u32,
    // sorted by threshold, highest first
    tiers: Vec<(f32, u32)>,
}

impl TieredBettingStrategy {
    pub fn new(min_bet: u32, mut tiers: Vec<(f32, u32)>) -> Self {
        tiers.sort_by(|a, b| b.0.total_cmp(&a.0));
        TieredBettingStrategy { min_bet, tiers }
    }
}

impl Default for TieredBettingStrategy {
    /// A true count of 14 or more bets 100000, 8 or more bets 5000, otherwise the minimum of 100.
    fn default() -> Self {
        TieredBettingStrategy::new(DEFAULT_MIN_BET, vec![(14.0, 100_000), (8.0, 5_000)])
    }
}

impl BettingStrategy for TieredBettingStrategy {
    fn bet(&self, _running_count: f32, true_count: f32) -> u32 {
        self.tiers
            .iter()
            .find(|(threshold, _)| true_count >= *threshold)
            .map(|&(_, bet)| u32::max(bet, self.min_bet))
            .unwrap_or(self.min_bet)
    }

    fn name(&self) -> &'static str {
        "Tiered"
    }
}

/// Struct that encapsulates the logic needed for a simple margin based betting strategy, i.e. for each positive value that the true count takes it will compute the bet as
/// `self.min_bet` * `self.margin` * true_count
#[derive(Debug, Clone)]
pub struct MarginBettingStrategy {
    margin: f32,
    min_bet: u32,
}

impl MarginBettingStrategy {
    /// Associated method for returning a new `MarginBettingStrategy` struct
    pub fn new(margin: f32, min_bet: u32) -> MarginBettingStrategy {
        MarginBettingStrategy { margin, min_bet }
    }
}

impl BettingStrategy for MarginBettingStrategy {
    /// Returns the bet based on the true count, never less than the minimum bet.
    fn bet(&self, _running_count: f32, true_count: f32) -> u32 {
        if true_count > 0.0 {
            let scalar = f32::ceil(true_count);
            u32::max(
                self.min_bet,
                ((self.min_bet as f32) * scalar * self.margin) as u32,
            )
        } else {
            self.min_bet
        }
    }

    fn name(&self) -> &'static str {
        "Margin"
    }
}

/// A deliberately small decision strategy: split high pairs, double on hard 10 or 11,
/// stand against a weak dealer card and otherwise hit until 13.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleDecisionStrategy;

impl DecisionStrategy for SimpleDecisionStrategy {
    fn decide_option(&self, state: &TableState<'_>) -> Move {
        if state.hand.len() == 2 {
            if state.is_pair() {
                let card_score = score(&state.hand[..1]);
                if card_score >= 8 && card_score != 10 {
                    return Move::Split;
                }
            }
            if state.hand_score == 10 || (state.hand_score == 11 && !state.soft) {
                return Move::Double;
            }
        }

        let dealer_score = score(&[state.dealers_up_card]);
        if (5..=6).contains(&dealer_score) {
            return Move::Stand;
        }
        if state.hand_score < 13 {
            return Move::Hit;
        }
        Move::Stand
    }

    fn name(&self) -> &'static str {
        "Simple"
    }
}

/// A struct that implements the `DecisionStrategy` trait. Decides playing option according to strict basic strategy only.
/// The lookup tables are keyed by the players total and the value of the dealers up card, with an ace counted as 1.
pub struct BasicStrategy {
    hard_totals: HashMap<(u32, u8), Move>,
    soft_totals: HashMap<(u32, u8), Move>,
    pair_splits: HashMap<(u8, u8), bool>,
}

impl BasicStrategy {
    /// Associated method for populating the lookup tables used in basic strategy, intended to be a helper method.
    fn build_lookup_tables() -> (
        HashMap<(u32, u8), Move>,
        HashMap<(u32, u8), Move>,
        HashMap<(u8, u8), bool>,
    ) {
        // Hard totals
        let mut hard_totals = HashMap::new();
        for i in 4..=21 {
            for j in 1..=10 {
                let option = match i {
                    9 => match j {
                        3..=6 => Move::Double,
                        _ => Move::Hit,
                    },
                    10 => match j {
                        2..=9 => Move::Double,
                        _ => Move::Hit,
                    },
                    11 => Move::Double,
                    12 => match j {
                        1..=3 | 7..=10 => Move::Hit,
                        _ => Move::Stand,
                    },
                    13..=16 => match j {
                        2..=6 => Move::Stand,
                        _ => Move::Hit,
                    },
                    17..=21 => Move::Stand,
                    _ => Move::Hit,
                };
                hard_totals.insert((i, j), option);
            }
        }

        // Soft totals, keyed by the total with the ace counted as 1
        let mut soft_totals = HashMap::new();
        for i in 1..=11 {
            for j in 1..=10 {
                let option = match i {
                    1..=7 => Move::Hit,
                    8 => match j {
                        2..=6 => Move::Double,
                        7 | 8 => Move::Stand,
                        _ => Move::Hit,
                    },
                    9 => match j {
                        6 => Move::Double,
                        _ => Move::Stand,
                    },
                    _ => Move::Stand,
                };
                soft_totals.insert((i, j), option);
            }
        }

        // Pairs, keyed by the value of one card of the pair
        let mut pair_splits = HashMap::new();
        for i in 1..=10u8 {
            for j in 1..=10u8 {
                let split = match i {
                    1 | 8 => true,
                    2 | 3 | 7 => (2..=7).contains(&j),
                    4 => (5..=6).contains(&j),
                    6 => (2..=6).contains(&j),
                    9 => matches!(j, 2..=6 | 8 | 9),
                    _ => false,
                };
                pair_splits.insert((i, j), split);
            }
        }

        (hard_totals, soft_totals, pair_splits)
    }

    /// Associated method for creating a new `BasicStrategy` struct.
    pub fn new() -> BasicStrategy {
        let (hard_totals, soft_totals, pair_splits) = BasicStrategy::build_lookup_tables();
        BasicStrategy {
            hard_totals,
            soft_totals,
            pair_splits,
        }
    }
}

impl Default for BasicStrategy {
    fn default() -> Self {
        BasicStrategy::new()
    }
}

impl DecisionStrategy for BasicStrategy {
    /// Method for deciding how to play the current hand given the appropriate data
    fn decide_option(&self, state: &TableState<'_>) -> Move {
        let dealers_card = state.dealers_up_card.val();
        let two_cards = state.hand.len() == 2;

        if state.is_pair() {
            let pair_value = state.hand[0].val();
            if self.pair_splits.get(&(pair_value, dealers_card)) == Some(&true) {
                return Move::Split;
            }
        }

        if state.soft {
            let key = (min_score(state.hand), dealers_card);
            return match self.soft_totals.get(&key) {
                Some(Move::Double) if two_cards => Move::Double,
                // soft 18 stands when doubling is not possible
                Some(Move::Double) if state.hand_score >= 18 => Move::Stand,
                Some(Move::Double) => Move::Hit,
                Some(option) => *option,
                None => Move::Stand,
            };
        }

        match self.hard_totals.get(&(state.hand_score, dealers_card)) {
            Some(Move::Double) if two_cards => Move::Double,
            Some(Move::Double) => Move::Hit,
            Some(option) => *option,
            // only single card hands left over from a split score below 4
            None if state.hand_score < 4 => Move::Hit,
            None => Move::Stand,
        }
    }

    fn name(&self) -> &'static str {
        "Basic Strategy"
    }
}

/// A struct that encapsulates everything needed to implement a specific playing strategy to test in a simulation.
/// The count is reset whenever the shoe is reshuffled and updated with every card revealed at the end of a round.
#[derive(Debug)]
pub struct PlayerStrategy<C, D, B>
where
    C: CountingStrategy,
    D: DecisionStrategy,
    B: BettingStrategy,
{
    counting_strategy: C,
    decision_strategy: D,
    betting_strategy: B,
}

impl<C, D, B> PlayerStrategy<C, D, B>
where
    C: CountingStrategy,
    D: DecisionStrategy,
    B: BettingStrategy,
{
    pub fn new(counting_strategy: C, decision_strategy: D, betting_strategy: B) -> Self {
        PlayerStrategy {
            counting_strategy,
            decision_strategy,
            betting_strategy,
        }
    }

    /// Getter for the counting strategy.
    pub fn counting_strategy(&self) -> &C {
        &self.counting_strategy
    }
}

impl PlayerStrategy<HiLo, SimpleDecisionStrategy, TieredBettingStrategy> {
    /// The illustrative card counter: a Hi-Lo count, the simple decision rules and tiered betting off the true count.
    pub fn basic_counter(num_decks: u32) -> Self {
        PlayerStrategy::new(
            HiLo::new(num_decks),
            SimpleDecisionStrategy,
            TieredBettingStrategy::default(),
        )
    }
}

impl<C, D, B> Strategy for PlayerStrategy<C, D, B>
where
    C: CountingStrategy,
    D: DecisionStrategy,
    B: BettingStrategy,
{
    fn bet(&mut self, shuffled: bool) -> u32 {
        if shuffled {
            self.counting_strategy.reset();
        }
        self.betting_strategy.bet(
            self.counting_strategy.running_count(),
            self.counting_strategy.true_count(),
        )
    }

    fn play(&mut self, hand: &[Card], dealers_up_card: Card) -> Move {
        let state = TableState::new(
            hand,
            self.counting_strategy.running_count(),
            self.counting_strategy.true_count(),
            dealers_up_card,
        );
        self.decision_strategy.decide_option(&state)
    }

    fn results(&mut self, hands: &[Vec<Card>], dealer: &[Card]) {
        for card in dealer.iter().chain(hands.iter().flatten()) {
            self.counting_strategy.update(card);
        }
    }

    fn label(&self) -> String {
        format!(
            "{} / {} / {}",
            self.counting_strategy.name(),
            self.decision_strategy.name(),
            self.betting_strategy.name()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use blackjack_cards::{Rank, Suit};

    fn card(rank: Rank) -> Card {
        Card::new(rank, Suit::Diamond)
    }

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&r| card(r)).collect()
    }

    #[test]
    fn test_dealer_hits_soft_seventeen() {
        let mut dealer = DealerStrategy;
        let up = card(Rank::Ace);
        assert_eq!(dealer.play(&cards(&[Rank::Ace, Rank::Six]), up), Move::Hit);
        assert_eq!(dealer.play(&cards(&[Rank::Ten, Rank::Six]), up), Move::Hit);
        assert_eq!(dealer.play(&cards(&[Rank::Ten, Rank::Seven]), up), Move::Stand);
        assert_eq!(dealer.play(&cards(&[Rank::Ace, Rank::Seven]), up), Move::Stand);
        assert_eq!(
            dealer.play(&cards(&[Rank::Ten, Rank::Six, Rank::Ace]), up),
            Move::Stand
        );
    }

    #[test]
    fn test_hi_lo_true_count() {
        let mut hilo = HiLo::new(2);
        for rank in [Rank::Two, Rank::Three, Rank::Four, Rank::Five] {
            hilo.update(&card(rank));
        }
        hilo.update(&card(Rank::Eight));
        hilo.update(&card(Rank::King));
        assert_eq!(hilo.running_count(), 3.0);
        assert_eq!(hilo.total_cards_counted(), 6);
        // 98 unseen cards is one whole deck
        assert_eq!(hilo.true_count(), 3.0);
        hilo.update(&card(Rank::Six));
        assert_eq!(hilo.true_count(), 4.0);
        hilo.reset();
        assert_eq!(hilo.running_count(), 0.0);
    }

    #[test]
    fn test_hi_lo_true_count_truncates() {
        let mut hilo = HiLo::new(4);
        for _ in 0..7 {
            hilo.update(&card(Rank::Two));
        }
        // 201 unseen cards is three whole decks
        assert_eq!(hilo.true_count(), 2.0);
        for _ in 0..14 {
            hilo.update(&card(Rank::King));
        }
        assert_eq!(hilo.running_count(), -7.0);
        assert_eq!(hilo.true_count(), -2.0);
    }

    #[test]
    fn test_basic_counter_bets_on_whole_deck_true_count() {
        let mut counter = PlayerStrategy::basic_counter(3);
        assert_eq!(counter.bet(true), 100);
        // 10 low cards and 50 neutral ones leave 96 unseen cards, one whole deck
        let mut seen = vec![card(Rank::Two); 10];
        seen.extend(vec![card(Rank::Seven); 50]);
        counter.results(&[seen], &[]);
        assert_eq!(counter.counting_strategy().true_count(), 10.0);
        assert_eq!(counter.bet(false), 5_000);
        // a reshuffle starts the count again
        assert_eq!(counter.bet(true), 100);
    }

    #[test]
    fn test_true_count_with_nearly_empty_shoe_is_finite() {
        let mut hilo = HiLo::new(1);
        for _ in 0..60 {
            hilo.update(&card(Rank::Two));
        }
        assert!(hilo.true_count().is_finite());
        assert_eq!(hilo.true_count(), 60.0);
    }

    #[test]
    fn test_ko_starts_below_zero() {
        let mut ko = KO::new(6);
        assert_eq!(ko.running_count(), -20.0);
        ko.update(&card(Rank::Seven));
        assert_eq!(ko.true_count(), -19.0);
        ko.reset();
        assert_eq!(ko.running_count(), -20.0);
    }

    #[test]
    fn test_wong_halves_tags() {
        let mut halves = WongHalves::new(6);
        halves.update(&card(Rank::Five));
        halves.update(&card(Rank::Nine));
        halves.update(&card(Rank::Jack));
        assert_eq!(halves.running_count(), 0.0);
    }

    #[test]
    fn test_tiered_betting() {
        let betting = TieredBettingStrategy::default();
        assert_eq!(betting.bet(0.0, -3.0), 100);
        assert_eq!(betting.bet(0.0, 7.9), 100);
        assert_eq!(betting.bet(0.0, 8.0), 5_000);
        assert_eq!(betting.bet(0.0, 14.0), 100_000);
    }

    #[test]
    fn test_margin_betting_never_below_minimum() {
        let betting = MarginBettingStrategy::new(0.5, 100);
        assert_eq!(betting.bet(0.0, 1.0), 100);
        assert_eq!(betting.bet(0.0, -2.0), 100);
        let betting = MarginBettingStrategy::new(3.0, 100);
        assert_eq!(betting.bet(0.0, 1.2), 600);
    }

    #[test]
    fn test_simple_decisions() {
        let simple = SimpleDecisionStrategy;
        let decide = |ranks: &[Rank], up: Rank| {
            let hand = cards(ranks);
            simple.decide_option(&TableState::new(&hand, 0.0, 0.0, card(up)))
        };
        assert_eq!(decide(&[Rank::Eight, Rank::Eight], Rank::Ten), Move::Split);
        assert_eq!(decide(&[Rank::Ace, Rank::Ace], Rank::Ten), Move::Split);
        assert_eq!(decide(&[Rank::King, Rank::King], Rank::Ten), Move::Stand);
        assert_eq!(decide(&[Rank::Four, Rank::Six], Rank::Ten), Move::Double);
        assert_eq!(decide(&[Rank::Five, Rank::Six], Rank::Ten), Move::Double);
        assert_eq!(decide(&[Rank::Two, Rank::Three], Rank::Six), Move::Stand);
        assert_eq!(decide(&[Rank::Two, Rank::Three], Rank::Nine), Move::Hit);
        assert_eq!(decide(&[Rank::Ten, Rank::Three], Rank::Nine), Move::Stand);
    }

    #[test]
    fn test_basic_strategy_decisions() {
        let basic = BasicStrategy::new();
        let decide = |ranks: &[Rank], up: Rank| {
            let hand = cards(ranks);
            basic.decide_option(&TableState::new(&hand, 0.0, 0.0, card(up)))
        };
        assert_eq!(decide(&[Rank::Eight, Rank::Eight], Rank::Ten), Move::Split);
        assert_eq!(decide(&[Rank::Five, Rank::Five], Rank::Six), Move::Double);
        assert_eq!(decide(&[Rank::Ten, Rank::Six], Rank::Ten), Move::Hit);
        assert_eq!(decide(&[Rank::Ten, Rank::Six], Rank::Five), Move::Stand);
        assert_eq!(decide(&[Rank::Ace, Rank::Seven], Rank::Four), Move::Double);
        assert_eq!(decide(&[Rank::Ace, Rank::Three, Rank::Four], Rank::Four), Move::Stand);
        assert_eq!(decide(&[Rank::Four, Rank::Three, Rank::Four], Rank::Ace), Move::Hit);
        assert_eq!(decide(&[Rank::Eight], Rank::Ten), Move::Hit);
        assert_eq!(decide(&[Rank::Ace], Rank::Ten), Move::Hit);
    }

    #[test]
    fn test_player_strategy_counts_results_and_resets_on_shuffle() {
        let mut strategy = PlayerStrategy::basic_counter(1);
        assert_eq!(strategy.bet(true), 100);
        let low = cards(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six]);
        strategy.results(&[low.clone(), low.clone()], &low);
        assert_eq!(strategy.counting_strategy().running_count(), 15.0);
        assert_eq!(strategy.bet(false), 100_000);
        assert_eq!(strategy.bet(true), 100);
        assert_eq!(strategy.label(), "HiLo / Simple / Tiered");
    }

    #[test]
    fn test_strategy_trait_objects() {
        let mut strategies: Vec<Box<dyn Strategy + Send>> = vec![
            Box::new(PlayerStrategy::basic_counter(6)),
            Box::new(PlayerStrategy::new(
                WongHalves::new(6),
                BasicStrategy::new(),
                MarginBettingStrategy::new(3.0, 100),
            )),
        ];
        for strategy in strategies.iter_mut() {
            assert!(strategy.bet(true) >= DEFAULT_MIN_BET);
        }
    }
}
