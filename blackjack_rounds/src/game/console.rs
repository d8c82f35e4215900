use crate::game::strategy::{Move, Strategy};
use blackjack_cards::{formatted_score, Card};
use std::io::{BufRead, Write};

/// A strategy driven by a person at a terminal. Reads answers from `input` and writes prompts to `output`.
/// Running out of input bets zero, which the table rejects, and stands on every hand.
pub struct ConsoleStrategy<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleStrategy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsoleStrategy { input, output }
    }

    /// Reads one trimmed line, `None` once the input is exhausted or unreadable.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn format_cards(cards: &[Card]) -> String {
        let names = cards
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        format!("[{}] ({})", names, formatted_score(cards))
    }

    /// Consumes the strategy returning the output it wrote to.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Strategy for ConsoleStrategy<R, W> {
    fn bet(&mut self, shuffled: bool) -> u32 {
        if shuffled {
            let _ = writeln!(self.output, "The deck was just shuffled");
        }
        loop {
            let _ = writeln!(self.output, "What would you like to bet?");
            let _ = self.output.flush();
            let line = match self.read_line() {
                Some(line) => line,
                None => return 0,
            };
            match line.parse::<u32>() {
                Ok(bet) => return bet,
                Err(_) => {
                    let _ = writeln!(self.output, "{} is not a valid bet.", line);
                }
            }
        }
    }

    fn play(&mut self, hand: &[Card], dealers_up_card: Card) -> Move {
        loop {
            let _ = writeln!(self.output, "Player: {}", Self::format_cards(hand));
            let _ = writeln!(self.output, "Dealer: {}", dealers_up_card);
            let _ = writeln!(
                self.output,
                "What will you do? (h)it, (s)tand, (d)ouble or s(p)lit"
            );
            let _ = self.output.flush();
            let line = match self.read_line() {
                Some(line) => line,
                None => return Move::Stand,
            };
            match line.as_str() {
                "h" => return Move::Hit,
                "s" => return Move::Stand,
                "d" => return Move::Double,
                "p" => return Move::Split,
                _ => {
                    let _ = writeln!(self.output, "Not a valid option.");
                }
            }
        }
    }

    fn results(&mut self, hands: &[Vec<Card>], dealer: &[Card]) {
        let _ = writeln!(self.output, "=== FINAL HANDS ===");
        let _ = writeln!(self.output, "Player:");
        for hand in hands {
            let _ = writeln!(self.output, "  {}", Self::format_cards(hand));
        }
        let _ = writeln!(self.output, "Dealer: {}", Self::format_cards(dealer));
    }

    fn label(&self) -> String {
        String::from("console")
    }
}
