//! CLI table example: one human seat playing alongside two house agents.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use bjtable::{
    Card, HouseAgent, Phase, PlayerAction, PublicSnapshot, RoundResult, Table, TableOptions,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    println!("Blackjack table example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut table = Table::new(TableOptions::default(), seed);

    let Ok(me) = table.join("you", 500) else {
        return;
    };
    for name in ["house-ann", "house-ben"] {
        if let Err(err) = table.join_agent(name, 500, Arc::new(HouseAgent::default())) {
            println!("Could not seat {name}: {err}");
        }
    }

    loop {
        let bankroll = table.seat(me).map_or(0, |s| s.bankroll);
        if bankroll < table.options().min_bet {
            println!("You are out of money. Game over.");
            break;
        }

        table.start_new_hand();
        if let Err(err) = table.place_bets_for_all_agents().await {
            println!("Agent bet error: {err}");
        }

        let max = table.options().max_bet.min(bankroll);
        let Some(bet) = prompt_u64(&format!("Bet amount (5-{max}, 0 to quit): ")) else {
            break;
        };
        if bet == 0 {
            println!("Goodbye.");
            break;
        }
        if let Err(err) = table.place_bet(me, bet) {
            println!("Bet error: {err}");
            continue;
        }

        if let Err(err) = table.start_dealing() {
            println!("Deal error: {err}");
            continue;
        }
        if let Err(err) = table.request_table_talk().await {
            println!("Talk error: {err}");
        }
        if let Err(err) = table.start_decision_phase().await {
            println!("Decision error: {err}");
            continue;
        }

        while table.phase() == Phase::Decisions && table.current_seat() == Some(me) {
            print_table(&table.public_snapshot(), &table, me);

            let action = match prompt_line("[h]it or [s]tand: ").as_str() {
                "h" | "hit" => PlayerAction::Hit,
                "s" | "stand" => PlayerAction::Stand,
                "q" | "quit" => return,
                other => match other.parse::<PlayerAction>() {
                    Ok(action) => action,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                },
            };

            if let Err(err) = table.apply_player_action(me, action).await {
                println!("Action error: {err}");
            }
        }

        match table.settle_hands() {
            Ok(result) => print_result(&result, &table, me),
            Err(err) => println!("Settle error: {err}"),
        }
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_u64(prompt: &str) -> Option<u64> {
    loop {
        let input = prompt_line(prompt);
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<u64>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_table(snapshot: &PublicSnapshot, table: &Table, me: usize) {
    println!(
        "\nHand {} | shoe {:.0}% dealt | count {}",
        snapshot.hand_number,
        snapshot.shoe_penetration * 100.0,
        snapshot.running_count.unwrap_or(0)
    );
    println!("Dealer: {} ??", format_cards(&snapshot.dealer_visible_cards));

    for player in &snapshot.players {
        if player.seat == me {
            let seat = table.private_info(me).unwrap_or_default();
            println!(
                "* {}: {} | value {} | bet {}",
                player.id,
                format_cards(&seat.my_hole_cards),
                bjtable::rules::hand_value(&seat.my_hole_cards),
                player.bet.unwrap_or(0)
            );
        } else {
            println!(
                "  {}: ?? {} | bet {}",
                player.id,
                format_cards(&player.visible_cards),
                player.bet.unwrap_or(0)
            );
        }
    }

    for message in &snapshot.chat {
        println!("  [{}] {}", message.speaker, message.text);
    }
    println!();
}

fn print_result(result: &RoundResult, table: &Table, me: usize) {
    println!(
        "\nDealer: {} (value {})",
        format_cards(&table.dealer().cards),
        result.dealer_value
    );
    for seat in &result.seats {
        let marker = if seat.seat == me { "*" } else { " " };
        let cards = table.seat(seat.seat).map(|s| format_cards(&s.hand));
        println!(
            "{marker} {}: {} | value {} | {:?} | net {} | bankroll {}",
            seat.id,
            cards.unwrap_or_default(),
            seat.player_value,
            seat.outcome,
            seat.net,
            seat.bankroll
        );
    }
    println!();
}

fn format_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(no cards)".to_string();
    }
    cards
        .iter()
        .map(|card| if card.is_ace() { "A".to_string() } else { card.value().to_string() })
        .collect::<Vec<_>>()
        .join(" ")
}
