// Copyright 2026 the arbiter developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `arbiter` command-line driver: inspect positions, enumerate legal
//! moves, run perft counts, and referee a two-player game on the terminal.
#[macro_use]
extern crate log;

use std::io::{self, BufRead, Write};
use std::process::exit;

use arbiter::{GameState, PieceKind};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

fn main() {
    env_logger::init();
    let matches = App::new("arbiter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("chess rules engine")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("moves")
                .about("Prints the legal moves of a position")
                .arg(
                    Arg::with_name("fen")
                        .long("fen")
                        .takes_value(true)
                        .help("Position to inspect, as a FEN string"),
                ),
        )
        .subcommand(
            SubCommand::with_name("perft")
                .about("Counts the legal move tree of a position")
                .arg(
                    Arg::with_name("fen")
                        .long("fen")
                        .takes_value(true)
                        .help("Position to search, as a FEN string"),
                )
                .arg(
                    Arg::with_name("depth")
                        .long("depth")
                        .short("d")
                        .takes_value(true)
                        .default_value("4")
                        .help("Depth to search to, in plies"),
                ),
        )
        .subcommand(
            SubCommand::with_name("play")
                .about("Referees a game between two players on stdin"),
        )
        .get_matches();

    match matches.subcommand() {
        ("moves", Some(sub)) => moves(sub),
        ("perft", Some(sub)) => perft(sub),
        ("play", Some(_)) => play(),
        _ => unreachable!(),
    }
}

fn state_from_args(matches: &ArgMatches) -> GameState {
    match matches.value_of("fen") {
        Some(fen) => GameState::from_fen(fen).unwrap_or_else(|err| {
            eprintln!("invalid FEN: {}", err);
            exit(1);
        }),
        None => GameState::new(),
    }
}

fn moves(matches: &ArgMatches) {
    let state = state_from_args(matches);
    println!("{}", state);
    for mov in state.legal_moves() {
        println!("{}", mov);
    }
}

fn perft(matches: &ArgMatches) {
    let state = state_from_args(matches);
    let depth: u32 = matches
        .value_of("depth")
        .and_then(|d| d.parse().ok())
        .unwrap_or_else(|| {
            eprintln!("invalid depth");
            exit(1);
        });

    for ply in 1..=depth {
        info!("starting perft to depth {}", ply);
        println!("perft({}) = {}", ply, arbiter::perft(&state, ply));
    }
}

/// Reads UCI-encoded moves from stdin alternately for each side and applies
/// them, printing the board after each one, until the game reaches a
/// terminal state or input runs out.
fn play() {
    let stdin = io::stdin();
    let mut state = GameState::new();
    println!("{}", state);

    loop {
        print!("{} to move> ", state.side_to_move());
        io::stdout().flush().expect("failed to flush stdout");
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }

        let input = line.trim();
        let mov = match state.move_from_uci(input) {
            Some(mov) => mov,
            None => {
                println!("unrecognized move: {}", input);
                continue;
            }
        };

        // The generator tags every promotion with queen; compare modulo the
        // promotion choice so "e7e8n" matches the generated move.
        let is_legal = state.legal_moves().iter().any(|m| {
            m.source() == mov.source()
                && m.destination() == mov.destination()
                && m.is_promotion() == mov.is_promotion()
        });
        if !is_legal {
            println!("illegal move: {}", input);
            continue;
        }

        let promotion = if mov.is_promotion() {
            Some(mov.promotion_piece())
        } else {
            None::<PieceKind>
        };
        state = match state.apply_move(mov, promotion) {
            Ok(next) => next,
            Err(err) => {
                println!("rejected move: {}", err);
                continue;
            }
        };

        println!("{}", state);
        let status = state.status();
        if status.checkmate {
            println!(
                "checkmate! {} wins",
                status.winner.expect("checkmate without a winner")
            );
            return;
        }
        if status.is_draw() {
            println!("draw!");
            return;
        }
        if status.check {
            println!("check!");
        }
    }
}
