use std::io::{self, BufRead, Write};

use chess_rules::game::{
    error::ChessError,
    notation::CoordinateMove,
    state::{GameState, GameStatus},
};
#[cfg(feature = "perft")]
use chess_rules::game::perft::PerftConfig;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plays a game from standard input (DEFAULT)
    Play,
    /// Runs perft (generating all moves up to a certain depth)
    Perft {
        /// Maximum depth to reach
        depth: u8,
        /// Shows move count for each move from the starting position
        #[arg(short)]
        divide: bool,
        /// Generates moves for each depth up to the maximum
        #[arg(short)]
        iterative: bool,
        /// Show timing information
        #[arg(long)]
        bench: bool,
        /// Counts legal moves at horizon nodes instead of playing each of them
        #[arg(short)]
        bulk: bool,
        /// Worker threads, all available CPUs when omitted
        #[arg(long, default_value_t = 0)]
        threads: usize,
        /// Moves played from the initial position before counting
        #[arg(long, num_args = 1..)]
        moves: Vec<String>,

        /// Does not show the board and other decorations
        #[arg(long)]
        no_board: bool,
    },
}

/// Plays each coordinate move in turn on `state`.
fn play_moves(state: &mut GameState, moves: &[String]) -> Result<(), String> {
    for mv in moves {
        let CoordinateMove {
            from,
            to,
            promoting_to,
        } = mv.parse().map_err(|e| format!("{mv}: {e}"))?;
        state
            .play(from, to, promoting_to)
            .map_err(|e| format!("{mv}: {e}"))?;
    }
    Ok(())
}

fn report_status(state: &GameState) {
    match state.status() {
        GameStatus::Checkmate { winner } => println!("Checkmate, {winner} wins"),
        GameStatus::Stalemate => println!("Stalemate"),
        GameStatus::Ongoing if state.is_in_check() => {
            println!("{} is in check", state.side_to_move())
        }
        GameStatus::Ongoing => println!("{} to move", state.side_to_move()),
    }
}

fn play() -> io::Result<()> {
    log::info!("starting a new game");
    let mut state = GameState::initial();
    println!("{state}");
    report_status(&state);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "" => continue,
            "quit" => break,
            "board" => println!("{state}"),
            "moves" => {
                let moves = state.valid_moves();
                let listed: Vec<String> = moves.iter().map(ToString::to_string).collect();
                println!("{}", listed.join(" "));
            }
            "undo" => match state.undo_move() {
                Ok(mv) => {
                    println!("took back {mv}");
                    println!("{state}");
                    report_status(&state);
                }
                Err(ChessError::EmptyLog) => {
                    log::warn!("nothing to undo");
                    eprintln!("nothing to undo");
                }
                Err(e) => eprintln!("{e}"),
            },
            input => match play_moves(&mut state, &[input.to_string()]) {
                Ok(()) => {
                    println!("{state}");
                    report_status(&state);
                }
                Err(e) => {
                    log::warn!("rejected input {input:?}");
                    eprintln!("{e}");
                }
            },
        }
        stdout.flush()?;
    }
    log::info!("game over after {} plies", state.history().len());
    Ok(())
}

pub fn main() {
    let args = Arguments::parse();
    env_logger::init();

    match args.command.unwrap_or(Command::Play) {
        Command::Play => {
            if let Err(e) = play() {
                eprintln!("{e}");
            }
        }
        #[cfg(feature = "perft")]
        Command::Perft {
            depth,
            divide,
            iterative,
            bench,
            bulk,
            threads,
            moves,
            no_board,
        } => {
            let mut state = GameState::initial();
            if let Err(e) = play_moves(&mut state, &moves) {
                log::warn!("rejected starting moves");
                eprintln!("{e}");
                return;
            }

            PerftConfig::default()
                .with_depth(depth)
                .divide_moves(divide)
                .iterative_deepening(iterative)
                .benchmark(bench)
                .bulk_counting(bulk)
                .with_threads(threads)
                .show_board(!no_board)
                .go(&state);
        }
        #[cfg(not(feature = "perft"))]
        Command::Perft { .. } => {
            eprintln!("chess-rules has not been compiled with feature `perft`");
        }
    }
}
