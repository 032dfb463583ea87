//! # Perft testing/benchmarking

use std::{thread::ScopedJoinHandle, time::Instant};

use super::state::GameState;

/// Builder pattern to configure a Perft test.
#[derive(Clone, Debug)]
pub struct PerftConfig {
    pub depth: u8,
    pub iterative: bool,
    pub bulk_counting: bool,
    pub divide: bool,
    pub threads: usize,

    pub bench: bool,

    pub show_board: bool,
}
impl Default for PerftConfig {
    fn default() -> Self {
        Self {
            depth: 1,
            iterative: false,
            bulk_counting: false,
            divide: false,
            threads: 1,
            bench: false,
            show_board: true,
        }
    }
}
impl PerftConfig {
    /// Whether to show the board at the start of the run.
    ///
    /// Should be disabled when trying to parse the output.
    pub fn show_board(mut self, value: bool) -> Self {
        self.show_board = value;
        self
    }

    /// Sets the maximum depth of the perft run.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// If set to true, the run will start from all depth between 1 and the maximum.
    pub fn iterative_deepening(mut self, value: bool) -> Self {
        self.iterative = value;
        self
    }

    /// If set to true, simply returns the number of the legal moves at horizon nodes.
    pub fn bulk_counting(mut self, value: bool) -> Self {
        self.bulk_counting = value;
        self
    }

    /// Shows perft results per legal move at the starting position.
    pub fn divide_moves(mut self, value: bool) -> Self {
        self.divide = value;
        self
    }

    /// Measures the time it takes to complete one depth.
    pub fn benchmark(mut self, value: bool) -> Self {
        self.bench = value;
        self
    }

    /// Splits the root moves between this many worker threads. `0` uses one
    /// thread per available CPU.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Runs a Perft test on the given game, returning the node count of the
    /// deepest run.
    pub fn go(&self, state: &GameState) -> u64 {
        if self.show_board {
            println!("{state}\n");
        }
        let threads = match self.threads {
            0 => num_cpus::get(),
            n => n,
        };
        log::info!(
            "running perft to depth {} on {threads} thread(s)",
            self.depth
        );

        let mut nodes = 0;
        for depth in (if self.iterative { 1 } else { self.depth })..=self.depth {
            if self.iterative && self.divide {
                println!("====== DEPTH {depth} ======")
            }

            let start = Instant::now();
            let divided = divide(state, depth, self.bulk_counting, threads);
            nodes = divided.iter().map(|(_, n)| n).sum();
            let elapsed = start.elapsed().as_secs_f64();

            if self.divide {
                for (mv, mv_nodes) in &divided {
                    println!("{mv}: {mv_nodes} nodes");
                }
            }
            println!("depth {depth}: {nodes} nodes");
            if self.bench {
                println!(
                    "\ttook {} ({})",
                    human_readable_time(elapsed),
                    human_readable_nps(nodes as f64 / elapsed)
                );
            }
        }
        nodes
    }
}

/// Counts the leaf nodes of the game tree of the given depth.
pub fn perft(state: &GameState, depth: u8) -> u64 {
    let mut state = state.clone();
    perft_rec(&mut state, depth, true)
}

/// Node counts below each root move. Every worker explores its own copy of the
/// game.
fn divide(
    state: &GameState,
    depth: u8,
    bulk_counting: bool,
    threads: usize,
) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let moves = state.valid_moves();
    let chunk_size = moves.len().div_ceil(threads.max(1)).max(1);
    std::thread::scope(|scope| {
        let workers: Vec<_> = moves
            .chunks(chunk_size)
            .map(|chunk| {
                let mut state = state.clone();
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|&mv| {
                            state.apply(mv);
                            let mv_nodes = perft_rec(&mut state, depth - 1, bulk_counting);
                            state.revert();
                            (mv.to_string(), mv_nodes)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        join_workers(workers)
    })
}

/// Gathers the results of every worker, in spawning order. A worker panic is
/// passed on to the caller.
fn join_workers<T>(workers: Vec<ScopedJoinHandle<'_, Vec<T>>>) -> Vec<T> {
    workers
        .into_iter()
        .flat_map(|worker| {
            worker
                .join()
                .unwrap_or_else(|e| std::panic::resume_unwind(e))
        })
        .collect()
}

/// Traverses all nodes accessible from a given position, returning the number of
/// nodes traversed.
fn perft_rec(state: &mut GameState, depth_left: u8, bulk_counting: bool) -> u64 {
    if depth_left == 0 {
        1
    } else if depth_left == 1 && bulk_counting {
        state.valid_moves().len() as u64
    } else {
        state
            .valid_moves()
            .iter()
            .map(|&mv| {
                state.apply(mv);
                let mv_nodes = perft_rec(state, depth_left - 1, bulk_counting);
                state.revert();
                mv_nodes
            })
            .sum()
    }
}

fn human_readable_time(secs: f64) -> String {
    if secs < 0.000_001 {
        format!("{:.3}ns", secs * 1_000_000_000.)
    } else if secs < 0.001 {
        format!("{:.3}μs", secs * 1_000_000.)
    } else if secs < 1. {
        format!("{:.3}ms", secs * 1_000.)
    } else {
        format!("{secs:.3}s")
    }
}

fn human_readable_nps(nps: f64) -> String {
    if nps > 1_000_000_000. {
        format!("{:.3}Gnps", nps / 1_000_000_000.)
    } else if nps > 1_000_000. {
        format!("{:.3}Mnps", nps / 1_000_000.)
    } else if nps > 1_000. {
        format!("{:.3}Knps", nps / 1_000.)
    } else {
        format!("{nps:.3}nps")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tests::setup;

    fn check_matching(state: &GameState, expected: &[u64]) {
        for (depth, expected) in expected.iter().enumerate() {
            let actual = perft(state, depth as u8 + 1);
            assert_eq!(
                actual,
                *expected,
                "Expected {expected} at depth {} for\n{state}\nbut got {actual}",
                depth + 1,
            );
        }
    }

    #[test]
    fn initial_position_perft() {
        check_matching(&GameState::initial(), &[20, 400, 8902])
    }

    #[test]
    #[ignore]
    fn initial_position_perft_deep() {
        check_matching(&GameState::initial(), &[20, 400, 8902, 197281, 4865609])
    }

    #[test]
    fn kiwipete_perft() {
        check_matching(
            &setup("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -"),
            &[48, 2039],
        )
    }

    #[test]
    #[ignore]
    fn kiwipete_perft_deep() {
        check_matching(
            &setup("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -"),
            &[48, 2039, 97862, 4085603],
        )
    }

    #[test]
    fn endgame_perft() {
        check_matching(
            &setup("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
            &[14, 191, 2812],
        )
    }

    #[test]
    fn mirrored_perft() {
        let expected = [6, 264];
        check_matching(
            &setup("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -"),
            &expected,
        );
        check_matching(
            &setup("r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ -"),
            &expected,
        )
    }

    #[test]
    fn promotion_heavy_perft() {
        check_matching(
            &setup("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ -"),
            &[44, 1486],
        )
    }

    #[test]
    fn threaded_divide_matches_sequential() {
        let state = GameState::initial();
        let sequential = PerftConfig::default()
            .with_depth(3)
            .show_board(false)
            .go(&state);
        let threaded = PerftConfig::default()
            .with_depth(3)
            .with_threads(4)
            .bulk_counting(true)
            .show_board(false)
            .go(&state);
        assert_eq!(sequential, 8902);
        assert_eq!(threaded, 8902);
    }

    #[test]
    #[should_panic(expected = "worker failed")]
    fn worker_panics_are_not_swallowed() {
        std::thread::scope(|scope| {
            let workers = vec![
                scope.spawn(|| vec![1u64, 2]),
                scope.spawn(|| -> Vec<u64> { panic!("worker failed") }),
            ];
            join_workers(workers)
        });
    }

    #[test]
    fn worker_results_keep_spawning_order() {
        let joined = std::thread::scope(|scope| {
            let workers = (0..4u64).map(|i| scope.spawn(move || vec![i, i + 10])).collect();
            join_workers(workers)
        });
        assert_eq!(joined, [0, 10, 1, 11, 2, 12, 3, 13]);
    }

    #[test]
    fn perft_leaves_state_untouched() {
        let state = setup("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -");
        let before = state.clone();
        perft(&state, 2);
        assert_eq!(state, before);
    }

    #[test]
    fn readable_units() {
        assert_eq!(human_readable_time(2.5), "2.500s");
        assert_eq!(human_readable_time(0.0025), "2.500ms");
        assert_eq!(human_readable_nps(2_500_000.), "2.500Mnps");
    }
}
