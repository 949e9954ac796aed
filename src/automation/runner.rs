//! Background runner for capture → recognize → solve → execute cycles.
//!
//! One cycle treats "capture + recognize" as a single atomic unit: the source
//! is refreshed once and the whole grid is read from that snapshot. The abort
//! flag is polled between cycles, never mid-cycle, so a cycle always finishes
//! what it started. Hosts that also offer a one-off foreground recognition
//! should gate it on [`is_session_running`] — the runner and a manual pass
//! must not share a capture snapshot.

use anyhow::{anyhow, Result};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread::{self, JoinHandle};

use crate::card::Card;
use crate::config::RegionConfig;
use crate::recognition::detect::{detect_grid, CaptureSource};

/// Global flag indicating a session loop is currently running.
static SESSION_RUNNING: AtomicBool = AtomicBool::new(false);

/// Global abort flag - set by the host's abort control.
static ABORT_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Deals completed in the current run (for host progress display).
static COMPLETED_DEALS: AtomicU32 = AtomicU32::new(0);

/// A position a move touches: the free hand slot or a field column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Hand,
    Column(usize),
}

/// One card move, from stack to stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Slot,
    pub to: Slot,
}

/// External move-solving search.
pub trait Solver {
    /// Takes the recognized column-major grid; returns the winning move list,
    /// or `None` when the deal is unsolvable.
    fn solve(&self, grid: &[Vec<Card>]) -> Option<Vec<Move>>;
}

/// External input surface that performs moves in the game.
pub trait MoveExecutor {
    /// Plays the given move list on the live game.
    fn execute(&mut self, moves: &[Move]) -> Result<()>;
    /// Requests a fresh deal (e.g. clicks the new-game button).
    fn next_deal(&mut self) -> Result<()>;
}

/// Checks if a session loop is currently running.
pub fn is_session_running() -> bool {
    SESSION_RUNNING.load(Ordering::SeqCst)
}

/// Requests abort of a running session. The loop stops before its next cycle.
pub fn request_abort() {
    ABORT_REQUESTED.store(true, Ordering::SeqCst);
}

/// Resets the abort flag. Called before a session starts.
pub fn reset_abort_flag() {
    ABORT_REQUESTED.store(false, Ordering::SeqCst);
}

/// Deals completed in the current run (for host progress display).
pub fn completed_deals() -> u32 {
    COMPLETED_DEALS.load(Ordering::SeqCst)
}

/// Plays up to `deals` deals synchronously.
///
/// Unsolvable deals are skipped to the next deal without counting. Returns
/// the number of deals completed, which is short of `deals` only when
/// aborted.
pub fn run_deals<C, S, E>(
    source: &mut C,
    solver: &S,
    executor: &mut E,
    config: &RegionConfig,
    deals: u32,
) -> Result<u32>
where
    C: CaptureSource,
    S: Solver,
    E: MoveExecutor,
{
    let mut completed = 0;
    COMPLETED_DEALS.store(0, Ordering::SeqCst);

    while completed < deals {
        if ABORT_REQUESTED.load(Ordering::SeqCst) {
            crate::log(&format!(
                "Abort requested, stopping after {}/{} deals",
                completed, deals
            ));
            break;
        }

        source.refresh()?;
        let detection = detect_grid(&*source, config)?;
        let cards = detection.cards();

        match solver.solve(&cards) {
            Some(moves) => {
                crate::log(&format!(
                    "Deal {}/{}: solved in {} moves",
                    completed + 1,
                    deals,
                    moves.len()
                ));
                executor.execute(&moves)?;
                completed += 1;
                COMPLETED_DEALS.store(completed, Ordering::SeqCst);
            }
            None => {
                crate::log("Deal is unsolvable, skipping");
            }
        }

        if completed < deals {
            executor.next_deal()?;
        }
    }

    Ok(completed)
}

/// Starts the session loop in a background thread.
///
/// Returns the thread handle so the caller can join with a bounded wait on
/// teardown. Use [`is_session_running`] to poll and [`request_abort`] to stop
/// cooperatively.
///
/// # Errors
/// Returns an error if a session is already running.
pub fn start_sessions<C, S, E>(
    mut source: C,
    solver: S,
    mut executor: E,
    config: RegionConfig,
    deals: u32,
) -> Result<JoinHandle<Result<u32>>>
where
    C: CaptureSource + Send + 'static,
    S: Solver + Send + 'static,
    E: MoveExecutor + Send + 'static,
{
    if SESSION_RUNNING.swap(true, Ordering::SeqCst) {
        return Err(anyhow!("A session is already running"));
    }
    reset_abort_flag();
    crate::log(&format!("Starting session: {} deals", deals));

    let handle = thread::spawn(move || {
        let result = run_deals(&mut source, &solver, &mut executor, &config, deals);
        SESSION_RUNNING.store(false, Ordering::SeqCst);
        match &result {
            Ok(n) => crate::log(&format!("Session finished: {}/{} deals completed", n, deals)),
            Err(e) => crate::log(&format!("Session failed: {}", e)),
        }
        result
    });

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bbox;
    use image::{ImageBuffer, Rgba};
    use std::cell::Cell;

    struct StubSource {
        refreshes: u32,
    }

    impl CaptureSource for StubSource {
        fn refresh(&mut self) -> Result<()> {
            self.refreshes += 1;
            Ok(())
        }

        fn dimensions(&self) -> (u32, u32) {
            (1920, 1080)
        }

        fn sample(&self, _bbox: Bbox, size: u32) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
            Ok(ImageBuffer::from_pixel(size, size, Rgba([10, 20, 30, 255])))
        }
    }

    struct StubSolver {
        unsolvable_first: Cell<u32>,
    }

    impl Solver for StubSolver {
        fn solve(&self, grid: &[Vec<Card>]) -> Option<Vec<Move>> {
            assert_eq!(grid.len(), 9);
            if self.unsolvable_first.get() > 0 {
                self.unsolvable_first.set(self.unsolvable_first.get() - 1);
                return None;
            }
            Some(vec![Move {
                from: Slot::Column(0),
                to: Slot::Hand,
            }])
        }
    }

    #[derive(Default)]
    struct StubExecutor {
        executed: u32,
        next_deals: u32,
    }

    impl MoveExecutor for StubExecutor {
        fn execute(&mut self, moves: &[Move]) -> Result<()> {
            assert!(!moves.is_empty());
            self.executed += 1;
            Ok(())
        }

        fn next_deal(&mut self) -> Result<()> {
            self.next_deals += 1;
            Ok(())
        }
    }

    // One test driving both behaviors so the global abort flag is never
    // touched by two tests at once.
    #[test]
    fn test_run_deals_skips_unsolvable_and_honors_abort() {
        reset_abort_flag();
        let mut source = StubSource { refreshes: 0 };
        let solver = StubSolver {
            unsolvable_first: Cell::new(1),
        };
        let mut executor = StubExecutor::default();
        let config = RegionConfig::default();

        let completed = run_deals(&mut source, &solver, &mut executor, &config, 2).unwrap();
        assert_eq!(completed, 2);
        assert_eq!(completed_deals(), 2);
        // Three cycles: unsolvable, solved, solved.
        assert_eq!(source.refreshes, 3);
        assert_eq!(executor.executed, 2);
        // Next deal requested after the skip and between completions, but not
        // after the final one.
        assert_eq!(executor.next_deals, 2);

        // Aborting before the run prevents any cycle from starting.
        request_abort();
        let completed = run_deals(&mut source, &solver, &mut executor, &config, 2).unwrap();
        assert_eq!(completed, 0);
        assert_eq!(source.refreshes, 3);
        reset_abort_flag();
    }
}
