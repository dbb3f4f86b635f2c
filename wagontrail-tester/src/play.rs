//! Interactive console session.
//!
//! Standard input is read on its own thread so the simulation keeps ticking
//! at a fixed frame rate while the player is typing.
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;
use wagontrail_game::GameSimulation;

/// Line that ends the session.
pub const QUIT: &str = "quit";

#[derive(Debug, Clone, Copy)]
pub struct PlayOptions {
    pub frame: Duration,
    pub max_frames: Option<usize>,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            frame: Duration::from_millis(100),
            max_frames: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: usize,
    pub lines_sent: usize,
    pub lines_refused: usize,
}

/// Forward stdin lines to a channel. The sender drops at end of input.
pub fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
        debug!("stdin closed");
    });
    rx
}

/// Tick `game` until the player quits, input closes or the frame cap is hit.
pub fn run_session(
    game: &mut GameSimulation,
    input: &Receiver<String>,
    options: PlayOptions,
) -> Result<SessionSummary> {
    game.start().context("starting game")?;
    let mut summary = SessionSummary::default();

    loop {
        if options.max_frames.is_some_and(|cap| summary.frames >= cap) {
            info!("frame cap of {} reached", summary.frames);
            break;
        }

        let mut closed = false;
        loop {
            match input.try_recv() {
                Ok(line) if line.trim().eq_ignore_ascii_case(QUIT) => {
                    info!("player quit after {} frames", summary.frames);
                    return Ok(summary);
                }
                Ok(line) => {
                    if game.send_input(&line).context("delivering input")? {
                        summary.lines_sent += 1;
                    } else {
                        summary.lines_refused += 1;
                        warn!("input {line:?} ignored while the game is busy");
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    closed = true;
                    break;
                }
            }
        }

        game.tick().context("ticking game")?;
        summary.frames += 1;

        if closed && game.accepting_input() {
            break;
        }
        if !options.frame.is_zero() {
            thread::sleep(options.frame);
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wagontrail_game::{ModeCategory, SimConfig};

    fn fast() -> PlayOptions {
        PlayOptions {
            frame: Duration::ZERO,
            max_frames: Some(50),
        }
    }

    fn feed(lines: &[&str]) -> Receiver<String> {
        let (tx, rx) = mpsc::channel();
        for line in lines {
            tx.send((*line).to_string()).unwrap();
        }
        rx
    }

    #[test]
    fn lines_reach_the_game_and_quit_ends_the_session() {
        let mut game = GameSimulation::new(SimConfig::default()).unwrap();
        let rx = feed(&["1", "Ann", "", "y", "1", QUIT]);
        let summary = run_session(&mut game, &rx, fast()).unwrap();
        assert_eq!(summary.lines_sent, 5);
        assert_eq!(summary.frames, 0);
        assert_eq!(game.active_category(), Some(ModeCategory::InitialPurchases));
    }

    #[test]
    fn closed_input_stops_once_the_game_waits() {
        let mut game = GameSimulation::new(SimConfig::default()).unwrap();
        let screens = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&screens);
        game.on_screen_changed(move |_| *sink.borrow_mut() += 1);
        let rx = feed(&["2"]);
        let summary = run_session(&mut game, &rx, fast()).unwrap();
        assert_eq!(summary.frames, 1);
        assert!(*screens.borrow() >= 2);
    }

    #[test]
    fn frame_cap_bounds_an_idle_session() {
        let mut game = GameSimulation::new(SimConfig::default()).unwrap();
        let (_tx, rx) = mpsc::channel::<String>();
        let summary = run_session(
            &mut game,
            &rx,
            PlayOptions {
                frame: Duration::ZERO,
                max_frames: Some(3),
            },
        )
        .unwrap();
        assert_eq!(summary.frames, 3);
        assert_eq!(summary.lines_sent, 0);
    }
}
