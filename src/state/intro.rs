//! One-shot intro sequence shown before the page.

use std::time::Duration;

use tracing::debug;

use super::schedule::{Scheduler, TaskHandle};

pub const NAME_DWELL: Duration = Duration::from_secs(3);
pub const PHOTO_DWELL: Duration = Duration::from_secs(3);
pub const COMPLETION_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntroPhase {
    #[default]
    Name,
    Photo,
    Complete,
}

/// Timer signals driving the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroSignal {
    ShowPhoto,
    Finish,
    Done,
}

/// Linear `Name -> Photo -> Complete` sequence.
///
/// Both phase timers are armed at start, measured from mount. Reaching
/// `Complete` arms the completion delay; [`IntroSequencer::handle`] returns
/// `true` exactly once, when that delay elapses. Dropping the sequencer
/// cancels whatever is still pending.
#[derive(Debug)]
pub struct IntroSequencer {
    phase: IntroPhase,
    completed: bool,
    pending: Vec<TaskHandle>,
}

impl IntroSequencer {
    pub fn start<E>(scheduler: &Scheduler<E>) -> Self
    where
        E: From<IntroSignal> + Send + 'static,
    {
        debug!("Intro started");
        Self {
            phase: IntroPhase::Name,
            completed: false,
            pending: vec![
                scheduler.after(NAME_DWELL, IntroSignal::ShowPhoto.into()),
                scheduler.after(NAME_DWELL + PHOTO_DWELL, IntroSignal::Finish.into()),
            ],
        }
    }

    pub const fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// Apply a timer signal. Returns `true` when the completion callback
    /// should run.
    pub fn handle<E>(&mut self, signal: IntroSignal, scheduler: &Scheduler<E>) -> bool
    where
        E: From<IntroSignal> + Send + 'static,
    {
        match (signal, self.phase) {
            (IntroSignal::ShowPhoto, IntroPhase::Name) => {
                self.phase = IntroPhase::Photo;
                debug!("Intro: photo");
                false
            }
            (IntroSignal::Finish, IntroPhase::Name | IntroPhase::Photo) => {
                self.phase = IntroPhase::Complete;
                self.pending
                    .push(scheduler.after(COMPLETION_DELAY, IntroSignal::Done.into()));
                debug!("Intro: complete");
                false
            }
            (IntroSignal::Done, IntroPhase::Complete) if !self.completed => {
                self.completed = true;
                self.pending.clear();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::{self, Instant};

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    struct Ev(IntroSignal);

    impl From<IntroSignal> for Ev {
        fn from(signal: IntroSignal) -> Self {
            Self(signal)
        }
    }

    fn within(start: Instant, expected: Duration) -> bool {
        let elapsed = start.elapsed();
        elapsed >= expected && elapsed <= expected + Duration::from_millis(5)
    }

    #[tokio::test(start_paused = true)]
    async fn test_phases_follow_the_clock() {
        let (scheduler, mut rx) = Scheduler::<Ev>::new();
        let start = Instant::now();
        let mut intro = IntroSequencer::start(&scheduler);
        assert_eq!(intro.phase(), IntroPhase::Name);

        let mut completions = 0;
        while let Some(Ev(signal)) = rx.recv().await {
            let done = intro.handle(signal, &scheduler);
            match signal {
                IntroSignal::ShowPhoto => {
                    assert!(within(start, Duration::from_secs(3)));
                    assert_eq!(intro.phase(), IntroPhase::Photo);
                }
                IntroSignal::Finish => {
                    assert!(within(start, Duration::from_secs(6)));
                    assert_eq!(intro.phase(), IntroPhase::Complete);
                }
                IntroSignal::Done => {
                    assert!(within(start, Duration::from_millis(6500)));
                    assert!(done);
                    completions += 1;
                    break;
                }
            }
        }
        assert_eq!(completions, 1);

        let extra = time::timeout(Duration::from_secs(30), rx.recv()).await;
        assert!(extra.is_err(), "nothing fires after completion");
    }

    #[tokio::test(start_paused = true)]
    async fn test_still_in_name_phase_before_three_seconds() {
        let (scheduler, mut rx) = Scheduler::<Ev>::new();
        let intro = IntroSequencer::start(&scheduler);

        let early = time::timeout(Duration::from_millis(2900), rx.recv()).await;
        assert!(early.is_err());
        assert_eq!(intro.phase(), IntroPhase::Name);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timers() {
        let (scheduler, mut rx) = Scheduler::<Ev>::new();
        let intro = IntroSequencer::start(&scheduler);
        time::advance(Duration::from_secs(1)).await;
        drop(intro);

        let got = time::timeout(Duration::from_secs(20), rx.recv()).await;
        assert!(got.is_err(), "unmounted intro must not fire");
    }

    #[tokio::test]
    async fn test_done_is_reported_once() {
        let (scheduler, _rx) = Scheduler::<Ev>::new();
        let mut intro = IntroSequencer::start(&scheduler);
        assert!(!intro.handle(IntroSignal::Done, &scheduler), "not complete yet");
        intro.handle(IntroSignal::Finish, &scheduler);
        assert!(intro.handle(IntroSignal::Done, &scheduler));
        assert!(!intro.handle(IntroSignal::Done, &scheduler));
        assert!(!intro.handle(IntroSignal::ShowPhoto, &scheduler), "no going back");
        assert_eq!(intro.phase(), IntroPhase::Complete);
    }
}
