#![allow(dead_code)]

use std::{path::PathBuf, process::Command, time::Duration};

use folio_tui::{
    content::ContentItem,
    state::{IntervalSlot, PresentationConfig, PresentationController, Scheduler},
};
use tokio::{sync::mpsc::UnboundedReceiver, time};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: &'static str,
    pub category: &'static str,
}

impl ContentItem for Card {
    fn id(&self) -> &str {
        self.id
    }
    fn category(&self) -> &str {
        self.category
    }
}

pub fn cards(ids: &[&'static str]) -> Vec<Card> {
    ids.iter()
        .map(|id| Card {
            id,
            category: "web",
        })
        .collect()
}

/// A controller wired to real interval tasks, driven like the UI loop does:
/// drain timer events, apply them, then re-sync the interval.
pub struct CarouselHarness {
    pub controller: PresentationController<Card>,
    slot: IntervalSlot,
    scheduler: Scheduler<u64>,
    rx: UnboundedReceiver<u64>,
    pub ticks_applied: usize,
}

impl CarouselHarness {
    pub fn new(items: Vec<Card>, config: PresentationConfig) -> Self {
        let (scheduler, rx) = Scheduler::new();
        Self {
            controller: PresentationController::new(items, config),
            slot: IntervalSlot::default(),
            scheduler,
            rx,
            ticks_applied: 0,
        }
    }

    pub fn sync(&mut self) {
        self.slot
            .sync(self.controller.armed(), &self.scheduler, |epoch| epoch);
    }

    pub fn enter_view(&mut self) {
        self.controller.enter_view();
        self.sync();
    }

    /// Let `duration` of (paused) time pass, applying every tick delivered.
    pub async fn run_for(&mut self, duration: Duration) {
        time::sleep(duration).await;
        while let Ok(epoch) = self.rx.try_recv() {
            self.controller.tick(epoch);
            self.ticks_applied += 1;
            self.sync();
        }
    }

    pub fn current_id(&self) -> Option<&'static str> {
        self.controller.current().map(|card| card.id)
    }
}

/// Run the built `folio` binary with `args`, returning (success, stdout, stderr).
pub fn folio(args: &[&str]) -> (bool, String, String) {
    let config_home = tempfile::tempdir().expect("Failed to create temp dir");
    let output = Command::new(env!("CARGO_BIN_EXE_folio"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home.path())
        .output()
        .expect("Failed to spawn folio");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

pub fn bundled_content() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/portfolio.json")
}
