//! Drives an edit session from a parsed script on a simulated clock.

use crate::script::Step;
use crossbeam_channel::unbounded;
use hackademy_core::{
    Config, Curriculum, EditSession, EditorEvent, EditorFrame, Key, KeyInput, MissionProgress,
    ReviewRequest, ScrollOffset, StageId, StageProvider, Vocabulary,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// What a replay produced.
pub(crate) struct ReplayReport {
    /// Frame after every step when tracing, else only the final one.
    pub frames: Vec<EditorFrame>,
    pub stage: Option<StageId>,
    pub solved: bool,
    pub reviews: Vec<ReviewRequest>,
}

#[cfg(test)]
impl ReplayReport {
    pub fn final_frame(&self) -> Option<&EditorFrame> {
        self.frames.last()
    }
}

pub(crate) fn run(
    stage: Option<StageId>,
    steps: &[Step],
    config: &Config,
    trace: bool,
) -> anyhow::Result<ReplayReport> {
    let mut progress = match stage {
        Some(id) => {
            let curriculum = Curriculum::builtin();
            let index = curriculum
                .position(id)
                .ok_or_else(|| anyhow::anyhow!("stage {} is not in the curriculum", id))?;
            let mut progress = MissionProgress::new(curriculum)?;
            for _ in 0..index {
                progress.advance();
            }
            Some(progress)
        }
        None => None,
    };
    let initial = progress
        .as_ref()
        .map(|p| p.current_stage().initial_code)
        .unwrap_or("");

    let (change_tx, change_rx) = unbounded();
    let mut session = EditSession::new(initial, Arc::new(Vocabulary::builtin()), config);
    session.on_buffer_change(move |snapshot| {
        let _ = change_tx.send(snapshot.text());
    });

    let mut now = Instant::now();
    let mut frames = Vec::new();
    let mut reviews = Vec::new();
    for step in steps {
        apply(&mut session, step, &mut now);
        session.tick(now);
        for text in change_rx.try_iter() {
            if let Some(request) = progress.as_mut().and_then(|p| p.on_buffer_change(&text)) {
                info!(epoch = request.epoch, "review requested");
                reviews.push(request);
            }
        }
        if trace {
            frames.push(session.frame());
        }
    }
    if !trace || frames.is_empty() {
        frames.push(session.frame());
    }

    Ok(ReplayReport {
        frames,
        stage,
        solved: progress.as_ref().is_some_and(|p| p.is_solved()),
        reviews,
    })
}

fn apply(session: &mut EditSession, step: &Step, now: &mut Instant) {
    match step {
        Step::Type(text) => {
            for ch in text.chars() {
                session.handle_key(KeyInput::plain(Key::Char(ch)), *now);
            }
        }
        Step::Paste(text) => {
            session.handle(EditorEvent::Text(text.clone()), *now);
        }
        Step::Key(input) => {
            session.handle_key(*input, *now);
        }
        Step::Cursor(index) => {
            session.handle(EditorEvent::SetCursor(*index), *now);
        }
        Step::Scroll { top, left } => {
            session.handle(EditorEvent::Scroll(ScrollOffset::new(*top, *left)), *now);
        }
        Step::Blur => {
            session.handle(EditorEvent::FocusLost, *now);
        }
        Step::Focus => {
            session.handle(EditorEvent::FocusGained, *now);
        }
        Step::Click(index) => {
            session.handle(EditorEvent::PointerSelect(*index), *now);
        }
        Step::Wait(ms) => *now += Duration::from_millis(*ms),
    }
}
