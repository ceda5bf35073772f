use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{info, warn};

use crate::feedback::Feedback;
use crate::game::{Game, GameEvent, GameMode, Phase};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::{GameMetrics, ProfileStore};
use crate::render::Renderer;

pub struct HumanMode {
    game: Game,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    profile: ProfileStore,
    feedback: Feedback,
    paused: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(mode: GameMode, profile: ProfileStore) -> Self {
        let mut game = Game::new(mode);
        game.start(mode, Instant::now());

        let mut metrics = GameMetrics::new();
        metrics.high_score = profile.profile().best_score;

        Self {
            game,
            metrics,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            profile,
            feedback: Feedback::silent(),
            paused: false,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // One logical tick per frame at 60 Hz; the loop paces committed
        // moves internally from the elapsed time, so the frame rate and the
        // move rate stay independent
        let frame_interval = Duration::from_millis(16);
        let mut frame_timer = interval(frame_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Logical tick; pausing simply withholds ticks
                _ = frame_timer.tick() => {
                    if !self.paused {
                        self.advance_frame();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let snapshot = self.game.snapshot(Instant::now());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics, self.paused);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn advance_frame(&mut self) {
        let events = self.game.tick(Instant::now());

        for event in &events {
            self.feedback.dispatch(event);

            if let GameEvent::GameOver { score, apples } = *event {
                let snapshot = self.game.snapshot(Instant::now());
                self.metrics.on_game_over(score, apples, snapshot.max_combo);

                let new_best = self.profile.record_run(score, apples);
                info!(score, apples, new_best, "run finished");

                // Fire-and-forget: a failed save never disturbs the loop
                if let Err(error) = self.profile.save() {
                    warn!(%error, "failed to save profile");
                }
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    if !self.paused {
                        self.game.queue_direction(direction);
                    }
                }
                KeyAction::SelectMode(mode) => {
                    self.start_run(mode);
                }
                KeyAction::TogglePause => {
                    self.toggle_pause();
                }
                KeyAction::Restart => {
                    self.start_run(self.game.mode());
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn start_run(&mut self, mode: GameMode) {
        self.paused = false;
        self.game.start(mode, Instant::now());
        self.metrics.on_game_start();
        info!(mode = mode.label(), "run started");
    }

    fn toggle_pause(&mut self) {
        if self.game.phase() != Phase::Running {
            return;
        }
        if self.paused {
            // Re-base the loop's clock so the paused span is not replayed
            self.game.resync(Instant::now());
        }
        self.paused = !self.paused;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
