//! Brawl Core headless runner
//!
//! Plays a scripted exchange between the two fighters at the fixed tick rate
//! and logs gameplay events. Pass a settings JSON path as the first argument
//! to override the defaults. `RUST_LOG=debug` shows every hit and wall push.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use brawl_core::consts::*;
    use brawl_core::renderer::{debug_lines, overlay, player_views};
    use brawl_core::sim::{CollisionEvent, GameState, PlayerId, Timer, tick};
    use brawl_core::{FrameInput, InputState, Key, Settings};

    /// Host frame interval; deliberately not a multiple of the sim step
    const HOST_DT: f32 = 1.0 / 50.0;
    /// Simulated seconds to run
    const RUN_SECONDS: f32 = 8.0;

    struct Runner {
        state: GameState,
        input: InputState,
        accumulator: f32,
        telemetry: Timer,
        hits: [u32; 2],
        wall_pushes: u32,
    }

    impl Runner {
        fn new(settings: Settings) -> Self {
            Self {
                state: GameState::new(settings),
                input: InputState::new(),
                accumulator: 0.0,
                telemetry: Timer::new(1.0),
                hits: [0; 2],
                wall_pushes: 0,
            }
        }

        /// Scripted controls: player one closes in and punches, player two
        /// hops every couple of seconds.
        fn drive_input(&mut self, elapsed: f32) {
            let p1 = self.state.player(PlayerId::One).world_hurtbox();
            let p2 = self.state.player(PlayerId::Two).world_hurtbox();
            let gap = p2.left() - p1.right();

            self.input.process_key(Key::D, gap > ATTACK_WIDTH * 0.5);
            self.input.process_key(Key::Space, gap <= ATTACK_WIDTH);
            self.input.process_key(Key::Up, (elapsed % 2.0) < 0.05);
        }

        /// Run as many fixed ticks as the accumulated host time allows
        fn update(&mut self, dt: f32) {
            self.accumulator += dt.min(0.1);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let frame: FrameInput = self.input.frame();
                tick(&mut self.state, &frame, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
                self.handle_events();
            }

            if self.telemetry.step(dt) {
                let [v1, v2] = player_views(&self.state);
                log::info!(
                    "frame {}: P1 x={:.1} clip={} | P2 x={:.1} clip={} | contacts={}",
                    self.state.frame,
                    v1.hurtbox.x,
                    v1.clip,
                    v2.hurtbox.x,
                    v2.clip,
                    self.state.collision.last_frame_collisions().len()
                );
            }
        }

        fn handle_events(&mut self) {
            for event in self.state.collision.drain_events() {
                match event {
                    CollisionEvent::PlayerHit { attacker, defender } => {
                        self.hits[attacker.index()] += 1;
                        log::debug!("{} lands a hit on {}", attacker.label(), defender.label());
                    }
                    CollisionEvent::BoundaryHit { player } => {
                        self.wall_pushes += 1;
                        log::trace!("{} against the wall", player.label());
                    }
                }
            }
        }
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load(path),
            None => Settings::default(),
        };
        let mut runner = Runner::new(settings);

        let mut elapsed = 0.0;
        while elapsed < RUN_SECONDS {
            runner.drive_input(elapsed);
            runner.update(HOST_DT);
            elapsed += HOST_DT;
        }

        log::info!(
            "Done after {} frames: P1 hits={}, P2 hits={}, wall pushes={}",
            runner.state.frame,
            runner.hits[0],
            runner.hits[1],
            runner.wall_pushes
        );
        for line in debug_lines(&runner.state, Some(&runner.input.frame())) {
            log::debug!("{}", line);
        }
        if let Some(snapshot) = overlay(&runner.state) {
            match serde_json::to_string(&snapshot) {
                Ok(json) => log::info!("overlay: {}", json),
                Err(err) => log::warn!("Could not encode overlay: {}", err),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {}
