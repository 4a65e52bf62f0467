mod script;

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, ensure, Context};
use cardboard_animation::{AnimationSpec, SpringSpec};
use cardboard_core::{
    Clock, MonotonicClock, Runtime, RuntimeHandle, RuntimeScheduler, FRAME_NANOS_60HZ,
};
use cardboard_foundation::PointerEvent;
use cardboard_ui::{
    CardSheet, CardState, PanelHeights, SheetConfig, Size, StaticLayout, DEFAULT_TRANSITION_MILLIS,
};

use script::Step;

const CONTAINER: Size = Size::new(390.0, 844.0);
const PANELS: PanelHeights = PanelHeights::new(48.0, 160.0, 320.0);
const MAX_SETTLE_FRAMES: usize = 600;

/// Remembers that the runtime asked for a frame.
#[derive(Default)]
struct FrameRequests {
    pending: AtomicBool,
    total: AtomicUsize,
}

impl FrameRequests {
    fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

impl RuntimeScheduler for FrameRequests {
    fn schedule_frame(&self) {
        self.pending.store(true, Ordering::Release);
        self.total.fetch_add(1, Ordering::Relaxed);
    }
}

/// Where frame timestamps come from.
enum FrameSource {
    /// Sleep between frames and read the wall clock.
    Realtime(MonotonicClock),
    /// Step a virtual clock at 60 Hz without sleeping.
    Virtual(u64),
}

impl FrameSource {
    fn next_frame(&mut self) -> u64 {
        match self {
            FrameSource::Realtime(clock) => {
                std::thread::sleep(Duration::from_nanos(FRAME_NANOS_60HZ));
                clock.frame_time_nanos()
            }
            FrameSource::Virtual(now) => {
                *now += FRAME_NANOS_60HZ;
                *now
            }
        }
    }
}

struct Session {
    runtime: RuntimeHandle,
    requests: Arc<FrameRequests>,
    layout: Rc<StaticLayout>,
    sheet: CardSheet,
    frames: FrameSource,
    pointer_y: f32,
    frames_drawn: usize,
}

impl Session {
    fn frame(&mut self) {
        let nanos = self.frames.next_frame();
        if self.requests.take() || self.runtime.has_frame_callbacks() {
            self.runtime.drain_frame_callbacks(nanos);
            self.frames_drawn += 1;
        }
    }

    fn pointer(&mut self, event: PointerEvent) {
        if let Some(drag) = self.sheet.handle_pointer_event(&event) {
            log::debug!("{:?} at {:.1}", drag.phase, drag.translation_y);
        }
    }

    fn run(&mut self, step: Step) -> anyhow::Result<()> {
        let x = CONTAINER.width / 2.0;
        match step {
            Step::Press(y) => {
                self.pointer_y = y;
                self.pointer(PointerEvent::down(x, y));
            }
            Step::Grab => {
                self.pointer_y = self.sheet.card_origin() + 24.0;
                log::info!("grabbing the card at {:.1}", self.pointer_y);
                self.pointer(PointerEvent::down(x, self.pointer_y));
            }
            Step::MoveBy(dy) => {
                self.pointer_y += dy;
                self.pointer(PointerEvent::moved(x, self.pointer_y));
                self.frame();
            }
            Step::Release => self.pointer(PointerEvent::up(x, self.pointer_y)),
            Step::Toggle => {
                let handle = self.sheet.toggle().context("toggle rejected")?;
                log::info!("toggle started transition {}", handle.id());
            }
            Step::Resize(size) => {
                log::info!("container resized to {}x{}", size.width, size.height);
                self.layout.set_container_size(size);
                self.sheet.on_container_resized();
            }
            Step::Wait(millis) => {
                let frames = millis.saturating_mul(1_000_000) / FRAME_NANOS_60HZ;
                for _ in 0..frames.max(1) {
                    self.frame();
                }
            }
            Step::Settle(expected) => {
                let mut frames = 0;
                while self.runtime.has_frame_callbacks() {
                    if frames >= MAX_SETTLE_FRAMES {
                        bail!("card still moving after {frames} frames");
                    }
                    self.frame();
                    frames += 1;
                }
                let state = self.sheet.current_state();
                ensure!(
                    state == expected,
                    "card settled {state:?} at {:.1}, expected {expected:?}",
                    self.sheet.card_origin()
                );
                log::info!(
                    "settled {state:?} at {:.1} after {frames} frames",
                    self.sheet.card_origin()
                );
            }
        }
        Ok(())
    }
}

fn config_from_args() -> anyhow::Result<(SheetConfig, bool)> {
    let mut config = SheetConfig::default();
    let mut realtime = true;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--virtual-time" => realtime = false,
            "--bouncy" => {
                config = config.with_transition_spec(AnimationSpec::spring_timed(
                    DEFAULT_TRANSITION_MILLIS,
                    SpringSpec::bouncy(),
                ));
            }
            other => bail!("unknown argument {other:?} (expected --virtual-time or --bouncy)"),
        }
    }
    Ok((config, realtime))
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let (config, realtime) = config_from_args()?;

    println!("=== Cardboard card sheet ===");
    println!("Replaying: drag up, interrupt and reverse, toggle, resize, toggle");
    if cfg!(feature = "logging") {
        println!("Set RUST_LOG=debug to see every frame the card draws");
    } else {
        println!("Build with --features logging to see the card's log output");
    }
    println!();

    let requests = Arc::new(FrameRequests::default());
    let runtime = Runtime::new(requests.clone());
    let layout = Rc::new(StaticLayout::new(CONTAINER, PANELS));
    let renderer = |origin_y: f32| log::debug!("card origin {origin_y:.1}");
    let sheet = CardSheet::new(runtime.handle(), layout.clone(), Rc::new(renderer), config);

    let mut session = Session {
        runtime: runtime.handle(),
        requests: requests.clone(),
        layout,
        sheet,
        frames: if realtime {
            FrameSource::Realtime(MonotonicClock::new())
        } else {
            FrameSource::Virtual(0)
        },
        pointer_y: 0.0,
        frames_drawn: 0,
    };

    let wall = MonotonicClock::new();
    let started = wall.now();
    let steps = script::session();
    for (index, step) in steps.iter().enumerate() {
        session
            .run(*step)
            .with_context(|| format!("step {} ({step:?}) failed", index + 1))?;
    }

    ensure!(
        session.sheet.current_state() == CardState::Collapsed,
        "session ended away from the collapsed state"
    );
    println!(
        "Replayed {} steps in {} ms",
        steps.len(),
        wall.elapsed_millis(started)
    );
    println!("Frames drawn: {}", session.frames_drawn);
    println!(
        "Frame requests: {}",
        requests.total.load(Ordering::Relaxed)
    );
    println!(
        "Final state: {:?} at {:.1}",
        session.sheet.current_state(),
        session.sheet.card_origin()
    );
    Ok(())
}
