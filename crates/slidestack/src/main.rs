use anyhow::{bail, Error};
use slidestack_core::color::{BLACK, GRAY10, WHITE};
use slidestack_core::context::Context;
use slidestack_core::framebuffer::Pixmap;
use slidestack_core::geom::Point;
use slidestack_core::gesture::{DragEvent, GestureEvent};
use slidestack_core::logging::{get_run_id, init_logging, shutdown_logging};
use slidestack_core::settings::Settings;
use slidestack_core::view::filler::Filler;
use slidestack_core::view::navigation::{GesturePhase, NavigationStack, PathBinding, Route};
use slidestack_core::view::{handle_event, render, Bus, Event, Hub, RenderQueue, View};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

const SETTINGS_PATH: &str = "Settings.toml";
const DISPLAY_DIMS: (u32, u32) = (600, 800);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const MAX_FRAMES: usize = 240;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Screen {
    Shelf(String),
    Book(u32),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
enum ScreenKind {
    Shelf,
    Book,
}

impl Route for Screen {
    type Kind = ScreenKind;

    fn kind(&self) -> ScreenKind {
        match self {
            Screen::Shelf(_) => ScreenKind::Shelf,
            Screen::Book(_) => ScreenKind::Book,
        }
    }
}

/// Headless host: feeds events to the stack, renders into a pixmap and
/// advances a simulated clock.
struct Session {
    stack: NavigationStack<Screen>,
    path: PathBinding<Screen>,
    hub: Hub,
    _receiver: Receiver<Event>,
    bus: Bus,
    rq: RenderQueue,
    context: Context,
    fb: Pixmap,
    now: Instant,
}

impl Session {
    fn new(settings: Settings) -> Session {
        let context = Context::new(DISPLAY_DIMS, settings);
        let path: PathBinding<Screen> = PathBinding::default();
        let stack = NavigationStack::builder(path.clone(), |rect| {
            Box::new(Filler::new(rect, WHITE)) as Box<dyn View>
        })
        .destination(ScreenKind::Shelf, |_, rect| {
            Box::new(Filler::new(rect, GRAY10)) as Box<dyn View>
        })
        .destination(ScreenKind::Book, |_, rect| {
            Box::new(Filler::new(rect, BLACK)) as Box<dyn View>
        })
        .build(&context);
        let (hub, receiver) = channel();
        let (width, height) = context.display.dims;

        Session {
            stack,
            path,
            hub,
            _receiver: receiver,
            bus: VecDeque::new(),
            rq: RenderQueue::new(),
            context,
            fb: Pixmap::new(width, height),
            now: Instant::now(),
        }
    }

    fn send(&mut self, evt: Event) -> bool {
        let captured = handle_event(
            &mut self.stack,
            &evt,
            &self.hub,
            &mut self.bus,
            &mut self.rq,
            &mut self.context,
        );
        self.bus.clear();
        self.present();
        captured
    }

    fn present(&mut self) {
        for data in self.rq.drain() {
            render(&self.stack, &mut self.fb, data.rect);
        }
    }

    fn frame(&mut self) {
        self.now += FRAME_INTERVAL;
        self.send(Event::Tick(self.now));
    }

    /// Runs frames until nothing moves anymore.
    fn settle(&mut self) -> Result<usize, Error> {
        for count in 1..=MAX_FRAMES {
            self.frame();
            if !self.stack.is_sliding() && self.stack.phase() == GesturePhase::Idle {
                return Ok(count);
            }
        }

        bail!("navigation stack still animating after {} frames", MAX_FRAMES);
    }

    fn drag(&mut self, drag: DragEvent) {
        self.send(Event::Gesture(GestureEvent::Drag(drag)));
        self.frame();
    }

    fn report(&self, label: &str) {
        println!("{:<12} depth={} path={:?}", label, self.stack.depth(), self.path.get());
        for layer in self.stack.layers() {
            println!(
                "{:<12}   {:?} offset={} bar_hidden={}",
                "", layer.key, layer.offset, layer.bar_hidden
            );
        }
    }
}

fn swipe_back(session: &mut Session, to_x: i32) {
    let start = Point::new(4, 400);
    session.drag(DragEvent::began(start));

    let steps = 8;
    for step in 1..=steps {
        let x = start.x + (to_x - start.x) * step / steps;
        session.drag(DragEvent::moved(start, Point::new(x, 400), 0.6));
        if step == steps / 2 {
            session.report("swiping");
        }
    }

    session.drag(DragEvent::ended(start, Point::new(to_x, 400), 0.6));
}

fn run(settings: Settings) -> Result<(), Error> {
    let mut session = Session::new(settings);
    session.report("start");

    session.path.append(Screen::Shelf("Unread".to_string()));
    let frames = session.settle()?;
    tracing::info!(frames, "Pushed shelf");
    session.report("push shelf");

    session.path.append(Screen::Book(7));
    session.settle()?;
    session.report("push book");

    swipe_back(&mut session, 500);
    let frames = session.settle()?;
    tracing::info!(frames, depth = session.stack.depth(), "Swipe settled");
    session.report("swipe back");

    session.send(Event::Gesture(GestureEvent::Tap(Point::new(10, 10))));
    session.settle()?;
    session.report("back button");

    if session.stack.depth() != 0 {
        bail!("expected to be back on the root screen");
    }

    Ok(())
}

fn load_settings() -> Settings {
    let path = Path::new(SETTINGS_PATH);
    if !path.exists() {
        return Settings::default();
    }

    Settings::load(path).unwrap_or_else(|err| {
        eprintln!("Can't load settings, using defaults: {:#}.", err);
        Settings::default()
    })
}

fn main() -> Result<(), Error> {
    let settings = load_settings();
    init_logging(&settings.logging)?;
    eprintln!("Slidestack run started with ID: {}", get_run_id());

    let result = run(settings);
    if let Err(err) = &result {
        tracing::error!(error = %format!("{:#}", err), "Session failed");
    }

    shutdown_logging();
    result
}
