//! Barrage entry point
//!
//! Web: Canvas2D front end driven by requestAnimationFrame.
//! Native: headless run with a parked player, for balance checks.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, PointerEvent};

    use barrage::persistence::LocalStorage;
    use barrage::platform::{PointerKind, PointerLatch};
    use barrage::renderer::canvas;
    use barrage::persistence::KeyValueStore;
    use barrage::sim::{GameEvent, TickInput};
    use barrage::{Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorage>,
        ctx: CanvasRenderingContext2d,
        pointer: PointerLatch,
        restart: bool,
        settings: Settings,
        // Frame scheduling stops on game over until restart
        scheduled: bool,
    }

    impl Game {
        /// Run and paint one frame; true when the run ended during it
        fn frame(&mut self) -> bool {
            let input = TickInput {
                pointer: self.pointer.take(),
                restart: std::mem::take(&mut self.restart),
            };
            let events = self.session.frame(&input);
            let scene = self.session.scene();
            canvas::paint(&self.ctx, &scene, self.session.last_result(), self.settings.show_hud);
            events.iter().any(|e| matches!(e, GameEvent::GameOver { .. }))
        }
    }

    fn set_restart_visible(visible: bool) {
        let btn = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("restart-btn"))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(btn) = btn {
            let _ = btn
                .style()
                .set_property("display", if visible { "block" } else { "none" });
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Barrage starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no canvas")?
            .dyn_into()?;

        let mut store = LocalStorage;
        let mut settings = Settings::load(&store);
        // The canvas element decides the field size unless settings override it
        if settings == Settings::default() {
            settings.field_width = canvas.width() as f32;
            settings.field_height = canvas.height() as f32;
        }
        // Write defaults on first launch so they can be edited in storage
        if store.get(Settings::STORAGE_KEY).is_none() {
            if let Err(e) = settings.save(&mut store) {
                log::warn!("Could not save settings: {e}");
            }
        }
        canvas.set_width(settings.field_width as u32);
        canvas.set_height(settings.field_height as u32);

        let ctx: CanvasRenderingContext2d = canvas.get_context("2d")?.ok_or("no 2d context")?.dyn_into()?;

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(seed, settings.field(), store),
            ctx,
            pointer: PointerLatch::new(settings.mouse_only),
            restart: false,
            settings,
            scheduled: false,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        set_restart_visible(false);

        request_animation_frame(game);

        log::info!("Barrage running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let target = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let rect = target.get_bounding_client_rect();
            let pos = Vec2::new(
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
            );
            let kind = PointerKind::from_dom(&event.pointer_type());
            game.borrow_mut().pointer.write(pos, kind);
        });
        // Listen on the whole document so the pointer can leave the canvas
        if let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = root.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("restart-btn"))
        else {
            log::warn!("No restart button found");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            game.borrow_mut().restart = true;
            set_restart_visible(false);
            request_animation_frame(game.clone());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.scheduled {
                return;
            }
            g.scheduled = true;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let (ended, running) = {
            let mut g = game.borrow_mut();
            g.scheduled = false;
            let ended = g.frame();
            (ended, g.session.is_running())
        };

        if ended || !running {
            set_restart_visible(true);
        } else {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use barrage::persistence::MemoryStore;
    use barrage::sim::{GameEvent, TickInput};
    use barrage::{Session, Settings, format_survival};

    env_logger::init();
    log::info!("Barrage (native) starting...");

    let mut seed: Option<u64> = None;
    let mut max_frames: u64 = 60 * 60 * 10;
    let mut runs: u32 = 1;
    let mut settings = Settings::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = || args.next().unwrap_or_default();
        match arg.as_str() {
            "--seed" => seed = value().parse().ok(),
            "--frames" => max_frames = value().parse().unwrap_or(max_frames),
            "--runs" => runs = value().parse().unwrap_or(runs),
            "--settings" => settings = Settings::load_file(std::path::Path::new(&value())),
            "-h" | "--help" => {
                println!("usage: barrage [--seed N] [--frames N] [--runs N] [--settings FILE]");
                return;
            }
            other => log::warn!("Ignoring unknown argument {other}"),
        }
    }

    let seed = seed.or(settings.seed).unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let mut session = Session::new(seed, settings.field(), MemoryStore::new());
    // Parked in the middle of the player band
    let input = TickInput {
        pointer: Some(settings.field().player_start()),
        restart: false,
    };
    let restart = TickInput {
        restart: true,
        ..input.clone()
    };

    for run in 1..=runs {
        let (mut spawned, mut secondaries) = (0u32, 0u32);
        let mut tally = |events: Vec<GameEvent>| {
            for event in events {
                match event {
                    GameEvent::Spawned(_) => spawned += 1,
                    GameEvent::SecondaryFired { count, .. } => secondaries += count,
                    _ => {}
                }
            }
        };
        if run > 1 {
            tally(session.frame(&restart));
        }
        while session.is_running() && session.state.elapsed_frames() < max_frames {
            tally(session.frame(&input));
        }
        let frames = session.state.elapsed_frames();
        let best = match session.last_result() {
            Some(result) if result.new_best => "new best".to_string(),
            _ => format!("best {}", format_survival(session.best.frames)),
        };
        println!(
            "run {run}: survived {} (difficulty {}, {spawned} spawned, {secondaries} secondaries), {best}",
            format_survival(frames),
            session.state.difficulty.level(),
        );
        if session.is_running() {
            log::info!("Frame limit reached, ending run");
            break;
        }
    }
}
