//! Dish Slash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, EventTarget, HtmlCanvasElement, KeyboardEvent, PointerEvent,
        TouchEvent, Window,
    };

    use dish_slash::audio::WebAudio;
    use dish_slash::i18n::{Locale, Localizer};
    use dish_slash::platform::RafScheduler;
    use dish_slash::renderer::Canvas2d;
    use dish_slash::sim::{GameEvent, GamePhase, SoundCue};
    use dish_slash::{Game, Records, Settings};

    type WebGame = Game<Records, WebAudio, RafScheduler>;
    type Shared<T> = Rc<RefCell<T>>;

    /// Host clock in the same time base as animation frame timestamps
    fn now_ms(window: &Window) -> f64 {
        window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn listen(
        target: &EventTarget,
        name: &str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    /// Size the backing store to the CSS box times the pixel ratio.
    /// Returns the CSS size, which is the coordinate space of the game.
    fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement, surface: &Canvas2d) -> (f32, f32) {
        let dpr = window.device_pixel_ratio();
        let css_w = canvas.client_width().max(1) as f64;
        let css_h = canvas.client_height().max(1) as f64;
        canvas.set_width((css_w * dpr) as u32);
        canvas.set_height((css_h * dpr) as u32);
        surface.set_pixel_ratio(dpr);
        (css_w as f32, css_h as f32)
    }

    /// Fill every `data-i18n` element with its localized text
    fn apply_labels(document: &Document, localizer: &Localizer) -> Result<(), JsValue> {
        let nodes = document.query_selector_all("[data-i18n]")?;
        for i in 0..nodes.length() {
            let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            if let Some(key) = el.get_attribute("data-i18n") {
                el.set_text_content(Some(localizer.text(&key)));
            }
        }
        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Dish Slash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        set_hidden(&document, "loading", true);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let surface = Rc::new(RefCell::new(Canvas2d::new(&canvas)?));
        let (width, height) = fit_canvas(&window, &canvas, &surface.borrow());

        // First visit follows the browser language
        let settings = Settings::stored().unwrap_or_else(|| Settings {
            locale: window
                .navigator()
                .language()
                .and_then(|lang| Locale::from_code(&lang))
                .unwrap_or_default(),
            ..Settings::default()
        });
        let settings = Rc::new(RefCell::new(settings));
        let localizer = Localizer::new(settings.borrow().locale);
        apply_labels(&document, &localizer)?;

        let mut audio = WebAudio::new();
        settings.borrow().apply_audio(&mut audio);

        let seed = js_sys::Date::now() as u64;
        let game: Shared<WebGame> = Rc::new(RefCell::new(Game::new(
            seed,
            width,
            height,
            Records::load(),
            audio,
            RafScheduler::new(window.clone()),
        )));
        game.borrow_mut()
            .set_particles_enabled(settings.borrow().particles);
        set_text(
            &document,
            "#hud-best .hud-value",
            &game.borrow().high_score().to_string(),
        );

        log::info!("Game initialized with seed: {}", seed);

        // Every animation frame: simulate, then paint
        {
            let game_cb = game.clone();
            let surface = surface.clone();
            let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                let mut g = game_cb.borrow_mut();
                g.frame(time);
                g.render(&mut *surface.borrow_mut());
            });
            game.borrow_mut().scheduler_mut().set_callback(closure);
        }

        subscribe_hud(&game, document.clone(), localizer);
        setup_pointer_input(&window, &canvas, game.clone())?;
        setup_touch_input(&window, &canvas, game.clone())?;
        setup_buttons(&document, game.clone(), settings.clone())?;
        setup_keyboard(&window, game.clone(), settings)?;
        setup_auto_pause(&window, &document, game.clone())?;
        setup_resize(&window, canvas, surface.clone(), game.clone())?;
        setup_teardown(&window, game.clone())?;

        // Paint the idle background behind the menu
        game.borrow().render(&mut *surface.borrow_mut());
        set_hidden(&document, "menu", false);

        log::info!("Dish Slash running!");
        Ok(())
    }

    /// Keep the DOM HUD and overlays in sync with game events
    fn subscribe_hud(game: &Shared<WebGame>, document: Document, localizer: Localizer) {
        game.borrow_mut().subscribe(move |event| match *event {
            GameEvent::ScoreChanged(score) => {
                set_text(&document, "#hud-score .hud-value", &score.to_string());
            }
            GameEvent::ComboChanged(combo) => {
                // Only show when 2+ for an actual combo
                set_hidden(&document, "hud-combo", combo < 2);
                if combo >= 2 {
                    set_text(&document, "#hud-combo .hud-value", &format!("x{}", combo));
                }
            }
            GameEvent::LivesChanged(lives) => {
                set_text(&document, "#hud-lives .hud-value", &"❤️".repeat(lives as usize));
            }
            GameEvent::StateChanged(phase) => {
                set_hidden(&document, "menu", phase != GamePhase::Menu);
                set_hidden(&document, "hud", phase == GamePhase::Menu);
                set_hidden(&document, "pause-menu", phase != GamePhase::Paused);
                set_hidden(&document, "game-over", phase != GamePhase::GameOver);
            }
            GameEvent::GameOver {
                final_score,
                is_new_record,
            } => {
                set_text(&document, "#final-score", &final_score.to_string());
                set_hidden(&document, "new-record", !is_new_record);
                if is_new_record {
                    set_text(&document, "#new-record", localizer.text("new_record"));
                    set_text(&document, "#hud-best .hud-value", &final_score.to_string());
                }
            }
        });
    }

    /// Mouse and pen; touch has its own handlers
    fn setup_pointer_input(
        window: &Window,
        canvas: &HtmlCanvasElement,
        game: Shared<WebGame>,
    ) -> Result<(), JsValue> {
        fn pointer(event: &web_sys::Event) -> Option<&PointerEvent> {
            event
                .dyn_ref::<PointerEvent>()
                .filter(|e| e.pointer_type() != "touch")
        }

        {
            let game = game.clone();
            let window = window.clone();
            listen(canvas, "pointerdown", move |event| {
                if let Some(e) = pointer(&event) {
                    game.borrow_mut().pointer_down(
                        e.offset_x() as f32,
                        e.offset_y() as f32,
                        now_ms(&window),
                    );
                }
            })?;
        }
        {
            let game = game.clone();
            let window = window.clone();
            listen(canvas, "pointermove", move |event| {
                if let Some(e) = pointer(&event) {
                    game.borrow_mut().pointer_move(
                        e.offset_x() as f32,
                        e.offset_y() as f32,
                        now_ms(&window),
                    );
                }
            })?;
        }
        for name in ["pointerup", "pointercancel", "pointerleave"] {
            let game = game.clone();
            listen(canvas, name, move |event| {
                if pointer(&event).is_some() {
                    game.borrow_mut().pointer_up();
                }
            })?;
        }
        Ok(())
    }

    fn setup_touch_input(
        window: &Window,
        canvas: &HtmlCanvasElement,
        game: Shared<WebGame>,
    ) -> Result<(), JsValue> {
        /// First touch in canvas coordinates
        fn touch_pos(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<(f32, f32)> {
            let touch = event.touches().get(0)?;
            let rect = canvas.get_bounding_client_rect();
            Some((
                touch.client_x() as f32 - rect.left() as f32,
                touch.client_y() as f32 - rect.top() as f32,
            ))
        }

        for (name, starts) in [("touchstart", true), ("touchmove", false)] {
            let game = game.clone();
            let window = window.clone();
            let canvas_clone = canvas.clone();
            listen(canvas, name, move |event| {
                event.prevent_default();
                let Some(e) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let Some((x, y)) = touch_pos(&canvas_clone, e) else {
                    return;
                };
                let mut g = game.borrow_mut();
                if starts {
                    g.pointer_down(x, y, now_ms(&window));
                } else {
                    g.pointer_move(x, y, now_ms(&window));
                }
            })?;
        }
        for name in ["touchend", "touchcancel"] {
            let game = game.clone();
            listen(canvas, name, move |event| {
                event.prevent_default();
                game.borrow_mut().pointer_up();
            })?;
        }
        Ok(())
    }

    fn setup_buttons(
        document: &Document,
        game: Shared<WebGame>,
        settings: Shared<Settings>,
    ) -> Result<(), JsValue> {
        let actions: [(&str, fn(&mut WebGame)); 4] = [
            ("play-btn", WebGame::start),
            ("restart-btn", WebGame::start),
            ("pause-btn", WebGame::pause),
            ("resume-btn", WebGame::resume),
        ];
        for (id, action) in actions {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{}", id);
                continue;
            };
            let game = game.clone();
            listen(&btn, "click", move |_event| {
                let mut g = game.borrow_mut();
                g.play_cue(SoundCue::Button);
                action(&mut g);
            })?;
        }

        if let Some(btn) = document.get_element_by_id("mute-btn") {
            listen(&btn, "click", move |_event| {
                toggle_mute(&game, &settings);
            })?;
        }
        Ok(())
    }

    fn toggle_mute(game: &Shared<WebGame>, settings: &Shared<Settings>) {
        let mut settings = settings.borrow_mut();
        settings.muted = !settings.muted;
        let mut g = game.borrow_mut();
        settings.apply_audio(g.audio_mut());
        g.play_cue(SoundCue::Button);
        settings.save();
        log::info!("Muted: {}", settings.muted);
    }

    fn setup_keyboard(
        window: &Window,
        game: Shared<WebGame>,
        settings: Shared<Settings>,
    ) -> Result<(), JsValue> {
        listen(window, "keydown", move |event| {
            let Some(e) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            match e.key().as_str() {
                "Escape" | "p" | "P" => {
                    let mut g = game.borrow_mut();
                    match g.phase() {
                        GamePhase::Playing => g.pause(),
                        GamePhase::Paused => g.resume(),
                        _ => {}
                    }
                }
                " " | "Enter" => {
                    let mut g = game.borrow_mut();
                    if matches!(g.phase(), GamePhase::Menu | GamePhase::GameOver) {
                        // A focused Play button would otherwise click and start again
                        e.prevent_default();
                        g.start();
                    }
                }
                "m" | "M" => toggle_mute(&game, &settings),
                _ => {}
            }
        })
    }

    /// Page is going away: stop the frame loop and the music
    fn setup_teardown(window: &Window, game: Shared<WebGame>) -> Result<(), JsValue> {
        listen(window, "pagehide", move |_event| {
            game.borrow_mut().destroy();
        })
    }

    fn setup_auto_pause(
        window: &Window,
        document: &Document,
        game: Shared<WebGame>,
    ) -> Result<(), JsValue> {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            listen(document, "visibilitychange", move |_event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.phase() == GamePhase::Playing {
                        g.pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            })?;
        }

        // Window blur (click outside)
        listen(window, "blur", move |_event| {
            let mut g = game.borrow_mut();
            if g.phase() == GamePhase::Playing {
                g.pause();
                log::info!("Auto-paused (window blur)");
            }
        })
    }

    fn setup_resize(
        window: &Window,
        canvas: HtmlCanvasElement,
        surface: Shared<Canvas2d>,
        game: Shared<WebGame>,
    ) -> Result<(), JsValue> {
        let window_clone = window.clone();
        listen(window, "resize", move |_event| {
            let (w, h) = fit_canvas(&window_clone, &canvas, &surface.borrow());
            let mut g = game.borrow_mut();
            g.resize(w, h);
            // Resizing wipes the canvas; repaint even when no frame is due
            g.render(&mut *surface.borrow_mut());
        })
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dish Slash (native) starting...");
    log::info!("Playing needs a browser - run with `trunk serve`; running a headless demo instead");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(7);
    demo::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session played by a simple bot
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::cell::Cell;
    use std::rc::Rc;

    use dish_slash::audio::SilentAudio;
    use dish_slash::i18n::Localizer;
    use dish_slash::scheduler::ManualScheduler;
    use dish_slash::sim::{GameEvent, GamePhase};
    use dish_slash::{Game, Records, Settings};

    type DemoGame = Game<Records, SilentAudio, ManualScheduler>;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const DEMO_SECONDS: f64 = 120.0;
    /// Frames the bot waits between swipes
    const REACTION_FRAMES: u32 = 9;

    pub fn run(seed: u64) {
        let settings = Settings::load();
        let mut audio = SilentAudio::new();
        settings.apply_audio(&mut audio);
        let localizer = Localizer::new(settings.locale);

        let mut game = Game::new(
            seed,
            800.0,
            900.0,
            Records::load(),
            audio,
            ManualScheduler::new(),
        );
        game.set_particles_enabled(settings.particles);

        let result = Rc::new(Cell::new(None));
        {
            let result = result.clone();
            game.subscribe(move |event| {
                if let GameEvent::GameOver {
                    final_score,
                    is_new_record,
                } = *event
                {
                    result.set(Some((final_score, is_new_record)));
                }
            });
        }

        game.start();
        let mut ms = 0.0;
        let mut frame = 0u32;
        while game.phase() == GamePhase::Playing && ms < DEMO_SECONDS * 1000.0 {
            if frame % REACTION_FRAMES == 0 {
                swipe_falling_dish(&mut game, ms);
            }
            if game.scheduler_mut().fire().is_none() {
                break;
            }
            game.frame(ms);
            game.pointer_up();
            ms += FRAME_MS;
            frame += 1;
        }

        match result.get() {
            Some((score, is_new_record)) => {
                log::info!("{}: {}", localizer.text("final_score"), score);
                if is_new_record {
                    log::info!("{}", localizer.text("new_record"));
                }
            }
            None => log::info!(
                "Demo stopped after {:.0}s: {} {}, {} {}",
                ms / 1000.0,
                localizer.text("score"),
                game.session().score,
                localizer.text("lives"),
                game.session().lives
            ),
        }
        log::info!(
            "{} dishes sliced, {} particles in flight",
            game.session().slices,
            game.state().particles.len()
        );
    }

    /// Short fast swipe through the first dish on its way down
    fn swipe_falling_dish(game: &mut DemoGame, ms: f64) {
        let state = game.state();
        let height = state.height;
        let Some(pos) = state
            .dishes
            .iter()
            .find(|d| !d.is_sliced() && d.vel.y > 0.0 && d.pos.y < height * 0.9)
            .map(|d| d.pos)
        else {
            return;
        };
        game.pointer_down(pos.x - 40.0, pos.y, ms - 12.0);
        game.pointer_move(pos.x - 20.0, pos.y, ms - 8.0);
        game.pointer_move(pos.x, pos.y, ms - 4.0);
    }
}
