//! Bounce Demo entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_demo {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Gamepad, GamepadButton, HtmlCanvasElement, KeyboardEvent};

    use bounce_demo::assets::{AssetCatalog, PlaceholderSource};
    use bounce_demo::config::DemoConfig;
    use bounce_demo::platform::{FrameClock, GAMEPAD_BACK_BUTTON, key_from_event};
    use bounce_demo::renderer::SpriteRenderer;
    use bounce_demo::sim::{FrameInput, Key, KeyboardState, Simulation, render, tick};

    struct Demo {
        sim: Simulation,
        renderer: Option<SpriteRenderer>,
        clock: FrameClock,
        /// Keys currently held, maintained from keydown/keyup events
        keyboard: KeyboardState,
    }

    impl Demo {
        /// Run however many fixed ticks the elapsed time calls for
        fn update(&mut self, time: f64) {
            let ticks = self.clock.advance_to(time);
            if ticks == 0 {
                return;
            }

            let input = FrameInput {
                keyboard: self.keyboard,
                gamepad_back: gamepad_back_pressed(),
            };
            for _ in 0..ticks {
                tick(&mut self.sim, &input, self.clock.step());
            }
        }

        fn render(&mut self) {
            if let Some(renderer) = self.renderer.as_mut() {
                render(&self.sim, renderer);
            }
        }
    }

    /// Back button on any connected gamepad (standard mapping)
    fn gamepad_back_pressed() -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let Ok(pads) = window.navigator().get_gamepads() else {
            return false;
        };
        pads.iter()
            .filter_map(|pad| pad.dyn_into::<Gamepad>().ok())
            .any(|pad| {
                pad.buttons()
                    .get(GAMEPAD_BACK_BUTTON)
                    .dyn_into::<GamepadButton>()
                    .map(|button| button.pressed())
                    .unwrap_or(false)
            })
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bounce Demo starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Build the scene from generated sprites
        let config = DemoConfig::default();
        let mut catalog = AssetCatalog::new();
        let mut source = PlaceholderSource::from_map(config.placeholders.clone());
        let sim = match Simulation::setup(&config, &mut catalog, &mut source) {
            Ok(sim) => sim,
            Err(e) => {
                log::error!("Scene setup failed: {}", e);
                return;
            }
        };

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut renderer = SpriteRenderer::new(surface, &adapter, width, height, sim.viewport).await;
        renderer.upload_catalog(&catalog);

        let demo = Rc::new(RefCell::new(Demo {
            sim,
            renderer: Some(renderer),
            clock: FrameClock::default(),
            keyboard: KeyboardState::empty(),
        }));

        setup_input_handlers(demo.clone());

        request_animation_frame(demo);

        log::info!("Bounce Demo running!");
    }

    fn setup_input_handlers(demo: Rc<RefCell<Demo>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let demo = demo.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = key_from_event(&event.key(), &event.code()) {
                    // Arrows would otherwise scroll the page
                    event.prevent_default();
                    demo.borrow_mut().keyboard.press(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let demo = demo.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = key_from_event(&event.key(), &event.code()) {
                    demo.borrow_mut().keyboard.release(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyup events are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut d = demo.borrow_mut();
                let escape_held = d.keyboard.is_down(Key::Escape);
                d.keyboard = KeyboardState::empty();
                d.keyboard.set(Key::Escape, escape_held);
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(demo: Rc<RefCell<Demo>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(demo, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(demo: Rc<RefCell<Demo>>, time: f64) {
        {
            let mut d = demo.borrow_mut();
            d.update(time);

            if !d.sim.is_running() {
                // Release the GPU surface and stop scheduling frames
                d.renderer = None;
                log::info!("Bounce Demo exited after {} ticks", d.sim.frame);
                return;
            }

            d.render();
        }

        request_animation_frame(demo);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_demo::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use bounce_demo::assets::{AssetCatalog, AssetSource, DirectorySource, PlaceholderSource};
    use bounce_demo::config::DemoConfig;
    use bounce_demo::consts::SIM_DT;
    use bounce_demo::renderer::RecordingBatch;
    use bounce_demo::sim::{FrameInput, Key, SetupError, Simulation, render, tick};

    /// Ticks before the scripted Escape press
    const SCRIPT_LENGTH: u64 = 360;

    /// Keyboard script: diagonal, idle, diagonal back, then exit
    fn scripted_input(frame: u64) -> FrameInput {
        match frame {
            0..120 => FrameInput::from_keys(&[Key::W, Key::D]),
            120..240 => FrameInput::default(),
            240..SCRIPT_LENGTH => FrameInput::from_keys(&[Key::Down, Key::Left]),
            _ => FrameInput::from_keys(&[Key::Escape]),
        }
    }

    /// Run the demo scene without a window, logging entity positions
    pub fn run(config: &DemoConfig) -> Result<(), SetupError> {
        let mut source: Box<dyn AssetSource> = if Path::new(&config.asset_dir).is_dir() {
            let dir = DirectorySource::new(&config.asset_dir);
            log::info!("Loading sprites from {}", dir.root().display());
            Box::new(dir)
        } else {
            log::info!(
                "No sprite directory at {}, using placeholders",
                config.asset_dir
            );
            Box::new(PlaceholderSource::from_map(config.placeholders.clone()))
        };

        let mut catalog = AssetCatalog::new();
        let mut sim = Simulation::setup(config, &mut catalog, source.as_mut())?;
        let mut batch = RecordingBatch::last_frame_only();

        loop {
            let input = scripted_input(sim.frame);
            tick(&mut sim, &input, SIM_DT);
            if !sim.is_running() {
                break;
            }
            render(&sim, &mut batch);

            if sim.frame % 60 == 0 {
                log::info!(
                    "tick {}: player at ({:.1}, {:.1})",
                    sim.frame,
                    sim.player.pos().x,
                    sim.player.pos().y
                );
                for (i, mover) in sim.movers.iter().enumerate() {
                    log::debug!(
                        "  mover {} at ({:.1}, {:.1}) vel ({:.1}, {:.1})",
                        i,
                        mover.pos().x,
                        mover.pos().y,
                        mover.vel.x,
                        mover.vel.y
                    );
                }
            }
        }

        let draws = batch.last_frame().map(|f| f.draws.len()).unwrap_or(0);
        log::info!(
            "Exited after {} ticks ({} sprites per frame, {} textures)",
            sim.frame,
            draws,
            catalog.len()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bounce Demo (native, headless) starting...");
    log::info!("Windowed mode is the web build - run with `trunk serve`");

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "bounce-demo.json".to_string());
    let config = bounce_demo::DemoConfig::load_or_default(&config_path);

    if let Err(e) = headless::run(&config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
