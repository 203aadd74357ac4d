use sdl2::event::Event;

mod bindings;
mod config;
mod display;
mod gui;
mod settings;
mod text;

use bindings::BindingSet;
use config::{BindingConfig, DEFAULT_BINDINGS_PATH};
use display::{Display, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use gui::{FrameInput, GuiContext, GuiStyle, MenuOverlay};
use settings::Settings;

fn main() -> Result<(), String> {
    env_logger::init();

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let mut event_pump = sdl_context.event_pump()?;

    let mut display = Display::new(video_subsystem, DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT)?;
    let defaults = Settings::default();
    display.set_frame_cap(defaults.frame_rate.cap(defaults.custom_frame_rate));

    let bindings = match BindingConfig::load_from_file(DEFAULT_BINDINGS_PATH) {
        Ok(config) => config.into_binding_set(),
        Err(e) => {
            log::warn!(
                "could not load {}: {}, using built-in defaults",
                DEFAULT_BINDINGS_PATH,
                e
            );
            BindingSet::defaults()
        }
    };

    let mut ctx = GuiContext::new(GuiStyle::default());
    ctx.attach(display.generation(), display.logical_size());

    let resolutions = display.supported_resolutions();
    let mut overlay = MenuOverlay::new(bindings, resolutions, display.window_size());

    'running: loop {
        for event in event_pump.poll_iter() {
            if let Event::Quit { .. } = event {
                break 'running;
            }
            overlay.handle_event(&event, &mut display);
        }

        // Deferred surface work runs here, never mid-event-dispatch
        overlay.process_fullscreen_toggle(&mut display, &mut ctx);

        let mouse = event_pump.mouse_state();
        let (mouse_x, mouse_y) = display.window_to_logical(mouse.x(), mouse.y());
        let input = FrameInput {
            mouse_x,
            mouse_y,
            mouse_down: mouse.left(),
        };

        display.clear();
        overlay.update(&mut ctx, input, &mut display);
        overlay.render(&mut ctx, &mut display)?;
        display.present();

        if overlay.should_quit() {
            break 'running;
        }

        if let Some(delay) = display.frame_delay() {
            std::thread::sleep(delay);
        }
    }

    Ok(())
}
