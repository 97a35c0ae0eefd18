use crate::config::{GlConfig, WindowConfig};
use crate::error::BackendError;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::video::{GLProfile, SwapInterval};
use std::time::{Duration, Instant};

const FRAME_TIME: Duration = Duration::new(0, 1_000_000_000u32 / 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoEvent {
    Quit,
    // window size in screen coordinates, not pixels
    Resized(i32, i32),
    KeyDown(Keycode),
    KeyUp(Keycode),
}

impl IoEvent {
    pub fn translate(event: &Event) -> Option<IoEvent> {
        match event {
            Event::Quit { .. } => Some(IoEvent::Quit),
            Event::KeyDown {
                keycode: Some(k), ..
            } => Some(IoEvent::KeyDown(*k)),
            Event::KeyUp {
                keycode: Some(k), ..
            } => Some(IoEvent::KeyUp(*k)),
            Event::Window {
                win_event: WindowEvent::SizeChanged(w, h),
                ..
            } => Some(IoEvent::Resized(*w, *h)),
            _ => None,
        }
    }

    /// Close request or the exit key.
    pub fn is_exit(&self) -> bool {
        matches!(self, IoEvent::Quit | IoEvent::KeyDown(Keycode::Escape))
    }
}

/// Viewport covering a `w` x `h` drawable; SDL may report transient
/// negative sizes while a window is being torn down.
pub fn viewport_for(w: i32, h: i32) -> (i32, i32) {
    (w.max(0), h.max(0))
}

/// Without a working swap interval the frame rate has to be capped by hand.
pub fn needs_frame_sleep(vsync_requested: bool, vsync_applied: bool) -> bool {
    !(vsync_requested && vsync_applied)
}

/// Drawable size as reported by SDL, in the signed range GL expects.
pub fn drawable_extent((w, h): (u32, u32)) -> (i32, i32) {
    (
        i32::try_from(w).unwrap_or(i32::MAX),
        i32::try_from(h).unwrap_or(i32::MAX),
    )
}

pub fn set_viewport(w: i32, h: i32) {
    let (w, h) = viewport_for(w, h);
    unsafe { gl::Viewport(0, 0, w, h) };
}

pub struct System {
    // drawable size in pixels, kept in step with the viewport
    w: i32,
    h: i32,
    frame_sleep: bool,
    started: Instant,
    pub events: Vec<IoEvent>,
    pub gl_ctx: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    event_pump: sdl2::EventPump,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl_context: sdl2::Sdl,
}

impl System {
    pub fn new(window_cfg: &WindowConfig, gl_cfg: &GlConfig) -> Result<System, BackendError> {
        let sdl_context = sdl2::init().map_err(BackendError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(BackendError::Sdl)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(gl_cfg.major, gl_cfg.minor);
        if gl_cfg.forward_compat {
            gl_attr.set_context_flags().forward_compatible().set();
        }

        let mut builder =
            video_subsystem.window(&window_cfg.title, window_cfg.width, window_cfg.height);
        builder.opengl().position_centered();
        if window_cfg.resizable {
            builder.resizable();
        }
        let window = builder.build()?;

        let gl_ctx = window.gl_create_context().map_err(BackendError::GlContext)?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);
        Self::verify_loader()?;

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);

        let interval = if window_cfg.vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        let vsync_applied = match video_subsystem.gl_set_swap_interval(interval) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("could not set swap interval {:?}: {}", interval, e);
                false
            }
        };
        let frame_sleep = needs_frame_sleep(window_cfg.vsync, vsync_applied);
        if window_cfg.vsync && frame_sleep {
            log::warn!("vsync unavailable, capping frame rate at 60 Hz");
        }

        // the drawable can be larger than the window on high-DPI displays
        let (w, h) = drawable_extent(window.drawable_size());
        set_viewport(w, h);

        let event_pump = sdl_context.event_pump().map_err(BackendError::Sdl)?;

        log::info!(
            "created {}x{} window '{}' with GL {}.{} core context",
            window_cfg.width,
            window_cfg.height,
            window_cfg.title,
            gl_cfg.major,
            gl_cfg.minor
        );

        Ok(System {
            w,
            h,
            frame_sleep,
            started: Instant::now(),
            events: Vec::new(),
            gl_ctx,
            window,
            event_pump,
            video_subsystem,
            sdl_context,
        })
    }

    fn verify_loader() -> Result<(), BackendError> {
        let required = [
            ("glViewport", gl::Viewport::is_loaded()),
            ("glClear", gl::Clear::is_loaded()),
            ("glCreateShader", gl::CreateShader::is_loaded()),
            ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
            ("glDrawArrays", gl::DrawArrays::is_loaded()),
        ];
        match required.iter().find(|(_, loaded)| !loaded) {
            Some((name, _)) => Err(BackendError::GlLoader(*name)),
            None => Ok(()),
        }
    }

    /// Drains this frame's events. Returns false once the user asked to exit.
    pub fn process_io_events(&mut self) -> bool {
        self.events.clear();
        self.events
            .extend(self.event_pump.poll_iter().filter_map(|e| IoEvent::translate(&e)));

        let mut running = true;
        let mut resized = false;
        for event in &self.events {
            match *event {
                IoEvent::Resized(w, h) => {
                    log::debug!("window resized to {}x{}", w, h);
                    resized = true;
                }
                e if e.is_exit() => running = false,
                _ => {}
            }
        }
        if resized {
            // the event carries screen coordinates; the viewport wants pixels
            let (w, h) = drawable_extent(self.window.drawable_size());
            self.w = w;
            self.h = h;
            set_viewport(w, h);
        }
        running
    }

    /// Current drawable size in pixels.
    pub fn size(&self) -> (i32, i32) {
        (self.w, self.h)
    }

    pub fn draw_to_screen(&mut self) {
        self.window.gl_swap_window();
        if self.frame_sleep {
            ::std::thread::sleep(FRAME_TIME);
        }
    }

    pub fn clear_screen(&mut self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }
}
