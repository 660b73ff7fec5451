// What you SEE:
// • A fake app screen (or SPOTLIGHT_BACKGROUND, if set) with three widgets.
// • The scrim fades in, then a spotlight opens on the first widget.
// • Left click on a settled spotlight: it closes and the next one opens.
// • After the last widget the scrim fades out. S saves a PNG. ESC quits.
//
// The tour sequencing lives here; the overlay view only knows about one
// target at a time.

mod draw;
mod logging;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use draw::{Drawer, draw_text_5x7, fill_box, fill_gradient};
use spotlight_overlay::easing;
use spotlight_overlay::{
    AnimatorListener, Circle, Error, FrameBuffer, OnSpotlightListener, RoundedRectangle,
    SpotlightConfig, SpotlightView, Target,
};

const SNAPSHOT_PATH: &str = "spotlight-snapshot.png";

/// Things the overlay tells the tour about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TourEvent {
    Shown,
    Clicked,
    TurnedDown,
    Finished,
}

type EventQueue = Rc<RefCell<VecDeque<TourEvent>>>;

/// Pushes `on_end` into the queue when an animation completes.
struct Notify {
    queue: EventQueue,
    on_end: TourEvent,
}

impl AnimatorListener for Notify {
    fn on_animation_end(&mut self) {
        self.queue.borrow_mut().push_back(self.on_end);
    }
}

impl OnSpotlightListener for Notify {
    fn on_spotlight_view_clicked(&mut self) {
        self.queue.borrow_mut().push_back(TourEvent::Clicked);
    }
}

fn notify(queue: &EventQueue, on_end: TourEvent) -> Box<Notify> {
    Box::new(Notify { queue: Rc::clone(queue), on_end })
}

fn main() -> Result<(), Error> {
    logging::init();
    let cfg = SpotlightConfig::from_env()?;
    tracing::info!(?cfg, "starting spotlight demo");

    /* --- What the overlay sits on top of --- */
    let (screen, targets) = match &cfg.background {
        Some(path) => (load_background(path, cfg.width, cfg.height)?, default_targets(&cfg)),
        None => fake_app_screen(&cfg),
    };
    let mut out = FrameBuffer::filled(cfg.width, cfg.height, 0);

    let queue: EventQueue = Rc::default();
    let mut view = SpotlightView::from_config(&cfg, Some(notify(&queue, TourEvent::Clicked)))?;
    let mut drawer = Drawer::new("Spotlight", cfg.width, cfg.height)?;

    view.start_spotlight(cfg.fade_duration, easing::linear, notify(&queue, TourEvent::Shown));
    let mut next_target = 0usize;
    let mut done = false;
    let mut last_frame = Instant::now();

    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        let dt = now - last_frame;
        last_frame = now;

        /* 1) Input */
        if drawer.poll_click() {
            view.on_click();
        }

        /* 2) Animations; listeners queue tour events */
        if view.advance(dt) {
            view.draw();
        }

        /* 3) Tour sequencing */
        let events: Vec<TourEvent> = queue.borrow_mut().drain(..).collect();
        for event in events {
            tracing::debug!(?event, next_target, "tour event");
            match event {
                TourEvent::Shown => {
                    if let Some(target) = targets.get(next_target) {
                        view.turn_up(Rc::clone(target), Box::new(()));
                        next_target += 1;
                    }
                }
                TourEvent::Clicked => view.turn_down(notify(&queue, TourEvent::TurnedDown)),
                TourEvent::TurnedDown => match targets.get(next_target) {
                    Some(target) => {
                        view.turn_up(Rc::clone(target), Box::new(()));
                        next_target += 1;
                    }
                    None => view.finish_spotlight(
                        cfg.fade_duration,
                        easing::linear,
                        notify(&queue, TourEvent::Finished),
                    ),
                },
                TourEvent::Finished => {
                    tracing::info!("tour finished");
                    done = true;
                }
            }
        }
        if view.needs_redraw() {
            view.draw();
        }

        /* 4) Composite + HUD */
        view.composite(&screen, &mut out)?;
        let hud = if done {
            String::from("DONE | S: SAVE | ESC: QUIT")
        } else {
            format!(
                "TARGET {}/{} | CLICK: NEXT | S: SAVE | ESC: QUIT",
                next_target,
                targets.len()
            )
        };
        draw_text_5x7(&mut out, 8, 8, &hud, 0x00_FF_FF_FF);

        if drawer.s_pressed_once() {
            save_snapshot(&out, Path::new(SNAPSHOT_PATH))?;
            tracing::info!(path = SNAPSHOT_PATH, "snapshot saved");
        }

        drawer.present(&out)?;
    }

    Ok(())
}

/// Gradient "app" with a toolbar, an avatar and a button to point at.
fn fake_app_screen(cfg: &SpotlightConfig) -> (FrameBuffer, Vec<Rc<Target>>) {
    let (w, h) = (cfg.width as f32, cfg.height as f32);
    let mut fb = FrameBuffer::filled(cfg.width, cfg.height, 0);
    fill_gradient(&mut fb, 0x00_EE_F2_F7, 0x00_B8_C6_DB);

    let toolbar = (0.0, 0.0, w, 0.1 * h);
    let avatar = (0.75 * w, 0.25 * h, 0.12 * w, 0.12 * w);
    let button = (0.3 * w, 0.75 * h, 0.4 * w, 0.1 * h);

    for ((x, y, bw, bh), color) in [
        (toolbar, 0x00_3F_51_B5),
        (avatar, 0x00_FF_98_00),
        (button, 0x00_4C_AF_50),
    ] {
        fill_box(&mut fb, x as i32, y as i32, bw as i32, bh as i32, color);
    }

    let targets = vec![
        Target::builder()
            .anchor_on_rect(toolbar.0, toolbar.1, toolbar.2, toolbar.3)
            .shape(RoundedRectangle::new(toolbar.2 * 0.9, toolbar.3 * 1.4, 12.0))
            .interpolator(easing::decelerate)
            .duration(Duration::from_millis(600))
            .build(),
        Target::builder()
            .anchor_on_rect(avatar.0, avatar.1, avatar.2, avatar.3)
            .shape(Circle::new(avatar.2 * 0.8))
            .interpolator(easing::accelerate_decelerate)
            .duration(Duration::from_millis(500))
            .build(),
        Target::builder()
            .anchor_on_rect(button.0, button.1, button.2, button.3)
            .shape(RoundedRectangle::new(button.2 + 24.0, button.3 + 24.0, 16.0))
            .build(),
    ];
    (fb, targets)
}

/// With a real screenshot there are no known widgets; spot the center and a corner.
fn default_targets(cfg: &SpotlightConfig) -> Vec<Rc<Target>> {
    let (w, h) = (cfg.width as f32, cfg.height as f32);
    vec![
        Target::builder().anchor_on_rect(0.0, 0.0, w, h).build(),
        Target::builder()
            .anchor_on_rect(0.0, 0.0, 0.2 * w, 0.2 * h)
            .shape(Circle::new(0.15 * w.min(h)))
            .build(),
    ]
}

fn load_background(path: &Path, width: usize, height: usize) -> Result<FrameBuffer, Error> {
    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.display().to_string(),
        source,
    })?;
    let rgb = image::imageops::resize(
        &img.to_rgb8(),
        width as u32,
        height as u32,
        image::imageops::FilterType::Triangle,
    );
    let pixels = rgb
        .pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect();
    Ok(FrameBuffer { width, height, pixels })
}

fn save_snapshot(fb: &FrameBuffer, path: &Path) -> Result<(), Error> {
    let img = image::RgbImage::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let px = fb.pixels[y as usize * fb.width + x as usize];
        image::Rgb([(px >> 16) as u8, (px >> 8) as u8, px as u8])
    });
    img.save(path).map_err(|source| Error::ImageSave {
        path: path.display().to_string(),
        source,
    })
}
