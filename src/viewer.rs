use minifb::{Key, Window, WindowOptions};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

use crate::config::Settings;
use crate::engine::build_mind_map;
use crate::error::Result;
use crate::raster::PixelBuffer;
use crate::render::render_mind_map;
use crate::surface::Surface;
use crate::tree::MindMapNode;

/// What the window should show. Written by the prompt loop, read by the
/// window thread; the newest request always wins.
#[derive(Debug, Default)]
pub struct ViewerState {
    pub topic: Option<String>,
    pub description: Option<String>,
    /// Bumped on every change so the window knows to redraw
    pub generation: u64,
    /// Set by either side to end the session
    pub closed: bool,
}

impl ViewerState {
    pub fn set_topic(&mut self, topic: &str) {
        self.topic = Some(topic.to_string());
        self.description = None;
        self.generation += 1;
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = Some(description.to_string()).filter(|d| !d.trim().is_empty());
        self.generation += 1;
    }

    pub fn current_tree(&self) -> Option<MindMapNode> {
        self.topic
            .as_deref()
            .map(|t| build_mind_map(t, self.description.as_deref()))
    }
}

/// Lock the shared state, recovering it if another thread panicked mid-update
pub fn lock_state(state: &Mutex<ViewerState>) -> MutexGuard<'_, ViewerState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Open a window on its own thread and keep it showing the current map.
///
/// The canvas height stays fixed; the width follows the window. Every topic
/// change clears and fully redraws the framebuffer. When the window closes,
/// or cannot be opened, the shared state is marked closed.
pub fn spawn_viewer(state: Arc<Mutex<ViewerState>>, settings: Settings) -> JoinHandle<Result<()>> {
    thread::spawn(move || {
        let result = run_window(&state, &settings);
        lock_state(&state).closed = true;
        info!("viewer window closed");
        result
    })
}

fn run_window(state: &Mutex<ViewerState>, settings: &Settings) -> Result<()> {
    let height = settings.canvas.height;
    let mut width = settings.canvas.width;

    let mut window = Window::new(
        "Mind Map (Esc to close)",
        width,
        height,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(30);

    let mut buffer = PixelBuffer::new(width, height).with_font_scale(settings.font_scale);
    let mut seen: Option<u64> = None;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let (window_width, _) = window.get_size();
        let resized = window_width > 0 && window_width != width;
        if resized {
            width = window_width;
            buffer = PixelBuffer::new(width, height).with_font_scale(settings.font_scale);
        }

        let (generation, closed) = {
            let state = lock_state(state);
            (state.generation, state.closed)
        };
        if closed {
            break;
        }

        if resized || seen != Some(generation) {
            match lock_state(state).current_tree() {
                Some(tree) => render_mind_map(Some(&mut buffer), &tree, &settings.style),
                None => buffer.clear(settings.style.background),
            }
            debug!(generation, width, "redrew window");
            seen = Some(generation);
        }

        window.update_with_buffer(buffer.pixels(), width, height)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_generations() {
        let mut state = ViewerState::default();
        assert!(state.current_tree().is_none());

        state.set_topic("Weather");
        assert_eq!(state.generation, 1);
        state.set_description("clouds rain clouds");
        assert_eq!(state.generation, 2);

        let tree = state.current_tree().unwrap();
        assert_eq!(tree.label, "Weather");
        assert_eq!(tree.children[0].label, "Clouds");

        // a new topic drops the old description
        state.set_topic("Soil");
        assert_eq!(state.description, None);
        assert_eq!(state.current_tree().unwrap().children.len(), 1);
    }

    #[test]
    fn test_blank_description_is_none() {
        let mut state = ViewerState::default();
        state.set_topic("Soil");
        state.set_description("   ");
        assert_eq!(state.description, None);
    }
}
