//! particle-field: ambient interactive particle background.
//!
//! This crate provides a WASM canvas component that fills the page background
//! with drifting, connected particles that react to the pointer and can play
//! short tones on collisions.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{FieldConfig, ParticleBackground, Theme};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load field configuration from a script element with id="particle-config".
/// Expected format: JSON matching [`FieldConfig`]; missing keys keep defaults.
fn load_field_config() -> FieldConfig {
	let Some(json_text) = config_script_text() else {
		return FieldConfig::default();
	};

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"particle-field: loaded config (theme: {})",
				config.theme.as_deref().unwrap_or("default")
			);
			config
		}
		Err(e) => {
			warn!("particle-field: failed to parse config: {}", e);
			FieldConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Main application component.
/// Renders the particle background behind a small overlay with a sound toggle.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config();
	let sound_enabled = RwSignal::new(false);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Particle Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleBackground sound_enabled=sound_enabled config=config />
		<div class="field-overlay">
			<h1>"Particle Field"</h1>
			<p class="subtitle">"Move the pointer to push particles around."</p>
			<button
				class="sound-toggle"
				aria-pressed=move || sound_enabled.get().to_string()
				on:click=move |_| sound_enabled.update(|on| *on = !*on)
			>
				{move || if sound_enabled.get() { "Sound: on" } else { "Sound: off" }}
			</button>
		</div>
	}
}
