//! Animated particle field background.
//!
//! Renders drifting particles on an HTML canvas with:
//! - Edge bouncing and pointer repulsion per particle
//! - Faded connection lines between nearby particles
//! - Fewer particles on small viewports
//! - Pause/resume on window focus and page visibility
//!
//! # Example
//!
//! ```ignore
//! use folio_particles::{FieldConfig, ParticleFieldCanvas};
//!
//! let config = FieldConfig { base_count: 80, ..FieldConfig::default() };
//! view! { <ParticleFieldCanvas config=config /> }
//! ```
//!
//! The simulation itself ([`ParticleSystem`]) is generic over its
//! [`RenderTarget`] and [`FrameScheduler`], so it runs without a browser.

mod component;
pub mod config;
mod error;
mod host;
mod particle;
mod scheduler;
mod surface;
mod system;
pub mod theme;

pub use component::ParticleFieldCanvas;
pub use config::{FieldConfig, RepulsionConfig};
pub use error::FieldError;
pub use particle::{Particle, Pointer};
pub use scheduler::{AnimationFrameScheduler, FrameScheduler};
pub use surface::{CanvasSurface, RenderTarget, Viewport};
pub use system::{FieldState, ParticleSystem};
pub use theme::{Color, ConnectionStyle, ParticleStyle};
