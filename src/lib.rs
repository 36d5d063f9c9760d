// ABOUTME: Library module for the premark program.
// ABOUTME: Contains layered configuration, section assembly and HTML rendering for Remark.js slideshows.

// Reexport modules
pub mod config;
pub mod errors;
pub mod html;
pub mod presentation;
pub mod resources;
pub mod section;
pub mod template;
pub mod utils;

// Reexport common types and functions
pub use config::{ConfigChain, Defaults, PartialConfig};
pub use errors::{PremarkError, Result};
pub use html::{generate_html, write_html};
pub use presentation::{Presentation, PresentationOptions};
pub use resources::{FileSource, PackageData};
pub use section::{join_sections, Section};
pub use template::render_template;
