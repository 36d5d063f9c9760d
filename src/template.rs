// ABOUTME: Jinja template rendering for the HTML shell
// ABOUTME: Wraps a minijinja environment configured the way slideshow templates expect

use crate::errors::Result;
use log::debug;
use minijinja::{AutoEscape, Environment, Value};

/// Render a Jinja template from source text.
///
/// Output is not auto-escaped, since the context carries ready-made HTML
/// (the `<style>` block) and raw Markdown. The final newline of the source
/// is kept.
pub fn render_template(source: &str, context: Value) -> Result<String> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);

    let template = env.template_from_str(source)?;
    debug!("Rendering template of {} bytes", source.len());
    Ok(template.render(context)?)
}
