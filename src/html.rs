// ABOUTME: HTML generation module for the premark application
// ABOUTME: Feeds Markdown, stylesheet and renderer arguments into the HTML template

use crate::errors::Result;
use crate::presentation::Presentation;
use crate::template::render_template;
use log::info;
use minijinja::context;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Render a presentation to a complete HTML document.
///
/// `remark_args` is passed as structured data, so templates serialise it
/// with `{{ remark_args | tojson }}` or pick out single options.
pub fn generate_html(presentation: &Presentation) -> Result<String> {
    info!("Generating HTML for presentation: {}", presentation.title());

    render_template(
        presentation.html_template(),
        context! {
            title => presentation.title(),
            markdown => presentation.markdown(),
            stylesheet => style_tag(presentation.stylesheet()),
            remark_args => presentation.remark_args(),
        },
    )
}

/// Wrap CSS in an inline `<style>` element.
pub fn style_tag(css: &str) -> String {
    format!("<style>\n{}\n</style>", css)
}

/// Write HTML to `output_path`, or to stdout when no path is given.
pub fn write_html(html_content: &str, output_path: Option<&Path>) -> Result<()> {
    let Some(output_path) = output_path else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(html_content.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    };

    info!("Writing HTML to file: {:?}", output_path);

    // Ensure parent directory exists
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(output_path, html_content)?;
    Ok(())
}
