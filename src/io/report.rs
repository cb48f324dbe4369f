//! HTML page placing every source image at its tile position

use crate::io::configuration::REPORT_TITLE;
use crate::io::error::{CollageError, Result};
use crate::layout::engine::Placement;
use std::fmt::Write as _;
use std::path::Path;

/// Serializes placed images into some document format
pub trait ReportExporter<H> {
    /// Write the document for `placements` on a canvas of `size` pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written
    fn export(&self, placements: &[Placement<'_, H>], size: (u32, u32), output: &Path)
    -> Result<()>;
}

/// Standalone HTML page with one absolutely positioned, linked image per tile
#[derive(Debug, Clone)]
pub struct HtmlReport {
    title: String,
}

impl Default for HtmlReport {
    fn default() -> Self {
        Self::new(REPORT_TITLE)
    }
}

impl HtmlReport {
    /// Report with the given page heading
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
        }
    }

    /// Build the page markup
    pub fn render<H: AsRef<Path>>(&self, placements: &[Placement<'_, H>], size: (u32, u32)) -> String {
        let title = escape(&self.title);
        let mut html = String::new();
        let _ = writeln!(html, "<!DOCTYPE html>");
        let _ = writeln!(html, "<html>");
        let _ = writeln!(html, "<head>\n\t<meta charset=\"utf-8\">\n\t<title>{title}</title>\n</head>");
        let _ = writeln!(html, "<body>");
        let _ = writeln!(html, "\t<h1 style=\"text-align:left\">{title}</h1>");
        let _ = writeln!(html, "\t<hr>");
        let _ = writeln!(
            html,
            "\t<div style=\"position:relative; width:{}px; height:{}px;\">",
            size.0, size.1
        );
        for placement in placements {
            let src = escape(&placement.handle.as_ref().to_string_lossy());
            let rect = placement.rect;
            let _ = writeln!(html, "\t\t<a href=\"{src}\">");
            let _ = writeln!(
                html,
                "\t\t\t<img src=\"{src}\" style=\"position:absolute; width:{:.2}px; height:{:.2}px; left:{:.2}px; top:{:.2}px;\">",
                rect.width, rect.height, rect.x, rect.y
            );
            let _ = writeln!(html, "\t\t</a>");
        }
        let _ = writeln!(html, "\t</div>");
        let _ = writeln!(html, "</body>");
        let _ = write!(html, "</html>");
        html
    }
}

impl<H: AsRef<Path>> ReportExporter<H> for HtmlReport {
    fn export(
        &self,
        placements: &[Placement<'_, H>],
        size: (u32, u32),
        output: &Path,
    ) -> Result<()> {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CollageError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        std::fs::write(output, self.render(placements, size)).map_err(|e| {
            CollageError::FileSystem {
                path: output.to_path_buf(),
                operation: "write report",
                source: e,
            }
        })
    }
}

/// Escape text for use inside HTML attributes and element content
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
