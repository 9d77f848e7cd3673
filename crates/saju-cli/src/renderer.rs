//! Terminal rendering for Markdown output.
//!
//! Rich mode lays the text out with termimad (tables become aligned grids,
//! emphasis is coloured); plain mode prints the Markdown source unchanged,
//! which is what scripts and tests read.

use std::io::{self, Write};

use anyhow::Result;
use termimad::{MadSkin, crossterm::style::Color};

/// Renderer that switches between termimad output and raw Markdown
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Magenta);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Cyan);
        skin.inline_code.set_bg(Color::AnsiValue(238));
        skin.quote_mark.set_fg(Color::DarkGrey);

        Self { rich_enabled, skin }
    }

    pub fn is_rich(&self) -> bool {
        self.rich_enabled
    }

    /// Render Markdown text to stdout
    pub fn render(&self, markdown: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        if self.rich_enabled {
            write!(stdout, "{}", self.skin.term_text(markdown))?;
        } else {
            write!(stdout, "{markdown}")?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Render anything that formats itself as Markdown
    pub fn show(&self, value: &impl ToString) -> Result<()> {
        self.render(&value.to_string())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.is_rich());
        renderer.render("# 제목\n").unwrap();
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().is_rich());
    }
}
