//! Terminal rendering for markdown output.
//!
//! Rich output goes through termimad; `--no-color` prints the markdown as is.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Renders the markdown produced by the display wrappers.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::DarkYellow);
        skin.bold.set_fg(Color::Green);
        skin.italic.set_fg(Color::Cyan);
        skin.code_block.set_bg(Color::AnsiValue(238));
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Print `markdown` to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            for line in markdown.lines() {
                // Keep the hashes visible on headers.
                if line.starts_with('#') {
                    println!("\x1b[33m{line}\x1b[0m");
                } else {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        } else {
            print!("{markdown}");
        }
        Ok(())
    }

    /// Render anything with a markdown `Display`.
    pub fn show(&self, value: &impl std::fmt::Display) -> Result<()> {
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
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }
}
