use std::io::{self, Write};

use scout_core::{AppViewModel, Message, MessageBody, Paper, Sender};

use super::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Print user messages; off when the terminal already echoed the input.
    pub echo_user: bool,
    /// Print a prompt whenever the session returns to idle.
    pub prompt: bool,
}

/// Writes the conversation to a terminal incrementally.
///
/// A terminal cannot rewrite earlier output, so a streaming summary is
/// printed line by line as lines become final; the last line is held back
/// until the next line starts or the turn ends.
pub struct Renderer {
    options: RenderOptions,
    /// Messages fully written.
    printed: usize,
    /// Lines of the message at `printed` already written (streaming summary).
    partial_lines: Option<usize>,
    was_busy: bool,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            printed: 0,
            partial_lines: None,
            was_busy: false,
        }
    }

    pub fn banner(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{BANNER}")?;
        writeln!(out, "{USAGE}")?;
        self.prompt(out)
    }

    pub fn render(&mut self, view: &AppViewModel, out: &mut impl Write) -> io::Result<()> {
        let already_printed = self.printed;
        while let Some(message) = view.messages.get(self.printed) {
            let streaming = view.is_streaming(message.id);
            match &message.body {
                MessageBody::SummaryLines(lines) => {
                    let written = match self.partial_lines {
                        Some(written) => written,
                        None => {
                            writeln!(out, "{BOT_PREFIX}Summary:")?;
                            0
                        }
                    };
                    // The last line may still grow while the stream is open.
                    let ready = if streaming {
                        lines.len().saturating_sub(1)
                    } else {
                        lines.len()
                    };
                    for line in lines.iter().take(ready).skip(written) {
                        writeln!(out, "  {line}")?;
                    }
                    if streaming {
                        self.partial_lines = Some(written.max(ready));
                        break;
                    }
                    self.partial_lines = None;
                }
                _ => write_message(message, self.options, out)?,
            }
            self.printed += 1;
        }

        let busy = view.is_busy();
        if busy && !self.was_busy {
            writeln!(out, "{BOT_PREFIX}{TYPING}")?;
        }
        // A turn that never waited on the backend goes idle within one update.
        if !busy && (self.was_busy || self.printed != already_printed) {
            self.prompt(out)?;
        }
        self.was_busy = busy;
        out.flush()
    }

    fn prompt(&self, out: &mut impl Write) -> io::Result<()> {
        if self.options.prompt {
            write!(out, "{PROMPT}")?;
        }
        out.flush()
    }
}

fn write_message(message: &Message, options: RenderOptions, out: &mut impl Write) -> io::Result<()> {
    match (&message.sender, &message.body) {
        (Sender::User, MessageBody::PlainText(text)) => {
            if options.echo_user {
                writeln!(out, "{USER_PREFIX}{text}")?;
            }
        }
        (Sender::Bot, MessageBody::PlainText(text)) => writeln!(out, "{BOT_PREFIX}{text}")?,
        (_, MessageBody::PaperList(papers)) => write_papers(papers, out)?,
        // Written incrementally by `Renderer::render`.
        (_, MessageBody::SummaryLines(_)) => {}
    }
    Ok(())
}

fn write_papers(papers: &[Paper], out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{BOT_PREFIX}Found Papers:")?;
    for (index, paper) in papers.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "--- Paper {} ---", index + 1)?;
        writeln!(out, "Title: {}", or_na(&paper.title))?;
        writeln!(out, "Authors: {}", or_na(&paper.authors))?;
        writeln!(out, "Summary: {}", or_na(&paper.summary))?;
        if let Some(url) = &paper.pdf_url {
            writeln!(out, "PDF URL: {url}")?;
        }
    }
    Ok(())
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}
