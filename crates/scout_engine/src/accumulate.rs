use encoding_rs::{CoderResult, Decoder, Encoding, UTF_8};
use scout_logging::{scout_debug, scout_warn};

/// Decodes one summary stream chunk by chunk and keeps the full text.
///
/// The decoder lives as long as the accumulator so a multi-byte character
/// split across two chunks decodes correctly. Bytes of an incomplete trailing
/// sequence stay buffered in the decoder and are dropped with it.
pub struct SummaryAccumulator {
    encoding: &'static Encoding,
    decoder: Decoder,
    text: String,
    chunks: usize,
}

impl SummaryAccumulator {
    pub fn new() -> Self {
        Self::for_encoding(UTF_8)
    }

    /// Honors a `charset=` parameter; falls back to UTF-8.
    pub fn for_content_type(content_type: Option<&str>) -> Self {
        let encoding = content_type
            .and_then(extract_charset)
            .and_then(|label| {
                let found = Encoding::for_label(label.as_bytes());
                if found.is_none() {
                    scout_warn!("Unknown charset {:?} on summary stream, using UTF-8", label);
                }
                found
            })
            .unwrap_or(UTF_8);
        Self::for_encoding(encoding)
    }

    fn for_encoding(encoding: &'static Encoding) -> Self {
        Self {
            encoding,
            decoder: encoding.new_decoder(),
            text: String::new(),
            chunks: 0,
        }
    }

    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Decodes `chunk`, appends it, and returns every display line of the
    /// whole text so far.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.chunks += 1;
        let mut src = chunk;
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(src.len())
                .unwrap_or(src.len().saturating_mul(3).saturating_add(16));
            self.text.reserve(needed);
            let (result, read, replaced) = self.decoder.decode_to_string(src, &mut self.text, false);
            if replaced {
                scout_debug!(
                    "Malformed {} bytes in summary chunk {}, replaced",
                    self.encoding.name(),
                    self.chunks
                );
            }
            src = &src[read..];
            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }
        display_lines(&self.text)
    }
}

impl Default for SummaryAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits text on `\n`, drops lines that are blank after trimming and strips
/// a trailing `\r`. Other whitespace is kept.
pub fn display_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            if key.trim().eq_ignore_ascii_case("charset") {
                Some(value.trim().trim_matches(['"', '\''].as_ref()).to_string())
            } else {
                None
            }
        })
        .next()
}
