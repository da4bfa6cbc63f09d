//! Binary PPM ("P6") reader and writer (spec §6).
//!
//! Grounded in `original_source/Trabalho_2/Ppm.h`: magic number `P6`,
//! width, height, and max value as whitespace-separated ASCII tokens
//! (with `#`-prefixed comments allowed between them), a single
//! separator byte, then `width * height * 3` raw bytes, row-major,
//! one byte per channel. Only `maxval = 255` is supported, matching
//! every PPM this crate ever writes itself.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::color::Rgb;

#[derive(Debug, Error)]
pub enum PpmError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid PPM header: {0}")]
    InvalidHeader(String),
    #[error("unsupported PPM max value {0}, only 255 is supported")]
    UnsupportedMaxValue(u32),
    #[error("PPM pixel data ended before width*height*3 bytes were read")]
    TruncatedPixelData,
}

struct Tokenizer<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos < self.bytes.len() && self.bytes[self.pos] == b'#' {
                while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                    self.pos += 1;
                }
                continue;
            }
            break;
        }
    }

    fn next_token(&mut self) -> Result<&'a [u8], PpmError> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while self.pos < self.bytes.len() && !self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(PpmError::InvalidHeader("unexpected end of header".to_string()));
        }
        Ok(&self.bytes[start..self.pos])
    }

    fn next_usize(&mut self) -> Result<usize, PpmError> {
        let token = self.next_token()?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                PpmError::InvalidHeader(format!("expected an integer, found {:?}", String::from_utf8_lossy(token)))
            })
    }
}

/// Reads a binary PPM file, returning its pixels as `[height][width]` plus the dimensions.
pub fn read_ppm(path: impl AsRef<Path>) -> Result<(Vec<Vec<Rgb>>, usize, usize), PpmError> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut contents = Vec::new();
    reader.read_to_end(&mut contents)?;

    let mut tokenizer = Tokenizer::new(&contents);
    let magic = tokenizer.next_token()?;
    if magic != b"P6" {
        return Err(PpmError::InvalidHeader(format!(
            "expected magic number P6, found {:?}",
            String::from_utf8_lossy(magic)
        )));
    }
    let width = tokenizer.next_usize()?;
    let height = tokenizer.next_usize()?;
    let max_value = tokenizer.next_usize()?;
    if max_value != 255 {
        return Err(PpmError::UnsupportedMaxValue(max_value as u32));
    }

    // Exactly one separator byte follows the max-value token.
    let data_start = tokenizer.pos + 1;
    let needed = width * height * 3;
    let data = contents
        .get(data_start..data_start + needed)
        .ok_or(PpmError::TruncatedPixelData)?;

    let mut image = vec![vec![Rgb::default(); width]; height];
    for y in 0..height {
        for x in 0..width {
            let offset = (y * width + x) * 3;
            image[y][x] = Rgb::new(data[offset], data[offset + 1], data[offset + 2]);
        }
    }

    Ok((image, width, height))
}

/// Writes `image` (a `[height][width]` matrix) as a binary PPM file.
pub fn write_ppm(path: impl AsRef<Path>, image: &[Vec<Rgb>]) -> Result<(), PpmError> {
    let height = image.len();
    let width = if height == 0 { 0 } else { image[0].len() };

    let mut writer = BufWriter::new(File::create(path)?);
    write!(writer, "P6\n{width} {height}\n255\n")?;
    for row in image {
        for pixel in row {
            writer.write_all(&[pixel.r, pixel.g, pixel.b])?;
        }
    }
    writer.flush()?;
    Ok(())
}
