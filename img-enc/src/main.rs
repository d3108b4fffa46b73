//! Encrypt an image's pixel buffer with DES in CBC-CTS mode.
//!
//! The image is loaded as RGB8 and the raw pixel bytes are encrypted as one
//! opaque byte sequence; because CBC-CTS preserves length, the ciphertext
//! fits back into a PNG of the same dimensions. Pixel semantics play no role
//! here — the cipher sees bytes.

use anyhow::{Context, Result};
use clap::Parser;
use des_cts::{cbc_cts_encrypt, DEFAULT_IV, KEY_SIZE};
use image::RgbImage;

/// Command-line arguments for the image encryption tool.
#[derive(Parser, Debug)]
struct Cli {
    /// Path to the input image.
    #[arg(short, long, help = "Path to the input image")]
    file: String,

    /// Path of the encrypted PNG to write.
    #[arg(short, long, default_value = "img_enc.png", help = "Path of the encrypted PNG to write")]
    output: String,

    /// Encryption key; prompted for without echo when omitted.
    #[arg(short, long, help = "Encryption key (padded/truncated to 8 bytes)")]
    key: Option<String>,
}

/// Normalize arbitrary key input to exactly 8 bytes: shorter keys are padded
/// on the right with '0', longer keys are truncated. The cipher core itself
/// never pads or truncates key material.
fn normalize_key(key: &str) -> [u8; KEY_SIZE] {
    let mut out = [b'0'; KEY_SIZE];
    let bytes = key.as_bytes();
    let n = bytes.len().min(KEY_SIZE);
    out[..n].copy_from_slice(&bytes[..n]);
    out
}

fn read_key(arg: Option<String>) -> Result<[u8; KEY_SIZE]> {
    let key = match arg {
        Some(key) => key,
        None => rpassword::prompt_password("Encryption key (padded/truncated to 8 bytes): ")
            .context("failed to read key")?,
    };
    Ok(normalize_key(&key))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let img = image::open(&cli.file)
        .with_context(|| format!("failed to load image {}", cli.file))?
        .to_rgb8();
    let (width, height) = img.dimensions();
    let pixels = img.into_raw();
    println!(
        "Loaded: {} ({}x{}), bytes={}",
        cli.file,
        width,
        height,
        pixels.len()
    );

    let key = read_key(cli.key)?;

    let mut ciphertext = cbc_cts_encrypt(&pixels, &key, &DEFAULT_IV)?;
    if ciphertext.len() != pixels.len() {
        // Only possible for images smaller than one cipher block.
        eprintln!(
            "Warning: encrypted data size ({}) != original size ({})",
            ciphertext.len(),
            pixels.len()
        );
        ciphertext.resize(pixels.len(), 0);
    }

    let encrypted = RgbImage::from_raw(width, height, ciphertext)
        .context("encrypted buffer does not match the image dimensions")?;
    encrypted
        .save(&cli.output)
        .with_context(|| format!("failed to write encrypted PNG {}", cli.output))?;

    println!("Encrypted PNG written: {}", cli.output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::normalize_key;

    #[test]
    fn test_normalize_key_pads_short_input() {
        assert_eq!(&normalize_key("abc"), b"abc00000");
    }

    #[test]
    fn test_normalize_key_truncates_long_input() {
        assert_eq!(&normalize_key("mysecretpassword"), b"mysecret");
    }

    #[test]
    fn test_normalize_key_keeps_exact_input() {
        assert_eq!(&normalize_key("12345678"), b"12345678");
    }
}
