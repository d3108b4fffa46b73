//! Decrypt an image encrypted by img-enc back to its original pixels.
//!
//! The encrypted PNG's raw RGB8 bytes are the ciphertext; its length equals
//! the original pixel-buffer length, so decrypting and fitting the result to
//! the pixel count restores the image exactly. The key and IV must match the
//! encrypting side.

use anyhow::{Context, Result};
use clap::Parser;
use des_cts::{cbc_cts_decrypt, DEFAULT_IV, KEY_SIZE};
use image::RgbImage;

/// Command-line arguments for the image decryption tool.
#[derive(Parser, Debug)]
struct Cli {
    /// Path to the encrypted PNG.
    #[arg(short, long, help = "Path to the encrypted PNG")]
    file: String,

    /// Path of the decrypted PNG to write.
    #[arg(short, long, default_value = "img_dec_out.png", help = "Path of the decrypted PNG to write")]
    output: String,

    /// Decryption key; prompted for without echo when omitted.
    #[arg(short, long, help = "Decryption key (padded/truncated to 8 bytes)")]
    key: Option<String>,
}

/// Same normalization rule as the encrypting side: pad with '0' to 8 bytes
/// or truncate.
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
        None => rpassword::prompt_password("Decryption key (padded/truncated to 8 bytes): ")
            .context("failed to read key")?,
    };
    Ok(normalize_key(&key))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let img = image::open(&cli.file)
        .with_context(|| format!("failed to load encrypted PNG {}", cli.file))?
        .to_rgb8();
    let (width, height) = img.dimensions();
    let ciphertext = img.into_raw();
    println!(
        "Loaded encrypted image: {} ({}x{}), bytes={}",
        cli.file,
        width,
        height,
        ciphertext.len()
    );

    let key = read_key(cli.key)?;

    let mut plaintext = cbc_cts_decrypt(&ciphertext, &key, &DEFAULT_IV)?;
    if plaintext.len() != ciphertext.len() {
        // Surfaced as a warning only; the image is still written from the
        // bytes available, padded or truncated to the pixel count.
        eprintln!(
            "Warning: decrypted size ({}) differs from expected image bytes ({})",
            plaintext.len(),
            ciphertext.len()
        );
    }
    plaintext.resize(width as usize * height as usize * 3, 0);

    let decrypted = RgbImage::from_raw(width, height, plaintext)
        .context("decrypted buffer does not match the image dimensions")?;
    decrypted
        .save(&cli.output)
        .with_context(|| format!("failed to write decrypted PNG {}", cli.output))?;

    println!("Decryption complete! Output: {}", cli.output);
    Ok(())
}
