//! PNG encoding for rendered maps.
//!
//! Contour maps use only a handful of colours, so the encoder first tries
//! an indexed image (color type 3, with a `tRNS` chunk for alpha) and falls
//! back to RGBA (color type 6) past 256 distinct colours.

use std::collections::HashMap;
use std::io::Write;

use contour_common::{ContourError, ContourResult};
use rayon::prelude::*;

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Row count above which rows are mapped to palette indices in parallel
const PARALLEL_ROWS: usize = 64;

/// Encode RGBA pixels, choosing indexed output when the colours fit.
pub fn encode_png_auto(pixels: &[u8], width: usize, height: usize) -> ContourResult<Vec<u8>> {
    check_len(pixels, width, height)?;
    match build_palette(pixels) {
        Some(palette) => {
            let indices = palette.indices(pixels, width, height);
            encode_indexed(width, height, &palette.colors, &indices)
        }
        None => encode_rgba(pixels, width, height),
    }
}

fn check_len(pixels: &[u8], width: usize, height: usize) -> ContourResult<()> {
    if pixels.len() != width * height * 4 {
        return Err(ContourError::render(format!(
            "{}x{} image needs {} bytes, got {}",
            width,
            height,
            width * height * 4,
            pixels.len()
        )));
    }
    Ok(())
}

#[inline(always)]
fn pack(px: &[u8]) -> u32 {
    u32::from_le_bytes([px[0], px[1], px[2], px[3]])
}

/// Colours in first-seen order plus their lookup table.
struct Palette {
    colors: Vec<[u8; 4]>,
    lookup: HashMap<u32, u8>,
}

impl Palette {
    fn indices(&self, pixels: &[u8], width: usize, height: usize) -> Vec<u8> {
        let row_bytes = width * 4;
        let map_row = |row: &[u8]| -> Vec<u8> {
            row.chunks_exact(4)
                .map(|px| self.lookup.get(&pack(px)).copied().unwrap_or(0))
                .collect()
        };

        if height >= PARALLEL_ROWS && row_bytes > 0 {
            pixels.par_chunks(row_bytes).flat_map_iter(map_row).collect()
        } else {
            pixels.chunks(row_bytes.max(1)).flat_map(map_row).collect()
        }
    }
}

fn build_palette(pixels: &[u8]) -> Option<Palette> {
    let mut colors = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut lookup = HashMap::with_capacity(MAX_PALETTE_SIZE);

    for px in pixels.chunks_exact(4) {
        let key = pack(px);
        if lookup.contains_key(&key) {
            continue;
        }
        if colors.len() == MAX_PALETTE_SIZE {
            return None;
        }
        lookup.insert(key, colors.len() as u8);
        colors.push([px[0], px[1], px[2], px[3]]);
    }

    Some(Palette { colors, lookup })
}

/// Encode an indexed PNG (color type 3) from palette and indices.
pub fn encode_indexed(
    width: usize,
    height: usize,
    palette: &[[u8; 4]],
    indices: &[u8],
) -> ContourResult<Vec<u8>> {
    let mut png = Vec::new();
    png.extend_from_slice(&SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    let plte: Vec<u8> = palette.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    if palette.iter().any(|c| c[3] < 255) {
        let trns: Vec<u8> = palette.iter().map(|c| c[3]).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    write_chunk(&mut png, b"IDAT", &deflate_scanlines(indices, width, height)?);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// Encode an RGBA PNG (color type 6).
pub fn encode_rgba(pixels: &[u8], width: usize, height: usize) -> ContourResult<Vec<u8>> {
    check_len(pixels, width, height)?;
    let mut png = Vec::new();
    png.extend_from_slice(&SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 6));
    write_chunk(&mut png, b"IDAT", &deflate_scanlines(pixels, width * 4, height)?);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn ihdr(width: usize, height: usize, color_type: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&(width as u32).to_be_bytes());
    data.extend_from_slice(&(height as u32).to_be_bytes());
    // bit depth, color type, compression, filter, interlace
    data.extend_from_slice(&[8, color_type, 0, 0, 0]);
    data
}

/// Prefix each `row_bytes` scanline with filter type 0 and zlib it.
fn deflate_scanlines(data: &[u8], row_bytes: usize, height: usize) -> ContourResult<Vec<u8>> {
    let mut raw = Vec::with_capacity(height * (1 + row_bytes));
    for row in data.chunks(row_bytes.max(1)).take(height) {
        raw.push(0);
        raw.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder
        .write_all(&raw)
        .map_err(|e| ContourError::render(format!("IDAT compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| ContourError::render(format!("IDAT compression failed: {}", e)))
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_types(png: &[u8]) -> Vec<String> {
        let mut types = Vec::new();
        let mut pos = 8;
        while pos + 8 <= png.len() {
            let len = u32::from_be_bytes([png[pos], png[pos + 1], png[pos + 2], png[pos + 3]]) as usize;
            types.push(String::from_utf8_lossy(&png[pos + 4..pos + 8]).to_string());
            pos += 12 + len;
        }
        types
    }

    #[test]
    fn test_palette_first_seen_order() {
        let pixels = [
            255, 0, 0, 255, // red
            0, 0, 0, 0, // transparent
            255, 0, 0, 255, // red again
        ];
        let palette = build_palette(&pixels).unwrap();
        assert_eq!(palette.colors, vec![[255, 0, 0, 255], [0, 0, 0, 0]]);
        assert_eq!(palette.indices(&pixels, 3, 1), vec![0, 1, 0]);
    }

    #[test]
    fn test_transparent_contour_map_is_indexed_with_trns() {
        // A mostly transparent canvas with two stroke colours
        let mut pixels = vec![0u8; 16 * 16 * 4];
        pixels[0..4].copy_from_slice(&[0, 0, 0, 255]);
        pixels[4..8].copy_from_slice(&[112, 112, 112, 255]);

        let png = encode_png_auto(&pixels, 16, 16).unwrap();
        assert_eq!(&png[0..8], &SIGNATURE);
        assert_eq!(png[25], 3, "color type");
        assert_eq!(chunk_types(&png), vec!["IHDR", "PLTE", "tRNS", "IDAT", "IEND"]);
    }

    #[test]
    fn test_many_colours_fall_back_to_rgba() {
        let pixels: Vec<u8> = (0..300u32)
            .flat_map(|i| [(i % 256) as u8, (i / 256) as u8, 7, 255])
            .collect();
        let png = encode_png_auto(&pixels, 300, 1).unwrap();
        assert_eq!(png[25], 6, "color type");
        assert_eq!(chunk_types(&png), vec!["IHDR", "IDAT", "IEND"]);
    }

    #[test]
    fn test_parallel_indices_match_sequential() {
        let (w, h) = (32, PARALLEL_ROWS + 3);
        let pixels: Vec<u8> = (0..w * h)
            .flat_map(|i| if i % 7 == 0 { [0, 0, 255, 255] } else { [0, 0, 0, 0] })
            .collect();
        let palette = build_palette(&pixels).unwrap();
        let parallel = palette.indices(&pixels, w, h);
        let sequential = palette.indices(&pixels, w, 1);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_length_mismatch_is_error() {
        assert!(encode_png_auto(&[0; 12], 2, 2).is_err());
    }
}
