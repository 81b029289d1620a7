#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bit_count: u16, offset: u32, data: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; offset as usize];
    out[0] = b'B'; out[1] = b'M';
    out[2..6].copy_from_slice(&(offset + data.len() as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&bit_count.to_le_bytes());
    out[34..38].copy_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(data);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1 24-bit: B,G,R + 1 padding byte
    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp(1, 1, 24, 54, &[0xff, 0, 0, 0])).unwrap();

    // 2x2 24-bit, bottom-up and top-down
    let rows = [0, 0, 255, 0, 255, 0, 0, 0, 255, 0, 0, 255, 255, 255, 0, 0];
    fs::write(format!("{dir}/bmp_2x2.bmp"), bmp(2, 2, 24, 54, &rows)).unwrap();
    fs::write(format!("{dir}/bmp_2x2_topdown.bmp"), bmp(2, -2, 24, 54, &rows)).unwrap();

    // 2x1 32-bit with alpha
    fs::write(format!("{dir}/bmp_2x1_rgba.bmp"), bmp(2, 1, 32, 54, &[1, 2, 3, 4, 5, 6, 7, 8])).unwrap();

    // Pixel data behind a gap after the headers
    fs::write(format!("{dir}/bmp_gap.bmp"), bmp(1, 1, 24, 70, &[9, 8, 7, 0])).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/bmp_16bit.bin"), bmp(1, 1, 16, 54, &[0, 0, 0, 0])).unwrap();
    fs::write(format!("{dir}/bmp_no_pixels.bin"), bmp(4, 4, 24, 54, &[])).unwrap();

    println!("Generated seed corpus in {dir}/");
}
