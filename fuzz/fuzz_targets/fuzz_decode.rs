#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Probing and decoding must never panic
    let _ = bmpfx::ImageInfo::from_bytes(data);

    let limits = bmpfx::Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let _ = bmpfx::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
});
