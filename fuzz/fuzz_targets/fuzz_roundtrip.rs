#![no_main]
use libfuzzer_sys::fuzz_target;
use bmpfx::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let Ok(decoded) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    // Re-encoding keeps headers, extension bytes and pixels
    let Ok(reencoded) = decoded.encode() else { return };
    let Ok(decoded2) = BmpImage::decode(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };
    assert_eq!(decoded, decoded2, "roundtrip mismatch");

    // A second pass is byte-stable
    assert_eq!(decoded2.encode().ok(), Some(reencoded));

    // Point transforms never change the dimensions
    let mut image = decoded2;
    let pipeline = Pipeline::from_sequence("CHSIGA", &StepParams::default())
        .expect("valid tags");
    if pipeline.apply(&mut image).is_ok() {
        assert_eq!((image.width(), image.height()), (decoded.width(), decoded.height()));
    }
});
