use super::*;

fn tiny_png() -> Vec<u8> {
    // 2x1 RGBA: opaque red, half-transparent green.
    let mut img = image::RgbaImage::new(2, 1);
    img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
    img.put_pixel(1, 0, image::Rgba([0, 255, 0, 128]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn from_bytes_round_trips_through_data_uri() {
    let png = tiny_png();
    let image_ref = ImageRef::from_bytes("image/png", &png);
    assert!(image_ref.as_uri().starts_with("data:image/png;base64,"));
    assert_eq!(image_ref.media_type(), "image/png");

    let reparsed = ImageRef::from_data_uri(image_ref.as_uri().to_owned()).unwrap();
    assert_eq!(reparsed, image_ref);
}

#[test]
fn rejects_non_data_uris() {
    assert!(ImageRef::from_data_uri("https://example.com/a.png").is_err());
    assert!(ImageRef::from_data_uri("data:image/png,rawpayload").is_err());
}

#[test]
fn decode_premultiplies_alpha() {
    let image_ref = ImageRef::from_bytes("image/png", &tiny_png());
    let decoded = image_ref.decode().unwrap();
    assert_eq!((decoded.width, decoded.height), (2, 1));

    let px = &decoded.rgba8_premul;
    // Opaque pixel is untouched.
    assert_eq!(&px[0..4], &[255, 0, 0, 255]);
    // Half-transparent green premultiplies to ~128.
    assert_eq!(px[4], 0);
    assert_eq!(px[5], ((255u16 * 128 + 127) / 255) as u8);
    assert_eq!(px[7], 128);
}

#[test]
fn decode_fails_on_garbage_payload() {
    let image_ref = ImageRef::from_bytes("image/png", b"not a png at all");
    assert!(image_ref.decode().is_err());
}

#[test]
fn debug_does_not_dump_payload() {
    let image_ref = ImageRef::from_bytes("image/png", &tiny_png());
    let debug = format!("{image_ref:?}");
    assert!(debug.contains("image/png"));
    assert!(!debug.contains("base64,"));
}
