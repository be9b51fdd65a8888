use brandify::{JobDocument, RenderDocument, WelcomeDocument, WelcomeProfile, WelcomeTemplate};
use brandify_raster::{ImageRegistry, RasterConfig, RenderOutcome, RenderSession};
use brandify_render::{ImageSlot, RenderOptions, Rgba};

fn welcome_doc(template: WelcomeTemplate) -> RenderDocument {
    RenderDocument::Welcome(WelcomeDocument {
        profile: WelcomeProfile {
            name: "Sam Doe".to_string(),
            designation: "Product Designer".to_string(),
            image: Some("sam.png".to_string()),
            ..WelcomeProfile::default()
        },
        template,
        ..WelcomeDocument::default()
    })
}

fn solid_rgba(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    color
        .iter()
        .copied()
        .cycle()
        .take(width as usize * height as usize * 4)
        .collect()
}

fn session_with_red_photo(template: WelcomeTemplate, seed: u64) -> RenderSession {
    let mut registry = ImageRegistry::new();
    registry.mark_failed(ImageSlot::Logo);
    registry
        .register_rgba(ImageSlot::Photo, 400, 300, solid_rgba(400, 300, [255, 0, 0, 255]))
        .expect("photo");
    let mut session = RenderSession::new(RenderOptions::default(), RasterConfig::default())
        .expect("session")
        .with_seed(seed)
        .with_image_registry(registry);
    session.set_document(welcome_doc(template));
    session
}

fn is_red(color: Rgba) -> bool {
    color.r > 200 && color.g < 60 && color.b < 60
}

#[test]
fn job_render_is_device_sized_png() {
    let mut session =
        RenderSession::new(RenderOptions::default(), RasterConfig::default()).expect("session");
    session.set_document(RenderDocument::Job(JobDocument::default()));
    assert_eq!(
        session.image_failed(ImageSlot::Logo).expect("render"),
        RenderOutcome::Rendered
    );
    assert_eq!(
        (session.canvas().width(), session.canvas().height()),
        (1600, 2000)
    );
    let png = session.encode_png().expect("png");
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn welcome_waits_for_declared_photo() {
    let mut session =
        RenderSession::new(RenderOptions::default(), RasterConfig::default()).expect("session");
    session.set_document(welcome_doc(WelcomeTemplate::Corporate));
    assert!(matches!(
        session.image_failed(ImageSlot::Logo),
        Ok(RenderOutcome::Waiting(_))
    ));
    assert!(session.last_scene().is_none());
    assert_eq!(
        session.image_failed(ImageSlot::Photo).expect("render"),
        RenderOutcome::Rendered
    );
    let scene = session.last_scene().expect("scene");
    assert!(scene.find_text("Upload an image").is_some());
}

#[test]
fn encoded_photo_bytes_are_decoded() {
    let mut photo = tiny_skia::Pixmap::new(40, 30).expect("pixmap");
    photo.fill(tiny_skia::Color::from_rgba8(0, 200, 0, 255));
    let bytes = photo.encode_png().expect("png");

    let mut session =
        RenderSession::new(RenderOptions::default(), RasterConfig::default()).expect("session");
    session.set_document(welcome_doc(WelcomeTemplate::Creative));
    session.image_failed(ImageSlot::Logo).expect("logo");
    assert_eq!(
        session.image_ready(ImageSlot::Photo, &bytes).expect("photo"),
        RenderOutcome::Rendered
    );
    let center = session.canvas().pixel(800, 900).expect("pixel");
    assert!(center.g > 150 && center.r < 60, "center {center}");
}

#[test]
fn undecodable_photo_falls_back_to_placeholder() {
    let mut session =
        RenderSession::new(RenderOptions::default(), RasterConfig::default()).expect("session");
    session.set_document(welcome_doc(WelcomeTemplate::Corporate));
    session.image_failed(ImageSlot::Logo).expect("logo");
    let err = session
        .image_ready(ImageSlot::Photo, b"definitely not a png")
        .expect_err("garbage");
    assert_eq!(err.code(), "IMAGE_DECODE");
    assert_eq!(session.render().expect("render"), RenderOutcome::Rendered);
    let scene = session.last_scene().expect("scene");
    assert!(scene.find_text("Upload an image").is_some());
}

#[test]
fn circular_photo_does_not_bleed_outside_clip() {
    let mut session = session_with_red_photo(WelcomeTemplate::Corporate, 3);
    assert_eq!(session.render().expect("render"), RenderOutcome::Rendered);
    let canvas = session.canvas();

    // Inside the photo circle (logical 400, 450).
    let inside = canvas.pixel(800, 900).expect("pixel");
    assert!(is_red(inside), "inside {inside}");

    // Inside the cover rect but 200 logical px from the circle center.
    let outside = canvas.pixel(400, 1040).expect("pixel");
    assert!(!is_red(outside), "outside {outside}");
}

#[test]
fn seeded_rerender_is_pixel_identical() {
    let mut first = session_with_red_photo(WelcomeTemplate::Modern, 99);
    first.render().expect("render");
    let before = first.canvas().pixmap().data().to_vec();
    first.render().expect("rerender");
    assert_eq!(first.canvas().pixmap().data(), before.as_slice());

    let mut second = session_with_red_photo(WelcomeTemplate::Modern, 99);
    second.render().expect("render");
    assert_eq!(second.canvas().pixmap().data(), before.as_slice());
}
