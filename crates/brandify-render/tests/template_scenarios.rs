use brandify::{
    BenefitsLayout, ImagePosition, JobDocument, JobLayout, JobPosting, ListContent, OpeningList,
    RenderDocument, WelcomeDocument, WelcomeProfile, WelcomeTemplate,
};
use brandify_render::{
    layout_list_report, wrap_text, DrawCommand, HeuristicTextMeasurer, ImageInfo, ImageSlot,
    ImageStatus, ListOptions, ListOrientation, RectF, RenderImages, RenderOptions, RenderRequest,
    Rgba, Scene, TextAlign, TextMeasurer, TextStyle, TemplateEngine,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn loaded_images() -> RenderImages {
    RenderImages {
        logo: ImageStatus::Loaded(ImageInfo::new(200, 100)),
        photo: ImageStatus::Loaded(ImageInfo::new(400, 300)),
    }
}

fn render(document: RenderDocument, images: RenderImages, seed: u64) -> Scene {
    let engine = TemplateEngine::default();
    let request = RenderRequest::new(document).with_images(images);
    engine.render(&request, &mut StdRng::seed_from_u64(seed))
}

fn welcome(template: WelcomeTemplate, profile: WelcomeProfile) -> RenderDocument {
    RenderDocument::Welcome(WelcomeDocument {
        profile,
        template,
        ..WelcomeDocument::default()
    })
}

fn sample_profile() -> WelcomeProfile {
    WelcomeProfile {
        name: "Sam Doe".to_string(),
        designation: "Product Designer".to_string(),
        image: Some("sam.jpg".to_string()),
        years: Some("1".to_string()),
        new_designation: Some("Lead Designer".to_string()),
        message: Some("Thank you for everything you bring to the team.".to_string()),
    }
}

fn photo_commands(scene: &Scene) -> Vec<RectF> {
    scene
        .commands
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Image(image) if image.slot == ImageSlot::Photo => Some(image.dest),
            _ => None,
        })
        .collect()
}

#[test]
fn single_posting_stacks_sections_in_order() {
    let posting = JobPosting {
        responsibilities: ListContent::from_items(["Ship models", "Review prompts"]),
        requirements: ListContent::from_items(["Rust", "Python"]),
        ..JobPosting::default()
    };
    let doc = RenderDocument::Job(JobDocument {
        posting,
        ..JobDocument::default()
    });
    let scene = render(doc, loaded_images(), 1);

    let hiring = scene.find_text("HIRING").expect("hiring heading");
    assert_eq!((hiring.x, hiring.y), (50.0, 150.0));
    let title = scene.find_text("AI Engineer").expect("title badge");
    assert_eq!((title.x, title.y), (70.0, 195.0));

    let responsibilities = scene.find_text("RESPONSIBILITIES:").expect("section");
    let requirements = scene.find_text("REQUIREMENTS:").expect("section");
    let benefits = scene.find_text("BENEFITS OFFERED:").expect("section");
    assert!(responsibilities.y > 245.0);
    assert!(responsibilities.y < requirements.y);
    assert!(requirements.y < benefits.y);
    assert!(benefits.y < 950.0);

    let location = scene.find_text("LOCATION: KARACHI").expect("footer");
    assert_eq!(location.y, 978.0);
    assert_eq!(location.align, TextAlign::Center);
    assert_eq!(scene.save_depth(), 0);
}

#[test]
fn single_posting_omits_blank_sections() {
    let doc = RenderDocument::Job(JobDocument {
        posting: JobPosting {
            responsibilities: ListContent::from_items([""]),
            ..JobPosting::default()
        },
        ..JobDocument::default()
    });
    let scene = render(doc, loaded_images(), 1);
    assert!(scene.find_text("RESPONSIBILITIES:").is_none());
    assert!(scene.find_text("REQUIREMENTS:").is_none());
    assert!(scene.find_text("BENEFITS OFFERED:").is_some());
}

#[test]
fn pending_logo_draws_nothing_and_failed_logo_draws_placeholder() {
    let doc = RenderDocument::Job(JobDocument::default());
    let pending = render(doc.clone(), RenderImages::default(), 1);
    assert!(pending.find_text("Logo").is_none());
    assert!(!pending
        .commands
        .iter()
        .any(|cmd| matches!(cmd, DrawCommand::Image(_))));

    let failed = render(
        doc,
        RenderImages {
            logo: ImageStatus::Failed,
            photo: ImageStatus::Failed,
        },
        1,
    );
    assert!(failed.find_text("Logo").is_some());
    assert!(failed.find_text("OFFICEFIELD").is_some());
}

#[test]
fn multiple_openings_lists_roles_with_experience() {
    let doc = RenderDocument::Job(JobDocument {
        layout: JobLayout::Multiple,
        posting: JobPosting {
            location: "Karachi".to_string(),
            ..JobPosting::default()
        },
        ..JobDocument::default()
    });
    let scene = render(doc, loaded_images(), 1);

    let devops = scene.find_text("DevOps Engineer").expect("opening title");
    let experience = scene
        .find_text("Experience: Experience 2+ Years")
        .expect("opening subtitle");
    assert!(experience.y > devops.y);
    assert_eq!(devops.x, 85.0);

    let benefits = scene.find_text("BENEFITS OFFERED:").expect("benefits");
    assert!(benefits.y > experience.y);
    assert!(scene.find_text("LOCATION: KARACHI").is_some());
}

#[test]
fn multiple_openings_with_no_roles_moves_benefits_up() {
    let doc = RenderDocument::Job(JobDocument {
        layout: JobLayout::Multiple,
        openings: OpeningList::new(),
        ..JobDocument::default()
    });
    let scene = render(doc, loaded_images(), 1);
    let benefits = scene.find_text("BENEFITS OFFERED:").expect("benefits");
    assert_eq!(benefits.y, 252.0);
}

#[test]
fn horizontal_list_of_seven_items_uses_three_rows() {
    let measurer = HeuristicTextMeasurer;
    let mut scene = Scene::new(800, 1000, 1.0, Rgba::WHITE);
    let items: Vec<String> = (1..=7).map(|i| format!("Perk {i}")).collect();
    let options = ListOptions::new(TextStyle::sans(500, 16.0), Rgba::BLACK, Rgba::BLACK)
        .with_orientation(ListOrientation::Horizontal)
        .with_item_spacing(15.0);
    let report = layout_list_report(&mut scene, &measurer, &items, 300.0, &options);
    assert_eq!(report.rows, 3);
    assert_eq!(report.bullets, 7);
    // Three single-line rows plus two gaps.
    assert_eq!(report.consumed_height, 20.0 * 3.0 + 15.0 * 2.0);
}

#[test]
fn horizontal_benefits_render_in_columns() {
    let doc = RenderDocument::Job(JobDocument {
        benefits_layout: BenefitsLayout::Horizontal,
        ..JobDocument::default()
    });
    let scene = render(doc, loaded_images(), 1);
    let first = scene.find_text("Medical coverage").expect("first benefit");
    let second = scene.find_text("Yearly benefits").expect("second benefit");
    assert_eq!(first.y, second.y);
    assert!(second.x > first.x);
    let quarterly = scene.find_text("Quarterly rewards").expect("fifth benefit");
    assert!(quarterly.y > first.y);
}

#[test]
fn wrapped_lines_fit_and_keep_every_word() {
    let measurer = HeuristicTextMeasurer;
    let style = TextStyle::sans(500, 16.0);
    let text = "Build optimize and deploy high performance generative systems that serve \
real users at millisecond latencies across many regions";
    for max_width in [80.0, 150.0, 320.0, 700.0] {
        let lines = wrap_text(&measurer, &style, text, max_width);
        for line in &lines {
            let single_word = !line.contains(' ');
            assert!(
                single_word || measurer.measure_text_px(line, &style) < max_width,
                "line {line:?} overflows {max_width}"
            );
        }
        let rejoined = lines.join(" ");
        assert_eq!(
            rejoined.split_whitespace().collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>()
        );
    }
}

#[test]
fn corporate_welcome_clips_photo_and_covers_frame() {
    let scene = render(
        welcome(WelcomeTemplate::Corporate, sample_profile()),
        loaded_images(),
        3,
    );
    let photos = photo_commands(&scene);
    assert_eq!(photos.len(), 1);
    let frame = RectF::new(244.0, 364.0, 312.0, 312.0);
    assert!(photos[0].contains_rect(&frame));

    let index = scene
        .commands
        .iter()
        .position(|cmd| matches!(cmd, DrawCommand::Image(image) if image.slot == ImageSlot::Photo))
        .expect("photo command");
    assert!(scene.commands[..index]
        .iter()
        .rev()
        .any(|cmd| matches!(cmd, DrawCommand::Clip(_))));

    let name = scene.find_text("SAM DOE").expect("name");
    assert_eq!(name.y, 780.0);
    assert!(scene.find_text("PRODUCT DESIGNER").is_some());
    assert!(scene.find_text("Upload an image").is_none());
    assert_eq!(scene.save_depth(), 0);
}

#[test]
fn welcome_without_photo_shows_upload_prompt() {
    let profile = WelcomeProfile {
        image: None,
        ..sample_profile()
    };
    let scene = render(
        welcome(WelcomeTemplate::Creative, profile),
        loaded_images(),
        3,
    );
    assert!(photo_commands(&scene).is_empty());
    assert!(scene.find_text("Upload an image").is_some());
}

#[test]
fn anniversary_uses_ordinal_title_and_brand_header() {
    let scene = render(
        welcome(WelcomeTemplate::Anniversary, sample_profile()),
        loaded_images(),
        5,
    );
    assert!(scene.find_text("Happy 1st Work").is_some());
    assert!(scene.find_text("ANNIVERSARY").is_some());
    assert!(scene.find_text("Office Field").is_some());
    let website = scene.find_text("www.officefield.com").expect("website");
    assert_eq!(website.y, 960.0);
}

#[test]
fn promotion_shows_new_designation() {
    let scene = render(
        welcome(WelcomeTemplate::Promotion, sample_profile()),
        loaded_images(),
        5,
    );
    assert!(scene.find_text("ON YOUR PROMOTION").is_some());
    assert!(scene.find_text("LEAD DESIGNER").is_some());
}

#[test]
fn every_template_balances_save_and_restore() {
    let mut documents = vec![
        RenderDocument::Job(JobDocument::default()),
        RenderDocument::Job(JobDocument {
            layout: JobLayout::Multiple,
            ..JobDocument::default()
        }),
    ];
    documents.extend(
        WelcomeTemplate::ALL
            .into_iter()
            .map(|template| welcome(template, sample_profile())),
    );
    for document in documents {
        for images in [loaded_images(), RenderImages::default()] {
            let scene = render(document.clone(), images, 11);
            assert_eq!(scene.save_depth(), 0);
            assert!(matches!(scene.commands[0], DrawCommand::Clear(_)));
        }
    }
}

#[test]
fn seeded_renders_are_identical() {
    for template in WelcomeTemplate::ALL {
        let a = render(welcome(template, sample_profile()), loaded_images(), 42);
        let b = render(welcome(template, sample_profile()), loaded_images(), 42);
        assert_eq!(a, b, "template {template}");
    }
}

#[test]
fn photo_offset_shifts_cover_rect() {
    let engine = TemplateEngine::new(RenderOptions::default());
    let document = welcome(WelcomeTemplate::Modern, sample_profile());
    let base = RenderRequest::new(document).with_images(loaded_images());
    let shifted = base
        .clone()
        .with_image_position(ImagePosition::new(25.0, -10.0));
    let a = photo_commands(&engine.render(&base, &mut StdRng::seed_from_u64(9)));
    let b = photo_commands(&engine.render(&shifted, &mut StdRng::seed_from_u64(9)));
    assert_eq!(a.len(), 1);
    assert!((b[0].x - a[0].x - 25.0).abs() < 1e-3);
    assert!((b[0].y - a[0].y + 10.0).abs() < 1e-3);
}
