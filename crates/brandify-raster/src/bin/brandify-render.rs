use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use brandify::{ImagePosition, RenderDocument};
use brandify_raster::{RasterConfig, RenderOutcome, RenderSession};
use brandify_render::{ImageSlot, RenderOptions};

#[derive(Clone, Debug)]
struct Args {
    input: PathBuf,
    logo: Option<PathBuf>,
    photo: Option<PathBuf>,
    out_dir: PathBuf,
    offset_x: f32,
    offset_y: f32,
    seed: Option<u64>,
    scale: f32,
    dump_scene: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match run(env::args().collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!("{}", help_text());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let cfg = parse_args(args)?;
    let json = std::fs::read_to_string(&cfg.input)
        .map_err(|e| format!("unable to read {}: {}", cfg.input.display(), e))?;
    let document: RenderDocument = serde_json::from_str(&json)
        .map_err(|e| format!("invalid document {}: {}", cfg.input.display(), e))?;

    let options = RenderOptions::default().with_scale(cfg.scale);
    let mut session =
        RenderSession::new(options, RasterConfig::default()).map_err(|e| e.to_string())?;
    if let Some(seed) = cfg.seed {
        session = session.with_seed(seed);
    }
    session.set_image_position(ImagePosition::new(cfg.offset_x, cfg.offset_y));
    session.set_document(document);

    load_image(&mut session, ImageSlot::Logo, cfg.logo.as_deref())?;
    let outcome = load_image(&mut session, ImageSlot::Photo, cfg.photo.as_deref())?;
    if outcome != RenderOutcome::Rendered {
        return Err(format!("render did not complete: {:?}", outcome));
    }

    std::fs::create_dir_all(&cfg.out_dir)
        .map_err(|e| format!("unable to create {}: {}", cfg.out_dir.display(), e))?;
    let file_name = session
        .output_file_name()
        .ok_or_else(|| "no document loaded".to_string())?;
    let out_path = cfg.out_dir.join(&file_name);
    let png = session.encode_png().map_err(|e| e.to_string())?;
    std::fs::write(&out_path, png)
        .map_err(|e| format!("unable to write {}: {}", out_path.display(), e))?;
    println!("wrote {}", out_path.display());

    if cfg.dump_scene {
        if let Some(scene) = session.last_scene() {
            let dump = scene.to_json_pretty().map_err(|e| e.to_string())?;
            let dump_path = out_path.with_extension("scene.json");
            std::fs::write(&dump_path, dump)
                .map_err(|e| format!("unable to write {}: {}", dump_path.display(), e))?;
            println!("wrote {}", dump_path.display());
        }
    }
    Ok(())
}

/// Feed one image slot to the session; a missing or unreadable file settles it as failed.
fn load_image(
    session: &mut RenderSession,
    slot: ImageSlot,
    path: Option<&Path>,
) -> Result<RenderOutcome, String> {
    let Some(path) = path else {
        return session.image_failed(slot).map_err(|e| e.to_string());
    };
    match std::fs::read(path) {
        Ok(bytes) => match session.image_ready(slot, &bytes) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                log::warn!("{}: {}", path.display(), err);
                session.render().map_err(|e| e.to_string())
            }
        },
        Err(err) => {
            log::warn!("unable to read {}: {}", path.display(), err);
            session.image_failed(slot).map_err(|e| e.to_string())
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<Args, String> {
    if args.len() >= 2 && (args[1] == "--help" || args[1] == "-h") {
        return Err("help requested".to_string());
    }

    let mut input = None;
    let mut cfg = Args {
        input: PathBuf::new(),
        logo: None,
        photo: None,
        out_dir: PathBuf::from("."),
        offset_x: 0.0,
        offset_y: 0.0,
        seed: None,
        scale: 2.0,
        dump_scene: false,
    };

    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                input = Some(PathBuf::from(value_for(&args, i, "--input")?));
                i += 2;
            }
            "--logo" => {
                cfg.logo = Some(PathBuf::from(value_for(&args, i, "--logo")?));
                i += 2;
            }
            "--photo" => {
                cfg.photo = Some(PathBuf::from(value_for(&args, i, "--photo")?));
                i += 2;
            }
            "--out-dir" => {
                cfg.out_dir = PathBuf::from(value_for(&args, i, "--out-dir")?);
                i += 2;
            }
            "--offset-x" => {
                let v = value_for(&args, i, "--offset-x")?;
                cfg.offset_x = v
                    .parse::<f32>()
                    .map_err(|_| format!("invalid --offset-x value '{}'", v))?;
                i += 2;
            }
            "--offset-y" => {
                let v = value_for(&args, i, "--offset-y")?;
                cfg.offset_y = v
                    .parse::<f32>()
                    .map_err(|_| format!("invalid --offset-y value '{}'", v))?;
                i += 2;
            }
            "--seed" => {
                let v = value_for(&args, i, "--seed")?;
                cfg.seed = Some(
                    v.parse::<u64>()
                        .map_err(|_| format!("invalid --seed value '{}'", v))?,
                );
                i += 2;
            }
            "--scale" => {
                let v = value_for(&args, i, "--scale")?;
                cfg.scale = v
                    .parse::<f32>()
                    .ok()
                    .filter(|s| *s > 0.0 && s.is_finite())
                    .ok_or_else(|| format!("invalid --scale value '{}'", v))?;
                i += 2;
            }
            "--dump-scene" => {
                cfg.dump_scene = true;
                i += 1;
            }
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }

    cfg.input = input.ok_or_else(|| "--input is required".to_string())?;
    Ok(cfg)
}

fn value_for<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires a value", flag))
}

fn help_text() -> &'static str {
    r#"brandify-render - render a hiring or welcome document to PNG

USAGE:
  brandify-render --input <doc.json> [options]

OPTIONS:
  --input <path>      document JSON ({"kind": "job" | "welcome", ...})
  --logo <path>       logo image (PNG/JPEG/GIF/WebP); placeholder when absent
  --photo <path>      employee photo for welcome templates
  --out-dir <dir>     output directory (default: .)
  --offset-x <px>     horizontal photo offset (default: 0)
  --offset-y <px>     vertical photo offset (default: 0)
  --seed <n>          seed decorative scatter for reproducible output
  --scale <n>         device pixels per logical pixel (default: 2)
  --dump-scene        also write the draw-command scene as JSON
"#
}
