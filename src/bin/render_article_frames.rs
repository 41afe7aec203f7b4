use std::fs;
use std::path::{Path, PathBuf};

use scrolly_charts::api::{Article, ArticleConfig, ChartKind};

const DEFAULT_OUTPUT_DIR: &str = "target/article-frames";

#[derive(Debug)]
struct CliArgs {
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    output_dir: PathBuf,
}

fn main() {
    let _ = scrolly_charts::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let mut config = match &args.config_path {
        Some(path) => ArticleConfig::load(path)
            .map_err(|err| format!("failed to load config `{}`: {err}", path.display()))?,
        None => ArticleConfig::default(),
    };
    if let Some(dir) = &args.data_dir {
        config.data = config.data.relative_to(dir);
    }

    let mut article = Article::load(config).map_err(|err| err.to_string())?;
    fs::create_dir_all(&args.output_dir).map_err(|err| {
        format!(
            "failed to create output dir `{}`: {err}",
            args.output_dir.display()
        )
    })?;

    let mut written = 0usize;
    for kind in ChartKind::ALL {
        for step in 0..kind.step_count() {
            article
                .enter_step(kind, step, 0.0)
                .map_err(|err| err.to_string())?;
            article.settle();
            let svg = article.render_svg(kind).map_err(|err| err.to_string())?;
            let path = frame_path(&args.output_dir, kind, step);
            fs::write(&path, svg)
                .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
            written += 1;
        }
    }

    println!("wrote {written} frames to {}", args.output_dir.display());
    Ok(())
}

fn frame_path(output_dir: &Path, kind: ChartKind, step: usize) -> PathBuf {
    output_dir.join(format!("{}-step-{step}.svg", kind.name()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut config_path = None;
    let mut data_dir = None;
    let mut output_dir = PathBuf::from(DEFAULT_OUTPUT_DIR);

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "--data-dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --data-dir".to_owned())?;
                data_dir = Some(PathBuf::from(value));
            }
            "--out" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --out".to_owned())?;
                output_dir = PathBuf::from(value);
            }
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs {
        config_path,
        data_dir,
        output_dir,
    })
}

fn usage_message() -> String {
    format!(
        "Usage: cargo run --bin render_article_frames -- [options]\n\nOptions:\n  --config <path>     Article config JSON (default: built-in defaults)\n  --data-dir <path>   Directory the CSV paths resolve against\n  --out <path>        Output directory (default: {DEFAULT_OUTPUT_DIR})\n  -h, --help          Show this message"
    )
}
