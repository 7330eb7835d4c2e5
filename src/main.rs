use clap::{Parser, Subcommand, ValueEnum};
use pixprint::config::{self, AnalysisConfig};
use pixprint::hash::{self, HashAlgorithm, PerceptualHash};
use pixprint::imaging::{ImageCodec, RustBackend};
use pixprint::pixel::PixelBuffer;
use pixprint::{operations, output};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Extensions the `image` build in this binary can decode.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "webp"];

#[derive(Parser)]
#[command(name = "pixprint")]
#[command(about = "Color palettes, perceptual hashes and sharpness scores for images")]
#[command(long_about = "\
Color palettes, perceptual hashes and sharpness scores for images

Every analysis runs on decoded pixels. Palettes and hashes use a small
sample (100px on the long edge by default); sharpness uses the full image.

Hashes are 64-bit dHash or aHash values printed as 16 hex digits. Two
images are similar when 1 - distance/64 reaches the similarity threshold.

Logging goes to stderr; set RUST_LOG=debug for per-image detail.

Run 'pixprint gen-config' to generate a documented pixprint.toml.")]
#[command(version)]
struct Cli {
    /// Config file (TOML). Defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Dhash,
    Ahash,
}

impl From<AlgorithmArg> for HashAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Dhash => HashAlgorithm::DHash,
            AlgorithmArg::Ahash => HashAlgorithm::AHash,
        }
    }
}

/// Shared flags for commands that hash images.
#[derive(clap::Args, Clone)]
struct HashArgs {
    /// Hash algorithm (overrides hashing.algorithm)
    #[arg(long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Minimum similarity, 0-1 (overrides hashing.similarity_threshold)
    #[arg(long)]
    threshold: Option<f64>,
}

#[derive(Subcommand)]
enum Command {
    /// Extract the color palette and color flags of each image
    Palette {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the perceptual hash of each image
    Hash {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        args: HashArgs,
    },
    /// Compare two images by perceptual hash
    Compare {
        left: PathBuf,
        right: PathBuf,
        #[command(flatten)]
        args: HashArgs,
    },
    /// Score the sharpness of each image (0-100)
    Quality {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Find near-duplicate images among files and directories
    Duplicates {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[command(flatten)]
        args: HashArgs,
    },
    /// Print a stock pixprint.toml with all options documented
    GenConfig,
}

#[derive(Serialize)]
struct Labeled<'a, T: Serialize> {
    path: &'a str,
    #[serde(flatten)]
    value: T,
}

#[derive(Serialize)]
struct DuplicateReport<'a> {
    files: &'a [String],
    groups: &'a [hash::DuplicateGroup],
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut analysis_config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => AnalysisConfig::default(),
    };
    init_thread_pool(&analysis_config.processing);
    let codec = RustBackend::new();

    match cli.command {
        Command::Palette { files } => {
            for path in &files {
                let buffer = decode_file(&codec, path)?;
                let analysis =
                    operations::analyze_colors(&codec, &buffer, &analysis_config.palette)?;
                let label = path.display().to_string();
                if cli.json {
                    print_json(&Labeled {
                        path: &label,
                        value: analysis,
                    })?;
                } else {
                    output::print_palette(&label, &analysis);
                }
            }
        }
        Command::Hash { files, args } => {
            apply_hash_args(&mut analysis_config, &args)?;
            let algorithm = analysis_config.hashing.algorithm;
            for path in &files {
                let buffer = decode_file(&codec, path)?;
                let hash = operations::compute_hash(&codec, &buffer, algorithm)?;
                let label = path.display().to_string();
                if cli.json {
                    print_json(&Labeled {
                        path: &label,
                        value: hash,
                    })?;
                } else {
                    output::print_hash(&label, &hash);
                }
            }
        }
        Command::Compare { left, right, args } => {
            apply_hash_args(&mut analysis_config, &args)?;
            let hashing = &analysis_config.hashing;
            let a = decode_file(&codec, &left)?;
            let b = decode_file(&codec, &right)?;
            let result = operations::compare_images(&codec, &a, &b, hashing.algorithm)?;
            if cli.json {
                print_json(&result)?;
            } else {
                output::print_comparison(
                    &left.display().to_string(),
                    &right.display().to_string(),
                    &result,
                    hashing.similarity_threshold,
                );
            }
        }
        Command::Quality { files } => {
            for path in &files {
                let buffer = decode_file(&codec, path)?;
                let score = operations::score_quality(&codec, &buffer, &analysis_config.quality)?;
                let label = path.display().to_string();
                if cli.json {
                    print_json(&Labeled {
                        path: &label,
                        value: serde_json::json!({ "score": score }),
                    })?;
                } else {
                    output::print_quality(&label, score);
                }
            }
        }
        Command::Duplicates { paths, args } => {
            apply_hash_args(&mut analysis_config, &args)?;
            let hashing = &analysis_config.hashing;
            let files = collect_images(&paths);
            let (labels, hashes) = hash_files(&codec, &files, hashing.algorithm);
            let groups = hash::find_duplicate_hashes(&hashes, hashing.similarity_threshold)?;
            if cli.json {
                print_json(&DuplicateReport {
                    files: &labels,
                    groups: &groups,
                })?;
            } else {
                output::print_duplicates(&labels, &groups);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. The user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Apply command-line hash overrides on top of the loaded config.
fn apply_hash_args(
    config: &mut AnalysisConfig,
    args: &HashArgs,
) -> Result<(), config::ConfigError> {
    if let Some(algorithm) = args.algorithm {
        config.hashing.algorithm = algorithm.into();
    }
    if let Some(threshold) = args.threshold {
        config.hashing.similarity_threshold = threshold;
    }
    config.validate()
}

fn decode_file(codec: &impl ImageCodec, path: &Path) -> Result<PixelBuffer, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let buffer = codec
        .decode(&bytes)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(buffer)
}

/// Expand directories into the image files beneath them, sorted by path.
/// Plain file arguments are kept as given.
fn collect_images(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|p| has_image_extension(p))
            .collect();
        found.sort();
        files.extend(found);
    }
    files
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
}

/// Hash files in parallel, decoding one at a time per worker.
///
/// Files that fail to read or decode are logged and skipped, so one broken
/// file does not abort a directory scan.
fn hash_files(
    codec: &RustBackend,
    files: &[PathBuf],
    algorithm: HashAlgorithm,
) -> (Vec<String>, Vec<PerceptualHash>) {
    let results: Vec<_> = files
        .par_iter()
        .map(|path| {
            let hash = decode_file(codec, path)
                .map_err(|e| e.to_string())
                .and_then(|buffer| {
                    operations::compute_hash(codec, &buffer, algorithm).map_err(|e| e.to_string())
                });
            (path, hash)
        })
        .collect();

    let mut labels = Vec::new();
    let mut hashes = Vec::new();
    for (path, result) in results {
        match result {
            Ok(hash) => {
                labels.push(path.display().to_string());
                hashes.push(hash);
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping image"),
        }
    }
    (labels, hashes)
}

fn print_json(value: &impl Serialize) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
