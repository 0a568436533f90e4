//! CLI application for facial proportion analysis and style recommendations.
//!
//! Usage:
//!   face-style <landmarks.json> --gender female          # Human-readable output
//!   face-style <landmarks.json> --gender male --json     # JSON output
//!   face-style <landmarks.json> -o report.json --json    # Save to file
//!   face-style --gender female --seed 7                  # Synthetic demo metrics

use clap::Parser;
use face_style::{Analyzer, AnalyzerConfig, Catalog, Gender, LandmarkSource, Report};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "face-style")]
#[command(author, version, about = "Facial proportion analysis and style recommendations", long_about = None)]
struct Args {
    /// Landmark JSON file (68 points); omit to use synthetic metrics
    landmarks: Option<PathBuf>,

    /// Requester gender: male or female
    #[arg(short, long, default_value = "female")]
    gender: Gender,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Catalog JSON file (default: built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Selection limits TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for synthetic metrics and flavor text
    #[arg(long)]
    seed: Option<u64>,

    /// Hour of day (0-23) for the greeting (default: current UTC hour)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
    hour: Option<u32>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = match &args.catalog {
        Some(path) => {
            info!(path = %path.display(), "loading catalog");
            Catalog::from_file(path)?
        }
        None => Catalog::builtin()?,
    };

    let config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            AnalyzerConfig::from_file(path)?
        }
        None => AnalyzerConfig::default(),
    };

    let source = match &args.landmarks {
        Some(path) => {
            debug!(path = %path.display(), "reading landmarks");
            LandmarkSource::from_json(&std::fs::read_to_string(path)?)?
        }
        None => LandmarkSource::Unavailable,
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let analyzer = Analyzer::new(catalog, config);
    let report = match args.hour {
        Some(hour) => analyzer.analyze_at(&source, args.gender, hour, &mut rng),
        None => analyzer.analyze(&source, args.gender, &mut rng),
    };

    // Generate output
    let output_str = if args.json {
        serde_json::to_string_pretty(&report)?
    } else {
        format_human_readable(&report)
    };

    // Write output
    if let Some(ref path) = args.output {
        std::fs::write(path, &output_str)?;
        info!(path = %path.display(), "report written");
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn format_human_readable(report: &Report<'_>) -> String {
    let mut s = String::new();
    let m = &report.metrics;
    let rec = &report.recommendations;

    s.push_str(&format!("{}\n", report.flavor.greeting));
    if report.synthetic {
        s.push_str("(no landmarks provided; metrics are synthetic)\n");
    }

    s.push_str(&format!("{}\n", report.flavor.summary));
    s.push_str(&format!("\nScore: {}\n", report.score));
    s.push_str(&format!(
        "Face shape: {} ({})\n",
        report.flavor.face_shape_name, report.face_shape
    ));
    s.push_str(&format!(
        "Eye type:   {} ({})\n",
        report.flavor.eye_type_name, report.eye_type
    ));
    s.push_str(&format!(
        "Style:      {} / {}, {}\n",
        report.style.main, report.style.sub, report.style.desc
    ));

    s.push_str("\nProportions:\n");
    s.push_str(&format!(
        "  Courts:       {:.1}% / {:.1}% / {:.1}%\n",
        m.courts.upper * 100.0,
        m.courts.middle * 100.0,
        m.courts.lower * 100.0
    ));
    s.push_str(&format!("  Width/Height: {:.2}\n", m.dimensions.width_to_height));
    s.push_str(&format!("  Jaw/Cheek:    {:.2}\n", m.dimensions.jaw_to_cheek));
    s.push_str(&format!("  Eye spacing:  {:.2}x eye width\n", m.eyes.spacing_ratio));
    s.push_str(&format!("  Nose width:   {:.1}% of face\n", m.nose.width_ratio * 100.0));
    s.push_str(&format!("  Lip fullness: {:.2}\n", m.lips.fullness));

    s.push_str("\nFeatures:\n");
    let f = &report.insight.features;
    for feature in [&f.eyes, &f.nose, &f.lips, &f.eyebrows, &f.cheeks, &f.chin] {
        s.push_str(&format!(
            "  {} {}: {} ({})\n",
            feature.title,
            feature.kind,
            feature.desc,
            feature.advice.join("; ")
        ));
    }

    let bone = &report.insight.bone;
    s.push_str(&format!("  骨相 {}: {}\n", bone.shape, bone.features.join(", ")));

    let tags: Vec<&str> = report.tags.query.iter().map(String::as_str).collect();
    s.push_str(&format!("\nTags: {}\n", tags.join(", ")));

    if !rec.makeup_guide.is_empty() {
        s.push_str("\nMakeup:\n");
        for (category, step) in &rec.makeup_guide {
            s.push_str(&format!("  {:<10}{}\n", category.as_str(), step.payload));
        }
    }

    if !rec.occasions.is_empty() {
        s.push_str("\nOccasions:\n");
        for outfit in &rec.occasions {
            s.push_str(&format!("  {}: {}\n", outfit.payload.title, outfit.payload.desc));
            if !outfit.payload.items.is_empty() {
                s.push_str(&format!("    {}\n", outfit.payload.items.join(" / ")));
            }
        }
    }

    for (title, lines) in [
        ("Skincare", &rec.skincare),
        ("Makeup tips", &rec.makeup_tips),
        ("Styling", &rec.styling),
    ] {
        if !lines.is_empty() {
            s.push_str(&format!("\n{}:\n", title));
            for line in lines {
                s.push_str(&format!("  - {}\n", line));
            }
        }
    }

    if !rec.hairstyles.is_empty() {
        let names: Vec<&str> = rec.hairstyles.iter().map(|h| h.payload.as_str()).collect();
        s.push_str(&format!("\nHairstyles: {}\n", names.join(", ")));
    }

    if let Some(palette) = rec.palette {
        s.push_str(&format!("\nColors: {}\n", palette.payload.suitable.join(", ")));
        if !palette.payload.avoid.is_empty() {
            s.push_str(&format!("Avoid:  {}\n", palette.payload.avoid.join(", ")));
        }
    }

    if !rec.celebrities.is_empty() {
        s.push_str("\nLook-alikes:\n");
        for star in &rec.celebrities {
            s.push_str(&format!("  {} - {} ({})\n", star.name, star.desc, star.reason));
        }
    }

    if !rec.international.is_empty() {
        s.push_str("\nAesthetics:\n");
        for aesthetic in &rec.international {
            s.push_str(&format!(
                "  {}: {}\n",
                aesthetic.payload.region, aesthetic.payload.desc
            ));
        }
    }

    let insight = &report.insight;
    s.push_str(&format!("\nStrengths: {}\n", insight.outlook.advantages.join(", ")));
    s.push_str(&format!("Try:       {}\n", insight.outlook.directions.join(", ")));

    s.push_str("\nReadings:\n");
    for reading in &insight.physiognomy {
        s.push_str(&format!("  {}: {}\n", reading.title, reading.desc));
    }
    s.push_str(&format!("\n{}\n", insight.science.analysis));

    s.push_str(&format!("\n{}\n", report.flavor.daily_tip));
    s
}
