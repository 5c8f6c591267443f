use anyhow::{bail, Context};
use clap::Parser;
use yieldmap::prelude::*;

/// Headless yieldmap viewer: loads a dataset, renders one view and prints what a
/// map would show
#[derive(clap::Parser, Debug)]
#[command(name = "yieldmap-app", version, about)]
struct Cli {
    /// Feature collection (file path or http(s) URL)
    features: String,

    /// Centroid lookup (file path or http(s) URL)
    #[arg(short, long)]
    centroids: Option<String>,

    /// Visible area as min_lng,min_lat,max_lng,max_lat
    #[arg(short, long, default_value = "90,25,120,45")]
    bounds: String,

    /// Zoom level of the view
    #[arg(short, long, default_value_t = 6.0)]
    zoom: f64,

    /// Click the region with this display name after rendering
    #[arg(short, long)]
    select: Option<String>,

    /// Preset: balanced, low-power or detailed
    #[arg(short, long, default_value = "balanced")]
    profile: String,

    /// JSON file overriding individual render options
    #[arg(long)]
    options: Option<std::path::PathBuf>,
}

fn parse_bounds(text: &str) -> anyhow::Result<BoundingBox> {
    let values = text
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("invalid bounds {:?}", text))?;
    match values.as_slice() {
        [min_lng, min_lat, max_lng, max_lat] => {
            let bounds = BoundingBox::new(*min_lng, *min_lat, *max_lng, *max_lat);
            if !bounds.is_valid() {
                bail!("bounds {:?} have min greater than max", text);
            }
            Ok(bounds)
        }
        _ => bail!("bounds need four comma separated numbers, got {:?}", text),
    }
}

fn resolve_options(cli: &Cli) -> anyhow::Result<RenderOptions> {
    if let Some(path) = &cli.options {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        return Ok(RenderOptions::from_json_str(&text)?);
    }
    let profile = match cli.profile.as_str() {
        "balanced" => RenderProfile::Balanced,
        "low-power" => RenderProfile::LowPower,
        "detailed" => RenderProfile::Detailed,
        other => bail!("unknown profile {:?}", other),
    };
    Ok(profile.resolve())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    yieldmap::init_logging();

    let cli = Cli::parse();
    let options = resolve_options(&cli)?;
    let bounds = parse_bounds(&cli.bounds)?;

    let features = source_for(&cli.features);
    let centroids = cli.centroids.as_deref().map(source_for);
    let (dataset, lookup) = load_all(
        &*features,
        centroids.as_deref(),
        options.fetch_timeout(),
    )
    .await;
    if dataset.origin == DatasetOrigin::Fallback {
        log::warn!("showing the demonstration dataset");
    }

    let surface = HeadlessSurface::new(bounds, cli.zoom);
    let mut session = RenderSession::new(surface, RecordingPanel::new(), options)?;
    let now = Instant::now();
    session.install_dataset(dataset, lookup, now);
    session.on_surface_ready(now);

    println!(
        "{} of {} regions visible at zoom {}",
        session.visible_positions().len(),
        session.collection().len(),
        cli.zoom
    );
    if let Some(layer) = session.layer() {
        for shape in layer.shapes() {
            println!(
                "  {:>6}  {:<32} yield {:.2}",
                shape.attributes.id, shape.attributes.name, shape.attributes.yield_val
            );
        }
    }

    if let Some(name) = &cli.select {
        let shape = session
            .layer()
            .and_then(|layer| layer.shapes().iter().find(|s| &s.attributes.name == name))
            .map(|s| s.id)
            .with_context(|| format!("region {:?} is not visible", name))?;
        session.handle_shape_event(shape, ShapeEvent::Click)?;

        if let Some(record) = session.panel().current() {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        if let Some((center, zoom)) = session.surface().fly_tos().last() {
            println!("focus: lng {:.4}, lat {:.4} at zoom {}", center.lng, center.lat, zoom);
        }
    }

    session.teardown();
    Ok(())
}
