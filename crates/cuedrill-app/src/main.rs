//! CueDrill 命令行入口
//! 生成示例练习、检查场景文件、计算投影适配变换和绘制列表

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use cuedrill_core::prelude::*;
use cuedrill_file::{native, DrillCategory, DrillRecord};

#[derive(Parser, Debug)]
#[command(name = "cuedrill", about = "Billiards drill scenes and projector fitting")]
struct Cli {
    /// JSON 配置文件（缺失字段使用默认值）
    #[arg(long, global = true, env = "CUEDRILL_CONFIG")]
    config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 生成示例练习场景
    Sample {
        #[arg(long, short)]
        output: PathBuf,
        /// 输出为练习记录而不是纯场景
        #[arg(long)]
        drill: Option<String>,
    },
    /// 列出场景中的实体
    Inspect { file: PathBuf },
    /// 计算适配变换
    Fit {
        file: PathBuf,
        #[command(flatten)]
        surface: SurfaceArgs,
        #[arg(long)]
        padding: Option<f64>,
    },
    /// 输出投影绘制列表
    Project {
        file: PathBuf,
        #[command(flatten)]
        surface: SurfaceArgs,
        #[arg(long, value_enum, default_value_t = BackgroundArg::Black)]
        background: BackgroundArg,
        /// 高亮颜色，例如 #FFFF00
        #[arg(long)]
        highlight: Option<String>,
    },
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    #[arg(long)]
    width: f64,
    #[arg(long)]
    height: f64,
    #[arg(long, default_value_t = 1.0)]
    zoom: f64,
    /// 按整个球台适配（无留白）
    #[arg(long)]
    table: bool,
}

impl SurfaceArgs {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }

    fn mode(&self) -> FitMode {
        if self.table {
            FitMode::Table
        } else {
            FitMode::Content
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum BackgroundArg {
    Black,
    White,
    Green,
}

impl From<BackgroundArg> for ProjectionBackground {
    fn from(arg: BackgroundArg) -> Self {
        match arg {
            BackgroundArg::Black => ProjectionBackground::Black,
            BackgroundArg::White => ProjectionBackground::White,
            BackgroundArg::Green => ProjectionBackground::Green,
        }
    }
}

#[derive(Serialize)]
struct FitReport {
    transform: AffineTransform,
    scale: f64,
    placements: Vec<Placement>,
}

#[derive(Serialize)]
struct ProjectionReport {
    background: Color,
    transform: AffineTransform,
    items: Vec<RenderItem>,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: Config = serde_json::from_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// 示例练习：定杆走位
fn sample_scene() -> Result<Scene> {
    let mut scene = Scene::new();
    scene.add(factory::cue_ball(Point2::new(225.0, 225.0)))?;
    scene.add(factory::ball(Point2::new(450.0, 225.0), 1)?)?;
    scene.add(factory::ball(Point2::new(600.0, 140.0), 9)?)?;
    scene.add(factory::arrow_line(
        Point2::new(237.0, 225.0),
        Point2::new(438.0, 225.0),
    ))?;
    scene.add(factory::straight_line(
        Point2::new(462.0, 225.0),
        Point2::new(880.0, 225.0),
    ))?;
    scene.add(factory::target_rings(Point2::new(450.0, 380.0)))?;
    scene.add(factory::training_aid(
        Point2::new(300.0, 80.0),
        TargetCount::Three,
    ))?;
    Ok(scene)
}

fn run_sample(output: &Path, drill: Option<&str>) -> Result<()> {
    let scene = sample_scene()?;
    match drill {
        Some(name) => {
            let record = DrillRecord::new(name, "Stop shot and follow-through", DrillCategory::Practice, &scene)?;
            fs::write(output, record.to_json()?)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!("Wrote drill '{}' to {}", record.name, output.display());
        }
        None => {
            native::save(&scene, output)
                .with_context(|| format!("failed to save {}", output.display()))?;
        }
    }
    Ok(())
}

/// 同时接受纯场景文件和练习记录
fn load_scene(path: &Path) -> Result<Scene> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    match cuedrill_file::from_json(&text) {
        Ok(scene) => Ok(scene),
        Err(scene_err) => DrillRecord::from_json(&text)
            .and_then(|drill| drill.scene())
            .with_context(|| format!("{} is neither a scene nor a drill: {}", path.display(), scene_err)),
    }
}

fn run_inspect(path: &Path) -> Result<()> {
    let scene = load_scene(path)?;
    println!(
        "{} entities, background {}",
        scene.len(),
        scene.background_color()
    );
    for (z, entity) in scene.iter().enumerate() {
        let position = entity.position();
        let (sx, sy) = entity.scale();
        let bbox = entity.bounding_box();
        println!(
            "{:>3}  {:<16} {}  at ({:.1}, {:.1})  scale {:.3}x{:.3}{}  bounds [{:.1}, {:.1}, {:.1}, {:.1}]",
            z,
            entity.type_name(),
            entity.id(),
            position.x,
            position.y,
            sx,
            sy,
            if entity.locked() { " locked" } else { "" },
            bbox.min.x,
            bbox.min.y,
            bbox.max.x,
            bbox.max.y
        );
    }
    let bounds = scene.bounding_box();
    if bounds.is_empty() {
        println!("bounds: empty");
    } else {
        println!(
            "bounds: [{:.1}, {:.1}, {:.1}, {:.1}]",
            bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y
        );
    }
    Ok(())
}

fn run_fit(path: &Path, surface: &SurfaceArgs, padding: Option<f64>, config: &Config) -> Result<()> {
    let scene = load_scene(path)?;
    let mut viewport = config.viewport;
    if let Some(padding) = padding {
        viewport = viewport.with_padding(padding);
    }
    let fitter = ViewportFitter::new(viewport);
    let transform = fitter.fit_scene(&scene, surface.size(), surface.zoom, surface.mode());
    let report = FitReport {
        transform,
        scale: transform.uniform_scale(),
        placements: scene
            .iter()
            .map(|entity| project_entity(entity, &transform))
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_project(
    path: &Path,
    surface: &SurfaceArgs,
    background: BackgroundArg,
    highlight: Option<&str>,
    config: &Config,
) -> Result<()> {
    let scene = load_scene(path)?;
    let mut projector = Projector::new(&scene, surface.size(), config.viewport);
    projector.set_zoom(surface.zoom);
    projector.set_mode(surface.mode());
    projector.set_show_table(surface.table);
    let background = ProjectionBackground::from(background);
    while projector.background() != background {
        projector.cycle_background();
    }
    if let Some(hex) = highlight {
        projector.set_highlight(Some(Color::from_hex(hex)?));
    }

    let report = ProjectionReport {
        background: projector.background().color(),
        transform: projector.transform(),
        items: projector.render_list(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish(),
    )?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Sample { output, drill } => run_sample(&output, drill.as_deref()),
        Command::Inspect { file } => run_inspect(&file),
        Command::Fit {
            file,
            surface,
            padding,
        } => run_fit(&file, &surface, padding, &config),
        Command::Project {
            file,
            surface,
            background,
            highlight,
        } => run_project(&file, &surface, background, highlight.as_deref(), &config),
    }
}
