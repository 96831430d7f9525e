use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use log::LevelFilter;

use markconv::app_settings::AppSettings;
use markconv::{MarkerFormat, MarkerStore, ShowMetadata, logger};

/// 在不同的标记格式之间转换。
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// 输入标记文件，支持 Audacity 标签 (.txt) 和 LRC (.lrc)
    in_file: PathBuf,

    /// 输出标记文件
    out_file: PathBuf,

    /// 与标记关联的媒体文件，输出 CUE 时必须提供
    #[arg(short, long)]
    media_file: Option<PathBuf>,

    /// 输出格式 (label, lrc, cue, transcript)，默认由输出扩展名决定
    #[arg(short, long)]
    format: Option<MarkerFormat>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    artist: Option<String>,

    #[arg(long)]
    album: Option<String>,

    #[arg(long)]
    genre: Option<String>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// 命令行提供的元数据优先，其余字段从配置中补齐。
    fn metadata(&self, defaults: Option<&ShowMetadata>) -> Option<ShowMetadata> {
        let any_flag = self.title.is_some()
            || self.artist.is_some()
            || self.album.is_some()
            || self.genre.is_some();
        if !any_flag {
            return defaults.cloned();
        }
        let base = defaults.cloned().unwrap_or_default();
        Some(ShowMetadata {
            title: self.title.clone().unwrap_or(base.title),
            artist: self.artist.clone().unwrap_or(base.artist),
            album: self.album.clone().unwrap_or(base.album),
            genre: self.genre.clone().unwrap_or(base.genre),
        })
    }
}

fn run(cli: &Cli, settings: &AppSettings) -> anyhow::Result<()> {
    let out_format = match cli.format {
        Some(format) => format,
        None => MarkerFormat::from_output_path(&cli.out_file)
            .with_context(|| format!("无法从 '{}' 推断输出格式", cli.out_file.display()))?,
    };

    if out_format == MarkerFormat::Cue && cli.media_file.is_none() {
        bail!("输出 CUE 时必须通过 --media-file 指定媒体文件。");
    }

    let mut store = MarkerStore::new(
        cli.metadata(settings.default_metadata.as_ref()),
        cli.media_file.as_ref(),
    );
    store
        .load(&cli.in_file)
        .with_context(|| format!("加载 '{}' 失败", cli.in_file.display()))?;
    store
        .save(&cli.out_file, out_format)
        .with_context(|| format!("保存 '{}' 失败", cli.out_file.display()))?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = AppSettings::load();

    let console_override = cli.verbose.then_some(LevelFilter::Debug);
    logger::init_global_logger(&settings.log_settings, console_override);

    match run(&cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!(target: "markconv_main", "{e:#}");
            ExitCode::FAILURE
        }
    }
}
