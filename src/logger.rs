use std::fs;
use std::path::PathBuf;

use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;

use crate::app_settings::{AppSettings, LogSettings};

fn get_log_file_path() -> Result<PathBuf, String> {
    if let Some(proj_dirs) = AppSettings::project_dirs() {
        let log_dir = proj_dirs.data_local_dir();
        if !log_dir.exists() {
            fs::create_dir_all(log_dir)
                .map_err(|e| format!("无法创建日志目录 {log_dir:?}: {e}"))?;
        }
        Ok(log_dir.join("markconv.log"))
    } else {
        Err("无法获取项目日志目录".to_string())
    }
}

/// 日志行格式，控制台和文件共用。
fn format_dispatch(level: LevelFilter) -> Dispatch {
    Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S.%3f"),
                record.level(),
                message
            ))
        })
        .level(level)
}

/// 初始化全局日志记录器。
///
/// 控制台输出到 stderr；`console_override` 用于命令行 `--verbose`。
pub fn init_global_logger(settings: &LogSettings, console_override: Option<LevelFilter>) {
    let console_level = console_override.unwrap_or(settings.console_log_level);
    let mut final_dispatch =
        Dispatch::new().chain(format_dispatch(console_level).chain(std::io::stderr()));

    if settings.enable_file_log {
        match get_log_file_path().and_then(|path| {
            fern::log_file(&path)
                .map(|file| (path.clone(), file))
                .map_err(|e| format!("无法打开日志文件 {path:?}: {e}"))
        }) {
            Ok((path, log_file)) => {
                final_dispatch =
                    final_dispatch.chain(format_dispatch(settings.file_log_level).chain(log_file));
                eprintln!("[Logger Init] 文件日志已启用: {path:?}");
            }
            Err(e) => eprintln!("{e}。文件日志将被禁用。"),
        }
    }

    if let Err(e) = final_dispatch.apply() {
        eprintln!("日志记录器初始化失败: {e}");
    }
}
