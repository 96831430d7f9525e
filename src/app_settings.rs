use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use ini::Ini;
use log::LevelFilter;

use crate::types::ShowMetadata;

const LOGGING_SECTION: &str = "Logging";
const METADATA_SECTION: &str = "Metadata";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub enable_file_log: bool,
    pub file_log_level: LevelFilter,
    pub console_log_level: LevelFilter,
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            enable_file_log: false,
            file_log_level: LevelFilter::Info,
            console_log_level: LevelFilter::Info,
        }
    }
}

/// 命令行使用的持久化配置。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppSettings {
    pub log_settings: LogSettings,
    /// 没有在命令行指定元数据时使用的默认节目元数据
    pub default_metadata: Option<ShowMetadata>,
}

impl AppSettings {
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "markconv", "markconv")
    }

    fn config_path() -> Option<PathBuf> {
        let Some(proj_dirs) = Self::project_dirs() else {
            log::error!("无法获取项目配置目录路径。");
            return None;
        };
        let config_dir = proj_dirs.config_dir();
        if !config_dir.exists() {
            if let Err(e) = fs::create_dir_all(config_dir) {
                log::error!("无法创建配置目录 {config_dir:?}: {e}");
                return None;
            }
        }
        Some(config_dir.join("markconv.ini"))
    }

    /// 从默认位置加载配置，文件不存在时写入一份默认配置。
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            log::warn!("无法确定配置文件路径。将使用运行时默认配置。");
            return AppSettings::default();
        };

        if !path.exists() {
            log::info!("配置文件 {path:?} 未找到。将创建并使用默认配置。");
            let default_settings = AppSettings::default();
            if let Err(e) = default_settings.save_to_path(&path) {
                log::error!("无法保存初始默认配置文件到 {path:?}: {e}");
            }
            return default_settings;
        }

        match Self::load_from_path(&path) {
            Ok(settings) => {
                log::debug!("从 {path:?} 加载配置成功。");
                settings
            }
            Err(e) => {
                log::error!("加载配置文件 {path:?} 失败: {e}。将使用默认配置。");
                AppSettings::default()
            }
        }
    }

    /// 从指定的 INI 文件加载配置。无法解析的值按键回退到默认值。
    pub fn load_from_path(path: &Path) -> Result<Self, ini::Error> {
        let conf = Ini::load_from_file(path)?;
        let defaults = LogSettings::default();

        let log_section = conf.section(Some(LOGGING_SECTION));
        let log_settings = LogSettings {
            enable_file_log: log_section
                .and_then(|s| s.get("EnableFileLog"))
                .and_then(|s| s.parse::<bool>().ok())
                .unwrap_or(defaults.enable_file_log),
            file_log_level: log_section
                .and_then(|s| s.get("FileLogLevel"))
                .and_then(|s| LevelFilter::from_str(s).ok())
                .unwrap_or(defaults.file_log_level),
            console_log_level: log_section
                .and_then(|s| s.get("ConsoleLogLevel"))
                .and_then(|s| LevelFilter::from_str(s).ok())
                .unwrap_or(defaults.console_log_level),
        };

        let default_metadata = conf.section(Some(METADATA_SECTION)).map(|s| {
            let field = |key: &str| s.get(key).unwrap_or_default().to_string();
            ShowMetadata {
                title: field("Title"),
                artist: field("Artist"),
                album: field("Album"),
                genre: field("Genre"),
            }
        });

        Ok(AppSettings {
            log_settings,
            default_metadata,
        })
    }

    pub fn save_to_path(&self, path: &Path) -> std::io::Result<()> {
        let mut conf = Ini::new();
        conf.with_section(Some(LOGGING_SECTION))
            .set(
                "EnableFileLog",
                self.log_settings.enable_file_log.to_string(),
            )
            .set("FileLogLevel", self.log_settings.file_log_level.to_string())
            .set(
                "ConsoleLogLevel",
                self.log_settings.console_log_level.to_string(),
            );

        if let Some(metadata) = &self.default_metadata {
            conf.with_section(Some(METADATA_SECTION))
                .set("Title", metadata.title.as_str())
                .set("Artist", metadata.artist.as_str())
                .set("Album", metadata.album.as_str())
                .set("Genre", metadata.genre.as_str());
        }

        conf.write_to_file(path)
    }
}
