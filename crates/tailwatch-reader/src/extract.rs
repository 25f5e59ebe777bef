//! Task, configuration group and progress extraction
//!
//! Entries are scanned latest-first. Each category is decided by the first
//! (most recent) entry that matches it; older matches in the same pass never
//! override a decided value, and a category with no match keeps its previous
//! value.

use std::sync::LazyLock;

use regex::Regex;
use tailwatch_core::ExtractionState;

/// `配置组 "name" <status>`
static CONFIG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"配置组\s*"(.+?)"\s*(加载完成|执行结束|开始执行|共\d+个脚本)"#)
        .expect("Invalid config group regex")
});

static SCRIPT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"→ 开始执行JS脚本: "(.+?)""#).expect("Invalid script task regex")
});

static ASSET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"assets/(.+?\.json)").expect("Invalid asset task regex"));

static MAP_TRACKING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"→ 开始执行(?:地图|路径)追踪任务: "(.+?)""#)
        .expect("Invalid map tracking task regex")
});

static FISHING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"当前钓鱼点:\s*([^\n]+)").expect("Invalid fishing spot regex")
});

/// `[cur/total] ... "name": 开始执行`
static TASK_START_PROGRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[(\d+)/(\d+)\][^"]*"([^"]+)":\s*开始执行"#)
        .expect("Invalid task start progress regex")
});

/// `当前进度：cur/total (...)`, either colon width
static CURRENT_PROGRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"当前进度[:：]\s*(\d+)/(\d+)\s*\([^)]+\)").expect("Invalid current progress regex")
});

/// `开始处理第G组第cur/total个name.json`
static GROUP_PROGRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"开始处理第\s*(\d+)\s*组第\s*(\d+)/(\d+)\s*个([^.]+\.json)")
        .expect("Invalid group progress regex")
});

/// Kinds of task an entry can announce, in match priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Script,
    AssetConfig,
    MapTracking,
    FishingSpot,
}

impl TaskKind {
    pub const ALL: [TaskKind; 4] = [
        TaskKind::Script,
        TaskKind::AssetConfig,
        TaskKind::MapTracking,
        TaskKind::FishingSpot,
    ];

    /// Label shown before the task name
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Script => "JS脚本",
            TaskKind::AssetConfig => "配置文件",
            TaskKind::MapTracking => "地图任务",
            TaskKind::FishingSpot => "钓鱼点",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            TaskKind::Script => &*SCRIPT_PATTERN,
            TaskKind::AssetConfig => &*ASSET_PATTERN,
            TaskKind::MapTracking => &*MAP_TRACKING_PATTERN,
            TaskKind::FishingSpot => &*FISHING_PATTERN,
        }
    }
}

/// Configuration group name, only when the group is being loaded or started
pub fn extract_config(entry: &str) -> Option<String> {
    let caps = CONFIG_PATTERN.captures(entry)?;
    let status = &caps[2];
    if status.contains("加载") || status.contains("开始") {
        Some(caps[1].to_string())
    } else {
        None
    }
}

/// Task label `"{kind}: {name}"` from the first matching task pattern
pub fn extract_task(entry: &str) -> Option<String> {
    TaskKind::ALL.iter().find_map(|kind| {
        let caps = kind.pattern().captures(entry)?;
        let mut name = caps[1].trim();
        if *kind == TaskKind::Script {
            // Keep only the script file name
            name = name.rsplit(['/', '\\']).next().unwrap_or(name);
        }
        Some(format!("{}: {}", kind.label(), name))
    })
}

/// Progress normalised to `"cur/total"`
pub fn extract_progress(entry: &str) -> Option<String> {
    if let Some(caps) = TASK_START_PROGRESS.captures(entry) {
        return Some(format!("{}/{}", &caps[1], &caps[2]));
    }
    if let Some(caps) = CURRENT_PROGRESS.captures(entry) {
        return Some(format!("{}/{}", &caps[1], &caps[2]));
    }
    GROUP_PROGRESS
        .captures(entry)
        .map(|caps| format!("{}/{}", &caps[2], &caps[3]))
}

/// Update `state` from `entries` (oldest first), most recent match winning
pub fn scan_latest<S: AsRef<str>>(entries: &[S], state: &mut ExtractionState) {
    let mut config_decided = false;
    let mut task_decided = false;
    let mut progress_decided = false;

    for entry in entries.iter().rev() {
        let entry = entry.as_ref();

        if !config_decided {
            if let Some(config) = extract_config(entry) {
                state.current_config = config;
                config_decided = true;
            }
        }
        if !task_decided {
            if let Some(task) = extract_task(entry) {
                state.current_task = task;
                task_decided = true;
            }
        }
        if !progress_decided {
            if let Some(progress) = extract_progress(entry) {
                state.current_progress = progress;
                progress_decided = true;
            }
        }

        if config_decided && task_decided && progress_decided {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tailwatch_core::{DEFAULT_CONFIG, DEFAULT_PROGRESS, DEFAULT_TASK};

    // ─────────────────────────────────────────────────────────────────────────
    // Config groups
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_config_loaded_and_started_qualify() {
        assert_eq!(
            extract_config(r#"[08:00:00.000] [INF] Foo 配置组 "Daily" 加载完成"#),
            Some("Daily".to_string())
        );
        assert_eq!(
            extract_config(r#"[08:00:00.000] [INF] Foo 配置组 "Daily" 开始执行"#),
            Some("Daily".to_string())
        );
    }

    #[test]
    fn test_config_ended_does_not_qualify() {
        assert_eq!(
            extract_config(r#"[08:00:00.000] [INF] Foo 配置组 "Weekly" 执行结束"#),
            None
        );
        assert_eq!(
            extract_config(r#"[08:00:00.000] [INF] Foo 配置组 "Weekly" 共12个脚本"#),
            None
        );
    }

    #[test]
    fn test_config_ended_group_does_not_mask_older_start() {
        let entries = [
            r#"[08:30:00.123] [INF] Foo 配置组 "Daily" 开始执行"#,
            r#"[08:30:05.000] [INF] Foo 配置组 "Weekly" 执行结束"#,
        ];
        let mut state = ExtractionState::default();
        scan_latest(&entries, &mut state);
        assert_eq!(state.current_config, "Daily");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tasks
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_task_script_keeps_file_name() {
        assert_eq!(
            extract_task(r#"→ 开始执行JS脚本: "scripts/daily/AutoCook.js""#),
            Some("JS脚本: AutoCook.js".to_string())
        );
        assert_eq!(
            extract_task(r#"→ 开始执行JS脚本: "scripts\daily\AutoCook.js""#),
            Some("JS脚本: AutoCook.js".to_string())
        );
        assert_eq!(
            extract_task(r#"→ 开始执行JS脚本: "AutoCook""#),
            Some("JS脚本: AutoCook".to_string())
        );
    }

    #[test]
    fn test_task_other_kinds() {
        assert_eq!(
            extract_task("加载 assets/pathing/蒙德/风车.json 完成"),
            Some("配置文件: pathing/蒙德/风车.json".to_string())
        );
        assert_eq!(
            extract_task(r#"→ 开始执行地图追踪任务: "望风角""#),
            Some("地图任务: 望风角".to_string())
        );
        assert_eq!(
            extract_task(r#"→ 开始执行路径追踪任务: "星落湖""#),
            Some("地图任务: 星落湖".to_string())
        );
        assert_eq!(
            extract_task("当前钓鱼点:  清泉镇  "),
            Some("钓鱼点: 清泉镇".to_string())
        );
    }

    #[test]
    fn test_task_priority_script_first() {
        let entry = r#"→ 开始执行JS脚本: "a/b.js" uses assets/x.json"#;
        assert_eq!(extract_task(entry), Some("JS脚本: b.js".to_string()));
    }

    #[test]
    fn test_task_no_match() {
        assert_eq!(extract_task("[08:00:00.000] [INF] Foo idle"), None);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Progress
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_progress_formats() {
        assert_eq!(
            extract_progress(r#"[3/10] 任务 "采集": 开始执行"#),
            Some("3/10".to_string())
        );
        assert_eq!(
            extract_progress("当前进度：4/9 (锄地)"),
            Some("4/9".to_string())
        );
        assert_eq!(
            extract_progress("当前进度: 5/9 (锄地)"),
            Some("5/9".to_string())
        );
        assert_eq!(
            extract_progress("开始处理第 2 组第 7/15 个路线.json"),
            Some("7/15".to_string())
        );
        assert_eq!(extract_progress("no progress here"), None);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scan semantics
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_scan_most_recent_wins() {
        let entries = [
            r#"[08:00:01.000] [INF] Foo → 开始执行JS脚本: "X.js""#,
            r#"[08:00:02.000] [INF] Foo → 开始执行JS脚本: "Y.js""#,
        ];
        let mut state = ExtractionState::default();
        scan_latest(&entries, &mut state);
        assert_eq!(state.current_task, "JS脚本: Y.js");
    }

    #[test]
    fn test_scan_categories_decided_independently() {
        let entries = [
            r#"[08:00:00.000] [INF] Foo 配置组 "Daily" 加载完成"#,
            "[08:00:01.000] [INF] Foo 当前进度：1/3 (a)",
            r#"[08:00:02.000] [INF] Foo → 开始执行地图追踪任务: "望风角""#,
            "[08:00:03.000] [INF] Foo 当前进度：2/3 (b)",
        ];
        let mut state = ExtractionState::default();
        scan_latest(&entries, &mut state);
        assert_eq!(state.current_config, "Daily");
        assert_eq!(state.current_task, "地图任务: 望风角");
        assert_eq!(state.current_progress, "2/3");
    }

    #[test]
    fn test_scan_preserves_prior_values_without_matches() {
        let mut state = ExtractionState {
            current_task: "JS脚本: Old.js".to_string(),
            current_config: "Daily".to_string(),
            current_progress: "1/2".to_string(),
        };
        let entries = ["[08:00:00.000] [INF] Foo nothing relevant"];
        scan_latest(&entries, &mut state);
        assert_eq!(state.current_task, "JS脚本: Old.js");
        assert_eq!(state.current_config, "Daily");
        assert_eq!(state.current_progress, "1/2");
    }

    #[test]
    fn test_scan_empty_keeps_defaults() {
        let entries: [&str; 0] = [];
        let mut state = ExtractionState::default();
        scan_latest(&entries, &mut state);
        assert_eq!(state.current_task, DEFAULT_TASK);
        assert_eq!(state.current_config, DEFAULT_CONFIG);
        assert_eq!(state.current_progress, DEFAULT_PROGRESS);
    }
}
