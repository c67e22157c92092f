//! Summary views over the plugin catalog
//!
//! Pure rendering functions — no transport, no filesystem. Each view takes
//! the records a scan produced and returns the user-facing text, with an
//! explicit "nothing found" message instead of an empty body.

use crate::catalog::PluginInfo;

/// Placeholder for absent metadata fields.
const NONE_FIELD: &str = "无";

/// Numbered listing of all installed plugins.
pub fn listing_view(plugins: &[PluginInfo]) -> String {
    if plugins.is_empty() {
        return "未找到任何插件".to_string();
    }

    let mut lines = vec!["📋 已安装插件列表：".to_string()];
    for (i, plugin) in plugins.iter().enumerate() {
        lines.push(format!("\n{}. {}", i + 1, plugin.display_name()));
        lines.push(format!(
            "   📝 描述：{}",
            plugin.description().unwrap_or("无描述")
        ));
        if !plugin.commands.is_empty() {
            lines.push(format!("   ⚙️  命令数量：{}", plugin.command_count()));
        }
    }
    lines.join("\n")
}

/// Resolve a detail query to a plugin.
///
/// A query that parses as an integer is a 1-based index (out of range means
/// not found; it never falls back to name matching). Anything else is a
/// case-sensitive substring match against the display name or the directory
/// id, first match in scan order.
pub fn find_plugin<'a>(plugins: &'a [PluginInfo], query: &str) -> Option<&'a PluginInfo> {
    if let Ok(index) = query.parse::<usize>() {
        if index >= 1 {
            return plugins.get(index - 1);
        }
        return None;
    }

    plugins
        .iter()
        .find(|plugin| plugin.display_name().contains(query) || plugin.id.contains(query))
}

/// Detailed view of a single plugin, resolved by name or 1-based index.
pub fn detail_view(plugins: &[PluginInfo], query: &str) -> String {
    let Some(plugin) = find_plugin(plugins, query) else {
        return format!("未找到名称包含 '{}' 的插件", query);
    };

    let field = |value: Option<&str>| value.unwrap_or(NONE_FIELD).to_string();
    let meta = plugin.metadata.as_ref();

    let mut lines = vec![
        "\n🔍 插件详情：".to_string(),
        format!("📦 插件ID：{}", plugin.id),
        format!("📛 名称：{}", field(meta.and_then(|m| m.name.as_deref()))),
        format!("📝 描述：{}", field(meta.and_then(|m| m.desc.as_deref()))),
        format!("📖 帮助：{}", field(meta.and_then(|m| m.help.as_deref()))),
        format!("🔢 版本：{}", field(meta.and_then(|m| m.version.as_deref()))),
        format!("👤 作者：{}", field(meta.and_then(|m| m.author.as_deref()))),
        format!("🔗 仓库：{}", field(meta.and_then(|m| m.repo.as_deref()))),
    ];

    if plugin.commands.is_empty() {
        lines.push("\n⚙️  命令列表：无".to_string());
    } else {
        lines.push(format!("\n⚙️  命令列表（{}个）：", plugin.command_count()));
        for cmd in &plugin.commands {
            lines.push(format!("\n   📌 命令：{}", cmd.name));
            lines.push(format!("   📝 描述：{}", cmd.description));
            if !cmd.usage.is_empty() {
                lines.push(format!("   💡 用法：{}", cmd.usage));
            }
        }
    }

    lines.join("\n")
}

/// Catalogue of every command across all plugins, grouped by plugin.
///
/// Groups appear in ascending display-name order; within a group, commands
/// keep their source declaration order (the sort is stable).
pub fn catalogue_view(plugins: &[PluginInfo]) -> String {
    let mut entries: Vec<(&str, &crate::catalog::CommandInfo)> = plugins
        .iter()
        .flat_map(|plugin| {
            plugin
                .commands
                .iter()
                .map(move |cmd| (plugin.display_name(), cmd))
        })
        .collect();

    if entries.is_empty() {
        return "未找到任何命令".to_string();
    }

    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut lines = vec![format!("📋 所有插件命令汇总（共 {} 个）：", entries.len())];
    let mut current_plugin = "";
    for (plugin_name, cmd) in entries {
        if plugin_name != current_plugin {
            lines.push(format!("\n🔹 {}", plugin_name));
            current_plugin = plugin_name;
        }
        lines.push(format!("   📌 /{}", cmd.name));
        if !cmd.description.is_empty() {
            lines.push(format!("      {}", cmd.description));
        }
        if !cmd.usage.is_empty() {
            lines.push(format!("      💡 {}", cmd.usage));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CommandInfo, PluginMetadata};

    fn plugin(id: &str, name: Option<&str>, commands: Vec<CommandInfo>) -> PluginInfo {
        PluginInfo {
            id: id.to_string(),
            metadata: name.map(|name| PluginMetadata {
                name: Some(name.to_string()),
                desc: Some(format!("{} description", name)),
                ..Default::default()
            }),
            commands,
        }
    }

    fn command(name: &str, description: &str, usage: &str) -> CommandInfo {
        CommandInfo {
            name: name.to_string(),
            description: description.to_string(),
            usage: usage.to_string(),
        }
    }

    #[test]
    fn test_listing_counts_entries() {
        let plugins = vec![
            plugin("a", Some("Alpha"), vec![]),
            plugin("b", Some("Beta"), vec![command("x", "", "")]),
            plugin("c", None, vec![]),
        ];
        let text = listing_view(&plugins);
        assert!(text.contains("1. Alpha"));
        assert!(text.contains("2. Beta"));
        assert!(text.contains("3. c"));
        // Command count only shown for plugins that have commands
        assert_eq!(text.matches("命令数量").count(), 1);
    }

    #[test]
    fn test_listing_empty() {
        assert_eq!(listing_view(&[]), "未找到任何插件");
    }

    #[test]
    fn test_listing_missing_description_placeholder() {
        let plugins = vec![plugin("bare", None, vec![])];
        let text = listing_view(&plugins);
        assert!(text.contains("📝 描述：无描述"));
    }

    #[test]
    fn test_find_plugin_by_index_matches_by_name() {
        let plugins = vec![
            plugin("a", Some("Alpha"), vec![]),
            plugin("b", Some("Beta"), vec![]),
        ];
        for (i, p) in plugins.iter().enumerate() {
            let by_index = find_plugin(&plugins, &(i + 1).to_string()).unwrap();
            let by_name = find_plugin(&plugins, p.display_name()).unwrap();
            assert_eq!(by_index.id, by_name.id);
        }
    }

    #[test]
    fn test_find_plugin_out_of_range_index() {
        let plugins = vec![plugin("a", Some("Alpha"), vec![])];
        assert!(find_plugin(&plugins, "0").is_none());
        assert!(find_plugin(&plugins, "2").is_none());
        assert!(find_plugin(&plugins, "999").is_none());
    }

    #[test]
    fn test_find_plugin_substring_is_case_sensitive() {
        let plugins = vec![plugin("anime_helper", Some("Anime Helper"), vec![])];
        assert!(find_plugin(&plugins, "Anime").is_some());
        assert!(find_plugin(&plugins, "anime").is_some()); // matches the id
        assert!(find_plugin(&plugins, "ANIME").is_none());
    }

    #[test]
    fn test_find_plugin_first_match_wins() {
        let plugins = vec![
            plugin("helper_one", Some("Helper One"), vec![]),
            plugin("helper_two", Some("Helper Two"), vec![]),
        ];
        let found = find_plugin(&plugins, "Helper").unwrap();
        assert_eq!(found.id, "helper_one");
    }

    #[test]
    fn test_detail_not_found() {
        let plugins = vec![plugin("a", Some("Alpha"), vec![])];
        assert_eq!(
            detail_view(&plugins, "missing"),
            "未找到名称包含 'missing' 的插件"
        );
    }

    #[test]
    fn test_detail_missing_fields_show_placeholder() {
        let plugins = vec![plugin("bare", None, vec![])];
        let text = detail_view(&plugins, "bare");
        assert!(text.contains("📦 插件ID：bare"));
        assert!(text.contains("📛 名称：无"));
        assert!(text.contains("🔢 版本：无"));
        assert!(text.contains("⚙️  命令列表：无"));
    }

    #[test]
    fn test_detail_lists_commands() {
        let plugins = vec![plugin(
            "searcher",
            Some("Searcher"),
            vec![command("search", "Find items", "Usage: /search <term>")],
        )];
        let text = detail_view(&plugins, "1");
        assert!(text.contains("⚙️  命令列表（1个）："));
        assert!(text.contains("📌 命令：search"));
        assert!(text.contains("📝 描述：Find items"));
        assert!(text.contains("💡 用法：Usage: /search <term>"));
    }

    #[test]
    fn test_detail_omits_empty_usage_line() {
        let plugins = vec![plugin(
            "p",
            Some("P"),
            vec![command("bare", "No usage", "")],
        )];
        let text = detail_view(&plugins, "P");
        assert!(!text.contains("💡 用法"));
    }

    #[test]
    fn test_catalogue_groups_sorted_by_display_name() {
        let plugins = vec![
            plugin("zzz", Some("Zebra"), vec![command("z1", "", "")]),
            plugin(
                "aaa",
                Some("Aardvark"),
                vec![command("a2", "", ""), command("a1", "", "")],
            ),
        ];
        let text = catalogue_view(&plugins);
        let zebra = text.find("🔹 Zebra").unwrap();
        let aardvark = text.find("🔹 Aardvark").unwrap();
        assert!(aardvark < zebra);
        // Declaration order preserved inside a group
        let a2 = text.find("/a2").unwrap();
        let a1 = text.find("/a1").unwrap();
        assert!(a2 < a1);
    }

    #[test]
    fn test_catalogue_total_count() {
        let plugins = vec![
            plugin("a", Some("Alpha"), vec![command("one", "d", "")]),
            plugin("b", Some("Beta"), vec![command("two", "", "u")]),
        ];
        let text = catalogue_view(&plugins);
        assert!(text.starts_with("📋 所有插件命令汇总（共 2 个）："));
    }

    #[test]
    fn test_catalogue_empty() {
        assert_eq!(catalogue_view(&[]), "未找到任何命令");
        let plugins = vec![plugin("a", Some("Alpha"), vec![])];
        assert_eq!(catalogue_view(&plugins), "未找到任何命令");
    }

    #[test]
    fn test_catalogue_inlines_description_and_usage() {
        let plugins = vec![plugin(
            "s",
            Some("Searcher"),
            vec![command("search", "Find items", "Usage: /search <term>")],
        )];
        let text = catalogue_view(&plugins);
        assert!(text.contains("   📌 /search"));
        assert!(text.contains("      Find items"));
        assert!(text.contains("      💡 Usage: /search <term>"));
    }
}
