//! Typed view of the parts of a Gradle script that matter for dev mode

use super::dsl::{self, GradleTree, Node};
use crate::error::Result;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// A `classpath` dependency from a `buildscript { dependencies { } }` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub group: String,
    pub name: String,
    pub version: Option<String>,
}

impl Dependency {
    pub fn is(&self, group: &str, name: &str) -> bool {
        self.group == group && self.name == name
    }
}

/// Plugins applied and classpath dependencies declared at one level of a
/// script: the top level, `subprojects { }` or `allprojects { }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginSection {
    pub applied_plugins: Vec<String>,
    pub classpath: Vec<Dependency>,
}

impl PluginSection {
    pub fn applies(&self, plugin: &str) -> bool {
        self.applied_plugins.iter().any(|p| p == plugin)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradleScript {
    pub root: PluginSection,
    pub subprojects: Option<PluginSection>,
    pub allprojects: Option<PluginSection>,
    /// Project paths from `include` (settings scripts), without the leading `:`
    pub includes: Vec<String>,
    /// `rootProject.name` (settings scripts)
    pub root_project_name: Option<String>,
    /// `test.reports.html.destination` (or `outputLocation`), unevaluated
    pub test_report_destination: Option<String>,
}

impl GradleScript {
    pub fn parse(source: &str) -> Result<Self> {
        let tree = GradleTree::parse(source)?;
        Ok(Self::from_tree(&tree))
    }

    pub fn from_tree(tree: &GradleTree) -> Self {
        let nodes = tree.nodes.as_slice();

        let includes = dsl::calls(nodes, "include")
            .flat_map(split_include)
            .collect();

        let root_project_name = tree.value_of("rootProject.name").map(unquote);

        let test_report_destination = [
            "test.reports.html.destination",
            "test.reports.html.outputLocation",
        ]
        .iter()
        .find_map(|key| tree.value_of(key))
        .map(|value| first_quoted(value).unwrap_or_else(|| unquote(value)));

        Self {
            root: plugin_section(&[nodes]),
            subprojects: nested_section(nodes, "subprojects"),
            allprojects: nested_section(nodes, "allprojects"),
            includes,
            root_project_name,
            test_report_destination,
        }
    }
}

fn nested_section(nodes: &[Node], name: &str) -> Option<PluginSection> {
    let bodies: Vec<&[Node]> = dsl::blocks(nodes, name).collect();
    if bodies.is_empty() {
        None
    } else {
        Some(plugin_section(&bodies))
    }
}

fn plugin_section(bodies: &[&[Node]]) -> PluginSection {
    let mut section = PluginSection::default();

    for body in bodies {
        section
            .applied_plugins
            .extend(dsl::calls(body, "apply").filter_map(applied_plugin));

        for buildscript in dsl::blocks(body, "buildscript") {
            for dependencies in dsl::blocks(buildscript, "dependencies") {
                section
                    .classpath
                    .extend(dsl::calls(dependencies, "classpath").filter_map(parse_dependency));
            }
        }
    }

    section
}

/// `plugin: 'liberty'` -> `liberty`
fn applied_plugin(args: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"plugin\s*:\s*['"]([^'"]+)['"]"#).expect("valid apply regex")
    });
    re.captures(args).map(|caps| caps[1].to_string())
}

/// Parse `'group:name:version'` or `group: 'g', name: 'n', version: 'v'`
fn parse_dependency(args: &str) -> Option<Dependency> {
    static ENTRY_RE: OnceLock<Regex> = OnceLock::new();
    let entry_re = ENTRY_RE.get_or_init(|| {
        Regex::new(r#"(\w+)\s*:\s*['"]([^'"]*)['"]"#).expect("valid map entry regex")
    });

    let map: HashMap<&str, &str> = entry_re
        .captures_iter(args)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str();
            let value = caps.get(2)?.as_str();
            Some((key, value))
        })
        .collect();

    if let (Some(group), Some(name)) = (map.get("group"), map.get("name")) {
        return Some(Dependency {
            group: group.to_string(),
            name: name.to_string(),
            version: map.get("version").map(|v| v.to_string()),
        });
    }

    let coordinates = first_quoted(args)?;
    let mut parts = coordinates.split(':');
    let group = parts.next()?.trim();
    let name = parts.next()?.trim();
    if group.is_empty() || name.is_empty() {
        return None;
    }
    Some(Dependency {
        group: group.to_string(),
        name: name.to_string(),
        version: parts.next().map(|v| v.trim().to_string()),
    })
}

/// `'a', ':b:c'` or `['a', 'b']` -> project paths
fn split_include(args: &str) -> Vec<String> {
    args.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|item| unquote(item).trim_start_matches(':').to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn first_quoted(text: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r#"['"]([^'"]*)['"]"#).expect("valid quote regex"));
    re.captures(text).map(|caps| caps[1].to_string())
}

fn unquote(text: &str) -> String {
    let text = text.trim();
    for quote in ['\'', '"'] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|t| t.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_section() {
        let script = GradleScript::parse(
            r#"
buildscript {
    dependencies {
        classpath 'io.openliberty.tools:liberty-gradle-plugin:3.1'
        classpath group: 'org.example', name: 'tool', version: '1.0'
    }
}
apply plugin: 'war'
apply plugin: "liberty"
"#,
        )
        .unwrap();

        assert_eq!(script.root.applied_plugins, vec!["war", "liberty"]);
        assert_eq!(
            script.root.classpath,
            vec![
                Dependency {
                    group: "io.openliberty.tools".to_string(),
                    name: "liberty-gradle-plugin".to_string(),
                    version: Some("3.1".to_string()),
                },
                Dependency {
                    group: "org.example".to_string(),
                    name: "tool".to_string(),
                    version: Some("1.0".to_string()),
                },
            ]
        );
        assert!(script.subprojects.is_none());
        assert!(script.allprojects.is_none());
    }

    #[test]
    fn test_subprojects_and_allprojects_sections() {
        let script = GradleScript::parse(
            r#"
allprojects {
    group = 'demo'
}
subprojects {
    apply plugin: 'liberty'
    buildscript {
        dependencies {
            classpath("io.openliberty.tools:liberty-gradle-plugin")
        }
    }
}
"#,
        )
        .unwrap();

        let subprojects = script.subprojects.unwrap();
        assert!(subprojects.applies("liberty"));
        assert_eq!(subprojects.classpath[0].version, None);
        assert_eq!(script.allprojects, Some(PluginSection::default()));
        assert!(script.root.applied_plugins.is_empty());
    }

    #[test]
    fn test_settings_script() {
        let script = GradleScript::parse(
            r#"
rootProject.name = 'multi'
include 'ear', ':war'
include(['services:api'])
"#,
        )
        .unwrap();

        assert_eq!(script.root_project_name.as_deref(), Some("multi"));
        assert_eq!(script.includes, vec!["ear", "war", "services:api"]);
    }

    #[test]
    fn test_report_destination() {
        let nested = GradleScript::parse(
            "test {\n  reports {\n    html.destination = file(\"$buildDir/custom\")\n  }\n}\n",
        )
        .unwrap();
        assert_eq!(
            nested.test_report_destination.as_deref(),
            Some("$buildDir/custom")
        );

        let dotted =
            GradleScript::parse("test.reports.html.outputLocation = 'out/tests'\n").unwrap();
        assert_eq!(dotted.test_report_destination.as_deref(), Some("out/tests"));
    }

    #[test]
    fn test_parse_dependency_rejects_incomplete_coordinates() {
        assert_eq!(parse_dependency("'justagroup'"), None);
        assert_eq!(parse_dependency("files('lib.jar')"), None);
        assert_eq!(parse_dependency("project(':core')"), None);
    }
}
