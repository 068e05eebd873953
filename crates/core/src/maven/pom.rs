//! Typed view of the parts of a pom.xml that classification reads

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// A `<plugin>` declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plugin {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
}

impl Plugin {
    pub fn is(&self, group_id: &str, artifact_id: &str) -> bool {
        self.group_id.as_deref() == Some(group_id) && self.artifact_id.as_deref() == Some(artifact_id)
    }
}

/// A `<build>` section, either top level or inside a profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSection {
    pub plugins: Vec<Plugin>,
    pub plugin_management: Vec<Plugin>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pom {
    pub artifact_id: Option<String>,
    pub parent_artifact_id: Option<String>,
    pub modules: Vec<String>,
    pub build: Option<BuildSection>,
    /// Build sections of every `<profiles><profile>` that declares one
    pub profile_builds: Vec<BuildSection>,
    pub properties: BTreeMap<String, String>,
}

impl Pom {
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)?;
        let project = doc.root_element();
        if project.tag_name().name() != "project" {
            return Err(Error::ParseError(format!(
                "expected <project> root element, found <{}>",
                project.tag_name().name()
            )));
        }

        let mut pom = Pom {
            artifact_id: child_text(&project, "artifactId"),
            ..Default::default()
        };

        if let Some(parent) = child_element(&project, "parent") {
            pom.parent_artifact_id = child_text(&parent, "artifactId");
        }

        if let Some(modules) = child_element(&project, "modules") {
            pom.modules = modules
                .children()
                .filter(|n| n.is_element() && n.tag_name().name() == "module")
                .filter_map(|n| n.text())
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(props) = child_element(&project, "properties") {
            for prop in props.children().filter(|n| n.is_element()) {
                if let Some(value) = prop.text().map(str::trim).filter(|t| !t.is_empty()) {
                    pom.properties
                        .insert(prop.tag_name().name().to_string(), value.to_string());
                }
            }
        }

        pom.build = child_element(&project, "build").map(|b| parse_build(&b));

        if let Some(profiles) = child_element(&project, "profiles") {
            pom.profile_builds = profiles
                .children()
                .filter(|n| n.is_element() && n.tag_name().name() == "profile")
                .filter_map(|profile| child_element(&profile, "build"))
                .map(|b| parse_build(&b))
                .collect();
        }

        Ok(pom)
    }

    /// Substitute `${name}` placeholders from this pom's `<properties>`
    pub fn resolve_placeholders(&self, text: &str) -> String {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

        re.replace_all(text, |caps: &regex::Captures<'_>| {
            self.properties
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
    }
}

fn parse_build(build: &roxmltree::Node<'_, '_>) -> BuildSection {
    let plugins = child_element(build, "plugins")
        .map(|p| parse_plugins(&p))
        .unwrap_or_default();
    let plugin_management = child_element(build, "pluginManagement")
        .and_then(|pm| child_element(&pm, "plugins"))
        .map(|p| parse_plugins(&p))
        .unwrap_or_default();

    BuildSection {
        plugins,
        plugin_management,
    }
}

fn parse_plugins(plugins: &roxmltree::Node<'_, '_>) -> Vec<Plugin> {
    plugins
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "plugin")
        .map(|plugin| Plugin {
            group_id: child_text(&plugin, "groupId"),
            artifact_id: child_text(&plugin, "artifactId"),
            version: child_text(&plugin, "version"),
        })
        .collect()
}

fn child_element<'a, 'input>(
    node: &roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn child_text(node: &roxmltree::Node<'_, '_>, name: &str) -> Option<String> {
    child_element(node, name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <parent>
        <groupId>io.openliberty.guides</groupId>
        <artifactId>guide-parent</artifactId>
    </parent>
    <artifactId>inventory</artifactId>
    <properties>
        <liberty.version>3.4.1</liberty.version>
    </properties>
    <modules>
        <module> system </module>
        <module>inventory</module>
    </modules>
    <build>
        <pluginManagement>
            <plugins>
                <plugin>
                    <groupId>io.openliberty.tools</groupId>
                    <artifactId>liberty-maven-plugin</artifactId>
                    <version>${liberty.version}</version>
                </plugin>
            </plugins>
        </pluginManagement>
    </build>
    <profiles>
        <profile>
            <id>dev</id>
            <build>
                <plugins>
                    <plugin>
                        <artifactId>maven-war-plugin</artifactId>
                    </plugin>
                </plugins>
            </build>
        </profile>
        <profile>
            <id>empty</id>
        </profile>
    </profiles>
</project>"#;

    #[test]
    fn test_parse_pom_sections() {
        let pom = Pom::parse(POM).unwrap();

        assert_eq!(pom.artifact_id.as_deref(), Some("inventory"));
        assert_eq!(pom.parent_artifact_id.as_deref(), Some("guide-parent"));
        assert_eq!(pom.modules, vec!["system", "inventory"]);

        let build = pom.build.as_ref().unwrap();
        assert!(build.plugins.is_empty());
        assert_eq!(build.plugin_management.len(), 1);
        assert!(build.plugin_management[0].is("io.openliberty.tools", "liberty-maven-plugin"));

        assert_eq!(pom.profile_builds.len(), 1);
        assert_eq!(
            pom.profile_builds[0].plugins[0].artifact_id.as_deref(),
            Some("maven-war-plugin")
        );
    }

    #[test]
    fn test_resolve_placeholders() {
        let pom = Pom::parse(POM).unwrap();
        assert_eq!(pom.resolve_placeholders("${liberty.version}"), "3.4.1");
        assert_eq!(pom.resolve_placeholders("${missing}"), "${missing}");
    }

    #[test]
    fn test_parse_rejects_malformed_xml() {
        assert!(Pom::parse("<project><artifactId>x</project>").is_err());
        assert!(Pom::parse("<settings/>").is_err());
    }
}
