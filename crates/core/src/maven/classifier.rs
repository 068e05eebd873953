//! Decides whether a pom.xml describes a dev mode project

use super::pom::{Plugin, Pom};
use crate::types::{BuildFile, BuildTool, ProjectType};
use crate::version::{self, MAVEN_CONTAINER_VERSION};
use std::collections::HashMap;
use tracing::{debug, warn};

pub const LIBERTY_GROUP_ID: &str = "io.openliberty.tools";
pub const LIBERTY_MAVEN_PLUGIN: &str = "liberty-maven-plugin";
/// Predecessor plugin that also drives Liberty dev mode
pub const BOOST_MAVEN_PLUGIN: &str = "boost-maven-plugin";

/// Parent artifact id -> module names declared by that parent
pub type ChildModuleMap = HashMap<String, Vec<String>>;

/// Classify pom text as a multi-module parent
pub fn classify_parent_pom(xml: &str) -> BuildFile {
    match Pom::parse(xml) {
        Ok(pom) => classify_parent(&pom),
        Err(e) => {
            warn!("Failed to parse pom.xml: {}", e);
            BuildFile::invalid()
        }
    }
}

/// Read the `<modules>` of pom text, keyed by the pom's own artifact id
pub fn find_child_modules(xml: &str) -> ChildModuleMap {
    match Pom::parse(xml) {
        Ok(pom) => child_modules(&pom),
        Err(e) => {
            warn!("Failed to parse pom.xml: {}", e);
            ChildModuleMap::new()
        }
    }
}

/// Classify pom text given the modules declared by already known parents
pub fn classify_pom(xml: &str, child_modules: &ChildModuleMap) -> BuildFile {
    match Pom::parse(xml) {
        Ok(pom) => classify(&pom, child_modules, None),
        Err(e) => {
            warn!("Failed to parse pom.xml: {}", e);
            BuildFile::invalid()
        }
    }
}

pub fn classify_parent(pom: &Pom) -> BuildFile {
    let Some(build) = &pom.build else {
        return BuildFile::invalid();
    };

    if let Some(project_type) = detect_liberty_plugin(pom, &build.plugin_management) {
        debug!(
            "Parent pom {:?} manages {}",
            pom.artifact_id, LIBERTY_MAVEN_PLUGIN
        );
        return BuildFile::valid(project_type);
    }

    if build
        .plugins
        .iter()
        .any(|p| p.artifact_id.as_deref() == Some(BOOST_MAVEN_PLUGIN))
    {
        debug!("Parent pom {:?} uses {}", pom.artifact_id, BOOST_MAVEN_PLUGIN);
        return BuildFile::valid(ProjectType::LibertyMaven);
    }

    BuildFile::invalid()
}

pub fn child_modules(pom: &Pom) -> ChildModuleMap {
    let mut map = ChildModuleMap::new();
    if let Some(artifact_id) = &pom.artifact_id {
        if !pom.modules.is_empty() {
            map.insert(artifact_id.clone(), pom.modules.clone());
        }
    }
    map
}

/// Classify a pom.
///
/// `dir_name` is the name of the directory holding the pom; `<module>`
/// entries name directories, so it is accepted as a module match alongside
/// the artifact id.
pub fn classify(pom: &Pom, child_modules: &ChildModuleMap, dir_name: Option<&str>) -> BuildFile {
    if let Some(parent_id) = &pom.parent_artifact_id {
        if let Some(children) = child_modules.get(parent_id) {
            let listed = |name: Option<&str>| {
                name.is_some_and(|n| children.iter().any(|child| child.trim_end_matches('/') == n))
            };
            if listed(pom.artifact_id.as_deref()) || listed(dir_name) {
                debug!("Pom {:?} is a module of {}", pom.artifact_id, parent_id);
                return BuildFile::valid(ProjectType::LibertyMaven);
            }
        }
    }

    for profile_build in &pom.profile_builds {
        if let Some(project_type) = detect_liberty_plugin(pom, &profile_build.plugins) {
            return BuildFile::valid(project_type);
        }
    }

    if let Some(build) = &pom.build {
        if let Some(project_type) = detect_liberty_plugin(pom, &build.plugins) {
            return BuildFile::valid(project_type);
        }
    }

    BuildFile::invalid()
}

fn detect_liberty_plugin(pom: &Pom, plugins: &[Plugin]) -> Option<ProjectType> {
    let plugin = plugins
        .iter()
        .find(|p| p.is(LIBERTY_GROUP_ID, LIBERTY_MAVEN_PLUGIN))?;
    let declared = plugin.version.as_deref().map(|v| pom.resolve_placeholders(v));
    let container = version::supports_container(declared.as_deref(), &MAVEN_CONTAINER_VERSION);
    Some(ProjectType::new(BuildTool::Maven, container))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent_pom(version: Option<&str>) -> String {
        let version = version
            .map(|v| format!("<version>{v}</version>"))
            .unwrap_or_default();
        format!(
            r#"<project>
  <artifactId>parent</artifactId>
  <modules><module>a</module><module>b</module></modules>
  <build>
    <pluginManagement>
      <plugins>
        <plugin>
          <groupId>io.openliberty.tools</groupId>
          <artifactId>liberty-maven-plugin</artifactId>
          {version}
        </plugin>
      </plugins>
    </pluginManagement>
  </build>
</project>"#
        )
    }

    #[test]
    fn test_parent_pom_container_threshold() {
        let cases = [
            (None, ProjectType::LibertyMavenContainer),
            (Some("3.2.0"), ProjectType::LibertyMaven),
            (Some("3.3.0"), ProjectType::LibertyMavenContainer),
            (Some("3.4.1"), ProjectType::LibertyMavenContainer),
        ];
        for (version, expected) in cases {
            let file = classify_parent_pom(&parent_pom(version));
            assert_eq!(file.project_type(), Some(expected), "version {version:?}");
        }
    }

    #[test]
    fn test_parent_pom_with_boost_plugin() {
        let xml = r#"<project>
  <artifactId>boosted</artifactId>
  <build><plugins><plugin>
    <groupId>org.microshed.boost</groupId>
    <artifactId>boost-maven-plugin</artifactId>
  </plugin></plugins></build>
</project>"#;
        assert_eq!(
            classify_parent_pom(xml).project_type(),
            Some(ProjectType::LibertyMaven)
        );
    }

    #[test]
    fn test_parent_pom_requires_plugin_management() {
        let xml = r#"<project>
  <artifactId>app</artifactId>
  <build><plugins><plugin>
    <groupId>io.openliberty.tools</groupId>
    <artifactId>liberty-maven-plugin</artifactId>
  </plugin></plugins></build>
</project>"#;
        assert!(!classify_parent_pom(xml).is_valid());
    }

    #[test]
    fn test_find_child_modules() {
        let map = find_child_modules(&parent_pom(None));
        assert_eq!(map.get("parent"), Some(&vec!["a".to_string(), "b".to_string()]));
        assert!(find_child_modules("not xml").is_empty());
    }

    #[test]
    fn test_child_pom_listed_by_parent() {
        let map = find_child_modules(&parent_pom(None));
        let child = r#"<project>
  <parent><groupId>g</groupId><artifactId>parent</artifactId></parent>
  <artifactId>a</artifactId>
</project>"#;
        assert_eq!(
            classify_pom(child, &map).project_type(),
            Some(ProjectType::LibertyMaven)
        );

        let stranger = child.replace("<artifactId>a</artifactId>", "<artifactId>c</artifactId>");
        assert!(!classify_pom(&stranger, &map).is_valid());
    }

    #[test]
    fn test_child_pom_matched_by_directory_name() {
        let map = find_child_modules(&parent_pom(None));
        let pom = Pom::parse(
            r#"<project>
  <parent><artifactId>parent</artifactId></parent>
  <artifactId>module-b-artifact</artifactId>
</project>"#,
        )
        .unwrap();
        assert!(classify(&pom, &map, Some("b")).is_valid());
        assert!(!classify(&pom, &map, Some("z")).is_valid());
    }

    #[test]
    fn test_pom_with_plugin_in_profile() {
        let xml = r#"<project>
  <artifactId>app</artifactId>
  <profiles><profile><build><plugins><plugin>
    <groupId>io.openliberty.tools</groupId>
    <artifactId>liberty-maven-plugin</artifactId>
    <version>3.1</version>
  </plugin></plugins></build></profile></profiles>
</project>"#;
        assert_eq!(
            classify_pom(xml, &ChildModuleMap::new()).project_type(),
            Some(ProjectType::LibertyMaven)
        );
    }

    #[test]
    fn test_pom_with_direct_plugin() {
        let xml = r#"<project>
  <artifactId>app</artifactId>
  <properties><lmp.version>3.3.4</lmp.version></properties>
  <build><plugins><plugin>
    <groupId>io.openliberty.tools</groupId>
    <artifactId>liberty-maven-plugin</artifactId>
    <version>${lmp.version}</version>
  </plugin></plugins></build>
</project>"#;
        assert_eq!(
            classify_pom(xml, &ChildModuleMap::new()).project_type(),
            Some(ProjectType::LibertyMavenContainer)
        );
    }

    #[test]
    fn test_malformed_pom_is_invalid() {
        assert!(!classify_pom("<project>", &ChildModuleMap::new()).is_valid());
        assert!(!classify_parent_pom("").is_valid());
    }
}
